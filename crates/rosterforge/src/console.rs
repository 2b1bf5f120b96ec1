//! Colorful console output for roster solving.
//!
//! Provides a `tracing` layer that formats solver events with colors.
//! Initialized on first use of [`solve_roster`](crate::solve_roster) when the
//! `console` feature is enabled.

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

const DEFAULT_FILTER: &str = "rosterforge_solver=info";

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect. Does
/// nothing further if another global subscriber is already installed.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(RosterConsoleLayer)
            .try_init();
    });
}

fn print_banner() {
    let banner = r#"
 ____            _            _____
|  _ \ ___  ___| |_ ___ _ __|  ___|__  _ __ __ _  ___
| |_) / _ \/ __| __/ _ \ '__| |_ / _ \| '__/ _` |/ _ \
|  _ < (_) \__ \ ||  __/ |  |  _| (_) | | | (_| |  __/
|_| \_\___/|___/\__\___|_|  |_|  \___/|_|  \__, |\___|
                                            |___/
"#;

    let version_line = format!(
        "                   v{} - Weekly Roster Solver\n",
        env!("CARGO_PKG_VERSION")
    );

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats roster solver events with colors.
pub struct RosterConsoleLayer;

impl<S: Subscriber> Layer<S> for RosterConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("rosterforge_solver") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    message: Option<String>,
    status: Option<String>,
    error: Option<String>,
    worker_count: Option<u64>,
    period_count: Option<u64>,
    variable_count: Option<u64>,
    constraint_count: Option<u64>,
    objective: Option<u64>,
    assigned_hours: Option<u64>,
    duration_ms: Option<u64>,
    limit_ms: Option<u64>,
    period_shortfalls: Option<u64>,
    worker_shortfalls: Option<u64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.record_text(field, s.trim_matches('"'));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record_text(field, value);
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        let slot = match field.name() {
            "worker_count" => &mut self.worker_count,
            "period_count" => &mut self.period_count,
            "variable_count" => &mut self.variable_count,
            "constraint_count" => &mut self.constraint_count,
            "objective" => &mut self.objective,
            "assigned_hours" => &mut self.assigned_hours,
            "duration_ms" => &mut self.duration_ms,
            "limit_ms" => &mut self.limit_ms,
            "period_shortfalls" => &mut self.period_shortfalls,
            "worker_shortfalls" => &mut self.worker_shortfalls,
            _ => return,
        };
        *slot = Some(value);
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }
}

impl EventVisitor {
    fn record_text(&mut self, field: &Field, value: &str) {
        let slot = match field.name() {
            "event" => &mut self.event,
            "message" => &mut self.message,
            "status" => &mut self.status,
            "error" => &mut self.error,
            _ => return,
        };
        *slot = Some(value.to_string());
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "solve_start" => format_solve_start(v),
        "solve_end" => format_solve_end(v),
        "solve_infeasible" => format_infeasible(v),
        "solve_timeout" => warn_line(&format!(
            "Time limit reached after {}",
            format_duration_ms(v.limit_ms.unwrap_or(0))
        )),
        "solve_cancelled" => warn_line("Solve cancelled"),
        "solve_failed" => warn_line(&format!(
            "Solve failed: {}",
            v.error.as_deref().unwrap_or("unknown error")
        )),
        _ => String::new(),
    }
}

fn count(n: Option<u64>) -> String {
    n.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn format_solve_start(v: &EventVisitor) -> String {
    format!(
        "{} {} {} worker count ({}), period count ({}), variable count ({}), constraint count ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Roster]".bright_cyan(),
        count(v.worker_count).bright_yellow(),
        count(v.period_count).bright_yellow(),
        count(v.variable_count).bright_yellow(),
        count(v.constraint_count).bright_yellow(),
    )
}

fn format_solve_end(v: &EventVisitor) -> String {
    let mut output = format!(
        "{} {} {} Solving ended: status ({}), time spent ({})",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Roster]".bright_cyan(),
        v.status.as_deref().unwrap_or("unknown").bright_green(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
    );

    output.push_str("\n\n");
    output.push_str(&"╔══════════════════════════════════════════════════════════╗".bright_cyan().to_string());
    output.push('\n');
    output.push_str(&summary_row("Assigned hours:", &count(v.assigned_hours)));
    output.push('\n');
    output.push_str(&summary_row("Objective:", &count(v.objective)));
    output.push('\n');
    output.push_str(&"╚══════════════════════════════════════════════════════════╝".bright_cyan().to_string());
    output.push('\n');
    output
}

fn summary_row(label: &str, value: &str) -> String {
    format!(
        "{}  {:<18}{:>36}  {}",
        "║".bright_cyan(),
        label,
        value,
        "║".bright_cyan()
    )
}

fn format_infeasible(v: &EventVisitor) -> String {
    let mut output = format!(
        "{} {} {} {} ({} short periods, {} short workers)",
        timestamp().bright_black(),
        "WARN".bright_yellow(),
        "[Roster]".bright_cyan(),
        "INFEASIBLE".bright_red().bold(),
        count(v.period_shortfalls).bright_red(),
        count(v.worker_shortfalls).bright_red(),
    );
    if let Some(report) = v.message.as_deref() {
        for line in report.lines() {
            output.push_str("\n    ");
            output.push_str(line);
        }
    }
    output
}

fn warn_line(text: &str) -> String {
    format!(
        "{} {} {} {}",
        timestamp().bright_black(),
        "WARN".bright_yellow(),
        "[Roster]".bright_cyan(),
        text
    )
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{:5}.{:03}", secs, millis)
        })
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        format!("{}m {}s", ms / 60_000, (ms % 60_000) / 1000)
    }
}
