//! Weekly Roster Demo
//!
//! Reads a worker table and a 45-value demand vector from YAML, prints the
//! raw supply next to demand, then solves and prints each worker's week.
//!
//! ```text
//! cargo run -p weekly-roster -- demos/weekly-roster/week.yaml
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use rosterforge::prelude::*;
use rosterforge::SupplySummary;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct WeekProblem {
    workers: Vec<WorkerRow>,
    demand: Vec<u32>,
}

fn load_problem(path: &Path) -> Result<WeekProblem, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    serde_yaml::from_str(&text).map_err(|e| format!("cannot parse {}: {e}", path.display()))
}

fn print_supply(problem: &WeekProblem, grid: &PeriodGrid) {
    let Ok(workers) = WorkerSet::from_rows(&problem.workers, grid) else {
        return;
    };
    let supply = SupplySummary::from_workers(&workers, grid);

    println!("\n{:<12} {:>6} {:>9}  available", "period", "demand", "supply");
    for (entry, demand) in supply.periods().iter().zip(&problem.demand) {
        println!(
            "{:<12} {:>6} {:>9}  {}",
            entry.label,
            demand,
            entry.total(),
            entry.available.join(", ")
        );
    }
}

fn print_roster(roster: &Roster) {
    println!("\n{:<10} {:>5}  schedule", "worker", "hours");
    for schedule in roster.schedules() {
        println!(
            "{:<10} {:>5}  {}",
            schedule.name(),
            schedule.hours(),
            schedule.labels().join(", ")
        );
    }
}

fn main() -> ExitCode {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("week.yaml"));

    let problem = match load_problem(&path) {
        Ok(problem) => problem,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let config = match RosterConfig::load_or_default(rosterforge::CONFIG_FILE) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("cannot load {}: {e}", rosterforge::CONFIG_FILE);
            return ExitCode::FAILURE;
        }
    };
    if let Ok(grid) = config.period_grid() {
        print_supply(&problem, &grid);
    }

    match solve_roster_with_config(&config, &problem.workers, problem.demand.clone()) {
        Ok(roster) => {
            print_roster(&roster);
            ExitCode::SUCCESS
        }
        Err(RosterError::Infeasible(report)) => {
            eprintln!("\nNo roster satisfies every constraint.\n{report}");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("\n{e}");
            ExitCode::FAILURE
        }
    }
}
