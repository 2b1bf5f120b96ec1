//! Roster entry point that hides the pipeline wiring.

use rosterforge_config::RosterConfig;
use rosterforge_core::{Roster, RosterError, WorkerRow};
use rosterforge_solver::RosterSolver;

/// Configuration file read by [`solve_roster`] from the working directory.
pub const CONFIG_FILE: &str = "roster.toml";

/// Solves one week from raw worker rows and a demand vector.
///
/// Reads [`CONFIG_FILE`] when present and falls back to defaults otherwise.
/// A config file that exists but does not parse is a [`RosterError::Config`].
pub fn solve_roster(rows: &[WorkerRow], demand: Vec<u32>) -> Result<Roster, RosterError> {
    let config = RosterConfig::load_or_default(CONFIG_FILE)?;
    solve_roster_with_config(&config, rows, demand)
}

pub fn solve_roster_with_config(
    config: &RosterConfig,
    rows: &[WorkerRow],
    demand: Vec<u32>,
) -> Result<Roster, RosterError> {
    #[cfg(feature = "console")]
    crate::console::init();

    RosterSolver::from_config(config)?.solve_rows(rows, demand)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rosterforge_core::PeriodGrid;
    use rosterforge_test::worker_row;

    #[test]
    fn test_solve_roster_with_config() {
        let grid = PeriodGrid::default();
        let rows = [
            worker_row(&grid, "Ann", &[("8", "12")], 2, 9),
            worker_row(&grid, "Bob", &[("10", "14")], 0, 9),
        ];
        let mut demand = vec![0; grid.period_count()];
        demand[2] = 2;
        demand[3] = 2;

        let roster = solve_roster_with_config(&RosterConfig::default(), &rows, demand).unwrap();
        assert_eq!(
            roster.to_map()["Ann"],
            vec!["Mon 10-11".to_string(), "Mon 11-12".to_string()]
        );
        assert_eq!(roster.schedule_text("Bob").unwrap(), "Mon 10-11, Mon 11-12");
    }

    #[test]
    fn test_invalid_config_grid_is_config_error() {
        let config = RosterConfig::from_toml_str(
            r#"
            [grid]
            day_start_hour = 18
            day_end_hour = 9
            "#,
        )
        .unwrap();
        let err = solve_roster_with_config(&config, &[], vec![]).unwrap_err();
        assert!(matches!(err, RosterError::Config(_)));
    }

    #[test]
    fn test_malformed_config_file_is_config_error() {
        let path = std::env::temp_dir().join(format!(
            "rosterforge-facade-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[termination]\nseconds_spent_limit = \"soon\"\n").unwrap();

        let loaded = RosterConfig::load_or_default(&path).map_err(RosterError::from);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(loaded, Err(RosterError::Config(_))));
    }

    #[test]
    fn test_custom_grid_from_config() {
        let config = RosterConfig::from_toml_str(
            r#"
            [grid]
            weekdays = ["Sat", "Sun"]
            day_start_hour = 10
            day_end_hour = 12
            "#,
        )
        .unwrap();
        let grid = config.period_grid().unwrap();
        let rows = [worker_row(&grid, "Ann", &[("10", "12"), ("10", "11")], 0, 4)];

        let err = solve_roster_with_config(&config, &rows, vec![2, 0, 0, 1]).unwrap_err();
        // Demand 2 at Sat 10-11 with a single worker cannot be met.
        assert!(matches!(err, RosterError::Infeasible(_)));
    }
}
