//! End-to-end roster solving: build, solve, extract.

use std::time::Duration;

use rosterforge_config::RosterConfig;
use rosterforge_core::{
    DemandPolicy, DemandProfile, PeriodGrid, Roster, RosterError, SupplySummary, WorkerRow,
    WorkerSet,
};
use tracing::{info, warn};

use crate::builder::ModelBuilder;
use crate::driver::{SolveHandle, SolverDriver};
use crate::extract::ScheduleExtractor;

/// Solves weekly rosters on one period grid under one demand policy.
///
/// # Example
///
/// ```
/// use rosterforge_core::{DemandProfile, PeriodGrid, PeriodMask, Worker, WorkerSet};
/// use rosterforge_solver::RosterSolver;
///
/// let grid = PeriodGrid::default();
/// let ann = Worker::new("Ann", PeriodMask::full(45), 0, 9).unwrap();
/// let workers = WorkerSet::new(vec![ann], &grid).unwrap();
/// let demand = DemandProfile::zeros(&grid);
///
/// let roster = RosterSolver::new(grid).solve(&workers, &demand).unwrap();
/// assert!(roster.get("Ann").unwrap().is_empty());
/// ```
#[derive(Debug)]
pub struct RosterSolver {
    grid: PeriodGrid,
    policy: DemandPolicy,
    driver: SolverDriver,
}

impl Default for RosterSolver {
    fn default() -> Self {
        Self::new(PeriodGrid::default())
    }
}

impl RosterSolver {
    pub fn new(grid: PeriodGrid) -> Self {
        Self {
            grid,
            policy: DemandPolicy::default(),
            driver: SolverDriver::new(),
        }
    }

    /// Creates a solver from configuration.
    ///
    /// Without a configured time limit the driver keeps its default.
    pub fn from_config(config: &RosterConfig) -> Result<Self, RosterError> {
        let mut solver = Self::new(config.period_grid()?).with_policy(config.demand);
        if let Some(limit) = config.time_limit() {
            solver = solver.with_time_limit(limit);
        }
        Ok(solver)
    }

    pub fn with_policy(mut self, policy: DemandPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.driver = self.driver.with_time_limit(limit);
        self
    }

    pub fn grid(&self) -> &PeriodGrid {
        &self.grid
    }

    pub fn policy(&self) -> &DemandPolicy {
        &self.policy
    }

    /// Handle for cancelling solves run by this solver.
    pub fn handle(&self) -> SolveHandle {
        self.driver.handle()
    }

    /// Who can work in each period.
    pub fn supply(&self, workers: &WorkerSet) -> SupplySummary {
        SupplySummary::from_workers(workers, &self.grid)
    }

    /// Parses raw rows and demand values, then solves.
    pub fn solve_rows(&self, rows: &[WorkerRow], demand: Vec<u32>) -> Result<Roster, RosterError> {
        let workers = WorkerSet::from_rows(rows, &self.grid)?;
        let demand = DemandProfile::new(demand, &self.grid)?;
        self.solve(&workers, &demand)
    }

    /// Solves one weekly roster.
    ///
    /// # Errors
    ///
    /// - [`RosterError::InputParse`] if demand and availability disagree in length
    /// - [`RosterError::Infeasible`] with a diagnostic report when no roster exists
    /// - [`RosterError::SolverFailure`] for timeouts, cancellation and backend errors
    pub fn solve(&self, workers: &WorkerSet, demand: &DemandProfile) -> Result<Roster, RosterError> {
        let model = ModelBuilder::new(workers, demand)
            .with_policy(self.policy)
            .build()?;
        info!(
            event = "solve_start",
            worker_count = workers.len(),
            period_count = self.grid.period_count(),
            variable_count = model.variable_count(),
            constraint_count = model.constraint_count(),
        );
        let result = self.driver.solve(model);

        let limit_ms = self
            .driver
            .time_limit()
            .map_or(0, |limit| limit.as_millis() as u64);
        let extracted = ScheduleExtractor::new(workers, &self.grid)
            .with_diagnostics(demand, self.policy)
            .with_time_limit_ms(limit_ms)
            .extract(&result);

        match &extracted {
            Ok(roster) => info!(
                event = "solve_end",
                status = %result.status(),
                objective = result.solved().map_or(0, |s| s.objective()),
                assigned_hours = roster.total_hours(),
                duration_ms = result.statistics().elapsed.as_millis() as u64,
            ),
            Err(RosterError::Infeasible(report)) => warn!(
                event = "solve_infeasible",
                period_shortfalls = report.period_shortfalls.len(),
                worker_shortfalls = report.worker_shortfalls.len(),
                "{report}"
            ),
            Err(e) => warn!(event = "solve_failed", status = %result.status(), error = %e),
        }
        extracted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rosterforge_test::{always_available, demand_at, worker_set};

    #[test]
    fn test_from_config_applies_settings() {
        let config = RosterConfig::from_toml_str(
            r#"
            [demand]
            single_demand = "exact"

            [termination]
            seconds_spent_limit = 5
            "#,
        )
        .unwrap();
        let solver = RosterSolver::from_config(&config).unwrap();
        assert_eq!(solver.policy().rule_for(1), rosterforge_core::DemandRule::Exact(1));
        assert_eq!(solver.driver.time_limit(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_from_config_keeps_default_limit() {
        let solver = RosterSolver::from_config(&RosterConfig::default()).unwrap();
        assert_eq!(
            solver.driver.time_limit(),
            Some(Duration::from_secs(crate::DEFAULT_TIME_LIMIT_SECS))
        );
    }

    #[test]
    fn test_supply_counts_available_workers() {
        let grid = PeriodGrid::default();
        let workers = worker_set(&grid, vec![always_available(&grid, "Ann", 0, 9)]);
        let supply = RosterSolver::new(grid).supply(&workers);
        assert!(supply.totals().iter().all(|&n| n == 1));
    }

    #[test]
    fn test_cancelled_solve_is_error() {
        let grid = PeriodGrid::default();
        let workers = worker_set(&grid, vec![always_available(&grid, "Ann", 0, 9)]);
        let demand = demand_at(&grid, &[]);
        let solver = RosterSolver::new(grid);
        solver.handle().terminate_early();

        let err = solver.solve(&workers, &demand).unwrap_err();
        assert!(matches!(
            err,
            RosterError::SolverFailure(rosterforge_core::SolverFailure::Cancelled)
        ));
    }

    #[test]
    fn test_solver_usable_after_cancel() {
        let grid = PeriodGrid::default();
        let workers = worker_set(&grid, vec![always_available(&grid, "Ann", 0, 9)]);
        let demand = demand_at(&grid, &[(0, 1)]);
        let solver = RosterSolver::new(grid);
        solver.handle().terminate_early();

        assert!(solver.solve(&workers, &demand).is_err());
        assert!(!solver.handle().is_terminate_requested());
        let roster = solver.solve(&workers, &demand).unwrap();
        assert_eq!(roster.total_hours(), 0);
    }
}
