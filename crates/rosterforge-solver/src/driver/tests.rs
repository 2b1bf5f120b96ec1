//! Tests for the solver driver.

use super::*;
use crate::ModelBuilder;
use rosterforge_core::{Period, PeriodGrid};
use rosterforge_test::{always_available, available_at, demand_at, worker_set};

fn build(
    grid: &PeriodGrid,
    workers: Vec<rosterforge_core::Worker>,
    demand: &[(usize, u32)],
) -> RosterModel {
    let workers = worker_set(grid, workers);
    let demand = demand_at(grid, demand);
    ModelBuilder::new(&workers, &demand).build().unwrap()
}

#[test]
fn test_optimal_solve() {
    let grid = PeriodGrid::default();
    let model = build(
        &grid,
        vec![
            always_available(&grid, "Ann", 0, 9),
            always_available(&grid, "Bob", 0, 9),
        ],
        &[(0, 2)],
    );

    let result = SolverDriver::new().solve(model);
    assert_eq!(result.status(), &SolveStatus::Optimal);
    let solved = result.solved().unwrap();
    assert_eq!(solved.assignment().headcount(Period(0)), 2);
    assert_eq!(solved.objective(), 2);
    assert_eq!(result.statistics().variable_count, 90);
}

#[test]
fn test_objective_only_uses_slack_downward() {
    let grid = PeriodGrid::default();
    // Demand 1 is unconstrained, so the minimum adds nobody there
    let model = build(&grid, vec![always_available(&grid, "Ann", 0, 9)], &[(4, 1)]);

    let result = SolverDriver::new().solve(model);
    let solved = result.solved().unwrap();
    assert_eq!(solved.objective(), 0);
}

#[test]
fn test_min_hours_force_assignment_in_unconstrained_periods() {
    let grid = PeriodGrid::default();
    let model = build(&grid, vec![always_available(&grid, "Ann", 2, 9)], &[(4, 1), (5, 1)]);

    let result = SolverDriver::new().solve(model);
    let assignment = result.solved().unwrap().assignment();
    assert!(assignment.is_assigned(0, Period(4)));
    assert!(assignment.is_assigned(0, Period(5)));
    assert_eq!(assignment.worker_mask(0).count(), 2);
}

#[test]
fn test_infeasible_status() {
    let grid = PeriodGrid::default();
    let model = build(&grid, vec![available_at(&grid, "Ann", &[0], 0, 9)], &[(0, 2)]);

    let result = SolverDriver::new().solve(model);
    assert_eq!(result.status(), &SolveStatus::Infeasible);
    assert!(result.solved().is_none());
}

#[test]
fn test_empty_model_feasible() {
    let grid = PeriodGrid::default();
    let model = build(&grid, vec![], &[(3, 1)]);

    let result = SolverDriver::new().solve(model);
    assert!(result.status().is_optimal());
    assert_eq!(result.solved().unwrap().objective(), 0);
}

#[test]
fn test_empty_model_infeasible() {
    let grid = PeriodGrid::default();
    let model = build(&grid, vec![], &[(3, 2)]);

    assert_eq!(SolverDriver::new().solve(model).status(), &SolveStatus::Infeasible);
}

#[test]
fn test_zero_time_limit_times_out() {
    let grid = PeriodGrid::default();
    let model = build(&grid, vec![always_available(&grid, "Ann", 0, 9)], &[]);

    let result = SolverDriver::new()
        .with_time_limit(Duration::ZERO)
        .solve(model);
    assert_eq!(
        result.status(),
        &SolveStatus::NotSolved(NotSolvedReason::TimedOut)
    );
    assert!(result.solved().is_none());
}

#[test]
fn test_timed_out_solve_does_not_block_later_solves() {
    let grid = PeriodGrid::default();
    let model = || build(&grid, vec![always_available(&grid, "Ann", 0, 9)], &[(0, 1)]);

    let abandoned = SolverDriver::new()
        .with_time_limit(Duration::ZERO)
        .solve(model());
    assert!(abandoned.solved().is_none());

    let result = SolverDriver::new().solve(model());
    assert_eq!(result.status(), &SolveStatus::Optimal);
}

#[test]
fn test_cancel_before_start() {
    let grid = PeriodGrid::default();
    let model = build(&grid, vec![always_available(&grid, "Ann", 0, 9)], &[]);

    let driver = SolverDriver::new();
    driver.handle().terminate_early();
    let result = driver.solve(model);
    assert_eq!(
        result.status(),
        &SolveStatus::NotSolved(NotSolvedReason::Cancelled)
    );
}

#[test]
fn test_cancel_is_cleared_after_solve() {
    let grid = PeriodGrid::default();
    let driver = SolverDriver::new();
    driver.handle().terminate_early();

    let first = driver.solve(build(&grid, vec![always_available(&grid, "Ann", 0, 9)], &[(0, 2)]));
    assert_eq!(
        first.status(),
        &SolveStatus::NotSolved(NotSolvedReason::Cancelled)
    );
    assert!(!driver.handle().is_terminate_requested());

    let second = driver.solve(build(
        &grid,
        vec![
            always_available(&grid, "Ann", 0, 9),
            always_available(&grid, "Bob", 0, 9),
        ],
        &[(0, 2)],
    ));
    assert_eq!(second.status(), &SolveStatus::Optimal);
    assert_eq!(second.solved().unwrap().objective(), 2);
}

#[test]
fn test_handle_shared_across_threads() {
    let driver = SolverDriver::new();
    let handle = driver.handle();
    std::thread::spawn(move || handle.terminate_early())
        .join()
        .unwrap();
    assert!(driver.handle().is_terminate_requested());
}

#[test]
fn test_time_limit_configuration() {
    assert_eq!(
        SolverDriver::new().time_limit(),
        Some(Duration::from_secs(DEFAULT_TIME_LIMIT_SECS))
    );
    assert_eq!(SolverDriver::new().without_time_limit().time_limit(), None);
}

#[test]
fn test_panic_message() {
    let boxed: Box<dyn std::any::Any + Send> = Box::new("boom");
    assert_eq!(panic_message(boxed.as_ref()), "solver panicked: boom");
    let boxed: Box<dyn std::any::Any + Send> = Box::new(7u8);
    assert_eq!(panic_message(boxed.as_ref()), "solver panicked");
}

#[test]
fn test_status_display() {
    assert_eq!(SolveStatus::Optimal.to_string(), "optimal");
    assert_eq!(
        SolveStatus::NotSolved(NotSolvedReason::TimedOut).to_string(),
        "timed out"
    );
}
