//! End-to-end roster scenarios.
//!
//! These run the full build, solve and extract pipeline against the
//! bundled MILP backend.

use rosterforge_core::{
    DemandPolicy, Period, PeriodGrid, Roster, RosterError, SingleDemand, WorkerSet,
};
use rosterforge_solver::RosterSolver;
use rosterforge_test::{
    always_available, available_at, demand_at, planted_instance, uniform_demand, worker_row,
    worker_set,
};

fn assert_within_availability(roster: &Roster, workers: &WorkerSet) {
    for worker in workers {
        let schedule = roster.get(worker.name()).unwrap();
        assert!(
            schedule.assigned().is_subset_of(worker.availability()),
            "{} assigned outside availability",
            worker.name()
        );
    }
}

fn assert_hours_within_bounds(roster: &Roster, workers: &WorkerSet) {
    for worker in workers {
        let hours = roster.get(worker.name()).unwrap().hours() as u32;
        assert!(
            (worker.min_hours()..=worker.max_hours()).contains(&hours),
            "{} works {hours} hours outside [{}, {}]",
            worker.name(),
            worker.min_hours(),
            worker.max_hours()
        );
    }
}

#[test]
fn test_single_worker_zero_demand_is_empty() {
    let grid = PeriodGrid::default();
    let rows = [worker_row(&grid, "Ann", &[("8", "17")], 0, 9)];

    let roster = RosterSolver::new(grid.clone())
        .solve_rows(&rows, vec![0; grid.period_count()])
        .unwrap();
    let ann = roster.get("Ann").unwrap();
    assert!(ann.is_empty());
    assert_eq!(roster.schedule_text("Ann").unwrap(), "");
}

#[test]
fn test_unmet_demand_reports_infeasibility() {
    let grid = PeriodGrid::default();
    let rows = [worker_row(&grid, "Ann", &[("8", "9")], 0, 9)];
    let mut demand = vec![0; grid.period_count()];
    demand[0] = 2;

    let err = RosterSolver::new(grid).solve_rows(&rows, demand).unwrap_err();
    let RosterError::Infeasible(report) = err else {
        panic!("expected infeasibility, got {err:?}");
    };
    assert_eq!(report.period_shortfalls[0].label, "Mon 8-9");
    assert!(report.has_findings());
}

#[test]
fn test_tolerance_band_caps_at_available_workers() {
    let grid = PeriodGrid::default();
    let p = 20;
    let workers = worker_set(
        &grid,
        ["Ann", "Bob", "Cid"]
            .iter()
            .map(|name| available_at(&grid, name, &[p], 0, 9))
            .collect(),
    );
    let solver = RosterSolver::new(grid.clone());

    // Demand 3 allows [2, 4] and the objective settles on the lower edge.
    // Demand 4 allows [3, 5] but only three workers are available.
    for (demand_value, expected) in [(3, 2), (4, 3)] {
        let demand = demand_at(&grid, &[(p, demand_value)]);
        let roster = solver.solve(&workers, &demand).unwrap();
        assert_eq!(roster.headcount()[p], expected, "demand {demand_value}");
    }
}

#[test]
fn test_zero_demand_blocks_available_workers() {
    let grid = PeriodGrid::default();
    let workers = worker_set(
        &grid,
        vec![
            always_available(&grid, "Ann", 0, 9),
            always_available(&grid, "Bob", 0, 9),
        ],
    );
    let demand = demand_at(&grid, &[(0, 2)]);

    let roster = RosterSolver::new(grid).solve(&workers, &demand).unwrap();
    let headcount = roster.headcount();
    assert_eq!(headcount[0], 2);
    assert!(headcount[1..].iter().all(|&n| n == 0));
}

#[test]
fn test_band_around_larger_demand() {
    let grid = PeriodGrid::default();
    let workers = worker_set(
        &grid,
        (0..6)
            .map(|i| always_available(&grid, &format!("W{i}"), 0, 9))
            .collect(),
    );
    let demand = demand_at(&grid, &[(10, 5)]);

    let roster = RosterSolver::new(grid).solve(&workers, &demand).unwrap();
    let count = roster.headcount()[10];
    assert!((4..=6).contains(&count), "headcount {count}");
}

#[test]
fn test_hour_bounds_respected() {
    let grid = PeriodGrid::default();
    let workers = worker_set(&grid, vec![always_available(&grid, "Ann", 3, 4)]);
    let demand = demand_at(&grid, &(0..6).map(|p| (p, 1)).collect::<Vec<_>>());

    let roster = RosterSolver::new(grid).solve(&workers, &demand).unwrap();
    assert_hours_within_bounds(&roster, &workers);
    let ann = roster.get("Ann").unwrap();
    assert!(ann.periods().iter().all(|p| p.0 < 6));
}

#[test]
fn test_single_demand_switch() {
    let grid = PeriodGrid::default();
    let workers = worker_set(&grid, vec![always_available(&grid, "Ann", 0, 9)]);
    let demand = demand_at(&grid, &[(7, 1)]);

    let loose = RosterSolver::new(grid.clone())
        .solve(&workers, &demand)
        .unwrap();
    assert_eq!(loose.total_hours(), 0);

    let strict = RosterSolver::new(grid)
        .with_policy(DemandPolicy::default().with_single_demand(SingleDemand::Exact))
        .solve(&workers, &demand)
        .unwrap();
    assert_eq!(strict.get("Ann").unwrap().periods(), &[Period(7)]);
}

#[test]
fn test_split_shifts_from_rows() {
    let grid = PeriodGrid::default();
    let rows = [worker_row(&grid, "Ann", &[("8,15", "10,17")], 4, 4)];
    let mut demand = vec![0; grid.period_count()];
    for p in [0, 1, 7, 8] {
        demand[p] = 1;
    }

    let roster = RosterSolver::new(grid).solve_rows(&rows, demand).unwrap();
    assert_eq!(
        roster.schedule_text("Ann").unwrap(),
        "Mon 8-9, Mon 9-10, Mon 15-16, Mon 16-17"
    );
}

#[test]
fn test_duplicate_rows_rejected_before_solving() {
    let grid = PeriodGrid::default();
    let rows = [
        worker_row(&grid, "Ann", &[("8", "17")], 0, 9),
        worker_row(&grid, "Ann", &[("9", "12")], 0, 9),
    ];

    let err = RosterSolver::new(grid.clone())
        .solve_rows(&rows, vec![0; grid.period_count()])
        .unwrap_err();
    assert_eq!(err, RosterError::DuplicateWorker("Ann".into()));
    assert!(err.is_input_error());
}

#[test]
fn test_planted_instances_solve_under_default_policy() {
    let grid = PeriodGrid::default();
    let policy = DemandPolicy::default();
    for seed in 0..8 {
        let instance = planted_instance(&grid, 5, seed);
        let roster = RosterSolver::new(grid.clone())
            .solve(&instance.workers, &instance.demand)
            .unwrap_or_else(|e| panic!("seed {seed}: {e}"));

        assert_within_availability(&roster, &instance.workers);
        assert_hours_within_bounds(&roster, &instance.workers);
        assert!(roster.demand_violations(&instance.demand, &policy).is_empty());
        let planted_hours: usize = instance.planted.iter().map(|m| m.count()).sum();
        assert!(roster.total_hours() <= planted_hours, "seed {seed}");
    }
}

#[test]
fn test_planted_instances_solve_under_exact_policy() {
    let grid = PeriodGrid::default();
    let policy = DemandPolicy::exact();
    for seed in 100..104 {
        let instance = planted_instance(&grid, 4, seed);
        let roster = RosterSolver::new(grid.clone())
            .with_policy(policy)
            .solve(&instance.workers, &instance.demand)
            .unwrap_or_else(|e| panic!("seed {seed}: {e}"));

        assert_eq!(roster.headcount(), instance.demand.as_slice());
        assert_within_availability(&roster, &instance.workers);
        assert_hours_within_bounds(&roster, &instance.workers);
        let planted_hours: usize = instance.planted.iter().map(|m| m.count()).sum();
        assert_eq!(roster.total_hours(), planted_hours, "seed {seed}");
    }
}

#[test]
fn test_uniform_demand_fills_every_period() {
    let grid = PeriodGrid::default();
    let workers = worker_set(
        &grid,
        vec![
            always_available(&grid, "Ann", 0, 45),
            always_available(&grid, "Bob", 0, 45),
        ],
    );

    let roster = RosterSolver::new(grid.clone())
        .solve(&workers, &uniform_demand(&grid, 2))
        .unwrap();
    assert!(roster.headcount().iter().all(|&n| n == 2));
    assert_eq!(roster.total_hours(), 2 * grid.period_count());

    let idle = RosterSolver::new(grid.clone())
        .solve(&workers, &uniform_demand(&grid, 0))
        .unwrap();
    assert_eq!(idle.total_hours(), 0);
}
