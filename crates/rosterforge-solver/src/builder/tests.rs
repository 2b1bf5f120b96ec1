//! Tests for the model builder.

use super::*;
use crate::model::VarIndex;
use rosterforge_core::{Period, PeriodGrid, SingleDemand};
use rosterforge_test::{always_available, available_at, demand_at, worker_set};

#[test]
fn test_variable_per_worker_period() {
    let grid = PeriodGrid::default();
    let workers = worker_set(
        &grid,
        vec![
            always_available(&grid, "Ann", 0, 9),
            always_available(&grid, "Bob", 0, 9),
        ],
    );
    let demand = demand_at(&grid, &[]);
    let model = ModelBuilder::new(&workers, &demand).build().unwrap();

    assert_eq!(model.variable_count(), 90);
    assert_eq!(model.variable_name(VarIndex(46)), "x_Bob_1");
}

#[test]
fn test_availability_constraints_only_where_unavailable() {
    let grid = PeriodGrid::default();
    let workers = worker_set(&grid, vec![available_at(&grid, "Ann", &[0, 1, 2], 0, 9)]);
    let demand = demand_at(&grid, &[]);
    let model = ModelBuilder::new(&workers, &demand).build().unwrap();

    let availability: Vec<_> = model.constraints_of(ConstraintKind::Availability).collect();
    assert_eq!(availability.len(), 42);
    assert!(model.constraint("Unavailable_Ann_P0").is_none());
    let c = model.constraint("Unavailable_Ann_P3").unwrap();
    assert_eq!(c.terms, vec![VarIndex(3)]);
    assert_eq!(c.bound, Bound::Equal(0));
}

#[test]
fn test_demand_table() {
    let grid = PeriodGrid::default();
    let workers = worker_set(&grid, vec![always_available(&grid, "Ann", 0, 45)]);
    let demand = demand_at(&grid, &[(1, 1), (2, 2), (3, 5)]);
    let model = ModelBuilder::new(&workers, &demand).build().unwrap();

    assert_eq!(model.constraint("NoDemand_P0").unwrap().bound, Bound::Equal(0));
    assert!(model.constraint("NoDemand_P1").is_none());
    assert!(model.constraint("ExactDemand_P1").is_none());
    assert_eq!(model.constraint("ExactDemand_P2").unwrap().bound, Bound::Equal(2));
    assert_eq!(model.constraint("MinDemand_P3").unwrap().bound, Bound::AtLeast(4));
    assert_eq!(model.constraint("MaxDemand_P3").unwrap().bound, Bound::AtMost(6));

    // 42 zero-demand periods, one exact, one band of two, none for demand 1
    assert_eq!(model.constraints_of(ConstraintKind::Demand).count(), 42 + 1 + 2);
}

#[test]
fn test_single_demand_exact_policy() {
    let grid = PeriodGrid::default();
    let workers = worker_set(&grid, vec![always_available(&grid, "Ann", 0, 45)]);
    let demand = demand_at(&grid, &[(1, 1)]);
    let model = ModelBuilder::new(&workers, &demand)
        .with_policy(DemandPolicy::default().with_single_demand(SingleDemand::Exact))
        .build()
        .unwrap();

    assert_eq!(model.constraint("ExactDemand_P1").unwrap().bound, Bound::Equal(1));
}

#[test]
fn test_demand_constraint_spans_all_workers() {
    let grid = PeriodGrid::default();
    let workers = worker_set(
        &grid,
        vec![
            always_available(&grid, "Ann", 0, 9),
            available_at(&grid, "Bob", &[], 0, 9),
        ],
    );
    let demand = demand_at(&grid, &[(23, 2)]);
    let model = ModelBuilder::new(&workers, &demand).build().unwrap();

    let layout = model.layout();
    let c = model.constraint("ExactDemand_P23").unwrap();
    assert_eq!(
        c.terms,
        vec![layout.index(0, Period(23)), layout.index(1, Period(23))]
    );
}

#[test]
fn test_hour_constraints() {
    let grid = PeriodGrid::default();
    let workers = worker_set(&grid, vec![always_available(&grid, "Ann", 3, 7)]);
    let demand = demand_at(&grid, &[]);
    let model = ModelBuilder::new(&workers, &demand).build().unwrap();

    let min = model.constraint("Ann_min_hours").unwrap();
    let max = model.constraint("Ann_max_hours").unwrap();
    assert_eq!(min.kind, ConstraintKind::MinHours);
    assert_eq!(min.bound, Bound::AtLeast(3));
    assert_eq!(max.bound, Bound::AtMost(7));
    assert_eq!(min.terms.len(), 45);
}

#[test]
fn test_demand_length_mismatch() {
    let grid = PeriodGrid::default();
    let small = PeriodGrid::new(vec!["Mon".into()], 8, 17).unwrap();
    let workers = worker_set(&grid, vec![always_available(&grid, "Ann", 0, 9)]);
    let demand = demand_at(&small, &[]);

    assert!(matches!(
        ModelBuilder::new(&workers, &demand).build(),
        Err(RosterError::InputParse(InputParseError::DemandLength {
            expected: 45,
            actual: 9
        }))
    ));
}

#[test]
fn test_no_workers() {
    let grid = PeriodGrid::default();
    let workers = worker_set(&grid, vec![]);
    let demand = demand_at(&grid, &[(0, 2)]);
    let model = ModelBuilder::new(&workers, &demand).build().unwrap();

    assert_eq!(model.variable_count(), 0);
    assert!(model.constraint("ExactDemand_P0").unwrap().terms.is_empty());
}
