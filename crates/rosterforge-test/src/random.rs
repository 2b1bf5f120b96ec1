//! Seeded random instances with a planted feasible assignment.
//!
//! Availability is drawn as one or two shifts per day, a random subset of
//! the available periods is planted as an assignment, and demand and hour
//! bounds are derived from it. The planted assignment satisfies the default
//! and the exact demand policies, so every instance is feasible.
//!
//! # Example
//!
//! ```
//! use rosterforge_core::PeriodGrid;
//! use rosterforge_test::random::planted_instance;
//!
//! let grid = PeriodGrid::default();
//! let a = planted_instance(&grid, 4, 7);
//! let b = planted_instance(&grid, 4, 7);
//! assert_eq!(a.demand, b.demand);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rosterforge_core::{
    encode_week, DayShifts, DemandProfile, PeriodGrid, PeriodMask, ShiftRange, Worker, WorkerSet,
};

#[derive(Debug, Clone)]
pub struct PlantedInstance {
    pub workers: WorkerSet,
    pub demand: DemandProfile,
    /// One assignment mask per worker that meets every constraint.
    pub planted: Vec<PeriodMask>,
}

pub fn planted_instance(grid: &PeriodGrid, worker_count: usize, seed: u64) -> PlantedInstance {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut workers = Vec::with_capacity(worker_count);
    let mut planted = Vec::with_capacity(worker_count);

    for w in 0..worker_count {
        let week: Vec<DayShifts> = (0..grid.day_count())
            .map(|_| random_day(grid, &mut rng))
            .collect();
        let availability = encode_week(&week, grid);

        let assigned: PeriodMask = availability
            .as_slice()
            .iter()
            .map(|&available| available && rng.random_bool(0.4))
            .collect();
        let hours = assigned.count() as u32;
        let min_hours = rng.random_range(0..=hours);
        let max_hours = hours + rng.random_range(0..=3);

        workers.push(
            Worker::new(format!("W{w}"), availability, min_hours, max_hours)
                .expect("generated bounds are ordered"),
        );
        planted.push(assigned);
    }

    let headcount: Vec<u32> = grid
        .periods()
        .map(|p| planted.iter().filter(|m| m.is_set(p)).count() as u32)
        .collect();

    PlantedInstance {
        workers: WorkerSet::new(workers, grid).expect("generated names are unique"),
        demand: DemandProfile::new(headcount, grid).expect("grid-sized demand"),
        planted,
    }
}

fn random_day(grid: &PeriodGrid, rng: &mut ChaCha8Rng) -> DayShifts {
    let mut shifts = DayShifts::new();
    if !rng.random_bool(0.8) {
        return shifts;
    }
    let (open, close) = (grid.day_start_hour(), grid.day_end_hour());
    let start = rng.random_range(open..close);
    let end = rng.random_range(start + 1..=close);
    shifts.push(ShiftRange::new(start, end));

    if end + 1 < close && rng.random_bool(0.25) {
        let second_start = rng.random_range(end + 1..close);
        let second_end = rng.random_range(second_start + 1..=close);
        shifts.push(ShiftRange::new(second_start, second_end));
    }
    shifts
}
