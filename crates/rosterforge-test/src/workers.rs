//! Worker fixtures.
//!
//! # Example
//!
//! ```
//! use rosterforge_core::PeriodGrid;
//! use rosterforge_test::workers::{available_at, worker_set};
//!
//! let grid = PeriodGrid::default();
//! let workers = worker_set(&grid, vec![available_at(&grid, "Ann", &[0, 1], 0, 2)]);
//! assert_eq!(workers.len(), 1);
//! ```

use rosterforge_core::{DayShiftFields, PeriodGrid, PeriodMask, Period, Worker, WorkerRow, WorkerSet};

/// Builds a raw row; `days` lists `(start, end)` text per weekday, missing days are off.
pub fn worker_row(
    grid: &PeriodGrid,
    name: &str,
    days: &[(&str, &str)],
    min_hours: u32,
    max_hours: u32,
) -> WorkerRow {
    let mut fields = vec![DayShiftFields::off(); grid.day_count()];
    for (slot, (start, end)) in fields.iter_mut().zip(days) {
        *slot = DayShiftFields::new(*start, *end);
    }
    WorkerRow {
        name: name.to_string(),
        days: fields,
        min_hours,
        max_hours,
    }
}

/// A worker available exactly in `periods`.
pub fn available_at(
    grid: &PeriodGrid,
    name: &str,
    periods: &[usize],
    min_hours: u32,
    max_hours: u32,
) -> Worker {
    let mut mask = PeriodMask::empty(grid.period_count());
    for p in periods {
        mask.set(Period(*p), true);
    }
    Worker::new(name, mask, min_hours, max_hours).expect("valid fixture worker")
}

/// A worker available in every period of the grid.
pub fn always_available(grid: &PeriodGrid, name: &str, min_hours: u32, max_hours: u32) -> Worker {
    Worker::new(name, PeriodMask::full(grid.period_count()), min_hours, max_hours)
        .expect("valid fixture worker")
}

pub fn worker_set(grid: &PeriodGrid, workers: Vec<Worker>) -> WorkerSet {
    WorkerSet::new(workers, grid).expect("valid fixture worker set")
}
