//! Demand fixtures.

use rosterforge_core::{DemandProfile, Period, PeriodGrid};

/// Zero demand everywhere except the listed `(period, value)` pairs.
pub fn demand_at(grid: &PeriodGrid, values: &[(usize, u32)]) -> DemandProfile {
    values
        .iter()
        .fold(DemandProfile::zeros(grid), |demand, &(p, v)| {
            demand.with(Period(p), v)
        })
}

/// The same demand in every period.
pub fn uniform_demand(grid: &PeriodGrid, value: u32) -> DemandProfile {
    DemandProfile::new(vec![value; grid.period_count()], grid).expect("grid-sized demand")
}
