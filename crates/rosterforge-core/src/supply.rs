//! Raw supply per period, independent of any solve.

use crate::demand::{DemandPolicy, DemandProfile};
use crate::period::{Period, PeriodGrid};
use crate::report::PeriodShortfall;
use crate::worker::WorkerSet;

/// Workers available in one period.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PeriodSupply {
    pub period: Period,
    pub label: String,
    /// Names in worker input order.
    pub available: Vec<String>,
}

impl PeriodSupply {
    pub fn total(&self) -> usize {
        self.available.len()
    }
}

/// Per-period availability headcount with the names behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SupplySummary {
    periods: Vec<PeriodSupply>,
}

impl SupplySummary {
    pub fn from_workers(workers: &WorkerSet, grid: &PeriodGrid) -> Self {
        let periods = grid
            .periods()
            .map(|period| PeriodSupply {
                period,
                label: grid.label(period),
                available: workers
                    .iter()
                    .filter(|w| w.is_available(period))
                    .map(|w| w.name().to_string())
                    .collect(),
            })
            .collect();
        Self { periods }
    }

    pub fn periods(&self) -> &[PeriodSupply] {
        &self.periods
    }

    pub fn get(&self, period: Period) -> Option<&PeriodSupply> {
        self.periods.get(period.0)
    }

    /// Available-worker count per period, in grid order.
    pub fn totals(&self) -> Vec<usize> {
        self.periods.iter().map(PeriodSupply::total).collect()
    }

    /// Periods whose supply cannot meet the minimum headcount `policy` derives from `demand`.
    pub fn shortfalls(&self, demand: &DemandProfile, policy: &DemandPolicy) -> Vec<PeriodShortfall> {
        self.periods
            .iter()
            .zip(demand.as_slice())
            .filter_map(|(supply, &value)| {
                let required = policy.rule_for(value).min_headcount();
                let available = supply.total() as u32;
                (available < required).then(|| PeriodShortfall {
                    period: supply.period,
                    label: supply.label.clone(),
                    required,
                    available,
                })
            })
            .collect()
    }
}
