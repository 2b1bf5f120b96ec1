//! Infeasibility diagnostics.
//!
//! When the solver proves a model infeasible, these checks point at the
//! inputs that most obviously cannot be met. They are necessary conditions
//! only: an empty report means the conflict arises from the constraints
//! jointly.

use std::fmt;

use crate::demand::{DemandPolicy, DemandProfile};
use crate::period::{Period, PeriodGrid};
use crate::worker::WorkerSet;

/// A period whose raw supply is below the rule's minimum headcount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodShortfall {
    pub period: Period,
    pub label: String,
    pub required: u32,
    pub available: u32,
}

/// A worker who cannot reach `min_hours` with their declared availability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerShortfall {
    pub name: String,
    pub min_hours: u32,
    pub available_hours: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfeasibilityReport {
    pub period_shortfalls: Vec<PeriodShortfall>,
    pub worker_shortfalls: Vec<WorkerShortfall>,
    /// Sum of per-period minimum headcounts.
    pub required_hours: u64,
    /// Sum of every worker's `max_hours`.
    pub max_capacity: u64,
    /// Sum of every worker's `min_hours`.
    pub committed_hours: u64,
    /// Sum of per-period maximum headcounts, capped by available workers.
    pub absorbable_hours: u64,
}

impl InfeasibilityReport {
    /// Checks each input against the necessary conditions for feasibility.
    pub fn analyze(
        workers: &WorkerSet,
        demand: &DemandProfile,
        policy: &DemandPolicy,
        grid: &PeriodGrid,
    ) -> Self {
        let mut report = Self::default();

        for (period, value) in demand.iter() {
            let rule = policy.rule_for(value);
            let required = rule.min_headcount();
            let available = workers.available_count(period) as u32;
            if available < required {
                report.period_shortfalls.push(PeriodShortfall {
                    period,
                    label: grid.label(period),
                    required,
                    available,
                });
            }
            report.required_hours += u64::from(required);
            let absorbable = rule.max_headcount().map_or(available, |max| max.min(available));
            report.absorbable_hours += u64::from(absorbable);
        }

        for worker in workers {
            let available_hours = worker.available_hours() as u32;
            if available_hours < worker.min_hours() {
                report.worker_shortfalls.push(WorkerShortfall {
                    name: worker.name().to_string(),
                    min_hours: worker.min_hours(),
                    available_hours,
                });
            }
            report.max_capacity += u64::from(worker.max_hours());
            report.committed_hours += u64::from(worker.min_hours());
        }

        report
    }

    /// True if demand needs more worker-hours than contracts allow.
    pub fn capacity_exceeded(&self) -> bool {
        self.required_hours > self.max_capacity
    }

    /// True if contracted minimums exceed what demand can absorb.
    pub fn commitments_exceeded(&self) -> bool {
        self.committed_hours > self.absorbable_hours
    }

    /// True if any of the checks identified a cause.
    pub fn has_findings(&self) -> bool {
        !self.period_shortfalls.is_empty()
            || !self.worker_shortfalls.is_empty()
            || self.capacity_exceeded()
            || self.commitments_exceeded()
    }
}

impl fmt::Display for InfeasibilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.has_findings() {
            return write!(
                f,
                "no single period or worker explains the conflict; availability, demand and hour bounds conflict jointly"
            );
        }
        let mut parts = Vec::new();
        if !self.period_shortfalls.is_empty() {
            let periods: Vec<String> = self
                .period_shortfalls
                .iter()
                .map(|s| format!("{} (needs {}, {} available)", s.label, s.required, s.available))
                .collect();
            parts.push(format!("understaffed periods: {}", periods.join(", ")));
        }
        if !self.worker_shortfalls.is_empty() {
            let workers: Vec<String> = self
                .worker_shortfalls
                .iter()
                .map(|s| {
                    format!(
                        "{} (min {}h, {}h available)",
                        s.name, s.min_hours, s.available_hours
                    )
                })
                .collect();
            parts.push(format!("workers below minimum hours: {}", workers.join(", ")));
        }
        if self.capacity_exceeded() {
            parts.push(format!(
                "demand requires {} worker-hours but max hours total {}",
                self.required_hours, self.max_capacity
            ));
        }
        if self.commitments_exceeded() {
            parts.push(format!(
                "min hours total {} but demand absorbs at most {}",
                self.committed_hours, self.absorbable_hours
            ));
        }
        write!(f, "{}", parts.join("; "))
    }
}
