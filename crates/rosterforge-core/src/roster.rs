//! Solved schedules handed to the presentation layer.

use std::collections::BTreeMap;

use crate::demand::{DemandPolicy, DemandProfile};
use crate::period::{Period, PeriodGrid, PeriodMask};

/// Periods assigned to one worker, in chronological order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WorkerSchedule {
    name: String,
    assigned: PeriodMask,
    periods: Vec<Period>,
    labels: Vec<String>,
}

impl WorkerSchedule {
    /// Builds a schedule from an assignment mask; periods and labels follow mask order.
    pub fn from_mask(name: impl Into<String>, assigned: PeriodMask, grid: &PeriodGrid) -> Self {
        let periods: Vec<Period> = assigned.iter_set().collect();
        let labels = periods.iter().map(|p| grid.label(*p)).collect();
        Self {
            name: name.into(),
            assigned,
            periods,
            labels,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn assigned(&self) -> &PeriodMask {
        &self.assigned
    }

    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn hours(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}

/// The solved weekly roster: one schedule per worker, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Roster {
    schedules: Vec<WorkerSchedule>,
    period_count: usize,
}

impl Roster {
    pub fn new(schedules: Vec<WorkerSchedule>, period_count: usize) -> Self {
        Self {
            schedules,
            period_count,
        }
    }

    pub fn schedules(&self) -> &[WorkerSchedule] {
        &self.schedules
    }

    pub fn get(&self, name: &str) -> Option<&WorkerSchedule> {
        self.schedules.iter().find(|s| s.name == name)
    }

    /// Assigned worker count per period.
    pub fn headcount(&self) -> Vec<u32> {
        let mut counts = vec![0u32; self.period_count];
        for schedule in &self.schedules {
            for period in &schedule.periods {
                counts[period.0] += 1;
            }
        }
        counts
    }

    /// Total assigned worker-periods.
    pub fn total_hours(&self) -> usize {
        self.schedules.iter().map(WorkerSchedule::hours).sum()
    }

    /// Labels joined with `", "`, the single-cell form used by spreadsheet output.
    pub fn schedule_text(&self, name: &str) -> Option<String> {
        self.get(name).map(|s| s.labels.join(", "))
    }

    /// Worker name to ordered labels.
    pub fn to_map(&self) -> BTreeMap<String, Vec<String>> {
        self.schedules
            .iter()
            .map(|s| (s.name.clone(), s.labels.clone()))
            .collect()
    }

    /// Periods whose headcount falls outside the rule `policy` derives from `demand`.
    pub fn demand_violations(&self, demand: &DemandProfile, policy: &DemandPolicy) -> Vec<Period> {
        self.headcount()
            .into_iter()
            .zip(demand.iter())
            .filter(|(count, (_, value))| !policy.rule_for(*value).accepts(*count))
            .map(|(_, (period, _))| period)
            .collect()
    }
}
