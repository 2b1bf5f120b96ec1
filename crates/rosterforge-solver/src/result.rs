//! Solve outcome types.

use std::fmt;
use std::time::Duration;

use rosterforge_core::{Period, PeriodMask};

use crate::model::{RosterModel, VariableLayout};

/// Why a solve ended without a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotSolvedReason {
    TimedOut,
    Cancelled,
}

/// Status reported by the solver driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveStatus {
    /// A feasible assignment minimising the objective was found.
    Optimal,
    /// No assignment satisfies every constraint.
    Infeasible,
    Unbounded,
    /// The solve was stopped before the backend decided.
    NotSolved(NotSolvedReason),
    /// The backend errored or panicked.
    Error(String),
}

impl SolveStatus {
    pub fn is_optimal(&self) -> bool {
        matches!(self, SolveStatus::Optimal)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "optimal"),
            SolveStatus::Infeasible => write!(f, "infeasible"),
            SolveStatus::Unbounded => write!(f, "unbounded"),
            SolveStatus::NotSolved(NotSolvedReason::TimedOut) => write!(f, "timed out"),
            SolveStatus::NotSolved(NotSolvedReason::Cancelled) => write!(f, "cancelled"),
            SolveStatus::Error(msg) => write!(f, "error: {msg}"),
        }
    }
}

/// A 0/1 value for every decision variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    layout: VariableLayout,
    values: Vec<bool>,
}

impl Assignment {
    pub(crate) fn new(layout: VariableLayout, values: Vec<bool>) -> Self {
        debug_assert_eq!(layout.variable_count(), values.len());
        Self { layout, values }
    }

    pub fn values(&self) -> &[bool] {
        &self.values
    }

    pub fn is_assigned(&self, worker: usize, period: Period) -> bool {
        self.values[self.layout.index(worker, period).0]
    }

    /// Periods assigned to `worker` as a mask.
    pub fn worker_mask(&self, worker: usize) -> PeriodMask {
        self.layout
            .worker_vars(worker)
            .map(|v| self.values[v.0])
            .collect()
    }

    /// Workers assigned in `period`.
    pub fn headcount(&self, period: Period) -> u32 {
        self.layout
            .period_vars(period)
            .filter(|v| self.values[v.0])
            .count() as u32
    }
}

/// The model together with the optimal assignment found for it.
#[derive(Debug, Clone)]
pub struct SolvedModel {
    model: RosterModel,
    assignment: Assignment,
    objective: u64,
}

impl SolvedModel {
    pub(crate) fn new(model: RosterModel, assignment: Assignment) -> Self {
        let objective = model.objective(assignment.values());
        Self {
            model,
            assignment,
            objective,
        }
    }

    pub fn model(&self) -> &RosterModel {
        &self.model
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    /// Total assigned worker-periods.
    pub fn objective(&self) -> u64 {
        self.objective
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveStatistics {
    pub variable_count: usize,
    pub constraint_count: usize,
    pub elapsed: Duration,
}

/// Outcome of one solve call.
///
/// The assignment is only reachable through [`solved`](Self::solved), which
/// is `Some` exactly when the status is [`SolveStatus::Optimal`].
#[derive(Debug, Clone)]
pub struct SolveResult {
    status: SolveStatus,
    solved: Option<SolvedModel>,
    statistics: SolveStatistics,
}

impl SolveResult {
    pub(crate) fn optimal(solved: SolvedModel, statistics: SolveStatistics) -> Self {
        Self {
            status: SolveStatus::Optimal,
            solved: Some(solved),
            statistics,
        }
    }

    pub(crate) fn unsolved(status: SolveStatus, statistics: SolveStatistics) -> Self {
        debug_assert!(!status.is_optimal());
        Self {
            status,
            solved: None,
            statistics,
        }
    }

    pub fn status(&self) -> &SolveStatus {
        &self.status
    }

    pub fn solved(&self) -> Option<&SolvedModel> {
        self.solved.as_ref()
    }

    pub fn statistics(&self) -> &SolveStatistics {
        &self.statistics
    }
}
