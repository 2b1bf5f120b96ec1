//! Schedule extractor: solve result to [`Roster`].

use rosterforge_core::{
    DemandPolicy, DemandProfile, InfeasibilityReport, PeriodGrid, Roster, RosterError,
    SolverFailure, WorkerSchedule, WorkerSet,
};

use crate::result::{NotSolvedReason, SolveResult, SolveStatus};

/// Reads a solve result into per-worker schedules.
///
/// The status is checked before any variable is read: only an `Optimal`
/// result yields a roster. An infeasible result becomes
/// [`RosterError::Infeasible`], with diagnostics when demand is attached via
/// [`with_diagnostics`](Self::with_diagnostics).
#[derive(Debug)]
pub struct ScheduleExtractor<'a> {
    workers: &'a WorkerSet,
    grid: &'a PeriodGrid,
    diagnostics: Option<(&'a DemandProfile, DemandPolicy)>,
    time_limit_ms: u64,
}

impl<'a> ScheduleExtractor<'a> {
    pub fn new(workers: &'a WorkerSet, grid: &'a PeriodGrid) -> Self {
        Self {
            workers,
            grid,
            diagnostics: None,
            time_limit_ms: 0,
        }
    }

    /// Enables infeasibility analysis against `demand` under `policy`.
    pub fn with_diagnostics(mut self, demand: &'a DemandProfile, policy: DemandPolicy) -> Self {
        self.diagnostics = Some((demand, policy));
        self
    }

    /// Time limit reported in `TimedOut` failures.
    pub fn with_time_limit_ms(mut self, time_limit_ms: u64) -> Self {
        self.time_limit_ms = time_limit_ms;
        self
    }

    pub fn extract(&self, result: &SolveResult) -> Result<Roster, RosterError> {
        let solved = match (result.status(), result.solved()) {
            (SolveStatus::Optimal, Some(solved)) => solved,
            (SolveStatus::Optimal, None) => {
                return Err(RosterError::SolverFailure(SolverFailure::InconsistentSolution(
                    "optimal status without an assignment".into(),
                )))
            }
            (SolveStatus::Infeasible, _) => {
                let report = self
                    .diagnostics
                    .map(|(demand, policy)| {
                        InfeasibilityReport::analyze(self.workers, demand, &policy, self.grid)
                    })
                    .unwrap_or_default();
                return Err(RosterError::Infeasible(report));
            }
            (SolveStatus::Unbounded, _) => {
                return Err(RosterError::SolverFailure(SolverFailure::Unbounded))
            }
            (SolveStatus::NotSolved(NotSolvedReason::TimedOut), _) => {
                return Err(RosterError::SolverFailure(SolverFailure::TimedOut {
                    limit_ms: self.time_limit_ms,
                }))
            }
            (SolveStatus::NotSolved(NotSolvedReason::Cancelled), _) => {
                return Err(RosterError::SolverFailure(SolverFailure::Cancelled))
            }
            (SolveStatus::Error(msg), _) => {
                return Err(RosterError::SolverFailure(SolverFailure::Backend(msg.clone())))
            }
        };

        let model = solved.model();
        let assignment = solved.assignment();
        let layout = model.layout();

        if layout.worker_count() != self.workers.len()
            || layout.period_count() != self.grid.period_count()
        {
            return Err(inconsistent(format!(
                "model has {} workers x {} periods, expected {} x {}",
                layout.worker_count(),
                layout.period_count(),
                self.workers.len(),
                self.grid.period_count()
            )));
        }

        if let Some(name) = model.violated_constraints(assignment.values()).next() {
            return Err(inconsistent(format!("constraint {name} is violated")));
        }

        let mut schedules = Vec::with_capacity(self.workers.len());
        for (w, worker) in self.workers.iter().enumerate() {
            let assigned = assignment.worker_mask(w);
            if !assigned.is_subset_of(worker.availability()) {
                return Err(inconsistent(format!(
                    "{} assigned outside declared availability",
                    worker.name()
                )));
            }
            schedules.push(WorkerSchedule::from_mask(worker.name(), assigned, self.grid));
        }

        Ok(Roster::new(schedules, self.grid.period_count()))
    }
}

fn inconsistent(msg: String) -> RosterError {
    RosterError::SolverFailure(SolverFailure::InconsistentSolution(msg))
}
