//! Solver driver: runs the backend on a dedicated thread, bounded by a time
//! limit and cancellable from any thread.
//!
//! The model moves into the solver thread and comes back with the answer,
//! so no other code can observe it mid-solve. A solve that is timed out or
//! cancelled leaves its thread detached; the model it owns is dropped when
//! the backend eventually returns.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam::channel::{self, RecvTimeoutError};
use tracing::{debug, warn};

use crate::backend::{self, BackendOutcome};
use crate::model::RosterModel;
use crate::result::{
    Assignment, NotSolvedReason, SolveResult, SolveStatistics, SolveStatus, SolvedModel,
};

/// Default time limit in seconds.
pub const DEFAULT_TIME_LIMIT_SECS: u64 = 30;

/// How often the waiting thread checks for cancellation.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Handle for stopping a solve from another thread.
///
/// # Example
///
/// ```
/// use rosterforge_solver::SolverDriver;
///
/// let driver = SolverDriver::new();
/// let handle = driver.handle();
/// assert!(!handle.is_terminate_requested());
/// handle.terminate_early();
/// assert!(handle.is_terminate_requested());
/// ```
#[derive(Debug, Clone)]
pub struct SolveHandle {
    terminate_early: Arc<AtomicBool>,
}

impl SolveHandle {
    /// Requests the driver to stop waiting and report `Cancelled`.
    ///
    /// Takes effect within one poll interval; a request made before the
    /// solve starts cancels it immediately. The request is cleared once that
    /// solve returns.
    ///
    /// The backend itself cannot be interrupted: a cancelled or timed-out
    /// solve leaves its `rosterforge-milp` thread running until the backend
    /// finishes, and that thread keeps a core busy meanwhile.
    pub fn terminate_early(&self) {
        self.terminate_early.store(true, Ordering::SeqCst);
    }

    pub fn is_terminate_requested(&self) -> bool {
        self.terminate_early.load(Ordering::SeqCst)
    }
}

/// Invokes the integer-program backend on a built model.
#[derive(Debug)]
pub struct SolverDriver {
    time_limit: Option<Duration>,
    terminate_early: Arc<AtomicBool>,
}

impl Default for SolverDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverDriver {
    /// Creates a driver with the default time limit.
    pub fn new() -> Self {
        Self {
            time_limit: Some(Duration::from_secs(DEFAULT_TIME_LIMIT_SECS)),
            terminate_early: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Bounds how long [`solve`](Self::solve) waits for the backend.
    ///
    /// The backend thread is not stopped when the limit passes. Callers that
    /// retry timed-out solves in a loop should expect one busy thread per
    /// abandoned attempt until each backend run finishes.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Waits for the backend however long it takes.
    pub fn without_time_limit(mut self) -> Self {
        self.time_limit = None;
        self
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    pub fn handle(&self) -> SolveHandle {
        SolveHandle {
            terminate_early: Arc::clone(&self.terminate_early),
        }
    }

    /// Solves `model`, consuming it.
    ///
    /// Never panics on backend failure; every outcome is a [`SolveStatus`].
    /// Any pending termination request is cleared when this call returns.
    pub fn solve(&self, model: RosterModel) -> SolveResult {
        let result = self.run(model);
        self.terminate_early.store(false, Ordering::SeqCst);
        result
    }

    fn run(&self, model: RosterModel) -> SolveResult {
        let start = Instant::now();
        let mut statistics = SolveStatistics {
            variable_count: model.variable_count(),
            constraint_count: model.constraint_count(),
            elapsed: Duration::ZERO,
        };

        if self.terminate_early.load(Ordering::SeqCst) {
            return SolveResult::unsolved(
                SolveStatus::NotSolved(NotSolvedReason::Cancelled),
                statistics,
            );
        }

        let (tx, rx) = channel::bounded(1);
        let spawned = thread::Builder::new()
            .name("rosterforge-milp".into())
            .spawn(move || {
                let outcome = catch_unwind(AssertUnwindSafe(|| backend::solve(&model)));
                // The receiver is gone if the driver stopped waiting.
                let _ = tx.send((model, outcome));
            });
        if let Err(e) = spawned {
            statistics.elapsed = start.elapsed();
            return SolveResult::unsolved(
                SolveStatus::Error(format!("failed to spawn solver thread: {e}")),
                statistics,
            );
        }

        loop {
            let elapsed = start.elapsed();
            let wait = match self.time_limit {
                Some(limit) if elapsed >= limit => {
                    statistics.elapsed = elapsed;
                    warn!(event = "solve_timeout", limit_ms = limit.as_millis() as u64);
                    return SolveResult::unsolved(
                        SolveStatus::NotSolved(NotSolvedReason::TimedOut),
                        statistics,
                    );
                }
                Some(limit) => (limit - elapsed).min(POLL_INTERVAL),
                None => POLL_INTERVAL,
            };

            match rx.recv_timeout(wait) {
                Ok((model, outcome)) => {
                    statistics.elapsed = start.elapsed();
                    return match outcome {
                        Ok(outcome) => Self::finish(model, outcome, statistics),
                        Err(panic) => SolveResult::unsolved(
                            SolveStatus::Error(panic_message(panic.as_ref())),
                            statistics,
                        ),
                    };
                }
                Err(RecvTimeoutError::Timeout) => {
                    if self.terminate_early.load(Ordering::SeqCst) {
                        statistics.elapsed = start.elapsed();
                        warn!(event = "solve_cancelled");
                        return SolveResult::unsolved(
                            SolveStatus::NotSolved(NotSolvedReason::Cancelled),
                            statistics,
                        );
                    }
                }
                Err(RecvTimeoutError::Disconnected) => {
                    statistics.elapsed = start.elapsed();
                    return SolveResult::unsolved(
                        SolveStatus::Error("solver thread exited without a result".into()),
                        statistics,
                    );
                }
            }
        }
    }

    fn finish(
        model: RosterModel,
        outcome: BackendOutcome,
        statistics: SolveStatistics,
    ) -> SolveResult {
        debug!(event = "backend_done", elapsed_ms = statistics.elapsed.as_millis() as u64);
        match outcome {
            BackendOutcome::Optimal(values) => {
                let assignment = Assignment::new(model.layout(), values);
                SolveResult::optimal(SolvedModel::new(model, assignment), statistics)
            }
            BackendOutcome::Infeasible => SolveResult::unsolved(SolveStatus::Infeasible, statistics),
            BackendOutcome::Unbounded => SolveResult::unsolved(SolveStatus::Unbounded, statistics),
            BackendOutcome::Failed(msg) => SolveResult::unsolved(SolveStatus::Error(msg), statistics),
        }
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        format!("solver panicked: {msg}")
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        format!("solver panicked: {msg}")
    } else {
        "solver panicked".to_string()
    }
}

#[cfg(test)]
mod tests;
