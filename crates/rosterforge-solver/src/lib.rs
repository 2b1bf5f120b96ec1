//! RosterForge Solver
//!
//! This crate turns workers and demand into a solved weekly roster:
//! - Model builder (binary variable per worker and period, linear constraints)
//! - Solver driver (time limit, early termination, backend isolation)
//! - Schedule extractor (status check, solution verification)
//! - `RosterSolver` pipeline wiring the three together from configuration

mod backend;
pub mod builder;
pub mod driver;
pub mod extract;
pub mod model;
pub mod pipeline;
pub mod result;

pub use builder::ModelBuilder;
pub use driver::{SolveHandle, SolverDriver, DEFAULT_TIME_LIMIT_SECS};
pub use extract::ScheduleExtractor;
pub use model::{Bound, ConstraintKind, LinearConstraint, RosterModel, VarIndex, VariableLayout};
pub use pipeline::RosterSolver;
pub use result::{
    Assignment, NotSolvedReason, SolveResult, SolveStatistics, SolveStatus, SolvedModel,
};
