//! Error types for RosterForge

use thiserror::Error;

use crate::report::InfeasibilityReport;

/// Main error type for RosterForge operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    /// Malformed worker table, shift range, demand vector or period label
    #[error("Input parse error: {0}")]
    InputParse(#[from] InputParseError),

    /// Two worker rows share the same name
    #[error("Duplicate worker name: {0:?}")]
    DuplicateWorker(String),

    /// The solver proved that no assignment satisfies every constraint
    #[error("Model is infeasible: {0}")]
    Infeasible(InfeasibilityReport),

    /// The solver errored, timed out, was cancelled, or reached no decision
    #[error("Solver failure: {0}")]
    SolverFailure(SolverFailure),

    /// Error in roster configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RosterError {
    /// Returns true for structural input defects caught before any model work.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InputParse(_) | Self::DuplicateWorker(_))
    }
}

/// Structural defects in the data handed over by the I/O collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputParseError {
    /// An hour field held something other than a non-negative integer.
    #[error("worker {worker:?}, {day}: invalid hour {value:?}")]
    InvalidHour {
        worker: String,
        day: String,
        value: String,
    },

    /// The start and end lists of a day have different lengths.
    #[error("worker {worker:?}, {day}: {starts} start hour(s) but {ends} end hour(s)")]
    ShiftCountMismatch {
        worker: String,
        day: String,
        starts: usize,
        ends: usize,
    },

    /// A shift ends before it starts.
    #[error("worker {worker:?}, {day}: shift {start}-{end} ends before it starts")]
    ReversedShift {
        worker: String,
        day: String,
        start: u32,
        end: u32,
    },

    /// A worker row does not declare one entry per weekday.
    #[error("worker {worker:?}: expected {expected} weekday entries, found {actual}")]
    DayCountMismatch {
        worker: String,
        expected: usize,
        actual: usize,
    },

    /// The demand vector does not cover every period exactly once.
    #[error("demand vector has {actual} values, expected {expected}")]
    DemandLength { expected: usize, actual: usize },

    /// `max_hours` is below `min_hours`.
    #[error("worker {worker:?}: max hours {max_hours} is below min hours {min_hours}")]
    InvalidHourBounds {
        worker: String,
        min_hours: u32,
        max_hours: u32,
    },

    #[error("worker name must not be empty")]
    EmptyWorkerName,

    /// An availability bitmap does not match the grid's period count.
    #[error("worker {worker:?}: availability covers {actual} periods, expected {expected}")]
    AvailabilityLength {
        worker: String,
        expected: usize,
        actual: usize,
    },

    /// A period label that does not decode to a period of the grid.
    #[error("invalid period label {0:?}")]
    InvalidPeriodLabel(String),

    /// Grid parameters that cannot describe a week of periods.
    #[error("invalid period grid: {0}")]
    InvalidGrid(String),
}

/// Why the solve step produced no usable assignment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverFailure {
    #[error("model is unbounded")]
    Unbounded,

    /// The configured time limit elapsed before the solver decided.
    #[error("time limit of {limit_ms} ms exceeded")]
    TimedOut { limit_ms: u64 },

    #[error("solve was cancelled")]
    Cancelled,

    /// The backend raised an error or panicked.
    #[error("backend error: {0}")]
    Backend(String),

    /// The returned assignment contradicts the model it was solved from.
    #[error("inconsistent solution: {0}")]
    InconsistentSolution(String),
}

/// Result type alias for RosterForge operations
pub type Result<T> = std::result::Result<T, RosterError>;
