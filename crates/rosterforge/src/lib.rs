//! RosterForge - Weekly Worker Rostering in Rust
//!
//! Turns a worker availability table and a per-period demand vector into a
//! weekly roster by solving a small binary integer program.
//!
//! # Example
//!
//! ```rust
//! use rosterforge::prelude::*;
//!
//! let grid = PeriodGrid::default();
//! assert_eq!(grid.period_count(), 45);
//! assert_eq!(grid.label(Period(0)), "Mon 8-9");
//! assert_eq!(grid.parse_label("Fri 16-17").unwrap(), Period(44));
//! ```

// Core domain types
pub use rosterforge_core::{
    encode_day, encode_week, DayShiftFields, DayShifts, DemandMode, DemandPolicy, DemandProfile,
    DemandRule, InfeasibilityReport, InputParseError, Period, PeriodGrid, PeriodMask,
    PeriodShortfall, PeriodSupply, Roster, RosterError, ShiftRange, SingleDemand, SolverFailure,
    SupplySummary, Worker, WorkerRow, WorkerSchedule, WorkerSet, WorkerShortfall,
};

// Configuration
pub use rosterforge_config::{ConfigError, GridConfig, RosterConfig, TerminationConfig};

// Model, driver and extraction
pub use rosterforge_solver::{
    ModelBuilder, RosterModel, RosterSolver, ScheduleExtractor, SolveHandle, SolveResult,
    SolveStatus, SolverDriver,
};

#[cfg(feature = "console")]
pub mod console;

mod solver;
pub use solver::{solve_roster, solve_roster_with_config, CONFIG_FILE};

pub mod prelude {
    pub use super::{
        DemandPolicy, DemandProfile, Period, PeriodGrid, Roster, RosterConfig, RosterError,
        RosterSolver, SingleDemand, Worker, WorkerRow, WorkerSet,
    };
    pub use super::{solve_roster, solve_roster_with_config};
}
