//! RosterForge Core - Core types for weekly roster optimization
//!
//! This crate provides the problem-side abstractions for RosterForge:
//! - Period grid, period labels and period bitmaps
//! - Availability encoding from declared shift ranges
//! - Worker records and the validated worker set
//! - Demand profile and the demand-to-headcount policy
//! - Supply summaries, solved rosters and infeasibility reports
//! - The error taxonomy shared by every RosterForge crate

pub mod availability;
pub mod demand;
pub mod error;
pub mod period;
pub mod report;
pub mod roster;
pub mod supply;
pub mod worker;

pub use availability::{encode_day, encode_week, DayShifts, ShiftRange};
pub use demand::{DemandMode, DemandPolicy, DemandProfile, DemandRule, SingleDemand};
pub use error::{InputParseError, Result, RosterError, SolverFailure};
pub use period::{Period, PeriodGrid, PeriodMask};
pub use report::{InfeasibilityReport, PeriodShortfall, WorkerShortfall};
pub use roster::{Roster, WorkerSchedule};
pub use supply::{PeriodSupply, SupplySummary};
pub use worker::{DayShiftFields, Worker, WorkerRow, WorkerSet};
