//! Shared test fixtures for RosterForge crates.
//!
//! This crate provides worker, demand and random-instance builders for testing.
//! It depends only on `rosterforge-core` so any crate can use it.
//!
//! - [`workers`] - Worker rows, availability masks and worker sets
//! - [`demand`] - Demand profiles
//! - [`random`] - Seeded random instances with a known feasible assignment
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! rosterforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use rosterforge_test::workers::{available_at, worker_set};
//! use rosterforge_test::demand::demand_at;
//! ```

pub mod demand;
pub mod random;
pub mod workers;

pub use demand::{demand_at, uniform_demand};
pub use random::{planted_instance, PlantedInstance};
pub use workers::{always_available, available_at, worker_row, worker_set};
