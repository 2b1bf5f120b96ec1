//! Worker records and the validated worker set.

use std::collections::HashSet;

use crate::availability::{encode_week, parse_day_shifts, DayShifts};
use crate::error::{InputParseError, RosterError};
use crate::period::{Period, PeriodGrid, PeriodMask};

/// Raw start and end text for one weekday.
///
/// Each field is a single hour (`"9"`) or a comma-separated list for split
/// shifts (`"8,14"`). Both blank means no shifts that day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DayShiftFields {
    #[cfg_attr(feature = "serde", serde(default, deserialize_with = "serde_hours::hour_text"))]
    pub start: String,
    #[cfg_attr(feature = "serde", serde(default, deserialize_with = "serde_hours::hour_text"))]
    pub end: String,
}

impl DayShiftFields {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// A day without shifts.
    pub fn off() -> Self {
        Self::default()
    }
}

/// One row of the worker table as supplied by the I/O collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkerRow {
    pub name: String,
    /// One entry per grid weekday, in grid order.
    pub days: Vec<DayShiftFields>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub min_hours: u32,
    pub max_hours: u32,
}

impl WorkerRow {
    /// Parses the row's shift text into one shift list per weekday.
    pub fn parse_shifts(&self, grid: &PeriodGrid) -> Result<Vec<DayShifts>, InputParseError> {
        if self.days.len() != grid.day_count() {
            return Err(InputParseError::DayCountMismatch {
                worker: self.name.clone(),
                expected: grid.day_count(),
                actual: self.days.len(),
            });
        }
        self.days
            .iter()
            .zip(grid.weekdays())
            .map(|(fields, day)| parse_day_shifts(&fields.start, &fields.end, &self.name, day))
            .collect()
    }
}

/// A worker with encoded availability and contracted hour bounds.
///
/// Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Worker {
    name: String,
    availability: PeriodMask,
    min_hours: u32,
    max_hours: u32,
}

impl Worker {
    /// Creates a worker from an already-encoded availability mask.
    pub fn new(
        name: impl Into<String>,
        availability: PeriodMask,
        min_hours: u32,
        max_hours: u32,
    ) -> Result<Self, InputParseError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(InputParseError::EmptyWorkerName);
        }
        if max_hours < min_hours {
            return Err(InputParseError::InvalidHourBounds {
                worker: name,
                min_hours,
                max_hours,
            });
        }
        Ok(Self {
            name,
            availability,
            min_hours,
            max_hours,
        })
    }

    /// Parses and encodes a raw worker row.
    pub fn from_row(row: &WorkerRow, grid: &PeriodGrid) -> Result<Self, InputParseError> {
        let week = row.parse_shifts(grid)?;
        Self::new(
            row.name.clone(),
            encode_week(&week, grid),
            row.min_hours,
            row.max_hours,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn availability(&self) -> &PeriodMask {
        &self.availability
    }

    pub fn is_available(&self, period: Period) -> bool {
        self.availability.is_set(period)
    }

    /// Number of periods this worker may work.
    pub fn available_hours(&self) -> usize {
        self.availability.count()
    }

    pub fn min_hours(&self) -> u32 {
        self.min_hours
    }

    pub fn max_hours(&self) -> u32 {
        self.max_hours
    }
}

/// Workers of one run, with unique names, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerSet {
    workers: Vec<Worker>,
}

impl WorkerSet {
    /// Validates names and availability length against the grid.
    ///
    /// # Errors
    ///
    /// [`RosterError::DuplicateWorker`] for a repeated name and
    /// [`InputParseError::AvailabilityLength`] for a mask of the wrong size.
    pub fn new(workers: Vec<Worker>, grid: &PeriodGrid) -> Result<Self, RosterError> {
        check_unique(workers.iter().map(Worker::name))?;
        if let Some(bad) = workers
            .iter()
            .find(|w| w.availability.len() != grid.period_count())
        {
            return Err(InputParseError::AvailabilityLength {
                worker: bad.name.clone(),
                expected: grid.period_count(),
                actual: bad.availability.len(),
            }
            .into());
        }
        Ok(Self { workers })
    }

    /// Parses a worker table.
    ///
    /// Duplicate names are rejected before any row is parsed.
    pub fn from_rows(rows: &[WorkerRow], grid: &PeriodGrid) -> Result<Self, RosterError> {
        check_unique(rows.iter().map(|r| r.name.as_str()))?;
        let workers = rows
            .iter()
            .map(|row| Worker::from_row(row, grid))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { workers })
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Worker> {
        self.workers.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Worker> {
        self.workers.get(index)
    }

    pub fn by_name(&self, name: &str) -> Option<&Worker> {
        self.workers.iter().find(|w| w.name == name)
    }

    pub fn as_slice(&self) -> &[Worker] {
        &self.workers
    }

    /// Number of workers available in `period`.
    pub fn available_count(&self, period: Period) -> usize {
        self.workers.iter().filter(|w| w.is_available(period)).count()
    }
}

impl<'a> IntoIterator for &'a WorkerSet {
    type Item = &'a Worker;
    type IntoIter = std::slice::Iter<'a, Worker>;

    fn into_iter(self) -> Self::IntoIter {
        self.workers.iter()
    }
}

fn check_unique<'a>(names: impl Iterator<Item = &'a str>) -> Result<(), RosterError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(RosterError::DuplicateWorker(name.to_string()));
        }
    }
    Ok(())
}

#[cfg(feature = "serde")]
mod serde_hours {
    use serde::{Deserialize, Deserializer};

    /// Accepts an hour field written either as a number or as text.
    pub fn hour_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Text(String),
        }

        Ok(match Option::<Raw>::deserialize(deserializer)? {
            Some(Raw::Int(hour)) => hour.to_string(),
            Some(Raw::Text(text)) => text,
            None => String::new(),
        })
    }
}
