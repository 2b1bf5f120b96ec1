//! Weekly period grid and period labels.
//!
//! A grid splits each weekday into hourly periods from `day_start_hour`
//! (inclusive) to `day_end_hour` (exclusive). Periods are numbered day-major,
//! hour-minor, so increasing index order is chronological order.
//!
//! # Example
//!
//! ```
//! use rosterforge_core::period::{Period, PeriodGrid};
//!
//! let grid = PeriodGrid::default();
//! assert_eq!(grid.period_count(), 45);
//! assert_eq!(grid.label(Period(23)), "Wed 13-14");
//! assert_eq!(grid.parse_label("Wed 13-14").unwrap(), Period(23));
//! ```

use std::fmt;

use crate::error::InputParseError;

/// Index of one hourly period within the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Period(pub usize);

impl Period {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Shape of the scheduling week: weekday names and the daily hour window.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PeriodGrid {
    weekdays: Vec<String>,
    day_start_hour: u32,
    day_end_hour: u32,
}

impl Default for PeriodGrid {
    /// Monday to Friday, 08:00 to 17:00: 9 periods a day, 45 in total.
    fn default() -> Self {
        Self {
            weekdays: ["Mon", "Tue", "Wed", "Thu", "Fri"]
                .iter()
                .map(|d| d.to_string())
                .collect(),
            day_start_hour: 8,
            day_end_hour: 17,
        }
    }
}

impl PeriodGrid {
    /// Creates a validated grid.
    ///
    /// # Errors
    ///
    /// Returns [`InputParseError::InvalidGrid`] when there are no weekdays,
    /// weekday names are empty, repeated or contain whitespace, or the hour
    /// window is empty or extends past midnight.
    pub fn new(
        weekdays: Vec<String>,
        day_start_hour: u32,
        day_end_hour: u32,
    ) -> Result<Self, InputParseError> {
        if weekdays.is_empty() {
            return Err(InputParseError::InvalidGrid("no weekdays".into()));
        }
        for (i, day) in weekdays.iter().enumerate() {
            if day.is_empty() || day.chars().any(char::is_whitespace) {
                return Err(InputParseError::InvalidGrid(format!(
                    "weekday name {day:?} must be non-empty and contain no whitespace"
                )));
            }
            if weekdays[..i].contains(day) {
                return Err(InputParseError::InvalidGrid(format!(
                    "weekday {day:?} listed twice"
                )));
            }
        }
        if day_end_hour <= day_start_hour || day_end_hour > 24 {
            return Err(InputParseError::InvalidGrid(format!(
                "hour window {day_start_hour}-{day_end_hour} is empty or exceeds 24"
            )));
        }
        Ok(Self {
            weekdays,
            day_start_hour,
            day_end_hour,
        })
    }

    pub fn weekdays(&self) -> &[String] {
        &self.weekdays
    }

    pub fn day_start_hour(&self) -> u32 {
        self.day_start_hour
    }

    pub fn day_end_hour(&self) -> u32 {
        self.day_end_hour
    }

    pub fn day_count(&self) -> usize {
        self.weekdays.len()
    }

    pub fn periods_per_day(&self) -> usize {
        (self.day_end_hour - self.day_start_hour) as usize
    }

    pub fn period_count(&self) -> usize {
        self.day_count() * self.periods_per_day()
    }

    /// Iterates all periods in chronological order.
    pub fn periods(&self) -> impl Iterator<Item = Period> {
        (0..self.period_count()).map(Period)
    }

    /// Weekday index of a period.
    pub fn day_of(&self, period: Period) -> usize {
        period.0 / self.periods_per_day()
    }

    /// Start hour of a period; the period covers `[hour, hour + 1)`.
    pub fn hour_of(&self, period: Period) -> u32 {
        self.day_start_hour + (period.0 % self.periods_per_day()) as u32
    }

    /// Returns the period starting at `hour` on weekday `day`, if it lies in the grid.
    pub fn period_at(&self, day: usize, hour: u32) -> Option<Period> {
        if day >= self.day_count() || hour < self.day_start_hour || hour >= self.day_end_hour {
            return None;
        }
        let offset = (hour - self.day_start_hour) as usize;
        Some(Period(day * self.periods_per_day() + offset))
    }

    pub fn contains(&self, period: Period) -> bool {
        period.0 < self.period_count()
    }

    /// Human-readable label, e.g. `"Wed 13-14"`.
    ///
    /// # Panics
    ///
    /// Panics if `period` lies outside the grid.
    pub fn label(&self, period: Period) -> String {
        assert!(
            self.contains(period),
            "{period} outside grid of {} periods",
            self.period_count()
        );
        let hour = self.hour_of(period);
        format!("{} {}-{}", self.weekdays[self.day_of(period)], hour, hour + 1)
    }

    /// Inverse of [`label`](Self::label).
    pub fn parse_label(&self, label: &str) -> Result<Period, InputParseError> {
        let invalid = || InputParseError::InvalidPeriodLabel(label.to_string());

        let (day, hours) = label.trim().split_once(' ').ok_or_else(invalid)?;
        let day_index = self
            .weekdays
            .iter()
            .position(|d| d == day)
            .ok_or_else(invalid)?;
        let (start, end) = hours.split_once('-').ok_or_else(invalid)?;
        let start: u32 = start.parse().map_err(|_| invalid())?;
        let end: u32 = end.parse().map_err(|_| invalid())?;
        if start.checked_add(1) != Some(end) {
            return Err(invalid());
        }
        let period = self.period_at(day_index, start).ok_or_else(invalid)?;
        // Non-canonical spellings such as "Mon 08-09" are rejected.
        if self.label(period) != label.trim() {
            return Err(invalid());
        }
        Ok(period)
    }
}

/// Fixed-length bitmap over the periods of a grid.
///
/// Used both for declared availability and for solved assignments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeriodMask {
    bits: Vec<bool>,
}

impl PeriodMask {
    /// All-clear mask of `len` periods.
    pub fn empty(len: usize) -> Self {
        Self {
            bits: vec![false; len],
        }
    }

    /// All-set mask of `len` periods.
    pub fn full(len: usize) -> Self {
        Self {
            bits: vec![true; len],
        }
    }

    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Returns false for periods beyond the mask.
    #[inline]
    pub fn is_set(&self, period: Period) -> bool {
        self.bits.get(period.0).copied().unwrap_or(false)
    }

    pub fn set(&mut self, period: Period, value: bool) {
        self.bits[period.0] = value;
    }

    /// Number of set periods.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|b| **b).count()
    }

    /// Set periods in increasing order.
    pub fn iter_set(&self) -> impl Iterator<Item = Period> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter(|(_, b)| **b)
            .map(|(i, _)| Period(i))
    }

    /// True if every period set here is also set in `other`.
    pub fn is_subset_of(&self, other: &PeriodMask) -> bool {
        self.iter_set().all(|p| other.is_set(p))
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }
}

impl FromIterator<bool> for PeriodMask {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            bits: iter.into_iter().collect(),
        }
    }
}
