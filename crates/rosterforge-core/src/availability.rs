//! Availability encoder.
//!
//! Turns declared shift ranges into per-period availability. A period
//! `[h, h + 1)` is available only when some shift fully contains it;
//! partial overlap does not count.

use smallvec::SmallVec;

use crate::error::InputParseError;
use crate::period::{PeriodGrid, PeriodMask};

/// One declared shift `[start, end)` in whole hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShiftRange {
    pub start: u32,
    pub end: u32,
}

impl ShiftRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// True if `[hour, hour + 1)` lies entirely inside this shift.
    #[inline]
    pub fn contains_hour(&self, hour: u32) -> bool {
        self.start <= hour && hour + 1 <= self.end
    }
}

/// Shifts declared for a single day. Split shifts rarely exceed two.
pub type DayShifts = SmallVec<[ShiftRange; 2]>;

/// Parses a start or end field: a single hour or a comma-separated list.
///
/// A blank field yields an empty list. Tokens may be padded with whitespace.
///
/// # Errors
///
/// Returns [`InputParseError::InvalidHour`] for any token that is not a
/// non-negative integer, including empty tokens such as in `"9,"`.
pub fn parse_hour_list(text: &str, worker: &str, day: &str) -> Result<Vec<u32>, InputParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }
    text.split(',')
        .map(|token| {
            token
                .trim()
                .parse::<u32>()
                .map_err(|_| InputParseError::InvalidHour {
                    worker: worker.to_string(),
                    day: day.to_string(),
                    value: token.trim().to_string(),
                })
        })
        .collect()
}

/// Pairs start and end hours positionally into shifts.
///
/// # Errors
///
/// Fails when the lists differ in length or a shift ends before it starts.
pub fn pair_shifts(
    starts: &[u32],
    ends: &[u32],
    worker: &str,
    day: &str,
) -> Result<DayShifts, InputParseError> {
    if starts.len() != ends.len() {
        return Err(InputParseError::ShiftCountMismatch {
            worker: worker.to_string(),
            day: day.to_string(),
            starts: starts.len(),
            ends: ends.len(),
        });
    }
    starts
        .iter()
        .zip(ends)
        .map(|(&start, &end)| {
            if start > end {
                Err(InputParseError::ReversedShift {
                    worker: worker.to_string(),
                    day: day.to_string(),
                    start,
                    end,
                })
            } else {
                Ok(ShiftRange::new(start, end))
            }
        })
        .collect()
}

/// Parses the raw start/end text of one day into shifts.
pub fn parse_day_shifts(
    start_text: &str,
    end_text: &str,
    worker: &str,
    day: &str,
) -> Result<DayShifts, InputParseError> {
    let starts = parse_hour_list(start_text, worker, day)?;
    let ends = parse_hour_list(end_text, worker, day)?;
    pair_shifts(&starts, &ends, worker, day)
}

/// Encodes one day's shifts into `grid.periods_per_day()` flags.
pub fn encode_day(shifts: &[ShiftRange], grid: &PeriodGrid) -> Vec<bool> {
    (0..grid.periods_per_day())
        .map(|offset| {
            let hour = grid.day_start_hour() + offset as u32;
            shifts.iter().any(|s| s.contains_hour(hour))
        })
        .collect()
}

/// Encodes a week of shifts, one entry per grid weekday, into a period mask.
///
/// Days beyond `week.len()` are left unavailable.
pub fn encode_week(week: &[DayShifts], grid: &PeriodGrid) -> PeriodMask {
    let mut bits = Vec::with_capacity(grid.period_count());
    for day in 0..grid.day_count() {
        match week.get(day) {
            Some(shifts) => bits.extend(encode_day(shifts, grid)),
            None => bits.extend(std::iter::repeat(false).take(grid.periods_per_day())),
        }
    }
    PeriodMask::from_bits(bits)
}
