//! Demand profile and the policy that turns demand into headcount rules.

use crate::error::InputParseError;
use crate::period::{Period, PeriodGrid};

/// Target headcount per period, in grid order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DemandProfile {
    values: Vec<u32>,
}

impl DemandProfile {
    /// Validates that there is exactly one value per grid period.
    pub fn new(values: Vec<u32>, grid: &PeriodGrid) -> Result<Self, InputParseError> {
        if values.len() != grid.period_count() {
            return Err(InputParseError::DemandLength {
                expected: grid.period_count(),
                actual: values.len(),
            });
        }
        Ok(Self { values })
    }

    /// All-zero profile for the grid.
    pub fn zeros(grid: &PeriodGrid) -> Self {
        Self {
            values: vec![0; grid.period_count()],
        }
    }

    pub fn get(&self, period: Period) -> u32 {
        self.values[period.0]
    }

    /// Returns a copy with `period` set to `value`.
    pub fn with(mut self, period: Period, value: u32) -> Self {
        self.values[period.0] = value;
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (Period, u32)> + '_ {
        self.values.iter().enumerate().map(|(i, v)| (Period(i), *v))
    }
}

/// Headcount requirement for a single period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemandRule {
    /// Assigned count must equal the value.
    Exact(u32),
    /// Assigned count must lie in `[min, max]`.
    Between { min: u32, max: u32 },
    /// No demand constraint; only hour bounds shape this period.
    Unconstrained,
}

impl DemandRule {
    /// Lowest headcount the rule accepts.
    pub fn min_headcount(&self) -> u32 {
        match *self {
            Self::Exact(n) => n,
            Self::Between { min, .. } => min,
            Self::Unconstrained => 0,
        }
    }

    /// Highest headcount the rule accepts, if bounded.
    pub fn max_headcount(&self) -> Option<u32> {
        match *self {
            Self::Exact(n) => Some(n),
            Self::Between { max, .. } => Some(max),
            Self::Unconstrained => None,
        }
    }

    pub fn accepts(&self, headcount: u32) -> bool {
        headcount >= self.min_headcount()
            && self.max_headcount().map_or(true, |max| headcount <= max)
    }
}

/// How demand values are matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DemandMode {
    /// Small demands are exact, larger ones get a tolerance band.
    #[default]
    Banded,
    /// Every period must match its demand exactly.
    Exact,
}

/// Treatment of periods whose demand is exactly one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SingleDemand {
    /// No constraint is generated for the period.
    #[default]
    Unconstrained,
    /// Exactly one worker is required.
    Exact,
}

/// Maps demand values to [`DemandRule`]s.
///
/// The default policy gives:
///
/// | demand | rule |
/// |---|---|
/// | 0 | exactly 0 |
/// | 1 | unconstrained |
/// | 2 | exactly 2 |
/// | d > 2 | between d - 1 and d + 1 |
///
/// ```
/// use rosterforge_core::demand::{DemandPolicy, DemandRule};
///
/// let policy = DemandPolicy::default();
/// assert_eq!(policy.rule_for(2), DemandRule::Exact(2));
/// assert_eq!(policy.rule_for(5), DemandRule::Between { min: 4, max: 6 });
/// assert_eq!(policy.rule_for(1), DemandRule::Unconstrained);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "snake_case"))]
pub struct DemandPolicy {
    pub mode: DemandMode,
    /// Demands from 2 up to this value are matched exactly in banded mode.
    pub exact_up_to: u32,
    /// Half-width of the band used above `exact_up_to`.
    pub tolerance: u32,
    pub single_demand: SingleDemand,
}

impl Default for DemandPolicy {
    fn default() -> Self {
        Self {
            mode: DemandMode::Banded,
            exact_up_to: 2,
            tolerance: 1,
            single_demand: SingleDemand::Unconstrained,
        }
    }
}

impl DemandPolicy {
    /// Policy where every period must match demand exactly.
    pub fn exact() -> Self {
        Self {
            mode: DemandMode::Exact,
            ..Self::default()
        }
    }

    pub fn with_single_demand(mut self, single_demand: SingleDemand) -> Self {
        self.single_demand = single_demand;
        self
    }

    pub fn with_tolerance(mut self, tolerance: u32) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn rule_for(&self, demand: u32) -> DemandRule {
        if self.mode == DemandMode::Exact {
            return DemandRule::Exact(demand);
        }
        match demand {
            0 => DemandRule::Exact(0),
            1 => match self.single_demand {
                SingleDemand::Unconstrained => DemandRule::Unconstrained,
                SingleDemand::Exact => DemandRule::Exact(1),
            },
            d if d <= self.exact_up_to => DemandRule::Exact(d),
            d => DemandRule::Between {
                min: d.saturating_sub(self.tolerance),
                max: d.saturating_add(self.tolerance),
            },
        }
    }
}
