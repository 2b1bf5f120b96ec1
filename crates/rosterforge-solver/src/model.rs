//! Solver-agnostic integer program for one roster run.
//!
//! Variables are binary and laid out worker-major: `x[w][p]` has index
//! `w * period_count + p`. The objective is always to minimise the sum of
//! all variables.

use std::fmt;

use rosterforge_core::Period;

/// Index of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarIndex(pub usize);

/// Mapping between `(worker, period)` pairs and variable indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableLayout {
    worker_count: usize,
    period_count: usize,
}

impl VariableLayout {
    pub fn new(worker_count: usize, period_count: usize) -> Self {
        Self {
            worker_count,
            period_count,
        }
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    pub fn period_count(&self) -> usize {
        self.period_count
    }

    pub fn variable_count(&self) -> usize {
        self.worker_count * self.period_count
    }

    #[inline]
    pub fn index(&self, worker: usize, period: Period) -> VarIndex {
        debug_assert!(worker < self.worker_count && period.0 < self.period_count);
        VarIndex(worker * self.period_count + period.0)
    }

    pub fn worker_of(&self, var: VarIndex) -> usize {
        var.0 / self.period_count
    }

    pub fn period_of(&self, var: VarIndex) -> Period {
        Period(var.0 % self.period_count)
    }

    /// Variables of one worker across all periods.
    pub fn worker_vars(&self, worker: usize) -> impl Iterator<Item = VarIndex> {
        let start = worker * self.period_count;
        (start..start + self.period_count).map(VarIndex)
    }

    /// Variables of one period across all workers.
    pub fn period_vars(&self, period: Period) -> impl Iterator<Item = VarIndex> {
        let period_count = self.period_count;
        (0..self.worker_count).map(move |w| VarIndex(w * period_count + period.0))
    }
}

/// Which requirement a constraint encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// Forces a variable to zero where the worker is unavailable.
    Availability,
    /// Bounds the headcount of a period.
    Demand,
    MinHours,
    MaxHours,
}

/// Right-hand side of `sum(terms) <op> value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Equal(u32),
    AtLeast(u32),
    AtMost(u32),
}

impl Bound {
    pub fn accepts(&self, sum: u32) -> bool {
        match *self {
            Bound::Equal(n) => sum == n,
            Bound::AtLeast(n) => sum >= n,
            Bound::AtMost(n) => sum <= n,
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Equal(n) => write!(f, "== {n}"),
            Bound::AtLeast(n) => write!(f, ">= {n}"),
            Bound::AtMost(n) => write!(f, "<= {n}"),
        }
    }
}

/// `sum(terms) <bound>` with unit coefficients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearConstraint {
    pub name: String,
    pub kind: ConstraintKind,
    pub terms: Vec<VarIndex>,
    pub bound: Bound,
}

impl LinearConstraint {
    /// Evaluates the constraint against a full 0/1 assignment.
    pub fn is_satisfied(&self, values: &[bool]) -> bool {
        let sum = self.terms.iter().filter(|v| values[v.0]).count() as u32;
        self.bound.accepts(sum)
    }
}

/// A built model: variables, constraints and the minimise-assignments objective.
///
/// Created by [`ModelBuilder`](crate::ModelBuilder), consumed by
/// [`SolverDriver::solve`](crate::SolverDriver::solve). Never mutated after build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterModel {
    name: String,
    layout: VariableLayout,
    worker_names: Vec<String>,
    constraints: Vec<LinearConstraint>,
}

impl RosterModel {
    pub(crate) fn new(
        name: String,
        layout: VariableLayout,
        worker_names: Vec<String>,
        constraints: Vec<LinearConstraint>,
    ) -> Self {
        Self {
            name,
            layout,
            worker_names,
            constraints,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layout(&self) -> VariableLayout {
        self.layout
    }

    pub fn worker_names(&self) -> &[String] {
        &self.worker_names
    }

    pub fn variable_count(&self) -> usize {
        self.layout.variable_count()
    }

    /// Name of a variable, e.g. `x_Ann_23`.
    pub fn variable_name(&self, var: VarIndex) -> String {
        format!(
            "x_{}_{}",
            self.worker_names[self.layout.worker_of(var)],
            self.layout.period_of(var).0
        )
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    pub fn constraints_of(&self, kind: ConstraintKind) -> impl Iterator<Item = &LinearConstraint> {
        self.constraints.iter().filter(move |c| c.kind == kind)
    }

    pub fn constraint(&self, name: &str) -> Option<&LinearConstraint> {
        self.constraints.iter().find(|c| c.name == name)
    }

    /// Names of constraints violated by `values`.
    pub fn violated_constraints<'a>(&'a self, values: &'a [bool]) -> impl Iterator<Item = &'a str> {
        self.constraints
            .iter()
            .filter(move |c| !c.is_satisfied(values))
            .map(|c| c.name.as_str())
    }

    /// Objective value of an assignment.
    pub fn objective(&self, values: &[bool]) -> u64 {
        values.iter().filter(|v| **v).count() as u64
    }
}
