//! Model builder: workers, demand and policy to a [`RosterModel`].

use rosterforge_core::{
    DemandPolicy, DemandProfile, DemandRule, InputParseError, RosterError, WorkerSet,
};
use tracing::debug;

use crate::model::{Bound, ConstraintKind, LinearConstraint, RosterModel, VariableLayout};

/// Builds the integer program for one run.
///
/// Creates:
/// - A binary variable per `(worker, period)`
/// - `x == 0` wherever the worker is unavailable
/// - Demand constraints per period as the [`DemandPolicy`] dictates
/// - `min_hours <= sum(x[w]) <= max_hours` per worker
///
/// The builder does not check feasibility; conflicts surface at solve time.
///
/// # Example
///
/// ```
/// use rosterforge_core::{DemandProfile, PeriodGrid, PeriodMask, Worker, WorkerSet};
/// use rosterforge_solver::ModelBuilder;
///
/// let grid = PeriodGrid::default();
/// let ann = Worker::new("Ann", PeriodMask::full(45), 0, 9).unwrap();
/// let workers = WorkerSet::new(vec![ann], &grid).unwrap();
/// let demand = DemandProfile::zeros(&grid);
///
/// let model = ModelBuilder::new(&workers, &demand).build().unwrap();
/// assert_eq!(model.variable_count(), 45);
/// ```
#[derive(Debug)]
pub struct ModelBuilder<'a> {
    workers: &'a WorkerSet,
    demand: &'a DemandProfile,
    policy: DemandPolicy,
}

impl<'a> ModelBuilder<'a> {
    pub fn new(workers: &'a WorkerSet, demand: &'a DemandProfile) -> Self {
        Self {
            workers,
            demand,
            policy: DemandPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: DemandPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Builds the model.
    ///
    /// # Errors
    ///
    /// Returns [`InputParseError::DemandLength`] if the demand profile and
    /// the worker availability cover different numbers of periods.
    pub fn build(&self) -> Result<RosterModel, RosterError> {
        let period_count = self.demand.len();
        if let Some(worker) = self
            .workers
            .iter()
            .find(|w| w.availability().len() != period_count)
        {
            return Err(InputParseError::DemandLength {
                expected: worker.availability().len(),
                actual: period_count,
            }
            .into());
        }

        let layout = VariableLayout::new(self.workers.len(), period_count);
        let mut constraints = Vec::new();

        self.add_availability_constraints(&layout, &mut constraints);
        self.add_demand_constraints(&layout, &mut constraints);
        self.add_hour_constraints(&layout, &mut constraints);

        debug!(
            event = "model_built",
            variable_count = layout.variable_count(),
            constraint_count = constraints.len(),
        );

        Ok(RosterModel::new(
            "ScheduleWorkers".to_string(),
            layout,
            self.workers.iter().map(|w| w.name().to_string()).collect(),
            constraints,
        ))
    }

    fn add_availability_constraints(
        &self,
        layout: &VariableLayout,
        constraints: &mut Vec<LinearConstraint>,
    ) {
        for (w, worker) in self.workers.iter().enumerate() {
            for (period, _) in self.demand.iter() {
                if !worker.is_available(period) {
                    constraints.push(LinearConstraint {
                        name: format!("Unavailable_{}_P{}", worker.name(), period.0),
                        kind: ConstraintKind::Availability,
                        terms: vec![layout.index(w, period)],
                        bound: Bound::Equal(0),
                    });
                }
            }
        }
    }

    fn add_demand_constraints(
        &self,
        layout: &VariableLayout,
        constraints: &mut Vec<LinearConstraint>,
    ) {
        for (period, value) in self.demand.iter() {
            let terms = || layout.period_vars(period).collect::<Vec<_>>();
            match self.policy.rule_for(value) {
                DemandRule::Exact(0) => constraints.push(LinearConstraint {
                    name: format!("NoDemand_P{}", period.0),
                    kind: ConstraintKind::Demand,
                    terms: terms(),
                    bound: Bound::Equal(0),
                }),
                DemandRule::Exact(n) => constraints.push(LinearConstraint {
                    name: format!("ExactDemand_P{}", period.0),
                    kind: ConstraintKind::Demand,
                    terms: terms(),
                    bound: Bound::Equal(n),
                }),
                DemandRule::Between { min, max } => {
                    constraints.push(LinearConstraint {
                        name: format!("MaxDemand_P{}", period.0),
                        kind: ConstraintKind::Demand,
                        terms: terms(),
                        bound: Bound::AtMost(max),
                    });
                    constraints.push(LinearConstraint {
                        name: format!("MinDemand_P{}", period.0),
                        kind: ConstraintKind::Demand,
                        terms: terms(),
                        bound: Bound::AtLeast(min),
                    });
                }
                DemandRule::Unconstrained => {}
            }
        }
    }

    fn add_hour_constraints(
        &self,
        layout: &VariableLayout,
        constraints: &mut Vec<LinearConstraint>,
    ) {
        for (w, worker) in self.workers.iter().enumerate() {
            let terms: Vec<_> = layout.worker_vars(w).collect();
            constraints.push(LinearConstraint {
                name: format!("{}_min_hours", worker.name()),
                kind: ConstraintKind::MinHours,
                terms: terms.clone(),
                bound: Bound::AtLeast(worker.min_hours()),
            });
            constraints.push(LinearConstraint {
                name: format!("{}_max_hours", worker.name()),
                kind: ConstraintKind::MaxHours,
                terms,
                bound: Bound::AtMost(worker.max_hours()),
            });
        }
    }
}

#[cfg(test)]
mod tests;
