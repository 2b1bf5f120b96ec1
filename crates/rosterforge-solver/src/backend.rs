//! good_lp translation of a [`RosterModel`].

use good_lp::{
    default_solver, variable, Expression, ProblemVariables, ResolutionError, Solution,
    SolverModel, Variable,
};

use crate::model::{Bound, RosterModel};

/// What the backend decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum BackendOutcome {
    Optimal(Vec<bool>),
    Infeasible,
    Unbounded,
    Failed(String),
}

/// Solves the model with the compiled-in MILP solver.
pub(crate) fn solve(model: &RosterModel) -> BackendOutcome {
    // Nothing to decide: every sum is zero.
    if model.variable_count() == 0 {
        let values: Vec<bool> = Vec::new();
        return if model.violated_constraints(&values).next().is_none() {
            BackendOutcome::Optimal(values)
        } else {
            BackendOutcome::Infeasible
        };
    }

    let mut vars = ProblemVariables::new();
    let xs: Vec<Variable> = (0..model.variable_count())
        .map(|i| {
            vars.add(
                variable()
                    .binary()
                    .name(model.variable_name(crate::model::VarIndex(i))),
            )
        })
        .collect();

    let objective = xs
        .iter()
        .fold(Expression::from(0.0), |acc, x| acc + *x);
    let mut problem = vars.minimise(objective).using(default_solver);

    for constraint in model.constraints() {
        let sum = constraint
            .terms
            .iter()
            .fold(Expression::from(0.0), |acc, v| acc + xs[v.0]);
        let c = match constraint.bound {
            Bound::Equal(n) => sum.eq(f64::from(n)),
            Bound::AtLeast(n) => sum.geq(f64::from(n)),
            Bound::AtMost(n) => sum.leq(f64::from(n)),
        };
        problem.add_constraint(c);
    }

    match problem.solve() {
        Ok(solution) => {
            BackendOutcome::Optimal(xs.iter().map(|x| solution.value(*x) >= 0.5).collect())
        }
        Err(ResolutionError::Infeasible) => BackendOutcome::Infeasible,
        Err(ResolutionError::Unbounded) => BackendOutcome::Unbounded,
        Err(e) => BackendOutcome::Failed(e.to_string()),
    }
}
