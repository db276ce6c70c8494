//! Module providing the contract between optimization problems and solver
//! backends

use thiserror::Error;

use crate::numeric::Quantity;
use crate::optimize::problem::Problem;
use crate::optimize::variable::Variable;
use crate::optimize::ProblemSolution;

/// A pluggable optimization backend
///
/// The backend owns its decision-quantity handles and their interpretation;
/// the core only ever combines them through the [`Quantity`] operations. One
/// handle is requested per declared variable before the problem is
/// assembled, and the assembled problem is handed over in a single
/// synchronous call.
pub trait Solver {
    /// Opaque decision-quantity handle substituted for variable names during
    /// formula evaluation
    type Quantity: Quantity;

    /// Produce the decision-quantity handle for a variable
    fn quantity(&mut self, variable: &Variable) -> Self::Quantity;

    /// Solve a fully built problem
    ///
    /// Infeasibility and unboundedness are reported through the solution's
    /// status, not as errors; [`SolverError`] is reserved for backend
    /// failures.
    fn solve(&mut self, problem: &Problem<Self::Quantity>)
        -> Result<ProblemSolution, SolverError>;
}

/// Errors reported by solver backends
#[derive(Debug, Error, Clone)]
pub enum SolverError {
    /// The backend failed before producing a result
    #[error("Solver backend failure: {0}")]
    BackendFailure(String),
}
