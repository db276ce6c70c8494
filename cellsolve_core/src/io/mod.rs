//! Module providing the JSON solve surface consumed by the API gateway
pub mod json;

use thiserror::Error;

use crate::optimize::problem::ProblemError;
use crate::optimize::solvers::SolverError;
use crate::optimize::OptimizationStatus;

/// Enum representing possible errors of the solve surface
#[derive(Debug, Error)]
pub enum IoError {
    /// Request body could not be deserialized
    #[error("Unable to parse solve request: {0}")]
    MalformedRequest(String),
    /// Problem could not be built from the request formulas
    #[error(transparent)]
    Problem(#[from] ProblemError),
    /// Solver backend reported a failure
    #[error(transparent)]
    Solver(#[from] SolverError),
    /// Solver finished without producing a variable assignment
    #[error("No feasible assignment produced, solver status {0:?}")]
    NoSolution(OptimizationStatus),
    /// Response body could not be serialized
    #[error("Unable to serialize solve response: {0}")]
    MalformedResponse(String),
}
