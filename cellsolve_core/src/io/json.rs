//! Module providing JSON request and response handling for solve requests
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::configuration::CONFIGURATION;
use crate::formula::ast::AstNode;
use crate::io::IoError;
use crate::numeric::Quantity;
use crate::optimize::objective::ObjectiveSense;
use crate::optimize::problem::{Problem, ProblemError};
use crate::optimize::solvers::Solver;
use crate::optimize::variable::Variable;

/// A solve request as posted by the spreadsheet client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveRequest {
    /// Cell addresses acting as decision variables
    pub variable_cells: Vec<String>,
    /// Relational constraint formulas
    pub constraints: Vec<AstNode>,
    /// Whether the objective should be minimized or maximized
    pub objective_target: ObjectiveSense,
    /// Objective formula over the variable cells
    pub objective_formula: AstNode,
}

impl SolveRequest {
    /// Parse a solve request from a JSON request body
    pub fn from_json_str(body: &str) -> Result<SolveRequest, IoError> {
        serde_json::from_str(body).map_err(|err| IoError::MalformedRequest(err.to_string()))
    }

    /// Build the optimization problem described by this request
    pub fn to_problem<Q, F>(&self, quantity_factory: F) -> Result<Problem<Q>, ProblemError>
    where
        Q: Quantity,
        F: FnMut(&Variable) -> Q,
    {
        Problem::build(
            &self.variable_cells,
            self.objective_target,
            &self.objective_formula,
            &self.constraints,
            quantity_factory,
        )
    }
}

/// Round a variable assignment to the configured display precision
///
/// An explicit formatting step at the API boundary; evaluation inside the
/// core stays numerically exact.
pub fn rounded_assignment(values: &IndexMap<String, f64>) -> IndexMap<String, f64> {
    let decimals = CONFIGURATION.read().unwrap().display_decimals;
    let scale = 10f64.powi(decimals);
    values
        .iter()
        .map(|(id, value)| (id.clone(), (value * scale).round() / scale))
        .collect()
}

/// Serialize a rounded assignment as the JSON response body
pub fn assignment_to_json(values: &IndexMap<String, f64>) -> Result<String, IoError> {
    serde_json::to_string(values).map_err(|err| IoError::MalformedResponse(err.to_string()))
}

/// Run a solve request against a backend and return the rounded assignment
///
/// Builds the problem with the backend's quantity handles, hands it over for
/// solving, and rounds the returned assignment for display. A solution
/// without an assignment becomes [`IoError::NoSolution`].
pub fn solve_request<S: Solver>(
    request: &SolveRequest,
    solver: &mut S,
) -> Result<IndexMap<String, f64>, IoError> {
    let problem = request.to_problem(|variable| solver.quantity(variable))?;
    let solution = solver.solve(&problem)?;
    match solution.variable_values {
        Some(values) => Ok(rounded_assignment(&values)),
        None => Err(IoError::NoSolution(solution.status)),
    }
}
