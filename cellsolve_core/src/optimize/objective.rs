//! Provides the objective of an optimization problem

use serde::{Deserialize, Serialize};

use crate::numeric::Quantity;

/// Represents the objective of an optimization problem
///
/// The stored expression is always in the backend's minimize-only form: a
/// maximization objective is negated on construction, and backends must not
/// negate again. The sense the caller asked for is kept for reporting.
#[derive(Debug, Clone)]
pub struct Objective<Q> {
    /// Expression to be minimized by the backend
    expression: Q,
    /// Sense requested by the caller (see [`ObjectiveSense`])
    sense: ObjectiveSense,
}

impl<Q: Quantity> Objective<Q> {
    /// Create a new objective from the requested sense and the evaluated
    /// objective expression, applying the sign-flip convention for
    /// maximization
    pub fn new(sense: ObjectiveSense, expression: Q) -> Self {
        let expression = match sense {
            ObjectiveSense::Minimize => expression,
            ObjectiveSense::Maximize => expression.negate(),
        };
        Self { expression, sense }
    }

    /// The expression the backend should minimize
    pub fn expression(&self) -> &Q {
        &self.expression
    }

    /// The sense the caller requested
    pub fn sense(&self) -> ObjectiveSense {
        self.sense
    }
}

/// Represents the sense of the objective, whether it should be maximized or
/// minimized
///
/// Serialized with the wire vocabulary of the solve surface (`min`/`max`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectiveSense {
    /// The objective should be minimized
    #[serde(rename = "min")]
    Minimize,
    /// The objective should be maximized
    #[serde(rename = "max")]
    Maximize,
}
