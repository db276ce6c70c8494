//! Provides struct for representing a constraint in an optimization problem

use crate::formula::operator::Comparator;

/// A labeled relational constraint handed to the solver backend
///
/// The left-hand side is the constraint formula evaluated over the backend's
/// decision-quantity handles; the right-hand side is variable-free and is
/// therefore already a plain number. The label is derived from the prefix
/// rendering of the left-hand subtree and is deterministic across repeated
/// builds of the same formula.
#[derive(Debug, Clone)]
pub struct Constraint<Q> {
    label: String,
    comparator: Comparator,
    lhs: Q,
    rhs: f64,
}

impl<Q> Constraint<Q> {
    /// Create a new constraint
    pub fn new(label: &str, comparator: Comparator, lhs: Q, rhs: f64) -> Self {
        Self {
            label: label.to_string(),
            comparator,
            lhs,
            rhs,
        }
    }

    /// Label identifying the constraint towards the backend
    pub fn label(&self) -> &str {
        &self.label
    }

    /// How the left-hand side relates to the bound
    pub fn comparator(&self) -> Comparator {
        self.comparator
    }

    /// The evaluated left-hand side
    pub fn lhs(&self) -> &Q {
        &self.lhs
    }

    /// The numeric bound
    pub fn rhs(&self) -> f64 {
        self.rhs
    }
}
