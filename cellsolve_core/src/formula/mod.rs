//! Module for representing spreadsheet formulas as expression trees

use thiserror::Error;

pub mod ast;
pub mod operator;
pub mod tree;

/// Enum representing possible formula construction and evaluation errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FormulaError {
    /// Operator symbol absent from the registry
    #[error("Unknown operator: {0}")]
    UnknownOperator(String),
    /// Number of supplied operands does not match the operator's declared arity
    #[error("Operator {operator} takes {expected} operand(s), got {actual}")]
    ArityMismatch {
        operator: String,
        expected: usize,
        actual: usize,
    },
    /// Relational comparator found where an arithmetic operand was expected
    #[error("Relational operator {0} is only allowed at the top of a constraint")]
    NestedRelational(String),
    /// Constraint formula whose top node is not a relational comparison
    #[error("Expected a relational constraint, found an arithmetic expression")]
    ExpectedRelation,
    /// Evaluation found a variable with no entry in the substitution
    #[error("Variable {0} has no value in the substitution")]
    UnboundVariable(String),
    /// Node content that cannot be turned into a tree (e.g. a non-numeric literal)
    #[error("Malformed formula AST: {0}")]
    MalformedAst(String),
}
