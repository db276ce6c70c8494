//! JSON-shaped abstract syntax nodes accepted by the formula builder
//!
//! This is the wire format produced by the spreadsheet client's formula
//! parser: `binary-expression` nodes over `cell` references and `number`
//! literals. Any other node type fails deserialization before tree
//! construction ever sees it.
use serde::{Deserialize, Serialize};

use crate::formula::FormulaError;

/// A node of the JSON formula AST
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AstNode {
    /// An operator applied to two operands
    #[serde(rename = "binary-expression")]
    BinaryExpression {
        operator: String,
        left: Box<AstNode>,
        right: Box<AstNode>,
    },
    /// A reference to a spreadsheet cell, e.g. `$C$3`
    #[serde(rename = "cell")]
    Cell { key: String },
    /// A numeric literal
    #[serde(rename = "number")]
    Number { value: NumberValue },
}

/// Literal payload of a `number` node
///
/// The client stringifies resolved cell contents before posting, so a
/// literal arrives either as a JSON number or as a numeric string; both are
/// accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberValue {
    Number(f64),
    Text(String),
}

impl NumberValue {
    /// Convert the literal payload into a finite real number
    pub fn as_f64(&self) -> Result<f64, FormulaError> {
        let value = match self {
            NumberValue::Number(number) => *number,
            NumberValue::Text(text) => text.trim().parse::<f64>().map_err(|_| {
                FormulaError::MalformedAst(format!("Non-numeric literal: {}", text))
            })?,
        };
        if !value.is_finite() {
            return Err(FormulaError::MalformedAst(format!(
                "Literal must be finite, got {}",
                value
            )));
        }
        Ok(value)
    }
}
