//! Provides the fixed catalog of arithmetic operators and relational
//! comparators recognized in formula trees
use std::fmt::{Display, Formatter};

use crate::formula::FormulaError;
use crate::numeric::Quantity;

/// Arithmetic operators applicable inside a formula tree
///
/// The set is closed: symbol lookup happens once, at tree construction, and
/// evaluation dispatches by exhaustive match instead of a runtime table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Subtract,
    /// Multiplication (`*`)
    Multiply,
    /// Guarded division (`/`), clamps near-zero denominators
    Divide,
    /// Clamped exponential (`exp`)
    Exp,
    /// Sine (`sin`)
    Sin,
    /// Cosine (`cos`)
    Cos,
}

/// Catalog of every recognized operator
pub const OPERATORS: [Operator; 7] = [
    Operator::Add,
    Operator::Subtract,
    Operator::Multiply,
    Operator::Divide,
    Operator::Exp,
    Operator::Sin,
    Operator::Cos,
];

impl Operator {
    /// Resolve an operator symbol, None if the symbol is not in the catalog
    pub fn from_symbol(symbol: &str) -> Option<Operator> {
        match symbol {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Subtract),
            "*" => Some(Operator::Multiply),
            "/" => Some(Operator::Divide),
            "exp" => Some(Operator::Exp),
            "sin" => Some(Operator::Sin),
            "cos" => Some(Operator::Cos),
            _ => None,
        }
    }

    /// The symbol this operator is written as
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Exp => "exp",
            Operator::Sin => "sin",
            Operator::Cos => "cos",
        }
    }

    /// Number of operands the operator takes
    pub fn arity(&self) -> usize {
        match self {
            Operator::Add | Operator::Subtract | Operator::Multiply | Operator::Divide => 2,
            Operator::Exp | Operator::Sin | Operator::Cos => 1,
        }
    }

    /// Apply the operator to already evaluated operands, in order
    ///
    /// Tree construction guarantees the operand count matches the declared
    /// arity, so the mismatch arm is unreachable through public paths; it is
    /// kept so the function stays total.
    pub fn apply<Q: Quantity>(&self, operands: &[Q]) -> Result<Q, FormulaError> {
        match (self, operands) {
            (Operator::Add, [lhs, rhs]) => Ok(lhs.clone().add(rhs.clone())),
            (Operator::Subtract, [lhs, rhs]) => Ok(lhs.clone().subtract(rhs.clone())),
            (Operator::Multiply, [lhs, rhs]) => Ok(lhs.clone().multiply(rhs.clone())),
            (Operator::Divide, [lhs, rhs]) => Ok(lhs.clone().divide(rhs.clone())),
            (Operator::Exp, [operand]) => Ok(operand.clone().exp()),
            (Operator::Sin, [operand]) => Ok(operand.clone().sin()),
            (Operator::Cos, [operand]) => Ok(operand.clone().cos()),
            (op, operands) => Err(FormulaError::ArityMismatch {
                operator: op.symbol().to_string(),
                expected: op.arity(),
                actual: operands.len(),
            }),
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Relational comparators, legal only at the top of a constraint formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    /// Left side must be at least the bound (`>=`)
    GreaterEqual,
    /// Left side must be at most the bound (`<=`)
    LessEqual,
    /// Left side must equal the bound (`=`)
    Equal,
}

impl Comparator {
    /// Resolve a comparator symbol, None if the symbol is not relational
    ///
    /// `==` is accepted as an input alias for `=`; the canonical rendering
    /// is always `=`.
    pub fn from_symbol(symbol: &str) -> Option<Comparator> {
        match symbol {
            ">=" => Some(Comparator::GreaterEqual),
            "<=" => Some(Comparator::LessEqual),
            "=" | "==" => Some(Comparator::Equal),
            _ => None,
        }
    }

    /// The canonical symbol this comparator is written as
    pub fn symbol(&self) -> &'static str {
        match self {
            Comparator::GreaterEqual => ">=",
            Comparator::LessEqual => "<=",
            Comparator::Equal => "=",
        }
    }
}

impl Display for Comparator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
