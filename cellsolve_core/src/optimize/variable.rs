//! Module providing representation of optimization problem variables
use std::fmt::{Display, Formatter};

use derive_builder::Builder;

/// A decision variable of an optimization problem
///
/// One record is minted per declared variable cell when a problem is built;
/// the record is what the solver backend's quantity factory receives.
///
/// # Examples
/// ```rust
/// use cellsolve_core::optimize::variable::{VariableBuilder, VariableType};
/// let x = VariableBuilder::default()
///     .id("$C$3")
///     .index(0)
///     .build()
///     .unwrap();
/// assert_eq!(x.variable_type, VariableType::Integer);
/// ```
#[derive(Builder, Clone, Debug, PartialEq)]
pub struct Variable {
    /// Used to identify the variable, a cell address in practice
    #[builder(setter(into))]
    pub id: String,
    /// Human readable variable name
    #[builder(default = "None")]
    pub name: Option<String>,
    /// Type of the decision variable (see [`VariableType`])
    #[builder(default = "VariableType::Integer")]
    pub variable_type: VariableType,
    /// Lowest value the variable may take
    #[builder(default = "0.0")]
    pub lower_bound: f64,
    /// Highest value the variable may take
    #[builder(default = "1000.0")]
    pub upper_bound: f64,
    /// Position of the variable in the problem
    #[builder(default = "0")]
    pub index: usize,
}

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}:{}", name, self.variable_type),
            None => write!(f, "{}:{}", self.id, self.variable_type),
        }
    }
}

/// Represents the type of variable in an optimization problem
///
/// # Notes:
/// Spreadsheet cells are modeled as integer quantities by default; not all
/// backends support all types
#[derive(Debug, PartialEq, Clone, Copy, Hash, Eq)]
pub enum VariableType {
    /// Continuous variable
    Continuous,
    /// Integer variable
    Integer,
    /// Binary variable
    Binary,
}

impl Display for VariableType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            VariableType::Continuous => write!(f, "CONTINUOUS"),
            VariableType::Integer => write!(f, "INTEGER"),
            VariableType::Binary => write!(f, "BINARY"),
        }
    }
}
