//! Provides struct representing an optimization problem assembled from
//! formula trees
use indexmap::IndexMap;
use thiserror::Error;

use crate::configuration::CONFIGURATION;
use crate::formula::ast::AstNode;
use crate::formula::tree::{Formula, Relation};
use crate::formula::FormulaError;
use crate::numeric::Quantity;
use crate::optimize::constraint::Constraint;
use crate::optimize::objective::{Objective, ObjectiveSense};
use crate::optimize::variable::{Variable, VariableBuilder, VariableType};

/// An optimization problem: objective, decision variables and labeled
/// relational constraints
///
/// Built fresh per solve request by [`Problem::build`], immutable afterwards,
/// and discarded once the backend has returned.
#[derive(Debug, Clone)]
pub struct Problem<Q> {
    /// Objective to optimize, held in the backend's minimize-only form
    objective: Objective<Q>,
    /// Variables of the optimization problem, keyed by id, in declaration order
    variables: IndexMap<String, Variable>,
    /// Constraints of the optimization problem, in declaration order
    constraints: Vec<Constraint<Q>>,
}

impl<Q: Quantity> Problem<Q> {
    /// Assemble a problem from the declared variable cells, an objective
    /// formula and a list of relational constraint formulas
    ///
    /// # Parameters
    /// - `variable_cells`: cell addresses acting as decision variables, in order
    /// - `sense`: whether the objective is minimized or maximized
    /// - `objective_ast`: JSON AST of the objective formula
    /// - `constraint_asts`: JSON ASTs of the constraints, each relational at the top
    /// - `quantity_factory`: called exactly once per variable to obtain the
    ///   backend's opaque decision-quantity handle
    ///
    /// # Returns
    /// The immutable problem, or the first [`ProblemError`] encountered,
    /// never a partial result.
    pub fn build<F>(
        variable_cells: &[String],
        sense: ObjectiveSense,
        objective_ast: &AstNode,
        constraint_asts: &[AstNode],
        mut quantity_factory: F,
    ) -> Result<Problem<Q>, ProblemError>
    where
        F: FnMut(&Variable) -> Q,
    {
        // region Variables
        let (lower_bound, upper_bound) = {
            let config = CONFIGURATION.read().unwrap();
            (config.lower_bound, config.upper_bound)
        };
        let mut variables: IndexMap<String, Variable> = IndexMap::new();
        let mut substitution: IndexMap<String, Q> = IndexMap::new();
        for (index, cell) in variable_cells.iter().enumerate() {
            if variables.contains_key(cell) {
                return Err(ProblemError::DuplicateVariable(cell.clone()));
            }
            let variable = VariableBuilder::default()
                .id(cell.as_str())
                .variable_type(VariableType::Integer)
                .lower_bound(lower_bound)
                .upper_bound(upper_bound)
                .index(index)
                .build()
                .unwrap();
            substitution.insert(cell.clone(), quantity_factory(&variable));
            variables.insert(cell.clone(), variable);
        }
        // endregion Variables

        // region Objective
        let objective_tree = Formula::from_ast(objective_ast)?;
        enforce_depth_limit(&objective_tree)?;
        let objective = Objective::new(sense, objective_tree.eval(&substitution)?);
        // endregion Objective

        // region Constraints
        let empty: IndexMap<String, f64> = IndexMap::new();
        let mut constraints = Vec::with_capacity(constraint_asts.len());
        for constraint_ast in constraint_asts {
            let relation = Relation::from_ast(constraint_ast)?;
            enforce_depth_limit(&relation.left)?;
            enforce_depth_limit(&relation.right)?;
            // Right-hand sides must be variable-free
            if let Some(name) = relation
                .right
                .variables()
                .into_iter()
                .find(|name| variables.contains_key(name))
            {
                return Err(ProblemError::VariableInConstraintBound { variable: name });
            }
            let label = relation.left.to_string();
            let lhs = relation.left.eval(&substitution)?;
            let rhs = relation.right.eval(&empty)?;
            constraints.push(Constraint::new(&label, relation.comparator, lhs, rhs));
        }
        // endregion Constraints

        Ok(Problem {
            objective,
            variables,
            constraints,
        })
    }

    /// The objective, in the backend's minimize-only form
    pub fn objective(&self) -> &Objective<Q> {
        &self.objective
    }

    /// The decision variables, keyed by id, in declaration order
    pub fn variables(&self) -> &IndexMap<String, Variable> {
        &self.variables
    }

    /// The labeled constraints, in declaration order
    pub fn constraints(&self) -> &[Constraint<Q>] {
        &self.constraints
    }
}

/// Check a formula against the configured depth limit, if one is set
fn enforce_depth_limit(tree: &Formula) -> Result<(), ProblemError> {
    let limit = CONFIGURATION.read().unwrap().max_formula_depth;
    if let Some(limit) = limit {
        let depth = tree.depth();
        if depth > limit {
            return Err(ProblemError::FormulaTooDeep { depth, limit });
        }
    }
    Ok(())
}

/// Errors associated with building a Problem
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProblemError {
    /// Formula construction or evaluation failed
    #[error(transparent)]
    Formula(#[from] FormulaError),
    /// Tried to declare the same variable cell twice
    #[error("Tried to declare variable cell {0} more than once")]
    DuplicateVariable(String),
    /// A constraint bound referenced a decision variable; bounds must be
    /// constant expressions
    #[error("Constraint right-hand side references decision variable {variable}")]
    VariableInConstraintBound { variable: String },
    /// A formula exceeded the configured depth limit
    #[error("Formula depth {depth} exceeds the configured limit of {limit}")]
    FormulaTooDeep { depth: usize, limit: usize },
}
