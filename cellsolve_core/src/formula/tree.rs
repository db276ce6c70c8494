//! Expression tree representation of a spreadsheet formula, with
//! construction from the JSON AST and evaluation under a variable
//! substitution
use std::fmt::{Display, Formatter};

use indexmap::IndexMap;

use crate::formula::ast::AstNode;
use crate::formula::operator::{Comparator, Operator};
use crate::formula::FormulaError;
use crate::numeric::Quantity;

/// An arithmetic expression tree
///
/// A strict tree: every node exclusively owns its children, so a formula can
/// neither share subtrees nor contain cycles.
#[derive(Debug, Clone, PartialEq)]
pub enum Formula {
    /// Application of an operator to child subtrees (see [`Operator`])
    Function {
        operator: Operator,
        children: Vec<Formula>,
    },
    /// A terminal leaf (see [`Terminal`])
    Terminal(Terminal),
}

/// Leaf of an expression tree
///
/// The node type of the source AST decides the classification once, at
/// construction: a `cell` node is always a variable reference and a `number`
/// node is always a literal, whatever the declared variable set contains.
#[derive(Debug, Clone, PartialEq)]
pub enum Terminal {
    /// Reference to a decision variable, resolved against the substitution
    /// at evaluation time
    Variable(String),
    /// A literal value
    Literal(f64),
}

impl Formula {
    /// Create a new variable reference node
    pub fn variable(name: &str) -> Formula {
        Formula::Terminal(Terminal::Variable(name.to_string()))
    }

    /// Create a new literal node
    pub fn literal(value: f64) -> Formula {
        Formula::Terminal(Terminal::Literal(value))
    }

    /// Create a new function node, checking the operand count against the
    /// operator's declared arity
    pub fn function(operator: Operator, children: Vec<Formula>) -> Result<Formula, FormulaError> {
        if children.len() != operator.arity() {
            return Err(FormulaError::ArityMismatch {
                operator: operator.symbol().to_string(),
                expected: operator.arity(),
                actual: children.len(),
            });
        }
        Ok(Formula::Function { operator, children })
    }

    /// Build an arithmetic formula tree from a JSON AST node
    ///
    /// Variable existence is never validated here; a `cell` node always
    /// constructs, and resolution happens at evaluation time. A relational
    /// comparator anywhere in the input is an error, those are only legal at
    /// the top of a constraint (see [`Relation::from_ast`]).
    ///
    /// # Examples
    /// ```rust
    /// use cellsolve_core::formula::ast::AstNode;
    /// use cellsolve_core::formula::tree::Formula;
    /// let node: AstNode = serde_json::from_str(
    ///     r#"{"type": "binary-expression", "operator": "+",
    ///         "left": {"type": "cell", "key": "$C$3"},
    ///         "right": {"type": "number", "value": 2}}"#,
    /// )
    /// .unwrap();
    /// let formula = Formula::from_ast(&node).unwrap();
    /// assert_eq!(formula.to_string(), "(+ $C$3 2)");
    /// ```
    pub fn from_ast(node: &AstNode) -> Result<Formula, FormulaError> {
        match node {
            AstNode::BinaryExpression {
                operator,
                left,
                right,
            } => {
                if Comparator::from_symbol(operator).is_some() {
                    return Err(FormulaError::NestedRelational(operator.clone()));
                }
                let operator = Operator::from_symbol(operator)
                    .ok_or_else(|| FormulaError::UnknownOperator(operator.clone()))?;
                let children = vec![Formula::from_ast(left)?, Formula::from_ast(right)?];
                Formula::function(operator, children)
            }
            AstNode::Cell { key } => Ok(Formula::variable(key)),
            AstNode::Number { value } => Ok(Formula::literal(value.as_f64()?)),
        }
    }

    /// Evaluate the tree under a substitution of variable names for values
    ///
    /// Children are evaluated first, left to right, with no short
    /// circuiting, then the operator's safe implementation is applied to the
    /// results in order. A variable missing from the substitution is an
    /// [`FormulaError::UnboundVariable`] error, never a silent default.
    pub fn eval<Q: Quantity>(
        &self,
        substitution: &IndexMap<String, Q>,
    ) -> Result<Q, FormulaError> {
        match self {
            Formula::Terminal(Terminal::Literal(value)) => Ok(Q::from_literal(*value)),
            Formula::Terminal(Terminal::Variable(name)) => substitution
                .get(name)
                .cloned()
                .ok_or_else(|| FormulaError::UnboundVariable(name.clone())),
            Formula::Function { operator, children } => {
                // Calculate the values of children nodes
                let mut operands = Vec::with_capacity(children.len());
                for child in children {
                    operands.push(child.eval(substitution)?);
                }
                operator.apply(&operands)
            }
        }
    }

    /// Total depth of the tree rooted at this node, 0 for a terminal
    pub fn depth(&self) -> usize {
        match self {
            Formula::Terminal(_) => 0,
            Formula::Function { children, .. } => {
                1 + children.iter().map(Formula::depth).max().unwrap_or(0)
            }
        }
    }

    /// Size of the tree rooted at this node, in number of nodes
    pub fn size(&self) -> usize {
        match self {
            Formula::Terminal(_) => 1,
            Formula::Function { children, .. } => {
                1 + children.iter().map(Formula::size).sum::<usize>()
            }
        }
    }

    /// All variable names referenced by the tree, sorted and deduplicated
    pub fn variables(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.collect_variables(&mut names);
        names.sort();
        names.dedup();
        names
    }

    fn collect_variables(&self, names: &mut Vec<String>) {
        match self {
            Formula::Terminal(Terminal::Variable(name)) => names.push(name.clone()),
            Formula::Terminal(Terminal::Literal(_)) => {}
            Formula::Function { children, .. } => {
                for child in children {
                    child.collect_variables(names);
                }
            }
        }
    }
}

impl Display for Formula {
    /// Renders the tree in fully parenthesized prefix form, e.g.
    /// `(+ $C$3 (* 2 $D$3))`, a pure function of tree structure used to
    /// derive deterministic constraint labels
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Formula::Terminal(terminal) => write!(f, "{}", terminal),
            Formula::Function { operator, children } => {
                write!(f, "({}", operator)?;
                for child in children {
                    write!(f, " {}", child)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl Display for Terminal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Terminal::Variable(name) => write!(f, "{}", name),
            Terminal::Literal(value) => write!(f, "{}", value),
        }
    }
}

/// A relational constraint expression: comparator plus two subtrees
///
/// Distinct from [`Formula`] on purpose: a relation is never evaluated to a
/// number, it is only decomposed into its parts by the model builder, and
/// the type split makes a comparator inside an arithmetic operand
/// unrepresentable.
#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    pub comparator: Comparator,
    pub left: Formula,
    pub right: Formula,
}

impl Relation {
    /// Build a relational constraint from a JSON AST node
    ///
    /// The top node must be a `binary-expression` carrying a comparator;
    /// both sides are ordinary arithmetic trees.
    pub fn from_ast(node: &AstNode) -> Result<Relation, FormulaError> {
        match node {
            AstNode::BinaryExpression {
                operator,
                left,
                right,
            } => {
                let comparator = match Comparator::from_symbol(operator) {
                    Some(comparator) => comparator,
                    None if Operator::from_symbol(operator).is_some() => {
                        return Err(FormulaError::ExpectedRelation)
                    }
                    None => return Err(FormulaError::UnknownOperator(operator.clone())),
                };
                Ok(Relation {
                    comparator,
                    left: Formula::from_ast(left)?,
                    right: Formula::from_ast(right)?,
                })
            }
            AstNode::Cell { .. } | AstNode::Number { .. } => Err(FormulaError::ExpectedRelation),
        }
    }
}

impl Display for Relation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {} {})", self.comparator, self.left, self.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::MAX_MAGNITUDE;
    use serde_json::json;

    fn ast(value: serde_json::Value) -> AstNode {
        serde_json::from_value(value).unwrap()
    }

    fn substitution(pairs: &[(&str, f64)]) -> IndexMap<String, f64> {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect()
    }

    #[test]
    fn build_literal() {
        let tree = Formula::from_ast(&ast(json!({"type": "number", "value": 5}))).unwrap();
        assert_eq!(tree, Formula::literal(5.0));
        assert_eq!(tree.eval(&IndexMap::<String, f64>::new()).unwrap(), 5.0);
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.size(), 1);
    }

    #[test]
    fn build_literal_from_string_value() {
        let tree = Formula::from_ast(&ast(json!({"type": "number", "value": "2.5"}))).unwrap();
        assert_eq!(tree, Formula::literal(2.5));
    }

    #[test]
    fn build_cell_reference() {
        let tree = Formula::from_ast(&ast(json!({"type": "cell", "key": "$C$3"}))).unwrap();
        assert_eq!(tree, Formula::variable("$C$3"));
        assert_eq!(tree.eval(&substitution(&[("$C$3", 3.0)])).unwrap(), 3.0);
    }

    #[test]
    fn undeclared_cell_builds_but_fails_to_evaluate() {
        // Construction never validates variable existence
        let tree = Formula::from_ast(&ast(json!({"type": "cell", "key": "$Z$9"}))).unwrap();
        match tree.eval(&IndexMap::<String, f64>::new()) {
            Err(FormulaError::UnboundVariable(name)) => assert_eq!(name, "$Z$9"),
            other => panic!("Expected unbound variable error, got {:?}", other),
        }
    }

    #[test]
    fn build_and_evaluate_nested_expression() {
        // (+ x (* 2 y)) with {x: 3, y: 4} is 11
        let tree = Formula::from_ast(&ast(json!({
            "type": "binary-expression",
            "operator": "+",
            "left": {"type": "cell", "key": "x"},
            "right": {
                "type": "binary-expression",
                "operator": "*",
                "left": {"type": "number", "value": 2},
                "right": {"type": "cell", "key": "y"},
            },
        })))
        .unwrap();
        assert_eq!(
            tree.eval(&substitution(&[("x", 3.0), ("y", 4.0)])).unwrap(),
            11.0
        );
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.size(), 5);
        assert_eq!(tree.to_string(), "(+ x (* 2 y))");
    }

    #[test]
    fn structure_is_invariant_to_substitution() {
        let tree = Formula::from_ast(&ast(json!({
            "type": "binary-expression",
            "operator": "-",
            "left": {"type": "cell", "key": "x"},
            "right": {"type": "number", "value": 1},
        })))
        .unwrap();
        let size_before = tree.size();
        tree.eval(&substitution(&[("x", 1.0)])).unwrap();
        tree.eval(&substitution(&[("x", -250.0)])).unwrap();
        assert_eq!(tree.size(), size_before);
        assert_eq!(tree.depth(), 1);
    }

    #[test]
    fn depth_and_size_recursions() {
        // Chain of additions of increasing depth
        let mut tree = Formula::literal(0.0);
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.size(), 1);
        for level in 1..=5 {
            tree = Formula::function(Operator::Add, vec![tree, Formula::literal(level as f64)])
                .unwrap();
            assert_eq!(tree.depth(), level);
            assert_eq!(tree.size(), 2 * level + 1);
        }
    }

    #[test]
    fn unknown_operator_fails_at_construction() {
        let result = Formula::from_ast(&ast(json!({
            "type": "binary-expression",
            "operator": "^",
            "left": {"type": "number", "value": 2},
            "right": {"type": "number", "value": 3},
        })));
        match result {
            Err(FormulaError::UnknownOperator(symbol)) => assert_eq!(symbol, "^"),
            other => panic!("Expected unknown operator error, got {:?}", other),
        }
    }

    #[test]
    fn unary_operator_in_binary_node_is_an_arity_mismatch() {
        let result = Formula::from_ast(&ast(json!({
            "type": "binary-expression",
            "operator": "exp",
            "left": {"type": "number", "value": 1},
            "right": {"type": "number", "value": 2},
        })));
        match result {
            Err(FormulaError::ArityMismatch {
                operator,
                expected,
                actual,
            }) => {
                assert_eq!(operator, "exp");
                assert_eq!(expected, 1);
                assert_eq!(actual, 2);
            }
            other => panic!("Expected arity mismatch, got {:?}", other),
        }
    }

    #[test]
    fn relational_operator_cannot_nest_inside_arithmetic() {
        let result = Formula::from_ast(&ast(json!({
            "type": "binary-expression",
            "operator": "+",
            "left": {
                "type": "binary-expression",
                "operator": ">=",
                "left": {"type": "cell", "key": "x"},
                "right": {"type": "number", "value": 1},
            },
            "right": {"type": "number", "value": 2},
        })));
        match result {
            Err(FormulaError::NestedRelational(symbol)) => assert_eq!(symbol, ">="),
            other => panic!("Expected nested relational error, got {:?}", other),
        }
    }

    #[test]
    fn programmatic_unary_functions() {
        let tree = Formula::function(Operator::Exp, vec![Formula::literal(0.0)]).unwrap();
        assert_eq!(tree.eval(&IndexMap::<String, f64>::new()).unwrap(), 1.0);
        assert_eq!(tree.to_string(), "(exp 0)");

        let tree = Formula::function(Operator::Cos, vec![Formula::literal(0.0)]).unwrap();
        assert_eq!(tree.eval(&IndexMap::<String, f64>::new()).unwrap(), 1.0);
    }

    #[test]
    fn programmatic_arity_mismatch() {
        match Formula::function(Operator::Add, vec![Formula::literal(1.0)]) {
            Err(FormulaError::ArityMismatch { expected, actual, .. }) => {
                assert_eq!(expected, 2);
                assert_eq!(actual, 1);
            }
            other => panic!("Expected arity mismatch, got {:?}", other),
        }
    }

    #[test]
    fn evaluation_uses_safe_division() {
        let tree = Formula::from_ast(&ast(json!({
            "type": "binary-expression",
            "operator": "/",
            "left": {"type": "number", "value": 10},
            "right": {"type": "number", "value": 0},
        })))
        .unwrap();
        assert_eq!(
            tree.eval(&IndexMap::<String, f64>::new()).unwrap(),
            MAX_MAGNITUDE
        );
    }

    #[test]
    fn rendering_round_trips_through_an_equivalent_ast() {
        let original = Formula::from_ast(&ast(json!({
            "type": "binary-expression",
            "operator": "*",
            "left": {
                "type": "binary-expression",
                "operator": "-",
                "left": {"type": "cell", "key": "$C$3"},
                "right": {"type": "number", "value": 4},
            },
            "right": {"type": "cell", "key": "$D$3"},
        })))
        .unwrap();
        assert_eq!(original.to_string(), "(* (- $C$3 4) $D$3)");

        // Hand-written AST matching the rendering reconstructs an identical tree
        let reparsed = Formula::from_ast(&ast(json!({
            "type": "binary-expression",
            "operator": "*",
            "left": {
                "type": "binary-expression",
                "operator": "-",
                "left": {"type": "cell", "key": "$C$3"},
                "right": {"type": "number", "value": 4},
            },
            "right": {"type": "cell", "key": "$D$3"},
        })))
        .unwrap();
        assert_eq!(original, reparsed);
        assert_eq!(original.to_string(), reparsed.to_string());
    }

    #[test]
    fn variable_collection_is_sorted_and_deduplicated() {
        let tree = Formula::from_ast(&ast(json!({
            "type": "binary-expression",
            "operator": "+",
            "left": {
                "type": "binary-expression",
                "operator": "*",
                "left": {"type": "cell", "key": "y"},
                "right": {"type": "cell", "key": "x"},
            },
            "right": {"type": "cell", "key": "y"},
        })))
        .unwrap();
        assert_eq!(tree.variables(), vec!["x".to_string(), "y".to_string()]);
        assert_eq!(Formula::literal(2.0).variables(), Vec::<String>::new());
    }

    #[test]
    fn relation_from_ast() {
        let relation = Relation::from_ast(&ast(json!({
            "type": "binary-expression",
            "operator": ">=",
            "left": {"type": "cell", "key": "x"},
            "right": {"type": "number", "value": 5},
        })))
        .unwrap();
        assert_eq!(relation.comparator, Comparator::GreaterEqual);
        assert_eq!(
            relation.left.eval(&substitution(&[("x", 3.0)])).unwrap(),
            3.0
        );
        assert_eq!(
            relation
                .right
                .eval(&IndexMap::<String, f64>::new())
                .unwrap(),
            5.0
        );
        assert_eq!(relation.to_string(), "(>= x 5)");
    }

    #[test]
    fn relation_accepts_both_equality_spellings() {
        for symbol in ["=", "=="] {
            let relation = Relation::from_ast(&ast(json!({
                "type": "binary-expression",
                "operator": symbol,
                "left": {"type": "cell", "key": "x"},
                "right": {"type": "number", "value": 1},
            })))
            .unwrap();
            assert_eq!(relation.comparator, Comparator::Equal);
        }
    }

    #[test]
    fn relation_requires_a_relational_top_node() {
        let result = Relation::from_ast(&ast(json!({
            "type": "binary-expression",
            "operator": "+",
            "left": {"type": "cell", "key": "x"},
            "right": {"type": "number", "value": 1},
        })));
        assert_eq!(result, Err(FormulaError::ExpectedRelation));

        let result = Relation::from_ast(&ast(json!({"type": "cell", "key": "x"})));
        assert_eq!(result, Err(FormulaError::ExpectedRelation));
    }

    #[test]
    fn relation_rejects_comparator_below_the_top() {
        let result = Relation::from_ast(&ast(json!({
            "type": "binary-expression",
            "operator": "<=",
            "left": {
                "type": "binary-expression",
                "operator": "=",
                "left": {"type": "cell", "key": "x"},
                "right": {"type": "number", "value": 1},
            },
            "right": {"type": "number", "value": 2},
        })));
        match result {
            Err(FormulaError::NestedRelational(symbol)) => assert_eq!(symbol, "="),
            other => panic!("Expected nested relational error, got {:?}", other),
        }
    }
}
