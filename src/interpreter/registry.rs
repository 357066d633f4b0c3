use std::{cell::RefCell, collections::HashMap, rc::Rc};

use tracing::trace;

use crate::{
    ast::{Arity, BinaryOperator, UnaryOperator},
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        matrix::Matrix,
        node::Node,
        parser::core::{ParseResult, interpret_list_of_nodes, interpret_matrix, interpret_node},
    },
};

/// Index of a node inside its registry's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Index of an interned variable inside its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VariableId(usize);

/// The stored shape of one node. Children are referenced by index, so the
/// whole enum is `Copy` and can be read out of the arena without holding a
/// borrow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum NodeKind {
    Variable(VariableId),
    Literal(f64),
    Unary {
        op:    UnaryOperator,
        child: NodeId,
    },
    Binary {
        op:  BinaryOperator,
        lhs: NodeId,
        rhs: NodeId,
    },
}

#[derive(Debug)]
struct Variable {
    name:  String,
    leaf:  NodeId,
    value: Option<f64>,
}

#[derive(Debug, Default)]
struct Arena {
    nodes:     Vec<NodeKind>,
    variables: Vec<Variable>,
    by_name:   HashMap<String, VariableId>,
}

thread_local! {
    static SHARED: Registry = Registry::new();
}

/// Owns every node of one expression universe.
///
/// The registry is an arena: nodes are appended and never removed, and a
/// [`Node`] is an index into it plus a cloned handle to the registry. Variable
/// leaves are interned, so the same name always yields the same node, and
/// their values live in a side table that can be rebound at any time without
/// rebuilding trees.
///
/// Cloning a `Registry` clones the handle, not the arena. Nodes from two
/// distinct registries must never be combined; constructors report
/// [`RuntimeError::IncompatibleRegistry`] when they are.
///
/// ## Usage
/// ```
/// use kinexpr::interpreter::registry::Registry;
///
/// let registry = Registry::new();
/// let node = registry.interpret_node("2 * a + 1").unwrap();
///
/// registry.set_variable("a", 3.0).unwrap();
/// assert_eq!(node.eval().unwrap(), 7.0);
///
/// registry.set_variable("a", 0.5).unwrap();
/// assert_eq!(node.eval().unwrap(), 2.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Registry {
    arena: Rc<RefCell<Arena>>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a handle to this thread's shared registry.
    ///
    /// Handy for one-off expressions. Anything that needs an isolated set of
    /// variables should create its own registry instead.
    #[must_use]
    pub fn shared() -> Self {
        SHARED.with(Clone::clone)
    }

    /// Returns `true` when both handles refer to the same arena.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.arena, &other.arena)
    }

    /// Number of nodes allocated so far.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.arena.borrow().nodes.len()
    }

    /// Builds a literal leaf.
    #[must_use]
    pub fn literal(&self, value: f64) -> Node {
        self.push(NodeKind::Literal(value))
    }

    /// Returns the interned leaf for `name`, creating it on first use.
    #[must_use]
    pub fn variable(&self, name: &str) -> Node {
        let existing = self.arena.borrow().by_name.get(name).copied();
        if let Some(var) = existing {
            let leaf = self.arena.borrow().variables[var.0].leaf;
            return self.node(leaf);
        }

        let var = VariableId(self.arena.borrow().variables.len());
        let node = self.push(NodeKind::Variable(var));
        let mut arena = self.arena.borrow_mut();
        arena.variables.push(Variable { name:  name.to_string(),
                                        leaf:  node.id,
                                        value: None, });
        arena.by_name.insert(name.to_string(), var);
        trace!(name, "interned variable");
        node
    }

    /// Builds a unary node.
    ///
    /// # Errors
    /// `IncompatibleRegistry` if `child` belongs to another registry.
    pub fn unary(&self, op: UnaryOperator, child: &Node) -> EvalResult<Node> {
        self.check(child)?;
        Ok(self.push(NodeKind::Unary { op,
                                       child: child.id }))
    }

    /// Builds a binary node.
    ///
    /// # Errors
    /// `IncompatibleRegistry` if either operand belongs to another registry.
    pub fn binary(&self, op: BinaryOperator, lhs: &Node, rhs: &Node) -> EvalResult<Node> {
        self.check(lhs)?;
        self.check(rhs)?;
        Ok(self.push(NodeKind::Binary { op,
                                        lhs: lhs.id,
                                        rhs: rhs.id }))
    }

    /// Builds a unary node from an operator name or symbol (`"sin"`, `"-"`).
    ///
    /// # Errors
    /// - `BadOperator` if the name is not a unary operator.
    /// - `IncompatibleRegistry` if `child` belongs to another registry.
    pub fn unary_named(&self, name: &str, child: &Node) -> EvalResult<Node> {
        let op = UnaryOperator::from_name(name).ok_or_else(|| {
                                                    RuntimeError::BadOperator { operator:
                                                                                    name.to_string(),
                                                                                arity: Arity::Unary }
                                                })?;
        self.unary(op, child)
    }

    /// Builds a binary node from an operator name or symbol (`"*"`,
    /// `"atan2"`).
    ///
    /// # Errors
    /// - `BadOperator` if the name is not a binary operator.
    /// - `IncompatibleRegistry` if an operand belongs to another registry.
    pub fn binary_named(&self, name: &str, lhs: &Node, rhs: &Node) -> EvalResult<Node> {
        let op = BinaryOperator::from_name(name).ok_or_else(|| {
                                                     RuntimeError::BadOperator { operator:
                                                                                     name.to_string(),
                                                                                 arity: Arity::Binary }
                                                 })?;
        self.binary(op, lhs, rhs)
    }

    /// Binds `value` to the variable `name`, replacing any previous value.
    ///
    /// The leaf itself is unchanged; every tree that references it sees the
    /// new value on its next evaluation.
    ///
    /// # Errors
    /// `UnknownVariable` if no expression in this registry has referenced
    /// `name`.
    pub fn set_variable(&self, name: &str, value: f64) -> EvalResult<()> {
        let mut arena = self.arena.borrow_mut();
        let Some(&var) = arena.by_name.get(name) else {
            return Err(RuntimeError::UnknownVariable { name: name.to_string(),
                                                       value });
        };
        arena.variables[var.0].value = Some(value);
        trace!(name, value, "bound variable");
        Ok(())
    }

    /// Removes the value bound to `name` and returns it.
    ///
    /// Returns `None` when the variable is unknown or was not bound.
    pub fn unset_variable(&self, name: &str) -> Option<f64> {
        let mut arena = self.arena.borrow_mut();
        let var = *arena.by_name.get(name)?;
        arena.variables[var.0].value.take()
    }

    /// The value currently bound to `name`, if any.
    #[must_use]
    pub fn value_of(&self, name: &str) -> Option<f64> {
        let arena = self.arena.borrow();
        let var = arena.by_name.get(name)?;
        arena.variables[var.0].value
    }

    /// Names of all interned variables, in order of first reference.
    #[must_use]
    pub fn variables(&self) -> Vec<String> {
        self.arena
            .borrow()
            .variables
            .iter()
            .map(|v| v.name.clone())
            .collect()
    }

    /// Interprets a single expression. See
    /// [`interpret_node`](crate::interpreter::parser::core::interpret_node).
    ///
    /// # Errors
    /// Any `ParseError` describing why the text is malformed.
    pub fn interpret_node(&self, text: &str) -> ParseResult<Node> {
        interpret_node(self, text)
    }

    /// Interprets a comma separated list of expressions.
    ///
    /// # Errors
    /// Any `ParseError` describing why an element is malformed.
    pub fn interpret_list_of_nodes(&self, text: &str) -> ParseResult<Vec<Node>> {
        interpret_list_of_nodes(self, text)
    }

    /// Interprets a `;` separated table of comma separated rows.
    ///
    /// # Errors
    /// Any `ParseError`, wrapped with the index of the failing row.
    pub fn interpret_matrix(&self, text: &str) -> ParseResult<Matrix> {
        interpret_matrix(self, text)
    }

    /// Fails with `IncompatibleRegistry` unless `node` lives in this registry.
    pub(crate) fn check(&self, node: &Node) -> EvalResult<()> {
        if self.same_as(node.registry()) {
            Ok(())
        } else {
            Err(RuntimeError::IncompatibleRegistry)
        }
    }

    pub(crate) fn push(&self, kind: NodeKind) -> Node {
        let mut arena = self.arena.borrow_mut();
        let id = NodeId(arena.nodes.len());
        arena.nodes.push(kind);
        drop(arena);
        self.node(id)
    }

    pub(crate) fn node(&self, id: NodeId) -> Node {
        Node::new(id, self.clone())
    }

    pub(crate) fn kind(&self, id: NodeId) -> NodeKind {
        self.arena.borrow().nodes[id.0]
    }

    pub(crate) fn variable_name(&self, var: VariableId) -> String {
        self.arena.borrow().variables[var.0].name.clone()
    }

    pub(crate) fn bound_value(&self, var: VariableId) -> Option<f64> {
        self.arena.borrow().variables[var.0].value
    }
}
