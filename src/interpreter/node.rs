use std::fmt;

use crate::{
    ast::{NodeTag, UnaryOperator},
    interpreter::registry::{NodeId, NodeKind, Registry},
    util::num::approx_eq,
};

/// A handle to one expression node.
///
/// Nodes are immutable once built. Cloning a `Node` is cheap: it copies the
/// index and the registry handle, never the tree.
///
/// Equality is structural. Variable leaves compare by name, literal leaves
/// compare within [`LITERAL_TOLERANCE`](crate::util::num::LITERAL_TOLERANCE),
/// and `+`/`*` nodes also match when their operands are swapped. A negated
/// literal equals the literal of opposite sign, since both print as `-2`.
#[derive(Clone)]
pub struct Node {
    pub(crate) id: NodeId,
    registry:      Registry,
}

impl Node {
    pub(crate) const fn new(id: NodeId, registry: Registry) -> Self {
        Self { id, registry }
    }

    /// The registry that owns this node.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The arena index of this node.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    pub(crate) fn kind(&self) -> NodeKind {
        self.registry.kind(self.id)
    }

    pub(crate) fn at(&self, id: NodeId) -> Self {
        self.registry.node(id)
    }

    /// The node's tag.
    ///
    /// ## Example
    /// ```
    /// use kinexpr::{
    ///     ast::{BinaryOperator, NodeTag},
    ///     interpreter::registry::Registry,
    /// };
    ///
    /// let registry = Registry::new();
    /// let node = registry.interpret_node("atan2(y, x)").unwrap();
    /// assert_eq!(node.tag(), NodeTag::Binary(BinaryOperator::Atan2));
    /// ```
    #[must_use]
    pub fn tag(&self) -> NodeTag {
        match self.kind() {
            NodeKind::Variable(_) => NodeTag::Name,
            NodeKind::Literal(_) => NodeTag::Literal,
            NodeKind::Unary { op, .. } => NodeTag::Unary(op),
            NodeKind::Binary { op, .. } => NodeTag::Binary(op),
        }
    }

    /// The value of a literal leaf, `None` for every other node.
    #[must_use]
    pub fn literal_value(&self) -> Option<f64> {
        match self.kind() {
            NodeKind::Literal(value) => Some(value),
            _ => None,
        }
    }

    /// The name of a variable leaf, `None` for every other node.
    #[must_use]
    pub fn variable_name(&self) -> Option<String> {
        match self.kind() {
            NodeKind::Variable(var) => Some(self.registry.variable_name(var)),
            _ => None,
        }
    }

    /// The node's children, left to right.
    #[must_use]
    pub fn children(&self) -> Vec<Self> {
        match self.kind() {
            NodeKind::Variable(_) | NodeKind::Literal(_) => Vec::new(),
            NodeKind::Unary { child, .. } => vec![self.at(child)],
            NodeKind::Binary { lhs, rhs, .. } => vec![self.at(lhs), self.at(rhs)],
        }
    }

    /// Wraps this node in a unary negation.
    #[must_use]
    pub fn negate(&self) -> Self {
        self.registry.push(NodeKind::Unary { op:    UnaryOperator::Negate,
                                             child: self.id, })
    }

    /// Prints the node in its canonical, fully parenthesized form.
    ///
    /// Binary nodes print as `(a + b)`, `atan2` as `atan2(a, b)`, unary
    /// functions as `sin(a)` and negation as `-a`. The same tree always
    /// prints the same string, regardless of how it was built.
    ///
    /// ## Example
    /// ```
    /// use kinexpr::interpreter::registry::Registry;
    ///
    /// let registry = Registry::new();
    /// let node = registry.interpret_node("2+sin(x)*-y^2").unwrap();
    /// assert_eq!(node.unparse(), "(2 + (sin(x) * (-y ^ 2)))");
    /// ```
    #[must_use]
    pub fn unparse(&self) -> String {
        self.to_string()
    }

    /// The value of a literal, or of a negation applied directly to one.
    ///
    /// `-2` prints the same for both trees, so both compare as the literal.
    fn signed_literal(&self) -> Option<f64> {
        match self.kind() {
            NodeKind::Literal(value) => Some(value),
            NodeKind::Unary { op: UnaryOperator::Negate,
                              child, } => self.at(child).literal_value().map(|v| -v),
            _ => None,
        }
    }

    fn same_structure(&self, other: &Self) -> bool {
        if let (Some(a), Some(b)) = (self.signed_literal(), other.signed_literal()) {
            return approx_eq(a, b);
        }
        match (self.kind(), other.kind()) {
            (NodeKind::Variable(a), NodeKind::Variable(b)) => {
                if self.registry.same_as(&other.registry) {
                    a == b
                } else {
                    self.registry.variable_name(a) == other.registry.variable_name(b)
                }
            },
            (NodeKind::Literal(a), NodeKind::Literal(b)) => approx_eq(a, b),
            (NodeKind::Unary { op: a, child: ca }, NodeKind::Unary { op: b, child: cb }) => {
                a == b && self.at(ca).same_structure(&other.at(cb))
            },
            (NodeKind::Binary { op: a,
                                lhs: la,
                                rhs: ra, },
             NodeKind::Binary { op: b,
                                lhs: lb,
                                rhs: rb, }) => {
                if a != b {
                    return false;
                }
                let (la, ra, lb, rb) = (self.at(la), self.at(ra), other.at(lb), other.at(rb));
                (la.same_structure(&lb) && ra.same_structure(&rb))
                || (a.is_commutative() && la.same_structure(&rb) && ra.same_structure(&lb))
            },
            _ => false,
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.same_structure(other)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            NodeKind::Variable(var) => write!(f, "{}", self.registry.variable_name(var)),
            NodeKind::Literal(value) => write!(f, "{value}"),
            NodeKind::Unary { op, child } => match op {
                UnaryOperator::Negate => write!(f, "-{}", self.at(child)),
                _ => write!(f, "{}({})", op.name(), self.at(child)),
            },
            NodeKind::Binary { op, lhs, rhs } => match op.symbol() {
                Some(symbol) => write!(f, "({} {symbol} {})", self.at(lhs), self.at(rhs)),
                None => write!(f, "{}({}, {})", op.name(), self.at(lhs), self.at(rhs)),
            },
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({self})")
    }
}
