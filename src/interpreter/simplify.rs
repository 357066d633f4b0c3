use tracing::debug;

use crate::{
    ast::{BinaryOperator, UnaryOperator},
    interpreter::{
        evaluator::{binary::eval_binary, unary::eval_unary},
        node::Node,
        registry::{NodeId, NodeKind},
    },
    util::num::{is_one, is_zero},
};

impl Node {
    /// Simplifies the tree until its canonical form stops changing.
    ///
    /// Each pass simplifies children before their parent and applies, per
    /// node, the first matching rule:
    ///
    /// | Pattern | Result |
    /// | --- | --- |
    /// | operator over literal operands | folded literal |
    /// | `0 + x` | `x` |
    /// | `0 - x` | `-x` |
    /// | `0 * x`, `0 / x` | `0` |
    /// | `1 * x` | `x` |
    /// | `x + 0`, `x - 0` | `x` |
    /// | `x * 0` | `0` |
    /// | `x / 0` | `NaN` |
    /// | `x * 1`, `x / 1`, `x % 1`, `x ^ 1` | `x` |
    /// | `--x` | `x` |
    ///
    /// No rule grows the tree, so the loop terminates. Variables are left
    /// alone even when bound; see [`Node::substitute`].
    ///
    /// ## Example
    /// ```
    /// use kinexpr::interpreter::registry::Registry;
    ///
    /// let registry = Registry::new();
    /// let node = registry.interpret_node("(2 * 3 + 2) * (x ^ 1) + 0").unwrap();
    /// assert_eq!(node.simplify().unparse(), "(8 * x)");
    /// ```
    #[must_use]
    pub fn simplify(&self) -> Self {
        let mut current = self.clone();
        let mut printed = current.unparse();

        let mut pass = 0usize;
        loop {
            pass += 1;
            let next = simplify_step(&current);
            let next_printed = next.unparse();
            debug!(pass, before = %printed, after = %next_printed, "simplify");
            if next_printed == printed {
                return next;
            }
            current = next;
            printed = next_printed;
        }
    }

    /// Replaces every bound variable with a literal of its current value.
    ///
    /// Unbound variables are kept. Combined with [`Node::simplify`] this
    /// folds the parts of a tree that are fully determined.
    ///
    /// ## Example
    /// ```
    /// use kinexpr::interpreter::registry::Registry;
    ///
    /// let registry = Registry::new();
    /// let node = registry.interpret_node("a * b + 2 * b").unwrap();
    /// registry.set_variable("a", 3.0).unwrap();
    /// assert_eq!(node.substitute().simplify().unparse(), "((3 * b) + (2 * b))");
    /// ```
    #[must_use]
    pub fn substitute(&self) -> Self {
        match self.kind() {
            NodeKind::Variable(var) => match self.registry().bound_value(var) {
                Some(value) => self.registry().literal(value),
                None => self.clone(),
            },
            NodeKind::Literal(_) => self.clone(),
            NodeKind::Unary { op, child } => {
                let new_child = self.at(child).substitute();
                rebuild_unary(self, op, child, &new_child)
            },
            NodeKind::Binary { op, lhs, rhs } => {
                let new_lhs = self.at(lhs).substitute();
                let new_rhs = self.at(rhs).substitute();
                rebuild_binary(self, op, (lhs, rhs), &new_lhs, &new_rhs)
            },
        }
    }
}

/// One bottom-up rewrite pass.
fn simplify_step(node: &Node) -> Node {
    match node.kind() {
        NodeKind::Variable(_) | NodeKind::Literal(_) => node.clone(),
        NodeKind::Unary { op, child } => {
            let simplified = simplify_step(&node.at(child));
            rewrite_unary(op, &simplified).unwrap_or_else(|| {
                                               rebuild_unary(node, op, child, &simplified)
                                           })
        },
        NodeKind::Binary { op, lhs, rhs } => {
            let left = simplify_step(&node.at(lhs));
            let right = simplify_step(&node.at(rhs));
            rewrite_binary(op, &left, &right).unwrap_or_else(|| {
                                                 rebuild_binary(node, op, (lhs, rhs), &left, &right)
                                             })
        },
    }
}

fn rewrite_unary(op: UnaryOperator, child: &Node) -> Option<Node> {
    if let Some(value) = child.literal_value() {
        return Some(child.registry().literal(eval_unary(op, value)));
    }
    if op == UnaryOperator::Negate
       && let NodeKind::Unary { op: UnaryOperator::Negate,
                                child: inner, } = child.kind()
    {
        return Some(child.at(inner));
    }
    None
}

fn rewrite_binary(op: BinaryOperator, lhs: &Node, rhs: &Node) -> Option<Node> {
    use BinaryOperator::{Div, Exp, Minus, Mul, Plus, Remainder};

    let registry = lhs.registry();
    let (l, r) = (lhs.literal_value(), rhs.literal_value());

    if let (Some(l), Some(r)) = (l, r) {
        return Some(registry.literal(eval_binary(op, l, r)));
    }
    if l.is_some_and(is_zero) {
        match op {
            Plus => return Some(rhs.clone()),
            Minus => return Some(rhs.negate()),
            Mul | Div => return Some(lhs.clone()),
            _ => {},
        }
    }
    if l.is_some_and(is_one) && op == Mul {
        return Some(rhs.clone());
    }
    if r.is_some_and(is_zero) {
        match op {
            Plus | Minus => return Some(lhs.clone()),
            Mul => return Some(rhs.clone()),
            Div => return Some(registry.literal(f64::NAN)),
            _ => {},
        }
    }
    if r.is_some_and(is_one) && matches!(op, Mul | Div | Remainder | Exp) {
        return Some(lhs.clone());
    }
    None
}

/// Reuses `node` when its child is unchanged, otherwise allocates a new one.
fn rebuild_unary(node: &Node, op: UnaryOperator, old: NodeId, child: &Node) -> Node {
    if child.id == old {
        node.clone()
    } else {
        node.registry().push(NodeKind::Unary { op,
                                               child: child.id })
    }
}

fn rebuild_binary(node: &Node,
                  op: BinaryOperator,
                  old: (NodeId, NodeId),
                  lhs: &Node,
                  rhs: &Node)
                  -> Node {
    if (lhs.id, rhs.id) == old {
        node.clone()
    } else {
        node.registry().push(NodeKind::Binary { op,
                                                lhs: lhs.id,
                                                rhs: rhs.id })
    }
}
