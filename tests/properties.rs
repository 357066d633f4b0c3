//! Property-based tests for printing and simplification.
//!
//! Trees are built directly through the registry constructors, never by
//! parsing, so that printing and re-reading can be checked against an
//! independent source of truth.

use kinexpr::{
    ast::{BinaryOperator, UnaryOperator},
    interpreter::{node::Node, registry::Registry},
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Shape {
    Var(String),
    Lit(f64),
    Neg(Box<Shape>),
    Call(UnaryOperator, Box<Shape>),
    Bin(BinaryOperator, Box<Shape>, Box<Shape>),
}

const FUNCTIONS: [UnaryOperator; 6] = [UnaryOperator::Sin,
                                       UnaryOperator::Cos,
                                       UnaryOperator::Tan,
                                       UnaryOperator::Asin,
                                       UnaryOperator::Acos,
                                       UnaryOperator::Atan];

const BINARY: [BinaryOperator; 7] = [BinaryOperator::Plus,
                                     BinaryOperator::Minus,
                                     BinaryOperator::Mul,
                                     BinaryOperator::Div,
                                     BinaryOperator::Remainder,
                                     BinaryOperator::Exp,
                                     BinaryOperator::Atan2];

fn shape_strategy() -> impl Strategy<Value = Shape> {
    shapes_over(BINARY.to_vec())
}

/// Generate expression shapes whose binary nodes use `operators`.
///
/// Literals are non-negative and finite; negative values come from negating
/// them. Names cover the whole identifier grammar.
fn shapes_over(operators: Vec<BinaryOperator>) -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![
        "[a-zA-Z_][a-zA-Z0-9_]{0,5}".prop_map(Shape::Var),
        (0u32..1000).prop_map(|v| Shape::Lit(f64::from(v))),
        (0u32..10_000).prop_map(|v| Shape::Lit(f64::from(v) / 100.0)),
    ];

    leaf.prop_recursive(4, 32, 2, move |inner| {
            prop_oneof![
                inner.clone().prop_map(|s| match s {
                                 Shape::Neg(_) => s,
                                 other => Shape::Neg(Box::new(other)),
                             }),
                (prop::sample::select(FUNCTIONS.to_vec()), inner.clone())
                    .prop_map(|(op, s)| Shape::Call(op, Box::new(s))),
                (prop::sample::select(operators.clone()), inner.clone(), inner)
                    .prop_map(|(op, l, r)| Shape::Bin(op, Box::new(l), Box::new(r))),
            ]
        })
}

fn build(registry: &Registry, shape: &Shape) -> Node {
    match shape {
        Shape::Var(name) => registry.variable(name),
        Shape::Lit(value) => registry.literal(*value),
        Shape::Neg(child) => build(registry, child).negate(),
        Shape::Call(op, child) => registry.unary(*op, &build(registry, child)).unwrap(),
        Shape::Bin(op, lhs, rhs) => {
            registry.binary(*op, &build(registry, lhs), &build(registry, rhs))
                    .unwrap()
        },
    }
}

#[cfg(test)]
mod proptest_tests {
    use super::*;

    proptest! {
        #[test]
        fn printed_trees_read_back_equal(shape in shape_strategy()) {
            let registry = Registry::new();
            let node = build(&registry, &shape);
            let printed = node.unparse();

            let parsed = registry.interpret_node(&printed);
            prop_assert!(parsed.is_ok(), "Failed to read back: {}", printed);
            let parsed = parsed.unwrap();
            prop_assert_eq!(parsed.unparse(), printed.clone());
            prop_assert!(parsed == node, "Read back a different tree from {}", printed);
        }

        #[test]
        fn simplify_is_idempotent(shape in shape_strategy()) {
            let registry = Registry::new();
            let once = build(&registry, &shape).simplify();
            let twice = once.simplify();

            // Compared as text: a NaN literal is never equal to itself.
            prop_assert_eq!(twice.unparse(), once.unparse());
        }

        // `x % 1` simplifies to `x`, which is not value preserving.
        #[test]
        fn simplify_preserves_value(shape in shapes_over(BINARY.iter()
                                                               .copied()
                                                               .filter(|op| *op != BinaryOperator::Remainder)
                                                               .collect()),
                                    x in -3.0f64..3.0) {
            let registry = Registry::new();
            let node = build(&registry, &shape);
            for name in registry.variables() {
                registry.set_variable(&name, x).unwrap();
            }

            let before = node.eval().unwrap();
            let after = node.simplify().eval().unwrap();
            if before.is_finite() && after.is_finite() {
                prop_assert!((before - after).abs() <= 1e-9 * before.abs().max(1.0),
                             "{} = {} but simplified to {}", node, before, after);
            }
        }
    }
}
