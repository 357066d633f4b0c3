use kinexpr::{
    ast::{BinaryOperator, NodeTag, UnaryOperator},
    error::RuntimeError,
    interpreter::registry::Registry,
};
use rstest::rstest;

#[rstest]
#[case("mul(0, x)", "0")]
#[case("plus(x, 0)", "x")]
#[case("div(x, 1)", "x")]
#[case("plus(mul(2, 3), 2)", "8")]
#[case("0 - x", "-x")]
#[case("0 - (0 - x)", "x")]
#[case("x / 0", "NaN")]
#[case("(a + 0) * (1 * b) ^ 1", "(a * b)")]
#[case("atan2(y, x) * (sin(0) + 1)", "atan2(y, x)")]
#[case("-(2 * 3)", "-6")]
fn simplification_rules(#[case] text: &str, #[case] expected: &str) {
    let r = Registry::new();
    let node = r.interpret_node(text).unwrap();
    assert_eq!(node.simplify().unparse(), expected);
}

#[rstest]
#[case("mul(0, x)", "0")]
#[case("plus(mul(2, 3), 2)", "8")]
fn simplified_trees_equal_literals(#[case] text: &str, #[case] expected: &str) {
    let r = Registry::new();
    let simplified = r.interpret_node(text).unwrap().simplify();
    assert_eq!(simplified, r.interpret_node(expected).unwrap());
}

#[test]
fn simplify_is_idempotent_on_a_transform_cell() {
    let r = Registry::new();
    let node = r.interpret_node("cos(t1) * 0 + -sin(t1) * 1 + 0 * d1 + 0 * 1").unwrap();
    let once = node.simplify();
    assert_eq!(once.unparse(), "-sin(t1)");
    assert_eq!(once.simplify(), once);
}

#[test]
fn simplify_leaves_the_original_untouched() {
    let r = Registry::new();
    let node = r.interpret_node("x * 1").unwrap();
    let _ = node.simplify();
    assert_eq!(node.unparse(), "(x * 1)");
}

#[test]
fn unchanged_trees_are_not_copied() {
    let r = Registry::new();
    let node = r.interpret_node("a * b + sin(c)").unwrap();
    let count = r.node_count();
    let simplified = node.simplify();
    assert_eq!(simplified.id(), node.id());
    assert_eq!(r.node_count(), count);
}

#[test]
fn substitution_uses_current_bindings() {
    let r = Registry::new();
    let node = r.interpret_node("d * cos(t)").unwrap();
    r.set_variable("t", 0.0).unwrap();
    assert_eq!(node.substitute().simplify().unparse(), "d");

    r.unset_variable("t");
    assert_eq!(node.substitute().simplify().unparse(), "(d * cos(t))");
}

#[rstest]
#[case("a + b", "b + a", true)]
#[case("a * (b - c)", "(b - c) * a", true)]
#[case("a - b", "b - a", false)]
#[case("a / b", "b / a", false)]
#[case("a + b", "a + a", false)]
#[case("0.1 + 0.2", "0.1000000001 + 0.2", true)]
#[case("sin(a)", "cos(a)", false)]
#[case("-(2)", "-2", true)]
#[case("-(2) * x", "x * -2", true)]
#[case("-(2)", "2", false)]
fn structural_equality(#[case] left: &str, #[case] right: &str, #[case] equal: bool) {
    let r = Registry::new();
    let (l, rhs) = (r.interpret_node(left).unwrap(), r.interpret_node(right).unwrap());
    assert_eq!(l == rhs, equal, "'{left}' vs '{right}'");
}

#[test]
fn negated_literals_read_back_equal() {
    let r = Registry::new();
    let negated = r.literal(2.0).negate();
    let back = r.interpret_node(&negated.unparse()).unwrap();

    assert_eq!(back.tag(), NodeTag::Literal);
    assert_eq!(back, negated);
    assert_eq!(negated, back);
    assert_ne!(negated, r.literal(2.0));
}

#[test]
fn equality_across_registries_compares_names() {
    let (first, second) = (Registry::new(), Registry::new());
    let a = first.interpret_node("x * sin(y)").unwrap();
    let b = second.interpret_node("sin(y) * x").unwrap();
    assert_eq!(a, b);
}

#[test]
fn variable_binding_and_rebinding() {
    let r = Registry::new();
    let leaf = r.variable("a");
    assert_eq!(leaf.eval(), Err(RuntimeError::NoBoundValue { name: "a".to_string() }));

    r.set_variable("a", 2.0).unwrap();
    assert_eq!(leaf.eval().unwrap(), 2.0);
    assert_eq!(r.value_of("a"), Some(2.0));

    let count = r.node_count();
    r.set_variable("a", 3.0).unwrap();
    assert_eq!(leaf.eval().unwrap(), 3.0);
    assert_eq!(r.node_count(), count);
    assert_eq!(r.variable("a").id(), leaf.id());
}

#[test]
fn binding_an_unreferenced_name_fails() {
    let r = Registry::new();
    assert!(matches!(r.set_variable("ghost", 1.0),
                     Err(RuntimeError::UnknownVariable { .. })));
}

#[rstest]
#[case("7 % 3", 1.0)]
#[case("2 ^ 0.5 * 2 ^ 0.5", 2.0)]
#[case("atan2(1, 0) * 2", std::f64::consts::PI)]
#[case("asin(1) + acos(1) + atan(0)", std::f64::consts::FRAC_PI_2)]
#[case("tan(0) - -cos(0)", 1.0)]
fn evaluation(#[case] text: &str, #[case] expected: f64) {
    let r = Registry::new();
    let value = r.interpret_node(text).unwrap().eval().unwrap();
    assert!((value - expected).abs() < 1e-12, "'{text}' evaluated to {value}");
}

#[test]
fn division_by_zero_is_not_an_error() {
    let r = Registry::new();
    assert_eq!(r.interpret_node("1 / 0").unwrap().eval().unwrap(), f64::INFINITY);
}

#[test]
fn constructors_reject_foreign_nodes() {
    let (first, second) = (Registry::new(), Registry::new());
    let x = first.variable("x");
    let y = second.variable("y");

    assert_eq!(first.binary(BinaryOperator::Plus, &x, &y).unwrap_err(),
               RuntimeError::IncompatibleRegistry);
    assert_eq!(second.unary(UnaryOperator::Sin, &x).unwrap_err(),
               RuntimeError::IncompatibleRegistry);
    assert!(first.unary_named("sin", &x).is_ok());
    assert!(matches!(first.binary_named("sin", &x, &x),
                     Err(RuntimeError::BadOperator { .. })));
}
