use kinexpr::{
    ast::{BinaryOperator, NodeTag, UnaryOperator},
    error::{ParseError, RuntimeError},
    interpreter::{
        lexer::{GroupKind, split_groups},
        node::Node,
        registry::Registry,
    },
};
use rstest::rstest;

fn bin(registry: &Registry, op: BinaryOperator, lhs: &Node, rhs: &Node) -> Node {
    registry.binary(op, lhs, rhs).unwrap()
}

#[test]
fn precedence_matches_explicit_tree() {
    use BinaryOperator::{Atan2, Div, Minus, Mul, Plus};

    let r = Registry::new();
    let lit = |v| r.literal(v);
    let sin3 = r.unary(UnaryOperator::Sin, &lit(3.0)).unwrap();

    let product = bin(&r, Mul, &sin3, &bin(&r, Minus, &lit(-1.0), &lit(2.0)));
    let quotient = bin(&r, Div, &product, &bin(&r, Atan2, &lit(5.0), &lit(6.0)));
    let expected = bin(&r,
                       Plus,
                       &bin(&r,
                            Minus,
                            &bin(&r, Plus, &bin(&r, Plus, &lit(2.0), &quotient), &lit(2.0)),
                            &bin(&r, Mul, &lit(5.0), &lit(7.0))),
                       &lit(3.0));

    let parsed = r.interpret_node("2+sin(3)*(-1-2)/atan2(5,6)+2-5*7+3").unwrap();
    assert_eq!(parsed, expected);
    assert_eq!(parsed.unparse(), expected.unparse());
}

#[rstest]
#[case("2*-1", BinaryOperator::Mul)]
#[case("2+-1", BinaryOperator::Plus)]
#[case("2 / -1", BinaryOperator::Div)]
fn negative_literals_after_operators(#[case] text: &str, #[case] op: BinaryOperator) {
    let r = Registry::new();
    let expected = bin(&r, op, &r.literal(2.0), &r.literal(-1.0));
    assert_eq!(r.interpret_node(text).unwrap(), expected);
}

#[test]
fn binary_minus_is_not_fused() {
    let r = Registry::new();
    let node = r.interpret_node("2-1").unwrap();
    assert_eq!(node.tag(), NodeTag::Binary(BinaryOperator::Minus));
    assert_eq!(node.eval().unwrap(), 1.0);
}

#[test]
fn groups_split_into_calls_and_signed_numbers() {
    let groups = split_groups("-2*atan2(a,b)+-c", None).unwrap();
    let kinds: Vec<_> = groups.iter().map(|g| g.kind).collect();
    assert_eq!(kinds,
               [GroupKind::Number,
                GroupKind::Symbol,
                GroupKind::Call,
                GroupKind::Symbol,
                GroupKind::Symbol,
                GroupKind::Name]);
    assert_eq!(groups[0].text, "-2");
    assert_eq!(groups[2].text, "atan2(a,b)");
}

#[test]
fn group_limit_leaves_the_rest_unsplit() {
    let groups = split_groups("a + b * c", Some(2)).unwrap();
    assert_eq!(groups.len(), 3);
    assert_eq!(groups[2].kind, GroupKind::Rest);
    assert_eq!(groups[2].text, "b*c");
}

#[test]
fn variables_are_interned() {
    let r = Registry::new();
    let first = r.interpret_node("th1").unwrap();
    let count = r.node_count();
    let second = r.interpret_node("  th1 ").unwrap();

    assert_eq!(first.id(), second.id());
    assert_eq!(r.node_count(), count);
    assert_eq!(r.variables(), ["th1"]);
}

#[rstest]
#[case("inf")]
#[case("NaN")]
fn non_finite_spellings_are_names(#[case] name: &str) {
    let r = Registry::new();
    assert_eq!(r.interpret_node(name).unwrap().tag(), NodeTag::Name);

    let leaf = r.variable(name);
    assert_eq!(r.interpret_node(&leaf.unparse()).unwrap(), leaf);

    r.set_variable(name, 1.5).unwrap();
    assert_eq!(r.interpret_node(&format!("{name} * 2")).unwrap().eval().unwrap(), 3.0);
}

#[test]
fn shared_registry_is_one_per_thread() {
    let (first, second) = (Registry::shared(), Registry::shared());
    assert!(first.same_as(&second));
    assert!(!first.same_as(&Registry::new()));

    let leaf = first.variable("shared_q");
    assert_eq!(second.interpret_node("shared_q").unwrap().id(), leaf.id());
    assert!(second.variables().contains(&"shared_q".to_string()));
}

#[test]
fn tags_report_child_counts() {
    let r = Registry::new();
    let mut pending = vec![r.interpret_node("atan2(a, -sin(2)) + 1").unwrap()];
    let mut seen = 0;
    while let Some(node) = pending.pop() {
        let children = node.children();
        assert_eq!(node.tag().child_count(), children.len(), "{node}");
        pending.extend(children);
        seen += 1;
    }
    assert_eq!(seen, 7);
}

#[test]
fn decimal_comma_depends_on_context() {
    let r = Registry::new();
    assert_eq!(r.interpret_node("1,5+a").unwrap().unparse(), "(1.5 + a)");

    let nodes = r.interpret_list_of_nodes("1,5+a").unwrap();
    let printed: Vec<_> = nodes.iter().map(Node::unparse).collect();
    assert_eq!(printed, ["1", "(5 + a)"]);
}

#[test]
fn list_respects_nested_commas() {
    let r = Registry::new();
    let nodes = r.interpret_list_of_nodes(" a , atan2(b, -(c)) ,, 1,5 ").unwrap();
    let printed: Vec<_> = nodes.iter().map(Node::unparse).collect();
    assert_eq!(printed, ["a", "atan2(b, -c)", "1", "5"]);
}

#[test]
fn list_rejects_stray_closing_paren() {
    let r = Registry::new();
    let err = r.interpret_list_of_nodes("a), b").unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedClosingParen { position: 1, .. }));
}

#[rstest]
#[case("", "EmptyExpression")]
#[case("   \t ", "EmptyExpression")]
#[case("sin(1", "UnbalancedParenthesis")]
#[case("2 + sin(1", "UnbalancedParenthesis")]
#[case("atan2(1,2,3)", "ArgumentCount")]
#[case("()", "ArgumentCount")]
#[case("2 +", "MissingOperand")]
#[case("+", "MissingOperand")]
#[case("2 * * 3", "MissingOperand")]
#[case("foo(1)", "BadOperator")]
#[case("2 $ 3", "BadOperator")]
#[case("2 x", "BadOperator")]
#[case("a ? b", "UnrecognizedCharacter")]
fn malformed_expressions(#[case] text: &str, #[case] kind: &str) {
    let r = Registry::new();
    let err = r.interpret_node(text).unwrap_err();
    let root = err.root_cause();
    let found = match root {
        ParseError::EmptyExpression { .. } => "EmptyExpression",
        ParseError::UnbalancedParenthesis { .. } => "UnbalancedParenthesis",
        ParseError::ArgumentCount { .. } => "ArgumentCount",
        ParseError::MissingOperand { .. } => "MissingOperand",
        ParseError::BadOperator { .. } => "BadOperator",
        ParseError::UnrecognizedCharacter { .. } => "UnrecognizedCharacter",
        other => panic!("unexpected error for '{text}': {other:?}"),
    };
    assert_eq!(found, kind, "'{text}' failed with {err}");
    assert!(err.to_string().starts_with("Malformed expression"));
}

#[test]
fn unknown_call_keeps_the_operator_as_source() {
    let r = Registry::new();
    let err = r.interpret_node("foo(1)").unwrap_err();
    let ParseError::BadOperator { source, .. } = err.root_cause() else {
        panic!("expected a bad operator, got {err:?}");
    };
    assert!(matches!(source, RuntimeError::BadOperator { operator, .. } if operator == "foo"));
}

#[test]
fn nested_failures_carry_context() {
    let r = Registry::new();
    let err = r.interpret_node("2 * atan2(x, foo(y))").unwrap_err();
    assert!(matches!(err, ParseError::Nested { .. }));
    assert!(err.to_string().contains("while parsing"));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn matrix_of_literals() {
    let r = Registry::new();
    let m = r.interpret_matrix("1, 2; 3, 4").unwrap();
    assert_eq!((m.rows(), m.cols()), (2, 2));
    assert_eq!(m.eval().unwrap(), vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    assert_eq!(m[(1, 0)].tag(), NodeTag::Literal);
}

#[test]
fn matrix_row_mismatch_reports_the_row() {
    let r = Registry::new();
    let err = r.interpret_matrix("1,2;3").unwrap_err();
    let ParseError::InRow { row, source } = &err else {
        panic!("expected a row error, got {err:?}");
    };
    assert_eq!(*row, 1);
    assert!(matches!(**source, ParseError::ColumnCount { expected: 2, found: 1, .. }));
}

#[test]
fn matrix_cell_failure_reports_the_row() {
    let r = Registry::new();
    let err = r.interpret_matrix("1, 2; 3, sin(").unwrap_err();
    assert!(matches!(err, ParseError::InRow { row: 1, .. }));
    assert!(matches!(err.root_cause(), ParseError::UnbalancedParenthesis { .. }));
}

#[test]
fn empty_matrix_is_malformed() {
    let r = Registry::new();
    assert!(matches!(r.interpret_matrix(" ; "), Err(ParseError::EmptyExpression { .. })));
}
