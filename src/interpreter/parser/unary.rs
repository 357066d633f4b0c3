use crate::{
    error::ParseError,
    interpreter::{
        lexer::{CharGroup, GroupKind},
        node::Node,
        parser::core::{ParseResult, interpret_node},
        registry::Registry,
    },
};

/// Builds the node for a parenthesis group and the name in front of it.
///
/// An empty `head` is a plain grouping and must hold exactly one argument.
/// Otherwise one argument builds a unary node and two build a binary node,
/// with `head` resolved as an operator name or symbol (`sin`, `atan2`, `*`).
///
/// # Parameters
/// - `registry`: The registry that owns the arguments.
/// - `head`: The text before the `(`, trimmed.
/// - `arguments`: The already interpreted arguments.
/// - `inner`: The text between the parentheses, for error messages.
/// - `expression`: The whole call, for error messages.
///
/// # Errors
/// - `ArgumentCount` if the number of arguments does not fit `head`.
/// - `BadOperator` if `head` names no operator of the required arity.
pub fn build_call(registry: &Registry,
                  head: &str,
                  arguments: &[Node],
                  inner: &str,
                  expression: &str)
                  -> ParseResult<Node> {
    let built = match (head.is_empty(), arguments) {
        (true, [only]) => return Ok(only.clone()),
        (false, [child]) => registry.unary_named(head, child),
        (false, [lhs, rhs]) => registry.binary_named(head, lhs, rhs),
        _ => {
            return Err(ParseError::ArgumentCount { found:     arguments.len(),
                                                   arguments: inner.to_string(), });
        },
    };

    built.map_err(|source| ParseError::BadOperator { expression: expression.to_string(),
                                                     source })
}

/// Parses one operand of a chain from `groups`, starting at `*pos`.
///
/// Each leading `-` symbol negates what follows it, so `--a` is `-(-a)` and
/// negation binds tighter than any binary operator. Any other group is
/// interpreted on its own.
///
/// # Parameters
/// - `registry`: The registry that owns the chain.
/// - `groups`: The chain's character groups.
/// - `pos`: Index of the next unread group; advanced past the operand.
/// - `after`: The operator preceding the operand, empty for the first one.
/// - `expression`: The whole chain, for error messages.
///
/// # Errors
/// - `MissingOperand` if the chain ends or another operator follows.
/// - Any failure of the operand itself, wrapped with `expression`.
pub fn parse_operand(registry: &Registry,
                     groups: &[CharGroup],
                     pos: &mut usize,
                     after: &str,
                     expression: &str)
                     -> ParseResult<Node> {
    let Some(group) = groups.get(*pos) else {
        return Err(ParseError::MissingOperand { operator:   after.to_string(),
                                                expression: expression.to_string(), });
    };
    *pos += 1;

    if group.is_symbol("-") {
        let operand = parse_operand(registry, groups, pos, "-", expression)?;
        return Ok(operand.negate());
    }
    if group.kind == GroupKind::Symbol {
        return Err(ParseError::MissingOperand { operator:   group.text.clone(),
                                                expression: expression.to_string(), });
    }

    interpret_node(registry, &group.text).map_err(|e| e.within(expression))
}
