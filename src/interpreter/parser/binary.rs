use tracing::trace;

use crate::{
    ast::{Arity, BinaryOperator, Precedence},
    error::{ParseError, RuntimeError},
    interpreter::{
        lexer::{CharGroup, GroupKind, split_groups},
        node::Node,
        parser::{core::ParseResult, unary::parse_operand},
        registry::Registry,
    },
};

/// A flat sequence of groups being resolved left to right.
struct Chain<'a> {
    registry: &'a Registry,
    groups:   Vec<CharGroup>,
    pos:      usize,
    text:     &'a str,
}

impl<'a> Chain<'a> {
    fn new(registry: &'a Registry, text: &'a str) -> ParseResult<Self> {
        Ok(Self { registry,
                  groups: split_groups(text, None)?,
                  pos: 0,
                  text })
    }

    fn operand(&mut self, after: &str) -> ParseResult<Node> {
        parse_operand(self.registry, &self.groups, &mut self.pos, after, self.text)
    }

    /// The operator at the current position, without consuming it.
    fn peek_operator(&self) -> ParseResult<Option<BinaryOperator>> {
        let Some(group) = self.groups.get(self.pos) else {
            return Ok(None);
        };
        let op = (group.kind == GroupKind::Symbol).then(|| BinaryOperator::from_symbol(&group.text))
                                                  .flatten();
        op.map(Some).ok_or_else(|| {
                        ParseError::BadOperator { expression: self.text.to_string(),
                                                  source:     RuntimeError::BadOperator { operator:
                                                                                              group.text
                                                                                                   .clone(),
                                                                                          arity: Arity::Binary } }
                    })
    }

    /// Folds operators of precedence `min` or higher into `lhs`.
    ///
    /// After each operand, operators that bind strictly tighter than the
    /// pending one are resolved first; equal tiers fold left to right.
    fn climb(&mut self, mut lhs: Node, min: Precedence) -> ParseResult<Node> {
        while let Some(op) = self.peek_operator()? {
            if op.precedence() < min {
                break;
            }
            self.pos += 1;

            let mut rhs = self.operand(&op.to_string())?;
            while let Some(next) = self.peek_operator()?
                  && next.precedence() > op.precedence()
            {
                rhs = self.climb(rhs, next.precedence())?;
            }

            trace!(%lhs, %op, %rhs, "combine");
            lhs = self.registry
                      .binary(op, &lhs, &rhs)
                      .map_err(|source| ParseError::BadOperator { expression: self.text.to_string(),
                                                                  source })?;
        }
        Ok(lhs)
    }
}

/// Resolves a whole operator chain such as `2 + a * -b ^ 2`.
///
/// Precedence from tightest to loosest is prefix `-`, `^`, then `*` `/` `%`,
/// then `+` `-`. Every tier associates to the left.
///
/// # Errors
/// - `MissingOperand` when the chain starts or ends with an operator.
/// - `BadOperator` when a group in operator position is not an infix
///   operator (`2 a`, `2 @ 3`).
/// - Any failure of an operand, wrapped with the chain text.
///
/// ## Example
/// ```
/// use kinexpr::interpreter::{parser::binary::interpret_chain, registry::Registry};
///
/// let registry = Registry::new();
/// let node = interpret_chain(&registry, "1 - 2 - 3 * 4 ^ 2").unwrap();
/// assert_eq!(node.unparse(), "((1 - 2) - (3 * (4 ^ 2)))");
/// ```
pub fn interpret_chain(registry: &Registry, text: &str) -> ParseResult<Node> {
    let mut chain = Chain::new(registry, text)?;
    let first = chain.operand("")?;
    chain.climb(first, Precedence::Additive)
}

/// Continues a chain whose first operand is already built.
///
/// `text` starts with an operator, as in the `* c` of `(a + b) * c`.
///
/// # Errors
/// The same failures as [`interpret_chain`].
pub fn continue_chain(registry: &Registry, lhs: Node, text: &str) -> ParseResult<Node> {
    let mut chain = Chain::new(registry, text)?;

    // A leading "-" was fused onto the number after it; here it is binary.
    if let Some(first) = chain.groups.first()
       && first.kind == GroupKind::Number
       && let Some(digits) = first.text.strip_prefix('-')
    {
        chain.groups[0] = CharGroup { kind: GroupKind::Number,
                                      text: digits.to_string() };
        chain.groups.insert(0,
                            CharGroup { kind: GroupKind::Symbol,
                                        text: "-".to_string() });
    }

    chain.climb(lhs, Precedence::Additive)
}
