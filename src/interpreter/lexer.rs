use logos::{Lexer, Logos};

use crate::{error::ParseError, interpreter::parser::core::ParseResult};

/// The four raw lexical patterns. Balanced groups are consumed whole by the
/// `(` callback.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Lexeme {
    /// Identifiers such as `th1`, `d_2` or `atan2`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Name,
    /// A single operator-class character.
    #[regex(r"[@!#$%^&*|/+~-]")]
    Symbol,
    /// Unsigned numbers with an optional `.` or `,` decimal separator.
    #[regex(r"[0-9]*[.,][0-9]+|[0-9]+")]
    Number,
    /// A balanced parenthesis group, `(` through its matching `)`.
    #[token("(", balanced_group)]
    Group,
}

/// Consumes the rest of a balanced group after its opening `(`.
fn balanced_group(lex: &mut Lexer<Lexeme>) -> bool {
    let start = lex.span().start;
    match find_balanced_parens(&lex.source()[start..]) {
        Ok(group) => {
            lex.bump(group.len() - 1);
            true
        },
        Err(_) => false,
    }
}

/// Classification of a character group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// An identifier.
    Name,
    /// An identifier immediately followed by a parenthesis group, `sin(x)`.
    Call,
    /// A single operator character.
    Symbol,
    /// A numeric literal, possibly carrying a fused `-` sign.
    Number,
    /// A parenthesis group with no name in front of it.
    Group,
    /// Unsplit remainder left over when a group limit was reached.
    Rest,
}

/// A lexical unit extracted by [`split_groups`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharGroup {
    /// What the group is.
    pub kind: GroupKind,
    /// The raw text of the group.
    pub text: String,
}

impl CharGroup {
    fn new(kind: GroupKind, text: &str) -> Self {
        Self { kind,
               text: text.to_string() }
    }

    /// Returns `true` for a symbol group spelled exactly `symbol`.
    #[must_use]
    pub fn is_symbol(&self, symbol: &str) -> bool {
        self.kind == GroupKind::Symbol && self.text == symbol
    }
}

/// Splits text into recognized character groups.
///
/// All whitespace is removed first. At each position the patterns are tried
/// in priority order: identifier, operator character, number, parenthesis
/// group. Two merges are applied as groups are produced:
///
/// - an identifier followed directly by a parenthesis group becomes one
///   [`GroupKind::Call`] group (`sin(x)`);
/// - a `-` at the start of the text or right after another operator
///   character is fused onto a following number (`2*-1` yields `2`, `*`,
///   `-1`).
///
/// When `limit` is given, splitting stops once that many groups exist and the
/// unsplit remainder is appended as a single [`GroupKind::Rest`] group. This
/// is enough to answer "is there more than one group?" cheaply.
///
/// # Errors
/// - `UnrecognizedCharacter` when no pattern matches.
/// - `UnbalancedParenthesis` when a `(` is never closed.
///
/// # Example
/// ```
/// use kinexpr::interpreter::lexer::{GroupKind, split_groups};
///
/// let groups = split_groups("2 * -1 + sin(x)", None).unwrap();
/// let texts: Vec<_> = groups.iter().map(|g| g.text.as_str()).collect();
/// assert_eq!(texts, ["2", "*", "-1", "+", "sin(x)"]);
/// assert_eq!(groups[4].kind, GroupKind::Call);
/// ```
pub fn split_groups(text: &str, limit: Option<usize>) -> ParseResult<Vec<CharGroup>> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let mut lexer = Lexeme::lexer(&compact);
    let mut groups: Vec<CharGroup> = Vec::new();

    while let Some(lexeme) = lexer.next() {
        let span = lexer.span();
        let Ok(lexeme) = lexeme else {
            return Err(lexical_error(&compact, span.start));
        };
        let slice = lexer.slice();

        if lexeme == Lexeme::Group
           && let Some(last) = groups.last_mut()
           && last.kind == GroupKind::Name
        {
            last.text.push_str(slice);
            last.kind = GroupKind::Call;
            continue;
        }
        if lexeme == Lexeme::Number
           && sign_in_unary_position(&groups)
           && let Some(last) = groups.last_mut()
        {
            last.text.push_str(slice);
            last.kind = GroupKind::Number;
            continue;
        }

        if limit.is_some_and(|limit| groups.len() >= limit) {
            groups.push(CharGroup::new(GroupKind::Rest, &compact[span.start..]));
            break;
        }

        let kind = match lexeme {
            Lexeme::Name => GroupKind::Name,
            Lexeme::Symbol => GroupKind::Symbol,
            Lexeme::Number => GroupKind::Number,
            Lexeme::Group => GroupKind::Group,
        };
        groups.push(CharGroup::new(kind, slice));
    }

    Ok(groups)
}

/// `true` when the last group is a `-` that opens the text or follows another
/// operator character.
fn sign_in_unary_position(groups: &[CharGroup]) -> bool {
    match groups {
        [.., before, last] => last.is_symbol("-") && before.kind == GroupKind::Symbol,
        [last] => last.is_symbol("-"),
        [] => false,
    }
}

/// Builds the error for a position where no pattern matched.
fn lexical_error(text: &str, position: usize) -> ParseError {
    let rest = &text[position..];
    if rest.starts_with('(')
       && let Err(e) = find_balanced_parens(rest)
    {
        return e;
    }
    ParseError::UnrecognizedCharacter { character: rest.chars().next().unwrap_or_default(),
                                        position,
                                        text: text.to_string() }
}

/// Returns the prefix of `text` that forms a balanced parenthesis group.
///
/// `text` must start with `(`. The scan counts `(` as +1 and `)` as -1 and
/// stops as soon as the count returns to zero; the returned slice includes
/// both outer parentheses.
///
/// # Errors
/// - `MissingParenthesis` if `text` does not start with `(`.
/// - `UnbalancedParenthesis` if the count never returns to zero.
///
/// # Example
/// ```
/// use kinexpr::interpreter::lexer::find_balanced_parens;
///
/// assert_eq!(find_balanced_parens("(a*(b+c))+d").unwrap(), "(a*(b+c))");
/// assert!(find_balanced_parens("(a*(b+c)").is_err());
/// assert!(find_balanced_parens("a)").is_err());
/// ```
pub fn find_balanced_parens(text: &str) -> ParseResult<&str> {
    if !text.starts_with('(') {
        return Err(ParseError::MissingParenthesis { text: text.to_string() });
    }

    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(&text[..=i]);
                }
            },
            _ => {},
        }
    }

    Err(ParseError::UnbalancedParenthesis { open: depth,
                                            text: text.to_string() })
}
