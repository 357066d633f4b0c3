use crate::{
    error::ParseError,
    interpreter::{node::Node, parser::core::ParseResult, registry::Registry},
    util::num::parse_decimal,
};

/// Trims the text and collapses every interior whitespace run (spaces, tabs,
/// newlines) into a single space.
///
/// # Example
/// ```
/// use kinexpr::interpreter::parser::utils::normalize;
///
/// assert_eq!(normalize("  sin( x )\t*\n 2 "), "sin( x ) * 2");
/// ```
#[must_use]
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Builds a literal leaf when the whole text is a decimal number.
///
/// Either `.` or `,` is accepted as the decimal separator, independently of
/// the host locale.
pub fn interpret_literal(registry: &Registry, text: &str) -> Option<Node> {
    parse_decimal(text).map(|value| registry.literal(value))
}

/// Splits `text` on `separator` wherever the parenthesis depth is zero.
///
/// Segments are trimmed and empty segments are dropped, so `"a, , b"` yields
/// two segments.
///
/// # Parameters
/// - `text`: The text to split.
/// - `separator`: The separator character, `,` for argument lists.
///
/// # Returns
/// The non-empty top-level segments, in order.
///
/// # Errors
/// - `UnexpectedClosingParen` if a `)` appears at depth zero.
/// - `UnbalancedParenthesis` if a `(` is never closed.
///
/// # Example
/// ```
/// use kinexpr::interpreter::parser::utils::split_top_level;
///
/// let parts = split_top_level("a, atan2(b, c), (d, e)", ',').unwrap();
/// assert_eq!(parts, ["a", "atan2(b, c)", "(d, e)"]);
/// assert!(split_top_level("a), b", ',').is_err());
/// ```
pub fn split_top_level(text: &str, separator: char) -> ParseResult<Vec<&str>> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                if depth == 0 {
                    return Err(ParseError::UnexpectedClosingParen { position: i,
                                                                    text:     text.to_string() });
                }
                depth -= 1;
            },
            c if c == separator && depth == 0 => {
                segments.push(&text[start..i]);
                start = i + c.len_utf8();
            },
            _ => {},
        }
    }

    if depth > 0 {
        return Err(ParseError::UnbalancedParenthesis { open: depth,
                                                       text: text.to_string() });
    }
    segments.push(&text[start..]);

    Ok(segments.into_iter()
               .map(str::trim)
               .filter(|segment| !segment.is_empty())
               .collect())
}
