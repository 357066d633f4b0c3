use tracing::trace;

use crate::{
    error::ParseError,
    interpreter::{
        lexer::{GroupKind, find_balanced_parens, split_groups},
        matrix::Matrix,
        node::Node,
        parser::{
            binary::{continue_chain, interpret_chain},
            unary::build_call,
            utils::{interpret_literal, normalize, split_top_level},
        },
        registry::Registry,
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Interprets a single expression.
///
/// The text is normalized first, then classified:
///
/// 1. a decimal number becomes a literal leaf;
/// 2. text without `(` is either a single name (an interned variable leaf)
///    or an operator chain;
/// 3. otherwise the text is split at its first `(`. When the part before it
///    holds more than one group the whole text is an operator chain
///    (`2 * sin(x)`). Otherwise the parenthesis group is a call named by that
///    part (`sin(x)`, `atan2(y, x)`, `*(2, 1)`) or a plain grouping (`(a)`),
///    and anything after the closing `)` continues a chain with the result as
///    first operand (`(a + b) * c`).
///
/// # Parameters
/// - `registry`: The registry that owns every node built.
/// - `text`: The expression text.
///
/// # Returns
/// The root of the built tree.
///
/// # Errors
/// Any `ParseError`. Failures inside sub-expressions are wrapped with the
/// enclosing text; [`ParseError::root_cause`] recovers the original failure.
///
/// ## Example
/// ```
/// use kinexpr::interpreter::registry::Registry;
///
/// let registry = Registry::new();
/// let node = registry.interpret_node("2+sin(3)*(-1-2)/atan2(5,6)").unwrap();
/// assert_eq!(node.unparse(), "(2 + ((sin(3) * (-1 - 2)) / atan2(5, 6)))");
///
/// assert!(registry.interpret_node("sin(1").is_err());
/// assert!(registry.interpret_node("atan2(1,2,3)").is_err());
/// ```
pub fn interpret_node(registry: &Registry, text: &str) -> ParseResult<Node> {
    let text = normalize(text);
    trace!(text, "interpret node");

    if text.is_empty() {
        return Err(ParseError::EmptyExpression { input: text });
    }
    if let Some(literal) = interpret_literal(registry, &text) {
        return Ok(literal);
    }

    let Some(open) = text.find('(') else {
        return interpret_flat(registry, &text);
    };

    let (prefix, from_paren) = text.split_at(open);
    let group = find_balanced_parens(from_paren)?;
    let inner = &group[1..group.len() - 1];
    let trailing = from_paren[group.len()..].trim();

    if split_groups(prefix, Some(2))?.len() > 1 {
        return interpret_chain(registry, &text);
    }

    let arguments = interpret_list_of_nodes(registry, inner).map_err(|e| e.within(&text))?;
    let node = build_call(registry, prefix.trim(), &arguments, inner, &text)?;

    if trailing.is_empty() {
        Ok(node)
    } else {
        continue_chain(registry, node, trailing).map_err(|e| e.within(&text))
    }
}

/// Interprets text that contains no parenthesis.
fn interpret_flat(registry: &Registry, text: &str) -> ParseResult<Node> {
    let groups = split_groups(text, Some(2))?;
    match groups.as_slice() {
        [] => Err(ParseError::EmptyExpression { input: text.to_string() }),
        [single] => match single.kind {
            GroupKind::Name => Ok(registry.variable(&single.text)),
            GroupKind::Symbol => Err(ParseError::MissingOperand { operator:   single.text.clone(),
                                                                  expression: text.to_string(), }),
            _ => interpret_literal(registry, &single.text).ok_or_else(|| {
                     ParseError::UnrecognizedCharacter { character: single.text
                                                                           .chars()
                                                                           .next()
                                                                           .unwrap_or_default(),
                                                         position:  0,
                                                         text:      single.text.clone(), }
                 }),
        },
        _ => interpret_chain(registry, text),
    }
}

/// Interprets a comma separated list of expressions.
///
/// Commas nested inside parenthesis groups do not separate elements, so
/// `a, atan2(b, c)` has two elements. Empty elements are skipped.
///
/// Commas always separate here, so `1,5` is two elements, while
/// [`interpret_node`] reads the same text as the decimal `1.5`.
///
/// # Errors
/// - `UnexpectedClosingParen` for a `)` with no matching `(`.
/// - Any failure of an element, wrapped with the list text.
///
/// ## Example
/// ```
/// use kinexpr::interpreter::registry::Registry;
///
/// let registry = Registry::new();
/// let nodes = registry.interpret_list_of_nodes("a, atan2(b, c), 2*-1").unwrap();
/// let printed: Vec<_> = nodes.iter().map(|n| n.unparse()).collect();
/// assert_eq!(printed, ["a", "atan2(b, c)", "(2 * -1)"]);
/// ```
pub fn interpret_list_of_nodes(registry: &Registry, text: &str) -> ParseResult<Vec<Node>> {
    split_top_level(text, ',')?.into_iter()
                               .map(|element| {
                                   interpret_node(registry, element).map_err(|e| e.within(text))
                               })
                               .collect()
}

/// Interprets a `;` separated table of comma separated rows.
///
/// Every row must hold as many cells as the first one.
///
/// # Errors
/// - `EmptyExpression` when no row holds any cell.
/// - `InRow` wrapping `ColumnCount` when a row has the wrong number of cells.
/// - `InRow` wrapping any failure of a cell.
///
/// ## Example
/// ```
/// use kinexpr::{error::ParseError, interpreter::registry::Registry};
///
/// let registry = Registry::new();
/// let matrix = registry.interpret_matrix("1, 2; 3, 4").unwrap();
/// assert_eq!((matrix.rows(), matrix.cols()), (2, 2));
///
/// let err = registry.interpret_matrix("1,2;3").unwrap_err();
/// assert!(matches!(err, ParseError::InRow { row: 1, .. }));
/// ```
pub fn interpret_matrix(registry: &Registry, text: &str) -> ParseResult<Matrix> {
    let mut cells: Vec<Vec<Node>> = Vec::new();

    for (row, row_text) in text.split(';').enumerate() {
        let values = interpret_list_of_nodes(registry, row_text).map_err(|e| {
                                                                    ParseError::InRow { row,
                                                                                        source: Box::new(e) }
                                                                })?;
        if let Some(first) = cells.first()
           && first.len() != values.len()
        {
            let mismatch = ParseError::ColumnCount { expected: first.len(),
                                                     found:    values.len(),
                                                     text:     row_text.trim().to_string(), };
            return Err(ParseError::InRow { row,
                                           source: Box::new(mismatch) });
        }
        cells.push(values);
    }

    if cells.iter().all(Vec::is_empty) {
        return Err(ParseError::EmptyExpression { input: text.to_string() });
    }

    Ok(Matrix::from_grid(registry.clone(), cells))
}
