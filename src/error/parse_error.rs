use crate::error::RuntimeError;

#[derive(Debug)]
/// Represents all errors that can occur while interpreting expression text.
///
/// Each variant is a flavour of malformed expression. Variants that wrap
/// another error expose it through [`std::error::Error::source`].
pub enum ParseError {
    /// The input was empty or contained only whitespace.
    EmptyExpression {
        /// The raw input.
        input: String,
    },
    /// No lexical pattern matched at some position.
    UnrecognizedCharacter {
        /// The offending character.
        character: char,
        /// Byte offset of the character in `text`.
        position:  usize,
        /// The (whitespace-stripped) text being split.
        text:      String,
    },
    /// A `(` was never closed.
    UnbalancedParenthesis {
        /// Number of `(` still open at the end of the text.
        open: usize,
        /// The text being scanned.
        text: String,
    },
    /// A balanced group was requested but the text does not start with `(`.
    MissingParenthesis {
        /// The text being scanned.
        text: String,
    },
    /// A `)` appeared without a matching `(`.
    UnexpectedClosingParen {
        /// Byte offset of the `)`.
        position: usize,
        /// The text being scanned.
        text:     String,
    },
    /// A parenthesized group held a number of arguments its prefix cannot
    /// accept.
    ArgumentCount {
        /// Number of arguments found.
        found:     usize,
        /// The text between the parentheses.
        arguments: String,
    },
    /// An operator was not followed by an operand.
    MissingOperand {
        /// The operator (or empty when the chain ended early).
        operator:   String,
        /// The chain being resolved.
        expression: String,
    },
    /// Node construction rejected the operator.
    BadOperator {
        /// The sub-expression being built.
        expression: String,
        /// The construction failure.
        source:     RuntimeError,
    },
    /// A matrix row had a different number of cells than the first row.
    ColumnCount {
        /// Cells on the first row.
        expected: usize,
        /// Cells on this row.
        found:    usize,
        /// The row text.
        text:     String,
    },
    /// A nested parse failed while interpreting a larger expression.
    Nested {
        /// The enclosing sub-expression.
        expression: String,
        /// The inner failure.
        source:     Box<Self>,
    },
    /// A matrix row failed to parse.
    InRow {
        /// Zero-based row index.
        row:    usize,
        /// The inner failure.
        source: Box<Self>,
    },
}

impl ParseError {
    /// Wraps `self` with the enclosing expression that triggered it.
    #[must_use]
    pub fn within(self, expression: &str) -> Self {
        Self::Nested { expression: expression.to_string(),
                       source:     Box::new(self), }
    }

    /// Follows `Nested` and `InRow` wrappers down to the innermost parse
    /// failure.
    ///
    /// ## Example
    /// ```
    /// use kinexpr::{error::ParseError, interpreter::registry::Registry};
    ///
    /// let registry = Registry::new();
    /// let err = registry.interpret_node("2 + sin(1").unwrap_err();
    /// assert!(matches!(err.root_cause(), ParseError::UnbalancedParenthesis { .. }));
    /// ```
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::Nested { source, .. } | Self::InRow { source, .. } => source.root_cause(),
            _ => self,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyExpression { input } => {
                write!(f, "Malformed expression: expected an expression but found \"{input}\".")
            },
            Self::UnrecognizedCharacter { character,
                                          position,
                                          text, } => write!(f,
                                                            "Malformed expression: unrecognized character '{character}' at index {position} in '{text}'."),
            Self::UnbalancedParenthesis { open, text } => write!(f,
                                                                 "Malformed expression: unbalanced parenthesis, found {open} extra '(' in '{text}'."),
            Self::MissingParenthesis { text } => {
                write!(f, "Malformed expression: no parenthesis found in '{text}'.")
            },
            Self::UnexpectedClosingParen { position, text } => write!(f,
                                                                      "Malformed expression: unbalanced parenthesis ')' at index {position} in '{text}'."),
            Self::ArgumentCount { found, arguments } => write!(f,
                                                               "Malformed expression: expected one or two arguments but found {found} in '{arguments}'."),
            Self::MissingOperand { operator,
                                   expression, } => {
                if operator.is_empty() {
                    write!(f,
                           "Malformed expression: missing operand in '{expression}'.")
                } else {
                    write!(f,
                           "Malformed expression: operator '{operator}' has no operand in '{expression}'.")
                }
            },
            Self::BadOperator { expression, source } => write!(f,
                                                               "Malformed expression: expected a unary or binary expression but found '{expression}' ({source})."),
            Self::ColumnCount { expected,
                                found,
                                text, } => write!(f,
                                                  "Malformed expression: expected {expected} columns on every row, but found {found} in '{text}'."),
            Self::Nested { expression, source } => {
                write!(f, "{source}\n  while parsing '{expression}'")
            },
            Self::InRow { row, source } => write!(f, "{source}\n  at row index {row}"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::BadOperator { source, .. } => Some(source),
            Self::Nested { source, .. } | Self::InRow { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
