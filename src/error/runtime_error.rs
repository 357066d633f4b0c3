use crate::ast::Arity;

#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur while building, evaluating or
/// combining nodes.
pub enum RuntimeError {
    /// The operator name or symbol is not in the catalog for this arity.
    BadOperator {
        /// The rejected name or symbol.
        operator: String,
        /// The arity that was requested.
        arity:    Arity,
    },
    /// A named variable was evaluated without a bound value.
    NoBoundValue {
        /// The variable name.
        name: String,
    },
    /// A value was assigned to a name that no expression has referenced.
    UnknownVariable {
        /// The variable name.
        name:  String,
        /// The value that could not be assigned.
        value: f64,
    },
    /// Nodes from two different registries were combined.
    IncompatibleRegistry,
    /// Two matrices have shapes that do not fit the operation.
    DimensionMismatch {
        /// The operation that was attempted.
        operation: &'static str,
        /// Rows and columns of the left operand.
        left:      (usize, usize),
        /// Rows and columns of the right operand.
        right:     (usize, usize),
    },
    /// A matrix was built without any cells.
    EmptyMatrix,
    /// Matrix rows have different lengths.
    RaggedMatrix {
        /// Cells on the first row.
        expected: usize,
        /// Cells on the offending row.
        found:    usize,
        /// Zero-based index of the offending row.
        row:      usize,
    },
    /// A row or column range falls outside a matrix.
    IndexOutOfBounds {
        /// The requested half-open range.
        range: (usize, usize),
        /// The length of the indexed dimension.
        len:   usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadOperator { operator, arity } => {
                write!(f, "Operator '{operator}' is not a recognized {arity} operator.")
            },
            Self::NoBoundValue { name } => write!(f,
                                                  "Variable '{name}' has no value set and cannot be evaluated."),
            Self::UnknownVariable { name, value } => write!(f,
                                                            "Cannot set variable '{name}' to {value}: no expression references it."),
            Self::IncompatibleRegistry => write!(f,
                                                 "Nodes from different registries cannot be combined."),
            Self::DimensionMismatch { operation,
                                      left,
                                      right, } => write!(f,
                                                         "Cannot compute {operation} of a {}x{} and a {}x{} matrix.",
                                                         left.0,
                                                         left.1,
                                                         right.0,
                                                         right.1),
            Self::EmptyMatrix => write!(f, "Matrix dimensions must be greater than zero."),
            Self::RaggedMatrix { expected,
                                 found,
                                 row, } => write!(f,
                                                  "Expected {expected} columns on every row, but row {row} has {found}."),
            Self::IndexOutOfBounds { range, len } => write!(f,
                                                            "Range {}..{} is out of bounds for length {len}.",
                                                            range.0,
                                                            range.1),
        }
    }
}

impl std::error::Error for RuntimeError {}
