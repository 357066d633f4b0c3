/// Parsing errors.
///
/// Every variant is a malformed-expression failure: empty input, unbalanced
/// parentheses, wrong argument counts, unrecognized characters, dangling
/// operators, unknown operator names and ragged matrix rows. Recursive
/// failures are wrapped so the outer sub-expression stays visible.
pub mod parse_error;
/// Evaluation and construction errors.
///
/// Raised when a node is built from an unknown operator, evaluated without a
/// bound variable value, combined across registries, or used in a matrix
/// operation whose shapes do not fit.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
