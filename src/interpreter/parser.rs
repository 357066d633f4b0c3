/// Entry points of the expression interpreter.
///
/// Classifies a string as a literal, a variable, an operator chain or a
/// (possibly prefixed) parenthesis group, and builds the matching tree. Also
/// hosts the list and matrix interpreters that split on top-level commas and
/// semicolons.
pub mod core;

/// Precedence climbing over operator chains.
///
/// Resolves flat sequences such as `2 + a * b ^ 2` into correctly grouped
/// binary nodes, and continues chains that follow a parenthesized operand
/// (`(a + b) * c`).
pub mod binary;

/// Operands and calls.
///
/// Prefix negation inside chains and construction of `name(args)` calls.
pub mod unary;

/// Helpers shared by the interpreters.
///
/// Whitespace normalization, literal recognition and splitting on top-level
/// separators.
pub mod utils;
