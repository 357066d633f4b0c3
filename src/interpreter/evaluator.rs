/// Core evaluation logic for expression nodes.
///
/// Contains the recursive evaluator and the result type shared by
/// evaluation, construction and matrix operations.
pub mod core;

/// Unary operator evaluation.
///
/// Negation and the trigonometric functions.
pub mod unary;

/// Binary operator evaluation.
///
/// Arithmetic, remainder, power and `atan2`.
pub mod binary;
