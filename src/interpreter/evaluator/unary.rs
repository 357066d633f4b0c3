use crate::ast::UnaryOperator;

/// Applies a unary operator to an already evaluated operand.
///
/// Trigonometric functions work in radians.
///
/// # Example
/// ```
/// use kinexpr::{ast::UnaryOperator, interpreter::evaluator::unary::eval_unary};
///
/// assert_eq!(eval_unary(UnaryOperator::Negate, 2.5), -2.5);
/// assert_eq!(eval_unary(UnaryOperator::Sin, 0.0), 0.0);
/// assert!(eval_unary(UnaryOperator::Asin, 2.0).is_nan());
/// ```
#[must_use]
pub fn eval_unary(op: UnaryOperator, value: f64) -> f64 {
    match op {
        UnaryOperator::Negate => -value,
        UnaryOperator::Sin => value.sin(),
        UnaryOperator::Cos => value.cos(),
        UnaryOperator::Tan => value.tan(),
        UnaryOperator::Asin => value.asin(),
        UnaryOperator::Acos => value.acos(),
        UnaryOperator::Atan => value.atan(),
    }
}
