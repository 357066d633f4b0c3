use crate::ast::BinaryOperator;

/// Applies a binary operator to two already evaluated operands.
///
/// `%` is the truncated floating-point remainder (the sign follows the left
/// operand), `^` is [`f64::powf`], and `atan2` takes its operands as
/// `(y, x)`, in that order.
///
/// # Example
/// ```
/// use kinexpr::{ast::BinaryOperator, interpreter::evaluator::binary::eval_binary};
///
/// assert_eq!(eval_binary(BinaryOperator::Remainder, -7.0, 3.0), -1.0);
/// assert_eq!(eval_binary(BinaryOperator::Exp, 2.0, 10.0), 1024.0);
/// assert_eq!(eval_binary(BinaryOperator::Atan2, 0.0, 1.0), 0.0);
/// ```
#[must_use]
pub fn eval_binary(op: BinaryOperator, lhs: f64, rhs: f64) -> f64 {
    match op {
        BinaryOperator::Plus => lhs + rhs,
        BinaryOperator::Minus => lhs - rhs,
        BinaryOperator::Mul => lhs * rhs,
        BinaryOperator::Div => lhs / rhs,
        BinaryOperator::Remainder => lhs % rhs,
        BinaryOperator::Exp => lhs.powf(rhs),
        BinaryOperator::Atan2 => lhs.atan2(rhs),
    }
}
