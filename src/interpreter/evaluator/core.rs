use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::{binary::eval_binary, unary::eval_unary},
        node::Node,
        registry::NodeKind,
    },
};

/// Result type used by evaluation and node construction.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

impl Node {
    /// Evaluates the tree numerically.
    ///
    /// Literal leaves yield their value and variable leaves yield the value
    /// currently bound in the registry. Operators follow IEEE semantics, so
    /// division by zero produces an infinity or `NaN` rather than an error.
    ///
    /// # Errors
    /// `NoBoundValue` if a variable in the tree has no bound value.
    ///
    /// # Example
    /// ```
    /// use kinexpr::interpreter::registry::Registry;
    ///
    /// let registry = Registry::new();
    /// let node = registry.interpret_node("atan2(1, 1) * 4").unwrap();
    /// assert!((node.eval().unwrap() - std::f64::consts::PI).abs() < 1e-12);
    ///
    /// let unbound = registry.interpret_node("x + 1").unwrap();
    /// assert!(unbound.eval().is_err());
    /// ```
    pub fn eval(&self) -> EvalResult<f64> {
        match self.kind() {
            NodeKind::Literal(value) => Ok(value),
            NodeKind::Variable(var) => {
                self.registry()
                    .bound_value(var)
                    .ok_or_else(|| RuntimeError::NoBoundValue { name: self.registry()
                                                                          .variable_name(var) })
            },
            NodeKind::Unary { op, child } => Ok(eval_unary(op, self.at(child).eval()?)),
            NodeKind::Binary { op, lhs, rhs } => {
                Ok(eval_binary(op, self.at(lhs).eval()?, self.at(rhs).eval()?))
            },
        }
    }
}
