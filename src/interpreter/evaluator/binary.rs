use crate::{
    ast::BinaryOperator,
    error::ExprError,
    interpreter::{
        evaluator::core::EvalResult,
        value::{Operand, Value},
    },
};

/// Evaluates a binary operation between two values.
///
/// Scalars combine directly. A vector and a scalar broadcast the scalar over
/// every element, on either side. Two vectors combine elementwise and must
/// have equal lengths. Every result is a `Real` or a `Vector`, even when both
/// operands are integer literals: `4 / 2` is `Real(2.0)` and `7 / 2` is
/// `Real(3.5)`.
///
/// # Parameters
/// - `op`: The operator.
/// - `left`: Left operand.
/// - `right`: Right operand.
///
/// # Errors
/// `ExprError::ShapeMismatch` when both operands are vectors of different
/// lengths.
///
/// # Example
/// ```
/// use tracecalc::{Value, ast::BinaryOperator, interpreter::evaluator::binary::eval_binary};
///
/// let x = Value::from(vec![1.0, 2.0, 3.0]);
///
/// let scaled = eval_binary(BinaryOperator::Mul, &Value::Integer(2), &x).unwrap();
/// assert_eq!(scaled, Value::from(vec![2.0, 4.0, 6.0]));
///
/// let err = eval_binary(BinaryOperator::Add, &x, &Value::from(vec![1.0])).unwrap_err();
/// assert_eq!(err.to_string(), "cannot combine vectors of length 3 and 1");
/// ```
pub fn eval_binary(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
    match (left.operand(), right.operand()) {
        (Operand::Scalar(l), Operand::Scalar(r)) => Ok(Value::Real(op.apply(l, r))),

        (Operand::Vector(l), Operand::Scalar(r)) => {
            Ok(l.iter().map(|&x| op.apply(x, r)).collect::<Vec<_>>().into())
        },

        (Operand::Scalar(l), Operand::Vector(r)) => {
            Ok(r.iter().map(|&x| op.apply(l, x)).collect::<Vec<_>>().into())
        },

        (Operand::Vector(l), Operand::Vector(r)) => {
            if l.len() != r.len() {
                return Err(ExprError::ShapeMismatch { left:  l.len(),
                                                      right: r.len(), });
            }
            Ok(l.iter()
                .zip(r)
                .map(|(&a, &b)| op.apply(a, b))
                .collect::<Vec<_>>()
                .into())
        },
    }
}
