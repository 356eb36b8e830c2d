use std::collections::HashMap;

use log::{debug, trace, warn};

use crate::{
    EngineConfig,
    ast::LiteralValue,
    error::ExprError,
    interpreter::{
        compiler::{Instruction, Program},
        evaluator::{binary::eval_binary, function::core::lookup_builtin},
        value::Value,
    },
    util::num::is_exact_in_f64,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or an
/// [`ExprError`] describing the failure.
pub type EvalResult<T> = Result<T, ExprError>;

/// Variable bindings for one evaluation.
///
/// Maps names to scalars or vectors. Vectors used together in one expression
/// must have equal lengths; a mismatch surfaces as
/// `ExprError::ShapeMismatch` when the two meet.
///
/// ## Usage
///
/// Build one table per evaluation. A compiled [`Program`] never keeps a
/// reference to it, so the same program can run against many tables.
///
/// # Example
/// ```
/// use tracecalc::{Bindings, Value};
///
/// let mut bindings = Bindings::new();
/// bindings.insert_scalar("gain", 2.5);
/// bindings.insert_vector("x", vec![1.0, 2.0, 3.0]);
///
/// assert_eq!(bindings.get("gain"), Some(&Value::Real(2.5)));
/// assert_eq!(bindings.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    values: HashMap<String, Value>,
}

impl Bindings {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to any value, returning the previous binding.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(name.into(), value.into())
    }

    /// Binds `name` to a scalar.
    pub fn insert_scalar(&mut self, name: impl Into<String>, value: f64) -> Option<Value> {
        self.insert(name, value)
    }

    /// Binds `name` to a vector.
    pub fn insert_vector(&mut self, name: impl Into<String>, values: Vec<f64>) -> Option<Value> {
        self.insert(name, values)
    }

    /// Looks up a binding.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Number of bound names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Bindings {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self { values: iter.into_iter()
                           .map(|(k, v)| (k.into(), v.into()))
                           .collect(), }
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Bindings {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        self.values
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

/// The stack machine for one evaluation.
///
/// The instruction list doubles as the stack: each step pops from the tail of
/// the remaining slice, and operands are produced by recursing.
struct Machine<'a> {
    bindings: &'a Bindings,
    limit:    usize,
}

impl Machine<'_> {
    /// Pops one instruction from the tail of `rest` and evaluates it,
    /// consuming further instructions for its operands.
    ///
    /// `BinaryOp` evaluates its second operand first, because it was emitted
    /// last. Operators stacked on its first operand share the same level, so
    /// a long sum costs one level rather than one per term. `Call` likewise evaluates its arguments last-to-first and then
    /// restores source order.
    fn eval_next(&self, rest: &mut &[Instruction], depth: usize) -> EvalResult<Value> {
        if depth > self.limit {
            return Err(ExprError::RecursionLimitExceeded { limit: self.limit });
        }
        let Some((instruction, remaining)) = rest.split_last() else {
            return Err(ExprError::MalformedProgram { details: "operand stack underflow".to_string(), });
        };
        *rest = remaining;
        trace!("depth {depth}: {instruction}");

        match instruction {
            Instruction::Literal(literal) => Ok(Self::eval_literal(*literal)),
            Instruction::Variable(name) => {
                self.bindings
                    .get(name)
                    .cloned()
                    .ok_or_else(|| ExprError::UndefinedVariable { name: name.clone() })
            },
            Instruction::Constant(constant) => Ok(Value::Real(constant.value())),
            Instruction::UnaryMinus => {
                let mut negate = true;
                while let Some((Instruction::UnaryMinus, remaining)) = rest.split_last() {
                    *rest = remaining;
                    negate = !negate;
                }
                let operand = self.eval_next(rest, depth + 1)?;
                Ok(operand.map(|x| if negate { -x } else { x }))
            },
            Instruction::BinaryOp(op) => {
                // The first operand of a left-leaning chain ends in the next
                // operator, so the whole spine is unwound at this level.
                let mut links = vec![(*op, self.eval_next(rest, depth + 1)?)];
                while let Some((Instruction::BinaryOp(op), remaining)) = rest.split_last() {
                    *rest = remaining;
                    links.push((*op, self.eval_next(rest, depth + 1)?));
                }

                let mut acc = self.eval_next(rest, depth + 1)?;
                for (op, second) in links.iter().rev() {
                    acc = eval_binary(*op, &acc, second)?;
                }
                Ok(acc)
            },
            Instruction::Call { name, arity } => {
                let builtin = lookup_builtin(name)?;
                builtin.check_arity(*arity)?;

                let mut args = Vec::with_capacity(*arity);
                for _ in 0..*arity {
                    args.push(self.eval_next(rest, depth + 1)?);
                }
                args.reverse();
                builtin.call(&args)
            },
        }
    }

    fn eval_literal(literal: LiteralValue) -> Value {
        if let LiteralValue::Integer(n) = literal
           && !is_exact_in_f64(n)
        {
            warn!("integer literal {n} loses precision once used in arithmetic");
        }
        literal.into()
    }
}

impl Program {
    /// Evaluates the program against `bindings`.
    ///
    /// # Errors
    /// - `UndefinedVariable` for names missing from `bindings`.
    /// - `UnknownFunction` / `ArityMismatch` for calls the registry rejects
    ///   (only reachable for hand-built programs).
    /// - `ShapeMismatch` when vectors of different lengths meet.
    /// - `ExpectedVector` when `fft` receives a scalar.
    /// - `RecursionLimitExceeded` beyond `config.max_depth`.
    /// - `MalformedProgram` if the instructions do not reduce to exactly one
    ///   value.
    ///
    /// # Example
    /// ```
    /// use tracecalc::{
    ///     Bindings, EngineConfig, Value,
    ///     ast::{BinaryOperator, LiteralValue},
    ///     interpreter::compiler::{Instruction, Program},
    /// };
    ///
    /// let program = Program::from_instructions(vec![Instruction::Literal(LiteralValue::Integer(7)),
    ///                                               Instruction::Literal(LiteralValue::Integer(2)),
    ///                                               Instruction::BinaryOp(BinaryOperator::Div)]);
    ///
    /// let result = program.evaluate_with(&Bindings::new(), &EngineConfig::default())
    ///                     .unwrap();
    /// assert_eq!(result, Value::Real(3.5));
    /// ```
    pub fn evaluate_with(&self, bindings: &Bindings, config: &EngineConfig) -> EvalResult<Value> {
        debug!("evaluating '{self}' with {} binding(s)", bindings.len());

        let machine = Machine { bindings,
                                limit: config.max_depth };
        let mut rest = self.instructions();
        let value = machine.eval_next(&mut rest, 0)?;

        if !rest.is_empty() {
            return Err(ExprError::MalformedProgram { details: format!("{} instruction(s) left after the result",
                                                                      rest.len()), });
        }
        Ok(value)
    }
}
