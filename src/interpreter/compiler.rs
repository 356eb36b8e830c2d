use std::fmt;

use log::debug;

use crate::{
    EngineConfig,
    ast::{BinaryOperator, Constant, Expr, LiteralValue},
    error::ExprError,
    interpreter::{
        evaluator::{core::Bindings, function::core::lookup_builtin},
        parser::core::parse,
        value::Value,
    },
};

/// One element of a compiled postfix program.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// Push a numeric literal.
    Literal(LiteralValue),
    /// Push the value bound to a name.
    Variable(String),
    /// Push `π` or `e`.
    Constant(Constant),
    /// Pop two operands and combine them.
    BinaryOp(BinaryOperator),
    /// Negate the next operand.
    UnaryMinus,
    /// Pop `arity` operands and call a registry function.
    Call {
        /// Function name.
        name:  String,
        /// Number of arguments at the call site.
        arity: usize,
    },
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{value}"),
            Self::Variable(name) => write!(f, "{name}"),
            Self::Constant(constant) => write!(f, "{constant}"),
            Self::BinaryOp(op) => write!(f, "{op}"),
            Self::UnaryMinus => write!(f, "neg"),
            Self::Call { name, arity } => write!(f, "{name}/{arity}"),
        }
    }
}

/// A compiled expression in postfix order.
///
/// The instruction list is immutable once built and can be evaluated any
/// number of times against different bindings. It holds no interior
/// mutability, so it can be shared between threads.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    /// Wraps an instruction list without validating it.
    ///
    /// Evaluating a list that does not reduce to exactly one value yields
    /// `ExprError::MalformedProgram`.
    #[must_use]
    pub const fn from_instructions(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    /// The instructions in emission order.
    #[must_use]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Evaluates the program with the default engine configuration.
    ///
    /// # Errors
    /// See [`Program::evaluate_with`].
    ///
    /// # Example
    /// ```
    /// use tracecalc::{Bindings, compile};
    ///
    /// let program = compile("x * 2").unwrap();
    /// let mut bindings = Bindings::new();
    /// bindings.insert_vector("x", vec![1.0, 2.0]);
    ///
    /// let result = program.evaluate(&bindings).unwrap();
    /// assert_eq!(result.to_vec(), vec![2.0, 4.0]);
    /// ```
    pub fn evaluate(&self, bindings: &Bindings) -> Result<Value, ExprError> {
        self.evaluate_with(bindings, &EngineConfig::default())
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, instruction) in self.instructions.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{instruction}")?;
        }
        Ok(())
    }
}

/// Parses and compiles a source string.
///
/// # Errors
/// - `ExprError::Parse` for malformed input.
/// - `ExprError::RecursionLimitExceeded` for input nested deeper than
///   `config.max_depth`, or whose evaluation would descend deeper than that.
/// - `ExprError::UnknownFunction` / `ExprError::ArityMismatch` for calls the
///   registry cannot satisfy.
///
/// # Example
/// ```
/// use tracecalc::{EngineConfig, interpreter::compiler::compile_source};
///
/// let program = compile_source("-2^2", &EngineConfig::default()).unwrap();
/// assert_eq!(program.to_string(), "2 neg 2 ^");
/// ```
pub fn compile_source(source: &str, config: &EngineConfig) -> Result<Program, ExprError> {
    let expr = parse(source, config)?;
    let depth = expr.depth();
    if depth > config.max_depth {
        return Err(ExprError::RecursionLimitExceeded { limit: config.max_depth });
    }

    let program = compile_expr(&expr)?;
    debug!("compiled '{source}' (depth {depth}) into {} instructions",
           program.instructions.len());
    Ok(program)
}

/// Flattens a parsed tree into a postfix program.
///
/// # Errors
/// Returns `UnknownFunction` or `ArityMismatch` for invalid calls.
///
/// # Example
/// ```
/// use tracecalc::{
///     ast::{BinaryOperator, Expr, LiteralValue},
///     interpreter::compiler::{Instruction, compile_expr},
/// };
///
/// let tree = Expr::BinaryOp { left:  Box::new(Expr::Literal(LiteralValue::Integer(1))),
///                             op:    BinaryOperator::Sub,
///                             right: Box::new(Expr::Variable("x".to_string())), };
///
/// let program = compile_expr(&tree).unwrap();
/// assert_eq!(program.instructions(),
///            &[Instruction::Literal(LiteralValue::Integer(1)),
///              Instruction::Variable("x".to_string()),
///              Instruction::BinaryOp(BinaryOperator::Sub)]);
/// ```
pub fn compile_expr(expr: &Expr) -> Result<Program, ExprError> {
    Ok(Program { instructions: flatten(expr)? })
}

/// Returns the instruction fragment for one node.
///
/// Each node yields a fragment that evaluates to exactly one value; parents
/// concatenate their children's fragments and append their own instruction.
/// Operator spines are walked in a loop, one operand fragment per link.
fn flatten(expr: &Expr) -> Result<Vec<Instruction>, ExprError> {
    match expr {
        Expr::Literal(value) => Ok(vec![Instruction::Literal(*value)]),
        Expr::Constant(constant) => Ok(vec![Instruction::Constant(*constant)]),
        Expr::Variable(name) => Ok(vec![Instruction::Variable(name.clone())]),
        Expr::Negate(operand) => {
            let mut fragment = flatten(operand)?;
            fragment.push(Instruction::UnaryMinus);
            Ok(fragment)
        },
        Expr::BinaryOp { .. } | Expr::Chain { .. } => {
            let (leftmost, links) = expr.spine();
            let mut fragment = flatten(leftmost)?;
            for (op, operand) in links {
                fragment.extend(flatten(operand)?);
                fragment.push(Instruction::BinaryOp(op));
            }
            Ok(fragment)
        },
        Expr::Call { name, arguments } => {
            let builtin = lookup_builtin(name)?;
            builtin.check_arity(arguments.len())?;

            let mut fragment = Vec::new();
            for argument in arguments {
                fragment.extend(flatten(argument)?);
            }
            fragment.push(Instruction::Call { name:  name.clone(),
                                              arity: arguments.len(), });
            Ok(fragment)
        },
    }
}
