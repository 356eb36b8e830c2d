use std::fmt;

/// Represents a numeric literal as written in the source.
///
/// A literal keeps the most specific representation: an integer when the
/// text has no fractional part and no exponent, a real otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralValue {
    /// A 64-bit signed integer literal, such as `42`.
    Integer(i64),
    /// A 64-bit floating-point literal, such as `4.2` or `1e-3`.
    Real(f64),
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => write!(f, "{r:?}"),
        }
    }
}

/// Named mathematical constants recognised by the grammar.
///
/// Both are matched case-insensitively (`pi`, `PI`, `e`, `E`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    /// π
    Pi,
    /// Euler's number.
    E,
}

impl Constant {
    /// Returns the machine-precision value of the constant.
    #[must_use]
    pub const fn value(self) -> f64 {
        match self {
            Self::Pi => std::f64::consts::PI,
            Self::E => std::f64::consts::E,
        }
    }

    /// Matches an identifier against the constant names, ignoring case.
    ///
    /// # Example
    /// ```
    /// use tracecalc::ast::Constant;
    ///
    /// assert_eq!(Constant::from_identifier("Pi"), Some(Constant::Pi));
    /// assert_eq!(Constant::from_identifier("e"), Some(Constant::E));
    /// assert_eq!(Constant::from_identifier("exp"), None);
    /// ```
    #[must_use]
    pub fn from_identifier(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("pi") {
            Some(Self::Pi)
        } else if name.eq_ignore_ascii_case("e") {
            Some(Self::E)
        } else {
            None
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pi => write!(f, "PI"),
            Self::E => write!(f, "E"),
        }
    }
}

/// Binary arithmetic operators, in the order of the grammar levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`, always floating-point division.
    Div,
    /// `^`, right-associative.
    Pow,
}

impl BinaryOperator {
    /// Applies the operator to two scalars.
    ///
    /// # Example
    /// ```
    /// use tracecalc::ast::BinaryOperator;
    ///
    /// assert_eq!(BinaryOperator::Div.apply(7.0, 2.0), 3.5);
    /// assert_eq!(BinaryOperator::Pow.apply(2.0, 10.0), 1024.0);
    /// ```
    #[must_use]
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            Self::Add => left + right,
            Self::Sub => left - right,
            Self::Mul => left * right,
            Self::Div => left / right,
            Self::Pow => left.powf(right),
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "^",
        };
        write!(f, "{symbol}")
    }
}

/// An abstract syntax tree node for one expression.
///
/// The parser produces this tree; the compiler flattens it into a postfix
/// [`Program`](crate::interpreter::compiler::Program).
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal.
    Literal(LiteralValue),
    /// `PI` or `E`.
    Constant(Constant),
    /// Reference to a variable, resolved at evaluation time.
    Variable(String),
    /// One leading `-` applied to an atom.
    Negate(Box<Self>),
    /// A binary operation.
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
    },
    /// A left-associative run such as `a + b - c` or `a * b / c`.
    ///
    /// Equivalent to nested [`Expr::BinaryOp`]s leaning left, but flat, so a
    /// long sum does not grow the tree.
    Chain {
        /// The leftmost operand.
        first: Box<Self>,
        /// Every following operator with its right operand, in source order.
        rest:  Vec<(BinaryOperator, Self)>,
    },
    /// Function call expression (e.g. `sin(x)`).
    Call {
        /// Name of the function being called.
        name:      String,
        /// Arguments in source order. Never empty.
        arguments: Vec<Self>,
    },
}

impl Expr {
    /// Returns how deep the stack machine descends to evaluate this tree.
    ///
    /// Leaves cost nothing. A run of negations, a call and a whole
    /// left-leaning operator spine each add one level above their operands,
    /// so `x + x + x` is as shallow as `x + x`.
    ///
    /// ## Example
    /// ```
    /// use tracecalc::{
    ///     EngineConfig,
    ///     ast::{Expr, LiteralValue},
    ///     interpreter::parser::core::parse,
    /// };
    ///
    /// let leaf = Expr::Literal(LiteralValue::Integer(1));
    /// let negated = Expr::Negate(Box::new(leaf.clone()));
    /// assert_eq!(leaf.depth(), 0);
    /// assert_eq!(negated.depth(), 1);
    ///
    /// let config = EngineConfig::default();
    /// assert_eq!(parse("1 + 2 + 3 + 4", &config).unwrap().depth(), 1);
    /// assert_eq!(parse("2 * (3 + 4)", &config).unwrap().depth(), 2);
    /// ```
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Literal(_) | Self::Constant(_) | Self::Variable(_) => 0,
            Self::Negate(inner) => {
                let mut operand = inner.as_ref();
                while let Self::Negate(next) = operand {
                    operand = next.as_ref();
                }
                1 + operand.depth()
            },
            Self::BinaryOp { .. } | Self::Chain { .. } => {
                let (leftmost, links) = self.spine();
                let deepest = links.iter().map(|(_, operand)| operand.depth()).max();
                1 + deepest.unwrap_or(0).max(leftmost.depth())
            },
            Self::Call { arguments, .. } => {
                1 + arguments.iter().map(Self::depth).max().unwrap_or(0)
            },
        }
    }

    /// Walks down the left edge of nested operators.
    ///
    /// Returns the leftmost operand that is not an operator node, and every
    /// operator with its right operand in evaluation order. For any other
    /// node the spine is the node itself with no links.
    #[must_use]
    pub fn spine(&self) -> (&Self, Vec<(BinaryOperator, &Self)>) {
        let mut links = Vec::new();
        let mut node = self;
        loop {
            match node {
                Self::BinaryOp { left, op, right } => {
                    links.push((*op, right.as_ref()));
                    node = left.as_ref();
                },
                Self::Chain { first, rest } => {
                    links.extend(rest.iter().rev().map(|(op, operand)| (*op, operand)));
                    node = first.as_ref();
                },
                _ => break,
            }
        }
        links.reverse();
        (node, links)
    }
}
