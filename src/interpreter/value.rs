use std::{fmt, rc::Rc};

use crate::{ast::LiteralValue, util::num::i64_to_f64};

/// Represents a runtime value in the evaluator.
///
/// Bare integer literals evaluate to `Integer`; every computed result is a
/// `Real` or a `Vector`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An integer produced directly by a literal such as `42`.
    Integer(i64),
    /// A double-precision scalar.
    Real(f64),
    /// A fixed-length numeric series, such as a plotted trace.
    Vector(Rc<Vec<f64>>),
}

/// Borrowed view of a value as one scalar or a slice of elements.
///
/// Broadcasting code matches on this instead of on [`Value`], which folds the
/// integer and real cases together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand<'a> {
    /// A single number.
    Scalar(f64),
    /// The elements of a vector.
    Vector(&'a [f64]),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<Vec<f64>> for Value {
    fn from(v: Vec<f64>) -> Self {
        Self::Vector(Rc::new(v))
    }
}

impl From<&[f64]> for Value {
    fn from(v: &[f64]) -> Self {
        Self::Vector(Rc::new(v.to_vec()))
    }
}

impl From<LiteralValue> for Value {
    fn from(v: LiteralValue) -> Self {
        match v {
            LiteralValue::Integer(n) => Self::Integer(n),
            LiteralValue::Real(r) => Self::Real(r),
        }
    }
}

impl Value {
    /// Borrows the value as an [`Operand`].
    #[must_use]
    pub fn operand(&self) -> Operand<'_> {
        match self {
            Self::Integer(n) => Operand::Scalar(i64_to_f64(*n)),
            Self::Real(r) => Operand::Scalar(*r),
            Self::Vector(v) => Operand::Vector(v.as_slice()),
        }
    }

    /// Returns the scalar as an `f64`, or `None` for vectors.
    ///
    /// # Example
    /// ```
    /// use tracecalc::Value;
    ///
    /// assert_eq!(Value::Integer(3).as_scalar(), Some(3.0));
    /// assert_eq!(Value::from(vec![1.0]).as_scalar(), None);
    /// ```
    #[must_use]
    pub fn as_scalar(&self) -> Option<f64> {
        match self.operand() {
            Operand::Scalar(x) => Some(x),
            Operand::Vector(_) => None,
        }
    }

    /// Returns the elements of a vector, or `None` for scalars.
    ///
    /// # Example
    /// ```
    /// use tracecalc::Value;
    ///
    /// assert_eq!(Value::from(vec![1.0, 2.0]).as_vector(), Some(&[1.0, 2.0][..]));
    /// assert_eq!(Value::Real(1.0).as_vector(), None);
    /// ```
    #[must_use]
    pub fn as_vector(&self) -> Option<&[f64]> {
        match self {
            Self::Vector(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    /// Returns `true` for `Value::Vector`.
    #[must_use]
    pub const fn is_vector(&self) -> bool {
        matches!(self, Self::Vector(_))
    }

    /// Copies the value into a vector; a scalar becomes a one-element vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        match self.operand() {
            Operand::Scalar(x) => vec![x],
            Operand::Vector(v) => v.to_vec(),
        }
    }

    /// Applies `f` to every element, producing a `Real` or a `Vector`.
    ///
    /// # Example
    /// ```
    /// use tracecalc::Value;
    ///
    /// let v = Value::from(vec![1.0, -2.0]).map(f64::abs);
    /// assert_eq!(v, Value::from(vec![1.0, 2.0]));
    ///
    /// assert_eq!(Value::Integer(-4).map(f64::abs), Value::Real(4.0));
    /// ```
    #[must_use]
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        match self.operand() {
            Operand::Scalar(x) => Self::Real(f(x)),
            Operand::Vector(v) => Self::Vector(Rc::new(v.iter().copied().map(f).collect())),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => write!(f, "{r}"),
            Self::Vector(v) => {
                write!(f, "[")?;
                for (i, x) in v.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{x}")?;
                }
                write!(f, "]")
            },
        }
    }
}
