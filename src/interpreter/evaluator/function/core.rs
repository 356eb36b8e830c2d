use std::fmt;

use crate::{
    error::ExprError,
    interpreter::{
        evaluator::{
            core::EvalResult,
            function::{builtin, reduce, spectral},
        },
        value::{Operand, Value},
    },
};

/// Specifies the allowed number of arguments for a builtin.
///
/// - `Exact(n)` means the builtin must receive exactly `n` arguments.
/// - `AtLeast(n)` means the builtin accepts `n` or more arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many arguments.
    Exact(usize),
    /// This many arguments or more.
    AtLeast(usize),
}

impl Arity {
    /// Tests whether the given argument count satisfies this arity constraint.
    #[must_use]
    pub const fn accepts(self, n: usize) -> bool {
        match self {
            Self::Exact(m) => n == m,
            Self::AtLeast(m) => n >= m,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{n}"),
            Self::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// How a builtin consumes its arguments.
#[derive(Debug, Clone, Copy)]
pub enum Kernel {
    /// Applied to every element of its single argument.
    Elementwise(fn(f64) -> f64),
    /// Folds every element of every argument into one number.
    Reduction(fn(&[f64]) -> f64),
    /// Maps a whole vector to a new vector. Scalars are rejected.
    Transform(fn(&[f64]) -> Vec<f64>),
}

/// One entry of the function registry.
#[derive(Debug)]
pub struct Builtin {
    /// Name used at call sites.
    pub name:   &'static str,
    /// Accepted argument count.
    pub arity:  Arity,
    /// The implementation.
    pub kernel: Kernel,
}

/// Defines builtin functions by generating a lookup table and a name list.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - the kernel implementing the builtin.
///
/// The macro produces:
/// - `BUILTIN_TABLE` (static table for lookup),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                kernel: $kernel:expr $(,)?
            }
        ),* $(,)?
    ) => {
        static BUILTIN_TABLE: &[Builtin] = &[
            $(
                Builtin { name: $name, arity: $arity, kernel: $kernel },
            )*
        ];
        /// Names of every function the registry knows, in table order.
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "sin"   => { arity: Arity::Exact(1),   kernel: Kernel::Elementwise(f64::sin) },
    "cos"   => { arity: Arity::Exact(1),   kernel: Kernel::Elementwise(f64::cos) },
    "tan"   => { arity: Arity::Exact(1),   kernel: Kernel::Elementwise(f64::tan) },
    "exp"   => { arity: Arity::Exact(1),   kernel: Kernel::Elementwise(f64::exp) },
    "sinh"  => { arity: Arity::Exact(1),   kernel: Kernel::Elementwise(f64::sinh) },
    "cosh"  => { arity: Arity::Exact(1),   kernel: Kernel::Elementwise(f64::cosh) },
    "tanh"  => { arity: Arity::Exact(1),   kernel: Kernel::Elementwise(f64::tanh) },
    "sqrt"  => { arity: Arity::Exact(1),   kernel: Kernel::Elementwise(f64::sqrt) },
    "log"   => { arity: Arity::Exact(1),   kernel: Kernel::Elementwise(f64::ln) },
    "log10" => { arity: Arity::Exact(1),   kernel: Kernel::Elementwise(f64::log10) },
    "abs"   => { arity: Arity::Exact(1),   kernel: Kernel::Elementwise(f64::abs) },
    "trunc" => { arity: Arity::Exact(1),   kernel: Kernel::Elementwise(builtin::trunc) },
    "round" => { arity: Arity::Exact(1),   kernel: Kernel::Elementwise(builtin::round) },
    "sgn"   => { arity: Arity::Exact(1),   kernel: Kernel::Elementwise(builtin::sgn) },
    "fft"   => { arity: Arity::Exact(1),   kernel: Kernel::Transform(spectral::magnitude_spectrum) },
    "sum"   => { arity: Arity::AtLeast(1), kernel: Kernel::Reduction(reduce::sum) },
    "mean"  => { arity: Arity::AtLeast(1), kernel: Kernel::Reduction(reduce::mean) },
    "min"   => { arity: Arity::AtLeast(1), kernel: Kernel::Reduction(reduce::min) },
    "max"   => { arity: Arity::AtLeast(1), kernel: Kernel::Reduction(reduce::max) },
}

/// Finds a builtin by name.
///
/// Names are case-sensitive.
///
/// # Errors
/// `ExprError::UnknownFunction` when no builtin has this name.
///
/// # Example
/// ```
/// use tracecalc::{
///     error::ExprError,
///     interpreter::evaluator::function::core::{Arity, lookup_builtin},
/// };
///
/// assert_eq!(lookup_builtin("mean").unwrap().arity, Arity::AtLeast(1));
/// assert!(matches!(lookup_builtin("foo"),
///                  Err(ExprError::UnknownFunction { .. })));
/// ```
pub fn lookup_builtin(name: &str) -> Result<&'static Builtin, ExprError> {
    BUILTIN_TABLE.iter()
                 .find(|b| b.name == name)
                 .ok_or_else(|| ExprError::UnknownFunction { name: name.to_string() })
}

impl Builtin {
    /// Verifies the argument count of a call site.
    ///
    /// # Errors
    /// `ExprError::ArityMismatch` when `got` is not accepted.
    pub fn check_arity(&self, got: usize) -> Result<(), ExprError> {
        if self.arity.accepts(got) {
            return Ok(());
        }
        Err(ExprError::ArityMismatch { name: self.name.to_string(),
                                       expected: self.arity,
                                       got })
    }

    /// Applies the builtin to evaluated arguments in source order.
    ///
    /// # Errors
    /// - `ArityMismatch` if `args` has the wrong length.
    /// - `ExpectedVector` if a transform receives a scalar.
    ///
    /// # Example
    /// ```
    /// use tracecalc::{Value, interpreter::evaluator::function::core::lookup_builtin};
    ///
    /// let max = lookup_builtin("max").unwrap();
    /// let args = [Value::from(vec![1.0, 9.0]), Value::Integer(4)];
    /// assert_eq!(max.call(&args).unwrap(), Value::Real(9.0));
    /// ```
    pub fn call(&self, args: &[Value]) -> EvalResult<Value> {
        self.check_arity(args.len())?;

        match (self.kernel, args) {
            (Kernel::Elementwise(f), [arg]) => Ok(arg.map(f)),
            (Kernel::Reduction(f), _) => {
                let elements: Vec<f64> = args.iter().flat_map(Value::to_vec).collect();
                Ok(Value::Real(f(&elements)))
            },
            (Kernel::Transform(f), [arg]) => match arg.operand() {
                Operand::Vector(v) => Ok(f(v).into()),
                Operand::Scalar(_) => Err(ExprError::ExpectedVector { name: self.name.to_string() }),
            },
            _ => Err(ExprError::ArityMismatch { name:     self.name.to_string(),
                                                expected: self.arity,
                                                got:      args.len(), }),
        }
    }
}
