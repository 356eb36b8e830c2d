use log::debug;

use crate::{
    Bindings, EngineConfig, Program,
    error::ExprError,
    interpreter::value::{Operand, Value},
};

/// Applies a compiled expression to every series of a plot.
///
/// For each entry of `series`, the program runs with `x` bound to the shared
/// abscissa and `y` bound to that series. The result replaces the series: a
/// scalar result is repeated to the length of `x`, a vector result must have
/// exactly that length.
///
/// # Errors
/// Any evaluation error, or `ExprError::ShapeMismatch` when a result (or a
/// series) does not match the length of `x`.
///
/// # Example
/// ```
/// use tracecalc::{EngineConfig, compile, transform::transform_series};
///
/// let program = compile("y * 2 + x").unwrap();
/// let x = [0.0, 1.0, 2.0];
/// let series = vec![vec![1.0, 1.0, 1.0], vec![5.0, 6.0, 7.0]];
///
/// let out = transform_series(&program, &x, &series, &EngineConfig::default()).unwrap();
/// assert_eq!(out, vec![vec![2.0, 3.0, 4.0], vec![10.0, 13.0, 16.0]]);
/// ```
pub fn transform_series(program: &Program,
                        x: &[f64],
                        series: &[Vec<f64>],
                        config: &EngineConfig)
                        -> Result<Vec<Vec<f64>>, ExprError> {
    debug!("transforming {} series of length {} with '{program}'", series.len(), x.len());

    let abscissa = Value::from(x);
    series.iter()
          .map(|y| {
              if y.len() != x.len() {
                  return Err(ExprError::ShapeMismatch { left:  x.len(),
                                                        right: y.len(), });
              }
              let mut bindings = Bindings::new();
              bindings.insert("x", abscissa.clone());
              bindings.insert("y", y.as_slice());

              let result = program.evaluate_with(&bindings, config)?;
              match result.operand() {
                  Operand::Scalar(v) => Ok(vec![v; x.len()]),
                  Operand::Vector(v) if v.len() == x.len() => Ok(v.to_vec()),
                  Operand::Vector(v) => Err(ExprError::ShapeMismatch { left:  x.len(),
                                                                       right: v.len(), }),
              }
          })
          .collect()
}
