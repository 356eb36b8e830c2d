use log::{debug, trace};

use crate::error::SweepError;

/// How the values of several sweep variables are combined into points.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Traversal {
    /// Steps through all series together: point `i` takes the `i`-th value of
    /// every variable. Stops at the end of the shortest series, so longer
    /// series are silently truncated.
    #[default]
    Sequential,
    /// Visits every combination of values.
    Permutation {
        /// Variable names from the outermost loop to the innermost. The
        /// innermost variable changes fastest. Variables not listed follow in
        /// declaration order.
        priority: Vec<String>,
    },
}

/// One named series of values.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepVariable {
    /// Name matched in command templates.
    pub name:   String,
    /// Values visited in order.
    pub values: Vec<f64>,
}

/// A set of variable assignments for one iteration of a sweep.
///
/// Variables are listed in the sweep's declaration order regardless of the
/// traversal order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SweepPoint {
    values: Vec<(String, f64)>,
}

impl SweepPoint {
    /// The value assigned to `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values
            .iter()
            .find_map(|(n, v)| (n == name).then_some(*v))
    }

    /// The assignments in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(n, v)| (n.as_str(), *v))
    }

    /// Number of assigned variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when no variable is assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for SweepPoint {
    fn from_iter<T: IntoIterator<Item = (K, f64)>>(iter: T) -> Self {
        Self { values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect() }
    }
}

/// The variables of a parameter sweep.
///
/// # Example
/// ```
/// use tracecalc::template::sweep::{Sweep, Traversal};
///
/// let sweep = Sweep::new([("v", vec![1.0, 2.0, 3.0]), ("i", vec![0.1, 0.2])]);
///
/// assert_eq!(sweep.len(&Traversal::Sequential).unwrap(), 2);
/// let all = Traversal::Permutation { priority: vec!["i".to_string()] };
/// assert_eq!(sweep.len(&all).unwrap(), 6);
///
/// let points = sweep.points(&all).unwrap();
/// assert_eq!(points[1].get("v"), Some(2.0));
/// assert_eq!(points[1].get("i"), Some(0.1));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sweep {
    variables: Vec<SweepVariable>,
}

impl Sweep {
    /// Creates a sweep from `(name, values)` pairs in declaration order.
    ///
    /// Declaring a name twice replaces the earlier series and keeps its
    /// position.
    pub fn new<K, I>(variables: I) -> Self
        where K: Into<String>,
              I: IntoIterator<Item = (K, Vec<f64>)>
    {
        let mut sweep = Self::default();
        for (name, values) in variables {
            sweep.push(name, values);
        }
        sweep
    }

    /// Adds a variable, or replaces the series of an existing one.
    pub fn push(&mut self, name: impl Into<String>, values: Vec<f64>) {
        let name = name.into();
        match self.variables.iter_mut().find(|v| v.name == name) {
            Some(existing) => existing.values = values,
            None => self.variables.push(SweepVariable { name, values }),
        }
    }

    /// The variables in declaration order.
    #[must_use]
    pub fn variables(&self) -> &[SweepVariable] {
        &self.variables
    }

    /// The variable names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variables.iter().map(|v| v.name.as_str())
    }

    /// Number of points `traversal` produces.
    ///
    /// A sequential sweep without variables has no points; a permutation
    /// sweep without variables has exactly one empty point.
    ///
    /// # Errors
    /// See [`Sweep::points`].
    pub fn len(&self, traversal: &Traversal) -> Result<usize, SweepError> {
        match traversal {
            Traversal::Sequential => Ok(self.variables
                                            .iter()
                                            .map(|v| v.values.len())
                                            .min()
                                            .unwrap_or(0)),
            Traversal::Permutation { priority } => {
                self.loop_order(priority)?;
                Ok(self.variables
                       .iter()
                       .fold(1usize, |acc, v| acc.saturating_mul(v.values.len())))
            },
        }
    }

    /// Expands the sweep into its points.
    ///
    /// # Errors
    /// For `Traversal::Permutation`:
    /// - `SweepError::UnknownVariable` if `priority` names a variable the
    ///   sweep does not declare.
    /// - `SweepError::DuplicatePriority` if `priority` lists a name twice.
    pub fn points(&self, traversal: &Traversal) -> Result<Vec<SweepPoint>, SweepError> {
        let count = self.len(traversal)?;
        debug!("expanding {} variable(s) into {count} point(s)", self.variables.len());

        let points = match traversal {
            Traversal::Sequential => (0..count).map(|i| self.point_at(|_| i)).collect(),
            Traversal::Permutation { priority } => {
                let order = self.loop_order(priority)?;
                let mut indices = vec![0; self.variables.len()];
                (0..count).map(|flat| {
                              let mut rest = flat;
                              for &var in order.iter().rev() {
                                  let len = self.variables[var].values.len();
                                  indices[var] = rest % len;
                                  rest /= len;
                              }
                              self.point_at(|var| indices[var])
                          })
                          .collect()
            },
        };
        Ok(points)
    }

    /// Builds the point that takes value `index(v)` of every variable `v`.
    fn point_at(&self, index: impl Fn(usize) -> usize) -> SweepPoint {
        let point = SweepPoint { values: self.variables
                                             .iter()
                                             .enumerate()
                                             .map(|(v, var)| (var.name.clone(), var.values[index(v)]))
                                             .collect(), };
        trace!("sweep point {point:?}");
        point
    }

    /// Resolves a priority list into variable indices, outermost first.
    fn loop_order(&self, priority: &[String]) -> Result<Vec<usize>, SweepError> {
        let mut order = Vec::with_capacity(self.variables.len());
        for name in priority {
            let index = self.variables
                            .iter()
                            .position(|v| &v.name == name)
                            .ok_or_else(|| SweepError::UnknownVariable { name: name.clone() })?;
            if order.contains(&index) {
                return Err(SweepError::DuplicatePriority { name: name.clone() });
            }
            order.push(index);
        }
        let unlisted: Vec<usize> = (0..self.variables.len()).filter(|i| !order.contains(i))
                                                            .collect();
        order.extend(unlisted);
        Ok(order)
    }
}

/// Parses a series such as `"1, 2.5, 1e3"`.
///
/// Values are separated by commas, whitespace or both. Empty entries are
/// skipped, so `"1,,2"` and a trailing comma are accepted.
///
/// # Errors
/// `SweepError::InvalidSeriesValue` for an entry that is not a number.
///
/// # Example
/// ```
/// use tracecalc::template::sweep::parse_series;
///
/// assert_eq!(parse_series("1, 2.5 1e3").unwrap(), vec![1.0, 2.5, 1000.0]);
/// assert!(parse_series("1, two").is_err());
/// ```
pub fn parse_series(text: &str) -> Result<Vec<f64>, SweepError> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<f64>()
                 .map_err(|_| SweepError::InvalidSeriesValue { token: token.to_string() })
        })
        .collect()
}
