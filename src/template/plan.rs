use std::{fmt, str::FromStr};

use log::debug;

use crate::{
    error::SweepError,
    template::{
        command::CommandTemplate,
        sweep::{Sweep, Traversal},
    },
};

/// One line of a measurement script.
///
/// A step without an instrument is a comment. A step with an instrument
/// writes its command, or queries it when an output name is given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Instrument the command is sent to.
    pub instrument: Option<String>,
    /// Command text, or the comment text.
    pub command:    String,
    /// Name under which a query's reply is stored.
    pub output:     Option<String>,
}

impl Step {
    /// A step that only annotates the script.
    #[must_use]
    pub fn comment(text: impl Into<String>) -> Self {
        Self { instrument: None,
               command:    text.into(),
               output:     None, }
    }

    /// A step that sends `command` to `instrument`.
    #[must_use]
    pub fn write(instrument: impl Into<String>, command: impl Into<String>) -> Self {
        Self { instrument: Some(instrument.into()),
               command:    command.into(),
               output:     None, }
    }

    /// A step that sends `command` to `instrument` and keeps the reply as
    /// `output`.
    #[must_use]
    pub fn query(instrument: impl Into<String>,
                 command: impl Into<String>,
                 output: impl Into<String>)
                 -> Self {
        Self { instrument: Some(instrument.into()),
               command:    command.into(),
               output:     Some(output.into()), }
    }
}

/// Parses `text`, `instrument|command` or `instrument|command|output`.
///
/// Fields are trimmed. An empty instrument field makes the step a comment.
///
/// # Example
/// ```
/// use tracecalc::template::plan::Step;
///
/// let step: Step = "dmm | MEAS:VOLT? | vout".parse().unwrap();
/// assert_eq!(step, Step::query("dmm", "MEAS:VOLT?", "vout"));
///
/// let step: Step = "settle for a second".parse().unwrap();
/// assert_eq!(step, Step::comment("settle for a second"));
/// ```
impl FromStr for Step {
    type Err = SweepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SweepError::InvalidStep { step: s.to_string() };
        let fields: Vec<&str> = s.split('|').map(str::trim).collect();

        match fields.as_slice() {
            [text] => Ok(Self::comment(*text)),
            ["", text] => Ok(Self::comment(*text)),
            [_, ""] | [_, "", _] | ["", _, _] => Err(invalid()),
            [instrument, command] | [instrument, command, ""] => {
                Ok(Self::write(*instrument, *command))
            },
            [instrument, command, output] => Ok(Self::query(*instrument, *command, *output)),
            _ => Err(invalid()),
        }
    }
}

/// What to do with one step at one sweep point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Send a command.
    Write {
        /// Target instrument.
        instrument: String,
        /// Command with every variable substituted.
        command:    String,
    },
    /// Send a command and store the reply.
    Query {
        /// Target instrument.
        instrument: String,
        /// Command with every variable substituted.
        command:    String,
        /// Name the reply is stored under.
        output:     String,
    },
    /// Annotation only.
    Comment(String),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Write { instrument, command } => write!(f, "{instrument}.write({command})"),
            Self::Query { instrument,
                          command,
                          output, } => write!(f, "{output} = {instrument}.query({command})"),
            Self::Comment(text) => write!(f, "# {text}"),
        }
    }
}

/// Steps paired with a sweep, ready to expand into per-point actions.
///
/// # Example
/// ```
/// use tracecalc::template::{
///     plan::{Action, Step, SweepPlan},
///     sweep::{Sweep, Traversal},
/// };
///
/// let steps = vec![Step::write("psu", "VOLT v"), Step::query("dmm", "MEAS?", "reading")];
/// let sweep = Sweep::new([("v", vec![1.0, 2.0])]);
/// let plan = SweepPlan::new(steps, sweep, Traversal::Sequential).unwrap();
///
/// let iterations = plan.iterations().unwrap();
/// assert_eq!(iterations.len(), 2);
/// assert_eq!(iterations[1][0],
///            Action::Write { instrument: "psu".to_string(),
///                            command:    "VOLT 2".to_string(), });
/// assert_eq!(plan.outputs(), vec!["reading"]);
/// ```
#[derive(Debug, Clone)]
pub struct SweepPlan {
    steps:     Vec<(Step, CommandTemplate)>,
    sweep:     Sweep,
    traversal: Traversal,
}

impl SweepPlan {
    /// Templates every step against the sweep's variable names.
    ///
    /// # Errors
    /// - `SweepError::UnknownVariable` / `SweepError::DuplicatePriority` for
    ///   an invalid permutation priority.
    /// - `SweepError::Pattern` if the names cannot be matched.
    pub fn new(steps: Vec<Step>, sweep: Sweep, traversal: Traversal) -> Result<Self, SweepError> {
        sweep.len(&traversal)?;

        let names: Vec<&str> = sweep.names().collect();
        let steps = steps.into_iter()
                         .map(|step| {
                             let template = if step.instrument.is_some() {
                                 CommandTemplate::parse(&step.command, &names)?
                             } else {
                                 CommandTemplate::parse::<&str>(&step.command, &[])?
                             };
                             Ok((step, template))
                         })
                         .collect::<Result<Vec<_>, SweepError>>()?;

        debug!("planned {} step(s) over {} variable(s)", steps.len(), names.len());
        Ok(Self { steps,
                  sweep,
                  traversal })
    }

    /// Number of iterations.
    ///
    /// # Errors
    /// Never fails for a plan built with [`SweepPlan::new`]; the traversal
    /// was validated there.
    pub fn len(&self) -> Result<usize, SweepError> {
        self.sweep.len(&self.traversal)
    }

    /// Sweep variables referenced by at least one command, in declaration
    /// order.
    #[must_use]
    pub fn used_variables(&self) -> Vec<&str> {
        self.sweep
            .names()
            .filter(|name| {
                self.steps
                    .iter()
                    .any(|(_, template)| template.variables().contains(name))
            })
            .collect()
    }

    /// Distinct query output names in step order.
    #[must_use]
    pub fn outputs(&self) -> Vec<&str> {
        let mut outputs: Vec<&str> = Vec::new();
        for (step, _) in &self.steps {
            if let Some(output) = &step.output
               && !outputs.contains(&output.as_str())
            {
                outputs.push(output);
            }
        }
        outputs
    }

    /// Expands the plan into one action list per sweep point.
    ///
    /// # Errors
    /// `SweepError::MissingValue` cannot occur for plans built with
    /// [`SweepPlan::new`]; traversal errors are reported as in
    /// [`Sweep::points`].
    pub fn iterations(&self) -> Result<Vec<Vec<Action>>, SweepError> {
        self.sweep
            .points(&self.traversal)?
            .iter()
            .map(|point| {
                self.steps
                    .iter()
                    .map(|(step, template)| {
                        let command = template.render(point)?;
                        Ok(match (&step.instrument, &step.output) {
                            (None, _) => Action::Comment(command),
                            (Some(instrument), None) => {
                                Action::Write { instrument: instrument.clone(),
                                                command }
                            },
                            (Some(instrument), Some(output)) => {
                                Action::Query { instrument: instrument.clone(),
                                                command,
                                                output: output.clone() }
                            },
                        })
                    })
                    .collect::<Result<Vec<Action>, SweepError>>()
            })
            .collect()
    }
}
