use log::trace;
use regex::Regex;

use crate::{error::SweepError, template::sweep::SweepPoint};

/// One piece of a split command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text copied as-is.
    Text(String),
    /// A place where the named variable's value is substituted.
    Slot(String),
}

/// A command string split at every occurrence of a sweep variable.
///
/// Variables are recognised by plain substring matching, so a name also
/// matches inside a longer word: with the variable `V`, the command `VOLT V`
/// has two slots. Where several names could match at one position, the
/// longest wins.
///
/// # Example
/// ```
/// use tracecalc::template::command::{CommandTemplate, Segment};
///
/// let template = CommandTemplate::parse("SOUR:VOLT vset; CURR ilim", &["vset", "ilim"]).unwrap();
///
/// assert_eq!(template.slot_count(), 2);
/// assert_eq!(template.variables(), vec!["vset", "ilim"]);
/// assert_eq!(template.format_string(), "SOUR:VOLT {vset}; CURR {ilim}");
/// assert_eq!(template.segments()[0], Segment::Text("SOUR:VOLT ".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    segments: Vec<Segment>,
}

impl CommandTemplate {
    /// Splits `command` at every occurrence of any name in `names`.
    ///
    /// Empty names are ignored. Without any usable name the whole command is
    /// one literal segment.
    ///
    /// # Errors
    /// `SweepError::Pattern` if the names cannot be compiled into a matcher,
    /// which only happens for absurdly large name lists.
    pub fn parse<S: AsRef<str>>(command: &str, names: &[S]) -> Result<Self, SweepError> {
        let Some(matcher) = name_matcher(names)? else {
            return Ok(Self { segments: text_segment(command).into_iter().collect() });
        };

        let mut segments = Vec::new();
        let mut last = 0;
        for found in matcher.find_iter(command) {
            segments.extend(text_segment(&command[last..found.start()]));
            segments.push(Segment::Slot(found.as_str().to_string()));
            last = found.end();
        }
        segments.extend(text_segment(&command[last..]));

        trace!("split '{command}' into {} segment(s)", segments.len());
        Ok(Self { segments })
    }

    /// The literal and slot pieces in command order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of slots, counting repeated variables every time.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Slot(_)))
            .count()
    }

    /// Distinct slot names in order of first use.
    #[must_use]
    pub fn variables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for segment in &self.segments {
            if let Segment::Slot(name) = segment
               && !names.contains(&name.as_str())
            {
                names.push(name);
            }
        }
        names
    }

    /// Reassembles the command with `{name}` placeholders.
    ///
    /// Literal braces are doubled, so the result is a valid format template.
    ///
    /// # Example
    /// ```
    /// use tracecalc::template::command::CommandTemplate;
    ///
    /// let template = CommandTemplate::parse("SET {x}", &["x"]).unwrap();
    /// assert_eq!(template.format_string(), "SET {{{x}}}");
    /// ```
    #[must_use]
    pub fn format_string(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(&text.replace('{', "{{").replace('}', "}}")),
                Segment::Slot(name) => {
                    out.push('{');
                    out.push_str(name);
                    out.push('}');
                },
            }
        }
        out
    }

    /// Fills every slot from `point`.
    ///
    /// # Errors
    /// `SweepError::MissingValue` if a slot's variable is not in `point`.
    ///
    /// # Example
    /// ```
    /// use tracecalc::template::{command::CommandTemplate, sweep::SweepPoint};
    ///
    /// let template = CommandTemplate::parse("FREQ f", &["f"]).unwrap();
    /// let point = SweepPoint::from_iter([("f", 1000.0)]);
    ///
    /// assert_eq!(template.render(&point).unwrap(), "FREQ 1000");
    /// ```
    pub fn render(&self, point: &SweepPoint) -> Result<String, SweepError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Slot(name) => {
                    let value = point.get(name)
                                     .ok_or_else(|| SweepError::MissingValue { name: name.clone() })?;
                    out.push_str(&format_value(value));
                },
            }
        }
        Ok(out)
    }
}

/// Formats a sweep value for insertion into a command.
///
/// Uses the shortest text that parses back to the same `f64`; whole numbers
/// carry no fractional part.
///
/// # Example
/// ```
/// use tracecalc::template::command::format_value;
///
/// assert_eq!(format_value(2.0), "2");
/// assert_eq!(format_value(0.1), "0.1");
/// assert_eq!(format_value(-1.5), "-1.5");
/// ```
#[must_use]
pub fn format_value(value: f64) -> String {
    value.to_string()
}

/// Builds an alternation over the names, longest first.
fn name_matcher<S: AsRef<str>>(names: &[S]) -> Result<Option<Regex>, SweepError> {
    let mut names: Vec<&str> = names.iter()
                                    .map(AsRef::as_ref)
                                    .filter(|n| !n.is_empty())
                                    .collect();
    if names.is_empty() {
        return Ok(None);
    }
    names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    names.dedup();

    let pattern = names.iter()
                       .map(|n| regex::escape(n))
                       .collect::<Vec<_>>()
                       .join("|");
    Regex::new(&pattern).map(Some)
                        .map_err(|e| SweepError::Pattern { details: e.to_string() })
}

fn text_segment(text: &str) -> Option<Segment> {
    (!text.is_empty()).then(|| Segment::Text(text.to_string()))
}
