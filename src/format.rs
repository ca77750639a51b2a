use crate::clock::SimClock;
use crate::config::ConfigError;
use crate::event::{LogEvent, Payload};
use chrono::SecondsFormat;
use std::str::FromStr;
use std::sync::Arc;

/// A single field of a log event rendered into an output line.
///
/// Selectors are resolved from their lowercase names once at configuration
/// time; an unresolvable name never reaches the per-call path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSelector {
    /// Upper-case severity name, e.g. `INFO`.
    Level,
    /// The rendered message text.
    Message,
    /// Event timestamp as epoch milliseconds.
    Millis,
    /// Event timestamp as an RFC 3339 string with millisecond precision.
    Time,
}

impl FromStr for FieldSelector {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "level" => Ok(Self::Level),
            "message" => Ok(Self::Message),
            "millis" => Ok(Self::Millis),
            "time" => Ok(Self::Time),
            _ => Err(ConfigError::UnknownSelector(s.to_string())),
        }
    }
}

/// Parse a semicolon-separated selector list, e.g. `"level;message"`.
///
/// Names are trimmed; empty entries are skipped. A spec with no selectors
/// at all is rejected, as is any name that does not resolve.
pub fn parse_field_spec(spec: &str) -> Result<Vec<FieldSelector>, ConfigError> {
    let names: Vec<&str> = spec
        .split(';')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect();
    if names.is_empty() {
        return Err(ConfigError::EmptyFieldSpec);
    }
    names.into_iter().map(FieldSelector::from_str).collect()
}

/// Format a simulation time the way clock prefixes expect: two fractional
/// digits, no unit.
pub fn format_sim_time(time: f64) -> String {
    format!("{:.2}", time)
}

/// Renders one [`LogEvent`] into exactly one output line.
///
/// Built once per configuration from the resolved selectors, the clock-prefix
/// flag, and the host's clock. Message events render the selected fields
/// joined by single tabs; trace events bypass field selection and render the
/// standard multi-line block. Every rendering ends with a single `\n`.
pub struct LineFormatter {
    selectors: Vec<FieldSelector>,
    prefix_clock: bool,
    clock: Arc<dyn SimClock>,
}

impl LineFormatter {
    pub(crate) fn new(
        selectors: Vec<FieldSelector>,
        prefix_clock: bool,
        clock: Arc<dyn SimClock>,
    ) -> Self {
        Self {
            selectors,
            prefix_clock,
            clock,
        }
    }

    /// The formatted current simulation time.
    pub(crate) fn clock_time(&self) -> String {
        format_sim_time(self.clock.now())
    }

    /// Render `event`, clock prefix and trailing newline included.
    pub fn format(&self, event: &LogEvent) -> String {
        let mut line = String::new();
        if self.prefix_clock {
            line.push_str(&self.clock_time());
            line.push('\t');
        }

        match event.payload() {
            Payload::Message(text) => {
                for (i, selector) in self.selectors.iter().enumerate() {
                    if i > 0 {
                        line.push('\t');
                    }
                    push_field(&mut line, *selector, event, text);
                }
            }
            Payload::Trace { message, frames } => {
                line.push_str(&event.level().to_string());
                line.push_str(": ");
                line.push_str(message);
                for frame in frames {
                    line.push_str("\n    caused by: ");
                    line.push_str(frame);
                }
            }
        }

        line.push('\n');
        line
    }
}

fn push_field(line: &mut String, selector: FieldSelector, event: &LogEvent, text: &str) {
    match selector {
        FieldSelector::Level => line.push_str(&event.level().to_string()),
        FieldSelector::Message => line.push_str(text),
        FieldSelector::Millis => {
            line.push_str(&event.timestamp().timestamp_millis().to_string())
        }
        FieldSelector::Time => line.push_str(
            &event
                .timestamp()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        ),
    }
}
