use chrono::{DateTime, Utc};
use log::Level;
use std::error::Error;

/// Payload carried by a [`LogEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// An ordinary single-line message.
    Message(String),
    /// An error and its chain of causes, rendered as a multi-line block.
    Trace {
        /// The error's own rendered message.
        message: String,
        /// Messages of each `source` in the chain, outermost first.
        frames: Vec<String>,
    },
}

/// One log event: severity, capture time, and payload.
///
/// Events are created by the facade at each call site and handed to the
/// line formatter; the formatter matches exhaustively on [`Payload`].
#[derive(Debug, Clone)]
pub struct LogEvent {
    level: Level,
    timestamp: DateTime<Utc>,
    payload: Payload,
}

impl LogEvent {
    /// A message event stamped with the current wall time.
    pub fn message(level: Level, text: impl Into<String>) -> Self {
        Self {
            level,
            timestamp: Utc::now(),
            payload: Payload::Message(text.into()),
        }
    }

    /// Capture `error` and its full `source` chain as a trace event.
    pub fn trace(level: Level, error: &(dyn Error + 'static)) -> Self {
        let mut frames = Vec::new();
        let mut cause = error.source();
        while let Some(err) = cause {
            frames.push(err.to_string());
            cause = err.source();
        }
        Self {
            level,
            timestamp: Utc::now(),
            payload: Payload::Trace {
                message: error.to_string(),
                frames,
            },
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }
}
