//! # SimLog
//!
//! A configurable logging facade for discrete-event simulations and other
//! long-running processes. The facade sits in front of the process's logging
//! and lets the host control verbosity, output destination, line formatting,
//! and suppression of the global `log` facade from one set of named options,
//! without touching call sites.
//!
//! ## Core Capabilities
//!
//! - **One-time configuration** from named options (`LogLevel`, `LogFormat`,
//!   `FilePath`, `LogCloudSimClock`, `ShutStandardLogger`), supplied
//!   programmatically, as `(key, value)` pairs, or from a TOML file
//! - **Field selection**: each line renders a configured, ordered subset of
//!   the event's fields, tab-separated, for downstream tabular consumers
//! - **Output redirection** between the console and a truncating log file,
//!   swappable at runtime without losing records
//! - **Simulation-clock prefixes**: every line can carry the host's virtual
//!   time as its first column
//! - **Tabular results**: CSV-style header and value lines for any type
//!   implementing [`Tabular`]
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use log::Level;
//! use simlog::{global, Options};
//!
//! fn main() -> Result<(), simlog::ConfigError> {
//!     let options = Options::new()
//!         .with_level("debug")
//!         .with_format("time;level;message")
//!         .with_file("sim.log");
//!     global().configure(&options)?;
//!
//!     global().print_line(Some(Level::Info), "simulation started");
//!     global().printf(None, format_args!("booted {} hosts", 32));
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Configuration problems (unknown levels, unknown selectors, unwritable log
//! files) are rejected up front as [`ConfigError`] and should be treated as
//! fatal at startup. Per-call I/O failures are best-effort: a lost line is
//! reported on the facade's own diagnostic path and never crashes the host.

/// Simulation clock collaborators
///
/// The [`SimClock`] trait is the seam to the host's virtual-time source,
/// with a wall-clock fallback and a manually-advanced implementation for
/// simulations and tests.
pub mod clock;

/// Options and configuration resolution
///
/// Raw [`Options`] (builder, `(key, value)` pairs, or a TOML file) resolve
/// once into an immutable snapshot; unknown keys, levels, and selectors are
/// rejected here rather than discovered per call.
pub mod config;

/// Log event records
///
/// [`LogEvent`] is the tagged union handed to the formatter: a plain message
/// or an error trace with its full cause chain.
pub mod event;

/// Line rendering
///
/// [`FieldSelector`] and [`LineFormatter`] turn one event into one line:
/// optional clock prefix, tab-joined selected fields, and the multi-line
/// fallback block for traces.
pub mod format;

/// The logging facade
///
/// [`Logger`] owns the threshold, formatter, and sink slot; [`global`]
/// exposes the single process-wide instance.
pub mod logger;

/// Write destinations
///
/// Console, truncating-file, and caller-supplied sinks, plus suppression of
/// the global `log` facade.
pub mod sink;

/// Tabular output seam
///
/// The [`Tabular`] trait supplies field names and values for CSV-style
/// header and result lines.
pub mod table;

pub use clock::{ManualClock, SimClock, SystemClock};
pub use config::{ConfigError, Options};
pub use event::{LogEvent, Payload};
pub use format::{FieldSelector, LineFormatter};
pub use logger::{global, Logger};
pub use table::Tabular;

/// The current version of the crate, populated from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration values
///
/// Applied whenever the corresponding option key is omitted.
pub mod defaults {
    use log::Level;

    /// Default severity, used both as the threshold when `LogLevel` is
    /// omitted and as the per-call level when a print call passes `None`.
    pub const LEVEL: Level = Level::Info;

    /// Default field selectors rendered per line.
    pub const FIELD_SPEC: &str = "level;message";

    /// Default delimiter for header and result lines. Distinct from the tab
    /// used between selected fields.
    pub const RESULT_DELIMITER: &str = ",";
}
