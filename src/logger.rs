use crate::clock::{SimClock, SystemClock};
use crate::config::{Config, ConfigError, Options};
use crate::event::LogEvent;
use crate::format::LineFormatter;
use crate::sink::{self, Sink};
use crate::table::{self, Tabular};
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::error::Error;
use std::fmt;
use std::io::Write;
use std::mem;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

static GLOBAL: Lazy<Logger> = Lazy::new(Logger::new);

/// The single process-wide logger instance.
///
/// Hosts that prefer explicit handles can create their own with
/// [`Logger::new`]; the two styles behave identically.
pub fn global() -> &'static Logger {
    &GLOBAL
}

/// State installed by `configure` and swapped atomically thereafter.
struct Configured {
    threshold: LevelFilter,
    formatter: LineFormatter,
    sink: Sink,
    aux_sinks: Vec<Sink>,
}

/// The logging facade.
///
/// Owns the configured verbosity threshold, the line formatter, and the
/// active sink behind a single mutex, so concurrent print calls never
/// interleave partial lines and no call observes a half-swapped sink.
///
/// [`Logger::configure`] must be called exactly once before any other
/// operation. Before it, print operations are silent no-ops and
/// [`Logger::is_disabled`] reports true.
///
/// ```rust,no_run
/// use log::Level;
/// use simlog::{global, Options};
///
/// fn main() -> Result<(), simlog::ConfigError> {
///     let options = Options::new()
///         .with_level("debug")
///         .with_format("time;level;message")
///         .with_file("sim.log");
///     global().configure(&options)?;
///
///     global().print_line(Some(Level::Info), "simulation started");
///     global().printf(None, format_args!("booted {} hosts", 32));
///     Ok(())
/// }
/// ```
pub struct Logger {
    state: Mutex<Option<Configured>>,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// A new, unconfigured facade.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(None),
        }
    }

    /// Configure the facade from `options`, using a wall clock for the
    /// optional line prefix.
    ///
    /// See [`Logger::configure_with_clock`] for the full contract.
    pub fn configure(&self, options: &Options) -> Result<(), ConfigError> {
        self.configure_with_clock(options, Arc::new(SystemClock::new()))
    }

    /// Configure the facade from `options` with an explicit simulation clock.
    ///
    /// Must be called exactly once before any other operation; logging calls
    /// made earlier are dropped. Resolves the options into an immutable
    /// snapshot, builds the line formatter, silences the global `log` facade
    /// when `ShutStandardLogger` is set, and installs the sole sink (file
    /// when `FilePath` is given, console otherwise). Records are never
    /// forwarded to the ambient `log` dispatcher.
    ///
    /// A later call replaces the whole configuration, releasing the previous
    /// sink's resources.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] returned here indicates a setup bug; it is also
    /// reported on the diagnostic path, and the host should treat it as
    /// fatal at startup. When only the file open fails, the console sink
    /// stays attached so the facade still has exactly one sink.
    pub fn configure_with_clock(
        &self,
        options: &Options,
        clock: Arc<dyn SimClock>,
    ) -> Result<(), ConfigError> {
        let config = Config::resolve(options).map_err(|e| {
            error!("logger configuration rejected: {}", e);
            e
        })?;

        if config.shut_standard_logger {
            sink::suppress_standard_logger();
        }

        let formatter = LineFormatter::new(config.selectors.clone(), config.prefix_clock, clock);

        let mut state = self.state.lock();
        state.take(); // flush and release any previous sinks
        let mut configured = Configured {
            threshold: config.threshold,
            formatter,
            sink: Sink::console(),
            aux_sinks: Vec::new(),
        };
        let redirected = Self::redirect_locked(&mut configured, config.file_path.as_deref());
        *state = Some(configured);
        redirected
    }

    /// Redirect output to `path`, or back to the console when `None`.
    ///
    /// Detaches and releases every attached sink, auxiliary sinks included,
    /// then installs a fresh one bound to the current threshold and
    /// formatter. The file is truncated on open. Must not race with
    /// concurrent log calls other than through this facade, which serializes
    /// the swap internally.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotConfigured`] before `configure`;
    /// [`ConfigError::OpenFile`] when the path is unwritable, in which case
    /// the console sink is left attached.
    pub fn redirect_to_file(&self, path: Option<&Path>) -> Result<(), ConfigError> {
        let mut state = self.state.lock();
        let configured = state.as_mut().ok_or(ConfigError::NotConfigured)?;
        Self::redirect_locked(configured, path)
    }

    fn redirect_locked(configured: &mut Configured, path: Option<&Path>) -> Result<(), ConfigError> {
        configured.aux_sinks.clear();
        // The old sink is replaced (flushed and closed) before the new file
        // is opened, so its resources are released even when the open fails.
        drop(mem::replace(&mut configured.sink, Sink::console()));

        if let Some(path) = path {
            info!("redirecting log output to {}", path.display());
            match Sink::file(path) {
                Ok(file_sink) => configured.sink = file_sink,
                Err(e) => {
                    error!("log redirection failed, keeping console output: {}", e);
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    /// Print `message` as one line at `level`.
    ///
    /// A `None` level substitutes [`crate::defaults::LEVEL`]. One line is
    /// written iff the level passes the configured threshold.
    pub fn print(&self, level: Option<Level>, message: impl fmt::Display) {
        self.emit(LogEvent::message(
            level.unwrap_or(crate::defaults::LEVEL),
            message.to_string(),
        ));
    }

    /// Print one line of text at `level` (default level when `None`).
    pub fn print_line(&self, level: Option<Level>, text: &str) {
        self.emit(LogEvent::message(
            level.unwrap_or(crate::defaults::LEVEL),
            text,
        ));
    }

    /// Print an interpolated message:
    /// `logger.printf(None, format_args!("vm {} started", id))`.
    ///
    /// Malformed format strings are rejected at compile time by
    /// `format_args!`.
    pub fn printf(&self, level: Option<Level>, args: fmt::Arguments<'_>) {
        self.emit(LogEvent::message(
            level.unwrap_or(crate::defaults::LEVEL),
            args.to_string(),
        ));
    }

    /// Print the field names of `T` in declaration order, joined by `delim`
    /// (default [`crate::defaults::RESULT_DELIMITER`]).
    pub fn print_header<T: Tabular>(&self, delim: Option<&str>) {
        let delim = delim.unwrap_or(crate::defaults::RESULT_DELIMITER);
        self.print_line(None, &table::header_line::<T>(delim));
    }

    /// Print one line with `object`'s field values joined by `delim`.
    pub fn print_line_for_object<T: Tabular>(&self, object: &T, delim: Option<&str>) {
        let delim = delim.unwrap_or(crate::defaults::RESULT_DELIMITER);
        self.print(None, table::object_line(object, delim));
    }

    /// Print object groups CSV-style, optionally preceded by a header line.
    ///
    /// Groups are printed in order, elements in element order; empty groups
    /// contribute nothing.
    pub fn print_results<T: Tabular>(
        &self,
        with_header: bool,
        delim: Option<&str>,
        groups: &[&[T]],
    ) {
        if with_header {
            self.print_header::<T>(delim);
        }
        for group in groups {
            for object in *group {
                self.print_line_for_object(object, delim);
            }
        }
    }

    /// Log `err` with its full cause chain as a multi-line block, bypassing
    /// the configured field selectors.
    ///
    /// The block renders the trace's own message; `message` is accepted for
    /// call-site compatibility and is not rendered.
    pub fn log_error(&self, level: Option<Level>, message: &str, err: &(dyn Error + 'static)) {
        let _ = message;
        self.emit(LogEvent::trace(level.unwrap_or(crate::defaults::LEVEL), err));
    }

    /// Whether the threshold is the `off` sentinel, i.e. every print call is
    /// a no-op. An unconfigured facade also reports disabled.
    pub fn is_disabled(&self) -> bool {
        self.state
            .lock()
            .as_ref()
            .map_or(true, |c| c.threshold == LevelFilter::Off)
    }

    /// Attach an auxiliary write target mirroring the configured sink.
    ///
    /// The configured sink stays in place and remains the one that
    /// [`Logger::redirect_to_file`] replaces; a redirect detaches auxiliary
    /// sinks as well. Ignored before `configure`.
    pub fn set_output(&self, writer: Box<dyn Write + Send>) {
        let mut state = self.state.lock();
        if let Some(configured) = state.as_mut() {
            configured.aux_sinks.push(Sink::from_writer(writer));
        }
    }

    /// The formatted current simulation time, `None` before `configure`.
    pub fn format_clock_time(&self) -> Option<String> {
        self.state.lock().as_ref().map(|c| c.formatter.clock_time())
    }

    /// Flush and release all sinks and return to the unconfigured state.
    pub fn close(&self) {
        self.state.lock().take();
    }

    fn emit(&self, event: LogEvent) {
        let mut state = self.state.lock();
        let configured = match state.as_mut() {
            Some(c) => c,
            None => return,
        };
        if event.level() > configured.threshold {
            return;
        }
        let line = configured.formatter.format(&event);
        configured.sink.write_line(&line);
        for aux in &mut configured.aux_sinks {
            aux.write_line(&line);
        }
    }
}
