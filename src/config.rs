use crate::format::{parse_field_spec, FieldSelector};
use log::LevelFilter;
use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Option key selecting the minimum severity emitted.
pub const LOG_LEVEL_KEY: &str = "LogLevel";

/// Option key for prefixing every line with the current simulation time.
pub const LOG_CLOCK_KEY: &str = "LogCloudSimClock";

/// Option key holding the semicolon-separated field selectors,
/// e.g. `"level;message"`.
pub const LOG_FORMAT_KEY: &str = "LogFormat";

/// Option key naming the output file. Console output is used when absent.
pub const FILE_PATH_KEY: &str = "FilePath";

/// Option key for silencing the global `log` facade used by other components.
pub const SHUT_STANDARD_LOGGER_KEY: &str = "ShutStandardLogger";

/// Errors raised while resolving options or installing sinks.
///
/// All of these indicate a setup bug. They are reported on the facade's
/// diagnostic path and returned to the caller; continuing to log after one
/// of them is unsupported.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The `LogLevel` value is not one of `off`, `error`, `warn`, `info`,
    /// `debug`, `trace` (any case).
    #[error("unknown log level '{0}'")]
    UnknownLevel(String),

    /// A `LogFormat` entry does not name a known field selector.
    #[error("unknown format selector '{0}'")]
    UnknownSelector(String),

    /// The `LogFormat` value contains no selectors at all.
    #[error("log format contains no selectors")]
    EmptyFieldSpec,

    /// An option key is not one of the recognized keys.
    #[error("unrecognized option key '{0}'")]
    UnknownOption(String),

    /// An option value could not be parsed for its key.
    #[error("invalid value '{value}' for option '{key}'")]
    InvalidValue { key: &'static str, value: String },

    /// An options file could not be read.
    #[error("failed to read options file {}", .path.display())]
    ReadOptions {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An options file could not be parsed as TOML with the recognized keys.
    #[error("failed to parse options file {}", .path.display())]
    ParseOptions {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The log file named by `FilePath` could not be created or truncated.
    #[error("cannot open log file {}", .path.display())]
    OpenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An operation that requires a configured logger ran before `configure`.
    #[error("logger has not been configured")]
    NotConfigured,
}

/// Raw configuration options, all optional.
///
/// Options can be built in place, collected from `(key, value)` string pairs
/// with [`Options::from_pairs`], or loaded from a TOML file with
/// [`Options::from_toml_file`]:
///
/// ```toml
/// LogLevel = "debug"
/// LogFormat = "time;level;message"
/// LogCloudSimClock = true
/// FilePath = "sim.log"
/// ShutStandardLogger = false
/// ```
///
/// Omitted keys fall back to the defaults documented in [`crate::defaults`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Options {
    /// Minimum severity name; defaults to `info`.
    #[serde(rename = "LogLevel")]
    pub log_level: Option<String>,

    /// Prefix every line with the simulation clock; defaults to false.
    #[serde(rename = "LogCloudSimClock")]
    pub log_clock: Option<bool>,

    /// Ordered field selectors; defaults to [`crate::defaults::FIELD_SPEC`].
    #[serde(rename = "LogFormat")]
    pub log_format: Option<String>,

    /// Output file, truncated on open; console output when absent.
    #[serde(rename = "FilePath")]
    pub file_path: Option<PathBuf>,

    /// Silence the global `log` facade; defaults to false.
    #[serde(rename = "ShutStandardLogger")]
    pub shut_standard_logger: Option<bool>,
}

impl Options {
    /// Empty options; every key takes its default at resolution time.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect options from `(key, value)` string pairs.
    ///
    /// Unrecognized keys and unparseable boolean values are rejected here,
    /// before any logger state is touched.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut options = Options::default();
        for (key, value) in pairs {
            match key {
                LOG_LEVEL_KEY => options.log_level = Some(value.to_string()),
                LOG_CLOCK_KEY => options.log_clock = Some(parse_bool(LOG_CLOCK_KEY, value)?),
                LOG_FORMAT_KEY => options.log_format = Some(value.to_string()),
                FILE_PATH_KEY => options.file_path = Some(PathBuf::from(value)),
                SHUT_STANDARD_LOGGER_KEY => {
                    options.shut_standard_logger =
                        Some(parse_bool(SHUT_STANDARD_LOGGER_KEY, value)?)
                }
                other => return Err(ConfigError::UnknownOption(other.to_string())),
            }
        }
        Ok(options)
    }

    /// Load options from a TOML file using the same keys as `from_pairs`.
    ///
    /// Unknown keys in the file are a parse error.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadOptions {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::ParseOptions {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Set the minimum severity name.
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    /// Enable or disable the simulation-clock line prefix.
    pub fn with_clock_prefix(mut self, prefix: bool) -> Self {
        self.log_clock = Some(prefix);
        self
    }

    /// Set the semicolon-separated field selectors.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.log_format = Some(format.into());
        self
    }

    /// Redirect output to a file, truncated on open.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    /// Silence the global `log` facade when the logger is configured.
    pub fn with_shut_standard_logger(mut self, shut: bool) -> Self {
        self.shut_standard_logger = Some(shut);
        self
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}

/// Immutable configuration snapshot resolved from [`Options`].
///
/// Created once per `configure` call and replaced wholesale by the next one;
/// never partially mutated.
#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub threshold: LevelFilter,
    pub file_path: Option<PathBuf>,
    pub selectors: Vec<FieldSelector>,
    pub prefix_clock: bool,
    pub shut_standard_logger: bool,
}

impl Config {
    /// Resolve raw options, applying defaults for omitted keys and rejecting
    /// anything that cannot be resolved.
    pub(crate) fn resolve(options: &Options) -> Result<Self, ConfigError> {
        let threshold = match &options.log_level {
            Some(name) => name
                .parse::<LevelFilter>()
                .map_err(|_| ConfigError::UnknownLevel(name.clone()))?,
            None => crate::defaults::LEVEL.to_level_filter(),
        };

        let selectors = match &options.log_format {
            Some(spec) => parse_field_spec(spec)?,
            None => vec![FieldSelector::Level, FieldSelector::Message],
        };

        Ok(Self {
            threshold,
            file_path: options.file_path.clone(),
            selectors,
            prefix_clock: options.log_clock.unwrap_or(false),
            shut_standard_logger: options.shut_standard_logger.unwrap_or(false),
        })
    }
}
