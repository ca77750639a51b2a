use log::Level;
use simlog::{ConfigError, Logger, ManualClock, Options};
use std::fs;
use std::sync::Arc;

/// Redirecting between files and back to the console keeps each file's
/// contents exact: truncated on open, complete once released.
#[test]
fn file_redirect_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.log");
    let second = dir.path().join("second.log");

    // Leftovers simulate a previous run; the configured sink must truncate.
    fs::write(&first, "stale content\n").unwrap();

    let logger = Logger::new();
    logger
        .configure(&Options::new().with_format("message").with_file(&first))
        .unwrap();
    logger.print_line(Some(Level::Info), "alpha");
    logger.print_line(Some(Level::Info), "beta");

    logger.redirect_to_file(Some(&second)).unwrap();
    logger.print_line(Some(Level::Info), "gamma");

    // Back to the console: the second file must stop growing.
    logger.redirect_to_file(None).unwrap();
    logger.print_line(Some(Level::Info), "console only");
    logger.close();

    assert_eq!(fs::read_to_string(&first).unwrap(), "alpha\nbeta\n");
    assert_eq!(fs::read_to_string(&second).unwrap(), "gamma\n");
}

/// A second `configure` call replaces the sink and truncates the named file,
/// even when it is the same file as before.
#[test]
fn reconfigure_truncates_previous_log() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sim.log");

    let logger = Logger::new();
    logger
        .configure(&Options::new().with_format("message").with_file(&path))
        .unwrap();
    logger.print_line(Some(Level::Info), "from the first run");

    logger
        .configure(&Options::new().with_format("message").with_file(&path))
        .unwrap();
    logger.print_line(Some(Level::Info), "from the second run");
    logger.close();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "from the second run\n"
    );
}

/// An unwritable `FilePath` surfaces as a typed open error from `configure`.
#[test]
fn unwritable_path_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("no-such-dir").join("sim.log");

    let logger = Logger::new();
    let result = logger.configure(&Options::new().with_file(&bad));
    assert!(matches!(result, Err(ConfigError::OpenFile { .. })));
}

/// The full flow: options loaded from a TOML file, a host-driven simulation
/// clock, and a file sink.
#[test]
fn configure_from_options_file_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("run.log");
    let options_path = dir.path().join("simlog.toml");
    fs::write(
        &options_path,
        format!(
            "LogLevel = \"debug\"\n\
             LogFormat = \"level;message\"\n\
             LogCloudSimClock = true\n\
             FilePath = \"{}\"\n",
            log_path.display()
        ),
    )
    .unwrap();

    let options = Options::from_toml_file(&options_path).unwrap();
    let clock = Arc::new(ManualClock::new());
    clock.set(12.0);

    let logger = Logger::new();
    logger.configure_with_clock(&options, clock.clone()).unwrap();
    logger.print_line(Some(Level::Info), "host provisioned");
    clock.advance(3.5);
    logger.print_line(Some(Level::Debug), "vm allocated");
    logger.close();

    assert_eq!(
        fs::read_to_string(&log_path).unwrap(),
        "12.00\tINFO\thost provisioned\n15.50\tDEBUG\tvm allocated\n"
    );
}
