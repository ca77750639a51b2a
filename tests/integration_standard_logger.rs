use simlog::{Logger, Options};

/// `ShutStandardLogger` silences the global `log` facade for the whole
/// process. Kept in its own test binary because the global dispatcher is
/// process-wide state.
#[test]
fn shut_standard_logger_silences_log_macros() {
    let logger = Logger::new();
    logger
        .configure(&Options::new().with_shut_standard_logger(true))
        .unwrap();

    assert_eq!(log::max_level(), log::LevelFilter::Off);

    // Swallowed without output or panic.
    log::error!("suppressed");
    log::info!("suppressed");
    logger.close();
}
