use crate::config::LoggingConfig;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;
use std::fs::OpenOptions;

/// Log file used when the configuration names none
pub const DEFAULT_LOG_FILE: &str = "theme-panel.log";

/// Map a configured level name to a filter, defaulting to `Info`
pub fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

/// Install the global logger.
///
/// Output goes to a file only; stdout carries the host protocol and stderr is
/// left to the user. `level_override` comes from `--log-level`.
pub fn setup_logger(
    config: &LoggingConfig,
    level_override: Option<&str>,
) -> Result<(), log::SetLoggerError> {
    let level = level_override.unwrap_or_else(|| config.level());
    let log_level = parse_level(level);

    let colors = ColoredLevelConfig::new()
        .trace(Color::BrightBlack)
        .debug(Color::BrightBlue)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red);

    let base_config = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .level(log_level);

    let log_path = config.file().unwrap_or(DEFAULT_LOG_FILE);
    match OpenOptions::new().create(true).append(true).open(log_path) {
        Ok(file) => {
            base_config.chain(file).apply()?;
            eprintln!("Logging to file: {log_path}");
        }
        Err(e) => {
            eprintln!("Warning: Failed to open log file '{log_path}': {e}");
            eprintln!("Continuing without file logging.");
            base_config.apply()?;
        }
    }

    log::info!("Logger initialized with level: {level}");
    Ok(())
}
