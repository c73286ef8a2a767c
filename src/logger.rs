//! Logger set-up for binaries using this crate
//!
//! The library only emits through the `log` facade; binaries call
//! [`logger_init`] once at start-up.

use colored::{ColoredString, Colorize};
use log::info;
use std::time::Instant;
use thiserror::Error;

pub use log::LevelFilter;

/// Errors associated with initialising the logger.
#[derive(Debug, Error)]
pub enum LoggerInitError {
    #[error("An error occured while setting up the logger: {0}")]
    FernInitError(#[from] log::SetLoggerError),
}

/// Initialise the logger for this execution, writing to stderr so stdout
/// stays free for waypoint output.
///
/// Must only be called once per process.
pub fn logger_init(min_level: LevelFilter) -> Result<(), LoggerInitError> {
    let epoch = Instant::now();

    fern::Dispatch::new()
        .format(move |out, message, record| {
            // Include the target for debug and trace only
            if record.level() > log::Level::Info {
                out.finish(format_args!(
                    "[{:10.6} {}] {}: {}",
                    epoch.elapsed().as_secs_f64(),
                    level_to_str(record.level()),
                    record.target(),
                    message
                ))
            } else {
                out.finish(format_args!(
                    "[{:10.6} {}] {}",
                    epoch.elapsed().as_secs_f64(),
                    level_to_str(record.level()),
                    message
                ))
            }
        })
        .level(min_level)
        .chain(std::io::stderr())
        .apply()?;

    info!("Logging initialised, level {:?}", min_level);

    Ok(())
}

/// Get the string representation of a log level
fn level_to_str(level: log::Level) -> ColoredString {
    match level {
        log::Level::Trace => "TRC".dimmed().italic(),
        log::Level::Debug => "DBG".dimmed(),
        log::Level::Info => "INF".normal(),
        log::Level::Warn => "WRN".yellow(),
        log::Level::Error => "ERR".red().bold(),
    }
}
