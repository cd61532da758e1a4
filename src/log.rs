//! Logging for model runs.
//!
//! Console output is coloured when attached to a terminal. Runs also keep plain-text copies of
//! their messages in the results folder.
use anyhow::{Context, Result, bail, ensure};
use chrono::Local;
use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback};
use log::{LevelFilter, Record};
use std::env;
use std::fmt::{Arguments, Display};
use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::OnceLock;

/// A flag indicating whether the logger has been initialised
static LOGGER_INIT: OnceLock<()> = OnceLock::new();

/// The environment variable which overrides the log level in the settings file
pub const LOG_LEVEL_ENV_VAR: &str = "LIVESTOCK_SIM_LOG_LEVEL";

/// The default log level for the program.
///
/// Used as a fallback if the user hasn't specified something else with the environment variable
/// or the settings.toml file.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// The file name for the log file containing progress messages and results
const LOG_INFO_FILE_NAME: &str = "livestock_sim_info.log";

/// The file name for the log file containing warnings and error messages
const LOG_ERROR_FILE_NAME: &str = "livestock_sim_error.log";

/// Whether the program logger has been initialised
pub fn is_logger_initialised() -> bool {
    LOGGER_INIT.get().is_some()
}

/// Set up logging for a run or validation of a livestock model.
///
/// The level is taken from `LIVESTOCK_SIM_LOG_LEVEL` if set, otherwise from `settings.toml`. One
/// of `off`, `error`, `warn`, `info`, `debug` or `trace` (case-insensitive).
///
/// Progress messages go to stdout and warnings to stderr. If `log_file_dir` is given, the same
/// messages are also saved in that folder alongside the run's results.
pub fn init(log_level_from_settings: &str, log_file_dir: Option<&Path>) -> Result<()> {
    ensure!(!is_logger_initialised(), "Logger already initialised");

    let log_level = env::var(LOG_LEVEL_ENV_VAR).unwrap_or_else(|_| log_level_from_settings.into());
    let log_level = parse_log_level(&log_level)?;

    let colours = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::Magenta);
    let use_colour_stdout = std::io::stdout().is_terminal();
    let use_colour_stderr = std::io::stderr().is_terminal();

    let mut dispatch = Dispatch::new()
        .chain(
            // Progress messages
            Dispatch::new()
                .filter(|metadata| metadata.level() > LevelFilter::Warn)
                .format(move |out, message, record| {
                    write_log_colour(out, message, record, use_colour_stdout, &colours);
                })
                .level(log_level)
                .chain(std::io::stdout()),
        )
        .chain(
            // Warnings and errors
            Dispatch::new()
                .format(move |out, message, record| {
                    write_log_colour(out, message, record, use_colour_stderr, &colours);
                })
                .level(log_level.min(LevelFilter::Warn))
                .chain(std::io::stderr()),
        );

    if let Some(dir) = log_file_dir {
        dispatch = dispatch.chain(log_file_dispatch(dir, log_level)?);
    }

    dispatch.apply()?;

    // Can only fail if another thread got here first, in which case `apply` would have failed
    let _ = LOGGER_INIT.set(());

    if let Some(dir) = log_file_dir {
        log::debug!("Saving log files to {}", dir.display());
    }

    Ok(())
}

/// Build the part of the logger which writes the info and error log files in `dir`.
///
/// The info file always records at least `info` level messages, whatever the console level, so
/// a run's headline result is kept.
fn log_file_dispatch(dir: &Path, log_level: LevelFilter) -> Result<Dispatch> {
    let create_log_file = |file_name: &str| {
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(dir.join(file_name))
            .with_context(|| format!("Could not create log file {file_name}"))
    };

    let dispatch = Dispatch::new()
        .chain(
            Dispatch::new()
                .filter(|metadata| metadata.level() > LevelFilter::Warn)
                .format(write_log_plain)
                .level(log_level.max(LevelFilter::Info))
                .chain(create_log_file(LOG_INFO_FILE_NAME)?),
        )
        .chain(
            Dispatch::new()
                .format(write_log_plain)
                .level(LevelFilter::Warn)
                .chain(create_log_file(LOG_ERROR_FILE_NAME)?),
        );

    Ok(dispatch)
}

/// Convert a log level name (case-insensitive) to a [`LevelFilter`]
fn parse_log_level(log_level: &str) -> Result<LevelFilter> {
    let level = match log_level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        unknown => bail!("Unknown log level: {unknown}"),
    };

    Ok(level)
}

/// Write to the log in the format used throughout the program
fn write_log<T: Display>(out: FormatCallback, level: T, target: &str, message: &Arguments) {
    let timestamp = Local::now().format("%H:%M:%S");

    out.finish(format_args!("[{timestamp} {level} {target}] {message}"));
}

/// Write to the log with no colours
fn write_log_plain(out: FormatCallback, message: &Arguments, record: &Record) {
    write_log(out, record.level(), record.target(), message);
}

/// Write to the log with optional colours
fn write_log_colour(
    out: FormatCallback,
    message: &Arguments,
    record: &Record,
    use_colour: bool,
    colours: &ColoredLevelConfig,
) {
    // Format output with or without colour based on `use_colour`
    if use_colour {
        write_log(out, colours.color(record.level()), record.target(), message);
    } else {
        write_log_plain(out, message, record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;

    #[rstest]
    #[case("off", LevelFilter::Off)]
    #[case("error", LevelFilter::Error)]
    #[case("WARN", LevelFilter::Warn)]
    #[case("Info", LevelFilter::Info)]
    #[case("debug", LevelFilter::Debug)]
    #[case("trace", LevelFilter::Trace)]
    fn test_parse_log_level(#[case] name: &str, #[case] expected: LevelFilter) {
        assert_eq!(parse_log_level(name).unwrap(), expected);
    }

    #[test]
    fn test_log_file_dispatch_creates_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(LOG_INFO_FILE_NAME), "an earlier run\n").unwrap();
        log_file_dispatch(dir.path(), LevelFilter::Off).unwrap();

        // Log files from a previous run in the same folder are truncated
        for file_name in [LOG_INFO_FILE_NAME, LOG_ERROR_FILE_NAME] {
            assert_eq!(fs::read_to_string(dir.path().join(file_name)).unwrap(), "");
        }
    }

    #[test]
    fn test_log_file_dispatch_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no_such_results");
        assert_eq!(
            log_file_dispatch(&missing, LevelFilter::Info)
                .unwrap_err()
                .to_string(),
            format!("Could not create log file {LOG_INFO_FILE_NAME}")
        );
    }

    #[test]
    fn test_parse_log_level_unknown() {
        assert_eq!(
            parse_log_level("chatty").unwrap_err().to_string(),
            "Unknown log level: chatty"
        );
    }
}
