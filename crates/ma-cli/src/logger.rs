use crate::error::{CliError, CliResult};

use std::fmt::Arguments;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback};
use log::{Record, debug};

/// Initialize logger with fern. Logs go to stderr so stdout stays JSON.
///
/// # Arguments
/// * `log_level` - Log level filter
/// * `log_file` - Optional path to log file. None = stderr, Some = file output
/// * `colored` - Enable colored output (ignored when logging to a file)
pub fn initialize(
    log_level: ma_config::LogLevel,
    log_file: Option<PathBuf>,
    colored: bool,
) -> CliResult<()> {
    let level_filter = log_level.0;
    let dispatch = Dispatch::new().level(level_filter);

    let dispatch = match &log_file {
        Some(path) => dispatch
            .format(format_line(None, true))
            .chain(open_log_file(path)?),
        None => dispatch
            .format(format_line(colored.then(level_colors), false))
            .chain(std::io::stderr()),
    };

    dispatch
        .apply()
        .map_err(|e| CliError::logger(format!("Failed to initialize logger: {e}")))?;

    match log_file {
        Some(path) => debug!(
            "Logger initialized: level={level_filter:?}, file={}",
            path.display()
        ),
        None => debug!("Logger initialized: level={level_filter:?}, stderr"),
    }

    Ok(())
}

/// `[<rfc3339> - <level>] <message>`, plus `[<target>]` in log files.
fn format_line(
    colors: Option<ColoredLevelConfig>,
    with_target: bool,
) -> impl Fn(FormatCallback<'_>, &Arguments<'_>, &Record<'_>) + Sync + Send + 'static {
    move |out, message, record| {
        let date = humantime::format_rfc3339(SystemTime::now());
        let level = match colors {
            Some(colors) => colors.color(record.level()).to_string(),
            None => record.level().to_string(),
        };

        if with_target {
            out.finish(format_args!(
                "[{date} - {level}] {message} [{target}]",
                target = record.target()
            ))
        } else {
            out.finish(format_args!("[{date} - {level}] {message}"))
        }
    }
}

fn level_colors() -> ColoredLevelConfig {
    ColoredLevelConfig::new()
        .trace(Color::Magenta)
        .debug(Color::Blue)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red)
}

pub(crate) fn open_log_file(path: &Path) -> CliResult<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| CliError::logger(format!("Failed to open log file {}: {e}", path.display())))
}
