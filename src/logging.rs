use crate::models::ConverterSettings;
use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use std::fs;
use std::io::{self, IsTerminal};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Setup logging with optional console output and an optional daily rotating file.
///
/// # Arguments
/// * `log_dir` - Directory for log files, `None` to write no files at all
/// * `log_prefix` - Prefix for log files (e.g., "cgf-converter")
/// * `debug_mode` - If true, use debug level; otherwise use info level
/// * `console_output` - If true, also log to the console
///
/// # Returns
/// A guard that must be held for the duration of the program to keep file logging
/// active, `None` when no file is written
pub fn setup_logging_with_console(
    log_dir: Option<&str>,
    log_prefix: &str,
    debug_mode: bool,
    console_output: bool,
) -> Result<Option<WorkerGuard>> {
    let (file_layer, guard) = match log_dir {
        Some(log_dir) => {
            let log_path = Utf8PathBuf::from(log_dir);
            if !log_path.exists() {
                fs::create_dir_all(&log_path)
                    .with_context(|| format!("Failed to create log directory: {}", log_dir))?;
            }

            let file_appender = rolling::daily(log_dir, log_prefix);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false) // No ANSI codes in log files
                .with_target(true)
                .with_file(true)
                .with_line_number(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let env_filter = if debug_mode {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Progress lines read like plain console output
    let console_layer = console_output.then(|| {
        tracing_subscriber::fmt::layer()
            .with_ansi(use_ansi(&io::stdout()))
            .with_target(false)
            .without_time()
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::debug!(
        "Logging initialized: dir={}, prefix={}, debug={}, console={}",
        log_dir.unwrap_or("<none>"),
        log_prefix,
        debug_mode,
        console_output
    );

    Ok(guard)
}

/// Setup logging from the settings file. `verbose` forces debug level.
pub fn setup_logging(settings: &ConverterSettings, verbose: bool) -> Result<Option<WorkerGuard>> {
    setup_logging_with_console(
        settings.log_directory(),
        &settings.log_prefix,
        settings.debug_mode || verbose,
        settings.console_output,
    )
}

/// Colour codes only when the console is a terminal
fn use_ansi(stream: &impl IsTerminal) -> bool {
    stream.is_terminal()
}
