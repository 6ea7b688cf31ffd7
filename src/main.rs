//! cgf-converter - command line entry point.
//!
//! # Execution Flow
//!
//! 1. Load `cgf-converter.yaml` from the configuration directory (current directory,
//!    or `CGF_CONVERTER_CONFIG_DIR`); missing file means defaults
//! 2. Initialize logging → `<Log Directory>/<Log Prefix>.<date>` plus console
//! 3. Scan the command line into [`ConversionArgs`](cgf_converter::ConversionArgs)
//! 4. Print the submitted-args summary, or the usage statement on failure
//!
//! # Exit codes
//!
//! - `0`: at least one input file resolved
//! - `1`: usage requested, a flag is missing its value, no input files, or a
//!   filesystem error while expanding a filter

use anyhow::Result;
use cgf_converter::args::{self, flags};
use cgf_converter::{APP_NAME, ArgsOutcome, ArgsParser, ConfigManager, VERSION};
use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let tokens: Vec<String> = std::env::args().skip(1).collect();

    let config_manager = ConfigManager::from_env()?;
    let settings = config_manager.load_settings()?;

    let _guard = cgf_converter::logging::setup_logging(&settings, flags::requests_verbose(&tokens))?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    let parser = ArgsParser::with_settings(&settings);
    let mut stdout = io::stdout().lock();
    let outcome = parser.process_args(&tokens, &mut stdout)?;

    if let ArgsOutcome::Ready(conversion_args) = &outcome {
        args::write_args(conversion_args, &mut stdout)?;
        tracing::info!(
            "Resolved {} input file(s), formats: {}",
            conversion_args.input_files().len(),
            conversion_args
                .output_formats()
                .iter()
                .map(|format| format.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    stdout.flush()?;

    Ok(ExitCode::from(outcome.exit_code()))
}
