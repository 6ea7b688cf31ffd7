// cgf-converter - Command line front end for the CryEngine model converter
//
// This is the library crate containing argument parsing and input file resolution.
// The binary crate (main.rs) wires it to the process environment.

pub mod args;
pub mod config;
pub mod logging;
pub mod models;
pub mod services;

// Re-export commonly used types for convenience
pub use args::{ArgsError, ArgsOutcome, ArgsParser};
pub use config::ConfigManager;
pub use models::{ConversionArgs, ConverterSettings, OutputFormat, OutputFormats};
pub use services::FileFilter;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
