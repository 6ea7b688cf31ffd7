//! Command line scanning for the converter.
//!
//! - [`flags`]: the table of accepted flag spellings and what each one does
//! - [`ArgsParser`]: single left-to-right pass producing [`ConversionArgs`](crate::models::ConversionArgs)
//! - [`usage`]: usage statement and the submitted-args summary
//!
//! Usage requests, a value flag without a value, and a command line that resolves no
//! input files all end the same way: the usage statement is printed and the process
//! exits with [`EXIT_FAILURE`].

pub mod flags;
pub mod parser;
pub mod usage;

pub use flags::{FlagAction, ValueFlag};
pub use parser::{ArgsError, ArgsOutcome, ArgsParser, EXIT_FAILURE, EXIT_SUCCESS};
pub use usage::{write_args, write_usage};
