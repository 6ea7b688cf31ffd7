//! Data models for the converter front end.
//!
//! - [`ConversionArgs`]: the resolved, read-only command line handed to the exporters
//! - [`ConversionArgsBuilder`]: accumulates options while tokens are scanned
//! - [`OutputFormats`] / [`OutputFormat`]: which exporters to run
//! - [`ConverterSettings`]: per-installation options loaded from `cgf-converter.yaml`

pub mod args;
pub mod settings;

pub use args::{ConversionArgs, ConversionArgsBuilder, OutputFormat, OutputFormats, Toggle};
pub use settings::{ConverterSettings, SettingsFile};
