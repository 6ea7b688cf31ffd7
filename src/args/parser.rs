use super::flags::{self, FlagAction, ValueFlag};
use super::usage::write_usage;
use crate::models::{ConversionArgs, ConversionArgsBuilder, ConverterSettings};
use crate::services::file_filter::{self, DirectoryListing, FileFilter, FileFilterError, FsListing};
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::io::Write;
use thiserror::Error;

/// Exit code for a finalized configuration
pub const EXIT_SUCCESS: u8 = 0;

/// Exit code for usage requests and invalid command lines
pub const EXIT_FAILURE: u8 = 1;

#[derive(Debug, Error)]
pub enum ArgsError {
    #[error("Usage requested")]
    UsageRequested,

    #[error("Missing value for {flag}")]
    MissingValue { flag: String },

    #[error("No input files to process")]
    NoInputFiles,

    #[error(transparent)]
    Filter(#[from] FileFilterError),
}

impl ArgsError {
    /// Errors answered with the usage text rather than surfaced as failures
    pub fn shows_usage(&self) -> bool {
        !matches!(self, ArgsError::Filter(_))
    }
}

/// Result of [`ArgsParser::process_args`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgsOutcome {
    /// Arguments resolved, conversion can start
    Ready(ConversionArgs),
    /// Usage was printed instead
    UsageShown,
}

impl ArgsOutcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            ArgsOutcome::Ready(_) => EXIT_SUCCESS,
            ArgsOutcome::UsageShown => EXIT_FAILURE,
        }
    }

    pub fn args(&self) -> Option<&ConversionArgs> {
        match self {
            ArgsOutcome::Ready(args) => Some(args),
            ArgsOutcome::UsageShown => None,
        }
    }
}

/// Single-pass scanner turning command line tokens into [`ConversionArgs`].
///
/// Tokens are read left to right. Known flags (case-insensitive) either switch an
/// option on or consume the following token as their value; anything else is an
/// input file or filter and is expanded through the [`FileFilter`].
#[derive(Debug, Clone, Default)]
pub struct ArgsParser<L = FsListing> {
    filter: FileFilter<L>,
    default_data_dir: Option<Utf8PathBuf>,
}

impl ArgsParser<FsListing> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parser seeded with the defaults from the settings file
    pub fn with_settings(settings: &ConverterSettings) -> Self {
        Self {
            filter: FileFilter::new(),
            default_data_dir: settings
                .default_data_dir()
                .map(|dir| Utf8PathBuf::from(strip_quotes(dir))),
        }
    }
}

impl<L: DirectoryListing> ArgsParser<L> {
    pub fn with_filter(filter: FileFilter<L>) -> Self {
        Self {
            filter,
            default_data_dir: None,
        }
    }

    /// Scan `tokens` and finalize the arguments.
    ///
    /// A value flag in last position fails with [`ArgsError::MissingValue`] before
    /// anything past it is examined.
    pub fn parse<S: AsRef<str>>(&self, tokens: &[S]) -> Result<ConversionArgs, ArgsError> {
        let mut builder = ConversionArgsBuilder::new();
        if let Some(dir) = &self.default_data_dir {
            builder.data_dir(dir.clone());
        }

        let mut tokens = tokens.iter().map(AsRef::as_ref);
        while let Some(token) = tokens.next() {
            match flags::lookup(token) {
                Some(FlagAction::Usage) => return Err(ArgsError::UsageRequested),
                Some(FlagAction::Value(flag)) => {
                    let value = tokens.next().ok_or_else(|| ArgsError::MissingValue {
                        flag: token.to_string(),
                    })?;
                    self.apply_value(&mut builder, flag, value)?;
                }
                Some(FlagAction::Toggle(toggle)) => {
                    if let Some(message) = flags::announcement(toggle) {
                        tracing::info!("{}", message);
                    }
                    builder.enable(toggle);
                }
                None => self.add_inputs(&mut builder, token)?,
            }
        }

        builder.build()
    }

    /// Parse `tokens`, writing the usage text to `out` when the command line asks for
    /// it or cannot be used. Filesystem failures are returned as errors.
    pub fn process_args<S, W>(&self, tokens: &[S], out: &mut W) -> Result<ArgsOutcome>
    where
        S: AsRef<str>,
        W: Write,
    {
        match self.parse(tokens) {
            Ok(args) => Ok(ArgsOutcome::Ready(args)),
            Err(e) if e.shows_usage() => {
                match &e {
                    ArgsError::UsageRequested => tracing::debug!("{}", e),
                    _ => tracing::warn!("{}", e),
                }
                write_usage(out).context("Failed to write usage")?;
                Ok(ArgsOutcome::UsageShown)
            }
            Err(e) => Err(e).context("Failed to resolve input files"),
        }
    }

    fn apply_value(
        &self,
        builder: &mut ConversionArgsBuilder,
        flag: ValueFlag,
        value: &str,
    ) -> Result<(), ArgsError> {
        match flag {
            ValueFlag::DataDir => {
                builder.data_dir(strip_quotes(value));
                tracing::info!("Data directory set to {}", value);
            }
            ValueFlag::OutputDir => {
                builder.output_dir(file_filter::absolute(Utf8Path::new(value))?);
                tracing::info!("Output directory set to {}", value);
            }
            ValueFlag::InputFile => self.add_inputs(builder, value)?,
        }
        Ok(())
    }

    fn add_inputs(&self, builder: &mut ConversionArgsBuilder, filter: &str) -> Result<(), ArgsError> {
        let files = self.filter.expand(filter)?;
        if files.is_empty() {
            tracing::warn!("No files matched {}", filter);
        }
        builder.add_input_files(files);
        tracing::info!("Input file set to {}", filter);
        Ok(())
    }
}

fn strip_quotes(value: &str) -> String {
    value.replace('"', "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OutputFormat;
    use std::io;
    use tempfile::TempDir;

    /// Listing whose directories cannot be read.
    struct UnreadableListing;

    impl DirectoryListing for UnreadableListing {
        fn is_file(&self, _path: &Utf8Path) -> bool {
            false
        }

        fn list_files(
            &self,
            dir: &Utf8Path,
            _recursive: bool,
        ) -> Result<Vec<Utf8PathBuf>, FileFilterError> {
            Err(FileFilterError::Io {
                path: dir.to_path_buf(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            })
        }
    }

    struct Fixture {
        _dir: TempDir,
        root: Utf8PathBuf,
    }

    impl Fixture {
        fn with_files(names: &[&str]) -> Self {
            let dir = TempDir::new().unwrap();
            let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
            for name in names {
                std::fs::write(root.join(name), b"").unwrap();
            }
            Self { _dir: dir, root }
        }

        fn path(&self, name: &str) -> String {
            self.root.join(name).to_string()
        }
    }

    #[test]
    fn test_empty_tokens_fail() {
        let tokens: [&str; 0] = [];
        let result = ArgsParser::new().parse(&tokens);
        assert!(matches!(result, Err(ArgsError::NoInputFiles)));
    }

    #[test]
    fn test_usage_stops_scanning() {
        let fixture = Fixture::with_files(&["model.cgf"]);
        let result = ArgsParser::new().parse(&["-usage", fixture.path("model.cgf").as_str()]);
        assert!(matches!(result, Err(ArgsError::UsageRequested)));
    }

    #[test]
    fn test_trailing_value_flag_is_missing_value() {
        // The last value flag has nothing after it and must not read past the end.
        for flag in ["-datadir", "-objectdir", "-out", "-outdir", "-OutputDir", "-infile"] {
            let result = ArgsParser::new().parse(&[flag]);
            match result {
                Err(ArgsError::MissingValue { flag: reported }) => assert_eq!(reported, flag),
                other => panic!("Expected MissingValue for {}, got {:?}", flag, other),
            }
        }
    }

    #[test]
    fn test_missing_value_reported_before_input_check() {
        let fixture = Fixture::with_files(&["model.cgf"]);
        let result = ArgsParser::new().parse(&[fixture.path("model.cgf").as_str(), "-out"]);
        assert!(matches!(result, Err(ArgsError::MissingValue { .. })));
    }

    #[test]
    fn test_data_dir_quotes_stripped() {
        let fixture = Fixture::with_files(&["model.cgf"]);
        let args = ArgsParser::new()
            .parse(&[
                "-datadir",
                "\"C:\\Games\\Objects\"",
                fixture.path("model.cgf").as_str(),
            ])
            .unwrap();
        assert_eq!(args.data_dir(), Some(Utf8Path::new("C:\\Games\\Objects")));
    }

    #[test]
    fn test_output_dir_is_absolute() {
        let fixture = Fixture::with_files(&["model.cgf"]);
        let args = ArgsParser::new()
            .parse(&["-out", "converted", fixture.path("model.cgf").as_str()])
            .unwrap();
        let output_dir = args.output_dir().unwrap();

        assert!(output_dir.is_absolute());
        assert!(output_dir.ends_with("converted"));
    }

    #[test]
    fn test_output_dir_parent_reference_is_resolved() {
        let fixture = Fixture::with_files(&["model.cgf"]);
        let args = ArgsParser::new()
            .parse(&["-out", "../converted/.", fixture.path("model.cgf").as_str()])
            .unwrap();
        let output_dir = args.output_dir().unwrap();

        assert!(output_dir.ends_with("converted"));
        assert!(!output_dir.as_str().contains(".."));
        assert_eq!(
            output_dir,
            file_filter::absolute(Utf8Path::new("..")).unwrap().join("converted")
        );
    }

    #[test]
    fn test_infile_flag_and_bare_token_both_add_inputs() {
        let fixture = Fixture::with_files(&["a.cgf", "b.cgf"]);
        let args = ArgsParser::new()
            .parse(&[
                "-infile",
                fixture.path("a.cgf").as_str(),
                fixture.path("b.cgf").as_str(),
            ])
            .unwrap();

        assert_eq!(args.input_files().len(), 2);
        assert!(args.input_files()[0].ends_with("a.cgf"));
        assert!(args.input_files()[1].ends_with("b.cgf"));
    }

    #[test]
    fn test_settings_data_dir_overridden_by_flag() {
        let fixture = Fixture::with_files(&["model.cgf"]);
        let settings = ConverterSettings {
            default_data_dir: "/default/objects".to_string(),
            ..ConverterSettings::default()
        };
        let parser = ArgsParser::with_settings(&settings);

        let args = parser.parse(&[fixture.path("model.cgf").as_str()]).unwrap();
        assert_eq!(args.data_dir(), Some(Utf8Path::new("/default/objects")));

        let args = parser
            .parse(&["-objectdir", "/explicit", fixture.path("model.cgf").as_str()])
            .unwrap();
        assert_eq!(args.data_dir(), Some(Utf8Path::new("/explicit")));
    }

    #[test]
    fn test_toggles_set_matching_fields() {
        let fixture = Fixture::with_files(&["model.cgf"]);
        let args = ArgsParser::new()
            .parse(&[
                fixture.path("model.cgf").as_str(),
                "-SMOOTH",
                "-tiff",
                "-skipshields",
                "-skipproxy",
                "-throw",
                "-verbose",
                "-crytek",
            ])
            .unwrap();

        assert!(args.smooth());
        assert!(args.tiff_textures());
        assert!(args.skip_shield_nodes());
        assert!(args.skip_proxy_nodes());
        assert!(args.throw());
        assert!(args.verbose());
        assert!(!args.group_meshes());
        assert!(args.output_formats().contains(OutputFormat::CryTek));
        assert!(!args.output_formats().collada);
    }

    #[test]
    fn test_process_args_prints_usage_on_failure() {
        let mut out = Vec::new();
        let outcome = ArgsParser::new().process_args(&["-datadir"], &mut out).unwrap();

        assert_eq!(outcome, ArgsOutcome::UsageShown);
        assert_eq!(outcome.exit_code(), EXIT_FAILURE);
        assert!(String::from_utf8(out).unwrap().contains("-usage:"));
    }

    #[test]
    fn test_process_args_success_writes_nothing() {
        let fixture = Fixture::with_files(&["model.cgf"]);
        let mut out = Vec::new();
        let outcome = ArgsParser::new()
            .process_args(&[fixture.path("model.cgf")], &mut out)
            .unwrap();

        assert_eq!(outcome.exit_code(), EXIT_SUCCESS);
        assert!(outcome.args().is_some());
        assert!(out.is_empty());
    }

    #[test]
    fn test_listing_failure_is_fatal_not_usage() {
        let parser = ArgsParser::with_filter(FileFilter::with_listing(UnreadableListing));

        let result = parser.parse(&["/locked/*.cgf"]);
        assert!(matches!(result, Err(ArgsError::Filter(FileFilterError::Io { .. }))));

        let mut out = Vec::new();
        assert!(parser.process_args(&["/locked/*.cgf"], &mut out).is_err());
        assert!(out.is_empty());
    }
}
