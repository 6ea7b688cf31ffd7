use crate::models::{OutputFormat, Toggle};
use indexmap::IndexMap;
use std::sync::LazyLock;

/// Flags that take the following token as their value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueFlag {
    DataDir,
    OutputDir,
    InputFile,
}

/// What the scanner does when it meets a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagAction {
    /// Print usage and stop
    Usage,
    /// Consume the next token as the value
    Value(ValueFlag),
    /// Switch an option on
    Toggle(Toggle),
}

/// Every accepted spelling, lower case, in usage order.
static FLAGS: LazyLock<IndexMap<&'static str, FlagAction>> = LazyLock::new(|| {
    IndexMap::from([
        ("-usage", FlagAction::Usage),
        ("-datadir", value(ValueFlag::DataDir)),
        ("-objectdir", value(ValueFlag::DataDir)),
        ("-out", value(ValueFlag::OutputDir)),
        ("-outdir", value(ValueFlag::OutputDir)),
        ("-outputdir", value(ValueFlag::OutputDir)),
        ("-infile", value(ValueFlag::InputFile)),
        ("-inputfile", value(ValueFlag::InputFile)),
        ("-smooth", toggle(Toggle::Smooth)),
        ("-blend", output(OutputFormat::Blender)),
        ("-blender", output(OutputFormat::Blender)),
        ("-obj", output(OutputFormat::Wavefront)),
        ("-object", output(OutputFormat::Wavefront)),
        ("-wavefront", output(OutputFormat::Wavefront)),
        ("-fbx", output(OutputFormat::Fbx)),
        ("-dae", output(OutputFormat::Collada)),
        ("-collada", output(OutputFormat::Collada)),
        ("-cry", output(OutputFormat::CryTek)),
        ("-crytek", output(OutputFormat::CryTek)),
        ("-tif", toggle(Toggle::TiffTextures)),
        ("-tiff", toggle(Toggle::TiffTextures)),
        ("-skipshield", toggle(Toggle::SkipShieldNodes)),
        ("-skipshields", toggle(Toggle::SkipShieldNodes)),
        ("-skipproxy", toggle(Toggle::SkipProxyNodes)),
        ("-group", toggle(Toggle::GroupMeshes)),
        ("-throw", toggle(Toggle::Throw)),
        ("-allowconflict", toggle(Toggle::AllowConflicts)),
        ("-allowconflicts", toggle(Toggle::AllowConflicts)),
        ("-noconflict", toggle(Toggle::NoConflicts)),
        ("-noconflicts", toggle(Toggle::NoConflicts)),
        ("-verbose", toggle(Toggle::Verbose)),
    ])
});

fn value(flag: ValueFlag) -> FlagAction {
    FlagAction::Value(flag)
}

fn toggle(toggle: Toggle) -> FlagAction {
    FlagAction::Toggle(toggle)
}

fn output(format: OutputFormat) -> FlagAction {
    FlagAction::Toggle(Toggle::Output(format))
}

/// Look up a command line token. Flag names are case-insensitive.
pub fn lookup(token: &str) -> Option<FlagAction> {
    FLAGS.get(token.to_lowercase().as_str()).copied()
}

/// All flag spellings, in the order they are documented
pub fn spellings() -> impl Iterator<Item = (&'static str, FlagAction)> {
    FLAGS.iter().map(|(name, action)| (*name, *action))
}

/// True if the scan would switch on `-verbose`.
///
/// Logging is configured before the full scan, so this is checked up front. Values
/// of value flags are skipped and `-usage` ends the scan, the same as in parsing.
pub fn requests_verbose<S: AsRef<str>>(tokens: &[S]) -> bool {
    let mut actions = tokens.iter().map(|token| lookup(token.as_ref()));

    while let Some(action) = actions.next() {
        match action {
            Some(FlagAction::Toggle(Toggle::Verbose)) => return true,
            Some(FlagAction::Value(_)) => {
                actions.next();
            }
            Some(FlagAction::Usage) => return false,
            _ => {}
        }
    }

    false
}

/// Progress line logged when a toggle is switched on, if it announces itself
pub fn announcement(toggle: Toggle) -> Option<String> {
    match toggle {
        Toggle::Smooth => Some("Smoothing Faces".to_string()),
        Toggle::Output(format) => Some(format!("Output format set to {}", format)),
        Toggle::GroupMeshes => Some("Grouping set to True".to_string()),
        Toggle::Throw => Some("Exceptions thrown to debugger".to_string()),
        Toggle::AllowConflicts => Some("Allow conflicts for mtl files enabled".to_string()),
        Toggle::NoConflicts => Some("Prevent conflicts for mtl files enabled".to_string()),
        Toggle::Verbose => Some("Verbose output enabled".to_string()),
        Toggle::TiffTextures | Toggle::SkipShieldNodes | Toggle::SkipProxyNodes => None,
    }
}
