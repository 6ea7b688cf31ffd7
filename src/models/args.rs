use crate::args::ArgsError;
use camino::{Utf8Path, Utf8PathBuf};
use std::fmt;

/// Exporters the conversion pipeline knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    CryTek,
    Wavefront,
    Blender,
    Collada,
    Fbx,
}

impl OutputFormat {
    /// File extensions written by the exporter for this format
    pub fn extensions(self) -> &'static str {
        match self {
            OutputFormat::CryTek => ".cga/.cgf/.chr/.skin",
            OutputFormat::Wavefront => ".obj",
            OutputFormat::Blender => ".blend",
            OutputFormat::Collada => ".dae",
            OutputFormat::Fbx => ".fbx",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::CryTek => "CryTek",
            OutputFormat::Wavefront => "Wavefront",
            OutputFormat::Blender => "Blender",
            OutputFormat::Collada => "COLLADA",
            OutputFormat::Fbx => "FBX",
        };
        write!(f, "{} ({})", name, self.extensions())
    }
}

/// Independent output format switches. Any combination may be enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputFormats {
    pub crytek: bool,
    pub wavefront: bool,
    pub blender: bool,
    pub collada: bool,
    pub fbx: bool,
}

impl OutputFormats {
    pub fn enable(&mut self, format: OutputFormat) {
        match format {
            OutputFormat::CryTek => self.crytek = true,
            OutputFormat::Wavefront => self.wavefront = true,
            OutputFormat::Blender => self.blender = true,
            OutputFormat::Collada => self.collada = true,
            OutputFormat::Fbx => self.fbx = true,
        }
    }

    pub fn contains(&self, format: OutputFormat) -> bool {
        match format {
            OutputFormat::CryTek => self.crytek,
            OutputFormat::Wavefront => self.wavefront,
            OutputFormat::Blender => self.blender,
            OutputFormat::Collada => self.collada,
            OutputFormat::Fbx => self.fbx,
        }
    }

    /// True when no format has been selected
    pub fn is_empty(&self) -> bool {
        !(self.crytek || self.wavefront || self.blender || self.collada || self.fbx)
    }

    /// Enabled formats in a fixed order
    pub fn iter(&self) -> impl Iterator<Item = OutputFormat> + '_ {
        [
            OutputFormat::CryTek,
            OutputFormat::Wavefront,
            OutputFormat::Blender,
            OutputFormat::Collada,
            OutputFormat::Fbx,
        ]
        .into_iter()
        .filter(|format| self.contains(*format))
    }
}

/// Boolean switches that can be turned on from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toggle {
    Smooth,
    GroupMeshes,
    TiffTextures,
    SkipShieldNodes,
    SkipProxyNodes,
    Throw,
    AllowConflicts,
    NoConflicts,
    Verbose,
    Output(OutputFormat),
}

/// Resolved command line for a single converter run.
///
/// Built once by [`ConversionArgsBuilder::build`] and read-only afterwards. The
/// exporters consult it to decide which formats to write and which nodes to skip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionArgs {
    input_files: Vec<Utf8PathBuf>,
    data_dir: Option<Utf8PathBuf>,
    output_dir: Option<Utf8PathBuf>,
    output_formats: OutputFormats,
    allow_conflicts: bool,
    no_conflicts: bool,
    group_meshes: bool,
    smooth: bool,
    tiff_textures: bool,
    skip_shield_nodes: bool,
    skip_proxy_nodes: bool,
    throw: bool,
    verbose: bool,
}

impl ConversionArgs {
    pub fn builder() -> ConversionArgsBuilder {
        ConversionArgsBuilder::default()
    }

    /// Absolute paths of the models to convert, in command line order
    pub fn input_files(&self) -> &[Utf8PathBuf] {
        &self.input_files
    }

    /// Directory holding the material files referenced by the models
    pub fn data_dir(&self) -> Option<&Utf8Path> {
        self.data_dir.as_deref()
    }

    /// Absolute directory the exporters write to
    pub fn output_dir(&self) -> Option<&Utf8Path> {
        self.output_dir.as_deref()
    }

    pub fn output_formats(&self) -> OutputFormats {
        self.output_formats
    }

    pub fn allow_conflicts(&self) -> bool {
        self.allow_conflicts
    }

    pub fn no_conflicts(&self) -> bool {
        self.no_conflicts
    }

    pub fn group_meshes(&self) -> bool {
        self.group_meshes
    }

    pub fn smooth(&self) -> bool {
        self.smooth
    }

    pub fn tiff_textures(&self) -> bool {
        self.tiff_textures
    }

    /// Skip nodes whose name contains `$shield`
    pub fn skip_shield_nodes(&self) -> bool {
        self.skip_shield_nodes
    }

    /// Skip nodes whose name contains `$proxy`
    pub fn skip_proxy_nodes(&self) -> bool {
        self.skip_proxy_nodes
    }

    /// Let internal errors reach an attached debugger instead of being logged and skipped
    pub fn throw(&self) -> bool {
        self.throw
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}

/// Accumulates options while the command line is scanned.
#[derive(Debug, Clone, Default)]
pub struct ConversionArgsBuilder {
    input_files: Vec<Utf8PathBuf>,
    data_dir: Option<Utf8PathBuf>,
    output_dir: Option<Utf8PathBuf>,
    output_formats: OutputFormats,
    allow_conflicts: bool,
    no_conflicts: bool,
    group_meshes: bool,
    smooth: bool,
    tiff_textures: bool,
    skip_shield_nodes: bool,
    skip_proxy_nodes: bool,
    throw: bool,
    verbose: bool,
}

impl ConversionArgsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data_dir(&mut self, dir: impl Into<Utf8PathBuf>) -> &mut Self {
        self.data_dir = Some(dir.into());
        self
    }

    pub fn output_dir(&mut self, dir: impl Into<Utf8PathBuf>) -> &mut Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn add_input_files<I>(&mut self, files: I) -> &mut Self
    where
        I: IntoIterator<Item = Utf8PathBuf>,
    {
        self.input_files.extend(files);
        self
    }

    pub fn enable(&mut self, toggle: Toggle) -> &mut Self {
        match toggle {
            Toggle::Smooth => self.smooth = true,
            Toggle::GroupMeshes => self.group_meshes = true,
            Toggle::TiffTextures => self.tiff_textures = true,
            Toggle::SkipShieldNodes => self.skip_shield_nodes = true,
            Toggle::SkipProxyNodes => self.skip_proxy_nodes = true,
            Toggle::Throw => self.throw = true,
            Toggle::AllowConflicts => self.allow_conflicts = true,
            Toggle::NoConflicts => self.no_conflicts = true,
            Toggle::Verbose => self.verbose = true,
            Toggle::Output(format) => self.output_formats.enable(format),
        }
        self
    }

    /// Finalize the arguments.
    ///
    /// Fails with [`ArgsError::NoInputFiles`] when nothing was resolved. When no output
    /// format was requested, COLLADA is selected.
    pub fn build(&self) -> Result<ConversionArgs, ArgsError> {
        if self.input_files.is_empty() {
            return Err(ArgsError::NoInputFiles);
        }

        let mut output_formats = self.output_formats;
        if output_formats.is_empty() {
            tracing::debug!("No output format requested, defaulting to COLLADA");
            output_formats.enable(OutputFormat::Collada);
        }

        Ok(ConversionArgs {
            input_files: self.input_files.clone(),
            data_dir: self.data_dir.clone(),
            output_dir: self.output_dir.clone(),
            output_formats,
            allow_conflicts: self.allow_conflicts,
            no_conflicts: self.no_conflicts,
            group_meshes: self.group_meshes,
            smooth: self.smooth,
            tiff_textures: self.tiff_textures,
            skip_shield_nodes: self.skip_shield_nodes,
            skip_proxy_nodes: self.skip_proxy_nodes,
            throw: self.throw,
            verbose: self.verbose,
        })
    }
}
