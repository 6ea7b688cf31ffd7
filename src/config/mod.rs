use crate::models::{ConverterSettings, SettingsFile};
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Name of the settings file inside the configuration directory
pub const SETTINGS_FILE_NAME: &str = "cgf-converter.yaml";

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "CGF_CONVERTER_CONFIG_DIR";

/// Configuration manager for loading and saving the converter settings file.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    settings_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the specified configuration directory.
    ///
    /// The directory does not have to exist; it is only created by [`Self::save_settings`].
    ///
    /// # Arguments
    /// * `config_dir` - Directory containing `cgf-converter.yaml`
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        Ok(Self {
            settings_path: config_dir.join(SETTINGS_FILE_NAME),
            config_dir,
        })
    }

    /// ConfigManager for the directory named by `CGF_CONVERTER_CONFIG_DIR`, or the
    /// current directory when it is unset.
    pub fn from_env() -> Result<Self> {
        let dir = std::env::var(CONFIG_DIR_ENV).unwrap_or_else(|_| ".".to_string());
        Self::new(dir)
    }

    /// Load the settings file.
    ///
    /// # Returns
    /// The loaded settings, or defaults if the file doesn't exist
    pub fn load_settings(&self) -> Result<ConverterSettings> {
        if !self.settings_path.exists() {
            tracing::debug!(
                "Settings file not found at {}, using defaults",
                self.settings_path
            );
            return Ok(ConverterSettings::default());
        }

        let file_contents = fs::read_to_string(&self.settings_path)
            .with_context(|| format!("Failed to read settings: {}", self.settings_path))?;

        let file: SettingsFile = serde_yaml_ng::from_str(&file_contents)
            .with_context(|| format!("Failed to parse settings: {}", self.settings_path))?;

        tracing::info!("Loaded settings from {}", self.settings_path);
        Ok(file.converter_settings)
    }

    /// Save the settings file.
    pub fn save_settings(&self, settings: &ConverterSettings) -> Result<()> {
        let file = SettingsFile {
            converter_settings: settings.clone(),
        };
        let yaml_string =
            serde_yaml_ng::to_string(&file).context("Failed to serialize settings to YAML")?;

        if !self.config_dir.exists() {
            fs::create_dir_all(&self.config_dir).with_context(|| {
                format!("Failed to create config directory: {}", self.config_dir)
            })?;
        }

        fs::write(&self.settings_path, yaml_string)
            .with_context(|| format!("Failed to write settings: {}", self.settings_path))?;

        tracing::info!("Saved settings to {}", self.settings_path);
        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    pub fn settings_path(&self) -> &Utf8Path {
        &self.settings_path
    }
}
