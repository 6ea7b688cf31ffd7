use serde::{Deserialize, Serialize};

/// Settings file layout for cgf-converter.yaml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsFile {
    #[serde(rename = "Converter_Settings", default)]
    pub converter_settings: ConverterSettings,
}

/// Options that apply to every run, independent of the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConverterSettings {
    /// Empty keeps logging on the console only
    #[serde(rename = "Log Directory", default)]
    pub log_directory: String,

    #[serde(rename = "Log Prefix", default = "default_log_prefix")]
    pub log_prefix: String,

    #[serde(rename = "Debug Mode", default)]
    pub debug_mode: bool,

    #[serde(rename = "Console Output", default = "default_console_output")]
    pub console_output: bool,

    /// Used as the data directory when `-datadir` is not given. Empty means unset.
    #[serde(rename = "Default Data Dir", default)]
    pub default_data_dir: String,
}

impl Default for ConverterSettings {
    fn default() -> Self {
        Self {
            log_directory: String::new(),
            log_prefix: default_log_prefix(),
            debug_mode: false,
            console_output: default_console_output(),
            default_data_dir: String::new(),
        }
    }
}

impl ConverterSettings {
    /// The configured default data directory, if any
    pub fn log_directory(&self) -> Option<&str> {
        let dir = self.log_directory.trim();
        (!dir.is_empty()).then_some(dir)
    }

    pub fn default_data_dir(&self) -> Option<&str> {
        let dir = self.default_data_dir.trim();
        (!dir.is_empty()).then_some(dir)
    }
}

fn default_log_prefix() -> String {
    "cgf-converter".to_string()
}

fn default_console_output() -> bool {
    true
}
