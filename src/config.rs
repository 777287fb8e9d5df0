//! Configuration file support for spantag.
//!
//! This module provides serialization and deserialization of user settings
//! and label definitions, so that a label set can be shared between
//! sessions and machines.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color_utils;
use crate::document::DocumentMode;
use crate::error::LabelError;
use crate::model::{Label, LabelColors, default_labels};
use crate::registry::LabelRegistry;

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    #[default]
    Warn,
    /// Show errors, warnings, and info messages
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Get the display name for this log level.
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Trace => "Trace",
        }
    }

    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Configuration that can be exported and imported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// User preferences
    #[serde(default)]
    pub preferences: UserPreferences,

    /// Label definitions, in display order
    #[serde(default = "default_label_configs")]
    pub labels: Vec<LabelConfig>,
}

fn default_label_configs() -> Vec<LabelConfig> {
    default_labels().iter().map(LabelConfig::from).collect()
}

/// User preferences section of the config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Mode used when a file type is not given explicitly
    #[serde(default)]
    pub default_mode: DocumentMode,
}

/// Label definition for serialization.
///
/// Colors are `#rrggbb` strings. A missing background or foreground is
/// derived from the accent color; a missing accent color is generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelConfig {
    /// Unique key of the label
    pub key: String,
    /// Display name of the label
    pub name: String,
    /// Accent color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Highlight background color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// Highlighted text color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground: Option<String>,
}

impl From<&Label> for LabelConfig {
    fn from(label: &Label) -> Self {
        Self {
            key: label.key.to_string(),
            name: label.name.clone(),
            color: Some(color_utils::to_hex(label.colors.accent)),
            background: Some(color_utils::to_hex(label.colors.background)),
            foreground: Some(color_utils::to_hex(label.colors.foreground)),
        }
    }
}

impl LabelConfig {
    /// Convert to a label. `index` seeds the generated color when no accent
    /// color is configured.
    pub fn to_label(&self, index: usize) -> Result<Label, LabelError> {
        let parse = |value: &Option<String>| -> Result<Option<color_utils::Rgb>, LabelError> {
            match value {
                None => Ok(None),
                Some(text) => color_utils::parse_hex(text)
                    .map(Some)
                    .ok_or_else(|| LabelError::InvalidColor {
                        key: self.key.clone(),
                        value: text.clone(),
                    }),
            }
        };

        let accent = parse(&self.color)?.unwrap_or_else(|| color_utils::generated_color(index));
        let derived = LabelColors::from_accent(accent);
        let colors = LabelColors::new(
            accent,
            parse(&self.background)?.unwrap_or(derived.background),
            parse(&self.foreground)?.unwrap_or(derived.foreground),
        );

        Ok(Label::new(self.key.trim(), self.name.trim(), colors))
    }
}

impl AppConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            preferences: UserPreferences::default(),
            labels: default_label_configs(),
        }
    }

    /// Build the label registry described by this configuration.
    pub fn registry(&self) -> Result<LabelRegistry, ConfigError> {
        let labels = self
            .labels
            .iter()
            .enumerate()
            .map(|(i, label)| label.to_label(i))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(LabelRegistry::new(labels)?)
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Read configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Get the default filename for config export.
    pub fn default_filename() -> &'static str {
        "spantag-config.json"
    }

    /// Get the default config file path for auto-load/save.
    pub fn default_path() -> Option<PathBuf> {
        // Try to use XDG config directory, fall back to home directory
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("spantag").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("spantag")
                    .join(Self::default_filename())
            })
        }
    }

    /// Load configuration from the default path.
    ///
    /// Returns `Ok(None)` if there is no config file yet.
    pub fn load_from_default_path() -> Result<Option<Self>, ConfigError> {
        let Some(path) = Self::default_path() else {
            return Ok(None);
        };
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return Ok(None);
        }
        Self::load(&path).map(Some)
    }

    /// Write configuration to a file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = self.to_json()?;
        std::fs::write(path, json)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Save configuration to the default path.
    pub fn save_to_default_path(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::default_path().ok_or_else(|| {
            ConfigError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config directory",
            ))
        })?;
        self.save(&path)?;
        Ok(path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Label definitions are invalid
    #[error("Invalid label definitions: {0}")]
    Labels(#[from] LabelError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_roundtrip() {
        let config = AppConfig::new();
        let json = config.to_json().unwrap();
        assert!(json.contains("\"person\""));
        assert!(json.contains("#ef4444"));

        let parsed = AppConfig::from_json(&json).unwrap();
        assert_eq!(parsed.labels, config.labels);
        assert_eq!(parsed.preferences.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_default_config_matches_default_registry() {
        let registry = AppConfig::new().registry().unwrap();
        let builtin = LabelRegistry::default();
        assert_eq!(registry.all(), builtin.all());
    }

    #[test]
    fn test_version_too_new() {
        let json = format!("{{\"version\": {}}}", CONFIG_VERSION + 1);
        let err = AppConfig::from_json(&json).unwrap_err();
        assert!(matches!(err, ConfigError::VersionTooNew { .. }));
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = AppConfig::from_json("{\"version\": 1}").unwrap();
        assert_eq!(config.labels.len(), 3);
        assert_eq!(config.preferences.default_mode, DocumentMode::LineText);
    }

    #[test]
    fn test_label_colors_derived_and_generated() {
        let json = r##"{
            "version": 1,
            "preferences": { "log_level": "debug", "default_mode": "record" },
            "labels": [
                { "key": "date", "name": "Date", "color": "#aa00aa" },
                { "key": "misc", "name": "Misc" }
            ]
        }"##;
        let config = AppConfig::from_json(json).unwrap();
        assert_eq!(config.preferences.log_level, LogLevel::Debug);
        assert_eq!(config.preferences.default_mode, DocumentMode::Record);

        let registry = config.registry().unwrap();
        let date = registry.lookup("date").unwrap();
        assert_eq!(date.colors, LabelColors::from_accent([0xaa, 0x00, 0xaa]));
        let misc = registry.lookup("misc").unwrap();
        assert_eq!(misc.colors.accent, color_utils::generated_color(1));
    }

    #[test]
    fn test_invalid_label_config() {
        let mut config = AppConfig::new();
        config.labels[0].color = Some("red".to_string());
        assert!(matches!(
            config.registry(),
            Err(ConfigError::Labels(LabelError::InvalidColor { .. }))
        ));

        let mut config = AppConfig::new();
        config.labels[1].key = "person".to_string();
        assert!(matches!(
            config.registry(),
            Err(ConfigError::Labels(LabelError::DuplicateKey { .. }))
        ));
    }

    #[test]
    fn test_save_then_load() {
        let dir = std::env::temp_dir().join(format!("spantag-config-test-{}", std::process::id()));
        let path = dir.join("nested").join(AppConfig::default_filename());

        let mut config = AppConfig::new();
        config.preferences.log_level = LogLevel::Info;
        config.labels.truncate(1);
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded.preferences.log_level, LogLevel::Info);
        assert_eq!(loaded.labels, config.labels);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_corrupt_file_is_an_error() {
        let dir = std::env::temp_dir().join(format!("spantag-corrupt-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(AppConfig::default_filename());
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(AppConfig::load(&path), Err(ConfigError::ParseError(_))));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_default_path_file_name() {
        if let Some(path) = AppConfig::default_path() {
            assert!(path.ends_with("spantag/spantag-config.json"));
        }
    }

    #[test]
    fn test_log_level_filter() {
        assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
        assert_eq!(LogLevel::default().name(), "Warn");
    }
}
