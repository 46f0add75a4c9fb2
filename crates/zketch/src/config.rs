//! Configuration system

use crate::registry::DEFAULT_CLASS_NAME;
use crate::window::WindowConfig;
use std::path::Path;

pub use serde::{Deserialize, Serialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    ///
    /// # Errors
    /// I/O and parse failures, or an extension other than `.toml` or `.ron`.
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match ConfigFormat::of(path)? {
            ConfigFormat::Toml => {
                toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            ConfigFormat::Ron => {
                ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
            }
        }
    }

    /// Load configuration from file, falling back to defaults when it is missing
    ///
    /// # Errors
    /// Anything [`Config::load_from_file`] reports except a missing file.
    fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match Self::load_from_file(path) {
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Save configuration to file
    ///
    /// # Errors
    /// Serialization and I/O failures, or an unsupported extension.
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match ConfigFormat::of(path)? {
            ConfigFormat::Toml => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            ConfigFormat::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

enum ConfigFormat {
    Toml,
    Ron,
}

impl ConfigFormat {
    fn of(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Application settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Window class registered with the host
    pub class_name: String,
    /// Default `env_logger` filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Main window
    pub window: WindowConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            class_name: DEFAULT_CLASS_NAME.to_string(),
            log_level: "info".to_string(),
            window: WindowConfig::default(),
        }
    }
}

impl Config for AppConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Size};
    use crate::window::WindowStyle;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("zketch_{}_{name}", std::process::id()))
    }

    fn sample() -> AppConfig {
        AppConfig {
            class_name: "sketchpad".to_string(),
            log_level: "debug".to_string(),
            window: WindowConfig::new("Sketch", Size::new(800, 600))
                .with_position(Point::new(40, -20))
                .with_style(WindowStyle::POPUP_WINDOW | WindowStyle::VISIBLE),
        }
    }

    #[test]
    fn test_toml_round_trip() {
        let path = temp_path("config.toml");
        sample().save_to_file(&path).expect("save");
        let loaded = AppConfig::load_from_file(&path).expect("load");
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, sample());
    }

    #[test]
    fn test_ron_round_trip() {
        let path = temp_path("config.ron");
        sample().save_to_file(&path).expect("save");
        let loaded = AppConfig::load_from_file(&path).expect("load");
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, sample());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: AppConfig = toml::from_str("class_name = \"partial\"\n").expect("parse");
        assert_eq!(config.class_name, "partial");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn test_unsupported_extension() {
        let result = AppConfig::default().save_to_file(temp_path("config.json"));
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = AppConfig::load_or_default(temp_path("missing.toml")).expect("defaults");
        assert_eq!(config, AppConfig::default());
    }
}
