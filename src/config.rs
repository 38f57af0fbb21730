// Configuration management
//
// Window defaults and screenshot settings, persisted as TOML.

use crate::session::{WindowOptions, DEFAULT_SCALE, DEFAULT_TARGET_FPS, DEFAULT_TITLE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default configuration file path
pub const CONFIG_FILE: &str = "fenster.toml";

/// Errors that can occur while loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file is not valid TOML for this configuration
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be serialized
    #[error("Serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FensterConfig {
    /// Window settings
    pub window: WindowConfig,

    /// Screenshot settings
    pub screenshot: ScreenshotConfig,
}

/// Window configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Logical width in pixels
    pub width: i64,

    /// Logical height in pixels
    pub height: i64,

    /// Window title
    pub title: String,

    /// Scale factor (power of two)
    pub scale: i64,

    /// Target FPS (0 disables frame pacing)
    pub target_fps: f64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: 320,
            height: 240,
            title: DEFAULT_TITLE.to_string(),
            scale: DEFAULT_SCALE,
            target_fps: DEFAULT_TARGET_FPS,
        }
    }
}

impl WindowConfig {
    /// Build session options from this configuration
    pub fn to_options(&self) -> WindowOptions {
        WindowOptions::new(self.width, self.height)
            .with_title(self.title.clone())
            .with_scale(self.scale)
            .with_target_fps(self.target_fps)
    }
}

/// Screenshot configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenshotConfig {
    /// Screenshot directory
    pub directory: PathBuf,

    /// Include timestamp in filename
    pub include_timestamp: bool,
}

impl Default for ScreenshotConfig {
    fn default() -> Self {
        ScreenshotConfig {
            directory: PathBuf::from("screenshots"),
            include_timestamp: true,
        }
    }
}

impl FensterConfig {
    /// Load configuration from file or fall back to defaults
    ///
    /// If the file is missing or invalid, the default configuration is
    /// returned and written to `path`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use fenster_rs::config::{FensterConfig, CONFIG_FILE};
    ///
    /// let config = FensterConfig::load_or_default(CONFIG_FILE);
    /// ```
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        Self::load(path).unwrap_or_else(|e| {
            tracing::info!(path = %path.display(), error = %e, "using default configuration");
            let config = Self::default();
            // Saving the defaults is best effort
            if let Err(e) = config.save(path) {
                tracing::warn!(path = %path.display(), error = %e, "failed to write default configuration");
            }
            config
        })
    }

    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Save configuration to a TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("fenster_config_{}_{}.toml", name, std::process::id()))
    }

    #[test]
    fn test_default_config() {
        let config = FensterConfig::default();
        assert_eq!(config.window.width, 320);
        assert_eq!(config.window.height, 240);
        assert_eq!(config.window.title, "fenster");
        assert_eq!(config.window.scale, 1);
        assert_eq!(config.window.target_fps, 60.0);
        assert!(config.screenshot.include_timestamp);
    }

    #[test]
    fn test_config_serialization() {
        let config = FensterConfig::default();
        let toml_str = toml::to_string(&config).expect("Failed to serialize");
        let deserialized: FensterConfig =
            toml::from_str(&toml_str).expect("Failed to deserialize");
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: FensterConfig = toml::from_str("[window]\nscale = 4\n").unwrap();
        assert_eq!(config.window.scale, 4);
        assert_eq!(config.window.width, 320);
        assert_eq!(config.screenshot, ScreenshotConfig::default());
    }

    #[test]
    fn test_to_options() {
        let window = WindowConfig {
            width: 64,
            height: 48,
            title: "demo".to_string(),
            scale: 8,
            target_fps: 30.0,
        };
        let options = window.to_options();
        assert_eq!(options.width, 64);
        assert_eq!(options.height, 48);
        assert_eq!(options.title, "demo");
        assert_eq!(options.scale, 8);
        assert_eq!(options.target_fps, 30.0);
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("save_load");
        let mut config = FensterConfig::default();
        config.window.title = "saved".to_string();
        config.save(&path).unwrap();

        let loaded = FensterConfig::load(&path).unwrap();
        assert_eq!(loaded.window.title, "saved");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_or_default_writes_defaults() {
        let path = temp_path("missing");
        let _ = fs::remove_file(&path);

        let config = FensterConfig::load_or_default(&path);
        assert_eq!(config, FensterConfig::default());
        assert!(path.exists());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_invalid_file() {
        let path = temp_path("invalid");
        fs::write(&path, "window = 5").unwrap();
        assert!(matches!(FensterConfig::load(&path), Err(ConfigError::Parse(_))));
        let _ = fs::remove_file(&path);
    }
}
