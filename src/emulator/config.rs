// Emulator configuration persisted as TOML

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default configuration file name (next to the executable)
pub const CONFIG_FILE: &str = "famicore.toml";

/// Errors from loading or saving the configuration
#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "config I/O error: {}", err),
            ConfigError::Parse(err) => write!(f, "config parse error: {}", err),
            ConfigError::Serialize(err) => write!(f, "config serialize error: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {}

/// User-facing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmulatorConfig {
    pub video: VideoConfig,
    pub audio: AudioConfig,
    pub screenshot: ScreenshotConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    /// Integer window scale (1-8)
    pub scale: u32,
    pub vsync: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub enabled: bool,
    /// Master volume, 0.0-1.0
    pub volume: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenshotConfig {
    pub directory: PathBuf,
    pub include_timestamp: bool,
}

impl Default for VideoConfig {
    fn default() -> Self {
        VideoConfig {
            scale: 3,
            vsync: true,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        AudioConfig {
            enabled: true,
            volume: 0.5,
        }
    }
}

impl Default for ScreenshotConfig {
    fn default() -> Self {
        ScreenshotConfig {
            directory: PathBuf::from("screenshots"),
            include_timestamp: true,
        }
    }
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        EmulatorConfig {
            video: VideoConfig::default(),
            audio: AudioConfig::default(),
            screenshot: ScreenshotConfig::default(),
        }
    }
}

impl EmulatorConfig {
    /// Load from the given path, falling back to defaults if the file
    /// is missing or malformed
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|text| toml::from_str(&text).ok())
            .unwrap_or_default()
    }

    /// Write the configuration to the given path
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let text = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        fs::write(path, text).map_err(ConfigError::Io)
    }
}
