//! Runtime configuration.
//!
//! Read from `image-placer.toml` in the base directory. The file is optional
//! and every key has a default:
//!
//! | Key | Default | Meaning |
//! |-----|---------|---------|
//! | `image_dir` | `image` | Directory scanned for images |
//! | `export_path` | `placements.txt` | Listing written on export |
//! | `icon_path` | `other/icon.png` | Window icon |
//! | `font_path` | `other/font.ttf` | Panel font |
//! | `font_size` | `12.0` | Panel font size in points |
//! | `frame_rate` | `20` | Frames per second |
//! | `repeat_delay_ms` | `500` | Hold time before a key repeats |
//! | `repeat_interval_ms` | `100` | Time between repeats |
//! | `[bindings]` | | Per-action trigger overrides |

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::core::DEFAULT_EXPORT_PATH;
use crate::input::{BindingParseError, BindingTable, KeyRepeat};
use crate::types::{
    frame_ms, DEFAULT_FRAME_RATE, DEFAULT_REPEAT_DELAY_MS, DEFAULT_REPEAT_INTERVAL_MS,
};

/// Name of the optional config file in the base directory.
pub const CONFIG_FILE: &str = "image-placer.toml";

/// Default image directory, also used to detect the base directory.
pub const IMAGE_DIR: &str = "image";

/// Directory holding the icon and font, also used to detect the base directory.
pub const ASSET_DIR: &str = "other";

/// Errors from loading or validating the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid config value: {0}")]
    Invalid(String),

    #[error("invalid key binding: {0}")]
    Binding(#[from] BindingParseError),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub image_dir: PathBuf,
    pub export_path: PathBuf,
    pub icon_path: PathBuf,
    pub font_path: PathBuf,
    pub font_size: f32,
    pub frame_rate: u32,
    pub repeat_delay_ms: u32,
    pub repeat_interval_ms: u32,
    /// Action name to trigger strings, e.g. `export = ["F2"]`.
    pub bindings: BTreeMap<String, Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_dir: PathBuf::from(IMAGE_DIR),
            export_path: PathBuf::from(DEFAULT_EXPORT_PATH),
            icon_path: Path::new(ASSET_DIR).join("icon.png"),
            font_path: Path::new(ASSET_DIR).join("font.ttf"),
            font_size: 12.0,
            frame_rate: DEFAULT_FRAME_RATE,
            repeat_delay_ms: DEFAULT_REPEAT_DELAY_MS,
            repeat_interval_ms: DEFAULT_REPEAT_INTERVAL_MS,
            bindings: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Parse and validate TOML text.
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `image-placer.toml` from `base_dir`, or defaults if it is absent.
    pub fn load(base_dir: &Path) -> Result<Self, ConfigError> {
        let path = base_dir.join(CONFIG_FILE);
        if !path.is_file() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let text = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = Self::from_toml_str(&text, &path)?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_rate == 0 {
            return Err(ConfigError::Invalid("frame_rate must be at least 1".into()));
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "font_size must be positive, got {}",
                self.font_size
            )));
        }
        let budget = self.frame_ms();
        if self.repeat_interval_ms < budget {
            return Err(ConfigError::Invalid(format!(
                "repeat_interval_ms ({}) is shorter than one frame ({budget} ms)",
                self.repeat_interval_ms
            )));
        }
        // Parse bindings eagerly so a typo fails at startup.
        self.binding_table()?;
        Ok(())
    }

    pub fn frame_ms(&self) -> u32 {
        frame_ms(self.frame_rate)
    }

    /// Default bindings with this config's overrides applied.
    pub fn binding_table(&self) -> Result<BindingTable, ConfigError> {
        Ok(BindingTable::default().with_overrides(&self.bindings)?)
    }

    pub fn key_repeat(&self) -> KeyRepeat {
        KeyRepeat::with_config(self.repeat_delay_ms, self.repeat_interval_ms)
    }
}

/// Pick the directory relative paths are resolved against.
///
/// The working directory wins when it contains both the image and the asset
/// directory. If either is missing, the executable's directory is used when
/// it has both (a launch from a shortcut or a file manager); failing that the
/// working directory is kept and the missing paths are reported later.
pub fn resolve_base_dir(cwd: &Path, exe_dir: Option<&Path>) -> PathBuf {
    let has_layout = |dir: &Path| dir.join(IMAGE_DIR).is_dir() && dir.join(ASSET_DIR).is_dir();
    if has_layout(cwd) {
        return cwd.to_path_buf();
    }
    match exe_dir {
        Some(dir) if has_layout(dir) => dir.to_path_buf(),
        _ => cwd.to_path_buf(),
    }
}
