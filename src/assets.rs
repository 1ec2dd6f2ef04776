//! Window icon and panel font.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::config::Config;
use crate::core::{LoadError, Sprite};

/// The icon's transparent colour is sampled from this pixel.
pub const ICON_COLOR_KEY_POINT: (u32, u32) = (0, 0);

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("required asset {} is missing", path.display())]
    Missing { path: PathBuf },

    #[error("failed to load window icon: {0}")]
    Icon(#[from] LoadError),

    #[error("failed to read font {}: {source}", path.display())]
    Font {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("font {} is not a usable TrueType/OpenType font: {source}", path.display())]
    InvalidFont {
        path: PathBuf,
        #[source]
        source: ab_glyph::InvalidFont,
    },
}

/// Colour-keyed icon pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Raw TrueType/OpenType font bytes plus the size to render at.
#[derive(Debug, Clone, PartialEq)]
pub struct FontAsset {
    pub bytes: Vec<u8>,
    pub size: f32,
}

#[derive(Debug, Clone)]
pub struct Assets {
    pub icon: Icon,
    pub font: FontAsset,
}

impl Assets {
    /// Load the icon and font named by `config`, relative to `base_dir`.
    pub fn load(base_dir: &Path, config: &Config) -> Result<Self, AssetError> {
        let icon = load_icon(&base_dir.join(&config.icon_path))?;
        let font = load_font(&base_dir.join(&config.font_path), config.font_size)?;
        Ok(Self { icon, font })
    }
}

pub fn load_icon(path: &Path) -> Result<Icon, AssetError> {
    require(path)?;
    let sprite = Sprite::create_with_colorkey(path, ICON_COLOR_KEY_POINT)?;
    let (width, height) = (sprite.width(), sprite.height());
    info!(path = %path.display(), width, height, "loaded window icon");
    Ok(Icon {
        width,
        height,
        rgba: sprite.into_surface().into_rgba(),
    })
}

pub fn load_font(path: &Path, size: f32) -> Result<FontAsset, AssetError> {
    require(path)?;
    let bytes = fs::read(path).map_err(|source| AssetError::Font {
        path: path.to_path_buf(),
        source,
    })?;
    // The window installs these bytes as-is, so they must parse here.
    ab_glyph::FontRef::try_from_slice(&bytes).map_err(|source| AssetError::InvalidFont {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), bytes = bytes.len(), size, "loaded font");
    Ok(FontAsset { bytes, size })
}

fn require(path: &Path) -> Result<(), AssetError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(AssetError::Missing {
            path: path.to_path_buf(),
        })
    }
}
