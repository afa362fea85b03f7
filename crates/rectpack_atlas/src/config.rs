//! # Atlas Configuration
//!
//! Atlas sizes are loaded once at startup from TOML:
//!
//! ```toml
//! [sprite]
//! width = 1024
//! height = 1024
//! max_sprites = 256
//!
//! [cube]
//! side = 1024
//! max_regions = 4096
//! ```
//!
//! Missing sections or keys fall back to the defaults. The grid row count
//! is a compile-time parameter of each atlas type, so validation takes it
//! as an argument.

use std::path::Path;

use rectpack_core::GridConfig;
use serde::{Deserialize, Serialize};

use crate::error::{AtlasError, AtlasResult};
use crate::pool::MAX_SLOTS;

/// Sprite atlas section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpriteAtlasConfig {
    /// Atlas texture width in pixels.
    pub width: u32,
    /// Atlas texture height in pixels.
    pub height: u32,
    /// Maximum number of live sprites.
    pub max_sprites: usize,
}

impl Default for SpriteAtlasConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
            max_sprites: 256,
        }
    }
}

impl SpriteAtlasConfig {
    /// Checks the section against a grid of `rows` rows.
    ///
    /// # Errors
    ///
    /// [`AtlasError::Pack`] for a degenerate canvas, [`AtlasError::InvalidConfig`]
    /// for an unusable sprite count.
    pub fn validate(&self, rows: usize) -> AtlasResult<GridConfig> {
        check_slots("sprite.max_sprites", self.max_sprites)?;
        Ok(GridConfig::new(self.width, self.height, rows)?)
    }
}

/// Cube atlas section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CubeAtlasConfig {
    /// Side length of each cube face in pixels.
    pub side: u32,
    /// Maximum number of live regions across all faces.
    pub max_regions: usize,
}

impl Default for CubeAtlasConfig {
    fn default() -> Self {
        Self {
            side: 1024,
            max_regions: 4096,
        }
    }
}

impl CubeAtlasConfig {
    /// Checks the section against a grid of `rows` rows.
    ///
    /// # Errors
    ///
    /// [`AtlasError::Pack`] for a degenerate face, [`AtlasError::InvalidConfig`]
    /// for an unusable region count.
    pub fn validate(&self, rows: usize) -> AtlasResult<GridConfig> {
        check_slots("cube.max_regions", self.max_regions)?;
        Ok(GridConfig::new(self.side, self.side, rows)?)
    }
}

/// Top-level atlas configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AtlasConfig {
    /// Sprite atlas settings.
    pub sprite: SpriteAtlasConfig,
    /// Cube atlas settings.
    pub cube: CubeAtlasConfig,
}

impl AtlasConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// [`AtlasError::InvalidConfig`] if the document does not parse.
    pub fn from_toml_str(source: &str) -> AtlasResult<Self> {
        toml::from_str(source).map_err(|e| AtlasError::InvalidConfig(e.to_string()))
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// [`AtlasError::ConfigIo`] if the file cannot be read,
    /// [`AtlasError::InvalidConfig`] if it does not parse.
    pub fn from_toml_file(path: impl AsRef<Path>) -> AtlasResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| AtlasError::ConfigIo(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&source)
    }

    /// Checks both sections against a grid of `rows` rows.
    ///
    /// # Errors
    ///
    /// The first section error found.
    pub fn validate(&self, rows: usize) -> AtlasResult<()> {
        self.sprite.validate(rows)?;
        self.cube.validate(rows)?;
        Ok(())
    }
}

fn check_slots(key: &str, count: usize) -> AtlasResult<()> {
    if count == 0 || count > MAX_SLOTS {
        return Err(AtlasError::InvalidConfig(format!(
            "{key} must be in 1..={MAX_SLOTS}, got {count}"
        )));
    }
    Ok(())
}
