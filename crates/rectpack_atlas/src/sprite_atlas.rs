//! # Sprite Atlas
//!
//! Sprite cache for debug overlays and particle systems: one texture,
//! one [`PackPage`], and a handle per live sprite.
//!
//! ```text
//!   create(w, h) ──> HandlePool::vacant_slot ──> PackPage::find ──> AtlasHandle
//!   destroy(h)   ──> HandlePool::remove (generation check) ──> PackPage::clear
//! ```
//!
//! Because every release goes through the handle pool, a double destroy
//! or a handle from another atlas is rejected before it can touch the page.

use rectpack_core::{PackPage, PackedRect, PageStats, DEFAULT_ROWS};
use tracing::{debug, warn};

use crate::config::SpriteAtlasConfig;
use crate::error::{AtlasError, AtlasResult};
use crate::handle::AtlasHandle;
use crate::pool::HandlePool;

/// A texture atlas of individually allocated sprites.
///
/// # Thread Safety
///
/// Not synchronized. Share across threads through
/// [`SharedAtlas`](crate::SharedAtlas).
#[derive(Clone, Debug)]
pub struct SpriteAtlas<const ROWS: usize = DEFAULT_ROWS> {
    page: PackPage<ROWS>,
    sprites: HandlePool<PackedRect>,
}

impl<const ROWS: usize> SpriteAtlas<ROWS> {
    /// Creates an empty atlas.
    ///
    /// # Errors
    ///
    /// Any [`SpriteAtlasConfig::validate`] error.
    pub fn new(config: &SpriteAtlasConfig) -> AtlasResult<Self> {
        let grid = config.validate(ROWS)?;
        debug!(
            width = grid.width(),
            height = grid.height(),
            block_width = grid.block_width(),
            block_height = grid.block_height(),
            max_sprites = config.max_sprites,
            "sprite atlas created"
        );

        Ok(Self {
            page: PackPage::new(grid.width(), grid.height()),
            sprites: HandlePool::new(config.max_sprites),
        })
    }

    /// Reserves room for a `width x height` sprite.
    ///
    /// # Errors
    ///
    /// - [`AtlasError::SlotsExhausted`] if the sprite limit is reached
    /// - [`AtlasError::OutOfSpace`] if no free region is large enough
    pub fn create(&mut self, width: u16, height: u16) -> AtlasResult<AtlasHandle> {
        let (live, capacity) = (self.sprites.len(), self.sprites.capacity());
        let Some(vacant) = self.sprites.vacant_slot() else {
            return Err(AtlasError::SlotsExhausted { capacity });
        };

        let Some(rect) = self.page.find(width, height) else {
            warn!(width, height, live, "sprite atlas full");
            return Err(AtlasError::OutOfSpace { width, height });
        };

        Ok(vacant.insert(rect))
    }

    /// Releases a sprite, returning the rect it occupied.
    ///
    /// # Errors
    ///
    /// [`AtlasError::StaleHandle`] if the handle is not live in this atlas.
    pub fn destroy(&mut self, handle: AtlasHandle) -> AtlasResult<PackedRect> {
        let rect = self
            .sprites
            .remove(handle)
            .ok_or(AtlasError::StaleHandle(handle))?;
        self.page.clear(rect);
        Ok(rect)
    }

    /// Pixel rect of a live sprite.
    #[inline]
    #[must_use]
    pub fn get(&self, handle: AtlasHandle) -> Option<PackedRect> {
        self.sprites.get(handle).copied()
    }

    /// Normalized texture coordinates `[u0, v0, u1, v1]` of a live sprite.
    ///
    /// Covers the whole reserved rect, which may be slightly larger than the
    /// requested size after block rounding.
    #[must_use]
    pub fn uv_rect(&self, handle: AtlasHandle) -> Option<[f32; 4]> {
        let rect = self.get(handle)?;
        let grid = self.page.grid();
        let (w, h) = (f32::from(grid.width()), f32::from(grid.height()));

        Some([
            f32::from(rect.x) / w,
            f32::from(rect.y) / h,
            f32::from(rect.x + rect.width) / w,
            f32::from(rect.y + rect.height) / h,
        ])
    }

    /// Atlas texture size in pixels.
    #[inline]
    #[must_use]
    pub fn size(&self) -> (u16, u16) {
        let grid = self.page.grid();
        (grid.width(), grid.height())
    }

    /// Number of live sprites.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.sprites.len()
    }

    /// Returns true if no sprite is live.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Maximum number of live sprites.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.sprites.capacity()
    }

    /// Releases every sprite and invalidates all handles.
    pub fn clear(&mut self) {
        let (width, height) = self.size();
        self.page.reset(width, height);
        self.sprites.clear();
    }

    /// Iterates over live sprites.
    pub fn iter(&self) -> impl Iterator<Item = (AtlasHandle, PackedRect)> + '_ {
        self.sprites.iter().map(|(handle, rect)| (handle, *rect))
    }

    /// Block occupancy of the atlas page.
    #[must_use]
    pub fn page_stats(&self) -> PageStats {
        self.page.stats()
    }
}
