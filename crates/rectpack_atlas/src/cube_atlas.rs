//! # Cube Atlas
//!
//! Streaming allocator for cube-map texture updates.
//!
//! Regions are packed across the six faces of a [`CubePages`]. When no
//! face has room, the oldest live regions are evicted, first in first out,
//! until the request fits:
//!
//! ```text
//!   allocate(w, h)
//!     ├─ CubePages::find ── hit ──> new region (newest in queue)
//!     └─ miss ──> evict oldest ──> CubePages::clear ──> retry
//! ```
//!
//! Requests that could not fit even on an empty face fail up front without
//! evicting anything.
//!
//! Released regions stay in the eviction queue until eviction reaches them
//! or the queue is compacted, so `release` never searches the queue.

use std::collections::VecDeque;

use rectpack_core::{CubeFace, CubePages, CubeSlot, PageStats, COLUMNS, DEFAULT_ROWS};
use tracing::debug;

use crate::config::CubeAtlasConfig;
use crate::error::{AtlasError, AtlasResult};
use crate::handle::AtlasHandle;
use crate::pool::HandlePool;

/// Queue length, in multiples of the region capacity, that triggers a purge
/// of released handles.
const QUEUE_SLACK: usize = 2;

/// Result of a successful [`CubeAtlas::allocate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CubeAllocation {
    /// Handle of the new region.
    pub handle: AtlasHandle,
    /// Face and rect of the new region.
    pub slot: CubeSlot,
    /// Number of older regions evicted to make room.
    pub evicted: usize,
}

/// Cube-map region cache with oldest-first eviction.
///
/// # Thread Safety
///
/// Not synchronized. Share across threads through
/// [`SharedAtlas`](crate::SharedAtlas).
#[derive(Clone, Debug)]
pub struct CubeAtlas<const ROWS: usize = DEFAULT_ROWS> {
    cube: CubePages<ROWS>,
    regions: HandlePool<CubeSlot>,
    /// Handles in allocation order, oldest first. May hold released
    /// handles, but never at the front.
    order: VecDeque<AtlasHandle>,
}

impl<const ROWS: usize> CubeAtlas<ROWS> {
    /// Creates an empty cube atlas.
    ///
    /// # Errors
    ///
    /// Any [`CubeAtlasConfig::validate`] error.
    pub fn new(config: &CubeAtlasConfig) -> AtlasResult<Self> {
        let grid = config.validate(ROWS)?;
        debug!(side = grid.width(), max_regions = config.max_regions, "cube atlas created");

        Ok(Self {
            cube: CubePages::new(grid.width()),
            regions: HandlePool::new(config.max_regions),
            order: VecDeque::with_capacity(config.max_regions * QUEUE_SLACK),
        })
    }

    /// Reserves a `width x height` region, evicting old regions as needed.
    ///
    /// # Errors
    ///
    /// [`AtlasError::OutOfSpace`] if the request is larger than a face.
    pub fn allocate(&mut self, width: u16, height: u16) -> AtlasResult<CubeAllocation> {
        self.allocate_with(width, height, |_, _| {})
    }

    /// Like [`allocate`](Self::allocate), reporting each evicted region to
    /// `on_evict` so the caller can drop whatever referenced it.
    ///
    /// # Errors
    ///
    /// [`AtlasError::OutOfSpace`] if the request is larger than a face.
    pub fn allocate_with<F>(
        &mut self,
        width: u16,
        height: u16,
        mut on_evict: F,
    ) -> AtlasResult<CubeAllocation>
    where
        F: FnMut(AtlasHandle, CubeSlot),
    {
        if !self.fits_empty_face(width, height) {
            return Err(AtlasError::OutOfSpace { width, height });
        }

        let mut evicted = 0;
        let (handle, slot) = loop {
            if let Some(placed) = Self::place(&mut self.cube, &mut self.regions, width, height) {
                break placed;
            }
            if !self.evict_oldest(&mut on_evict) {
                return Err(AtlasError::OutOfSpace { width, height });
            }
            evicted += 1;
        };

        self.order.push_back(handle);
        if self.order.len() > self.regions.capacity() * QUEUE_SLACK {
            let regions = &self.regions;
            self.order.retain(|&queued| regions.contains(queued));
        }

        Ok(CubeAllocation { handle, slot, evicted })
    }

    /// Releases a region ahead of eviction.
    ///
    /// # Errors
    ///
    /// [`AtlasError::StaleHandle`] if the region was already released or evicted.
    pub fn release(&mut self, handle: AtlasHandle) -> AtlasResult<CubeSlot> {
        let slot = self
            .regions
            .remove(handle)
            .ok_or(AtlasError::StaleHandle(handle))?;
        self.cube.clear(slot);
        self.skip_released();
        Ok(slot)
    }

    /// Face and rect of a live region.
    #[inline]
    #[must_use]
    pub fn get(&self, handle: AtlasHandle) -> Option<CubeSlot> {
        self.regions.get(handle).copied()
    }

    /// Number of live regions.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.regions.len()
    }

    /// Returns true if no region is live.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Maximum number of live regions.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.regions.capacity()
    }

    /// Handle that the next eviction would remove.
    #[inline]
    #[must_use]
    pub fn oldest(&self) -> Option<AtlasHandle> {
        self.order.front().copied()
    }

    /// Releases every region and invalidates all handles.
    pub fn clear(&mut self) {
        let side = self.cube.face(CubeFace::PositiveX).grid().width();
        self.cube.reset(side);
        self.regions.clear();
        self.order.clear();
    }

    /// Read-only view of the underlying cube pages.
    #[inline]
    #[must_use]
    pub const fn pages(&self) -> &CubePages<ROWS> {
        &self.cube
    }

    /// Combined occupancy of all faces.
    #[must_use]
    pub fn stats(&self) -> PageStats {
        self.cube.stats()
    }

    /// Claims a handle slot and a cube region together, or neither.
    fn place(
        cube: &mut CubePages<ROWS>,
        regions: &mut HandlePool<CubeSlot>,
        width: u16,
        height: u16,
    ) -> Option<(AtlasHandle, CubeSlot)> {
        let vacant = regions.vacant_slot()?;
        let slot = cube.find(width, height)?;
        Some((vacant.insert(slot), slot))
    }

    /// Evicts the oldest live region. Returns false if there was none.
    fn evict_oldest<F>(&mut self, on_evict: &mut F) -> bool
    where
        F: FnMut(AtlasHandle, CubeSlot),
    {
        while let Some(handle) = self.order.pop_front() {
            if let Some(slot) = self.regions.remove(handle) {
                self.cube.clear(slot);
                self.skip_released();
                debug!(?handle, face = ?slot.face, rect = ?slot.rect, "evicted cube region");
                on_evict(handle, slot);
                return true;
            }
        }
        false
    }

    /// Pops released handles off the front so it always names a live region.
    fn skip_released(&mut self) {
        while self
            .order
            .front()
            .is_some_and(|&queued| !self.regions.contains(queued))
        {
            self.order.pop_front();
        }
    }

    /// Returns true if the request fits an empty face.
    fn fits_empty_face(&self, width: u16, height: u16) -> bool {
        let grid = self.cube.face(CubeFace::PositiveX).grid();
        width > 0
            && height > 0
            && grid.columns_for(width) <= COLUMNS
            && grid.rows_for(height) <= grid.rows()
    }
}
