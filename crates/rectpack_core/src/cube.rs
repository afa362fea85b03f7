//! # Cube Pages
//!
//! Six independently packed square pages, one per cube-map face.
//!
//! Lookups walk the faces in most-recently-used order: a streaming caller
//! tends to keep hitting the face it just used, so the common case
//! succeeds on the first page tried and the full six-page scan only runs
//! once that face is exhausted.

use tracing::{debug, trace};

use crate::error::PackError;
use crate::grid::DEFAULT_ROWS;
use crate::mru::MruOrder;
use crate::page::PackPage;
use crate::rect::PackedRect;
use crate::stats::PageStats;

/// Number of cube faces.
pub const FACE_COUNT: usize = 6;

/// One face of a cube map, in the conventional `+X, -X, +Y, -Y, +Z, -Z` order.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CubeFace {
    /// +X
    PositiveX = 0,
    /// -X
    NegativeX = 1,
    /// +Y
    PositiveY = 2,
    /// -Y
    NegativeY = 3,
    /// +Z
    PositiveZ = 4,
    /// -Z
    NegativeZ = 5,
}

impl CubeFace {
    /// All faces in index order.
    pub const ALL: [Self; FACE_COUNT] = [
        Self::PositiveX,
        Self::NegativeX,
        Self::PositiveY,
        Self::NegativeY,
        Self::PositiveZ,
        Self::NegativeZ,
    ];

    /// Face index in `0..6`.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for CubeFace {
    type Error = PackError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(index))
            .copied()
            .ok_or(PackError::InvalidFace(index))
    }
}

/// A rect reserved on a specific cube face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CubeSlot {
    /// Face the rect lives on.
    pub face: CubeFace,
    /// Pixel-space rect on that face.
    pub rect: PackedRect,
}

/// Six square [`PackPage`]s searched in most-recently-used order.
///
/// Each instance owns its own MRU order.
#[derive(Clone, Debug)]
pub struct CubePages<const ROWS: usize = DEFAULT_ROWS> {
    faces: [PackPage<ROWS>; FACE_COUNT],
    mru: MruOrder<FACE_COUNT>,
}

impl<const ROWS: usize> CubePages<ROWS> {
    /// Creates six empty `side x side` pages.
    #[must_use]
    pub fn new(side: u16) -> Self {
        Self {
            faces: std::array::from_fn(|_| PackPage::new(side, side)),
            mru: MruOrder::new(),
        }
    }

    /// Empties every face for a `side x side` canvas and restores the
    /// identity search order.
    pub fn reset(&mut self, side: u16) {
        for face in &mut self.faces {
            face.reset(side, side);
        }
        self.mru.reset();
        debug!(side, "cube pages reset");
    }

    /// Finds and reserves a `width x height` region on the first face, in
    /// MRU order, that has room.
    ///
    /// The face that satisfied the request moves to the front of the
    /// search order. Returns `None` if no face fits the request; nothing
    /// changes in that case.
    pub fn find(&mut self, width: u16, height: u16) -> Option<CubeSlot> {
        let order = *self.mru.as_slice();
        for (tried, &index) in order.iter().enumerate() {
            if let Some(rect) = self.faces[usize::from(index)].find(width, height) {
                self.mru.touch(index);
                let face = CubeFace::ALL[usize::from(index)];
                trace!(?face, tried = tried + 1, "cube slot packed");
                return Some(CubeSlot { face, rect });
            }
        }

        None
    }

    /// Returns a slot's rect to its face and moves that face to the front
    /// of the search order.
    ///
    /// Clearing on the wrong face or twice is a caller error (debug assertion).
    pub fn clear(&mut self, slot: CubeSlot) {
        self.faces[usize::from(slot.face.index())].clear(slot.rect);
        self.mru.touch(slot.face.index());
    }

    /// Face indices in current search order.
    #[inline]
    #[must_use]
    pub const fn mru_order(&self) -> &[u8; FACE_COUNT] {
        self.mru.as_slice()
    }

    /// Read-only access to one face's page.
    #[inline]
    #[must_use]
    pub fn face(&self, face: CubeFace) -> &PackPage<ROWS> {
        &self.faces[usize::from(face.index())]
    }

    /// Combined occupancy of all faces.
    #[must_use]
    pub fn stats(&self) -> PageStats {
        self.faces
            .iter()
            .map(PackPage::stats)
            .fold(PageStats::default(), |total, face| total + face)
    }

    /// Returns true if no face holds an allocation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.iter().all(PackPage::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_index_roundtrip() {
        for face in CubeFace::ALL {
            assert_eq!(CubeFace::try_from(face.index()), Ok(face));
        }
        assert_eq!(CubeFace::try_from(6), Err(PackError::InvalidFace(6)));
    }

    #[test]
    fn test_find_prefers_front_face() {
        let mut cube: CubePages<64> = CubePages::new(64);
        let slot = cube.find(8, 8).unwrap();
        assert_eq!(slot.face, CubeFace::PositiveX);
        assert_eq!(slot.rect, PackedRect::new(0, 0, 8, 8));
        assert_eq!(cube.mru_order(), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_full_face_falls_through_in_mru_order() {
        let mut cube: CubePages<64> = CubePages::new(64);
        cube.find(64, 64).unwrap();

        let slot = cube.find(32, 32).unwrap();
        assert_eq!(slot.face, CubeFace::NegativeX);
        assert_eq!(cube.mru_order(), &[1, 0, 2, 3, 4, 5]);
    }

    #[test]
    fn test_clear_moves_face_to_front() {
        let mut cube: CubePages<64> = CubePages::new(64);
        let slots: Vec<_> = (0..6).map(|_| cube.find(64, 64).unwrap()).collect();
        assert_eq!(cube.mru_order(), &[5, 4, 3, 2, 1, 0]);
        assert!(cube.find(1, 1).is_none());

        cube.clear(slots[2]);
        assert_eq!(cube.mru_order(), &[2, 5, 4, 3, 1, 0]);
        assert_eq!(cube.find(1, 1).unwrap().face, CubeFace::PositiveY);
    }

    #[test]
    fn test_failed_find_keeps_order() {
        let mut cube: CubePages<64> = CubePages::new(64);
        cube.find(8, 8).unwrap();
        cube.clear(CubeSlot { face: CubeFace::PositiveX, rect: PackedRect::new(0, 0, 8, 8) });
        let before = *cube.mru_order();
        assert!(cube.find(65, 1).is_none());
        assert_eq!(cube.mru_order(), &before);
        assert!(cube.is_empty());
    }

    #[test]
    fn test_reset() {
        let mut cube: CubePages<64> = CubePages::new(64);
        cube.find(64, 64).unwrap();
        cube.find(64, 64).unwrap();
        cube.reset(128);
        assert!(cube.is_empty());
        assert_eq!(cube.mru_order(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(cube.face(CubeFace::NegativeZ).grid().block_width(), 2);
        assert_eq!(cube.stats().total_blocks, 6 * 64 * 64);
    }
}
