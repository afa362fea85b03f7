//! Pixel-space rectangles handed out by the allocators.

use bytemuck::{Pod, Zeroable};

/// A block-aligned rectangle in canvas pixel space.
///
/// Returned by `find` and handed back to `clear`. The layout is plain data
/// so atlas clients can upload rect tables to the GPU as-is.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct PackedRect {
    /// Left edge in pixels.
    pub x: u16,
    /// Top edge in pixels.
    pub y: u16,
    /// Width in pixels.
    pub width: u16,
    /// Height in pixels.
    pub height: u16,
}

impl PackedRect {
    /// Creates a rect from its pixel origin and size.
    #[inline]
    #[must_use]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// One past the right edge.
    #[inline]
    #[must_use]
    pub const fn right(&self) -> u32 {
        self.x as u32 + self.width as u32
    }

    /// One past the bottom edge.
    #[inline]
    #[must_use]
    pub const fn bottom(&self) -> u32 {
        self.y as u32 + self.height as u32
    }

    /// Area in square pixels.
    #[inline]
    #[must_use]
    pub const fn area(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    /// Returns true if the two rects share at least one pixel.
    #[inline]
    #[must_use]
    pub const fn intersects(&self, other: &Self) -> bool {
        (self.x as u32) < other.right()
            && (other.x as u32) < self.right()
            && (self.y as u32) < other.bottom()
            && (other.y as u32) < self.bottom()
    }

    /// Returns true if `other` lies entirely inside `self`.
    #[inline]
    #[must_use]
    pub const fn contains(&self, other: &Self) -> bool {
        self.x <= other.x
            && self.y <= other.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}
