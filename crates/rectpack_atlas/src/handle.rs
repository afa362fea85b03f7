//! # Atlas Handles
//!
//! Handles are lightweight identifiers consisting of:
//! - A slot index into the atlas's handle pool
//! - A generation counter for detecting stale references
//!
//! Releasing a slot bumps its generation, so a handle that outlived its
//! allocation (double free, use after free) no longer matches and is
//! rejected instead of clearing blocks someone else now owns.

/// Checked reference to an atlas allocation.
///
/// The ID is split into two parts:
/// - Lower 32 bits: slot index
/// - Upper 32 bits: generation counter
///
/// A slot has to be reused 2^32 times before a generation repeats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct AtlasHandle(u64);

impl AtlasHandle {
    /// Creates a handle from slot index and generation.
    #[inline]
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self(((generation as u64) << 32) | (index as u64))
    }

    /// Returns the slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0 as u32
    }

    /// Returns the generation.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Raw 64-bit value, e.g. for storing in GPU instance data.
    #[inline]
    #[must_use]
    pub const fn to_bits(self) -> u64 {
        self.0
    }

    /// Rebuilds a handle from [`to_bits`](Self::to_bits).
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// Null/invalid handle.
    pub const NULL: Self = Self(u64::MAX);

    /// Checks if this handle is null.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == u64::MAX
    }
}

impl Default for AtlasHandle {
    fn default() -> Self {
        Self::NULL
    }
}
