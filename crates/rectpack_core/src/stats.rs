//! Occupancy statistics.

use std::ops::Add;

/// Block occupancy of one page (or the sum of several).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageStats {
    /// Number of blocks on the canvas.
    pub total_blocks: usize,
    /// Number of blocks currently free.
    pub free_blocks: usize,
}

impl PageStats {
    /// Number of blocks currently handed out.
    #[inline]
    #[must_use]
    pub const fn used_blocks(&self) -> usize {
        self.total_blocks - self.free_blocks
    }

    /// Fraction of the canvas in use, 0.0 to 1.0.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn utilization(&self) -> f32 {
        if self.total_blocks > 0 {
            self.used_blocks() as f32 / self.total_blocks as f32
        } else {
            0.0
        }
    }
}

impl Add for PageStats {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            total_blocks: self.total_blocks + rhs.total_blocks,
            free_blocks: self.free_blocks + rhs.free_blocks,
        }
    }
}
