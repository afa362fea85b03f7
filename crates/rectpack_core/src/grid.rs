//! # Grid Model
//!
//! Every page quantizes its canvas into a fixed grid of blocks:
//! - [`COLUMNS`] (64) column blocks, so one `u64` mask word covers a whole row
//! - `ROWS` row blocks, fixed at compile time per page type
//!
//! ```text
//!   canvas 256 x 256, ROWS = 256  ->  block 4 x 1 px
//!
//!   col   0   1   2        63
//!       +---+---+---+ ... +---+   row 0
//!       +---+---+---+ ... +---+   row 1
//!       ...
//! ```
//!
//! Widening beyond 64 columns would need an array of words per row and a
//! different scan; the constant is part of the contract, not a tuning knob.

use crate::error::{PackError, PackResult};
use crate::rect::PackedRect;

/// Number of column blocks per grid row (bits in one row mask).
pub const COLUMNS: usize = u64::BITS as usize;

/// Default number of row blocks per page.
pub const DEFAULT_ROWS: usize = 256;

/// Derived block geometry of one canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridConfig {
    width: u16,
    height: u16,
    rows: usize,
    block_width: u16,
    block_height: u16,
}

/// Half-open block range covered by a rect, `[col_start, col_end) x [row_start, row_end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockRange {
    /// First column block.
    pub col_start: usize,
    /// One past the last column block.
    pub col_end: usize,
    /// First row block.
    pub row_start: usize,
    /// One past the last row block.
    pub row_end: usize,
}

impl BlockRange {
    /// Bitmask of the covered columns, as stored in a row mask.
    #[inline]
    #[must_use]
    pub const fn column_mask(&self) -> u64 {
        span_mask(self.col_end - self.col_start) << self.col_start
    }
}

/// Mask of `count` contiguous low bits (all ones for 64).
#[inline]
#[must_use]
pub const fn span_mask(count: usize) -> u64 {
    if count >= COLUMNS {
        u64::MAX
    } else {
        (1u64 << count) - 1
    }
}

/// Pixel values derived from a validated grid always fit 16 bits.
#[inline]
#[allow(clippy::cast_possible_truncation)]
const fn narrow(value: usize) -> u16 {
    value as u16
}

impl GridConfig {
    /// Validates a canvas and derives its block geometry.
    ///
    /// # Errors
    ///
    /// - [`PackError::CanvasTooLarge`] if either side exceeds `u16::MAX`
    /// - [`PackError::DegenerateCanvas`] if a block would be zero pixels on either axis
    pub fn new(width: u32, height: u32, rows: usize) -> PackResult<Self> {
        let (Ok(w), Ok(h)) = (u16::try_from(width), u16::try_from(height)) else {
            return Err(PackError::CanvasTooLarge { width, height });
        };

        if rows == 0 || usize::from(w) < COLUMNS || usize::from(h) < rows {
            return Err(PackError::DegenerateCanvas { width, height, rows });
        }

        Ok(Self::quantize(w, h, rows))
    }

    /// Derives block geometry without validation.
    ///
    /// Degenerate canvases trip a debug assertion. In release builds the
    /// block size is clamped to one pixel so the scan never divides by zero;
    /// packing results for such a canvas are meaningless.
    #[must_use]
    pub fn quantize(width: u16, height: u16, rows: usize) -> Self {
        debug_assert!(rows > 0, "grid needs at least one row");
        debug_assert!(
            usize::from(width) >= COLUMNS && usize::from(height) >= rows,
            "degenerate canvas {width}x{height} for {COLUMNS}x{rows} grid"
        );

        let block_width = usize::from(width) / COLUMNS;
        let block_height = usize::from(height).checked_div(rows).unwrap_or(0);

        Self {
            width,
            height,
            rows,
            block_width: narrow(block_width.max(1)),
            block_height: narrow(block_height.max(1)),
        }
    }

    /// Canvas width in pixels.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Canvas height in pixels.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Number of row blocks.
    #[inline]
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Width of one block in pixels.
    #[inline]
    #[must_use]
    pub const fn block_width(&self) -> u16 {
        self.block_width
    }

    /// Height of one block in pixels.
    #[inline]
    #[must_use]
    pub const fn block_height(&self) -> u16 {
        self.block_height
    }

    /// Total number of blocks on the canvas.
    #[inline]
    #[must_use]
    pub const fn total_blocks(&self) -> usize {
        COLUMNS * self.rows
    }

    /// Column blocks needed to cover `px` pixels (rounded up).
    #[inline]
    #[must_use]
    pub fn columns_for(&self, px: u16) -> usize {
        usize::from(px).div_ceil(usize::from(self.block_width))
    }

    /// Row blocks needed to cover `px` pixels (rounded up).
    #[inline]
    #[must_use]
    pub fn rows_for(&self, px: u16) -> usize {
        usize::from(px).div_ceil(usize::from(self.block_height))
    }

    /// Converts a block-space placement to pixel space.
    #[inline]
    #[must_use]
    pub fn to_pixels(&self, col: usize, row: usize, cols: usize, rows: usize) -> PackedRect {
        let bw = usize::from(self.block_width);
        let bh = usize::from(self.block_height);

        PackedRect::new(
            narrow(col * bw),
            narrow(row * bh),
            narrow(cols * bw),
            narrow(rows * bh),
        )
    }

    /// Block range covered by a pixel-space rect.
    ///
    /// The start is quantized down and clamped into the grid; the extent is
    /// rounded up and clamped to the grid edge.
    #[must_use]
    pub fn block_range(&self, rect: &PackedRect) -> BlockRange {
        let col_start = (usize::from(rect.x) / usize::from(self.block_width)).min(COLUMNS - 1);
        let row_start = (usize::from(rect.y) / usize::from(self.block_height)).min(self.rows - 1);
        let col_end = (col_start + self.columns_for(rect.width)).min(COLUMNS);
        let row_end = (row_start + self.rows_for(rect.height)).min(self.rows);

        BlockRange {
            col_start,
            col_end,
            row_start,
            row_end,
        }
    }
}
