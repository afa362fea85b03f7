//! # Pack Page
//!
//! First-fit rectangle allocator for one canvas.
//!
//! ## Free Mask
//!
//! The only mutable state is one `u64` per grid row. Bit `i` set means
//! column block `i` of that row is free:
//!
//! ```text
//!   row 0: 1111 ... 1111 0000 0000   <- 8 leftmost blocks in use
//!   row 1: 1111 ... 1111 1111 0000
//!          bit 63          bit 0
//! ```
//!
//! A `w x h` request becomes a `w`-bit scan mask slid along each candidate
//! row; testing a placement is one AND per covered row.
//!
//! ## Thread Safety
//!
//! Not synchronized. Wrap in a mutex when shared across threads.

use tracing::trace;

use crate::error::PackResult;
use crate::grid::{span_mask, GridConfig, COLUMNS, DEFAULT_ROWS};
use crate::rect::PackedRect;
use crate::stats::PageStats;

/// Grid-quantized first-fit allocator for one canvas.
///
/// `ROWS` is the number of row blocks; the column count is always
/// [`COLUMNS`].
///
/// # Example
///
/// ```rust,ignore
/// let mut page: PackPage = PackPage::new(256, 256); // 4 x 1 px blocks
///
/// let rect = page.find(10, 3).expect("empty page");
/// assert_eq!((rect.width, rect.height), (12, 3)); // rounded up to blocks
///
/// page.clear(rect);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackPage<const ROWS: usize = DEFAULT_ROWS> {
    /// Block geometry of the current canvas.
    grid: GridConfig,
    /// One free mask per row, `ROWS` long.
    free: Box<[u64]>,
}

impl<const ROWS: usize> PackPage<ROWS> {
    const ROWS_IN_RANGE: () = assert!(
        ROWS > 0 && ROWS <= u16::MAX as usize,
        "ROWS must be in 1..=65535"
    );

    /// Creates an empty page for a `width x height` canvas.
    ///
    /// The canvas must be at least [`COLUMNS`] pixels wide and `ROWS` pixels
    /// tall; smaller canvases are a caller error (debug assertion).
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        let () = Self::ROWS_IN_RANGE;

        Self {
            grid: GridConfig::quantize(width, height, ROWS),
            free: vec![u64::MAX; ROWS].into_boxed_slice(),
        }
    }

    /// Creates an empty page, rejecting degenerate or oversized canvases.
    ///
    /// # Errors
    ///
    /// Returns the [`GridConfig::new`] error for an unusable canvas.
    pub fn try_new(width: u32, height: u32) -> PackResult<Self> {
        let grid = GridConfig::new(width, height, ROWS)?;
        Ok(Self::new(grid.width(), grid.height()))
    }

    /// Re-quantizes the page for a new canvas and frees every block.
    ///
    /// Prior allocations are abandoned.
    pub fn reset(&mut self, width: u16, height: u16) {
        self.grid = GridConfig::quantize(width, height, ROWS);
        self.free.fill(u64::MAX);
    }

    /// Block geometry of the current canvas.
    #[inline]
    #[must_use]
    pub const fn grid(&self) -> &GridConfig {
        &self.grid
    }

    /// Finds and reserves a free region of at least `width x height` pixels.
    ///
    /// The request is rounded up to whole blocks. The scan is first-fit,
    /// top-to-bottom then left-to-right, so the returned rect is the
    /// lowest-address placement, not the tightest one.
    ///
    /// Returns `None` when nothing fits (including zero-sized requests and
    /// requests larger than the canvas). The page is untouched in that case.
    pub fn find(&mut self, width: u16, height: u16) -> Option<PackedRect> {
        let (cols, rows) = self.quantize_request(width, height)?;
        let (col, row) = self.scan(cols, rows)?;

        let mask = span_mask(cols) << col;
        for word in &mut self.free[row..row + rows] {
            *word &= !mask;
        }

        let rect = self.grid.to_pixels(col, row, cols, rows);
        trace!(?rect, requested_width = width, requested_height = height, "packed");
        Some(rect)
    }

    /// Returns true if a `width x height` request would currently succeed.
    ///
    /// Runs the same scan as [`find`](Self::find) without reserving anything.
    #[must_use]
    pub fn can_fit(&self, width: u16, height: u16) -> bool {
        self.quantize_request(width, height)
            .and_then(|(cols, rows)| self.scan(cols, rows))
            .is_some()
    }

    /// Returns a rect's blocks to the free pool.
    ///
    /// `rect` must be one this page handed out (or a sub-range of one).
    /// Clearing blocks that are already free corrupts the accounting of
    /// any neighbour still holding them; debug builds assert against it.
    pub fn clear(&mut self, rect: PackedRect) {
        let range = self.grid.block_range(&rect);
        let mask = range.column_mask();
        let rows = &mut self.free[range.row_start..range.row_end];

        debug_assert!(
            rows.iter().all(|word| word & mask == 0),
            "clearing {rect:?}, which is not fully allocated"
        );

        for word in rows {
            *word |= mask;
        }
        trace!(?rect, "cleared");
    }

    /// Free mask of one row, bit `i` set when column block `i` is free.
    #[inline]
    #[must_use]
    pub fn row_mask(&self, row: usize) -> Option<u64> {
        self.free.get(row).copied()
    }

    /// Number of free blocks.
    #[must_use]
    pub fn free_blocks(&self) -> usize {
        self.free.iter().map(|word| word.count_ones() as usize).sum()
    }

    /// Number of allocated blocks.
    #[must_use]
    pub fn used_blocks(&self) -> usize {
        self.grid.total_blocks() - self.free_blocks()
    }

    /// Returns true if no block is allocated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.free.iter().all(|&word| word == u64::MAX)
    }

    /// Occupancy snapshot.
    #[must_use]
    pub fn stats(&self) -> PageStats {
        PageStats {
            total_blocks: self.grid.total_blocks(),
            free_blocks: self.free_blocks(),
        }
    }

    /// Converts a pixel request to block counts, rejecting what can never fit.
    #[inline]
    fn quantize_request(&self, width: u16, height: u16) -> Option<(usize, usize)> {
        if width == 0 || height == 0 {
            return None;
        }

        let cols = self.grid.columns_for(width);
        let rows = self.grid.rows_for(height);
        (cols <= COLUMNS && rows <= ROWS).then_some((cols, rows))
    }

    /// First-fit search for a free `cols x rows` block region.
    ///
    /// Returns the `(column, row)` of its top-left block.
    fn scan(&self, cols: usize, rows: usize) -> Option<(usize, usize)> {
        let scan = span_mask(cols);
        let last_col = COLUMNS - cols;

        for start_row in 0..=ROWS - rows {
            let first = self.free[start_row];

            // Low zero bits are used blocks at the left edge; no fit starts there.
            let skip = first.trailing_zeros() as usize;
            if skip > last_col {
                continue;
            }

            let below = &self.free[start_row + 1..start_row + rows];
            for col in skip..=last_col {
                let mask = scan << col;
                if first & mask == mask && below.iter().all(|&word| word & mask == mask) {
                    return Some((col, start_row));
                }
            }
        }

        None
    }
}
