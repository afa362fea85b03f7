//! # Packing Error Types
//!
//! Errors raised by the checked constructors and conversions.
//!
//! Capacity exhaustion is NOT an error: `find` reports it as `None`.

use thiserror::Error;

/// Errors that can occur while configuring a packing page.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackError {
    /// The canvas is too small for the grid: a block would be zero pixels wide or tall.
    #[error("degenerate canvas {width}x{height}: needs at least 64 columns and {rows} rows of pixels")]
    DegenerateCanvas {
        /// Canvas width in pixels.
        width: u32,
        /// Canvas height in pixels.
        height: u32,
        /// Number of grid rows the page was built with.
        rows: usize,
    },

    /// The canvas does not fit the 16-bit coordinate space of a packed rect.
    #[error("canvas {width}x{height} exceeds the 16-bit coordinate range")]
    CanvasTooLarge {
        /// Canvas width in pixels.
        width: u32,
        /// Canvas height in pixels.
        height: u32,
    },

    /// A face index outside `0..6`.
    #[error("invalid cube face index: {0}")]
    InvalidFace(u8),
}

/// Result type for packing configuration.
pub type PackResult<T> = Result<T, PackError>;
