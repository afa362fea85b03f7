//! # RECTPACK Core
//!
//! Grid-quantized, bitmask-accelerated 2D rectangle packing, designed for:
//! - Per-frame sprite and texture-streaming allocations
//! - Bounded search cost (one AND per covered row per candidate)
//! - Exact reclamation with zero bookkeeping beyond a free mask
//!
//! ## Architecture
//!
//! ```text
//!   GridConfig      canvas -> 64 x ROWS blocks
//!        │
//!   PackPage        one canvas, one u64 free mask per row, first-fit
//!        │
//!   CubePages       six PackPages + move-to-front face order
//! ```
//!
//! The allocators know nothing about textures: they hand out rects and
//! take them back. Running out of room is a normal outcome (`None`), not
//! an error.
//!
//! ## Example
//!
//! ```rust,ignore
//! use rectpack_core::{CubePages, PackPage};
//!
//! let mut page: PackPage = PackPage::new(1024, 1024);
//! if let Some(rect) = page.find(40, 24) {
//!     // upload pixels into rect ...
//!     page.clear(rect);
//! }
//!
//! let mut cube: CubePages = CubePages::new(1024);
//! let slot = cube.find(128, 128);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod cube;
pub mod error;
pub mod grid;
pub mod mru;
pub mod page;
pub mod rect;
pub mod stats;

pub use cube::{CubeFace, CubePages, CubeSlot, FACE_COUNT};
pub use error::{PackError, PackResult};
pub use grid::{GridConfig, COLUMNS, DEFAULT_ROWS};
pub use mru::MruOrder;
pub use page::PackPage;
pub use rect::PackedRect;
pub use stats::PageStats;
