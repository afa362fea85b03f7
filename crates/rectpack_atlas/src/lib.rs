//! # RECTPACK Atlas
//!
//! In-process clients of the packing engine:
//!
//! - [`SpriteAtlas`]: sprite cache over one page (debug overlay, particles)
//! - [`CubeAtlas`]: cube-map streaming with oldest-first eviction
//! - [`SharedAtlas`]: the lock that makes either usable from worker threads
//!
//! ## Handles
//!
//! The raw engine trusts its callers: clearing a rect twice silently
//! corrupts the free mask. The atlases hand out generation-checked
//! [`AtlasHandle`]s instead, so stale releases fail with
//! [`AtlasError::StaleHandle`] and the page is never touched.
//!
//! ## Example
//!
//! ```rust,ignore
//! use rectpack_atlas::{AtlasConfig, SharedAtlas, SpriteAtlas};
//!
//! let config = AtlasConfig::from_toml_file("config/atlas.toml")?;
//! let sprites = SharedAtlas::new(SpriteAtlas::<256>::new(&config.sprite)?);
//!
//! let handle = sprites.with(|atlas| atlas.create(24, 24))?;
//! let uv = sprites.lock().uv_rect(handle);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod cube_atlas;
pub mod error;
pub mod handle;
pub mod pool;
pub mod shared;
pub mod sprite_atlas;

pub use config::{AtlasConfig, CubeAtlasConfig, SpriteAtlasConfig};
pub use cube_atlas::{CubeAllocation, CubeAtlas};
pub use error::{AtlasError, AtlasResult};
pub use handle::AtlasHandle;
pub use pool::{HandlePool, VacantSlot, MAX_SLOTS};
pub use shared::SharedAtlas;
pub use sprite_atlas::SpriteAtlas;
