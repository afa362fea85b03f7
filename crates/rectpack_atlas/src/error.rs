//! # Atlas Error Types
//!
//! All errors that can occur in the atlas clients.

use rectpack_core::PackError;
use thiserror::Error;

use crate::handle::AtlasHandle;

/// Errors that can occur in the atlas clients.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AtlasError {
    /// No free region large enough for the request.
    #[error("no room for a {width}x{height} region")]
    OutOfSpace {
        /// Requested width in pixels.
        width: u16,
        /// Requested height in pixels.
        height: u16,
    },

    /// Every handle slot is in use.
    #[error("all {capacity} handle slots are in use")]
    SlotsExhausted {
        /// Number of slots the atlas was built with.
        capacity: usize,
    },

    /// The handle was already released, or belongs to another atlas.
    #[error("stale or foreign handle: {0:?}")]
    StaleHandle(AtlasHandle),

    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    ConfigIo(String),

    /// Canvas rejected by the packing engine.
    #[error(transparent)]
    Pack(#[from] PackError),
}

/// Result type for atlas operations.
pub type AtlasResult<T> = Result<T, AtlasError>;
