//! Mutex-guarded atlas for use from several worker threads.
//!
//! The allocators themselves are plain data with no internal locking; two
//! threads calling `find`/`clear` on the same instance is a data race. Atlases
//! that are fed from worker threads (debug-draw sprites, particle sprites)
//! go through this wrapper instead. The lock decides which of two competing
//! requests wins a region.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

/// Cloneable, thread-safe handle to an atlas.
#[derive(Debug, Default)]
pub struct SharedAtlas<T> {
    inner: Arc<Mutex<T>>,
}

impl<T> SharedAtlas<T> {
    /// Wraps an atlas.
    #[must_use]
    pub fn new(atlas: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(atlas)),
        }
    }

    /// Locks the atlas for a sequence of calls.
    ///
    /// Keep the guard short-lived: every other user blocks while it is held.
    pub fn lock(&self) -> MutexGuard<'_, T> {
        self.inner.lock()
    }

    /// Runs `f` with exclusive access to the atlas.
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut *guard)
    }

    /// Unwraps the atlas if this is the last handle to it.
    ///
    /// # Errors
    ///
    /// Returns `self` unchanged while other clones are alive.
    pub fn try_unwrap(self) -> Result<T, Self> {
        Arc::try_unwrap(self.inner)
            .map(Mutex::into_inner)
            .map_err(|inner| Self { inner })
    }
}

impl<T> Clone for SharedAtlas<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpriteAtlasConfig;
    use crate::sprite_atlas::SpriteAtlas;

    #[test]
    fn test_with_and_lock_share_state() {
        let shared = SharedAtlas::new(SpriteAtlas::<256>::new(&SpriteAtlasConfig::default()).unwrap());
        let other = shared.clone();

        let handle = shared.with(|atlas| atlas.create(32, 32)).unwrap();
        assert!(other.lock().get(handle).is_some());
    }

    #[test]
    fn test_try_unwrap() {
        let shared = SharedAtlas::new(5u32);
        let other = shared.clone();
        let shared = shared.try_unwrap().unwrap_err();
        drop(other);
        assert_eq!(shared.try_unwrap().ok(), Some(5));
    }
}
