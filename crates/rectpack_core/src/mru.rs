//! Move-to-front ordering of a small, fixed set of indices.

/// A most-recently-used permutation of `0..N`.
///
/// Always a permutation: [`touch`](Self::touch) moves one entry to the
/// front and shifts the ones before it back by one, keeping their
/// relative order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MruOrder<const N: usize> {
    order: [u8; N],
}

impl<const N: usize> MruOrder<N> {
    const N_FITS_U8: () = assert!(N <= u8::MAX as usize, "MruOrder holds u8 indices");

    /// Creates the identity order `[0, 1, .., N - 1]`.
    #[must_use]
    pub fn new() -> Self {
        let () = Self::N_FITS_U8;

        let mut order = [0u8; N];
        for (slot, index) in order.iter_mut().zip(0u8..) {
            *slot = index;
        }
        Self { order }
    }

    /// Restores the identity order.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Indices, most recently used first.
    #[inline]
    #[must_use]
    pub const fn as_slice(&self) -> &[u8; N] {
        &self.order
    }

    /// Iterates indices from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.order.iter().copied()
    }

    /// Moves `index` to the front.
    ///
    /// Indices outside `0..N` are ignored.
    pub fn touch(&mut self, index: u8) {
        if let Some(pos) = self.order.iter().position(|&entry| entry == index) {
            self.order[..=pos].rotate_right(1);
        }
    }
}

impl<const N: usize> Default for MruOrder<N> {
    fn default() -> Self {
        Self::new()
    }
}
