//! # Handle Pool
//!
//! Fixed-capacity slot storage addressed by generation-checked handles.

use crate::handle::AtlasHandle;

/// Largest pool size.
pub const MAX_SLOTS: usize = u16::MAX as usize;

#[derive(Clone, Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// A pool of values addressed by [`AtlasHandle`]s.
///
/// Slots are reused after release, but each release bumps the slot's
/// generation so earlier handles to it stop resolving.
///
/// # Thread Safety
///
/// This pool is NOT thread-safe. Use one pool per thread or wrap in a mutex.
#[derive(Clone, Debug)]
pub struct HandlePool<T> {
    /// The storage array.
    slots: Box<[Slot<T>]>,
    /// Free list - indices of available slots.
    free_list: Vec<u32>,
    /// Number of occupied slots.
    len: usize,
}

impl<T> HandlePool<T> {
    /// Creates a pool with `capacity` slots.
    ///
    /// All memory is pre-allocated upfront.
    ///
    /// # Panics
    ///
    /// If `capacity` is zero or larger than [`MAX_SLOTS`].
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(
            capacity > 0 && capacity <= MAX_SLOTS,
            "capacity must be in 1..={MAX_SLOTS}"
        );

        let slots: Vec<Slot<T>> = (0..capacity)
            .map(|_| Slot { generation: 0, value: None })
            .collect();

        Self {
            slots: slots.into_boxed_slice(),
            free_list: Self::full_free_list(capacity),
            len: 0,
        }
    }

    /// Returns the total capacity.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of occupied slots.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no slot is occupied.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if every slot is occupied.
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.free_list.is_empty()
    }

    /// Stores a value, returning its handle, or `None` if the pool is full.
    pub fn insert(&mut self, value: T) -> Option<AtlasHandle> {
        self.vacant_slot().map(|vacant| vacant.insert(value))
    }

    /// Claims the next free slot without filling it yet.
    ///
    /// Returns `None` if the pool is full. Dropping the [`VacantSlot`]
    /// leaves the pool unchanged.
    pub fn vacant_slot(&mut self) -> Option<VacantSlot<'_, T>> {
        let index = *self.free_list.last()?;
        Some(VacantSlot { pool: self, index })
    }

    /// Removes the value a handle refers to.
    ///
    /// Returns `None` for stale, foreign, or null handles.
    pub fn remove(&mut self, handle: AtlasHandle) -> Option<T> {
        let slot = self.live_slot_mut(handle)?;
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);

        self.free_list.push(handle.index());
        self.len -= 1;
        Some(value)
    }

    /// Gets the value a handle refers to.
    #[inline]
    #[must_use]
    pub fn get(&self, handle: AtlasHandle) -> Option<&T> {
        let slot = self.slots.get(handle.index() as usize)?;
        if slot.generation == handle.generation() {
            slot.value.as_ref()
        } else {
            None
        }
    }

    /// Returns true if the handle refers to a live value.
    #[inline]
    #[must_use]
    pub fn contains(&self, handle: AtlasHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Removes every value and invalidates all outstanding handles.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            if slot.value.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
        }
        self.free_list = Self::full_free_list(self.slots.len());
        self.len = 0;
    }

    /// Iterates over all live values.
    pub fn iter(&self) -> impl Iterator<Item = (AtlasHandle, &T)> {
        self.slots.iter().zip(0u32..).filter_map(|(slot, index)| {
            slot.value
                .as_ref()
                .map(|value| (AtlasHandle::new(index, slot.generation), value))
        })
    }

    fn live_slot_mut(&mut self, handle: AtlasHandle) -> Option<&mut Slot<T>> {
        self.slots
            .get_mut(handle.index() as usize)
            .filter(|slot| slot.generation == handle.generation())
    }

    /// Indices in pop order: slot 0 is handed out first.
    #[allow(clippy::cast_possible_truncation)]
    fn full_free_list(capacity: usize) -> Vec<u32> {
        (0..capacity).rev().map(|index| index as u32).collect()
    }
}

/// A free slot claimed by [`HandlePool::vacant_slot`].
///
/// Filling it cannot fail, so a caller can check for room in the pool
/// before reserving anything else and then commit without a failure path.
#[derive(Debug)]
pub struct VacantSlot<'a, T> {
    pool: &'a mut HandlePool<T>,
    index: u32,
}

impl<T> VacantSlot<'_, T> {
    /// Fills the slot and returns its handle.
    pub fn insert(self, value: T) -> AtlasHandle {
        let pool = self.pool;
        pool.free_list.truncate(pool.free_list.len() - 1);

        let slot = &mut pool.slots[self.index as usize];
        slot.value = Some(value);
        pool.len += 1;

        AtlasHandle::new(self.index, slot.generation)
    }
}
