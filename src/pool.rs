//! Growable pooled storage addressed by index.
//!
//! A [`PooledArray`] keeps a logical length separate from its reserved
//! capacity and grows in chunks. Growing may move every element, so the trie
//! refers into pools by index only and never keeps a reference across an
//! append.

use std::ops::{Index, IndexMut};

/// Growth increment used when none is configured.
pub const DEFAULT_GROWTH: usize = 16;

/// A growable, indexable array with chunked growth and deep-copy semantics.
///
/// Capacity never decreases. When an append finds the pool full it reserves
/// `max(growth, len)` more slots, so small pools grow by the configured
/// increment and large pools roughly double.
pub struct PooledArray<T> {
    items: Vec<T>,
    growth: usize,
}

impl<T> PooledArray<T> {
    /// Create an empty pool. A zero `growth` is treated as 1.
    pub fn new(growth: usize) -> Self {
        Self {
            items: Vec::new(),
            growth: growth.max(1),
        }
    }

    /// Create an empty pool with at least `capacity` slots reserved.
    pub fn with_capacity(capacity: usize, growth: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            growth: growth.max(1),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of slots reserved, including unused ones.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    #[inline]
    pub fn growth(&self) -> usize {
        self.growth
    }

    /// Append `value` and return a writable reference to it.
    ///
    /// The reference is invalidated by the next append: hold on to
    /// `len() - 1` instead if the element must be found again.
    pub fn append(&mut self, value: T) -> &mut T {
        if self.items.len() == self.items.capacity() {
            self.grow();
        }
        self.items.push(value);
        let last = self.items.len() - 1;
        &mut self.items[last]
    }

    /// Ensure room for at least `additional` more elements without a further
    /// reallocation.
    pub fn reserve(&mut self, additional: usize) {
        self.items.reserve_exact(additional);
    }

    /// Set the logical length to `new_len`, filling new slots with clones of
    /// `value`. Shrinking drops trailing elements but keeps the capacity.
    pub fn resize(&mut self, new_len: usize, value: T)
    where
        T: Clone,
    {
        if new_len > self.items.capacity() {
            self.items.reserve_exact(new_len - self.items.len());
        }
        self.items.resize(new_len, value);
    }

    /// Like [`resize`](Self::resize), producing new elements with `f`.
    pub fn resize_with(&mut self, new_len: usize, f: impl FnMut() -> T) {
        if new_len > self.items.capacity() {
            self.items.reserve_exact(new_len - self.items.len());
        }
        self.items.resize_with(new_len, f);
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    #[inline]
    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    #[inline]
    pub fn first_mut(&mut self) -> Option<&mut T> {
        self.items.first_mut()
    }

    #[inline]
    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    #[inline]
    pub fn last_mut(&mut self) -> Option<&mut T> {
        self.items.last_mut()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    fn grow(&mut self) {
        let extra = self.growth.max(self.items.len());
        #[cfg(feature = "tracing")]
        tracing::trace!(
            len = self.items.len(),
            capacity = self.items.capacity(),
            extra,
            "pool: growing"
        );
        self.items.reserve_exact(extra);
    }
}

impl<T> Default for PooledArray<T> {
    fn default() -> Self {
        Self::new(DEFAULT_GROWTH)
    }
}

/// Deep copy. The copy reserves the same capacity as the source so that
/// memory statistics of a copy match its source.
impl<T: Clone> Clone for PooledArray<T> {
    fn clone(&self) -> Self {
        let mut items = Vec::with_capacity(self.items.capacity());
        items.extend(self.items.iter().cloned());
        Self {
            items,
            growth: self.growth,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.items.clear();
        if source.items.capacity() > self.items.capacity() {
            self.items.reserve_exact(source.items.capacity());
        }
        self.items.extend(source.items.iter().cloned());
        self.growth = source.growth;
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for PooledArray<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<T> Index<usize> for PooledArray<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.items[index]
    }
}

impl<T> IndexMut<usize> for PooledArray<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.items[index]
    }
}
