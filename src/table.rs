//! Branch tables, index slots and stored entries.
//!
//! A branch table is one trie node: 256 slots, one per possible key byte at
//! its depth. Slots refer into the entry and table arenas by index because
//! both arenas move their contents when they grow.

/// Number of slots in a branch table (one per byte value).
pub(crate) const TABLE_WIDTH: usize = 256;

/// Index of the root table. Allocated at construction and never removed.
pub(crate) const ROOT_TABLE: usize = 0;

/// Largest length either arena may reach; slot payloads are 32-bit.
pub const MAX_ARENA_LEN: usize = u32::MAX as usize;

/// One slot of a branch table.
///
/// Transitions: `Unused -> Value -> Freed -> Value -> ...` while an entry
/// index is recycled, and `Value -> Subtable` when a collision expands the
/// slot. `Subtable` is permanent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum IndexSlot {
    /// Never written.
    #[default]
    Unused,
    /// Held a value that was removed; the entry index is kept for reuse.
    Freed(u32),
    /// Refers to an entry; its key may still differ from the probed key.
    Value(u32),
    /// Refers to a deeper table.
    Subtable(u32),
}

/// Convert an arena position into a slot payload.
///
/// Panics once an arena outgrows the 32-bit index space.
#[inline]
pub(crate) fn slot_index(index: usize) -> u32 {
    assert!(
        index < MAX_ARENA_LEN,
        "trie arena index {index} exceeds the 32-bit slot range"
    );
    index as u32
}

/// A 256-way trie node.
#[derive(Clone, Debug)]
pub(crate) struct BranchTable {
    slots: [IndexSlot; TABLE_WIDTH],
    /// Number of direct `Value` children. Subtables are not counted.
    live_count: u64,
}

impl BranchTable {
    pub(crate) fn new() -> Self {
        Self {
            slots: [IndexSlot::Unused; TABLE_WIDTH],
            live_count: 0,
        }
    }

    #[inline]
    pub(crate) fn slot(&self, byte: u8) -> IndexSlot {
        self.slots[byte as usize]
    }

    #[inline]
    pub(crate) fn set_slot(&mut self, byte: u8, slot: IndexSlot) {
        self.slots[byte as usize] = slot;
    }

    #[inline]
    pub(crate) fn live_count(&self) -> u64 {
        self.live_count
    }

    #[inline]
    pub(crate) fn add_live(&mut self) {
        self.live_count += 1;
    }

    #[inline]
    pub(crate) fn drop_live(&mut self) {
        debug_assert!(self.live_count > 0, "live count underflow");
        self.live_count -= 1;
    }

    #[cfg(test)]
    pub(crate) fn slots(&self) -> impl Iterator<Item = (u8, IndexSlot)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(|(byte, slot)| (byte as u8, *slot))
    }
}

impl Default for BranchTable {
    fn default() -> Self {
        Self::new()
    }
}

/// A stored key/value pair.
///
/// `value` is `None` while the entry is dead: its index then sits in exactly
/// one `Freed` slot, waiting to be reused.
#[derive(Clone, Debug)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: Option<V>,
}

impl<K, V> Entry<K, V> {
    #[inline]
    pub(crate) fn live(key: K, value: V) -> Self {
        Self {
            key,
            value: Some(value),
        }
    }

    #[inline]
    pub(crate) fn is_live(&self) -> bool {
        self.value.is_some()
    }
}
