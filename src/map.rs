//! The byte trie map.

use std::fmt;
use std::mem;
use std::ops::Index;

use crate::config::TrieConfig;
use crate::key::{ByteKey, Bytewise, KeyEq};
use crate::pool::PooledArray;
use crate::table::{slot_index, BranchTable, Entry, IndexSlot, ROOT_TABLE};

/// Outcome of walking a key down the trie.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Probe {
    /// The key is stored at this entry index.
    Found(usize),
    /// The walk stopped at a terminal slot that does not hold the key.
    Vacant { table: usize, level: usize },
}

/// Snapshot of the map's diagnostic counters.
///
/// Exact values carry no compatibility guarantee; only their relative
/// meaning does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrieStats {
    /// Live entries.
    pub len: usize,
    /// Tables ever allocated, including the root.
    pub table_count: usize,
    /// Tables holding at least one direct value.
    pub occupied_tables: usize,
    /// Entry slots ever allocated, live or freed.
    pub entry_slots: usize,
    /// Reserved capacity of both arenas, in bytes.
    pub allocated_bytes: usize,
    /// Bytes attributed to live entries and occupied tables.
    pub used_bytes: usize,
}

/// A map from fixed-width keys to values, implemented as a 256-way trie that
/// branches on one key byte per level.
///
/// Lookup, insertion and removal cost at most `K::WIDTH` table probes plus
/// one key comparison. Storage is two pooled arrays: one of entries and one
/// of branch tables, with table 0 as the permanent root. A key lives in the
/// shallowest table where its byte path diverges from every other key.
///
/// Tables are never reclaimed: removing keys frees their entry slots for
/// reuse but leaves emptied subtables in place, so memory only grows.
///
/// Keys are compared with the policy `E`, byte-for-byte by default.
///
/// # Example
///
/// ```rust
/// use byte_trie::ByteTrieMap;
///
/// let mut map: ByteTrieMap<u32, &str> = ByteTrieMap::new();
/// map.insert(7, "seven");
/// *map.insert_or_get(8) = "eight";
///
/// assert_eq!(map.get(&7), Some(&"seven"));
/// assert_eq!(map[&8], "eight");
/// assert_eq!(map.remove(&7), Some("seven"));
/// assert_eq!(map.get(&7), None);
/// ```
pub struct ByteTrieMap<K, V, E = Bytewise> {
    pub(crate) entries: PooledArray<Entry<K, V>>,
    pub(crate) tables: PooledArray<BranchTable>,
    key_eq: E,
    len: usize,
}

impl<K: ByteKey, V> ByteTrieMap<K, V> {
    pub fn new() -> Self {
        Self::with_config(TrieConfig::default())
    }

    pub fn with_config(config: TrieConfig) -> Self {
        Self::with_config_and_key_eq(config, Bytewise)
    }
}

impl<K: ByteKey, V, E: KeyEq<K>> ByteTrieMap<K, V, E> {
    /// Create a map that confirms hits with `key_eq` instead of comparing
    /// raw bytes.
    pub fn with_key_eq(key_eq: E) -> Self {
        Self::with_config_and_key_eq(TrieConfig::default(), key_eq)
    }

    /// # Panics
    ///
    /// Panics if `K::WIDTH` is zero.
    pub fn with_config_and_key_eq(config: TrieConfig, key_eq: E) -> Self {
        assert!(K::WIDTH > 0, "ByteTrieMap keys must be at least one byte wide");

        let entries = PooledArray::with_capacity(config.initial_entries, config.entry_growth);
        let mut tables =
            PooledArray::with_capacity(config.initial_tables.max(1), config.table_growth);
        tables.append(BranchTable::new());

        Self {
            entries,
            tables,
            key_eq,
            len: 0,
        }
    }

    // =========================================================================
    // Descent
    // =========================================================================

    fn probe(&self, key: &K) -> Probe {
        let mut table = ROOT_TABLE;
        for level in 0..K::WIDTH {
            match self.tables[table].slot(key.byte_at(level)) {
                IndexSlot::Subtable(next) => table = next as usize,
                IndexSlot::Value(index)
                    if self
                        .key_eq
                        .key_eq(key, &self.entries[index as usize].key) =>
                {
                    debug_assert!(self.entries[index as usize].is_live());
                    return Probe::Found(index as usize);
                }
                _ => return Probe::Vacant { table, level },
            }
        }
        unreachable!("subtable chain deeper than the key width")
    }

    #[inline]
    fn find(&self, key: &K) -> Option<usize> {
        match self.probe(key) {
            Probe::Found(index) => Some(index),
            Probe::Vacant { .. } => None,
        }
    }

    // =========================================================================
    // Allocation
    // =========================================================================

    /// Store `key` starting from the terminal slot reached by a failed probe.
    /// Returns the entry index now holding the key.
    fn occupy(&mut self, mut table: usize, mut level: usize, key: K, value: V) -> usize {
        loop {
            let byte = key.byte_at(level);
            match self.tables[table].slot(byte) {
                IndexSlot::Subtable(next) => {
                    table = next as usize;
                    level += 1;
                }
                IndexSlot::Value(occupant) => {
                    // Collision: push the occupant one level down and retry there.
                    let next_level = level + 1;
                    assert!(
                        next_level < K::WIDTH,
                        "two keys with identical bytes compared unequal; the key equality \
                         policy must agree with ByteKey::byte_at"
                    );
                    let occupant_byte = self.entries[occupant as usize].key.byte_at(next_level);

                    let sub = self.tables.len();
                    let subtable = self.tables.append(BranchTable::new());
                    subtable.set_slot(occupant_byte, IndexSlot::Value(occupant));
                    subtable.add_live();

                    let parent = &mut self.tables[table];
                    parent.set_slot(byte, IndexSlot::Subtable(slot_index(sub)));
                    parent.drop_live();

                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        depth = next_level,
                        parent = table,
                        subtable = sub,
                        occupant,
                        "collision: expanded value slot into subtable"
                    );

                    table = sub;
                    level = next_level;
                }
                IndexSlot::Unused => {
                    let index = self.entries.len();
                    let slot = IndexSlot::Value(slot_index(index));
                    self.entries.append(Entry::live(key, value));
                    self.bind(table, byte, slot);
                    return index;
                }
                IndexSlot::Freed(index) => {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(table, entry = index, "reusing freed entry slot");

                    let entry = &mut self.entries[index as usize];
                    debug_assert!(!entry.is_live(), "freed slot points at a live entry");
                    entry.key = key;
                    entry.value = Some(value);
                    self.bind(table, byte, IndexSlot::Value(index));
                    return index as usize;
                }
            }
        }
    }

    #[inline]
    fn bind(&mut self, table: usize, byte: u8, slot: IndexSlot) {
        let table = &mut self.tables[table];
        table.set_slot(byte, slot);
        table.add_live();
        self.len += 1;
    }

    // =========================================================================
    // Public operations
    // =========================================================================

    /// Look up `key`. Never mutates the map.
    pub fn get(&self, key: &K) -> Option<&V> {
        let index = self.find(key)?;
        self.entries[index].value.as_ref()
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = self.find(key)?;
        self.entries[index].value.as_mut()
    }

    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Value for a key the caller knows is present.
    ///
    /// # Panics
    ///
    /// Panics if `key` is absent. Use [`get`](Self::get) when absence is
    /// possible.
    pub fn get_existing(&self, key: &K) -> &V {
        match self.get(key) {
            Some(value) => value,
            None => panic!("ByteTrieMap::get_existing: key is not present"),
        }
    }

    /// Return the value for `key`, inserting `V::default()` first if absent.
    ///
    /// The returned reference is valid until the next mutation of the map.
    pub fn insert_or_get(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let index = match self.probe(&key) {
            Probe::Found(index) => index,
            Probe::Vacant { table, level } => self.occupy(table, level, key, V::default()),
        };
        self.entries[index].value.get_or_insert_with(V::default)
    }

    /// Insert `value` under `key`, returning the value it replaced.
    ///
    /// An existing entry keeps its stored key; only the value changes.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.probe(&key) {
            Probe::Found(index) => self.entries[index].value.replace(value),
            Probe::Vacant { table, level } => {
                self.occupy(table, level, key, value);
                None
            }
        }
    }

    /// Remove `key`, returning its value. Absent keys are a no-op.
    ///
    /// The slot becomes `Freed` so the next key landing on it reuses the
    /// entry; emptied subtables are not collapsed.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let mut table = ROOT_TABLE;
        for level in 0..K::WIDTH {
            let byte = key.byte_at(level);
            match self.tables[table].slot(byte) {
                IndexSlot::Subtable(next) => table = next as usize,
                IndexSlot::Value(index)
                    if self
                        .key_eq
                        .key_eq(key, &self.entries[index as usize].key) =>
                {
                    let value = self.entries[index as usize].value.take();
                    let t = &mut self.tables[table];
                    t.set_slot(byte, IndexSlot::Freed(index));
                    t.drop_live();
                    self.len -= 1;
                    return value;
                }
                _ => return None,
            }
        }
        None
    }

    /// Reserve room for at least `additional` more entries.
    pub fn reserve(&mut self, additional: usize) {
        self.entries.reserve(additional);
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of live entries; same as [`len`](Self::len).
    #[inline]
    pub fn size(&self) -> usize {
        self.len
    }

    /// Tables allocated so far, including the root. Never decreases.
    #[inline]
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Bytes reserved by both arenas.
    pub fn allocated_bytes(&self) -> usize {
        self.entries.capacity() * mem::size_of::<Entry<K, V>>()
            + self.tables.capacity() * mem::size_of::<BranchTable>()
    }

    /// Bytes attributed to live entries plus tables holding a direct value.
    ///
    /// A table with one live value counts in full, so this overstates real
    /// usage of sparse tables.
    pub fn used_bytes(&self) -> usize {
        self.len * mem::size_of::<Entry<K, V>>()
            + self.occupied_tables() * mem::size_of::<BranchTable>()
    }

    fn occupied_tables(&self) -> usize {
        self.tables.iter().filter(|t| t.live_count() > 0).count()
    }

    /// Number of tables visited before `key` reaches a terminal slot,
    /// counting the table holding that slot. Hits and misses are not
    /// distinguished.
    pub fn probe_depth(&self, key: &K) -> usize {
        let mut table = ROOT_TABLE;
        for level in 0..K::WIDTH {
            match self.tables[table].slot(key.byte_at(level)) {
                IndexSlot::Subtable(next) => table = next as usize,
                _ => return level + 1,
            }
        }
        K::WIDTH
    }

    pub fn stats(&self) -> TrieStats {
        TrieStats {
            len: self.len,
            table_count: self.table_count(),
            occupied_tables: self.occupied_tables(),
            entry_slots: self.entries.len(),
            allocated_bytes: self.allocated_bytes(),
            used_bytes: self.used_bytes(),
        }
    }

    pub fn key_eq(&self) -> &E {
        &self.key_eq
    }
}

impl<K, V, E> ByteTrieMap<K, V, E> {
    /// Iterate over live entries in storage order. The order is unrelated
    /// to key order and changes as slots are reused.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            entries: self.entries.iter(),
            remaining: self.len,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }
}

impl<K: ByteKey, V> Default for ByteTrieMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Deep copy of both arenas; the copy shares no storage with its source.
impl<K: Clone, V: Clone, E: Clone> Clone for ByteTrieMap<K, V, E> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            tables: self.tables.clone(),
            key_eq: self.key_eq.clone(),
            len: self.len,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.entries.clone_from(&source.entries);
        self.tables.clone_from(&source.tables);
        self.key_eq = source.key_eq.clone();
        self.len = source.len;
    }
}

impl<K: fmt::Debug, V: fmt::Debug, E> fmt::Debug for ByteTrieMap<K, V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Panicking lookup, same as [`ByteTrieMap::get_existing`].
impl<K: ByteKey, V, E: KeyEq<K>> Index<&K> for ByteTrieMap<K, V, E> {
    type Output = V;

    fn index(&self, key: &K) -> &V {
        self.get_existing(key)
    }
}

impl<K: ByteKey, V, E: KeyEq<K>> Extend<(K, V)> for ByteTrieMap<K, V, E> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: ByteKey, V> FromIterator<(K, V)> for ByteTrieMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<'a, K, V, E> IntoIterator for &'a ByteTrieMap<K, V, E> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct Iter<'a, K, V> {
    entries: std::slice::Iter<'a, Entry<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        for entry in self.entries.by_ref() {
            if let Some(ref value) = entry.value {
                self.remaining -= 1;
                return Some((&entry.key, value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
