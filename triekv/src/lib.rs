//! # TrieKV - Thread-Safe Store over a Byte Trie
//!
//! A shared key-value store built on [`ByteTrieMap`]. Lookups cost a bounded
//! number of table probes regardless of how many keys are stored.
//!
//! ## Keys
//!
//! Any [`ByteKey`] works directly: integers, `char`, byte arrays. Strings and
//! other variable-length data go through [`DigestKey`], which stores the
//! 64-bit FNV-1a digest of the content. Digest keys trade exactness for a
//! fixed width: two contents with the same digest share one value.
//!
//! ## Example
//!
//! ```rust
//! use triekv::{DigestKey, TrieKV};
//!
//! let kv: TrieKV<DigestKey, u64> = TrieKV::new();
//! kv.insert("user:1001".into(), 42);
//! kv.insert("user:1002".into(), 43);
//!
//! assert_eq!(kv.get(&"user:1001".into()), Some(42));
//! assert_eq!(kv.len(), 2);
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod digest;
pub mod error;
pub mod keys;

pub use byte_trie::{ByteKey, ByteTrieMap, TrieStats};
pub use config::KvConfig;
pub use digest::Fnv1a64;
pub use error::{KvError, Result};
pub use keys::DigestKey;

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;

/// Memory usage statistics for the store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStats {
    /// Number of keys stored
    pub num_keys: usize,
    /// Branch tables allocated by the trie
    pub table_count: usize,
    /// Bytes reserved by the trie arenas
    pub allocated_bytes: usize,
    /// Bytes attributed to live entries and occupied tables
    pub used_bytes: usize,
    /// Reserved bytes per key (calculated)
    pub bytes_per_key: f64,
}

/// A key-value store safe to share between threads.
///
/// Reads take a shared lock and run concurrently; writes are serialized.
/// Values are returned by clone so no reference outlives the lock.
pub struct TrieKV<K, V> {
    inner: RwLock<ByteTrieMap<K, V>>,
    /// Number of entries, readable without locking.
    len: AtomicUsize,
    config: KvConfig,
}

impl<K, V> TrieKV<K, V>
where
    K: ByteKey,
    V: Clone,
{
    /// Create an empty store with the default configuration.
    pub fn new() -> Self {
        Self::build(KvConfig::default())
    }

    /// Create an empty store after checking `config`.
    pub fn with_config(config: KvConfig) -> Result<Self> {
        if let Err(err) = config.validate() {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %err, "triekv: rejected config");
            return Err(err);
        }
        Ok(Self::build(config))
    }

    fn build(config: KvConfig) -> Self {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            initial_capacity = config.initial_capacity,
            entry_growth = config.entry_growth,
            table_growth = config.table_growth,
            "triekv: store created"
        );
        Self {
            inner: RwLock::new(ByteTrieMap::with_config(config.trie_config())),
            len: AtomicUsize::new(0),
            config,
        }
    }

    /// Insert a key-value pair into the store.
    ///
    /// Returns the previous value if the key already existed.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        let mut inner = self.inner.write();
        let old = inner.insert(key, value);
        if old.is_none() {
            self.len.fetch_add(1, Ordering::Relaxed);
        }
        old
    }

    /// Get a copy of the value for a key.
    pub fn get(&self, key: &K) -> Option<V> {
        let inner = self.inner.read();
        inner.get(key).cloned()
    }

    /// Like [`get`](Self::get), but absence is an error.
    pub fn get_existing(&self, key: &K) -> Result<V> {
        self.get(key).ok_or(KvError::KeyNotFound)
    }

    /// Check if a key exists in the store.
    pub fn contains(&self, key: &K) -> bool {
        let inner = self.inner.read();
        inner.contains_key(key)
    }

    /// Remove a key from the store.
    ///
    /// Returns the value if the key existed.
    pub fn remove(&self, key: &K) -> Option<V> {
        let mut inner = self.inner.write();
        let old = inner.remove(key);
        if old.is_some() {
            self.len.fetch_sub(1, Ordering::Relaxed);
        }
        old
    }

    /// Apply `f` to the value for `key`, inserting `V::default()` first if
    /// the key is absent. Runs under the write lock.
    pub fn update<R>(&self, key: K, f: impl FnOnce(&mut V) -> R) -> R
    where
        V: Default,
    {
        let mut inner = self.inner.write();
        // `len` must account for the new entry before `f` runs; `f` may panic.
        if !inner.contains_key(&key) {
            self.len.fetch_add(1, Ordering::Relaxed);
        }
        f(inner.insert_or_get(key))
    }

    /// Get the number of keys in the store.
    pub fn len(&self) -> usize {
        self.len.load(Ordering::Relaxed)
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get memory usage statistics.
    pub fn memory_usage(&self) -> MemoryStats {
        let stats = self.inner.read().stats();
        MemoryStats {
            num_keys: stats.len,
            table_count: stats.table_count,
            allocated_bytes: stats.allocated_bytes,
            used_bytes: stats.used_bytes,
            bytes_per_key: if stats.len > 0 {
                stats.allocated_bytes as f64 / stats.len as f64
            } else {
                0.0
            },
        }
    }

    /// Deep copy of the current contents, detached from the store.
    pub fn snapshot(&self) -> ByteTrieMap<K, V>
    where
        K: Clone,
    {
        self.inner.read().clone()
    }

    /// The configuration this store was built with.
    pub fn config(&self) -> &KvConfig {
        &self.config
    }
}

impl<K: ByteKey, V: Clone> Default for TrieKV<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
