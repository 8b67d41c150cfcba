//! # byte-trie
//!
//! An associative container for fixed-width keys, built as a 256-way trie
//! that branches on one key byte per level.
//!
//! Every operation is bounded by the key width rather than the number of
//! stored entries: a `u32` key is found in at most four table probes and one
//! key comparison, whatever the map holds. Entries and branch tables live in
//! two pooled arenas and refer to each other by index.
//!
//! ## Example
//!
//! ```rust
//! use byte_trie::ByteTrieMap;
//!
//! let mut counts: ByteTrieMap<u64, u32> = ByteTrieMap::new();
//! for id in [3u64, 7, 3, 3] {
//!     *counts.insert_or_get(id) += 1;
//! }
//!
//! assert_eq!(counts.get(&3), Some(&3));
//! assert_eq!(counts.get(&7), Some(&1));
//! assert_eq!(counts.len(), 2);
//! ```
//!
//! ## Keys
//!
//! Keys implement [`ByteKey`], which exposes a fixed number of bytes. It is
//! implemented for the primitive integers, `char`, `bool` and byte arrays.
//! Hits are confirmed with a [`KeyEq`] policy, byte-for-byte by default.
//!
//! ## Memory
//!
//! Tables are never reclaimed and arenas never shrink. Removed entries leave
//! their slot free for the next key that lands there. See
//! [`ByteTrieMap::stats`] for the counters that describe this.

#![deny(unsafe_op_in_unsafe_fn)]

mod config;
mod key;
mod map;
mod pool;
mod table;

pub use config::TrieConfig;
pub use key::{first_difference, ByteKey, Bytewise, KeyEq};
pub use map::{ByteTrieMap, Iter, TrieStats};
pub use pool::PooledArray;
pub use table::MAX_ARENA_LEN;

#[cfg(test)]
mod proptests;
