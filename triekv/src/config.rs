//! Store configuration.

use byte_trie::{TrieConfig, MAX_ARENA_LEN};

use crate::error::{KvError, Result};

/// Configuration for a [`TrieKV`](crate::TrieKV) store.
///
/// Unlike [`TrieConfig`], which quietly clamps odd values, a store config is
/// checked up front by [`validate`](Self::validate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KvConfig {
    /// Number of keys to reserve room for.
    pub initial_capacity: usize,
    /// Entries added per growth step of the entry arena.
    pub entry_growth: usize,
    /// Tables added per growth step of the table arena.
    pub table_growth: usize,
}

impl KvConfig {
    /// Default reservation.
    pub const DEFAULT_INITIAL_CAPACITY: usize = 1024;

    /// Reject values the trie cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.entry_growth == 0 {
            return Err(KvError::InvalidConfig {
                field: "entry_growth",
                reason: "must be non-zero".into(),
            });
        }
        if self.table_growth == 0 {
            return Err(KvError::InvalidConfig {
                field: "table_growth",
                reason: "must be non-zero".into(),
            });
        }
        if self.initial_capacity >= MAX_ARENA_LEN {
            return Err(KvError::InvalidConfig {
                field: "initial_capacity",
                reason: format!(
                    "{} exceeds the {} entries addressable by the trie",
                    self.initial_capacity,
                    MAX_ARENA_LEN - 1
                ),
            });
        }
        Ok(())
    }

    /// Arena settings for the underlying trie.
    pub fn trie_config(&self) -> TrieConfig {
        TrieConfig::new()
            .with_entry_growth(self.entry_growth)
            .with_table_growth(self.table_growth)
            .with_initial_entries(self.initial_capacity)
    }
}

impl Default for KvConfig {
    fn default() -> Self {
        Self {
            initial_capacity: Self::DEFAULT_INITIAL_CAPACITY,
            entry_growth: TrieConfig::DEFAULT_ENTRY_GROWTH,
            table_growth: TrieConfig::DEFAULT_TABLE_GROWTH,
        }
    }
}
