//! Arena sizing for [`ByteTrieMap`](crate::ByteTrieMap).

/// Growth and reservation parameters for the two backing arenas.
///
/// All values are hints for memory behavior only; they never change what
/// the map stores.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrieConfig {
    /// Entries added to the entry arena when it is full (at least; large
    /// arenas double instead). Zero is treated as 1.
    pub entry_growth: usize,

    /// Tables added to the table arena when it is full. Zero is treated as 1.
    pub table_growth: usize,

    /// Entry slots reserved up front.
    pub initial_entries: usize,

    /// Table slots reserved up front. The root table always exists, so
    /// values below 1 still reserve one.
    pub initial_tables: usize,
}

impl TrieConfig {
    /// One table's worth of entries.
    pub const DEFAULT_ENTRY_GROWTH: usize = 256;

    pub const DEFAULT_TABLE_GROWTH: usize = 16;

    pub fn new() -> Self {
        Self {
            entry_growth: Self::DEFAULT_ENTRY_GROWTH,
            table_growth: Self::DEFAULT_TABLE_GROWTH,
            initial_entries: 0,
            initial_tables: 1,
        }
    }

    pub fn with_entry_growth(mut self, growth: usize) -> Self {
        self.entry_growth = growth;
        self
    }

    pub fn with_table_growth(mut self, growth: usize) -> Self {
        self.table_growth = growth;
        self
    }

    /// Reserve room for `entries` keys before the first insertion.
    pub fn with_initial_entries(mut self, entries: usize) -> Self {
        self.initial_entries = entries;
        self
    }

    pub fn with_initial_tables(mut self, tables: usize) -> Self {
        self.initial_tables = tables;
        self
    }
}

impl Default for TrieConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrieConfig::default();
        assert_eq!(config.entry_growth, 256);
        assert_eq!(config.table_growth, 16);
        assert_eq!(config.initial_entries, 0);
        assert_eq!(config.initial_tables, 1);
    }

    #[test]
    fn test_builder() {
        let config = TrieConfig::new()
            .with_entry_growth(8)
            .with_table_growth(2)
            .with_initial_entries(100)
            .with_initial_tables(4);
        assert_eq!(
            config,
            TrieConfig {
                entry_growth: 8,
                table_growth: 2,
                initial_entries: 100,
                initial_tables: 4,
            }
        );
    }
}
