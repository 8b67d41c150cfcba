//! Basic usage examples for triekv.

use byte_trie::ByteTrieMap;
use triekv::{DigestKey, TrieKV};

fn main() {
    example_trie_map();
    example_triekv();
}

fn example_trie_map() {
    println!("=== ByteTrieMap ===\n");

    let mut map: ByteTrieMap<[u8; 4], &str> = ByteTrieMap::new();
    map.insert([10, 0, 0, 1], "gateway");
    map.insert([10, 0, 0, 2], "db");
    map.insert([192, 168, 1, 1], "router");

    println!("10.0.0.1 = {:?}", map.get(&[10, 0, 0, 1]));
    println!("10.0.0.9 = {:?}", map.get(&[10, 0, 0, 9]));
    println!("Probe depth of 10.0.0.2: {}", map.probe_depth(&[10, 0, 0, 2]));
    println!("Probe depth of 192.168.1.1: {}", map.probe_depth(&[192, 168, 1, 1]));

    let stats = map.stats();
    println!("Tables: {}", stats.table_count);
    println!("Used bytes: {}", stats.used_bytes);
    println!("Allocated bytes: {}\n", stats.allocated_bytes);
}

fn example_triekv() {
    println!("=== TrieKV (Thread-Safe Wrapper) ===\n");

    let kv: TrieKV<DigestKey, u64> = TrieKV::new();

    // Insert data
    kv.insert("user:1001".into(), 1001);
    kv.insert("user:1002".into(), 1002);
    kv.insert("user:1003".into(), 1003);

    // Lookups
    println!("user:1001 = {:?}", kv.get(&"user:1001".into()));
    println!("user:9999 = {:?}", kv.get(&"user:9999".into()));
    println!("Contains user:1002: {}", kv.contains(&"user:1002".into()));

    // Counting
    for word in "the quick the lazy the end".split_whitespace() {
        kv.update(word.into(), |n| *n += 1);
    }
    println!("Count of 'the': {:?}", kv.get(&"the".into()));
    println!("Keys: {}", kv.len());

    let mem = kv.memory_usage();
    println!("Bytes per key: {:.1}", mem.bytes_per_key);
}
