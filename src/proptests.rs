use super::*;

use crate::table::{BranchTable, IndexSlot, ROOT_TABLE};
use proptest::prelude::*;
use proptest_derive::Arbitrary;
use std::collections::HashMap;

/// Check every structural invariant of the trie by walking it from the root.
fn validate_trie<K, V, E>(t: &ByteTrieMap<K, V, E>)
where
    K: ByteKey + Clone + std::fmt::Debug,
    E: KeyEq<K>,
{
    let entry_count = t.entries.len();
    let table_count = t.tables.len();
    assert!(table_count >= 1, "root table must exist");

    let mut entry_seen = vec![false; entry_count];
    let mut table_seen = vec![false; table_count];
    let mut live_seen = 0usize;

    // (table, depth, byte path leading to the table)
    let mut stack: Vec<(usize, usize, Vec<u8>)> = vec![(ROOT_TABLE, 0, Vec::new())];
    while let Some((table, depth, path)) = stack.pop() {
        assert!(depth < K::WIDTH, "table {table} deeper than key width");
        assert!(!table_seen[table], "table {table} reachable twice");
        table_seen[table] = true;

        let node: &BranchTable = &t.tables[table];
        let mut direct_values = 0u64;
        for (byte, slot) in node.slots() {
            match slot {
                IndexSlot::Unused => {}
                IndexSlot::Value(i) | IndexSlot::Freed(i) => {
                    let i = i as usize;
                    assert!(i < entry_count, "slot points past the entry arena");
                    assert!(!entry_seen[i], "entry {i} reachable from two slots");
                    entry_seen[i] = true;

                    let entry = &t.entries[i];
                    let live = matches!(slot, IndexSlot::Value(_));
                    assert_eq!(entry.is_live(), live, "entry {i} liveness mismatch");
                    if live {
                        direct_values += 1;
                        live_seen += 1;
                        for (level, expected) in path.iter().enumerate() {
                            assert_eq!(entry.key.byte_at(level), *expected);
                        }
                        assert_eq!(entry.key.byte_at(depth), byte);
                        assert!(t.contains_key(&entry.key), "{:?} unreachable", entry.key);
                    }
                }
                IndexSlot::Subtable(sub) => {
                    let sub = sub as usize;
                    assert_ne!(sub, ROOT_TABLE, "root table used as a subtable");
                    assert!(sub < table_count, "slot points past the table arena");
                    let mut sub_path = path.clone();
                    sub_path.push(byte);
                    stack.push((sub, depth + 1, sub_path));
                }
            }
        }
        assert_eq!(
            node.live_count(),
            direct_values,
            "table {table} live count must match its value slots"
        );
    }

    assert!(table_seen.iter().all(|s| *s), "orphaned table");
    assert!(entry_seen.iter().all(|s| *s), "orphaned entry");
    assert_eq!(live_seen, t.len());
    assert_eq!(t.iter().count(), t.len());
    assert!(t.allocated_bytes() >= t.used_bytes());
}

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    #[proptest(weight = 40)]
    Insert {
        #[proptest(strategy = "key_strategy()")]
        key: [u8; 4],
        value: u64,
    },
    #[proptest(weight = 10)]
    InsertOrGet {
        #[proptest(strategy = "key_strategy()")]
        key: [u8; 4],
        add: u8,
    },
    #[proptest(weight = 25)]
    Remove {
        #[proptest(strategy = "key_strategy()")]
        key: [u8; 4],
    },
    #[proptest(weight = 24)]
    Get {
        #[proptest(strategy = "key_strategy()")]
        key: [u8; 4],
    },
    #[proptest(weight = 1)]
    CloneAndDiverge,
}

fn key_strategy() -> impl Strategy<Value = [u8; 4]> {
    // Few distinct bytes so keys share long prefixes.
    prop::array::uniform4(prop::sample::select(vec![0u8, 1, 2, 0x80, 0xff]))
}

fn u16_ops_strategy() -> impl Strategy<Value = Vec<(bool, u16)>> {
    prop::collection::vec((any::<bool>(), any::<u16>()), 0..=1000)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence_with_hashmap(ops in prop::collection::vec(any::<Op>(), 0..=2000)) {
        let mut t: ByteTrieMap<[u8; 4], u64> = ByteTrieMap::new();
        let mut m: HashMap<[u8; 4], u64> = HashMap::new();

        for op in ops {
            match op {
                Op::Insert { key, value } => {
                    prop_assert_eq!(t.insert(key, value), m.insert(key, value));
                }
                Op::InsertOrGet { key, add } => {
                    let got = t.insert_or_get(key);
                    *got = got.wrapping_add(u64::from(add));
                    let got = *got;
                    let expected = m.entry(key).or_default();
                    *expected = expected.wrapping_add(u64::from(add));
                    prop_assert_eq!(got, *expected);
                }
                Op::Remove { key } => {
                    prop_assert_eq!(t.remove(&key), m.remove(&key));
                }
                Op::Get { key } => {
                    prop_assert_eq!(t.get(&key).copied(), m.get(&key).copied());
                }
                Op::CloneAndDiverge => {
                    let mut copy = t.clone();
                    validate_trie(&copy);
                    copy.insert([9, 9, 9, 9], 0);
                    if let Some(&key) = m.keys().next() {
                        copy.remove(&key);
                        prop_assert_eq!(t.get(&key).copied(), m.get(&key).copied());
                    }
                    prop_assert_eq!(t.get(&[9, 9, 9, 9]), None);
                }
            }

            prop_assert_eq!(t.len(), m.len());
        }

        validate_trie(&t);
        let mut got: Vec<([u8; 4], u64)> = t.iter().map(|(k, v)| (*k, *v)).collect();
        let mut expected: Vec<([u8; 4], u64)> = m.into_iter().collect();
        got.sort_unstable();
        expected.sort_unstable();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_probe_depth_bounded(ops in u16_ops_strategy()) {
        let mut t: ByteTrieMap<u16, ()> = ByteTrieMap::new();
        for (insert, key) in ops {
            if insert {
                t.insert(key, ());
            } else {
                t.remove(&key);
            }
            let depth = t.probe_depth(&key);
            prop_assert!((1..=2).contains(&depth));
        }
        validate_trie(&t);
        prop_assert!(t.table_count() <= 257);
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

fn small_key_set() -> Vec<[u8; 3]> {
    vec![
        [1, 1, 1],
        [1, 1, 2],
        [1, 2, 1],
        [2, 1, 1],
        [1, 2, 2],
        [2, 2, 2],
    ]
}

#[test]
fn exhaustive_insert_order_small_set() {
    for_each_permutation(&small_key_set(), |perm| {
        let mut t: ByteTrieMap<[u8; 3], u64> = ByteTrieMap::new();
        let mut m: HashMap<[u8; 3], u64> = HashMap::new();

        for (i, k) in perm.into_iter().enumerate() {
            let v = i as u64;
            assert_eq!(t.insert(k, v), m.insert(k, v));
        }

        validate_trie(&t);
        for (k, v) in &m {
            assert_eq!(t.get(k), Some(v));
        }
        // Table layout depends only on the key set, not insertion order.
        assert_eq!(t.table_count(), 5);
    });
}

#[test]
fn exhaustive_remove_order_small_set() {
    let keys = small_key_set();

    // Insert in a fixed order, then remove in all permutations.
    let mut base_trie: ByteTrieMap<[u8; 3], u64> = ByteTrieMap::new();
    let mut base_map: HashMap<[u8; 3], u64> = HashMap::new();
    for (i, k) in keys.iter().enumerate() {
        let v = i as u64;
        assert_eq!(base_trie.insert(*k, v), base_map.insert(*k, v));
    }
    let tables = base_trie.table_count();

    for_each_permutation(&keys, |perm| {
        let mut t = base_trie.clone();
        let mut m = base_map.clone();

        for k in &perm {
            assert_eq!(t.remove(k), m.remove(k));
            assert_eq!(t.len(), m.len());
            validate_trie(&t);
        }
        assert!(t.is_empty());
        assert_eq!(t.table_count(), tables);
        assert_eq!(t.used_bytes(), 0);

        // Everything comes back into the freed slots.
        for k in perm.iter().rev() {
            t.insert(*k, 0);
        }
        validate_trie(&t);
        assert_eq!(t.stats().entry_slots, keys.len());
        assert_eq!(t.table_count(), tables);
    });
}
