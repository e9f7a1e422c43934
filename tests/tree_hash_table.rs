use std::collections::HashMap;
use std::collections::hash_map::RandomState;

use balance_tree::{BstMap, RbTreeMap, TreeHashTable};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum TableOp {
    Insert(u16, u32),
    Remove(u16),
    Get(u16),
}

fn table_op_strategy() -> impl Strategy<Value = TableOp> {
    prop_oneof![
        4 => (0u16..600, any::<u32>()).prop_map(|(k, v)| TableOp::Insert(k, v)),
        3 => (0u16..600).prop_map(TableOp::Remove),
        1 => (0u16..600).prop_map(TableOp::Get),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays random operations against HashMap, growing and shrinking the
    /// bucket array along the way.
    #[test]
    fn table_ops_match_hashmap(ops in proptest::collection::vec(table_op_strategy(), 0..3_000)) {
        let mut table: TreeHashTable<u16, u32, RandomState> = TreeHashTable::new();
        let mut model: HashMap<u16, u32> = HashMap::new();

        for op in ops {
            match op {
                TableOp::Insert(k, v) => prop_assert_eq!(table.insert(k, v), model.insert(k, v)),
                TableOp::Remove(k) => prop_assert_eq!(table.remove(&k), model.remove(&k)),
                TableOp::Get(k) => prop_assert_eq!(table.get(&k), model.get(&k)),
            }
            prop_assert_eq!(table.len(), model.len());
        }

        for (k, v) in &model {
            prop_assert_eq!(table.get(k), Some(v));
        }
    }
}

#[test]
fn grows_through_the_prime_series() {
    let mut table: TreeHashTable<u32, u32, RandomState> = TreeHashTable::new();
    let mut seen = vec![table.bucket_count()];
    for k in 0..2_000 {
        table.insert(k, k);
        if seen.last() != Some(&table.bucket_count()) {
            seen.push(table.bucket_count());
        }
    }
    assert_eq!(seen, [53, 97, 193, 389, 769, 1543]);
    assert!((0..2_000).all(|k| table.contains_key(&k)));

    for k in 0..2_000 {
        assert_eq!(table.remove(&k), Some(k));
    }
    assert!(table.is_empty());
    assert_eq!(table.bucket_count(), 53);
}

#[test]
fn other_engines_as_buckets() {
    let mut rb: TreeHashTable<String, usize, RandomState, RbTreeMap<String, usize>> = TreeHashTable::new();
    let mut plain: TreeHashTable<String, usize, RandomState, BstMap<String, usize>> = TreeHashTable::new();
    for word in "the quick brown fox jumps over the lazy dog".split(' ') {
        let count = rb.get(word).copied().unwrap_or(0) + 1;
        rb.insert(word.to_owned(), count);
        plain.insert(word.to_owned(), count);
    }
    assert_eq!(rb.len(), 8);
    assert_eq!(rb.get("the"), Some(&2));
    assert_eq!(plain.remove("the"), Some(2));
    assert_eq!(plain.len(), 7);
}

#[test]
fn overwrite_keeps_count() {
    let mut table: TreeHashTable<&str, i32, RandomState> = TreeHashTable::default();
    assert_eq!(table.insert("a", 1), None);
    assert_eq!(table.insert("a", 2), Some(1));
    assert_eq!(table.len(), 1);
    *table.get_mut("a").unwrap() += 1;
    assert_eq!(table.get("a"), Some(&3));
    table.clear();
    assert_eq!(table.remove("a"), None);
}
