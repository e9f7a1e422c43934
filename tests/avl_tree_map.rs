use std::collections::BTreeMap;

use balance_tree::{AvlTreeMap, BstMap, Error, OrderedMap};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

/// Keys drawn from a range narrower than `TEST_SIZE` so that inserts collide
/// and removals hit.
fn key_strategy() -> impl Strategy<Value = i64> {
    -500i64..500i64
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum MapOp {
    Insert(i64, i64),
    Remove(i64),
    Get(i64),
    ContainsKey(i64),
    Bump(i64),
    Clear,
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        6 => (key_strategy(), any::<i64>()).prop_map(|(k, v)| MapOp::Insert(k, v)),
        4 => key_strategy().prop_map(MapOp::Remove),
        2 => key_strategy().prop_map(MapOp::Get),
        1 => key_strategy().prop_map(MapOp::ContainsKey),
        1 => key_strategy().prop_map(MapOp::Bump),
        1 => Just(MapOp::Clear),
    ]
}

// ─── Core CRUD operations ────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both AvlTreeMap and BTreeMap,
    /// asserting identical results and intact invariants at every step.
    #[test]
    fn map_ops_match_btreemap(ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE)) {
        let mut avl: AvlTreeMap<i64, i64> = AvlTreeMap::new();
        let mut model: BTreeMap<i64, i64> = BTreeMap::new();

        for op in ops {
            match op {
                MapOp::Insert(k, v) => prop_assert_eq!(avl.insert(k, v), model.insert(k, v)),
                MapOp::Remove(k) => {
                    let expected = if model.is_empty() { Err(Error::Empty) } else { Ok(model.remove(&k)) };
                    prop_assert_eq!(avl.remove(&k), expected);
                }
                MapOp::Get(k) => prop_assert_eq!(avl.get(&k), model.get(&k)),
                MapOp::ContainsKey(k) => prop_assert_eq!(avl.contains_key(&k), model.contains_key(&k)),
                MapOp::Bump(k) => {
                    if let Some(v) = avl.get_mut(&k) {
                        *v = v.wrapping_add(1);
                    }
                    if let Some(v) = model.get_mut(&k) {
                        *v = v.wrapping_add(1);
                    }
                }
                MapOp::Clear => {
                    avl.clear();
                    model.clear();
                }
            }
            prop_assert_eq!(avl.len(), model.len());
            prop_assert!(avl.is_bst());
            prop_assert!(avl.is_balanced());
        }

        prop_assert_eq!(avl.into_sorted_vec(), model.into_iter().collect::<Vec<_>>());
    }

    /// The height never exceeds the AVL bound of about 1.44 log2(n + 2).
    #[test]
    fn height_is_logarithmic(keys in proptest::collection::vec(any::<u32>(), 1..3_000)) {
        let map: AvlTreeMap<u32, ()> = keys.into_iter().map(|k| (k, ())).collect();
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let bound = (1.4405 * ((map.len() + 2) as f64).log2()).floor() as usize;
        prop_assert!(map.height() <= bound, "height {} over bound {}", map.height(), bound);
    }
}

// ─── Scenarios ───────────────────────────────────────────────────────────────

#[test]
fn mixed_inserts_are_ordered_and_balanced() {
    let map = AvlTreeMap::from([(5, 'e'), (3, 'c'), (6, 'f'), (2, 'b'), (4, 'd'), (8, 'h')]);
    assert!(map.is_bst());
    assert!(map.is_balanced());
    assert_eq!(map.len(), 6);
    assert_eq!(map[&4], 'd');
}

#[test]
fn ascending_inserts_stay_shallow() {
    let keys = [5, 6, 7, 8];
    let avl: AvlTreeMap<i32, ()> = keys.iter().map(|&k| (k, ())).collect();
    let plain: BstMap<i32, ()> = keys.iter().map(|&k| (k, ())).collect();

    // ⌈log2(5)⌉ = 3
    assert_eq!(avl.height(), 3);
    assert!(avl.is_balanced());
    assert_eq!(plain.height(), 4);
}

#[test]
fn remove_on_new_map_is_an_error() {
    let mut map: AvlTreeMap<i32, i32> = AvlTreeMap::new();
    assert_eq!(map.remove(&1), Err(Error::Empty));
    assert_eq!(map.remove_entry(&1), Err(Error::Empty));
    assert!(map.is_empty());
}

#[test]
fn overwrite_is_idempotent() {
    let mut map = AvlTreeMap::new();
    map.insert("k", 1);
    assert_eq!(map.insert("k", 2), Some(1));
    assert_eq!(map.insert("k", 2), Some(2));
    assert_eq!(map.len(), 1);
    assert_eq!(map.get("k"), Some(&2));
}

#[test]
fn removing_an_absent_key_changes_nothing() {
    let mut map: AvlTreeMap<i32, i32> = (0..10).map(|k| (k, k)).collect();
    let before = format!("{map:?}");
    assert_eq!(map.remove(&99), Ok(None));
    assert_eq!(format!("{map:?}"), before);
    assert_eq!(map.len(), 10);
}

#[test]
fn deletion_accounting() {
    let mut map: AvlTreeMap<i32, i32> = (0..100).map(|k| (k, k * k)).collect();
    for k in (0..100).step_by(3) {
        assert_eq!(map.remove(&k), Ok(Some(k * k)));
        assert!(!map.contains_key(&k));
    }
    assert_eq!(map.len(), 100 - 34);
    assert!(map.is_balanced());
}

#[test]
fn borrowed_lookups() {
    let mut map: AvlTreeMap<String, usize> = AvlTreeMap::new();
    for word in ["delta", "alpha", "charlie", "bravo"] {
        map.insert(word.to_owned(), word.len());
    }
    assert_eq!(map.get("charlie"), Some(&7));
    assert_eq!(map.get_key_value("alpha"), Some((&"alpha".to_owned(), &5)));
    assert_eq!(map.remove_entry("bravo"), Ok(Some(("bravo".to_owned(), 5))));
    assert_eq!(format!("{map:?}"), r#"{"alpha": 5, "charlie": 7, "delta": 5}"#);
}

#[test]
fn clone_is_independent() {
    let mut original = AvlTreeMap::from([(1, 1), (2, 2), (3, 3)]);
    let copy = original.clone();
    original.remove(&2).unwrap();
    assert_eq!(copy.len(), 3);
    assert_eq!(copy.into_sorted_vec(), vec![(1, 1), (2, 2), (3, 3)]);
}

#[test]
fn usable_through_the_trait() {
    fn drain_odd<M: OrderedMap<u32, u32>>(map: &mut M) -> usize {
        let mut removed = 0;
        for k in (1..20).step_by(2) {
            if let Ok(Some(_)) = map.remove(&k) {
                removed += 1;
            }
        }
        removed
    }

    let mut map: AvlTreeMap<u32, u32> = (0..10).map(|k| (k, k)).collect();
    assert_eq!(drain_odd(&mut map), 5);
    assert_eq!(OrderedMap::len(&map), 5);
    assert!(map.is_balanced());
}

#[test]
#[should_panic(expected = "no entry found for key")]
fn index_panics_on_missing_key() {
    let map = AvlTreeMap::from([(1, 'a')]);
    std::hint::black_box(map[&2]);
}

#[test]
fn with_capacity_reserves() {
    let mut map = AvlTreeMap::with_capacity(64);
    let capacity = map.capacity();
    assert!(capacity >= 64);
    map.extend((0..64).map(|k| (k, ())));
    assert_eq!(map.capacity(), capacity);
}
