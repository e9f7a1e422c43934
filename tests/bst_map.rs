use std::collections::BTreeMap;

use balance_tree::{BstMap, Error};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn map_ops_match_btreemap(ops in proptest::collection::vec((any::<bool>(), 0u16..200), 0..1_000)) {
        let mut plain: BstMap<u16, u16> = BstMap::new();
        let mut model: BTreeMap<u16, u16> = BTreeMap::new();

        for (insert, k) in ops {
            if insert {
                prop_assert_eq!(plain.insert(k, k), model.insert(k, k));
            } else {
                let expected = if model.is_empty() { Err(Error::Empty) } else { Ok(model.remove(&k)) };
                prop_assert_eq!(plain.remove(&k), expected);
            }
            prop_assert_eq!(plain.len(), model.len());
            prop_assert_eq!(plain.get(&k), model.get(&k));
        }
        prop_assert!(plain.is_bst());
        prop_assert_eq!(plain.into_sorted_vec(), model.into_iter().collect::<Vec<_>>());
    }
}

#[test]
fn sorted_input_degenerates_into_a_chain() {
    let plain: BstMap<u32, ()> = (0..10_000).map(|k| (k, ())).collect();
    assert_eq!(plain.height(), 10_000);
    assert!(plain.is_bst());
    assert!(plain.contains_key(&9_999));
}

#[test]
fn remove_on_new_map_is_an_error() {
    let mut plain: BstMap<i32, i32> = BstMap::new();
    assert_eq!(plain.remove(&1), Err(Error::Empty));
}

#[test]
fn debug_and_clone() {
    let mut plain: BstMap<i32, char> = [(2, 'b'), (1, 'a'), (3, 'c')].into_iter().collect();
    let copy = plain.clone();
    *plain.get_mut(&2).unwrap() = 'z';
    assert_eq!(format!("{plain:?}"), "{1: 'a', 2: 'z', 3: 'c'}");
    assert_eq!(format!("{copy:?}"), "{1: 'a', 2: 'b', 3: 'c'}");

    let indexed = BstMap::from([(1, 'x'), (0, 'y')]);
    assert_eq!(indexed[&1], 'x');
}

#[test]
fn clear_returns_to_an_empty_map() {
    let mut plain = BstMap::from([(3, 'c'), (1, 'a'), (2, 'b')]);
    assert_eq!(plain.len(), 3);
    assert!(!plain.is_empty());
    assert!(plain.contains_key(&2));

    plain.clear();
    assert!(plain.is_empty());
    assert_eq!(plain.height(), 0);
    assert_eq!(plain.get(&2), None);
    assert_eq!(plain.remove(&2), Err(Error::Empty));

    assert_eq!(plain.insert(2, 'z'), None);
    assert_eq!(plain.into_sorted_vec(), [(2, 'z')]);
}
