use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::iter;
use core::marker::PhantomData;
use core::mem;

use alloc::vec::Vec;
use log::debug;

use crate::avl_tree_map::AvlTreeMap;
use crate::ordered_map::OrderedMap;

/// Bucket counts, each roughly double the last.
const CAPACITIES: [usize; 26] = [
    53, 97, 193, 389, 769, 1543, 3079, 6151, 12289, 24593, 49157, 98317, 196_613, 393_241, 786_433, 1_572_869,
    3_145_739, 6_291_469, 12_582_917, 25_165_843, 50_331_653, 100_663_319, 201_326_611, 402_653_189, 805_306_457,
    1_610_612_741,
];

/// Grow once the average bucket holds this many entries.
const UPPER_TOLERANCE: usize = 2;
/// Shrink once the average bucket holds this many entries or fewer.
const LOWER_TOLERANCE: usize = 1;

/// A hash table whose buckets are ordered maps.
///
/// Keys are spread across a prime number of buckets by the hasher `S`; each
/// bucket is an `M` (an [`AvlTreeMap`] unless chosen otherwise), so even a
/// hasher that sends every key to the same bucket costs O(log n) per
/// operation instead of O(n).
///
/// The bucket count follows the load: it grows to the next prime once there
/// are twice as many entries as buckets, and shrinks to the previous one once
/// there are no more entries than buckets.
///
/// # Examples
///
/// ```
/// use std::collections::hash_map::RandomState;
///
/// use balance_tree::TreeHashTable;
///
/// let mut scores: TreeHashTable<&str, u32, RandomState> = TreeHashTable::new();
/// scores.insert("ada", 36);
/// scores.insert("grace", 85);
/// assert_eq!(scores.insert("ada", 37), Some(36));
///
/// assert_eq!(scores.get("ada"), Some(&37));
/// assert_eq!(scores.remove("grace"), Some(85));
/// assert_eq!(scores.remove("grace"), None);
/// assert_eq!(scores.len(), 1);
/// ```
pub struct TreeHashTable<K, V, S, M = AvlTreeMap<K, V>> {
    buckets: Vec<M>,
    hasher: S,
    len: usize,
    /// Index of the current bucket count in `CAPACITIES`.
    capacity_index: usize,
    _marker: PhantomData<(K, V)>,
}

impl<K, V, S: Default, M: Default> TreeHashTable<K, V, S, M> {
    /// Creates an empty table with the smallest bucket count and a default hasher.
    #[must_use]
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S, M: Default> TreeHashTable<K, V, S, M> {
    /// Creates an empty table which will use `hasher` to place keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::hash::{BuildHasherDefault, DefaultHasher};
    ///
    /// use balance_tree::{RbTreeMap, TreeHashTable};
    ///
    /// type Hasher = BuildHasherDefault<DefaultHasher>;
    /// let mut table: TreeHashTable<u64, (), Hasher, RbTreeMap<u64, ()>> =
    ///     TreeHashTable::with_hasher(Hasher::default());
    /// table.insert(7, ());
    /// assert!(table.contains_key(&7));
    /// ```
    pub fn with_hasher(hasher: S) -> Self {
        TreeHashTable {
            buckets: Self::fresh_buckets(CAPACITIES[0]),
            hasher,
            len: 0,
            capacity_index: 0,
            _marker: PhantomData,
        }
    }

    fn fresh_buckets(count: usize) -> Vec<M> {
        iter::repeat_with(M::default).take(count).collect()
    }
}

impl<K, V, S, M> TreeHashTable<K, V, S, M> {
    /// Returns the number of entries in the table.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current number of buckets, always one of a fixed series of primes.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns a reference to the table's hasher.
    pub const fn hasher(&self) -> &S {
        &self.hasher
    }
}

impl<K, V, S, M> TreeHashTable<K, V, S, M>
where
    K: Hash + Ord,
    S: BuildHasher,
    M: OrderedMap<K, V>,
{
    #[allow(clippy::cast_possible_truncation)]
    fn bucket_of<Q>(&self, key: &Q) -> usize
    where
        Q: ?Sized + Hash,
    {
        (self.hasher.hash_one(key) % self.buckets.len() as u64) as usize
    }

    /// Returns `true` if the table contains a value for the specified key.
    ///
    /// `Hash` and `Ord` on the borrowed form must agree with those on the key
    /// type.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Ord,
    {
        self.buckets[self.bucket_of(key)].contains_key(key)
    }

    /// Returns a reference to the value corresponding to the key.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Ord,
    {
        self.buckets[self.bucket_of(key)].get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Ord,
    {
        let bucket = self.bucket_of(key);
        self.buckets[bucket].get_mut(key)
    }

    /// Inserts a key-value pair, returning the previous value for the key.
    ///
    /// Only a new key counts towards the load, so overwriting never resizes.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let bucket = self.bucket_of(&key);
        let old = self.buckets[bucket].insert(key, value);
        if old.is_none() {
            self.len += 1;
            if self.len >= UPPER_TOLERANCE * self.buckets.len() && self.capacity_index + 1 < CAPACITIES.len() {
                self.resize(self.capacity_index + 1);
            }
        }
        old
    }

    /// Removes a key from the table, returning its value if it was present.
    ///
    /// Unlike the tree maps, removing from an empty table is not an error.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Ord,
    {
        let bucket = self.bucket_of(key);
        // An empty bucket reports `Error::Empty`, which here just means absent.
        let removed = self.buckets[bucket].remove(key).ok().flatten()?;
        self.len -= 1;
        if self.len <= LOWER_TOLERANCE * self.buckets.len() && self.capacity_index > 0 {
            self.resize(self.capacity_index - 1);
        }
        Some(removed)
    }

    /// Removes every entry and returns to the smallest bucket count.
    pub fn clear(&mut self) {
        self.buckets = Self::fresh_buckets(CAPACITIES[0]);
        self.len = 0;
        self.capacity_index = 0;
    }

    fn resize(&mut self, capacity_index: usize) {
        let count = CAPACITIES[capacity_index];
        debug!("tree hash table: resizing {} -> {count} buckets for {} entries", self.buckets.len(), self.len);

        let old = mem::replace(&mut self.buckets, Self::fresh_buckets(count));
        self.capacity_index = capacity_index;
        for (key, value) in old.into_iter().flat_map(OrderedMap::into_sorted_vec) {
            let bucket = self.bucket_of(&key);
            self.buckets[bucket].insert(key, value);
        }
    }
}

impl<K, V, S: Default, M: Default> Default for TreeHashTable<K, V, S, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S, M> Extend<(K, V)> for TreeHashTable<K, V, S, M>
where
    K: Hash + Ord,
    S: BuildHasher,
    M: OrderedMap<K, V>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use core::hash::{BuildHasherDefault, Hasher};

    use crate::RbTreeMap;

    /// Sends every key to bucket zero.
    #[derive(Default)]
    struct Collide;

    impl Hasher for Collide {
        fn finish(&self) -> u64 {
            0
        }

        fn write(&mut self, _bytes: &[u8]) {}
    }

    /// Spreads integer keys by their value.
    #[derive(Default)]
    struct Identity(u64);

    impl Hasher for Identity {
        fn finish(&self) -> u64 {
            self.0
        }

        fn write(&mut self, bytes: &[u8]) {
            for &byte in bytes {
                self.0 = (self.0 << 8) | u64::from(byte);
            }
        }

        fn write_u32(&mut self, n: u32) {
            self.0 = u64::from(n);
        }
    }

    type Colliding<M> = TreeHashTable<u32, u32, BuildHasherDefault<Collide>, M>;
    type Spread = TreeHashTable<u32, u32, BuildHasherDefault<Identity>>;

    #[test]
    fn prime_table_is_increasing() {
        assert!(CAPACITIES.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn grows_at_twice_the_bucket_count() {
        let mut table = Spread::new();
        for key in 0..105 {
            table.insert(key, key);
        }
        assert_eq!(table.bucket_count(), 53);
        table.insert(105, 105);
        assert_eq!(table.bucket_count(), 97);
        assert_eq!(table.len(), 106);
        assert!((0..106).all(|key| table.get(&key) == Some(&key)));
    }

    #[test]
    fn overwrites_do_not_count_towards_growth() {
        let mut table = Spread::new();
        for _ in 0..500 {
            table.insert(1, 1);
        }
        assert_eq!(table.len(), 1);
        assert_eq!(table.bucket_count(), 53);
    }

    #[test]
    fn shrinks_back_when_sparse() {
        let mut table = Spread::new();
        for key in 0..106 {
            table.insert(key, key);
        }
        assert_eq!(table.bucket_count(), 97);
        // 97 entries left in 97 buckets.
        for key in 0..9 {
            assert_eq!(table.remove(&key), Some(key));
        }
        assert_eq!(table.bucket_count(), 53);
        assert!((9..106).all(|key| table.contains_key(&key)));
    }

    #[test]
    fn single_bucket_still_works_for_every_engine() {
        fn exercise<M: OrderedMap<u32, u32>>() {
            let mut table: Colliding<M> = TreeHashTable::new();
            for key in (0..300).rev() {
                assert_eq!(table.insert(key, key + 1), None);
            }
            assert_eq!(table.get(&150), Some(&151));
            *table.get_mut(&150).unwrap() = 0;
            assert_eq!(table.remove(&150), Some(0));
            assert_eq!(table.remove(&150), None);
            assert_eq!(table.len(), 299);
        }

        exercise::<AvlTreeMap<u32, u32>>();
        exercise::<RbTreeMap<u32, u32>>();
    }

    #[test]
    fn empty_table_remove_is_none() {
        let mut table = Spread::new();
        assert_eq!(table.remove(&3), None);
        table.insert(3, 3);
        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.remove(&3), None);
    }
}
