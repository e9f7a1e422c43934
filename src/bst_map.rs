use core::borrow::Borrow;
use core::fmt;
use core::ops::Index;

use alloc::vec::Vec;

use crate::Result;
use crate::ordered_map::OrderedMap;
use crate::raw::RawBstMap;

/// An ordered map on a plain, unbalanced binary search tree.
///
/// The shape depends entirely on insertion order: random keys give a bushy
/// tree, sorted keys a chain of height `n`. It exists as a baseline to measure
/// the balanced maps against.
///
/// ```
/// use balance_tree::{AvlTreeMap, BstMap};
///
/// let keys = [5, 6, 7, 8];
/// let plain: BstMap<_, _> = keys.map(|k| (k, ())).into_iter().collect();
/// let avl: AvlTreeMap<_, _> = keys.map(|k| (k, ())).into_iter().collect();
/// assert_eq!(plain.height(), 4);
/// assert_eq!(avl.height(), 3);
/// ```
pub struct BstMap<K, V> {
    raw: RawBstMap<K, V>,
}

impl<K, V> BstMap<K, V> {
    /// Makes a new, empty `BstMap`. Does not allocate.
    #[must_use]
    pub const fn new() -> Self {
        BstMap { raw: RawBstMap::new() }
    }

    /// Returns the number of elements in the map.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Clears the map, removing all elements.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Number of nodes on the longest root-to-leaf path.
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Consumes the map, returning its entries in ascending key order.
    #[must_use]
    pub fn into_sorted_vec(mut self) -> Vec<(K, V)> {
        self.raw.drain_to_vec()
    }
}

impl<K: Ord, V> BstMap<K, V> {
    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Complexity
    ///
    /// O(height), which is O(n) for sorted input.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get_mut(key)
    }

    /// Returns `true` if the map contains a value for the specified key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.contains_key(key)
    }

    /// Inserts a key-value pair into the map, returning the previous value for
    /// the key if there was one.
    ///
    /// A new key always becomes a leaf; nothing is rebalanced.
    ///
    /// # Examples
    ///
    /// ```
    /// use balance_tree::BstMap;
    ///
    /// let mut map = BstMap::new();
    /// assert_eq!(map.insert(1, "a"), None);
    /// assert_eq!(map.insert(1, "b"), Some("a"));
    /// assert_eq!(map[&1], "b");
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.raw.insert(key, value)
    }

    /// Removes a key from the map, returning the value at the key if the key
    /// was previously in the map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`](crate::Error::Empty) if the map has no entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use balance_tree::{BstMap, Error};
    ///
    /// let mut map = BstMap::from([(1, "a")]);
    /// assert_eq!(map.remove(&2), Ok(None));
    /// assert_eq!(map.remove(&1), Ok(Some("a")));
    /// assert_eq!(map.remove(&1), Err(Error::Empty));
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Result<Option<V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove(key)
    }

    /// Returns `true` if an in-order walk sees strictly increasing keys.
    #[must_use]
    pub fn is_bst(&self) -> bool {
        self.raw.is_bst()
    }
}

impl<K: Ord, V> OrderedMap<K, V> for BstMap<K, V> {
    fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        BstMap::contains_key(self, key)
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        BstMap::insert(self, key, value)
    }

    fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        BstMap::get(self, key)
    }

    fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        BstMap::get_mut(self, key)
    }

    fn remove<Q>(&mut self, key: &Q) -> Result<Option<V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        BstMap::remove(self, key)
    }

    fn len(&self) -> usize {
        BstMap::len(self)
    }

    fn clear(&mut self) {
        BstMap::clear(self);
    }

    fn into_sorted_vec(self) -> Vec<(K, V)> {
        BstMap::into_sorted_vec(self)
    }
}

impl<K: Clone, V: Clone> Clone for BstMap<K, V> {
    fn clone(&self) -> Self {
        BstMap { raw: self.raw.clone() }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for BstMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        self.raw.for_each_in_order(|node| {
            map.entry(&node.key, &node.value);
        });
        map.finish()
    }
}

impl<K, V> Default for BstMap<K, V> {
    fn default() -> Self {
        BstMap::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for BstMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = BstMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for BstMap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, Q, V> Index<&Q> for BstMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for BstMap<K, V> {
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}
