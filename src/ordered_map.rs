use core::borrow::Borrow;

use alloc::vec::Vec;

use crate::Result;

/// The capability every ordered map in this crate offers, so that adapters
/// such as [`TreeSet`](crate::TreeSet) and [`TreeHashTable`](crate::TreeHashTable)
/// do not care which balancing engine sits underneath.
///
/// # Examples
///
/// ```
/// use balance_tree::{AvlTreeMap, OrderedMap, RbTreeMap};
///
/// fn tally<M: OrderedMap<&'static str, u32>>(words: &[&'static str]) -> M {
///     let mut counts = M::default();
///     for &word in words {
///         let next = counts.get(word).copied().unwrap_or(0) + 1;
///         counts.insert(word, next);
///     }
///     counts
/// }
///
/// let words = ["to", "be", "or", "not", "to", "be"];
/// let avl: AvlTreeMap<_, _> = tally(&words);
/// let rb: RbTreeMap<_, _> = tally(&words);
/// assert_eq!(avl.get("be"), Some(&2));
/// assert_eq!(rb.len(), 4);
/// ```
pub trait OrderedMap<K, V>: Default {
    /// Returns `true` if the map contains a value for `key`.
    fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord;

    /// Inserts or overwrites, returning the previous value for `key`.
    ///
    /// An overwrite keeps the stored key and leaves `len` unchanged.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Returns the value for `key`, or `None` if it is absent.
    fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord;

    /// Returns a mutable reference to the value for `key`.
    fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord;

    /// Removes `key`, returning its value, or `Ok(None)` if it is absent.
    ///
    /// # Errors
    ///
    /// [`Error::Empty`](crate::Error::Empty) if the map has no entries.
    fn remove<Q>(&mut self, key: &Q) -> Result<Option<V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord;

    /// Number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the map has no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every entry.
    fn clear(&mut self);

    /// Consumes the map, returning its entries in ascending key order.
    fn into_sorted_vec(self) -> Vec<(K, V)>;
}
