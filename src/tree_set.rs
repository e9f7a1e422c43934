use core::borrow::Borrow;
use core::marker::PhantomData;

use alloc::vec::Vec;

use crate::Result;
use crate::avl_tree_map::AvlTreeMap;
use crate::ordered_map::OrderedMap;

/// An ordered set stored as the keys of an [`OrderedMap`] with `()` values.
///
/// The map type `M` picks the balancing engine and defaults to
/// [`AvlTreeMap`].
///
/// It is a logic error for an item to be modified in such a way that the
/// item's ordering relative to any other item, as determined by the [`Ord`]
/// trait, changes while it is in the set.
///
/// # Examples
///
/// ```
/// use balance_tree::{RbTreeMap, TreeSet};
///
/// let mut books = TreeSet::new();
/// books.insert("A Dance With Dragons");
/// books.insert("To Kill a Mockingbird");
/// books.insert("The Odyssey");
///
/// if !books.contains("The Winds of Winter") {
///     println!("We have {} books, but The Winds of Winter ain't one.", books.len());
/// }
/// assert_eq!(books.remove("The Odyssey"), Ok(true));
///
/// // Same set, different engine.
/// let mut primes: TreeSet<u32, RbTreeMap<u32, ()>> = TreeSet::default();
/// primes.extend([7, 2, 5, 3]);
/// assert_eq!(primes.into_sorted_vec(), [2, 3, 5, 7]);
/// ```
#[derive(Clone)]
pub struct TreeSet<T, M = AvlTreeMap<T, ()>> {
    map: M,
    _marker: PhantomData<T>,
}

impl<T> TreeSet<T> {
    /// Makes a new, empty `TreeSet` backed by an [`AvlTreeMap`].
    #[must_use]
    pub const fn new() -> Self {
        TreeSet {
            map: AvlTreeMap::new(),
            _marker: PhantomData,
        }
    }
}

impl<T: Ord, M: OrderedMap<T, ()>> TreeSet<T, M> {
    /// Adds a value to the set.
    ///
    /// Returns whether the value was newly inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// use balance_tree::TreeSet;
    ///
    /// let mut set = TreeSet::new();
    /// assert_eq!(set.insert(2), true);
    /// assert_eq!(set.insert(2), false);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        self.map.insert(value, ()).is_none()
    }

    /// Returns `true` if the set contains an element equal to the value.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.contains_key(value)
    }

    /// Removes a value from the set, returning whether it was present.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`](crate::Error::Empty) if the set has no elements.
    pub fn remove<Q>(&mut self, value: &Q) -> Result<bool>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        Ok(self.map.remove(value)?.is_some())
    }

    /// Returns the number of elements in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the set contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Clears the set, removing all elements.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Consumes the set, returning its elements in ascending order.
    #[must_use]
    pub fn into_sorted_vec(self) -> Vec<T> {
        self.map.into_sorted_vec().into_iter().map(|(value, ())| value).collect()
    }
}

impl<T, M: Default> Default for TreeSet<T, M> {
    fn default() -> Self {
        TreeSet {
            map: M::default(),
            _marker: PhantomData,
        }
    }
}

impl<T: Ord, M: OrderedMap<T, ()>> FromIterator<T> for TreeSet<T, M> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = TreeSet::default();
        set.extend(iter);
        set
    }
}

impl<T: Ord, M: OrderedMap<T, ()>> Extend<T> for TreeSet<T, M> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for TreeSet<T> {
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}
