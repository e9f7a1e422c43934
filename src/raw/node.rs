use core::borrow::Borrow;
use core::cmp::Ordering;

use super::handle::Handle;

/// Balancing tag of a height-balanced node: the 1-based height of the
/// subtree rooted there. A missing child has height 0.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Height(pub(crate) u32);

/// Balancing tag of a red-black node. A missing child counts as black.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

impl Color {
    #[inline]
    pub(crate) const fn flipped(self) -> Self {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }
}

/// A binary search tree node.
///
/// `B` is the engine's balancing tag: [`Height`], [`Color`], or `()` for the
/// unbalanced tree. A node exclusively owns the subtrees behind its child
/// handles.
#[derive(Clone)]
pub(crate) struct Node<K, V, B> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Option<Handle>,
    pub(crate) right: Option<Handle>,
    pub(crate) balance: B,
}

impl<K, V, B> Node<K, V, B> {
    /// Creates a childless node.
    pub(crate) const fn new(key: K, value: V, balance: B) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
            balance,
        }
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// What a removal descends towards.
///
/// Removing an interior node reuses the same recursive removal with
/// [`Probe::Min`] to detach its in-order successor, so the successor's path is
/// rebalanced exactly like any other removal path.
pub(crate) enum Probe<'a, Q: ?Sized> {
    /// The node whose key equals this one.
    Key(&'a Q),
    /// The leftmost node of the subtree.
    Min,
}

impl<Q: ?Sized + Ord> Probe<'_, Q> {
    /// Which side of `node` the target lies on; `Equal` means `node` is the target.
    #[inline]
    pub(crate) fn locate<K, V, B>(&self, node: &Node<K, V, B>) -> Ordering
    where
        K: Borrow<Q>,
    {
        match self {
            Probe::Key(key) => (*key).cmp(node.key.borrow()),
            Probe::Min if node.left.is_some() => Ordering::Less,
            Probe::Min => Ordering::Equal,
        }
    }
}
