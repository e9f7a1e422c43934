use core::borrow::Borrow;
use core::cmp::Ordering;
use core::mem;

use super::handle::Handle;
use super::raw_tree::RawTree;
use crate::error::{Error, Result};

/// The unbalanced binary search tree backing `BstMap`.
///
/// Walks are iterative: sorted input degenerates the tree into a chain, and a
/// recursive walk over a long chain would exhaust the stack.
pub(crate) type RawBstMap<K, V> = RawTree<K, V, ()>;

/// The link a node hangs from: the root slot, or one side of a parent.
type Link = Option<(Handle, Ordering)>;

impl<K, V> RawTree<K, V, ()> {
    fn set_link(&mut self, link: Link, child: Option<Handle>) {
        match link {
            None => self.set_root(child),
            Some((parent, Ordering::Less)) => self.node_mut(parent).left = child,
            Some((parent, _)) => self.node_mut(parent).right = child,
        }
    }
}

impl<K: Ord, V> RawTree<K, V, ()> {
    /// Inserts a key-value pair, returning the replaced value if the key was present.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut parent: Link = None;
        let mut current = self.root();

        while let Some(handle) = current {
            let node = self.node(handle);
            let side = key.cmp(&node.key);
            current = match side {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(mem::replace(&mut self.node_mut(handle).value, value)),
            };
            parent = Some((handle, side));
        }

        let leaf = self.alloc(key, value, ());
        self.set_link(parent, Some(leaf));
        None
    }

    /// Removes `key`, returning its value.
    ///
    /// # Errors
    ///
    /// [`Error::Empty`] if the tree has no entries.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Result<Option<V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        Ok(self.remove_entry(key)?.map(|(_, value)| value))
    }

    pub(crate) fn remove_entry<Q>(&mut self, key: &Q) -> Result<Option<(K, V)>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        if self.is_empty() {
            return Err(Error::Empty);
        }

        let mut parent: Link = None;
        let mut current = self.root();
        let target = loop {
            let Some(handle) = current else {
                return Ok(None);
            };
            let node = self.node(handle);
            let side = key.cmp(node.key.borrow());
            current = match side {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => break handle,
            };
            parent = Some((handle, side));
        };

        let (left, right) = {
            let node = self.node(target);
            (node.left, node.right)
        };
        let (Some(_), Some(right)) = (left, right) else {
            self.set_link(parent, left.or(right));
            return Ok(Some(self.free(target)));
        };

        // Interior node: take over the successor's entry and splice the
        // successor, which has no left child, out of the right subtree.
        let mut successor_parent = (target, Ordering::Greater);
        let mut successor = right;
        while let Some(left) = self.node(successor).left {
            successor_parent = (successor, Ordering::Less);
            successor = left;
        }
        let successor_right = self.node(successor).right;
        self.set_link(Some(successor_parent), successor_right);
        let (key, value) = self.free(successor);

        let node = self.node_mut(target);
        Ok(Some((mem::replace(&mut node.key, key), mem::replace(&mut node.value, value))))
    }
}
