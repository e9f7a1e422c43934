use core::borrow::Borrow;
use core::cmp::{Ordering, max};
use core::mem;

use log::trace;

use super::handle::Handle;
use super::node::{Height, Probe};
use super::raw_tree::RawTree;
use crate::error::{Error, Result};

/// The height-balanced (AVL) tree backing `AvlTreeMap`.
pub(crate) type RawAvlMap<K, V> = RawTree<K, V, Height>;

impl<K, V> RawTree<K, V, Height> {
    #[inline]
    fn stored_height(&self, link: Option<Handle>) -> u32 {
        link.map_or(0, |handle| self.node(handle).balance.0)
    }

    /// `height(left) - height(right)`; 0 for a missing node.
    pub(super) fn balance_factor(&self, link: Option<Handle>) -> i64 {
        link.map_or(0, |handle| {
            let node = self.node(handle);
            i64::from(self.stored_height(node.left)) - i64::from(self.stored_height(node.right))
        })
    }

    fn update_height(&mut self, handle: Handle) {
        let node = self.node(handle);
        let height = 1 + max(self.stored_height(node.left), self.stored_height(node.right));
        self.node_mut(handle).balance = Height(height);
    }

    //         y                 x
    //        / \               / \
    //       x   T4            z   y
    //      / \       ==>     / \ / \
    //     z   T3           T1 T2 T3 T4
    //    / \
    //   T1 T2
    fn rotate_right(&mut self, y: Handle) -> Handle {
        let x = self.node(y).left.expect("`RawAvlMap::rotate_right()` - no left child to promote!");
        let t3 = self.node(x).right;
        self.node_mut(y).left = t3;
        self.node_mut(x).right = Some(y);

        // `x` now sits above `y`, so `y` must be measured first.
        self.update_height(y);
        self.update_height(x);
        trace!("avl: rotated right, {x:?} promoted over {y:?}");
        x
    }

    //       y                   x
    //      / \                 / \
    //     T1  x               y   z
    //        / \     ==>     / \ / \
    //       T2  z          T1 T2 T3 T4
    //          / \
    //         T3 T4
    fn rotate_left(&mut self, y: Handle) -> Handle {
        let x = self.node(y).right.expect("`RawAvlMap::rotate_left()` - no right child to promote!");
        let t2 = self.node(x).left;
        self.node_mut(y).right = t2;
        self.node_mut(x).left = Some(y);

        self.update_height(y);
        self.update_height(x);
        trace!("avl: rotated left, {x:?} promoted over {y:?}");
        x
    }

    /// Restores `|balance factor| <= 1` at `handle` and returns the subtree's new root.
    fn rebalance(&mut self, handle: Handle) -> Handle {
        self.update_height(handle);

        let (left, right) = {
            let node = self.node(handle);
            (node.left, node.right)
        };
        let factor = self.balance_factor(Some(handle));

        if factor > 1 && self.balance_factor(left) >= 0 {
            // LL
            self.rotate_right(handle)
        } else if factor < -1 && self.balance_factor(right) <= 0 {
            // RR
            self.rotate_left(handle)
        } else if factor > 1 {
            // LR
            let left = left.expect("`RawAvlMap::rebalance()` - left-heavy node has no left child!");
            let promoted = self.rotate_left(left);
            self.node_mut(handle).left = Some(promoted);
            self.rotate_right(handle)
        } else if factor < -1 {
            // RL
            let right = right.expect("`RawAvlMap::rebalance()` - right-heavy node has no right child!");
            let promoted = self.rotate_right(right);
            self.node_mut(handle).right = Some(promoted);
            self.rotate_left(handle)
        } else {
            handle
        }
    }
}

impl<K: Ord, V> RawTree<K, V, Height> {
    /// Inserts a key-value pair, returning the replaced value if the key was present.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        let (root, old) = self.insert_at(self.root(), key, value);
        self.set_root(Some(root));
        old
    }

    fn insert_at(&mut self, link: Option<Handle>, key: K, value: V) -> (Handle, Option<V>) {
        let Some(handle) = link else {
            return (self.alloc(key, value, Height(1)), None);
        };

        let old = match key.cmp(&self.node(handle).key) {
            Ordering::Less => {
                let left = self.node(handle).left;
                let (child, old) = self.insert_at(left, key, value);
                self.node_mut(handle).left = Some(child);
                old
            }
            Ordering::Greater => {
                let right = self.node(handle).right;
                let (child, old) = self.insert_at(right, key, value);
                self.node_mut(handle).right = Some(child);
                old
            }
            Ordering::Equal => Some(mem::replace(&mut self.node_mut(handle).value, value)),
        };

        (self.rebalance(handle), old)
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
        let (root, removed) = self.remove_at(self.root(), &Probe::Key(key));
        self.set_root(root);
        Ok(removed)
    }

    /// Removes the probed node from the subtree at `link`.
    ///
    /// Returns the subtree's new root and the detached entry. Both the target's
    /// path and, for an interior target, its successor's path are rebalanced on
    /// the way back up.
    fn remove_at<Q>(&mut self, link: Option<Handle>, probe: &Probe<'_, Q>) -> (Option<Handle>, Option<(K, V)>)
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let Some(handle) = link else {
            return (None, None);
        };

        let (subtree, removed) = match probe.locate(self.node(handle)) {
            Ordering::Less => {
                let left = self.node(handle).left;
                let (child, removed) = self.remove_at(left, probe);
                self.node_mut(handle).left = child;
                (Some(handle), removed)
            }
            Ordering::Greater => {
                let right = self.node(handle).right;
                let (child, removed) = self.remove_at(right, probe);
                self.node_mut(handle).right = child;
                (Some(handle), removed)
            }
            Ordering::Equal => {
                let node = self.node(handle);
                match (node.left, node.right) {
                    (None, right) => (right, Some(self.free(handle))),
                    (left, None) => (left, Some(self.free(handle))),
                    (Some(_), Some(right)) => {
                        let (child, successor) = self.remove_at(Some(right), &Probe::Min);
                        let (key, value) =
                            successor.expect("`RawAvlMap::remove_at()` - right subtree has no minimum!");
                        let node = self.node_mut(handle);
                        node.right = child;
                        let key = mem::replace(&mut node.key, key);
                        let value = mem::replace(&mut node.value, value);
                        (Some(handle), Some((key, value)))
                    }
                }
            }
        };

        (subtree.map(|handle| self.rebalance(handle)), removed)
    }
}
