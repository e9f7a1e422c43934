use core::borrow::Borrow;
use core::cmp::Ordering;
use core::mem;

use log::trace;

use super::handle::Handle;
use super::node::{Color, Probe};
use super::raw_tree::RawTree;
use crate::error::{Error, Result};

/// The left-leaning red-black tree backing `RbTreeMap`.
///
/// Each black node together with its red left child (if any) is one node of
/// an equivalent 2-3 tree: a lone black node is a 2-node, a black node with a
/// red left child is a 3-node. Red links therefore only ever lean left.
pub(crate) type RawRbMap<K, V> = RawTree<K, V, Color>;

impl<K, V> RawTree<K, V, Color> {
    /// Missing nodes are black.
    #[inline]
    pub(super) fn is_red(&self, link: Option<Handle>) -> bool {
        link.is_some_and(|handle| self.node(handle).balance == Color::Red)
    }

    #[inline]
    fn left_of(&self, link: Option<Handle>) -> Option<Handle> {
        link.and_then(|handle| self.node(handle).left)
    }

    fn paint(&mut self, handle: Handle, color: Color) {
        self.node_mut(handle).balance = color;
    }

    //     node                 x
    //     /  \               /  \
    //    T1   x     ==>   node   T3
    //        / \          /  \
    //       T2  T3       T1   T2
    fn rotate_left(&mut self, node: Handle) -> Handle {
        let x = self.node(node).right.expect("`RawRbMap::rotate_left()` - no right child to promote!");
        let t2 = self.node(x).left;
        self.node_mut(node).right = t2;
        self.node_mut(x).left = Some(node);

        // The parent's link keeps its color; the demoted node hangs off a red link.
        let color = self.node(node).balance;
        self.paint(x, color);
        self.paint(node, Color::Red);
        trace!("rb: rotated left, {x:?} promoted over {node:?}");
        x
    }

    //       node             x
    //       /  \            / \
    //      x    T2   ==>   y   node
    //     / \                  /  \
    //    y   T1               T1   T2
    fn rotate_right(&mut self, node: Handle) -> Handle {
        let x = self.node(node).left.expect("`RawRbMap::rotate_right()` - no left child to promote!");
        let t1 = self.node(x).right;
        self.node_mut(node).left = t1;
        self.node_mut(x).right = Some(node);

        let color = self.node(node).balance;
        self.paint(x, color);
        self.paint(node, Color::Red);
        trace!("rb: rotated right, {x:?} promoted over {node:?}");
        x
    }

    /// Toggles a node and its children.
    ///
    /// On insertion this only runs on a black node with two red children, so it
    /// splits a temporary 4-node and passes the middle key up. On removal it
    /// runs the other way and merges siblings into a temporary 4-node.
    fn flip_colors(&mut self, handle: Handle) {
        let (left, right) = {
            let node = self.node_mut(handle);
            node.balance = node.balance.flipped();
            (node.left, node.right)
        };
        for child in [left, right].into_iter().flatten() {
            let node = self.node_mut(child);
            node.balance = node.balance.flipped();
        }
        trace!("rb: flipped colors at {handle:?}");
    }

    /// The three ordered local fix-ups, each re-checked against the node's
    /// current state. Returns the subtree's new root.
    fn fix_up(&mut self, mut handle: Handle) -> Handle {
        let node = self.node(handle);
        if self.is_red(node.right) && !self.is_red(node.left) {
            handle = self.rotate_left(handle);
        }

        let left = self.node(handle).left;
        if self.is_red(left) && self.is_red(self.left_of(left)) {
            handle = self.rotate_right(handle);
        }

        let node = self.node(handle);
        if self.is_red(node.left) && self.is_red(node.right) {
            self.flip_colors(handle);
        }

        handle
    }

    /// Makes the left child or one of its children red before descending left,
    /// borrowing from the right sibling when it is a 3-node.
    fn move_red_left(&mut self, mut handle: Handle) -> Handle {
        self.flip_colors(handle);
        let right = self.node(handle).right;
        if self.is_red(self.left_of(right)) {
            let right = right.expect("`RawRbMap::move_red_left()` - red nephew without a right child!");
            let promoted = self.rotate_right(right);
            self.node_mut(handle).right = Some(promoted);
            handle = self.rotate_left(handle);
            self.flip_colors(handle);
        }
        handle
    }

    /// Makes the right child or one of its children red before descending right.
    fn move_red_right(&mut self, mut handle: Handle) -> Handle {
        self.flip_colors(handle);
        let left = self.node(handle).left;
        if self.is_red(self.left_of(left)) {
            handle = self.rotate_right(handle);
            self.flip_colors(handle);
        }
        handle
    }
}

impl<K: Ord, V> RawTree<K, V, Color> {
    /// Inserts a key-value pair, returning the replaced value if the key was present.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        let (root, old) = self.insert_at(self.root(), key, value);
        self.paint(root, Color::Black);
        self.set_root(Some(root));
        old
    }

    fn insert_at(&mut self, link: Option<Handle>, key: K, value: V) -> (Handle, Option<V>) {
        let Some(handle) = link else {
            // A new key always merges into an existing 2-3 node.
            return (self.alloc(key, value, Color::Red), None);
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

        (self.fix_up(handle), old)
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
        let root = self.root().ok_or(Error::Empty)?;
        // The descent below assumes the target exists.
        if !self.contains_key(key) {
            return Ok(None);
        }

        let node = self.node(root);
        if !self.is_red(node.left) && !self.is_red(node.right) {
            self.paint(root, Color::Red);
        }

        let (root, removed) = self.remove_at(root, &Probe::Key(key));
        if let Some(root) = root {
            self.paint(root, Color::Black);
        }
        self.set_root(root);
        Ok(removed)
    }

    /// Removes the probed node, which must exist, from the subtree at `handle`.
    ///
    /// Invariant on entry: `handle` or its left child is red, so the target
    /// never ends up as a lone 2-node that could be deleted outright.
    fn remove_at<Q>(&mut self, mut handle: Handle, probe: &Probe<'_, Q>) -> (Option<Handle>, Option<(K, V)>)
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let removed;

        if probe.locate(self.node(handle)) == Ordering::Less {
            let left = self.node(handle).left;
            if !self.is_red(left) && !self.is_red(self.left_of(left)) {
                handle = self.move_red_left(handle);
            }
            let left = self.node(handle).left.expect("`RawRbMap::remove_at()` - target left of a leaf!");
            let (child, entry) = self.remove_at(left, probe);
            self.node_mut(handle).left = child;
            removed = entry;
        } else {
            if self.is_red(self.node(handle).left) {
                handle = self.rotate_right(handle);
            }
            if probe.locate(self.node(handle)) == Ordering::Equal && self.node(handle).right.is_none() {
                // Left-leaning: no right child means no left child either.
                return (None, Some(self.free(handle)));
            }

            let right = self.node(handle).right;
            if !self.is_red(right) && !self.is_red(self.left_of(right)) {
                handle = self.move_red_right(handle);
            }
            let right = self.node(handle).right.expect("`RawRbMap::remove_at()` - target right of a leaf!");

            if probe.locate(self.node(handle)) == Ordering::Equal {
                let (child, successor) = self.remove_at(right, &Probe::Min);
                let (key, value) = successor.expect("`RawRbMap::remove_at()` - right subtree has no minimum!");
                let node = self.node_mut(handle);
                node.right = child;
                let key = mem::replace(&mut node.key, key);
                let value = mem::replace(&mut node.value, value);
                removed = Some((key, value));
            } else {
                let (child, entry) = self.remove_at(right, probe);
                self.node_mut(handle).right = child;
                removed = entry;
            }
        }

        (Some(self.fix_up(handle)), removed)
    }
}
