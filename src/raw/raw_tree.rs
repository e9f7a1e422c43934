use core::borrow::Borrow;
use core::cmp::{Ordering, max};

use alloc::vec::Vec;
use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::Node;

/// Traversal stack. Balanced trees never spill it; the plain BST may.
pub(crate) type Stack = SmallVec<[Handle; 64]>;

/// The binary search tree skeleton shared by every balancing engine.
///
/// The engines add `insert` and `remove` for their own tag type `B`; lookup,
/// traversal and teardown live here.
#[derive(Clone)]
pub(crate) struct RawTree<K, V, B> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<K, V, B>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Total number of key-value pairs in the tree.
    len: usize,
}

impl<K, V, B> RawTree<K, V, B> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
        }
    }

    /// Creates a new tree with room for `capacity` entries.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    pub(crate) fn set_root(&mut self, root: Option<Handle>) {
        self.root = root;
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<K, V, B> {
        self.nodes.get(handle)
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node<K, V, B> {
        self.nodes.get_mut(handle)
    }

    /// Allocates a detached node for a new entry.
    pub(crate) fn alloc(&mut self, key: K, value: V, balance: B) -> Handle {
        self.len += 1;
        self.nodes.alloc(Node::new(key, value, balance))
    }

    /// Releases a node that has already been unlinked from the tree.
    pub(crate) fn free(&mut self, handle: Handle) -> (K, V) {
        self.len -= 1;
        let node = self.nodes.take(handle);
        debug_assert_eq!(self.nodes.len(), self.len, "`RawTree::free()` - arena out of step with len!");
        (node.key, node.value)
    }

    /// Number of live arena slots; equals `len()` unless a node leaked.
    #[cfg(test)]
    pub(crate) const fn allocated(&self) -> usize {
        self.nodes.len()
    }

    /// Height of the whole tree, counting nodes: 0 when empty, 1 for a lone root.
    pub(crate) fn height(&self) -> usize {
        let mut tallest = 0;
        let mut stack: SmallVec<[(Handle, usize); 64]> = SmallVec::new();
        stack.extend(self.root.map(|root| (root, 1)));

        while let Some((handle, depth)) = stack.pop() {
            let node = self.node(handle);
            if node.is_leaf() {
                tallest = max(tallest, depth);
                continue;
            }
            stack.extend(node.left.map(|child| (child, depth + 1)));
            stack.extend(node.right.map(|child| (child, depth + 1)));
        }
        tallest
    }

    /// Visits every node in ascending key order.
    pub(crate) fn for_each_in_order<'a, F>(&'a self, mut f: F)
    where
        F: FnMut(&'a Node<K, V, B>),
    {
        let mut stack = Stack::new();
        let mut current = self.root;

        loop {
            while let Some(handle) = current {
                stack.push(handle);
                current = self.node(handle).left;
            }
            let Some(handle) = stack.pop() else {
                break;
            };
            let node = self.node(handle);
            f(node);
            current = node.right;
        }
    }

    /// Moves every entry out in ascending key order, leaving the tree empty.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, V)> {
        let mut handles = Vec::with_capacity(self.len);
        let mut stack = Stack::new();
        let mut current = self.root;

        loop {
            while let Some(handle) = current {
                stack.push(handle);
                current = self.node(handle).left;
            }
            let Some(handle) = stack.pop() else {
                break;
            };
            handles.push(handle);
            current = self.node(handle).right;
        }

        let entries: Vec<(K, V)> = handles.into_iter().map(|handle| self.free(handle)).collect();
        self.clear();
        entries
    }
}

impl<K: Ord, V, B> RawTree<K, V, B> {
    /// Finds the node holding `key`.
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.node(handle);
            current = match key.cmp(node.key.borrow()) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(handle),
            };
        }
        None
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.search(key)?;
        Some(&self.node(handle).value)
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.search(key)?;
        Some(&mut self.node_mut(handle).value)
    }

    pub(crate) fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let node = self.node(self.search(key)?);
        Some((&node.key, &node.value))
    }

    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).is_some()
    }
}
