//! Read-only invariant audits. Nothing on the insert/remove paths calls these.

use core::cmp::max;

use super::handle::Handle;
use super::node::{Color, Height};
use super::raw_tree::RawTree;

impl<K: Ord, V, B> RawTree<K, V, B> {
    /// In-order keys strictly increase.
    pub(crate) fn is_bst(&self) -> bool {
        let mut previous: Option<&K> = None;
        let mut ordered = true;
        self.for_each_in_order(|node| {
            if previous.is_some_and(|previous| *previous >= node.key) {
                ordered = false;
            }
            previous = Some(&node.key);
        });
        ordered
    }
}

impl<K, V> RawTree<K, V, Height> {
    /// Every node's stored heights differ by at most one between its subtrees.
    pub(crate) fn is_balanced(&self) -> bool {
        self.is_balanced_at(self.root())
    }

    fn is_balanced_at(&self, link: Option<Handle>) -> bool {
        let Some(handle) = link else {
            return true;
        };
        let node = self.node(handle);
        self.balance_factor(link).abs() <= 1 && self.is_balanced_at(node.left) && self.is_balanced_at(node.right)
    }

    /// Every stored height matches the height recomputed from the leaves.
    pub(crate) fn heights_consistent(&self) -> bool {
        self.audit_height(self.root()).is_some()
    }

    // Recomputed height of the subtree, or `None` if any stored height disagrees.
    fn audit_height(&self, link: Option<Handle>) -> Option<u32> {
        let Some(handle) = link else {
            return Some(0);
        };
        let node = self.node(handle);
        let height = 1 + max(self.audit_height(node.left)?, self.audit_height(node.right)?);
        (node.balance == Height(height)).then_some(height)
    }
}

impl<K, V> RawTree<K, V, Color> {
    /// Black height of the tree if every red-black invariant holds.
    ///
    /// Checks that the root is black, no red node has a red child, no right
    /// link is red, and every path to a missing child crosses the same number
    /// of black nodes.
    pub(crate) fn black_height(&self) -> Option<usize> {
        if self.is_red(self.root()) {
            return None;
        }
        self.black_height_at(self.root())
    }

    fn black_height_at(&self, link: Option<Handle>) -> Option<usize> {
        let Some(handle) = link else {
            return Some(0);
        };
        let node = self.node(handle);
        if self.is_red(node.right) {
            return None;
        }
        if node.balance == Color::Red && self.is_red(node.left) {
            return None;
        }
        let left = self.black_height_at(node.left)?;
        let right = self.black_height_at(node.right)?;
        (left == right).then_some(left + usize::from(node.balance == Color::Black))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn empty_trees_pass_every_audit() {
        let plain: RawTree<i32, (), ()> = RawTree::new();
        assert!(plain.is_bst());

        let avl: RawTree<i32, (), Height> = RawTree::new();
        assert!(avl.is_balanced());
        assert!(avl.heights_consistent());

        let rb: RawTree<i32, (), Color> = RawTree::new();
        assert_eq!(rb.black_height(), Some(0));
    }

    #[test]
    fn misordered_children_fail_bst_check() {
        let mut tree: RawTree<i32, (), ()> = RawTree::new();
        let root = tree.alloc(5, (), ());
        let left = tree.alloc(9, (), ());
        tree.node_mut(root).left = Some(left);
        tree.set_root(Some(root));
        assert!(!tree.is_bst());
    }

    #[test]
    fn chain_of_three_is_unbalanced() {
        let mut tree: RawTree<i32, (), Height> = RawTree::new();
        let top = tree.alloc(3, (), Height(3));
        let middle = tree.alloc(2, (), Height(2));
        let bottom = tree.alloc(1, (), Height(1));
        tree.node_mut(top).left = Some(middle);
        tree.node_mut(middle).left = Some(bottom);
        tree.set_root(Some(top));

        assert!(tree.is_bst());
        assert!(tree.heights_consistent());
        assert!(!tree.is_balanced());

        tree.node_mut(top).balance = Height(7);
        assert!(!tree.heights_consistent());
    }

    #[test]
    fn red_root_and_red_right_links_are_rejected() {
        let mut tree: RawTree<i32, (), Color> = RawTree::new();
        let root = tree.alloc(1, (), Color::Red);
        tree.set_root(Some(root));
        assert_eq!(tree.black_height(), None);

        tree.node_mut(root).balance = Color::Black;
        let right = tree.alloc(2, (), Color::Red);
        tree.node_mut(root).right = Some(right);
        assert_eq!(tree.black_height(), None);

        tree.node_mut(root).right = None;
        tree.node_mut(root).left = Some(right);
        tree.node_mut(right).key = 0;
        assert_eq!(tree.black_height(), Some(1));
    }
}
