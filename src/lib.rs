//! Self-balancing binary search tree maps for Rust.
//!
//! This crate provides two ordered maps that keep O(log n) lookups, insertions
//! and removals regardless of the order keys arrive in:
//!
//! - [`AvlTreeMap`] - height-balanced: sibling subtrees differ in height by at most one
//! - [`RbTreeMap`] - color-balanced: a left-leaning red-black tree
//!
//! Both implement the [`OrderedMap`] trait, alongside the unbalanced [`BstMap`]
//! baseline, so code can be written once against the trait and run on any
//! engine. [`TreeSet`] and [`TreeHashTable`] are built on top of it.
//!
//! # Example
//!
//! ```
//! use balance_tree::{AvlTreeMap, BstMap, Error, RbTreeMap};
//!
//! let mut avl = AvlTreeMap::new();
//! let mut rb = RbTreeMap::new();
//! let mut plain = BstMap::new();
//! for key in 1..=7 {
//!     avl.insert(key, key * key);
//!     rb.insert(key, key * key);
//!     plain.insert(key, key * key);
//! }
//!
//! // Sorted input: the balanced trees stay shallow, the plain one does not.
//! assert_eq!(avl.height(), 3);
//! assert!(rb.height() <= 4);
//! assert_eq!(plain.height(), 7);
//!
//! // The audits confirm the shape invariants.
//! assert!(avl.is_bst() && avl.is_balanced());
//! assert!(rb.is_bst() && rb.is_balanced());
//!
//! // A missing key is `None`; an empty tree is an error.
//! assert_eq!(avl.remove(&42), Ok(None));
//! avl.clear();
//! assert_eq!(avl.remove(&1), Err(Error::Empty));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Arena storage** - Nodes live in one contiguous arena and link by index, so there is no
//!   `unsafe` and no parent pointers
//! - **Diagnostics** - `is_bst`, `is_balanced` and `height` audit a tree's shape in O(n)
//! - **Logging** - Rotations and color flips are reported at `trace` level through the
//!   [`log`](https://docs.rs/log) facade
//!
//! # Implementation
//!
//! Every map wraps the same arena-backed binary search tree; the engines only
//! differ in what they store per node (a height, a color, or nothing) and in
//! how `insert` and `remove` restore balance on the way back up.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod ordered_map;
mod raw;

pub mod avl_tree_map;
pub mod bst_map;
pub mod rb_tree_map;
pub mod tree_hash_table;
pub mod tree_set;

pub use avl_tree_map::AvlTreeMap;
pub use bst_map::BstMap;
pub use error::{Error, Result};
pub use ordered_map::OrderedMap;
pub use rb_tree_map::RbTreeMap;
pub use tree_hash_table::TreeHashTable;
pub use tree_set::TreeSet;
