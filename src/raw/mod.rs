mod arena;
mod handle;
mod node;
mod raw_avl_map;
mod raw_bst_map;
mod raw_rb_map;
mod raw_tree;
mod validate;

pub(crate) use raw_avl_map::RawAvlMap;
pub(crate) use raw_bst_map::RawBstMap;
pub(crate) use raw_rb_map::RawRbMap;
