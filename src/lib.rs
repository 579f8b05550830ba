//! This crate exposes a plain, unbalanced Binary Search Tree (BST) whose nodes keep a link back
//! to their parent.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than (or, for repeated keys, equal to) its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching takes `O(height)`. This tree does nothing to keep its height down, so inserting
//! keys in sorted order gives a height of `N`.
//!
//! ## Parents and the root
//!
//! Every node here also knows its parent. Links in both directions are [`NodeId`]s into an arena
//! owned by the [`Tree`], so there are no reference cycles to manage. The root node is special: it
//! exists from construction on (with no key while the tree is empty) and its id never changes.
//! Removing the root's entry copies another node's contents into it instead of promoting a
//! different node.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::{Tree, TreeError};
//!
//! let mut tree = Tree::new();
//! for key in [5, 3, 8, 1, 4, 7, 9] {
//!     tree.insert(key, key * 10);
//! }
//!
//! assert_eq!(tree.find(&4), Ok(&40));
//!
//! // 8 has two children so 9, its successor, moves into its node.
//! assert_eq!(tree.remove(&8), Ok(80));
//! assert_eq!(tree.find(&8), Err(TreeError::KeyNotFound));
//! assert_eq!(tree.root().right().and_then(|n| n.key().copied()), Some(9));
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod arena;
pub mod config;
mod error;
mod node;
mod tree;
mod util;


pub use arena::NodeId;
pub use config::{Duplicates, TreeConfig};
pub use error::{Result, TreeError, Violation};
pub use node::NodeRef;
pub use tree::Tree;
