//! A height-balanced ordered index implemented with an AVL tree.
//!
//! [`AvlTree`] keeps its keys ordered by a comparator fixed at construction
//! and restores the AVL condition after every insertion and removal, so
//! searches, updates and neighbour queries stay logarithmic even for
//! adversarial input such as strictly ascending keys.
//!
//! Two trees can be combined into a new tree with [`AvlTree::union`],
//! [`AvlTree::intersection`], [`AvlTree::difference`] and
//! [`AvlTree::symmetric_difference`].
//!
//! ```
//! use avl_index::AvlTree;
//!
//! let mut tree = AvlTree::with_comparator(|a: &f64, b: &f64| a.total_cmp(b));
//! for key in [1.1, 1.3, 1.5, 1.9, 2.1, 2.5, 2.7] {
//!     tree.insert(key);
//! }
//! assert_eq!(tree.root().map(|root| *root.key()), Some(1.9));
//! assert_eq!(tree.previous(&1.9), Some(&1.5));
//! assert_eq!(tree.next(&2.7), None);
//! ```
//!
//! The crate logs rotations at `trace` level and set algebra at `debug`
//! level through the [`log`](https://docs.rs/log) facade.

mod balance;
mod compare;
mod error;
mod iter;
mod node;
mod print;
mod raw;
mod set_ops;
mod tree;

pub use compare::{Comparator, NaturalOrder};
pub use error::InvariantError;
pub use iter::{IntoIter, Iter};
pub use node::{Branch, NodeRef};
pub use tree::{AvlTree, Removal};

#[cfg(test)]
mod model;
