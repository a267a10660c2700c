//! Red-black tree backing ordered maps and sets.
//!
//! Nodes live in an index arena owned by the tree; callers address elements
//! through [`Position`] handles that stay valid across unrelated insertions
//! and removals. The tree supports unique-key and multi-key insertion
//! (optionally hinted), bound queries, and erasure by position, key or range.
//! Insertion either completes or fails with a [`TreeError`] leaving the tree
//! untouched.
//!
//! # Overview
//!
//! - [`RbTree`] - the core tree with position-level access
//! - [`TreeMap`], [`TreeSet`] - unique-key containers
//! - [`TreeMultiMap`], [`TreeMultiSet`] - containers keeping equal keys
//! - [`red_black`] - rotation and rebalancing primitives over any node arena
//!
//! # Example
//!
//! ```
//! use rb_tree::RbTree;
//!
//! let mut tree = RbTree::new();
//! for k in [5, 3, 8, 1, 4, 7, 9] {
//!     tree.insert_unique(k, k * 10).unwrap();
//! }
//! assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![1, 3, 4, 5, 7, 8, 9]);
//!
//! let after = tree.erase(tree.find(&5));
//! assert_eq!(*tree.key(after), 7);
//! tree.validate().unwrap();
//! ```

mod config;
mod containers;
mod error;
mod store;
mod tree;

pub mod print;
pub mod red_black;
pub mod types;
pub mod util;

pub use config::TreeConfig;
pub use containers::{TreeMap, TreeMultiMap, TreeMultiSet, TreeSet};
pub use error::TreeError;
pub use print::Printable;
pub use tree::{DefaultComparator, IntoIter, Iter, Keys, Position, Range, RbTree, Values};
