//! # artrie: an adaptive radix tree over raw bytes
//!
//! An in-memory ordered map from byte strings to values, built as an
//! adaptive radix tree (ART): inner nodes switch between four
//! representations (4, 16, 48 or 256 children) as their fanout changes, and
//! runs of single-child nodes are collapsed into per-node compressed
//! prefixes.
//!
//! - **Space efficient**: node layout tracks occupancy instead of paying
//!   for worst-case fanout everywhere
//! - **Fast operations**: O(k) point operations where k is the key length,
//!   with a SIMD child scan on the 16-wide nodes
//! - **Ordered**: iteration, minimum/maximum, and prefix scans all follow
//!   ascending lexicographic byte order
//!
//! ## Quick start
//!
//! ```rust
//! use artrie::ArtTree;
//!
//! let mut tree = ArtTree::new();
//!
//! tree.insert("romane", 1);
//! tree.insert("romanus", 2);
//! tree.insert("romulus", 3);
//! tree.insert("rubens", 4);
//!
//! assert_eq!(tree.get("romulus"), Some(&3));
//! assert_eq!(tree.len(), 4);
//!
//! // Entries come back in key order.
//! let first = tree.iter().next().unwrap();
//! assert_eq!(first.0, b"romane");
//!
//! // Prefix scans visit exactly the matching subtree.
//! let roman: Vec<i32> = tree.iter_prefix("roman").map(|(_, v)| *v).collect();
//! assert_eq!(roman, vec![1, 2]);
//!
//! assert_eq!(tree.remove("rubens"), Some(4));
//! assert_eq!(tree.get("rubens"), None);
//! ```
//!
//! Keys are copied into the tree on insert; values are moved in and never
//! inspected. The tree is single-owner and not internally synchronized;
//! wrap it yourself if you need shared mutation.

mod node;
mod prefix;

pub(crate) mod mapping;
pub(crate) mod utils;

pub mod iter;
pub mod stats;
pub mod tree;

pub use iter::Iter;
pub use stats::{NodeStats, TreeStats};
pub use tree::ArtTree;
