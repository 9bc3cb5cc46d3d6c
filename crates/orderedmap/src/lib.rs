//! # orderedmap
//!
//! Hash map whose entries keep a positional order the caller controls.
//!
//! ## Architecture
//! - **Lookup table**: AHash map from key to node handle (O(1))
//! - **List engine**: arena-backed doubly-linked list (O(1) insert, move, remove)
//! - **Facade**: [`OrderedMap`] keeps both in lockstep
//!
//! Order is never derived from comparing keys or values. Typical uses are LRU
//! caches and configuration sets where entries are reordered by hand.
//!
//! ```
//! use orderedmap::{Error, OrderedMap};
//!
//! let mut m = OrderedMap::new();
//! m.push_back(1, "one").unwrap();
//! m.push_back(2, "two").unwrap();
//! m.push_front(0, "zero").unwrap();
//! m.move_to_front(&1).unwrap();
//! assert_eq!(m.keys(), vec![1, 0, 2]);
//!
//! assert_eq!(m.insert_after(3, "three", &9), Err(Error::MarkKeyMissing));
//! ```
//!
//! The map is not synchronized; share it across threads behind a lock.

#![warn(missing_docs)]

mod error;
mod iter;
mod list;
mod map;

pub use error::{Error, Result};
pub use iter::{IntoIter, Iter};
pub use map::OrderedMap;
