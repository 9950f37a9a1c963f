//! # veb-set
//!
//! Ordered set of i32/f32/f64 values on a van Emde Boas tree.
//! O(log log U) insert, contains, remove, successor, predecessor.
//!
//! ## Features
//! - Order-preserving key codec: signed integers and IEEE-754 floats map
//!   to unsigned keys with the same ordering
//! - Single-tag sets use the tag's native width; mixed-tag sets share one
//!   64-bit key space ordered by numeric value
//! - Clusters materialize lazily: memory follows the stored keys, not U
//! - O(1) min/max, ordered iteration and range queries
//! - no_std compatible (requires alloc)
//!
//! ## Example
//! ```rust
//! use veb_set::{OrderedSet, TagSet, Value};
//!
//! let mut set = OrderedSet::new(0, TagSet::ALL).unwrap();
//! set.insert(-1.0).unwrap();
//! set.insert(0).unwrap();
//! set.insert(1.5f32).unwrap();
//!
//! assert_eq!(set.successor(-1.0).unwrap(), Some(Value::F64(0.0)));
//! assert_eq!(set.predecessor(1.5f32).unwrap(), Some(Value::F32(0.0)));
//! ```

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod codec;
mod constants;
mod error;
mod key;
mod set;
mod universe;

#[cfg(test)]
mod proptests;

pub use codec::{KeyCodec, KeySpace, TagSet};
pub use constants::MAX_UNIVERSE;
pub use error::{Error, Result};
pub use key::{OrderedKey, Tag, Value};
pub use set::{Iter, OrderedSet};
pub use universe::{round_universe, Keys, UniverseNode};
