//! Typed ordered-set facade over a universe node.

mod iter;
#[allow(clippy::module_inception)]
mod set;

pub use iter::Iter;
pub use set::OrderedSet;
