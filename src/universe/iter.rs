//! Ordered key iteration over a universe node.

use core::iter::FusedIterator;
use core::ops::Bound;

use crate::universe::UniverseNode;

/// Iterator over keys in ascending order.
///
/// Walks the successor chain: O(log log U) per step, no allocation.
///
/// # Example
/// ```rust
/// use veb_set::UniverseNode;
///
/// let mut node = UniverseNode::new(256).unwrap();
/// for key in [30, 10, 20] {
///     node.insert(key).unwrap();
/// }
/// assert_eq!(node.keys().collect::<Vec<_>>(), vec![10, 20, 30]);
/// assert_eq!(node.range(15..).collect::<Vec<_>>(), vec![20, 30]);
/// ```
#[derive(Debug, Clone)]
pub struct Keys<'a> {
    node: &'a UniverseNode,
    next: Option<u64>,
    end: Bound<u64>,
}

impl<'a> Keys<'a> {
    pub(crate) fn new(node: &'a UniverseNode, first: Option<u64>, end: Bound<u64>) -> Self {
        Self {
            node,
            next: first,
            end,
        }
    }

    #[inline]
    fn in_range(&self, key: u64) -> bool {
        match self.end {
            Bound::Included(end) => key <= end,
            Bound::Excluded(end) => key < end,
            Bound::Unbounded => true,
        }
    }
}

impl Iterator for Keys<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let key = self.next?;
        if !self.in_range(key) {
            self.next = None;
            return None;
        }
        self.next = self.node.succ(key);
        Some(key)
    }
}

impl FusedIterator for Keys<'_> {}
