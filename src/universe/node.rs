//! Universe node: a van Emde Boas tree over `[0, size)`.

use alloc::boxed::Box;
use core::ops::{Bound, RangeBounds};

use crate::constants::{BASE_UNIVERSE, EMPTY_MAX, EMPTY_MIN, MAX_UNIVERSE};
use crate::error::{Error, Result};
use crate::universe::{ceil_sqrt, ClusterSlots, Keys};

/// Van Emde Boas node over the key universe `[0, size)`.
///
/// Insert, contains, remove, successor and predecessor run in
/// O(log log size): each level of recursion shrinks the universe from
/// `size` to `ceil(sqrt(size))`.
///
/// # Layout
/// - `min`/`max`: smallest and largest key, `min > max` when empty
/// - `branch` (only when `size > 2`): a summary node over the cluster
///   indices plus `ceil(sqrt(size))` lazily populated cluster slots, each
///   cluster covering `ceil(sqrt(size))` keys
///
/// The minimum is never stored inside a cluster. Inserting a smaller key
/// swaps it with `min` and pushes the old minimum down; removing `min`
/// pulls the next one up from `summary.min`'s cluster. Keeping it out is
/// what lets insert and remove recurse into only one child per level.
///
/// # Example
/// ```rust
/// use veb_set::UniverseNode;
///
/// let mut node = UniverseNode::new(16).unwrap();
/// for key in [5, 2, 8, 15] {
///     node.insert(key).unwrap();
/// }
/// assert_eq!(node.successor(2).unwrap(), Some(5));
/// assert_eq!(node.predecessor(15).unwrap(), Some(8));
/// assert!(node.remove(5).unwrap());
/// assert_eq!(node.successor(2).unwrap(), Some(8));
/// ```
#[derive(Debug)]
pub struct UniverseNode {
    /// Number of keys this node covers
    size: u128,

    /// Smallest key, `EMPTY_MIN` when empty. Not stored in any cluster.
    min: u64,

    /// Largest key, `EMPTY_MAX` when empty
    max: u64,

    /// Summary and clusters, absent for base-case nodes
    branch: Option<Box<Branch>>,
}

/// Recursive part of a node with `size > 2`.
#[derive(Debug)]
struct Branch {
    /// `ceil(sqrt(size))`: number of clusters and keys per cluster
    cluster_size: u64,

    /// Tracks which cluster indices are non-empty
    summary: UniverseNode,

    clusters: ClusterSlots,
}

impl Branch {
    #[inline(always)]
    fn split(&self, key: u64) -> (u64, u64) {
        (key / self.cluster_size, key % self.cluster_size)
    }

    #[inline(always)]
    fn index(&self, high: u64, low: u64) -> u64 {
        high * self.cluster_size + low
    }
}

impl UniverseNode {
    /// Create an empty node covering `[0, size)`.
    ///
    /// Builds the summary chain eagerly (O(log log size) small nodes);
    /// clusters appear only as keys arrive.
    ///
    /// # Errors
    /// `InvalidUniverse` unless `1 <= size <= 2^64`.
    pub fn new(size: u128) -> Result<Self> {
        if size == 0 || size > MAX_UNIVERSE {
            return Err(Error::InvalidUniverse { size });
        }
        let node = Self::with_size(size);
        tracing::debug!(
            size = %size,
            cluster_size = node.branch.as_ref().map_or(0, |b| b.cluster_size),
            "created universe node"
        );
        Ok(node)
    }

    /// Unchecked constructor; `size` must be within `1..=2^64`.
    pub(crate) fn with_size(size: u128) -> Self {
        let branch = (size > BASE_UNIVERSE).then(|| {
            let cluster_size = ceil_sqrt(size);
            Box::new(Branch {
                cluster_size,
                summary: UniverseNode::with_size(cluster_size as u128),
                clusters: ClusterSlots::new(cluster_size),
            })
        });
        Self {
            size,
            min: EMPTY_MIN,
            max: EMPTY_MAX,
            branch,
        }
    }

    fn singleton(size: u128, key: u64) -> Self {
        let mut node = Self::with_size(size);
        node.min = key;
        node.max = key;
        node
    }

    /// Number of keys this node covers.
    #[inline]
    pub fn size(&self) -> u128 {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Smallest key, `None` if empty. O(1).
    #[inline]
    pub fn min(&self) -> Option<u64> {
        (!self.is_empty()).then_some(self.min)
    }

    /// Largest key, `None` if empty. O(1).
    #[inline]
    pub fn max(&self) -> Option<u64> {
        (!self.is_empty()).then_some(self.max)
    }

    #[inline]
    fn check(&self, key: u64) -> Result<()> {
        if u128::from(key) < self.size {
            Ok(())
        } else {
            Err(Error::universe_exhausted(key, self.size))
        }
    }

    /// Insert a key.
    ///
    /// # Returns
    /// * `Ok(true)` if the key was newly inserted
    /// * `Ok(false)` if it was already present (nothing changes)
    ///
    /// # Errors
    /// - `UniverseExhausted` if `key >= size`
    /// - `AllocationFailure` if cluster storage cannot grow; the node is
    ///   left untouched
    pub fn insert(&mut self, key: u64) -> Result<bool> {
        self.check(key)?;
        if self.member(key) {
            return Ok(false);
        }
        self.reserve(key)?;
        self.insert_key(key);
        Ok(true)
    }

    /// Check whether `key` is present.
    pub fn contains(&self, key: u64) -> Result<bool> {
        self.check(key)?;
        Ok(self.member(key))
    }

    /// Smallest key strictly greater than `key`.
    pub fn successor(&self, key: u64) -> Result<Option<u64>> {
        self.check(key)?;
        Ok(self.succ(key))
    }

    /// Largest key strictly smaller than `key`.
    pub fn predecessor(&self, key: u64) -> Result<Option<u64>> {
        self.check(key)?;
        Ok(self.pred(key))
    }

    /// Remove a key.
    ///
    /// # Returns
    /// * `Ok(true)` if the key was removed
    /// * `Ok(false)` if it was absent (nothing changes)
    pub fn remove(&mut self, key: u64) -> Result<bool> {
        self.check(key)?;
        if !self.member(key) {
            return Ok(false);
        }
        self.delete_key(key);
        Ok(true)
    }

    /// Remove every key, releasing all clusters.
    pub fn clear(&mut self) {
        self.min = EMPTY_MIN;
        self.max = EMPTY_MAX;
        if let Some(branch) = self.branch.as_deref_mut() {
            branch.summary.clear();
            branch.clusters.clear();
        }
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> Keys<'_> {
        Keys::new(self, self.min(), Bound::Unbounded)
    }

    /// Keys within `range`, ascending. Bounds beyond the universe are
    /// clamped rather than rejected.
    pub fn range<R: RangeBounds<u64>>(&self, range: R) -> Keys<'_> {
        let first = match range.start_bound() {
            Bound::Included(&start) if self.member(start) => Some(start),
            Bound::Included(&start) | Bound::Excluded(&start) => self.succ(start),
            Bound::Unbounded => self.min(),
        };
        Keys::new(self, first, range.end_bound().cloned())
    }

    /// Grow every slot store the insertion of `key` will touch.
    ///
    /// Walks the same single path as `insert_key` without changing any
    /// key, so a failure here leaves the tree consistent.
    fn reserve(&mut self, key: u64) -> Result<()> {
        if self.is_empty() {
            return Ok(());
        }
        // A key below `min` trades places with it; the old min goes down.
        let key = key.max(self.min);
        let Some(branch) = self.branch.as_deref_mut() else {
            return Ok(());
        };
        let (high, low) = branch.split(key);
        match branch.clusters.get_mut(high) {
            Some(cluster) => cluster.reserve(low),
            None => {
                branch.clusters.reserve()?;
                branch.summary.reserve(high)
            }
        }
    }

    fn insert_key(&mut self, mut key: u64) {
        if self.is_empty() {
            self.min = key;
            self.max = key;
            return;
        }
        if key == self.min {
            return;
        }
        if key < self.min {
            core::mem::swap(&mut key, &mut self.min);
        }
        if key > self.max {
            self.max = key;
        }

        let Some(branch) = self.branch.as_deref_mut() else {
            return;
        };
        let (high, low) = branch.split(key);
        match branch.clusters.get_mut(high) {
            Some(cluster) => cluster.insert_key(low),
            None => {
                // Empty cluster: record it in the summary and seed it
                // directly instead of recursing into a known-empty node.
                branch.summary.insert_key(high);
                let cluster = UniverseNode::singleton(u128::from(branch.cluster_size), low);
                branch.clusters.put(high, cluster);
            }
        }
    }

    pub(crate) fn member(&self, key: u64) -> bool {
        if self.is_empty() {
            return false;
        }
        if key == self.min || key == self.max {
            return true;
        }
        let Some(branch) = self.branch.as_deref() else {
            return false;
        };
        let (high, low) = branch.split(key);
        branch
            .clusters
            .get(high)
            .is_some_and(|cluster| cluster.member(low))
    }

    pub(crate) fn succ(&self, key: u64) -> Option<u64> {
        if self.is_empty() || key >= self.max {
            return None;
        }
        if key < self.min {
            return Some(self.min);
        }
        let Some(branch) = self.branch.as_deref() else {
            return (key == 0 && self.max == 1).then_some(1);
        };

        let (high, low) = branch.split(key);
        if let Some(cluster) = branch.clusters.get(high) {
            if low < cluster.max {
                return cluster.succ(low).map(|offset| branch.index(high, offset));
            }
        }
        let next = branch.summary.succ(high)?;
        let cluster = branch.clusters.get(next)?;
        Some(branch.index(next, cluster.min))
    }

    pub(crate) fn pred(&self, key: u64) -> Option<u64> {
        if self.is_empty() || key <= self.min {
            return None;
        }
        if key > self.max {
            return Some(self.max);
        }
        let Some(branch) = self.branch.as_deref() else {
            return (key == 1 && self.min == 0).then_some(0);
        };

        let (high, low) = branch.split(key);
        if let Some(cluster) = branch.clusters.get(high) {
            if low > cluster.min {
                return cluster.pred(low).map(|offset| branch.index(high, offset));
            }
        }
        match branch.summary.pred(high) {
            Some(prev) => branch
                .clusters
                .get(prev)
                .map(|cluster| branch.index(prev, cluster.max)),
            // min lives outside the clusters, so the summary cannot see it
            None => (key > self.min).then_some(self.min),
        }
    }

    /// Remove a key known to be present.
    fn delete_key(&mut self, mut key: u64) {
        if self.min == self.max {
            self.min = EMPTY_MIN;
            self.max = EMPTY_MAX;
            return;
        }
        let Some(branch) = self.branch.as_deref_mut() else {
            // Base case holding both 0 and 1: keep the other one.
            self.min = if key == 0 { 1 } else { 0 };
            self.max = self.min;
            return;
        };

        if key == self.min {
            // Promote the smallest clustered key to min, then delete it
            // from its cluster instead.
            let first = branch.summary.min;
            let Some(cluster) = branch.clusters.get(first) else {
                return;
            };
            key = branch.index(first, cluster.min);
            self.min = key;
        }

        let (high, low) = branch.split(key);
        let Some(cluster) = branch.clusters.get_mut(high) else {
            return;
        };
        cluster.delete_key(low);
        if cluster.is_empty() {
            branch.summary.delete_key(high);
            branch.clusters.release(high);
        }

        if key == self.max {
            self.max = match branch.summary.max() {
                None => self.min,
                Some(last) => branch
                    .clusters
                    .get(last)
                    .map_or(self.min, |cluster| branch.index(last, cluster.max)),
            };
        }
    }

    /// Check structural invariants, returning the number of stored keys.
    #[cfg(test)]
    pub(crate) fn validate(&self) -> usize {
        let Some(branch) = self.branch.as_deref() else {
            assert!(self.size <= BASE_UNIVERSE);
            return match (self.min(), self.max()) {
                (None, None) => 0,
                (Some(min), Some(max)) if min == max => {
                    assert!(u128::from(min) < self.size);
                    1
                }
                (Some(0), Some(1)) => 2,
                other => panic!("invalid base node {other:?}"),
            };
        };
        assert_eq!(branch.cluster_size, ceil_sqrt(self.size));

        let live = branch.clusters.live();
        if self.is_empty() {
            assert!(live.is_empty(), "empty node owns clusters");
            assert!(branch.summary.is_empty(), "empty node has a non-empty summary");
            return 0;
        }
        assert!(self.min <= self.max);
        assert!(u128::from(self.max) < self.size);

        let mut count = 1;
        for &(high, cluster) in &live {
            assert!(!cluster.is_empty(), "empty cluster {high} still allocated");
            assert!(branch.summary.member(high), "cluster {high} missing from summary");
            assert!(
                branch.index(high, cluster.min) > self.min,
                "min duplicated inside cluster {high}"
            );
            count += cluster.validate();
        }
        assert_eq!(branch.summary.validate(), live.len());

        match live.last() {
            Some(&(high, cluster)) => assert_eq!(self.max, branch.index(high, cluster.max)),
            None => assert_eq!(self.max, self.min),
        }
        count
    }
}
