//! Lazily populated cluster storage for a universe node.

use alloc::boxed::Box;
use alloc::vec::Vec;
use hashbrown::HashMap;

use crate::constants::DENSE_FANOUT_LIMIT;
use crate::error::{Error, Result};
use crate::universe::UniverseNode;

/// Cluster slots owned by a non-base universe node.
///
/// A slot holds a child only while that cluster is non-empty: children are
/// created on their first key and released when their last key goes.
///
/// # Storage
/// - fan-out <= 256: direct-indexed `Vec<Option<Box<_>>>`, allocated on
///   the first cluster
/// - larger fan-out: sparse `HashMap` keyed by cluster index, so memory
///   follows the number of live clusters instead of the fan-out
#[derive(Debug)]
pub(crate) struct ClusterSlots {
    fanout: u64,
    store: Store,
}

#[derive(Debug)]
enum Store {
    Dense(Vec<Option<Box<UniverseNode>>>),
    Sparse(HashMap<u64, Box<UniverseNode>>),
}

impl ClusterSlots {
    /// Create empty slots for `fanout` clusters. Allocates nothing.
    pub fn new(fanout: u64) -> Self {
        let store = if fanout <= DENSE_FANOUT_LIMIT {
            Store::Dense(Vec::new())
        } else {
            Store::Sparse(HashMap::new())
        };
        Self { fanout, store }
    }

    #[inline]
    pub fn get(&self, high: u64) -> Option<&UniverseNode> {
        match &self.store {
            Store::Dense(slots) => slots.get(usize::try_from(high).ok()?)?.as_deref(),
            Store::Sparse(map) => map.get(&high).map(|node| &**node),
        }
    }

    #[inline]
    pub fn get_mut(&mut self, high: u64) -> Option<&mut UniverseNode> {
        match &mut self.store {
            Store::Dense(slots) => slots
                .get_mut(usize::try_from(high).ok()?)?
                .as_deref_mut(),
            Store::Sparse(map) => map.get_mut(&high).map(|node| &mut **node),
        }
    }

    /// Make room for one more live cluster.
    ///
    /// After `Ok(())` the next [`ClusterSlots::put`] cannot fail.
    pub fn reserve(&mut self) -> Result<()> {
        let fanout = self.fanout as usize;
        match &mut self.store {
            Store::Dense(slots) => {
                if slots.is_empty() {
                    slots.try_reserve_exact(fanout).map_err(|_| {
                        tracing::warn!(slots = fanout, "dense cluster slot allocation failed");
                        Error::AllocationFailure { slots: fanout }
                    })?;
                    slots.resize_with(fanout, || None);
                }
            }
            Store::Sparse(map) => {
                let wanted = map.len() + 1;
                map.try_reserve(1).map_err(|_| {
                    tracing::warn!(slots = wanted, "sparse cluster slot allocation failed");
                    Error::AllocationFailure { slots: wanted }
                })?;
            }
        }
        Ok(())
    }

    /// Store a freshly materialized cluster at `high`.
    pub fn put(&mut self, high: u64, node: UniverseNode) {
        let fanout = self.fanout as usize;
        match &mut self.store {
            Store::Dense(slots) => {
                if slots.is_empty() {
                    slots.resize_with(fanout, || None);
                }
                slots[high as usize] = Some(Box::new(node));
            }
            Store::Sparse(map) => {
                map.insert(high, Box::new(node));
            }
        }
        tracing::trace!(cluster = high, "materialized cluster");
    }

    /// Drop the cluster at `high`.
    pub fn release(&mut self, high: u64) {
        let released = match &mut self.store {
            Store::Dense(slots) => slots
                .get_mut(high as usize)
                .and_then(Option::take)
                .is_some(),
            Store::Sparse(map) => map.remove(&high).is_some(),
        };
        if released {
            tracing::trace!(cluster = high, "released cluster");
        }
    }

    /// Drop every cluster and give back slot storage.
    pub fn clear(&mut self) {
        match &mut self.store {
            Store::Dense(slots) => *slots = Vec::new(),
            Store::Sparse(map) => *map = HashMap::new(),
        }
    }

    /// Live clusters in ascending index order.
    #[cfg(test)]
    pub fn live(&self) -> Vec<(u64, &UniverseNode)> {
        let mut live: Vec<(u64, &UniverseNode)> = match &self.store {
            Store::Dense(slots) => slots
                .iter()
                .enumerate()
                .filter_map(|(high, slot)| slot.as_deref().map(|node| (high as u64, node)))
                .collect(),
            Store::Sparse(map) => map.iter().map(|(&high, node)| (high, &**node)).collect(),
        };
        live.sort_by_key(|(high, _)| *high);
        live
    }

    #[cfg(test)]
    pub fn is_dense(&self) -> bool {
        matches!(self.store, Store::Dense(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_choice() {
        assert!(ClusterSlots::new(4).is_dense());
        assert!(ClusterSlots::new(DENSE_FANOUT_LIMIT).is_dense());
        assert!(!ClusterSlots::new(DENSE_FANOUT_LIMIT + 1).is_dense());
    }

    #[test]
    fn test_put_get_release_dense() {
        let mut slots = ClusterSlots::new(4);
        assert!(slots.get(2).is_none());

        slots.reserve().unwrap();
        slots.put(2, UniverseNode::new(4).unwrap());
        assert!(slots.get(2).is_some());
        assert!(slots.get(1).is_none());
        assert_eq!(slots.live().len(), 1);

        slots.release(2);
        assert!(slots.get(2).is_none());
        assert!(slots.live().is_empty());
    }

    #[test]
    fn test_put_get_release_sparse() {
        let mut slots = ClusterSlots::new(1 << 16);
        slots.reserve().unwrap();
        slots.put(40_000, UniverseNode::new(1 << 16).unwrap());
        assert!(slots.get(40_000).is_some());
        assert!(slots.get_mut(40_000).is_some());
        assert!(slots.get(39_999).is_none());

        slots.release(40_000);
        assert!(slots.get(40_000).is_none());
    }

    #[test]
    fn test_out_of_range_lookup() {
        let mut slots = ClusterSlots::new(4);
        slots.reserve().unwrap();
        assert!(slots.get(1_000).is_none());
        assert!(slots.get_mut(u64::MAX).is_none());
    }
}
