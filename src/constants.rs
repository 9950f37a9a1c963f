//! Core constants for veb-set.

/// Value of `min` in an empty node.
///
/// Emptiness is encoded as `min > max`, so the pair
/// `(EMPTY_MIN, EMPTY_MAX)` never collides with a stored key and every
/// `u64`, including `u64::MAX`, stays storable.
pub const EMPTY_MIN: u64 = u64::MAX;

/// Value of `max` in an empty node.
pub const EMPTY_MAX: u64 = 0;

/// Largest universe a node can cover (keys are `u64`).
pub const MAX_UNIVERSE: u128 = 1 << 64;

/// Universe size at which recursion stops.
///
/// Nodes of this size (or smaller) have no summary and no clusters;
/// `min`/`max` alone describe membership.
pub const BASE_UNIVERSE: u128 = 2;

/// Largest cluster fan-out stored as a dense slot array.
///
/// Nodes with more clusters than this keep them in a sparse map so that
/// a 2^64 root does not pay for 2^32 empty slots.
pub const DENSE_FANOUT_LIMIT: u64 = 256;

/// Universe sizes whose square roots are exact all the way down to the
/// base case: 2^(2^k) for k = 0..=6.
pub const CLEAN_UNIVERSES: [u128; 7] = [2, 4, 16, 256, 1 << 16, 1 << 32, 1 << 64];
