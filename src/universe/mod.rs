//! Recursive van Emde Boas universe nodes.

mod clusters;
mod iter;
#[allow(clippy::module_inception)]
mod node;

use crate::constants::{CLEAN_UNIVERSES, MAX_UNIVERSE};
use crate::error::{Error, Result};

pub(crate) use clusters::ClusterSlots;
pub use iter::Keys;
pub use node::UniverseNode;

/// Round a requested universe size up to the next `2^(2^k)`.
///
/// Those sizes split into exact square roots at every level down to the
/// base case, so `high`/`low` become plain bit slices of the key.
///
/// # Errors
/// `UniverseExhausted` if `hint` exceeds 2^64.
pub fn round_universe(hint: u128) -> Result<u128> {
    CLEAN_UNIVERSES
        .iter()
        .copied()
        .find(|&size| size >= hint)
        .ok_or(Error::UniverseExhausted {
            key: hint,
            size: MAX_UNIVERSE,
        })
}

/// Exact `ceil(sqrt(n))` for `n <= 2^64`.
#[inline]
pub(crate) fn ceil_sqrt(n: u128) -> u64 {
    let root = n.isqrt();
    let root = if root * root < n { root + 1 } else { root };
    root as u64
}
