//! Error types for veb-set

use crate::key::Tag;
use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = core::result::Result<T, Error>;

/// Errors surfaced by set and node operations.
///
/// Duplicate inserts and removal of absent keys are not errors; they
/// report `false` instead.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Key (or requested universe) does not fit in `[0, size)`
    #[error("key {key} is outside universe [0, {size})")]
    UniverseExhausted { key: u128, size: u128 },

    /// Value tag is not part of the key space, or a key cannot be
    /// decoded exactly as the requested tag
    #[error("type mismatch: {tag} is not representable in this key space")]
    TypeMismatch { tag: Tag },

    /// Cluster slot storage could not grow
    #[error("allocation failure while reserving {slots} cluster slots")]
    AllocationFailure { slots: usize },

    /// Universe size outside `1..=2^64`
    #[error("invalid universe size {size}")]
    InvalidUniverse { size: u128 },

    /// Key space configured without any tag
    #[error("tag set is empty")]
    EmptyTagSet,

    /// Float value is NaN and has no position in the key order
    #[error("NaN {tag} value cannot be stored")]
    NotANumber { tag: Tag },
}

impl Error {
    /// Create a universe exhausted error
    pub fn universe_exhausted(key: impl Into<u128>, size: u128) -> Self {
        Error::UniverseExhausted {
            key: key.into(),
            size,
        }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(tag: Tag) -> Self {
        Error::TypeMismatch { tag }
    }

    /// True for caller precondition violations, false for resource errors.
    pub fn is_precondition(&self) -> bool {
        !matches!(self, Error::AllocationFailure { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_display() {
        let err = Error::universe_exhausted(20u64, 16);
        assert_eq!(err.to_string(), "key 20 is outside universe [0, 16)");

        let err = Error::type_mismatch(Tag::I32);
        assert_eq!(
            err.to_string(),
            "type mismatch: i32 is not representable in this key space"
        );

        let err = Error::NotANumber { tag: Tag::F32 };
        assert_eq!(err.to_string(), "NaN f32 value cannot be stored");
    }

    #[test]
    fn test_is_precondition() {
        assert!(Error::EmptyTagSet.is_precondition());
        assert!(Error::type_mismatch(Tag::F32).is_precondition());
        assert!(Error::NotANumber { tag: Tag::F64 }.is_precondition());
        assert!(!Error::AllocationFailure { slots: 4 }.is_precondition());
    }
}
