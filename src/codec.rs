//! Mapping between tagged values and the unsigned key space of a set.

use core::fmt;

use crate::error::{Error, Result};
use crate::key::{OrderedKey, Tag, Value};

/// Set of tags a key space accepts.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TagSet(u8);

impl TagSet {
    /// No tags.
    pub const EMPTY: TagSet = TagSet(0);

    /// Every supported tag.
    pub const ALL: TagSet = TagSet(0b111);

    /// Set holding a single tag.
    #[inline]
    pub const fn only(tag: Tag) -> Self {
        TagSet(tag.mask())
    }

    /// Copy of this set with `tag` added.
    #[inline]
    pub const fn with(self, tag: Tag) -> Self {
        TagSet(self.0 | tag.mask())
    }

    #[inline]
    pub const fn contains(self, tag: Tag) -> bool {
        self.0 & tag.mask() != 0
    }

    #[inline]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Tags in the set, narrowest first.
    pub fn iter(self) -> impl Iterator<Item = Tag> {
        Tag::ALL.into_iter().filter(move |tag| self.contains(*tag))
    }
}

impl From<Tag> for TagSet {
    fn from(tag: Tag) -> Self {
        TagSet::only(tag)
    }
}

impl<const N: usize> From<[Tag; N]> for TagSet {
    fn from(tags: [Tag; N]) -> Self {
        tags.into_iter().collect()
    }
}

impl FromIterator<Tag> for TagSet {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        iter.into_iter().fold(TagSet::EMPTY, TagSet::with)
    }
}

impl fmt::Debug for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Layout of keys inside the universe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySpace {
    /// One tag, encoded in its native width.
    Narrow(Tag),
    /// Several tags, each widened exactly to f64 and encoded as f64, so
    /// values of different tags compare by numeric value.
    Shared,
}

impl KeySpace {
    /// Number of keys the space can produce.
    #[inline]
    pub const fn universe(self) -> u128 {
        match self {
            KeySpace::Narrow(tag) => tag.universe(),
            KeySpace::Shared => Tag::F64.universe(),
        }
    }
}

/// Bidirectional, order-preserving mapping between tagged values and
/// unsigned keys.
///
/// Stateless apart from the configured tag set: the same value always
/// encodes to the same key, and `a < b` iff `encode(a) < encode(b)` for
/// any values the codec accepts. NaN is never accepted.
///
/// # Example
/// ```rust
/// use veb_set::{KeyCodec, Tag, TagSet, Value};
///
/// let codec = KeyCodec::new(TagSet::ALL).unwrap();
/// let a = codec.encode(Value::I32(10)).unwrap();
/// let b = codec.encode(Value::F64(10.25)).unwrap();
/// let c = codec.encode(Value::F32(10.5)).unwrap();
/// assert!(a < b && b < c);
/// assert_eq!(codec.decode(b, Tag::F64).unwrap(), Value::F64(10.25));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCodec {
    tags: TagSet,
    space: KeySpace,
}

impl KeyCodec {
    /// Build a codec accepting `tags`.
    ///
    /// A single tag keeps its native width; two or more tags share the
    /// 64-bit f64 space.
    pub fn new(tags: impl Into<TagSet>) -> Result<Self> {
        let tags = tags.into();
        let mut configured = tags.iter();
        match (configured.next(), configured.next()) {
            (None, _) => Err(Error::EmptyTagSet),
            (Some(tag), None) => Ok(Self::narrow(tag)),
            _ => Ok(Self {
                tags,
                space: KeySpace::Shared,
            }),
        }
    }

    /// Codec for a single tag in its native width. Infallible.
    #[inline]
    pub const fn narrow(tag: Tag) -> Self {
        Self {
            tags: TagSet::only(tag),
            space: KeySpace::Narrow(tag),
        }
    }

    #[inline]
    pub fn tags(&self) -> TagSet {
        self.tags
    }

    #[inline]
    pub fn space(&self) -> KeySpace {
        self.space
    }

    /// Smallest universe holding every key this codec can produce.
    #[inline]
    pub fn universe(&self) -> u128 {
        self.space.universe()
    }

    /// Tag every stored key decodes to without loss.
    #[inline]
    pub fn canonical_tag(&self) -> Tag {
        match self.space {
            KeySpace::Narrow(tag) => tag,
            KeySpace::Shared => Tag::F64,
        }
    }

    /// Encode a value into its key.
    ///
    /// # Errors
    /// - `TypeMismatch` if the value's tag is not configured
    /// - `NotANumber` if the value is NaN
    #[inline]
    pub fn encode(&self, value: impl Into<Value>) -> Result<u64> {
        let value = value.into();
        let tag = value.tag();
        if !self.tags.contains(tag) {
            return Err(Error::type_mismatch(tag));
        }
        if value.is_nan() {
            return Err(Error::NotANumber { tag });
        }
        Ok(match self.space {
            KeySpace::Narrow(_) => value.to_ordered(),
            KeySpace::Shared => value.widen().to_ordered(),
        })
    }

    /// Decode a key as `tag`.
    ///
    /// # Errors
    /// `TypeMismatch` if `tag` is not configured, or (shared space only)
    /// if the key's value cannot be represented exactly as `tag`.
    #[inline]
    pub fn decode(&self, key: u64, tag: Tag) -> Result<Value> {
        if !self.tags.contains(tag) {
            return Err(Error::type_mismatch(tag));
        }
        match self.space {
            KeySpace::Narrow(_) => Ok(Value::from_ordered(key, tag)),
            KeySpace::Shared => {
                Value::narrow(f64::from_ordered(key), tag).ok_or(Error::type_mismatch(tag))
            }
        }
    }

    /// Decode a key as the canonical tag. Never fails.
    #[inline]
    pub fn decode_canonical(&self, key: u64) -> Value {
        match self.space {
            KeySpace::Narrow(tag) => Value::from_ordered(key, tag),
            KeySpace::Shared => Value::F64(f64::from_ordered(key)),
        }
    }
}
