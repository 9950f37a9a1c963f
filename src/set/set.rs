//! OrderedSet: tagged numeric values over a van Emde Boas universe.

use core::ops::{Bound, RangeBounds};

use crate::codec::{KeyCodec, TagSet};
use crate::error::Result;
use crate::key::{Tag, Value};
use crate::set::Iter;
use crate::universe::{round_universe, UniverseNode};

/// Ordered set of i32, f32 and f64 values.
///
/// Values are encoded by a [`KeyCodec`] into unsigned keys and stored in
/// a single [`UniverseNode`], so membership, insert, remove, successor
/// and predecessor all run in O(log log U).
///
/// # Key Spaces
/// - one tag: keys use the tag's native width (2^32 keys for i32/f32,
///   2^64 for f64)
/// - several tags: every value is widened to f64, so an `I32(10)` sorts
///   between `F64(9.5)` and `F32(10.5)`
///
/// # Example
/// ```rust
/// use veb_set::{OrderedSet, Tag, Value};
///
/// let mut set = OrderedSet::new(16, Tag::I32).unwrap();
/// for v in [5, 2, 8, 15] {
///     set.insert(v).unwrap();
/// }
/// assert_eq!(set.successor(2).unwrap(), Some(Value::I32(5)));
/// assert_eq!(set.predecessor(15).unwrap(), Some(Value::I32(8)));
///
/// set.remove(5).unwrap();
/// assert!(!set.contains(5).unwrap());
/// assert_eq!(set.successor(2).unwrap(), Some(Value::I32(8)));
/// ```
#[derive(Debug)]
pub struct OrderedSet {
    /// Value <-> key mapping
    codec: KeyCodec,

    /// Root of the tree, covering every key the codec produces
    root: UniverseNode,

    /// Number of stored values
    len: usize,
}

impl OrderedSet {
    /// Create an empty set.
    ///
    /// The universe is `universe_hint` rounded up to the next `2^(2^k)`,
    /// raised if needed to cover every key `tags` can produce.
    ///
    /// # Errors
    /// - `EmptyTagSet` if `tags` is empty
    /// - `UniverseExhausted` if `universe_hint` exceeds 2^64
    pub fn new(universe_hint: u128, tags: impl Into<TagSet>) -> Result<Self> {
        let codec = KeyCodec::new(tags)?;
        let size = round_universe(universe_hint)?.max(codec.universe());
        Ok(Self::from_parts(codec, UniverseNode::new(size)?))
    }

    /// Create an empty set for a single tag.
    pub fn with_tag(tag: Tag) -> Self {
        let codec = KeyCodec::narrow(tag);
        Self::from_parts(codec, UniverseNode::with_size(codec.universe()))
    }

    fn from_parts(codec: KeyCodec, root: UniverseNode) -> Self {
        tracing::debug!(
            size = %root.size(),
            space = ?codec.space(),
            "created ordered set"
        );
        Self {
            codec,
            root,
            len: 0,
        }
    }

    /// Insert a value.
    ///
    /// # Returns
    /// * `Ok(true)` if the value was newly inserted
    /// * `Ok(false)` if it was already present
    ///
    /// # Errors
    /// - `TypeMismatch` if the value's tag is not configured
    /// - `NotANumber` if the value is NaN
    /// - `AllocationFailure` if cluster storage cannot grow
    pub fn insert(&mut self, value: impl Into<Value>) -> Result<bool> {
        let key = self.codec.encode(value)?;
        let inserted = self.root.insert(key)?;
        if inserted {
            self.len += 1;
        }
        Ok(inserted)
    }

    /// Check whether a value is present.
    pub fn contains(&self, value: impl Into<Value>) -> Result<bool> {
        let key = self.codec.encode(value)?;
        self.root.contains(key)
    }

    /// Remove a value.
    ///
    /// # Returns
    /// * `Ok(true)` if the value was removed
    /// * `Ok(false)` if it was absent
    pub fn remove(&mut self, value: impl Into<Value>) -> Result<bool> {
        let key = self.codec.encode(value)?;
        let removed = self.root.remove(key)?;
        if removed {
            self.len -= 1;
        }
        Ok(removed)
    }

    /// Smallest stored value strictly greater than `value`, decoded with
    /// `value`'s tag.
    ///
    /// # Errors
    /// `TypeMismatch` if the tag is not configured, or if the successor
    /// cannot be represented exactly as that tag (shared key space only).
    pub fn successor(&self, value: impl Into<Value>) -> Result<Option<Value>> {
        let value = value.into();
        let key = self.codec.encode(value)?;
        self.root
            .successor(key)?
            .map(|next| self.codec.decode(next, value.tag()))
            .transpose()
    }

    /// Largest stored value strictly smaller than `value`, decoded with
    /// `value`'s tag.
    ///
    /// # Errors
    /// Same as [`OrderedSet::successor`].
    pub fn predecessor(&self, value: impl Into<Value>) -> Result<Option<Value>> {
        let value = value.into();
        let key = self.codec.encode(value)?;
        self.root
            .predecessor(key)?
            .map(|prev| self.codec.decode(prev, value.tag()))
            .transpose()
    }

    /// Smallest value, as the canonical tag. O(1).
    #[inline]
    pub fn min(&self) -> Option<Value> {
        self.root.min().map(|key| self.codec.decode_canonical(key))
    }

    /// Largest value, as the canonical tag. O(1).
    #[inline]
    pub fn max(&self) -> Option<Value> {
        self.root.max().map(|key| self.codec.decode_canonical(key))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Remove every value.
    pub fn clear(&mut self) {
        self.root.clear();
        self.len = 0;
    }

    /// Number of keys the root universe covers.
    #[inline]
    pub fn universe_size(&self) -> u128 {
        self.root.size()
    }

    #[inline]
    pub fn codec(&self) -> &KeyCodec {
        &self.codec
    }

    /// Values in ascending order, as the canonical tag.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self.root.keys(), self.codec)
    }

    /// Values within `range`, ascending, as the canonical tag.
    ///
    /// # Errors
    /// `TypeMismatch` if a bound's tag is not configured.
    ///
    /// # Example
    /// ```rust
    /// use veb_set::{OrderedSet, Tag, Value};
    ///
    /// let mut set = OrderedSet::with_tag(Tag::F64);
    /// for v in [5.5, 2.3, 8.7, 15.2] {
    ///     set.insert(v).unwrap();
    /// }
    /// let mid: Vec<Value> = set.range(2.3..10.0).unwrap().collect();
    /// assert_eq!(mid, vec![Value::F64(2.3), Value::F64(5.5), Value::F64(8.7)]);
    /// ```
    pub fn range<V, R>(&self, range: R) -> Result<Iter<'_>>
    where
        V: Into<Value> + Copy,
        R: RangeBounds<V>,
    {
        let start = self.encode_bound(range.start_bound())?;
        let end = self.encode_bound(range.end_bound())?;
        Ok(Iter::new(self.root.range((start, end)), self.codec))
    }

    fn encode_bound<V: Into<Value> + Copy>(&self, bound: Bound<&V>) -> Result<Bound<u64>> {
        Ok(match bound {
            Bound::Included(&v) => Bound::Included(self.codec.encode(v)?),
            Bound::Excluded(&v) => Bound::Excluded(self.codec.encode(v)?),
            Bound::Unbounded => Bound::Unbounded,
        })
    }
}

impl<'a> IntoIterator for &'a OrderedSet {
    type Item = Value;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
