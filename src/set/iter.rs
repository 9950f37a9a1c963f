//! Value iteration for OrderedSet.

use core::iter::FusedIterator;

use crate::codec::KeyCodec;
use crate::key::Value;
use crate::universe::Keys;

/// Iterator over set values in ascending order.
///
/// Values are decoded as the set's canonical tag (see
/// [`KeyCodec::canonical_tag`]), which is lossless for every stored key.
///
/// # Example
/// ```rust
/// use veb_set::{OrderedSet, Tag, Value};
///
/// let mut set = OrderedSet::with_tag(Tag::F64);
/// for v in [1.5, -2.0, 0.25] {
///     set.insert(v).unwrap();
/// }
/// let values: Vec<Value> = set.iter().collect();
/// assert_eq!(values, vec![Value::F64(-2.0), Value::F64(0.25), Value::F64(1.5)]);
/// ```
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    keys: Keys<'a>,
    codec: KeyCodec,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(keys: Keys<'a>, codec: KeyCodec) -> Self {
        Self { keys, codec }
    }
}

impl Iterator for Iter<'_> {
    type Item = Value;

    #[inline]
    fn next(&mut self) -> Option<Value> {
        self.keys
            .next()
            .map(|key| self.codec.decode_canonical(key))
    }
}

impl FusedIterator for Iter<'_> {}
