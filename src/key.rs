//! Order-preserving key encodings for i32, f32 and f64.

use core::fmt;

const SIGN_32: u32 = 1 << 31;
const SIGN_64: u64 = 1 << 63;

/// Type tag of a value stored in a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tag {
    /// Two's-complement 32-bit signed integer
    I32,
    /// IEEE-754 binary32
    F32,
    /// IEEE-754 binary64
    F64,
}

impl Tag {
    /// All supported tags, narrowest first.
    pub const ALL: [Tag; 3] = [Tag::I32, Tag::F32, Tag::F64];

    /// Native bit width of the tag.
    #[inline]
    pub const fn bits(self) -> u32 {
        match self {
            Tag::I32 | Tag::F32 => 32,
            Tag::F64 => 64,
        }
    }

    /// Number of distinct keys the tag's native encoding produces.
    #[inline]
    pub const fn universe(self) -> u128 {
        1 << self.bits()
    }

    #[inline]
    pub(crate) const fn mask(self) -> u8 {
        match self {
            Tag::I32 => 0b001,
            Tag::F32 => 0b010,
            Tag::F64 => 0b100,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tag::I32 => "i32",
            Tag::F32 => "f32",
            Tag::F64 => "f64",
        })
    }
}

/// A tagged numeric value.
///
/// NaN has no place in the numeric order; [`KeyCodec`](crate::KeyCodec)
/// rejects it with `NotANumber`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    I32(i32),
    F32(f32),
    F64(f64),
}

impl Value {
    /// Tag of this value.
    #[inline]
    pub const fn tag(&self) -> Tag {
        match self {
            Value::I32(_) => Tag::I32,
            Value::F32(_) => Tag::F32,
            Value::F64(_) => Tag::F64,
        }
    }

    /// Payload if this is an `I32`.
    pub fn as_i32(&self) -> Option<i32> {
        i32::from_value(*self)
    }

    /// Payload if this is an `F32`.
    pub fn as_f32(&self) -> Option<f32> {
        f32::from_value(*self)
    }

    /// Payload if this is an `F64`.
    pub fn as_f64(&self) -> Option<f64> {
        f64::from_value(*self)
    }

    /// True for f32/f64 NaN.
    #[inline]
    pub fn is_nan(&self) -> bool {
        match *self {
            Value::I32(_) => false,
            Value::F32(v) => v.is_nan(),
            Value::F64(v) => v.is_nan(),
        }
    }

    /// Exact widening to f64 (lossless for every tag).
    #[inline]
    pub fn widen(&self) -> f64 {
        match *self {
            Value::I32(v) => v.to_f64(),
            Value::F32(v) => v.to_f64(),
            Value::F64(v) => v,
        }
    }

    /// Key of this value in its tag's native width.
    #[inline]
    pub fn to_ordered(&self) -> u64 {
        match *self {
            Value::I32(v) => v.to_ordered(),
            Value::F32(v) => v.to_ordered(),
            Value::F64(v) => v.to_ordered(),
        }
    }

    /// Inverse of [`Value::to_ordered`] for the given tag.
    ///
    /// Bits above the tag's native width are ignored.
    #[inline]
    pub fn from_ordered(key: u64, tag: Tag) -> Value {
        match tag {
            Tag::I32 => Value::I32(i32::from_ordered(key)),
            Tag::F32 => Value::F32(f32::from_ordered(key)),
            Tag::F64 => Value::F64(f64::from_ordered(key)),
        }
    }

    /// Narrow an f64 into `tag`, if the conversion is exact.
    pub fn narrow(value: f64, tag: Tag) -> Option<Value> {
        match tag {
            Tag::I32 => i32::from_f64_exact(value).map(Value::I32),
            Tag::F32 => f32::from_f64_exact(value).map(Value::F32),
            Tag::F64 => Some(Value::F64(value)),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::I32(v) => write!(f, "{v}"),
            Value::F32(v) => write!(f, "{v}"),
            Value::F64(v) => write!(f, "{v}"),
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::I32(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::F32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::F64(v)
    }
}

/// Trait for native types with an order-preserving unsigned encoding.
///
/// Implemented for i32, f32 and f64. For any two non-NaN values of the
/// same type, `a < b` iff `a.to_ordered() < b.to_ordered()`, and
/// `from_ordered(to_ordered(v))` reproduces `v` bit for bit.
pub trait OrderedKey: Copy + PartialOrd + Into<Value> + Sized {
    /// Tag carried by values of this type.
    const TAG: Tag;

    /// Encode into an unsigned key of the type's native width
    /// (see [`Tag::bits`]).
    fn to_ordered(self) -> u64;

    /// Decode a key produced by [`OrderedKey::to_ordered`].
    fn from_ordered(key: u64) -> Self;

    /// Extract the payload of a value carrying [`OrderedKey::TAG`].
    fn from_value(value: Value) -> Option<Self>;

    /// Lossless widening to f64.
    fn to_f64(self) -> f64;

    /// Narrow from f64, `None` unless the round trip is exact.
    fn from_f64_exact(value: f64) -> Option<Self>;
}

impl OrderedKey for i32 {
    const TAG: Tag = Tag::I32;

    /// Bias by 2^31: flips the sign bit of the two's-complement pattern.
    #[inline(always)]
    fn to_ordered(self) -> u64 {
        ((self as u32) ^ SIGN_32) as u64
    }

    #[inline(always)]
    fn from_ordered(key: u64) -> Self {
        ((key as u32) ^ SIGN_32) as i32
    }

    #[inline]
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::I32(v) => Some(v),
            _ => None,
        }
    }

    #[inline(always)]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64_exact(value: f64) -> Option<Self> {
        if value < i32::MIN as f64 || value > i32::MAX as f64 {
            return None;
        }
        let narrowed = value as i32;
        (narrowed as f64 == value).then_some(narrowed)
    }
}

impl OrderedKey for f32 {
    const TAG: Tag = Tag::F32;

    /// Negative patterns are complemented, non-negative ones get the sign
    /// bit set.
    #[inline(always)]
    fn to_ordered(self) -> u64 {
        let bits = self.to_bits();
        let key = if bits & SIGN_32 != 0 {
            !bits
        } else {
            bits ^ SIGN_32
        };
        key as u64
    }

    #[inline(always)]
    fn from_ordered(key: u64) -> Self {
        let key = key as u32;
        let bits = if key & SIGN_32 != 0 {
            key ^ SIGN_32
        } else {
            !key
        };
        f32::from_bits(bits)
    }

    #[inline]
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::F32(v) => Some(v),
            _ => None,
        }
    }

    #[inline(always)]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64_exact(value: f64) -> Option<Self> {
        let narrowed = value as f32;
        (narrowed as f64 == value).then_some(narrowed)
    }
}

impl OrderedKey for f64 {
    const TAG: Tag = Tag::F64;

    #[inline(always)]
    fn to_ordered(self) -> u64 {
        let bits = self.to_bits();
        if bits & SIGN_64 != 0 {
            !bits
        } else {
            bits ^ SIGN_64
        }
    }

    #[inline(always)]
    fn from_ordered(key: u64) -> Self {
        let bits = if key & SIGN_64 != 0 {
            key ^ SIGN_64
        } else {
            !key
        };
        f64::from_bits(bits)
    }

    #[inline]
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::F64(v) => Some(v),
            _ => None,
        }
    }

    #[inline(always)]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline(always)]
    fn from_f64_exact(value: f64) -> Option<Self> {
        Some(value)
    }
}
