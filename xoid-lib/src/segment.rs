//! Single OID arc values in one of three widths.
//!
//! A segment is stored in the narrowest representation that can hold it:
//! `Compact` for values up to `i32::MAX`, `Wide` for values up to `i64::MAX`,
//! and `Big` beyond that. Equality is variant-strict: a `Compact(5)` and a
//! `Wide(5)` are different segments. Constructors always pick the narrowest
//! variant, so two parsed identifiers never disagree on the variant for the
//! same value.

use std::fmt;

use num_bigint::BigUint;
use num_traits::ToPrimitive;

use crate::OidError;

/// Bits carried by one base-128 group of a BER/DER encoded arc.
const BITS_PER_GROUP: u64 = 7;

/// One non-negative arc of an object identifier.
///
/// The representation is private; every constructor rejects negative values
/// and, apart from the hidden unnarrowed constructors, picks the narrowest
/// variant.
#[derive(Clone, PartialEq, Eq)]
pub struct Segment(Repr);

#[derive(Clone, PartialEq, Eq)]
enum Repr {
    /// Value in `0..=i32::MAX`.
    Compact(i32),
    /// Value in `i32::MAX + 1..=i64::MAX`.
    Wide(i64),
    /// Value above `i64::MAX`.
    Big(BigUint),
}

impl Segment {
    /// Build a compact segment from a non-negative `i32`.
    pub fn compact(value: i32) -> Result<Self, OidError> {
        if value < 0 {
            return Err(OidError::NegativeSegment(i64::from(value)));
        }
        Ok(Segment(Repr::Compact(value)))
    }

    /// Pick the narrowest variant for a non-negative `i64`.
    pub fn from_i64(value: i64) -> Result<Self, OidError> {
        if value < 0 {
            return Err(OidError::NegativeSegment(value));
        }
        Ok(Self::narrow(value))
    }

    /// Pick the narrowest variant for an arbitrary-precision value.
    pub fn from_big(value: BigUint) -> Self {
        match value.to_i64() {
            Some(v) => Self::narrow(v),
            None => Segment(Repr::Big(value)),
        }
    }

    /// Caller guarantees `value >= 0`.
    pub(crate) fn narrow(value: i64) -> Self {
        match i32::try_from(value) {
            Ok(v) => Segment(Repr::Compact(v)),
            Err(_) => Segment(Repr::Wide(value)),
        }
    }

    /// Caller guarantees `value > i64::MAX`.
    pub(crate) fn big(value: BigUint) -> Self {
        Segment(Repr::Big(value))
    }

    /// A non-negative value held as `Wide` even if it would fit `Compact`.
    #[doc(hidden)]
    pub fn wide_unnarrowed(value: i64) -> Result<Self, OidError> {
        if value < 0 {
            return Err(OidError::NegativeSegment(value));
        }
        Ok(Segment(Repr::Wide(value)))
    }

    /// A value held as `Big` even if it would fit a narrower variant.
    #[doc(hidden)]
    pub fn big_unnarrowed(value: BigUint) -> Self {
        Segment(Repr::Big(value))
    }

    /// The value as an `i64`, unless it is too large.
    pub fn as_i64(&self) -> Option<i64> {
        match &self.0 {
            Repr::Compact(v) => Some(i64::from(*v)),
            Repr::Wide(v) => Some(*v),
            Repr::Big(_) => None,
        }
    }

    /// Segment equality: same variant and same value.
    ///
    /// Values that coincide numerically but live in different variants are
    /// not equal.
    pub fn segment_eq(&self, other: &Segment) -> bool {
        match (&self.0, &other.0) {
            (Repr::Compact(a), Repr::Compact(b)) => a == b,
            (Repr::Wide(a), Repr::Wide(b)) => a == b,
            (Repr::Big(a), Repr::Big(b)) => a == b,
            _ => false,
        }
    }

    /// 32-bit hash of the held value.
    ///
    /// * `Compact`: the value itself.
    /// * `Wide`: the two 32-bit halves xor-folded together.
    /// * `Big`: `h = 31 * h + word` over the big-endian 32-bit magnitude words.
    pub fn segment_hash(&self) -> i32 {
        match &self.0 {
            Repr::Compact(v) => *v,
            Repr::Wide(v) => {
                let bits = *v as u64;
                (bits ^ (bits >> 32)) as i32
            }
            Repr::Big(v) => v
                .to_u32_digits()
                .iter()
                .rev()
                .fold(0i32, |h, word| h.wrapping_mul(31).wrapping_add(*word as i32)),
        }
    }

    /// Number of significant bits in the value (0 for zero).
    pub fn bit_length(&self) -> u64 {
        match &self.0 {
            Repr::Compact(v) => u64::from(u32::BITS - (*v as u32).leading_zeros()),
            Repr::Wide(v) => u64::from(u64::BITS - (*v as u64).leading_zeros()),
            Repr::Big(v) => v.bits(),
        }
    }

    /// Fewest base-128 groups needed to encode this value. Zero still takes
    /// one group.
    pub fn minimal_encoded_length(&self) -> usize {
        let groups = self.bit_length().div_ceil(BITS_PER_GROUP).max(1);
        usize::try_from(groups).unwrap_or(usize::MAX)
    }

    /// Append the canonical decimal digits of this value to `buf`.
    pub fn append_decimal(&self, buf: &mut String) {
        use std::fmt::Write;
        // Writing into a String cannot fail.
        let _ = match &self.0 {
            Repr::Compact(v) => write!(buf, "{}", v),
            Repr::Wide(v) => write!(buf, "{}", v),
            Repr::Big(v) => write!(buf, "{}", v),
        };
    }

    /// Short label for the representation, used in diagnostics.
    pub fn variant_name(&self) -> &'static str {
        match &self.0 {
            Repr::Compact(_) => "compact",
            Repr::Wide(_) => "wide",
            Repr::Big(_) => "big",
        }
    }

    /// The value widened to arbitrary precision.
    pub fn to_biguint(&self) -> BigUint {
        match &self.0 {
            Repr::Compact(v) => BigUint::from(*v as u32),
            Repr::Wide(v) => BigUint::from(*v as u64),
            Repr::Big(v) => v.clone(),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Repr::Compact(v) => write!(f, "{}", v),
            Repr::Wide(v) => write!(f, "{}", v),
            Repr::Big(v) => write!(f, "{}", v),
        }
    }
}

impl fmt::Debug for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.variant_name(), self)
    }
}
