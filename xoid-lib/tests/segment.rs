#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::panic,
    clippy::indexing_slicing
)]
//! Segment variants: selection, equality, hashing and encoded length.

use num_bigint::BigUint;
use xoid_lib::*;

fn big(text: &str) -> BigUint {
    text.parse().unwrap()
}

fn seg(value: i64) -> Segment {
    Segment::from_i64(value).unwrap()
}

// =========================================================================
// Variant selection
// =========================================================================

#[test]
fn narrowest_variant_is_chosen() {
    assert_eq!(seg(0).variant_name(), "compact");
    assert_eq!(seg(i64::from(i32::MAX)).variant_name(), "compact");
    assert_eq!(seg(i64::from(i32::MAX) + 1).variant_name(), "wide");
    assert_eq!(seg(i64::MAX).variant_name(), "wide");
    assert_eq!(seg(i64::MAX).as_i64(), Some(i64::MAX));

    assert_eq!(Segment::from_big(BigUint::from(5u32)), seg(5));
    assert_eq!(Segment::from_big(BigUint::from(1u64 << 40)), seg(1 << 40));
    let over = BigUint::from(i64::MAX as u64) + 1u32;
    let over_seg = Segment::from_big(over.clone());
    assert_eq!(over_seg.variant_name(), "big");
    assert_eq!(over_seg.as_i64(), None);
    assert_eq!(over_seg.to_biguint(), over);
}

#[test]
fn negative_values_rejected() {
    assert!(matches!(Segment::from_i64(-1), Err(OidError::NegativeSegment(-1))));
    assert!(matches!(Segment::compact(-3), Err(OidError::NegativeSegment(-3))));
    assert!(matches!(
        Segment::wide_unnarrowed(-3),
        Err(OidError::NegativeSegment(-3))
    ));
    assert!(matches!(
        Segment::from_i64(i64::MIN),
        Err(OidError::NegativeSegment(i64::MIN))
    ));
    assert_eq!(Segment::compact(7).unwrap(), seg(7));
}

// =========================================================================
// Equality
// =========================================================================

#[test]
fn same_variant_same_value() {
    assert!(seg(5).segment_eq(&seg(5)));
    assert!(!seg(5).segment_eq(&seg(6)));
    assert!(seg(1 << 40).segment_eq(&seg(1 << 40)));
    assert!(Segment::from_big(big("99999999999999999999"))
        .segment_eq(&Segment::from_big(big("99999999999999999999"))));
}

/// Numerically equal values held in different variants are unequal. Parsing
/// and child-append never build such a pair, because both always pick the
/// narrowest variant; this pins the rule for segments built without
/// narrowing.
#[test]
fn cross_variant_never_equal() {
    let compact = seg(5);
    let wide = Segment::wide_unnarrowed(5).unwrap();
    let big = Segment::big_unnarrowed(BigUint::from(5u32));
    assert_eq!(wide.variant_name(), "wide");
    assert_eq!(big.variant_name(), "big");

    assert!(!compact.segment_eq(&wide));
    assert!(!wide.segment_eq(&compact));
    assert!(!compact.segment_eq(&big));
    assert!(!big.segment_eq(&wide));
    assert_ne!(seg(0), Segment::wide_unnarrowed(0).unwrap());

    // Same decimal rendering despite being unequal
    assert_eq!(compact.to_string(), wide.to_string());
    assert_eq!(wide.to_string(), big.to_string());
}

// =========================================================================
// Hashing
// =========================================================================

#[test]
fn segment_hash_values() {
    assert_eq!(seg(0).segment_hash(), 0);
    assert_eq!(seg(840).segment_hash(), 840);
    // Halves xor-folded: high word 0
    assert_eq!(seg(3_000_000_000).segment_hash(), -1_294_967_296);
    // High word 1, low word 1
    assert_eq!(seg((1 << 32) | 1).segment_hash(), 0);
    // 2^64 has big-endian words [1, 0, 0]
    assert_eq!(
        Segment::from_big(BigUint::from(1u32) << 64usize).segment_hash(),
        31 * 31
    );
}

// =========================================================================
// Encoded length
// =========================================================================

#[test]
fn zero_takes_one_group() {
    assert_eq!(seg(0).minimal_encoded_length(), 1);
    assert_eq!(seg(0).bit_length(), 0);
}

#[test]
fn group_boundaries() {
    let cases: &[(i64, usize)] = &[
        (1, 1),
        (127, 1),
        (128, 2),
        (16_383, 2),
        (16_384, 3),
        (i64::from(i32::MAX), 5),
        (i64::from(i32::MAX) + 1, 5),
        (1 << 35, 6),
        (i64::MAX, 9),
    ];
    for &(value, expected) in cases {
        assert_eq!(seg(value).minimal_encoded_length(), expected, "value {}", value);
    }

    let min_big = Segment::from_big(BigUint::from(i64::MAX as u64) + 1u32);
    assert_eq!(min_big.minimal_encoded_length(), 10);
    let huge = Segment::from_big(BigUint::from(1u32) << 700usize);
    assert_eq!(huge.minimal_encoded_length(), 101);
}

// =========================================================================
// Rendering
// =========================================================================

#[test]
fn append_decimal_and_display() {
    let mut buf = String::from("1.");
    seg(9_223_372_036_854_775_807).append_decimal(&mut buf);
    assert_eq!(buf, "1.9223372036854775807");

    let value = "123456789012345678901234567890";
    assert_eq!(Segment::from_big(big(value)).to_string(), value);
    assert_eq!(format!("{:?}", seg(3)), "compact(3)");
    assert_eq!(seg(1 << 40).to_biguint(), BigUint::from(1u64 << 40));
}
