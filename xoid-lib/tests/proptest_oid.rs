#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::panic,
    clippy::indexing_slicing
)]
//! Property-based tests for parsing, rendering, equality and hashing.

use num_bigint::BigUint;
use proptest::prelude::*;
use xoid_lib::*;

// Strategy for one canonical arc: no leading zeros, any magnitude
fn arb_arc() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..1000).prop_map(|v| v.to_string()),
        any::<u64>().prop_map(|v| v.to_string()),
        "[1-9][0-9]{18,40}",
    ]
}

fn arb_arcs() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_arc(), 1..10)
}

fn parse(text: &str) -> Oid {
    Oid::parse(text).unwrap().unwrap()
}

proptest! {
    #[test]
    fn roundtrip(arcs in arb_arcs()) {
        let text = arcs.join(".");
        let oid = parse(&text);
        prop_assert_eq!(oid.as_str(), text.as_str());
        prop_assert_eq!(oid.len(), arcs.len());
    }

    #[test]
    fn equality_matches_arcs(a in arb_arcs(), b in arb_arcs()) {
        let oa = parse(&a.join("."));
        let ob = parse(&b.join("."));
        prop_assert_eq!(oa == ob, a == b);
        if oa == ob {
            prop_assert_eq!(oa.hash_code(), ob.hash_code());
        }
    }

    #[test]
    fn reparse_is_equal(arcs in arb_arcs()) {
        let text = arcs.join(".");
        let a = parse(&text);
        let b = parse(a.as_str());
        prop_assert_eq!(a.hash_code(), b.hash_code());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn encoded_length_matches_bits(arcs in arb_arcs()) {
        let oid = parse(&arcs.join("."));
        let expected: usize = arcs
            .iter()
            .map(|a| {
                let bits = a.parse::<BigUint>().unwrap().bits() as usize;
                bits.div_ceil(7).max(1)
            })
            .sum();
        prop_assert_eq!(oid.aggregate_encoded_length(), expected);
    }

    #[test]
    fn child_extends_string(arcs in arb_arcs(), id in 0i32..=i32::MAX) {
        let base = parse(&arcs.join("."));
        let child = base.child(id).unwrap();
        prop_assert_eq!(child.to_string(), format!("{}.{}", base, id));
        prop_assert!(child.starts_with(&base));
        prop_assert_eq!(child.parent(), Some(&base));
    }

    #[test]
    fn garbage_never_panics(text in "[0-9.a ]{0,20}") {
        let _ = Oid::parse(&text);
    }
}
