#![no_main]

use libfuzzer_sys::fuzz_target;
use xoid_lib::Oid;

fuzz_target!(|arcs: Vec<u64>| {
    if arcs.is_empty() {
        return;
    }
    let text = arcs
        .iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join(".");

    // Canonical input must render back unchanged
    let oid = match Oid::parse(&text) {
        Ok(Some(oid)) => oid,
        other => panic!("failed to parse {:?}: {:?}", text, other),
    };
    assert_eq!(oid.as_str(), text, "string mismatch after roundtrip");
    assert_eq!(oid.len(), arcs.len());

    // Reparsing the rendered form must give an equal OID with the same hash
    let again: Oid = oid.as_str().parse().expect("reparse");
    assert_eq!(oid, again);
    assert_eq!(oid.hash_code(), again.hash_code());
});
