#![no_main]

use libfuzzer_sys::fuzz_target;
use xoid_lib::Oid;

fuzz_target!(|data: &[u8]| {
    // The parser must never panic, regardless of input.
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(Some(oid)) = Oid::parse(text) {
        // If parsing succeeds, exercise all accessors
        let _ = oid.hash_code();
        let _ = oid.as_str();
        let _ = oid.len();
        let _ = oid.aggregate_encoded_length();
        let _ = oid.segments();
        let _ = oid.parent().map(|p| oid.starts_with(p));
        let _ = oid.child(0);

        // Exercise display and JSON
        let _ = xoid_lib::display_text(&oid, true);
        let _ = xoid_lib::to_json(&oid);
    }

    // Every window of the input must either parse or fail cleanly.
    let half = text.len() / 2;
    let _ = Oid::parse_range(text, half, text.len() - half);
});
