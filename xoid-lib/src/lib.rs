//! xoid-lib: Immutable ASN.1 object identifier values.
//!
//! Parses dotted-decimal OIDs such as `1.2.840.113549.1.1.11` into a shared,
//! immutable chain with structural equality and hashing, so they can be used
//! as map keys by certificate and algorithm registries. Each arc is stored in
//! the narrowest of three widths and reports the number of base-128 groups an
//! encoder would need for it. No encoded bytes are produced here.

pub mod known;

mod display;
mod fields;
mod oid;
mod segment;

pub use display::{display_text, to_json};
pub use fields::{describe, ArcInfo, OidInfo};
pub use oid::{Ancestors, Oid};
pub use segment::Segment;

/// Errors returned by xoid-lib.
#[derive(Debug, thiserror::Error)]
pub enum OidError {
    #[error("Invalid OID character '{ch}' at offset {offset} in \"{input}\"")]
    InvalidCharacter {
        ch: char,
        offset: usize,
        input: String,
    },

    #[error("Invalid OID child id {0}")]
    InvalidChildId(i32),

    #[error("Invalid range {offset}+{len} for input of length {input_len}")]
    InvalidRange {
        offset: usize,
        len: usize,
        input_len: usize,
    },

    #[error("Negative OID segment value {0}")]
    NegativeSegment(i64),

    #[error("Empty OID")]
    Empty,

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
