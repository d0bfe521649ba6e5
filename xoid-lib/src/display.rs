//! Human-readable and JSON formatting of OID information.

use crate::fields::{describe, OidInfo};
use crate::{Oid, OidError};

/// Format OID information as human-readable text.
///
/// If `show_all` is true, includes the per-arc breakdown and hash code.
pub fn display_text(oid: &Oid, show_all: bool) -> String {
    let info = describe(oid);
    let mut out = String::new();

    out.push_str("OID:\n");
    out.push_str(&format!("  Value: {}\n", info.oid));
    if let Some(name) = info.name {
        out.push_str(&format!("  Name: {}\n", name));
    }
    out.push_str(&format!("  Arcs: {}\n", info.depth));
    out.push_str(&format!("  Encoded Length: {} bytes\n", info.encoded_length));

    if let Some(parent) = oid.parent() {
        out.push_str(&format!("  Parent: {}\n", parent));
    }

    if show_all {
        out.push_str(&format!("  Hash: {:#010x}\n", info.hash));
        format_arcs(&mut out, &info);
    }

    out
}

fn format_arcs(out: &mut String, info: &OidInfo) {
    out.push_str("  Arc Breakdown:\n");
    for (i, arc) in info.arcs.iter().enumerate() {
        out.push_str(&format!(
            "    [{}] {} ({}, {} byte{})\n",
            i,
            arc.value,
            arc.variant,
            arc.encoded_length,
            if arc.encoded_length == 1 { "" } else { "s" }
        ));
    }
}

/// Serialize OID information to a pretty-printed JSON string.
pub fn to_json(oid: &Oid) -> Result<String, OidError> {
    serde_json::to_string_pretty(&describe(oid)).map_err(OidError::Json)
}
