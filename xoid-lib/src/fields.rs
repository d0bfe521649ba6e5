//! Descriptive views of an OID for display and JSON output.

use serde::Serialize;

use crate::known;
use crate::Oid;

/// A parsed OID with its per-arc breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct OidInfo {
    /// Canonical dotted-decimal form.
    pub oid: Oid,
    /// Well-known name, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'static str>,
    /// Number of arcs.
    pub depth: usize,
    /// Arcs, root first.
    pub arcs: Vec<ArcInfo>,
    /// Sum of the per-arc minimal encoded lengths.
    pub encoded_length: usize,
    /// Structural hash code.
    pub hash: i32,
}

/// One arc of an [`OidInfo`].
#[derive(Debug, Clone, Serialize)]
pub struct ArcInfo {
    /// Decimal value. Kept as a string because big arcs exceed JSON numbers.
    pub value: String,
    /// Representation: "compact", "wide" or "big".
    pub variant: &'static str,
    /// Base-128 groups needed for this arc.
    pub encoded_length: usize,
}

impl OidInfo {
    pub fn is_known(&self) -> bool {
        self.name.is_some()
    }

    /// `name (oid)` when the OID has a well-known name, else just the OID.
    pub fn label(&self) -> String {
        match self.name {
            Some(name) => format!("{} ({})", name, self.oid),
            None => self.oid.to_string(),
        }
    }
}

/// Build the descriptive view of `oid`.
pub fn describe(oid: &Oid) -> OidInfo {
    let arcs = oid
        .segments()
        .into_iter()
        .map(|segment| ArcInfo {
            value: segment.to_string(),
            variant: segment.variant_name(),
            encoded_length: segment.minimal_encoded_length(),
        })
        .collect();

    OidInfo {
        oid: oid.clone(),
        name: known::short_name(oid),
        depth: oid.len(),
        arcs,
        encoded_length: oid.aggregate_encoded_length(),
        hash: oid.hash_code(),
    }
}
