//! The `Oid` value type.
//!
//! An `Oid` is a node in an immutable singly-linked chain: each node holds one
//! arc and a shared handle to its parent (the identifier with the last arc
//! removed). Identifiers that extend a common prefix share the prefix nodes,
//! so [`Oid::child`] is constant time and cloning is a reference-count bump.
//!
//! The hash code and the canonical string are computed on first use and
//! cached in write-once cells. Racing first computations produce the same
//! value, so whichever write wins is correct.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use num_bigint::BigUint;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::segment::Segment;
use crate::OidError;

/// An ASN.1 object identifier, such as `1.2.840.113549.1.1.11`.
#[derive(Clone)]
pub struct Oid(Arc<Node>);

struct Node {
    parent: Option<Oid>,
    segment: Segment,
    hash: OnceLock<i32>,
    string: OnceLock<String>,
}

impl Drop for Node {
    // Unlink uniquely owned ancestors one at a time so that dropping a very
    // long chain does not recurse once per arc.
    fn drop(&mut self) {
        let mut parent = self.parent.take();
        while let Some(Oid(arc)) = parent {
            match Arc::try_unwrap(arc) {
                Ok(mut node) => parent = node.parent.take(),
                Err(_) => break,
            }
        }
    }
}

/// Per-arc digit accumulator used by the parser.
enum Accumulator {
    /// No digit seen since the last `.` (or the start of input).
    Empty,
    Fixed(i64),
    /// Entered once the fixed-width value would overflow; never left for the
    /// rest of the arc.
    Big(BigUint),
}

impl Accumulator {
    fn push(self, digit: u32) -> Self {
        match self {
            Accumulator::Empty => Accumulator::Fixed(i64::from(digit)),
            Accumulator::Fixed(t) => match t
                .checked_mul(10)
                .and_then(|v| v.checked_add(i64::from(digit)))
            {
                Some(v) => Accumulator::Fixed(v),
                None => {
                    log::trace!("arc exceeds i64 after {}, switching to arbitrary precision", t);
                    Accumulator::Big(BigUint::from(t as u64) * 10u32 + digit)
                }
            },
            Accumulator::Big(b) => Accumulator::Big(b * 10u32 + digit),
        }
    }

    /// The finished arc in its narrowest variant, or `None` if no digit was
    /// consumed.
    fn commit(self) -> Option<Segment> {
        match self {
            Accumulator::Empty => None,
            Accumulator::Fixed(t) => Some(Segment::narrow(t)),
            Accumulator::Big(b) => Some(Segment::big(b)),
        }
    }
}

impl Oid {
    fn new(parent: Option<Oid>, segment: Segment) -> Self {
        Oid(Arc::new(Node {
            parent,
            segment,
            hash: OnceLock::new(),
            string: OnceLock::new(),
        }))
    }

    /// Parse a dotted-decimal identifier.
    ///
    /// Returns `Ok(None)` for the empty string.
    pub fn parse(text: &str) -> Result<Option<Oid>, OidError> {
        Self::parse_range(text, 0, text.len())
    }

    /// Parse the `len` bytes of `text` starting at byte `offset`.
    ///
    /// Error offsets are reported relative to the start of `text`, not the
    /// window. An empty window yields `Ok(None)`.
    pub fn parse_range(text: &str, offset: usize, len: usize) -> Result<Option<Oid>, OidError> {
        let window = offset
            .checked_add(len)
            .and_then(|end| text.get(offset..end))
            .ok_or(OidError::InvalidRange {
                offset,
                len,
                input_len: text.len(),
            })?;
        if window.is_empty() {
            return Ok(None);
        }

        let invalid = |ch: char, pos: usize| OidError::InvalidCharacter {
            ch,
            offset: offset + pos,
            input: text.to_string(),
        };

        let mut cur: Option<Oid> = None;
        let mut acc = Accumulator::Empty;
        for (pos, ch) in window.char_indices() {
            match ch {
                '0'..='9' => acc = acc.push(u32::from(ch) - u32::from('0')),
                '.' => {
                    let segment = acc.commit().ok_or_else(|| invalid(ch, pos))?;
                    cur = Some(Oid::new(cur, segment));
                    acc = Accumulator::Empty;
                }
                _ => return Err(invalid(ch, pos)),
            }
        }

        // An empty accumulator here means the window ended with '.'.
        match acc.commit() {
            Some(segment) => Ok(Some(Oid::new(cur, segment))),
            None => Err(invalid('.', window.len() - 1)),
        }
    }

    /// The identifier with `id` appended as a new compact arc.
    pub fn child(&self, id: i32) -> Result<Oid, OidError> {
        if id < 0 {
            return Err(OidError::InvalidChildId(id));
        }
        Ok(Oid::new(Some(self.clone()), Segment::narrow(i64::from(id))))
    }

    /// The identifier with the last arc removed, or `None` for a single-arc
    /// identifier.
    pub fn parent(&self) -> Option<&Oid> {
        self.0.parent.as_ref()
    }

    /// The last arc of this identifier.
    pub fn segment(&self) -> &Segment {
        &self.0.segment
    }

    pub fn is_root(&self) -> bool {
        self.0.parent.is_none()
    }

    /// Number of arcs. Never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.ancestors().count()
    }

    /// Iterate from this identifier up through each parent to the root.
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors { next: Some(self) }
    }

    /// All arcs, root first.
    pub fn segments(&self) -> Vec<&Segment> {
        let mut out: Vec<&Segment> = self.ancestors().map(Oid::segment).collect();
        out.reverse();
        out
    }

    /// True if `prefix` equals this identifier or one of its ancestors.
    pub fn starts_with(&self, prefix: &Oid) -> bool {
        let depth = self.len();
        let prefix_len = prefix.len();
        if prefix_len > depth {
            return false;
        }
        self.ancestors()
            .nth(depth - prefix_len)
            .is_some_and(|node| node == prefix)
    }

    /// Sum of the minimal encoded lengths of every arc, root to leaf.
    ///
    /// This is the content length a BER/DER encoder needs before applying
    /// the combined first-two-arcs rule; no bytes are produced here.
    pub fn aggregate_encoded_length(&self) -> usize {
        self.ancestors()
            .map(|node| node.segment().minimal_encoded_length())
            .sum()
    }

    /// 32-bit structural hash, folded root to leaf as `h = 17 * h + arc_hash`.
    pub fn hash_code(&self) -> i32 {
        if let Some(h) = self.0.hash.get() {
            return *h;
        }

        // Walk up to the nearest ancestor with a cached hash, then fold back
        // down, caching each node on the way.
        let mut pending = Vec::new();
        let mut base = 0i32;
        let mut cur = Some(self);
        while let Some(node) = cur {
            if let Some(h) = node.0.hash.get() {
                base = *h;
                break;
            }
            pending.push(node);
            cur = node.parent();
        }

        let mut h = base;
        for node in pending.iter().rev() {
            h = h.wrapping_mul(17).wrapping_add(node.segment().segment_hash());
            let _ = node.0.hash.set(h);
        }
        h
    }

    /// The canonical dotted-decimal form.
    pub fn as_str(&self) -> &str {
        if let Some(s) = self.0.string.get() {
            return s;
        }

        let mut pending = Vec::new();
        let mut prefix = "";
        let mut cur = Some(self);
        while let Some(node) = cur {
            if let Some(s) = node.0.string.get() {
                prefix = s.as_str();
                break;
            }
            pending.push(node);
            cur = node.parent();
        }

        let mut buf = String::from(prefix);
        for node in pending.iter().rev() {
            if !buf.is_empty() {
                buf.push('.');
            }
            node.segment().append_decimal(&mut buf);
        }
        self.0.string.get_or_init(|| buf)
    }
}

/// Iterator returned by [`Oid::ancestors`].
pub struct Ancestors<'a> {
    next: Option<&'a Oid>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a Oid;

    fn next(&mut self) -> Option<Self::Item> {
        let cur = self.next?;
        self.next = cur.parent();
        Some(cur)
    }
}

impl PartialEq for Oid {
    fn eq(&self, other: &Oid) -> bool {
        if Arc::ptr_eq(&self.0, &other.0) {
            return true;
        }
        if self.hash_code() != other.hash_code() {
            return false;
        }
        let (mut a, mut b) = (self, other);
        loop {
            if !a.segment().segment_eq(b.segment()) {
                return false;
            }
            match (a.parent(), b.parent()) {
                (None, None) => return true,
                (Some(pa), Some(pb)) => {
                    // A shared ancestor means the remaining prefix is identical.
                    if Arc::ptr_eq(&pa.0, &pb.0) {
                        return true;
                    }
                    a = pa;
                    b = pb;
                }
                _ => return false,
            }
        }
    }
}

impl Eq for Oid {}

impl Hash for Oid {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Oid").field(&self.as_str()).finish()
    }
}

impl FromStr for Oid {
    type Err = OidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Oid::parse(s)?.ok_or(OidError::Empty)
    }
}

impl Serialize for Oid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Oid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
