//! # SHA-256 Content Hashing
//!
//! One-shot digests over raw bytes and over canonical key-sorted JSON,
//! plus the leading-hex-zero difficulty predicate used by the
//! proof-of-work target check.
//!
//! Digests travel through the system as lowercase hex strings. The
//! genesis predecessor is the literal `"0"`, which is why the string
//! form (not a fixed byte array) is the working representation.

use serde_json::Value;
use sha2::{Digest, Sha256};

/// SHA-256 over raw bytes, rendered as lowercase hex (one-shot).
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Canonical key-sorted JSON encoding of a value.
///
/// `serde_json::Map` is BTreeMap-backed, so object keys serialize in
/// sorted order at every nesting level. Equal values produce
/// byte-identical encodings.
pub fn canonical_json(value: &Value) -> String {
    value.to_string()
}

/// SHA-256 over the canonical JSON encoding of a value.
pub fn canonical_sha256_hex(value: &Value) -> String {
    sha256_hex(canonical_json(value).as_bytes())
}

/// Number of leading `'0'` characters in a hex digest.
pub fn leading_hex_zeros(hash: &str) -> u32 {
    hash.bytes().take_while(|b| *b == b'0').count() as u32
}

/// True iff the digest begins with at least `difficulty` hex zeros.
pub fn meets_difficulty(hash: &str, difficulty: u32) -> bool {
    leading_hex_zeros(hash) >= difficulty
}
