//! Byte-string helpers for literal content.
//!
//! Literal bytes come straight from the front end and are treated as
//! CESU-8/UTF-8 sequences. Nothing here validates the encoding; malformed
//! input still hashes and counts deterministically.

use std::hash::Hasher;

use rustc_hash::FxHasher;

/// Precomputed content hash stored in charset literals
///
/// Only used as a cheap reject before a byte comparison, so 16 bits are
/// plenty and keep the record small.
pub type LitStringHash = u16;

/// Hash a byte string
///
/// Deterministic for the process lifetime: equal byte strings always hash
/// equal, which the literal store relies on for its early reject.
#[inline]
pub fn utf8_string_hash(bytes: &[u8]) -> LitStringHash {
    let mut hasher = FxHasher::default();
    hasher.write(bytes);
    hasher.write_usize(bytes.len());
    let h = hasher.finish();
    (h ^ (h >> 16) ^ (h >> 32) ^ (h >> 48)) as LitStringHash
}

/// Number of UTF-16 code units the byte string decodes to
///
/// Every lead byte counts one unit, four-byte sequences count two
/// (a surrogate pair). Continuation bytes count nothing.
pub fn utf16_length(bytes: &[u8]) -> usize {
    bytes
        .iter()
        .map(|&b| match b {
            0x80..=0xBF => 0,
            0xF0..=0xFF => 2,
            _ => 1,
        })
        .sum()
}
