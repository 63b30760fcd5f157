//! Literal records.
//!
//! A literal is one of a closed set of variants. Records live in pool cells
//! and are chained by compressed pointer, newest first:
//!
//! ```text
//! head ──► [ next │ Charset "bar" ] ──► [ next │ Number 3 ] ──► [ NULL │ MagicStringExt 0 ]
//! ```

use std::fmt;

use serde::Serialize;

use ember_mem::{CellId, CompressedPointer};
use ember_util::{utf16_length, utf8_string_hash, LitStringHash, MagicStringExId, MagicStringId};

/// In-memory reference to a stored literal
///
/// Valid until the store is finalized. Convert to a [`CompressedPointer`]
/// with [`LiteralStorage::to_compressed`] for long-term storage in bytecode.
///
/// [`LiteralStorage::to_compressed`]: crate::LiteralStorage::to_compressed
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LiteralId(pub(crate) CellId);

impl LiteralId {
    /// Arena cell holding the record
    #[inline]
    pub fn cell(self) -> CellId {
        self.0
    }
}

impl fmt::Display for LiteralId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lit#{}", self.0 .0)
    }
}

/// Variant tag of a [`Literal`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LiteralKind {
    Charset,
    MagicString,
    MagicStringExt,
    Number,
    Free,
}

impl LiteralKind {
    /// Whether literals of this kind hold string content
    #[inline]
    pub fn is_string(self) -> bool {
        matches!(
            self,
            LiteralKind::Charset | LiteralKind::MagicString | LiteralKind::MagicStringExt
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LiteralKind::Charset => "charset",
            LiteralKind::MagicString => "magic string",
            LiteralKind::MagicStringExt => "magic string ex",
            LiteralKind::Number => "number",
            LiteralKind::Free => "free",
        }
    }
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A stored literal
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    /// Arbitrary byte string not found in either magic table
    Charset {
        /// Content hash, checked before comparing bytes
        hash: LitStringHash,
        /// UTF-16 code units the bytes decode to
        length: usize,
        bytes: Box<[u8]>,
    },

    /// Entry of the built-in magic string table
    MagicString(MagicStringId),

    /// Entry of the host magic string table
    MagicStringExt(MagicStringExId),

    Number(f64),

    /// Placeholder left by bytecode post-processing
    ///
    /// Neither a string nor a number: compares unequal to everything.
    Free { size: usize },
}

impl Literal {
    /// Charset literal with hash and code-unit length precomputed
    pub fn charset(bytes: &[u8]) -> Self {
        Literal::Charset {
            hash: utf8_string_hash(bytes),
            length: utf16_length(bytes),
            bytes: bytes.into(),
        }
    }

    pub fn kind(&self) -> LiteralKind {
        match self {
            Literal::Charset { .. } => LiteralKind::Charset,
            Literal::MagicString(_) => LiteralKind::MagicString,
            Literal::MagicStringExt(_) => LiteralKind::MagicStringExt,
            Literal::Number(_) => LiteralKind::Number,
            Literal::Free { .. } => LiteralKind::Free,
        }
    }
}

/// A literal as stored in a pool cell
#[derive(Clone, Debug, PartialEq)]
pub struct LiteralRecord {
    pub(crate) next: CompressedPointer,
    pub(crate) literal: Literal,
}

impl LiteralRecord {
    /// Next older record, `NULL` at the tail
    #[inline]
    pub fn next(&self) -> CompressedPointer {
        self.next
    }

    #[inline]
    pub fn literal(&self) -> &Literal {
        &self.literal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charset_precomputes_fields() {
        let lit = Literal::charset("héllo".as_bytes());
        match lit {
            Literal::Charset {
                hash,
                length,
                ref bytes,
            } => {
                assert_eq!(bytes.len(), 6);
                assert_eq!(length, 5);
                assert_eq!(hash, utf8_string_hash("héllo".as_bytes()));
            },
            other => panic!("expected charset, got {:?}", other),
        }
    }

    #[test]
    fn test_kinds() {
        assert_eq!(Literal::charset(b"x").kind(), LiteralKind::Charset);
        assert_eq!(Literal::Number(1.0).kind(), LiteralKind::Number);
        assert_eq!(Literal::Free { size: 4 }.kind(), LiteralKind::Free);
        assert!(LiteralKind::MagicStringExt.is_string());
        assert!(!LiteralKind::Number.is_string());
        assert!(!LiteralKind::Free.is_string());
    }

    #[test]
    fn test_display() {
        assert_eq!(LiteralKind::MagicString.to_string(), "magic string");
        assert_eq!(LiteralId(CellId(12)).to_string(), "lit#12");
    }
}
