//! Compressed pointers - 16-bit handles onto arena cells.
//!
//! A [`CellId`] names a cell by its linear position in the arena
//! (`pool * cells_per_pool + slot`). A [`CompressedPointer`] packs a cell id
//! into 16 bits with zero reserved for "no cell":
//!
//! ```text
//!   CellId:             0     1     2    ...  65534
//!   CompressedPointer:  1     2     3    ...  65535      NULL = 0
//! ```
//!
//! Compression is total over every cell the allocator hands out and
//! decompression is its exact inverse, so cells can be linked by compressed
//! pointer and identified by compressed value.

use serde::{Deserialize, Serialize};

use ember_util::define_idx;
use ember_util::index_vec::Idx;

define_idx!(CellId, u32);

/// A cell id packed into [`CompressedPointer::WIDTH`] bits
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct CompressedPointer(u16);

static_assertions::assert_eq_size!(CompressedPointer, u16);

impl CompressedPointer {
    /// Refers to no cell
    pub const NULL: Self = Self(0);

    /// Bit width of the packed value
    pub const WIDTH: u32 = u16::BITS;

    /// Number of distinct cells a compressed pointer can refer to
    pub const MAX_CELLS: usize = u16::MAX as usize;

    /// Pack a cell id
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `cell` is not below [`Self::MAX_CELLS`];
    /// the allocator never hands out such a cell.
    #[inline]
    pub fn compress(cell: CellId) -> Self {
        debug_assert!(
            cell.index() < Self::MAX_CELLS,
            "cell {} is not addressable by a compressed pointer",
            cell.0
        );
        Self((cell.0 + 1) as u16)
    }

    /// Recover the cell id, `None` for [`Self::NULL`]
    #[inline]
    pub fn decompress(self) -> Option<CellId> {
        match self.0 {
            0 => None,
            raw => Some(CellId(u32::from(raw) - 1)),
        }
    }

    #[inline]
    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Packed value as stored in records
    #[inline]
    pub fn to_raw(self) -> u16 {
        self.0
    }

    /// Reinterpret a packed value
    #[inline]
    pub fn from_raw(raw: u16) -> Self {
        Self(raw)
    }
}

impl From<CellId> for CompressedPointer {
    #[inline]
    fn from(cell: CellId) -> Self {
        Self::compress(cell)
    }
}

impl std::fmt::Display for CompressedPointer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.decompress() {
            Some(cell) => write!(f, "cp:{}", cell.0),
            None => write!(f, "cp:null"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_null_decompresses_to_none() {
        assert_eq!(CompressedPointer::NULL.decompress(), None);
        assert!(CompressedPointer::NULL.is_null());
        assert_eq!(CompressedPointer::default(), CompressedPointer::NULL);
    }

    #[test]
    fn test_first_and_last_cell() {
        let first = CompressedPointer::compress(CellId(0));
        assert!(!first.is_null());
        assert_eq!(first.to_raw(), 1);
        assert_eq!(first.decompress(), Some(CellId(0)));

        let last = CellId((CompressedPointer::MAX_CELLS - 1) as u32);
        let cp = CompressedPointer::compress(last);
        assert_eq!(cp.to_raw(), u16::MAX);
        assert_eq!(cp.decompress(), Some(last));
    }

    #[test]
    fn test_display() {
        assert_eq!(CompressedPointer::NULL.to_string(), "cp:null");
        assert_eq!(CompressedPointer::from(CellId(41)).to_string(), "cp:41");
    }

    #[quickcheck]
    fn prop_compress_round_trips(raw: u16) -> bool {
        let cell = CellId(u32::from(raw % u16::MAX));
        CompressedPointer::compress(cell).decompress() == Some(cell)
    }

    #[quickcheck]
    fn prop_raw_round_trips(raw: u16) -> bool {
        CompressedPointer::from_raw(raw).to_raw() == raw
    }
}
