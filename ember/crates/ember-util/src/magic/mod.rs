//! Magic string tables - pre-registered constant strings addressed by id.
//!
//! Two tables exist:
//!
//! - [`BuiltinMagicStrings`]: the engine vocabulary, fixed at build time.
//! - [`ExtendedMagicStrings`]: an ordered list of byte strings supplied by
//!   the embedding host once, before the literal store is used. May be empty.
//!
//! Both are read-only after construction and implement [`MagicTable`].
//!
//! # Lookup
//!
//! Each table keeps a content index so `find_id` is a single hash probe.
//! The result is identical to the reference scan (`find_id_linear`): the
//! lowest id whose bytes match wins.
//!
//! ```
//! use ember_util::magic::{BuiltinMagicStrings, MagicTable, MAGIC_LENGTH};
//!
//! let table = BuiltinMagicStrings;
//! assert_eq!(table.find_id(b"length"), Some(MAGIC_LENGTH));
//! assert_eq!(table.bytes_of(MAGIC_LENGTH), b"length");
//! assert_eq!(table.find_id(b"no such name"), None);
//! ```

mod builtin;
mod extended;

pub use builtin::*;
pub use extended::ExtendedMagicStrings;

use crate::index_vec::Idx;

crate::define_idx!(MagicStringId, u16);
crate::define_idx!(MagicStringExId, u16);

static_assertions::assert_eq_size!(MagicStringId, u16);
static_assertions::assert_eq_size!(MagicStringExId, u16);

/// Largest byte size of a single magic string entry
pub const MAX_MAGIC_STRING_SIZE: usize = u16::MAX as usize;

/// Read-only table of magic strings
pub trait MagicTable {
    /// Id type addressing this table
    type Id: Idx;

    /// Number of entries; valid ids are `0..count()`
    fn count(&self) -> usize;

    /// Content of entry `id`
    ///
    /// # Panics
    ///
    /// Panics if `id` is not below `count()`.
    fn bytes_of(&self, id: Self::Id) -> &[u8];

    /// Byte size of entry `id`
    #[inline]
    fn size_of(&self, id: Self::Id) -> usize {
        self.bytes_of(id).len()
    }

    /// Lowest id whose content equals `bytes`
    fn find_id(&self, bytes: &[u8]) -> Option<Self::Id>;

    /// Reference lookup: scan ids in order, size first, then bytes
    fn find_id_linear(&self, bytes: &[u8]) -> Option<Self::Id> {
        (0..self.count())
            .map(Self::Id::from_usize)
            .find(|&id| self.equals(id, bytes))
    }

    /// Whether entry `id` holds exactly `bytes`
    #[inline]
    fn equals(&self, id: Self::Id, bytes: &[u8]) -> bool {
        self.size_of(id) == bytes.len() && self.bytes_of(id) == bytes
    }
}
