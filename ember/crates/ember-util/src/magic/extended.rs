//! Host-extensible magic string table.

use rustc_hash::FxHashMap;

use super::{MagicStringExId, MagicTable, MAX_MAGIC_STRING_SIZE};
use crate::error::{MagicTableError, MagicTableResult};
use crate::index_vec::{Idx, IndexVec};

/// Magic strings registered by the embedding host
///
/// Built once from an ordered list of byte strings, then immutable.
///
/// ```
/// use ember_util::magic::{ExtendedMagicStrings, MagicStringExId, MagicTable};
///
/// let table = ExtendedMagicStrings::new(["console", "log"]).unwrap();
/// assert_eq!(table.count(), 2);
/// assert_eq!(table.find_id(b"log"), Some(MagicStringExId(1)));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ExtendedMagicStrings {
    entries: IndexVec<MagicStringExId, Box<[u8]>>,
    index: FxHashMap<Box<[u8]>, MagicStringExId>,
}

impl ExtendedMagicStrings {
    /// An empty table
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from the host's ordered list
    ///
    /// Fails when the list has more entries than `MagicStringExId` can
    /// address or an entry exceeds [`MAX_MAGIC_STRING_SIZE`].
    pub fn new<I, S>(strings: I) -> MagicTableResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let mut entries: IndexVec<MagicStringExId, Box<[u8]>> = IndexVec::new();
        let mut index = FxHashMap::default();

        for string in strings {
            let bytes = string.as_ref();
            let position = entries.len();

            if position > MagicStringExId::MAX_INDEX {
                return Err(MagicTableError::TooManyEntries {
                    count: position + 1,
                    max: MagicStringExId::MAX_INDEX + 1,
                });
            }
            if bytes.len() > MAX_MAGIC_STRING_SIZE {
                return Err(MagicTableError::EntryTooLong {
                    id: position,
                    size: bytes.len(),
                    max: MAX_MAGIC_STRING_SIZE,
                });
            }

            let id = entries.push(bytes.into());
            // Duplicates keep the lowest id, same as a front-to-back scan
            index.entry(Box::from(bytes)).or_insert(id);
        }

        Ok(Self { entries, index })
    }

    /// Iterate `(id, bytes)` in id order
    pub fn iter(&self) -> impl Iterator<Item = (MagicStringExId, &[u8])> {
        self.entries
            .iter_enumerated()
            .map(|(id, bytes)| (id, bytes.as_ref()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl MagicTable for ExtendedMagicStrings {
    type Id = MagicStringExId;

    #[inline]
    fn count(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    fn bytes_of(&self, id: MagicStringExId) -> &[u8] {
        &self.entries[id]
    }

    #[inline]
    fn find_id(&self, bytes: &[u8]) -> Option<MagicStringExId> {
        self.index.get(bytes).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table() {
        let table = ExtendedMagicStrings::empty();
        assert_eq!(table.count(), 0);
        assert!(table.is_empty());
        assert_eq!(table.find_id(b""), None);
        assert_eq!(table.find_id_linear(b""), None);
    }

    #[test]
    fn test_ids_follow_host_order() {
        let table = ExtendedMagicStrings::new(["foo", "bar", "baz"]).unwrap();
        assert_eq!(table.find_id(b"foo"), Some(MagicStringExId(0)));
        assert_eq!(table.find_id(b"baz"), Some(MagicStringExId(2)));
        assert_eq!(table.size_of(MagicStringExId(1)), 3);
        assert_eq!(table.bytes_of(MagicStringExId(1)), b"bar");
    }

    #[test]
    fn test_duplicates_resolve_to_first_id() {
        let table = ExtendedMagicStrings::new(["dup", "other", "dup"]).unwrap();
        assert_eq!(table.count(), 3);
        assert_eq!(table.find_id(b"dup"), Some(MagicStringExId(0)));
        assert_eq!(table.find_id_linear(b"dup"), Some(MagicStringExId(0)));
    }

    #[test]
    fn test_accepts_raw_bytes() {
        let table = ExtendedMagicStrings::new([&[0xffu8, 0x00][..], &b"x"[..]]).unwrap();
        assert_eq!(table.find_id(&[0xff, 0x00]), Some(MagicStringExId(0)));
    }

    #[test]
    fn test_rejects_oversized_entry() {
        let huge = vec![b'a'; MAX_MAGIC_STRING_SIZE + 1];
        let err = ExtendedMagicStrings::new([huge]).unwrap_err();
        assert_eq!(
            err,
            MagicTableError::EntryTooLong {
                id: 0,
                size: MAX_MAGIC_STRING_SIZE + 1,
                max: MAX_MAGIC_STRING_SIZE,
            }
        );
    }

    #[test]
    fn test_rejects_too_many_entries() {
        let strings = (0..=MagicStringExId::MAX_INDEX + 1).map(|i| i.to_string());
        let err = ExtendedMagicStrings::new(strings).unwrap_err();
        assert!(matches!(err, MagicTableError::TooManyEntries { .. }));
    }

    #[test]
    fn test_iter_in_order() {
        let table = ExtendedMagicStrings::new(["a", "b"]).unwrap();
        let collected: Vec<_> = table.iter().collect();
        assert_eq!(
            collected,
            vec![(MagicStringExId(0), &b"a"[..]), (MagicStringExId(1), &b"b"[..])]
        );
    }
}
