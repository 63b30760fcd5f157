//! Literal Store - interning of string and number constants
//!
//! Every string or numeric constant the front end meets is turned into a
//! small handle here. Strings that name a magic string are stored as a
//! table id; everything else is copied into a charset record.
//!
//! ```text
//! create_from_bytes(b"length")
//!     │
//!     ├─► built-in table hit?  ── yes ──► MagicString(MAGIC_LENGTH)
//!     ├─► extended table hit?  ── yes ──► MagicStringExt(id)
//!     └─► Charset { hash, length, bytes }
//! ```
//!
//! Records are prepended to a list threaded through the pool cells, so a
//! lookup walks from the newest record to the oldest and the first match
//! wins. Creation never deduplicates; callers who want one record per value
//! use the `find_or_create_*` operations.
//!
//! # Lifecycle
//!
//! [`LiteralStorage::new`] → [`LiteralStorage::init`] → operations →
//! [`LiteralStorage::finalize`]. Using the store outside the active state
//! panics. Dropping an active store finalizes it.

use std::fmt;

use ember_mem::{CellId, CompressedPointer, PoolAllocator, PoolStats};
use ember_util::{
    utf8_string_hash, BuiltinMagicStrings, ExtendedMagicStrings, LitStringHash, MagicStringExId,
    MagicStringId, MagicTable,
};

use crate::config::StoreConfig;
use crate::error::{LiteralError, Result};
use crate::number::{EcmaNumberFormat, NumberFormat, MAX_NUMBER_STRING_SIZE};
use crate::record::{Literal, LiteralId, LiteralKind, LiteralRecord};

/// Lifecycle state of a [`LiteralStorage`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreState {
    Uninitialized,
    Active,
    TornDown,
}

impl fmt::Display for StoreState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StoreState::Uninitialized => "uninitialized",
            StoreState::Active => "active",
            StoreState::TornDown => "torn down",
        })
    }
}

/// The literal store
///
/// ```
/// use ember_lit::{LiteralKind, LiteralStorage};
/// use ember_util::ExtendedMagicStrings;
///
/// let mut store = LiteralStorage::with_defaults();
/// store.init(ExtendedMagicStrings::empty()).unwrap();
///
/// let length = store.find_or_create_from_bytes(b"length");
/// assert_eq!(store.kind(length), LiteralKind::MagicString);
///
/// let three = store.create_from_number(3.0);
/// assert!(store.equal_to_bytes(three, b"3"));
/// ```
pub struct LiteralStorage<F: NumberFormat = EcmaNumberFormat> {
    config: StoreConfig,
    format: F,
    state: StoreState,
    pools: PoolAllocator<LiteralRecord>,
    head: CompressedPointer,
    len: usize,
    builtin: BuiltinMagicStrings,
    extended: ExtendedMagicStrings,
}

impl LiteralStorage<EcmaNumberFormat> {
    /// Uninitialized store with the default configuration and number format
    pub fn with_defaults() -> Self {
        match Self::new(StoreConfig::default(), EcmaNumberFormat) {
            Ok(store) => store,
            Err(err) => unreachable!("default store config rejected: {}", err),
        }
    }
}

impl<F: NumberFormat> LiteralStorage<F> {
    /// Uninitialized store
    pub fn new(config: StoreConfig, format: F) -> Result<Self> {
        config.validate()?;
        let pools = PoolAllocator::new(config.pool.clone())?;
        Ok(Self {
            config,
            format,
            state: StoreState::Uninitialized,
            pools,
            head: CompressedPointer::NULL,
            len: 0,
            builtin: BuiltinMagicStrings,
            extended: ExtendedMagicStrings::empty(),
        })
    }

    /// Register the host's magic strings and activate the store
    pub fn init(&mut self, extended: ExtendedMagicStrings) -> Result<()> {
        if self.state != StoreState::Uninitialized {
            return Err(LiteralError::InvalidState {
                expected: StoreState::Uninitialized,
                actual: self.state,
            });
        }

        log::debug!(
            "literal store init: {} built-in, {} extended magic strings",
            self.builtin.count(),
            extended.count()
        );
        self.extended = extended;
        self.state = StoreState::Active;
        Ok(())
    }

    /// [`init`](Self::init) from the host's ordered list of strings
    pub fn init_with_strings<I, S>(&mut self, strings: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let extended = ExtendedMagicStrings::new(strings)?;
        self.init(extended)
    }

    /// Release every record and tear the store down
    ///
    /// # Panics
    ///
    /// Panics if the store is not active.
    pub fn finalize(&mut self) {
        self.assert_active();

        #[cfg(feature = "dump")]
        if self.config.dump_on_finalize {
            self.log_dump();
        }

        let released = self.len;
        let mut cursor = self.head;
        while let Some(cell) = cursor.decompress() {
            cursor = self.pools.free(cell).next;
        }
        self.head = CompressedPointer::NULL;
        self.len = 0;

        self.pools.collect_empty();
        let outstanding = self.pools.finalize();
        debug_assert_eq!(outstanding, 0, "literal cells outside the record list");

        log::debug!("literal store finalized: {} records released", released);
        self.state = StoreState::TornDown;
    }

    pub fn state(&self) -> StoreState {
        self.state
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The host magic string table registered at init
    pub fn extended_magic_strings(&self) -> &ExtendedMagicStrings {
        &self.extended
    }

    // ========================================================================
    // CREATION & LOOKUP
    // ========================================================================

    /// Store a string literal
    ///
    /// Magic strings resolve to their table id, built-in table first. Does
    /// not look for an existing record with the same content.
    pub fn create_from_bytes(&mut self, bytes: &[u8]) -> LiteralId {
        self.assert_active();

        if let Some(id) = self.builtin.find_id(bytes) {
            return self.push(Literal::MagicString(id));
        }
        if let Some(id) = self.extended.find_id(bytes) {
            return self.push(Literal::MagicStringExt(id));
        }
        self.push(Literal::charset(bytes))
    }

    /// Newest string literal whose content equals `bytes`
    ///
    /// Number literals are never returned, even if their textual form
    /// matches.
    pub fn find_by_bytes(&self, bytes: &[u8]) -> Option<LiteralId> {
        self.assert_active();

        let hash = utf8_string_hash(bytes);
        self.iter()
            .find(|(_, literal)| self.matches_string(literal, bytes, hash))
            .map(|(id, _)| id)
    }

    pub fn find_or_create_from_bytes(&mut self, bytes: &[u8]) -> LiteralId {
        match self.find_by_bytes(bytes) {
            Some(id) => id,
            None => self.create_from_bytes(bytes),
        }
    }

    /// Store a number literal
    pub fn create_from_number(&mut self, num: f64) -> LiteralId {
        self.assert_active();
        self.push(Literal::Number(num))
    }

    /// Newest number literal equal to `num` under `==`
    ///
    /// NaN is never found and `0.0` finds `-0.0` (and the reverse).
    pub fn find_by_number(&self, num: f64) -> Option<LiteralId> {
        self.assert_active();

        self.iter()
            .find(|(_, literal)| matches!(literal, Literal::Number(n) if *n == num))
            .map(|(id, _)| id)
    }

    pub fn find_or_create_from_number(&mut self, num: f64) -> LiteralId {
        match self.find_by_number(num) {
            Some(id) => id,
            None => self.create_from_number(num),
        }
    }

    fn push(&mut self, literal: Literal) -> LiteralId {
        let kind = literal.kind();
        let cell = self.pools.alloc(LiteralRecord {
            next: self.head,
            literal,
        });
        self.head = CompressedPointer::compress(cell);
        self.len += 1;

        log::trace!("literal {} created ({})", cell.0, kind);
        LiteralId(cell)
    }

    /// Size first for magic strings, hash then size for charsets
    fn matches_string(&self, literal: &Literal, bytes: &[u8], hash: LitStringHash) -> bool {
        match literal {
            Literal::Charset {
                hash: stored,
                bytes: content,
                ..
            } => *stored == hash && content.len() == bytes.len() && **content == *bytes,
            Literal::MagicString(id) => self.builtin.equals(*id, bytes),
            Literal::MagicStringExt(id) => self.extended.equals(*id, bytes),
            Literal::Number(_) | Literal::Free { .. } => false,
        }
    }

    // ========================================================================
    // EQUALITY
    // ========================================================================

    /// Whether the literal's textual form is `bytes`
    ///
    /// Numbers compare by their canonical string, so the number `3` equals
    /// `b"3"`. A free literal equals nothing.
    pub fn equal_to_bytes(&self, id: LiteralId, bytes: &[u8]) -> bool {
        self.text_equals(self.get(id), bytes)
    }

    /// Whether the literal's textual form is the canonical form of `num`
    pub fn equal_to_number(&self, id: LiteralId, num: f64) -> bool {
        let mut buf = [0u8; MAX_NUMBER_STRING_SIZE];
        let text = self.format_number(num, &mut buf);
        self.equal_to_bytes(id, text)
    }

    /// Whether two literals have the same textual form, regardless of kind
    ///
    /// A string literal `"3"` equals the number literal `3`.
    pub fn equal(&self, a: LiteralId, b: LiteralId) -> bool {
        let lit_a = self.get(a);
        match self.get(b) {
            Literal::Charset { bytes, .. } => self.text_equals(lit_a, bytes),
            Literal::MagicString(id) => self.text_equals(lit_a, self.builtin.bytes_of(*id)),
            Literal::MagicStringExt(id) => self.text_equals(lit_a, self.extended.bytes_of(*id)),
            Literal::Number(num) => {
                let mut buf = [0u8; MAX_NUMBER_STRING_SIZE];
                let text = self.format_number(*num, &mut buf);
                self.text_equals(lit_a, text)
            },
            Literal::Free { .. } => false,
        }
    }

    /// [`equal`](Self::equal), but literals of different kinds never match
    pub fn equal_same_type(&self, a: LiteralId, b: LiteralId) -> bool {
        let kind = self.kind(a);
        kind == self.kind(b) && kind != LiteralKind::Free && self.equal(a, b)
    }

    /// [`equal_to_bytes`](Self::equal_to_bytes) restricted to string literals
    pub fn equal_typed_bytes(&self, id: LiteralId, bytes: &[u8]) -> bool {
        self.kind(id).is_string() && self.equal_to_bytes(id, bytes)
    }

    pub fn equal_typed_str(&self, id: LiteralId, text: &str) -> bool {
        self.equal_typed_bytes(id, text.as_bytes())
    }

    /// [`equal_to_number`](Self::equal_to_number) restricted to number literals
    pub fn equal_typed_number(&self, id: LiteralId, num: f64) -> bool {
        self.kind(id) == LiteralKind::Number && self.equal_to_number(id, num)
    }

    fn text_equals(&self, literal: &Literal, bytes: &[u8]) -> bool {
        match literal {
            Literal::Charset { bytes: content, .. } => **content == *bytes,
            Literal::MagicString(id) => self.builtin.equals(*id, bytes),
            Literal::MagicStringExt(id) => self.extended.equals(*id, bytes),
            Literal::Number(num) => {
                let mut buf = [0u8; MAX_NUMBER_STRING_SIZE];
                self.format_number(*num, &mut buf) == bytes
            },
            Literal::Free { .. } => false,
        }
    }

    fn format_number<'b>(&self, num: f64, buf: &'b mut [u8; MAX_NUMBER_STRING_SIZE]) -> &'b [u8] {
        let len = self.format.format(num, buf);
        &buf[..len]
    }

    // ========================================================================
    // HANDLES
    // ========================================================================

    /// Long-term handle for a literal
    #[inline]
    pub fn to_compressed(&self, id: LiteralId) -> CompressedPointer {
        CompressedPointer::compress(id.0)
    }

    /// Resolve a long-term handle
    ///
    /// # Panics
    ///
    /// Panics if `cp` is null or does not refer to a stored literal. Debug
    /// builds also check that the record is on the literal list.
    pub fn handle_from_compressed(&self, cp: CompressedPointer) -> LiteralId {
        self.assert_active();

        let Some(cell) = cp.decompress() else {
            panic!("null compressed pointer does not refer to a literal");
        };
        assert!(
            self.pools.is_live(cell),
            "{} does not refer to a stored literal",
            cp
        );
        let id = LiteralId(cell);
        debug_assert!(self.contains(id), "{} is not on the literal list", cp);
        id
    }

    /// Arena address of the record
    #[inline]
    pub fn address_of(&self, id: LiteralId) -> CellId {
        id.0
    }

    /// Whether `id` is reachable from the list head
    pub fn contains(&self, id: LiteralId) -> bool {
        self.iter().any(|(stored, _)| stored == id)
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// The stored literal
    ///
    /// # Panics
    ///
    /// Panics if the store is not active or `id` is stale.
    pub fn get(&self, id: LiteralId) -> &Literal {
        self.assert_active();
        match self.pools.get(id.0) {
            Some(record) => &record.literal,
            None => panic!("stale literal handle {}", id),
        }
    }

    #[inline]
    pub fn kind(&self, id: LiteralId) -> LiteralKind {
        self.get(id).kind()
    }

    /// Byte size of a charset literal
    pub fn charset_size(&self, id: LiteralId) -> usize {
        self.charset_bytes(id).len()
    }

    /// UTF-16 code units of a charset literal
    pub fn charset_length(&self, id: LiteralId) -> usize {
        match self.get(id) {
            Literal::Charset { length, .. } => *length,
            other => wrong_kind(id, other, LiteralKind::Charset),
        }
    }

    pub fn charset_hash(&self, id: LiteralId) -> LitStringHash {
        match self.get(id) {
            Literal::Charset { hash, .. } => *hash,
            other => wrong_kind(id, other, LiteralKind::Charset),
        }
    }

    pub fn charset_bytes(&self, id: LiteralId) -> &[u8] {
        match self.get(id) {
            Literal::Charset { bytes, .. } => bytes,
            other => wrong_kind(id, other, LiteralKind::Charset),
        }
    }

    pub fn number_value(&self, id: LiteralId) -> f64 {
        match self.get(id) {
            Literal::Number(num) => *num,
            other => wrong_kind(id, other, LiteralKind::Number),
        }
    }

    pub fn magic_string_id(&self, id: LiteralId) -> MagicStringId {
        match self.get(id) {
            Literal::MagicString(magic) => *magic,
            other => wrong_kind(id, other, LiteralKind::MagicString),
        }
    }

    pub fn magic_string_ex_id(&self, id: LiteralId) -> MagicStringExId {
        match self.get(id) {
            Literal::MagicStringExt(magic) => *magic,
            other => wrong_kind(id, other, LiteralKind::MagicStringExt),
        }
    }

    /// Number of stored literals
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Literals from newest to oldest
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            pools: &self.pools,
            cursor: self.head,
            remaining: self.len,
        }
    }

    // ========================================================================
    // MEMORY
    // ========================================================================

    /// Hand empty pools back to the heap
    pub fn collect_empty(&mut self) -> usize {
        self.pools.collect_empty()
    }

    pub fn pool_stats(&self) -> PoolStats {
        self.pools.stats()
    }

    /// Placeholder record as left by bytecode post-processing
    #[cfg(test)]
    pub(crate) fn create_free_literal(&mut self, size: usize) -> LiteralId {
        self.assert_active();
        self.push(Literal::Free { size })
    }

    #[inline]
    fn assert_active(&self) {
        assert!(
            self.state == StoreState::Active,
            "literal store is {}, expected {}",
            self.state,
            StoreState::Active
        );
    }
}

impl<F: NumberFormat> Drop for LiteralStorage<F> {
    fn drop(&mut self) {
        if self.state == StoreState::Active {
            self.finalize();
        }
    }
}

impl<F: NumberFormat> fmt::Debug for LiteralStorage<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiteralStorage")
            .field("state", &self.state)
            .field("len", &self.len)
            .field("head", &self.head)
            .field("pools", &self.pools)
            .finish()
    }
}

#[cold]
fn wrong_kind(id: LiteralId, literal: &Literal, expected: LiteralKind) -> ! {
    panic!(
        "literal {} is {}, expected {}",
        id,
        literal.kind(),
        expected
    )
}

/// Iterator over stored literals, newest first
pub struct Iter<'a> {
    pools: &'a PoolAllocator<LiteralRecord>,
    cursor: CompressedPointer,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (LiteralId, &'a Literal);

    fn next(&mut self) -> Option<Self::Item> {
        let cell = self.cursor.decompress()?;
        let record = self.pools.get(cell)?;
        self.cursor = record.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some((LiteralId(cell), &record.literal))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

#[cfg(feature = "dump")]
mod dump;

#[cfg(test)]
mod tests;
