//! ember-util - Foundation types shared by the Ember runtime crates
//!
//! ============================================================================
//! MODULE OVERVIEW
//! ============================================================================
//!
//! This crate holds the small building blocks that the memory and literal
//! crates are written against:
//!
//! - [`index_vec`]: vectors indexed by a typed id instead of `usize`, so pool
//!   ids, cell ids and magic string ids can never be mixed up.
//! - [`utf8`]: byte-string helpers used for literal content (content hash,
//!   UTF-16 code-unit length).
//! - [`magic`]: the two read-only magic string tables, the built-in engine
//!   vocabulary and the host-supplied extension table.
//! - [`error`]: error types for the fallible constructors above.
//
// MAGIC STRINGS:
// --------------
// Most string constants in a script are drawn from a small vocabulary
// (property names, keywords, built-in object names). Resolving those to a
// table id means no heap allocation and no byte copy:
//
// ```
// Built-in table (static):          Extended table (host, at init):
// ┌────┬──────────────┐              ┌────┬──────────────┐
// │ 0  │ ""           │              │ 0  │ "foo"        │
// │ 1  │ "undefined"  │              │ 1  │ "console"    │
// │ 2  │ "null"       │              │ .. │ ...          │
// │ .. │ ...          │              └────┴──────────────┘
// └────┴──────────────┘
// ```
//
// Both tables are immutable once built; ids are stable for the process
// lifetime.

pub mod error;
pub mod index_vec;
pub mod magic;
pub mod utf8;

pub use error::{IndexVecError, MagicTableError};
pub use index_vec::{Idx, IndexVec};
pub use magic::{
    BuiltinMagicStrings, ExtendedMagicStrings, MagicStringExId, MagicStringId, MagicTable,
};
pub use utf8::{utf16_length, utf8_string_hash, LitStringHash};
