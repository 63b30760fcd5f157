//! ember-lit - Literal storage for the Ember script engine
//!
//! The front end hands every string and numeric constant it meets to a
//! [`LiteralStorage`] and gets back a [`LiteralId`]. Bytecode keeps the
//! 16-bit [`CompressedPointer`](ember_mem::CompressedPointer) form of that
//! handle and resolves it again with
//! [`LiteralStorage::handle_from_compressed`].
//!
//! - [`record`]: the literal variants and the record layout.
//! - [`storage`]: creation, lookup, equality and lifecycle.
//! - [`number`]: canonical number to string conversion used when numbers
//!   are compared with strings.
//! - [`config`] and [`error`]: store setup.
//!
//! ```
//! use ember_lit::{LiteralKind, LiteralStorage};
//!
//! let mut store = LiteralStorage::with_defaults();
//! store.init_with_strings(["foo"]).unwrap();
//!
//! let foo = store.create_from_bytes(b"foo");
//! let bar = store.create_from_bytes(b"bar");
//! assert_eq!(store.kind(foo), LiteralKind::MagicStringExt);
//! assert_eq!(store.kind(bar), LiteralKind::Charset);
//!
//! let cp = store.to_compressed(bar);
//! assert_eq!(store.handle_from_compressed(cp), bar);
//! ```

pub mod config;
pub mod error;
pub mod number;
pub mod record;
pub mod storage;

pub use config::StoreConfig;
pub use error::{LiteralError, Result};
pub use number::{EcmaNumberFormat, NumberFormat, MAX_NUMBER_STRING_SIZE};
pub use record::{Literal, LiteralId, LiteralKind, LiteralRecord};
pub use storage::{Iter, LiteralStorage, StoreState};
