//! Test utilities for the ember-lit integration suite.

#![allow(dead_code)]

use ember_lit::{EcmaNumberFormat, LiteralStorage, StoreConfig};
use ember_mem::PoolConfig;
use ember_util::ExtendedMagicStrings;

/// Host magic strings used by the scenarios
pub const HOST_STRINGS: &[&str] = &["foo", "console", "log"];

/// Active store with [`HOST_STRINGS`] registered
pub fn active_store() -> LiteralStorage {
    store_with_pool(PoolConfig::default())
}

/// Active store with one-cell pools, so every literal gets its own pool
pub fn fine_grained_store() -> LiteralStorage {
    store_with_pool(PoolConfig {
        cells_per_pool: 1,
        ..Default::default()
    })
}

fn store_with_pool(pool: PoolConfig) -> LiteralStorage {
    let config = StoreConfig {
        pool,
        ..Default::default()
    };
    let mut store = LiteralStorage::new(config, EcmaNumberFormat).expect("store config should be valid");
    let extended = ExtendedMagicStrings::new(HOST_STRINGS.iter().copied())
        .expect("host magic strings should be valid");
    store.init(extended).expect("fresh store should initialize");
    store
}

/// A value the front end might intern
#[derive(Clone, Debug)]
pub enum Constant {
    Text(Vec<u8>),
    Number(f64),
}

/// Small alphabet so that generated strings collide often
pub fn small_text(seed: u32) -> Vec<u8> {
    const ALPHABET: &[&[u8]] = &[b"a", b"b", b"foo", b"length", b"3", b"", b"\xc3\xa9"];
    let mut out = Vec::new();
    let mut n = seed;
    for _ in 0..(seed % 3) + 1 {
        out.extend_from_slice(ALPHABET[(n % ALPHABET.len() as u32) as usize]);
        n /= ALPHABET.len() as u32;
    }
    out
}
