//! Tests for the literal store.

use super::*;
use ember_util::magic::{MAGIC_EMPTY, MAGIC_LENGTH, MAGIC_PROTOTYPE};

fn store() -> LiteralStorage {
    let mut store = LiteralStorage::with_defaults();
    store.init_with_strings(["foo", "console"]).unwrap();
    store
}

// ============================================================================
// CREATION
// ============================================================================

#[test]
fn test_builtin_magic_string_wins() {
    let mut store = store();
    let id = store.create_from_bytes(b"length");
    assert_eq!(store.kind(id), LiteralKind::MagicString);
    assert_eq!(store.magic_string_id(id), MAGIC_LENGTH);
}

#[test]
fn test_empty_string_is_magic() {
    let mut store = store();
    let id = store.create_from_bytes(b"");
    assert_eq!(store.magic_string_id(id), MAGIC_EMPTY);
}

#[test]
fn test_extended_magic_string() {
    let mut store = store();
    let id = store.create_from_bytes(b"console");
    assert_eq!(store.kind(id), LiteralKind::MagicStringExt);
    assert_eq!(store.magic_string_ex_id(id), MagicStringExId(1));
}

#[test]
fn test_builtin_shadows_extended() {
    let mut store = LiteralStorage::with_defaults();
    store.init_with_strings(["prototype"]).unwrap();
    let id = store.create_from_bytes(b"prototype");
    assert_eq!(store.magic_string_id(id), MAGIC_PROTOTYPE);
}

#[test]
fn test_charset_fields() {
    let mut store = store();
    let id = store.create_from_bytes("b\u{1F600}r".as_bytes());
    assert_eq!(store.kind(id), LiteralKind::Charset);
    assert_eq!(store.charset_size(id), 6);
    assert_eq!(store.charset_length(id), 4);
    assert_eq!(store.charset_bytes(id), "b\u{1F600}r".as_bytes());
    assert_eq!(
        store.charset_hash(id),
        utf8_string_hash("b\u{1F600}r".as_bytes())
    );
}

#[test]
fn test_create_does_not_deduplicate() {
    let mut store = store();
    let a = store.create_from_bytes(b"bar");
    let b = store.create_from_bytes(b"bar");
    assert_ne!(a, b);
    assert_eq!(store.len(), 2);
    // Newest record is found first
    assert_eq!(store.find_by_bytes(b"bar"), Some(b));
}

#[test]
fn test_records_are_prepended() {
    let mut store = store();
    let a = store.create_from_bytes(b"a1");
    let b = store.create_from_number(1.5);
    let c = store.create_from_bytes(b"length");

    let order: Vec<_> = store.iter().map(|(id, _)| id).collect();
    assert_eq!(order, vec![c, b, a]);
    assert_eq!(store.iter().len(), 3);
}

// ============================================================================
// LOOKUP
// ============================================================================

#[test]
fn test_find_by_bytes_across_kinds() {
    let mut store = store();
    let charset = store.create_from_bytes(b"bar");
    let magic = store.create_from_bytes(b"length");
    let magic_ex = store.create_from_bytes(b"foo");

    assert_eq!(store.find_by_bytes(b"bar"), Some(charset));
    assert_eq!(store.find_by_bytes(b"length"), Some(magic));
    assert_eq!(store.find_by_bytes(b"foo"), Some(magic_ex));
    assert_eq!(store.find_by_bytes(b"ba"), None);
    assert_eq!(store.find_by_bytes(b"barr"), None);
}

#[test]
fn test_find_by_bytes_skips_numbers() {
    let mut store = store();
    store.create_from_number(42.0);
    assert_eq!(store.find_by_bytes(b"42"), None);
}

#[test]
fn test_find_or_create_from_bytes() {
    let mut store = store();
    let a = store.find_or_create_from_bytes(b"bar");
    let b = store.find_or_create_from_bytes(b"bar");
    assert_eq!(a, b);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_find_by_number() {
    let mut store = store();
    let three = store.create_from_number(3.0);
    store.create_from_bytes(b"3");

    assert_eq!(store.find_by_number(3.0), Some(three));
    assert_eq!(store.find_by_number(4.0), None);
}

#[test]
fn test_nan_is_never_found() {
    let mut store = store();
    let a = store.find_or_create_from_number(f64::NAN);
    let b = store.find_or_create_from_number(f64::NAN);
    assert_ne!(a, b);
    assert_eq!(store.find_by_number(f64::NAN), None);
    assert_eq!(store.len(), 2);
}

#[test]
fn test_signed_zeros_are_found_as_each_other() {
    let mut store = store();
    let neg = store.create_from_number(-0.0);
    assert_eq!(store.find_by_number(0.0), Some(neg));
    assert_eq!(store.find_or_create_from_number(0.0), neg);
    assert!(store.number_value(neg).is_sign_negative());
}

// ============================================================================
// EQUALITY
// ============================================================================

#[test]
fn test_equal_to_bytes() {
    let mut store = store();
    let bar = store.create_from_bytes(b"bar");
    let length = store.create_from_bytes(b"length");
    let foo = store.create_from_bytes(b"foo");
    let num = store.create_from_number(0.5);

    assert!(store.equal_to_bytes(bar, b"bar"));
    assert!(!store.equal_to_bytes(bar, b"baz"));
    assert!(store.equal_to_bytes(length, b"length"));
    assert!(store.equal_to_bytes(foo, b"foo"));
    assert!(store.equal_to_bytes(num, b"0.5"));
    assert!(!store.equal_to_bytes(num, b".5"));
}

#[test]
fn test_equal_to_number() {
    let mut store = store();
    let text = store.create_from_bytes(b"100");
    let num = store.create_from_number(100.0);

    assert!(store.equal_to_number(text, 100.0));
    assert!(store.equal_to_number(num, 100.0));
    assert!(!store.equal_to_number(text, 10.0));
}

#[test]
fn test_equal_across_kinds() {
    let mut store = store();
    let text = store.create_from_bytes(b"42");
    let num = store.create_from_number(42.0);
    let magic = store.create_from_bytes(b"length");
    let charset = store.create_from_bytes(b"lengthy");

    assert!(store.equal(text, num));
    assert!(store.equal(num, text));
    assert!(!store.equal(magic, charset));
    assert!(store.equal(magic, magic));
}

#[test]
fn test_equal_numbers_compare_by_text() {
    let mut store = store();
    let a = store.create_from_number(f64::NAN);
    let b = store.create_from_number(f64::NAN);
    let zero = store.create_from_number(0.0);
    let neg_zero = store.create_from_number(-0.0);

    // Both render as "NaN" / "0"
    assert!(store.equal(a, b));
    assert!(store.equal(zero, neg_zero));
}

#[test]
fn test_equal_same_type() {
    let mut store = store();
    let text = store.create_from_bytes(b"42");
    let num = store.create_from_number(42.0);
    let other = store.create_from_number(42.0);

    assert!(!store.equal_same_type(text, num));
    assert!(store.equal_same_type(num, other));
}

#[test]
fn test_equal_typed() {
    let mut store = store();
    let text = store.create_from_bytes(b"7");
    let num = store.create_from_number(7.0);

    assert!(store.equal_typed_bytes(text, b"7"));
    assert!(store.equal_typed_str(text, "7"));
    assert!(!store.equal_typed_bytes(num, b"7"));
    assert!(store.equal_typed_number(num, 7.0));
    assert!(!store.equal_typed_number(text, 7.0));
}

#[test]
fn test_free_literal_equals_nothing() {
    let mut store = store();
    let free = store.create_free_literal(8);
    let other = store.create_free_literal(8);
    let text = store.create_from_bytes(b"");

    assert_eq!(store.kind(free), LiteralKind::Free);
    assert!(!store.equal_to_bytes(free, b""));
    assert!(!store.equal_to_number(free, 0.0));
    assert!(!store.equal(free, other));
    assert!(!store.equal(text, free));
    assert!(!store.equal(free, text));
    assert!(!store.equal_same_type(free, other));
    assert!(!store.equal_typed_bytes(free, b""));
    assert!(!store.equal_typed_number(free, 0.0));

    // Never returned by lookups
    assert_eq!(store.find_by_bytes(b""), Some(text));
}

// ============================================================================
// HANDLES
// ============================================================================

#[test]
fn test_compressed_round_trip() {
    let mut store = store();
    let ids: Vec<_> = (0..20).map(|i| store.create_from_number(i as f64)).collect();
    for id in ids {
        let cp = store.to_compressed(id);
        assert!(!cp.is_null());
        assert_eq!(store.handle_from_compressed(cp), id);
        assert_eq!(store.address_of(id), cp.decompress().unwrap());
    }
}

#[test]
#[should_panic(expected = "null compressed pointer")]
fn test_null_handle_panics() {
    let store = store();
    store.handle_from_compressed(CompressedPointer::NULL);
}

#[test]
#[should_panic(expected = "does not refer to a stored literal")]
fn test_dangling_handle_panics() {
    let mut store = store();
    store.create_from_bytes(b"bar");
    store.handle_from_compressed(CompressedPointer::compress(CellId(5)));
}

#[test]
#[should_panic(expected = "is number, expected charset")]
fn test_wrong_accessor_panics() {
    let mut store = store();
    let num = store.create_from_number(1.0);
    store.charset_size(num);
}

// ============================================================================
// LIFECYCLE
// ============================================================================

#[test]
#[should_panic(expected = "literal store is uninitialized")]
fn test_use_before_init_panics() {
    let mut store = LiteralStorage::with_defaults();
    store.create_from_bytes(b"x");
}

#[test]
fn test_double_init_is_rejected() {
    let mut store = store();
    let err = store.init(ExtendedMagicStrings::empty()).unwrap_err();
    assert!(matches!(
        err,
        LiteralError::InvalidState {
            expected: StoreState::Uninitialized,
            actual: StoreState::Active,
        }
    ));
}

#[test]
fn test_finalize_releases_everything() {
    let mut store = store();
    for i in 0..50 {
        store.create_from_number(i as f64);
        store.create_from_bytes(format!("s{}", i).as_bytes());
    }
    assert!(store.pool_stats().pools_count > 0);

    store.finalize();
    assert_eq!(store.state(), StoreState::TornDown);
    assert!(store.is_empty());
    let stats = store.pool_stats();
    assert_eq!(stats.pools_count, 0);
    assert_eq!(stats.free_chunks, 0);
}

#[test]
#[should_panic(expected = "literal store is torn down")]
fn test_use_after_finalize_panics() {
    let mut store = store();
    store.finalize();
    store.find_by_number(1.0);
}

#[test]
fn test_collect_empty_keeps_live_literals() {
    let mut store = store();
    let id = store.create_from_bytes(b"bar");
    assert_eq!(store.collect_empty(), 0);
    assert!(store.equal_to_bytes(id, b"bar"));
}

#[test]
fn test_custom_number_format() {
    struct Hex;

    impl NumberFormat for Hex {
        fn format(&self, num: f64, buf: &mut [u8; MAX_NUMBER_STRING_SIZE]) -> usize {
            let text = format!("{:x}", num as i64);
            buf[..text.len()].copy_from_slice(text.as_bytes());
            text.len()
        }
    }

    let mut store = LiteralStorage::new(StoreConfig::default(), Hex).unwrap();
    store.init(ExtendedMagicStrings::empty()).unwrap();
    let num = store.create_from_number(255.0);
    assert!(store.equal_to_bytes(num, b"ff"));
    assert!(!store.equal_to_bytes(num, b"255"));
}
