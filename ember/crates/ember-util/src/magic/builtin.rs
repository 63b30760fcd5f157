//! Built-in magic string table.
//!
//! Ids are explicit and must stay dense and in table order; the
//! `test_ids_match_table_order` test guards that.

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use super::{MagicStringId, MagicTable};
use crate::index_vec::Idx;

macro_rules! magic_strings {
    ($( $(#[$doc:meta])* $name:ident = $id:literal => $text:literal, )*) => {
        $(
            $(#[$doc])*
            pub const $name: MagicStringId = MagicStringId($id);
        )*

        static BUILTIN_MAGIC_STRINGS: &[&str] = &[ $( $text ),* ];

        #[cfg(test)]
        static BUILTIN_MAGIC_IDS: &[MagicStringId] = &[ $( $name ),* ];
    };
}

magic_strings! {
    // ------------------------------------------------------------------------
    // Primitive values and type names
    // ------------------------------------------------------------------------

    /// The empty string
    MAGIC_EMPTY = 0 => "",
    MAGIC_UNDEFINED = 1 => "undefined",
    MAGIC_NULL = 2 => "null",
    MAGIC_TRUE = 3 => "true",
    MAGIC_FALSE = 4 => "false",
    MAGIC_NAN = 5 => "NaN",
    MAGIC_INFINITY = 6 => "Infinity",
    MAGIC_BOOLEAN = 7 => "boolean",
    MAGIC_NUMBER = 8 => "number",
    MAGIC_STRING = 9 => "string",
    MAGIC_OBJECT = 10 => "object",
    MAGIC_FUNCTION = 11 => "function",

    // ------------------------------------------------------------------------
    // Built-in constructors and namespaces
    // ------------------------------------------------------------------------

    MAGIC_OBJECT_UL = 12 => "Object",
    MAGIC_FUNCTION_UL = 13 => "Function",
    MAGIC_ARRAY_UL = 14 => "Array",
    MAGIC_STRING_UL = 15 => "String",
    MAGIC_BOOLEAN_UL = 16 => "Boolean",
    MAGIC_NUMBER_UL = 17 => "Number",
    MAGIC_DATE_UL = 18 => "Date",
    MAGIC_REGEXP_UL = 19 => "RegExp",
    MAGIC_ERROR_UL = 20 => "Error",
    MAGIC_EVAL_ERROR_UL = 21 => "EvalError",
    MAGIC_RANGE_ERROR_UL = 22 => "RangeError",
    MAGIC_REFERENCE_ERROR_UL = 23 => "ReferenceError",
    MAGIC_SYNTAX_ERROR_UL = 24 => "SyntaxError",
    MAGIC_TYPE_ERROR_UL = 25 => "TypeError",
    MAGIC_URI_ERROR_UL = 26 => "URIError",
    MAGIC_MATH_UL = 27 => "Math",
    MAGIC_JSON_U = 28 => "JSON",

    // ------------------------------------------------------------------------
    // Well-known properties
    // ------------------------------------------------------------------------

    /// `length` - by far the most frequent property name
    MAGIC_LENGTH = 29 => "length",
    MAGIC_PROTOTYPE = 30 => "prototype",
    MAGIC_CONSTRUCTOR = 31 => "constructor",
    MAGIC_NAME = 32 => "name",
    MAGIC_MESSAGE = 33 => "message",
    MAGIC_ARGUMENTS = 34 => "arguments",
    MAGIC_CALLER = 35 => "caller",
    MAGIC_CALLEE = 36 => "callee",
    MAGIC_VALUE = 37 => "value",
    MAGIC_WRITABLE = 38 => "writable",
    MAGIC_ENUMERABLE = 39 => "enumerable",
    MAGIC_CONFIGURABLE = 40 => "configurable",
    MAGIC_GET = 41 => "get",
    MAGIC_SET = 42 => "set",
    MAGIC_LAST_INDEX = 43 => "lastIndex",
    MAGIC_SOURCE = 44 => "source",
    MAGIC_GLOBAL = 45 => "global",
    MAGIC_IGNORE_CASE = 46 => "ignoreCase",
    MAGIC_MULTILINE = 47 => "multiline",
    MAGIC_INDEX = 48 => "index",
    MAGIC_INPUT = 49 => "input",

    // ------------------------------------------------------------------------
    // Common methods
    // ------------------------------------------------------------------------

    MAGIC_TO_STRING = 50 => "toString",
    MAGIC_VALUE_OF = 51 => "valueOf",
    MAGIC_TO_LOCALE_STRING = 52 => "toLocaleString",
    MAGIC_HAS_OWN_PROPERTY = 53 => "hasOwnProperty",
    MAGIC_IS_PROTOTYPE_OF = 54 => "isPrototypeOf",
    MAGIC_PROPERTY_IS_ENUMERABLE = 55 => "propertyIsEnumerable",
    MAGIC_APPLY = 56 => "apply",
    MAGIC_CALL = 57 => "call",
    MAGIC_BIND = 58 => "bind",
    MAGIC_PUSH = 59 => "push",
    MAGIC_POP = 60 => "pop",
    MAGIC_SHIFT = 61 => "shift",
    MAGIC_UNSHIFT = 62 => "unshift",
    MAGIC_SLICE = 63 => "slice",
    MAGIC_SPLICE = 64 => "splice",
    MAGIC_CONCAT = 65 => "concat",
    MAGIC_JOIN = 66 => "join",
    MAGIC_REVERSE = 67 => "reverse",
    MAGIC_SORT = 68 => "sort",
    MAGIC_INDEX_OF = 69 => "indexOf",
    MAGIC_LAST_INDEX_OF = 70 => "lastIndexOf",
    MAGIC_FOR_EACH = 71 => "forEach",
    MAGIC_MAP = 72 => "map",
    MAGIC_FILTER = 73 => "filter",
    MAGIC_REDUCE = 74 => "reduce",
    MAGIC_CHAR_AT = 75 => "charAt",
    MAGIC_CHAR_CODE_AT = 76 => "charCodeAt",
    MAGIC_SUBSTRING = 77 => "substring",
    MAGIC_SPLIT = 78 => "split",
    MAGIC_REPLACE = 79 => "replace",
    MAGIC_TRIM = 80 => "trim",
    MAGIC_STRINGIFY = 81 => "stringify",
    MAGIC_PARSE = 82 => "parse",

    // ------------------------------------------------------------------------
    // Keywords usable as identifiers in property position
    // ------------------------------------------------------------------------

    MAGIC_THIS = 83 => "this",
    MAGIC_NEW = 84 => "new",
    MAGIC_TYPEOF = 85 => "typeof",
    MAGIC_INSTANCEOF = 86 => "instanceof",
    MAGIC_DELETE = 87 => "delete",
    MAGIC_VOID = 88 => "void",
    MAGIC_IN = 89 => "in",
}

/// The engine's built-in vocabulary
///
/// Zero-sized handle onto a process-wide static table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuiltinMagicStrings;

static BUILTIN_INDEX: LazyLock<FxHashMap<&'static [u8], MagicStringId>> = LazyLock::new(|| {
    let mut index = FxHashMap::default();
    for (id, text) in BUILTIN_MAGIC_STRINGS.iter().enumerate() {
        index
            .entry(text.as_bytes())
            .or_insert_with(|| MagicStringId::from_usize(id));
    }
    index
});

impl BuiltinMagicStrings {
    /// Content of entry `id` with its static lifetime
    #[inline]
    pub fn str_of(id: MagicStringId) -> &'static str {
        BUILTIN_MAGIC_STRINGS[id.index()]
    }
}

impl MagicTable for BuiltinMagicStrings {
    type Id = MagicStringId;

    #[inline]
    fn count(&self) -> usize {
        BUILTIN_MAGIC_STRINGS.len()
    }

    #[inline]
    fn bytes_of(&self, id: MagicStringId) -> &[u8] {
        Self::str_of(id).as_bytes()
    }

    #[inline]
    fn find_id(&self, bytes: &[u8]) -> Option<MagicStringId> {
        BUILTIN_INDEX.get(bytes).copied()
    }
}
