//! Builtin C++ types the host can represent directly.

use serde::{Deserialize, Serialize};

use crate::descriptor::TypeDescriptor;

pub const FLOAT_TYPES: &[&str] = &["float", "double", "long double"];

pub const INT_TYPES: &[&str] = &[
    "int",
    "unsigned int",
    "uint",
    "short",
    "unsigned short",
    "long",
    "unsigned long",
    "long long",
    "unsigned long long",
    "size_t",
    "time_t",
    "uchar",
    "unsigned char",
    "int8_t",
    "int16_t",
    "int32_t",
    "int64_t",
    "int64",
    "uint8_t",
    "uint16_t",
    "uint32_t",
    "uint64_t",
];

pub const STRING_TYPES: &[&str] = &["char"];

pub const BOOL_TYPES: &[&str] = &["bool"];

pub const VOID_TYPE: &str = "void";

/// Words that combine into a single builtin type name (`unsigned long int`).
pub const BUILTIN_WORDS: &[&str] = &[
    "unsigned", "signed", "long", "short", "int", "char", "double", "float",
];

/// Single spelling of a builtin written with [`BUILTIN_WORDS`]:
/// `long int` is `long`, `signed char` is `char`, `unsigned` is
/// `unsigned int`. `None` when `text` uses another word or the words do
/// not form a C++ type (`short long`, `unsigned double`).
pub fn canonical_builtin(text: &str) -> Option<&'static str> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() || words.iter().any(|w| !BUILTIN_WORDS.contains(w)) {
        return None;
    }
    let count = |word: &str| words.iter().filter(|w| **w == word).count();
    let (unsigned, signed) = (count("unsigned"), count("signed"));
    let (long, short, int) = (count("long"), count("short"), count("int"));
    let (char, double, float) = (count("char"), count("double"), count("float"));
    if unsigned + signed > 1 || short > 1 || int > 1 || char > 1 || double > 1 || float > 1 {
        return None;
    }
    let sign = unsigned + signed;
    let unsigned = unsigned == 1;

    if double == 1 {
        return match (sign + short + int + char + float, long) {
            (0, 0) => Some("double"),
            (0, 1) => Some("long double"),
            _ => None,
        };
    }
    if float == 1 {
        return (sign + long + short + int + char == 0).then_some("float");
    }
    if char == 1 {
        if long + short + int > 0 {
            return None;
        }
        return Some(if unsigned { "unsigned char" } else { "char" });
    }
    if short == 1 {
        if long > 0 {
            return None;
        }
        return Some(if unsigned { "unsigned short" } else { "short" });
    }
    match (long, unsigned) {
        (0, false) => Some("int"),
        (0, true) => Some("unsigned int"),
        (1, false) => Some("long"),
        (1, true) => Some("unsigned long"),
        (2, false) => Some("long long"),
        (2, true) => Some("unsigned long long"),
        _ => None,
    }
}

pub fn is_float(base: &str) -> bool {
    FLOAT_TYPES.contains(&base)
}

pub fn is_int(base: &str) -> bool {
    INT_TYPES.contains(&base)
}

pub fn is_bool(base: &str) -> bool {
    BOOL_TYPES.contains(&base)
}

pub fn is_char(base: &str) -> bool {
    STRING_TYPES.contains(&base)
}

/// Numeric in the host's eyes: every native type except `bool` and `char`.
pub fn is_numeric(base: &str) -> bool {
    is_float(base) || is_int(base) || base == VOID_TYPE
}

/// Maps to a host primitive rather than an opaque object.
pub fn is_native(base: &str) -> bool {
    is_numeric(base) || is_char(base) || is_bool(base)
}

/// How a value crosses the host boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Marshal {
    Boolean,
    /// `char *`, exchanged as a host string.
    String,
    Float,
    Integer,
    /// Pointer to a numeric element, filled from a host table.
    NumberPointer,
    /// Class instance, exchanged as a tagged handle.
    Opaque,
}

impl Marshal {
    #[inline]
    pub fn is_primitive(self) -> bool {
        !matches!(self, Marshal::Opaque)
    }
}

/// Decides how `desc` is marshalled, or `None` when no rule applies
/// (`void *`, `char` by value, pointers to pointers, `...`).
pub fn marshal(desc: &TypeDescriptor) -> Option<Marshal> {
    if desc.variadic {
        return None;
    }
    let base = desc.base_name();
    let depth = desc.pointer_depth();
    if depth > 1 {
        return None;
    }
    if !is_native(base) {
        return Some(Marshal::Opaque);
    }
    if base == VOID_TYPE {
        return None;
    }
    if is_bool(base) {
        return (depth == 0).then_some(Marshal::Boolean);
    }
    if is_char(base) {
        return (depth == 1).then_some(Marshal::String);
    }
    if depth == 1 {
        return Some(Marshal::NumberPointer);
    }
    if is_float(base) {
        Some(Marshal::Float)
    } else {
        Some(Marshal::Integer)
    }
}
