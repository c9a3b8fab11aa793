//! Identifier derivation for generated Java.
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `address` | [`capitalize`] | `Address` |
//! | `home-address` | [`type_name`] | `Home_address` |
//! | `class` | [`field_name`] | `_class` |
//! | `active` (boolean) | [`getter_name`] | `isActive` |

use once_cell::sync::Lazy;
use regex::Regex;

static INVALID_IDENT_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^A-Za-z0-9_]").expect("static regex")
});

/// Java reserved words and literals that cannot be used as identifiers.
const RESERVED: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char",
    "class", "const", "continue", "default", "do", "double", "else", "enum",
    "extends", "false", "final", "finally", "float", "for", "goto", "if",
    "implements", "import", "instanceof", "int", "interface", "long", "native",
    "new", "null", "package", "private", "protected", "public", "return",
    "short", "static", "strictfp", "super", "switch", "synchronized", "this",
    "throw", "throws", "transient", "true", "try", "void", "volatile", "while",
];

/// Types generated classes refer to by simple name. A record with one of
/// these names would shadow the import or `java.lang` type.
const RESERVED_TYPES: &[&str] = &[
    "List", "Objects", "Object", "String", "Override",
    "Boolean", "Integer", "Long", "Float", "Double",
];

const ESCAPE: char = '_';

/// Capitalize the first letter of a string.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

fn replace_invalid(s: &str) -> String {
    INVALID_IDENT_CHARS.replace_all(s, "_").into_owned()
}

fn starts_with_digit(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// Record name derived from a field key: capitalized, then reduced to
/// identifier characters. Applying it twice changes nothing.
pub fn type_name(key: &str) -> String {
    let name = replace_invalid(&capitalize(key));
    if name.is_empty() || starts_with_digit(&name) || is_reserved_type(&name) {
        format!("{ESCAPE}{name}")
    } else {
        name
    }
}

/// Field identifier for a source key.
pub fn field_name(key: &str) -> String {
    let name = replace_invalid(key);
    if name.is_empty() || starts_with_digit(&name) || is_reserved(&name) {
        format!("{ESCAPE}{name}")
    } else {
        name
    }
}

pub fn is_reserved(ident: &str) -> bool {
    RESERVED.contains(&ident)
}

pub fn is_reserved_type(ident: &str) -> bool {
    RESERVED_TYPES.contains(&ident)
}

pub fn getter_name(field: &str, is_boolean: bool) -> String {
    let prefix = if is_boolean { "is" } else { "get" };
    format!("{prefix}{}", capitalize(field))
}

pub fn setter_name(field: &str) -> String {
    format!("set{}", capitalize(field))
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn capitalize___capitalizes_first_letter() {
        assert_eq!(capitalize("address"), "Address");
        assert_eq!(capitalize("a"), "A");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("userId"), "UserId");
    }

    #[test]
    fn field_name___escapes_reserved_words() {
        assert_eq!(field_name("class"), "_class");
        assert_eq!(field_name("package"), "_package");
        assert_eq!(field_name("int"), "_int");
        assert_eq!(field_name("klass"), "klass");
    }

    #[test]
    fn field_name___replaces_invalid_characters() {
        assert_eq!(field_name("user-name"), "user_name");
        assert_eq!(field_name("a.b c"), "a_b_c");
        assert_eq!(field_name("über"), "_ber");
    }

    #[test]
    fn field_name___guards_leading_digits_and_empty_keys() {
        assert_eq!(field_name("2fa"), "_2fa");
        assert_eq!(field_name(""), "_");
    }

    #[test]
    fn type_name___is_a_valid_identifier() {
        assert_eq!(type_name("address"), "Address");
        assert_eq!(type_name("home-address"), "Home_address");
        assert_eq!(type_name("1st"), "_1st");
        assert_eq!(type_name(""), "_");
    }

    #[test]
    fn type_name___escapes_referenced_java_types() {
        assert_eq!(type_name("list"), "_List");
        assert_eq!(type_name("objects"), "_Objects");
        assert_eq!(type_name("string"), "_String");
        assert_eq!(type_name("object"), "_Object");
        assert_eq!(type_name("integer"), "_Integer");
        assert_eq!(type_name("override"), "_Override");
        assert_eq!(type_name("lists"), "Lists");
    }

    #[test]
    fn type_name___is_idempotent() {
        for key in ["list", "home-address", "1st", "", "user"] {
            let once = type_name(key);
            assert_eq!(type_name(&once), once);
        }
    }

    #[test]
    fn accessor_names___follow_bean_conventions() {
        assert_eq!(getter_name("active", true), "isActive");
        assert_eq!(getter_name("name", false), "getName");
        assert_eq!(getter_name("_class", false), "get_class");
        assert_eq!(setter_name("name"), "setName");
    }
}
