//! Regular-expression fragments shared by the CUE rules.
//!
//! Patterns target the Oniguruma dialect used by TextMate engines (lookbehind,
//! `\p{..}` classes), so they are composed as plain text and never compiled
//! here. Composite fragments are spelled out; the tests below pin them to their
//! parts.

pub const IDENT_CHAR: &str = r"[\p{L}\p{Nd}_]";
pub const IDENT_EXPORTED: &str = r"\p{Lu}[\p{L}\p{Nd}_]*";
pub const IDENT_NORMAL: &str = r"\p{L}[\p{L}\p{Nd}_]*";
pub const IDENT_HIDDEN: &str = r"_[\p{L}\p{Nd}_]+";
pub const IDENT_PACKAGE: &str = IDENT_NORMAL;
pub const IDENT_ANY: &str = r"\p{L}[\p{L}\p{Nd}_]*|_[\p{L}\p{Nd}_]+";

pub const BEFORE_IDENT: &str = r"(?<![\p{L}\p{Nd}_])";
pub const AFTER_IDENT: &str = r"(?![\p{L}\p{Nd}_])";
pub const BEFORE_NUM: &str = r"(?<![\p{L}\p{Nd}_\.])";
pub const AFTER_NUM: &str = r"(?![\p{L}\p{Nd}_\.])";

pub const IMPORT_LOCATION: &str = r#"[^:"]+"#;
pub const IMPORT_SPEC: &str = r#"(?:(\p{L}[\p{L}\p{Nd}_]*)[ \t]+)?(")([^:"]+)(?:(:)(\p{L}[\p{L}\p{Nd}_]*))?(")"#;

pub const DIGITS: &str = r"[0-9](?:_?[0-9])*";
pub const FLOAT_EXP: &str = r"[eE][\+\-]?[0-9](?:_?[0-9])*";
pub const FLOAT_EXP_OPT: &str = r"(?:[eE][\+\-]?[0-9](?:_?[0-9])*)?";
pub const DECIMAL_INT: &str = r"(?:0|[1-9](?:_?[0-9])*)";
pub const SI_SUFFIX: &str = r"(?:[KMGTPEYZ]i?)";

pub const ESCAPE_CONTROL: &str = "[abfnrtv]";
pub const ESCAPE_SIMPLE: &str = r"/|\\";
pub const ESCAPE_OCTAL: &str = "[0-7]{3}";
pub const ESCAPE_HEX: &str = "x[0-9A-Fa-f]{2}";
pub const ESCAPE_LITTLE_U: &str = "u[0-9A-Fa-f]{4}";
pub const ESCAPE_BIG_U: &str = "U[0-9A-Fa-f]{8}";
pub const ESCAPE_COMMON: &str = r"/|\\|[abfnrtv]|u[0-9A-Fa-f]{4}|U[0-9A-Fa-f]{8}";
pub const ESCAPE_BYTE: &str = "[0-7]{3}|x[0-9A-Fa-f]{2}";
