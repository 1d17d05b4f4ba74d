//! Literal and identifier rules: numbers, strings, keywords-as-values, types.

use super::fragments::*;
use super::strings::string_rules;
use crate::Rule;

pub fn get() -> Vec<(&'static str, Rule)> {
    vec![
        ("bool", leaf! { match: format!("{BEFORE_IDENT}(?:true|false){AFTER_IDENT}"), name: "constant.language.bool" }),
        ("bottom", leaf! { match: format!(r"{BEFORE_IDENT}_\|_{AFTER_IDENT}"), name: "constant.language.bottom" }),
        ("float", rule_float()),
        ("identifier", leaf! { match: format!("{BEFORE_IDENT}(?:{IDENT_ANY}){AFTER_IDENT}"), name: "variable.other" }),
        ("integer", group! { patterns: includes![
            "#integer_si",
            "#integer_decimal",
            "#integer_binary",
            "#integer_hex",
            "#integer_octal",
        ] }),
        (
            "integer_binary",
            leaf! { match: format!("{BEFORE_NUM}0b[0-1](?:_?[0-1])*{AFTER_NUM}"), name: "constant.numeric.integer.binary" },
        ),
        (
            "integer_decimal",
            leaf! {
                match: format!("{BEFORE_NUM}(?:0|[1-9](?:_?[0-9])*){AFTER_NUM}"),
                name: "constant.numeric.integer.decimal",
            },
        ),
        (
            "integer_hex",
            leaf! {
                match: format!("{BEFORE_NUM}0[xX][0-9a-fA-F](?:_?[0-9a-fA-F])*{AFTER_NUM}"),
                name: "constant.numeric.integer.hexadecimal",
            },
        ),
        (
            "integer_octal",
            leaf! { match: format!("{BEFORE_NUM}0o?[0-7](?:_?[0-7])*{AFTER_NUM}"), name: "constant.numeric.integer.octal" },
        ),
        ("integer_si", rule_integer_si()),
        ("null", leaf! { match: format!("{BEFORE_IDENT}null{AFTER_IDENT}"), name: "constant.language.null" }),
        ("number", group! { patterns: includes!["#float", "#integer"] }),
        ("string", group! { patterns: string_rules(1) }),
        ("string_backtick", rule_string_backtick()),
        ("top", leaf! { match: format!(r"{BEFORE_IDENT}_(?!\|){AFTER_IDENT}"), name: "constant.language.top" }),
        ("type", rule_type()),
    ]
}

/// `1.5`, `1e3`, `.5e-2`
fn rule_float() -> Rule {
    group! {
        patterns: vec![
            leaf! {
                match: format!(r"{BEFORE_NUM}{DIGITS}\.(?:{DIGITS})?{FLOAT_EXP_OPT}{AFTER_NUM}"),
                name: "constant.numeric.float.decimal",
            },
            leaf! {
                match: format!("{BEFORE_NUM}{DIGITS}{FLOAT_EXP}{AFTER_NUM}"),
                name: "constant.numeric.float.decimal",
            },
            leaf! {
                match: format!(r"{BEFORE_NUM}\.{DIGITS}{FLOAT_EXP_OPT}{AFTER_NUM}"),
                name: "constant.numeric.float.decimal",
            },
        ],
    }
}

/// `1Ki`, `1.5M`, `.5Gi`
fn rule_integer_si() -> Rule {
    group! {
        patterns: vec![
            leaf! {
                match: format!(r"{BEFORE_NUM}{DECIMAL_INT}(?:\.{DIGITS})?{SI_SUFFIX}{AFTER_NUM}"),
                name: "constant.numeric.integer.other",
            },
            leaf! {
                match: format!(r"{BEFORE_NUM}\.{DIGITS}{SI_SUFFIX}{AFTER_NUM}"),
                name: "constant.numeric.integer.other",
            },
        ],
    }
}

fn rule_string_backtick() -> Rule {
    region! {
        begin: "`",
        begin_captures: { 0 => "punctuation.definition.string.begin" },
        end: "`",
        end_captures: { 0 => "punctuation.definition.string.end" },
        content_name: "string.quoted.backtick",
        name: "meta.string",
    }
}

/// Predeclared type identifiers.
fn rule_type() -> Rule {
    leaf! {
        match: format!(
            "{BEFORE_IDENT}(?:bool|u?int(?:8|16|32|64|128)?|float(?:32|64)?|string|bytes|number|rune){AFTER_IDENT}"
        ),
        name: "support.type",
    }
}
