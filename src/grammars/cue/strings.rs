//! String literal rules.
//!
//! CUE strings come in four quote styles and may be wrapped in `#` to make
//! escapes and interpolations require the same number of hashes:
//! `#"a \#(x) b"#`. Each (quote, hash count) pair gets its own region.

use super::fragments::{ESCAPE_BYTE, ESCAPE_COMMON};
use crate::Rule;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    Double,
    Single,
    DoubleMultiline,
    SingleMultiline,
}

impl Quote {
    /// Emission order for one hash count; multiline variants come first so
    /// `"""` is not read as an empty `""` followed by `"`.
    pub const ORDER: [Quote; 4] = [Quote::DoubleMultiline, Quote::Double, Quote::SingleMultiline, Quote::Single];

    pub fn delimiter(self) -> &'static str {
        match self {
            Quote::Double => "\"",
            Quote::Single => "'",
            Quote::DoubleMultiline => "\"\"\"",
            Quote::SingleMultiline => "'''",
        }
    }

    /// Single-quoted literals are bytes: octal and hex escapes are legal there.
    pub fn is_bytes(self) -> bool {
        matches!(self, Quote::Single | Quote::SingleMultiline)
    }

    pub fn scope_suffix(self) -> &'static str {
        match self {
            Quote::Double => "double",
            Quote::Single => "single",
            Quote::DoubleMultiline => "double-multiline",
            Quote::SingleMultiline => "single-multiline",
        }
    }
}

/// Escape sequences and interpolations valid inside a string.
pub fn escape_rules(quote: Quote, hashes: &str) -> Vec<Rule> {
    let quote_text = quote.delimiter();
    let byte_name = if quote.is_bytes() { "constant.character.escape" } else { "invalid.illegal" };

    vec![
        leaf! {
            match: format!(r"\\{hashes}(?:{quote_text}|{ESCAPE_COMMON})"),
            name: "constant.character.escape",
        },
        leaf! {
            match: format!(r"\\{hashes}(?:{ESCAPE_BYTE})"),
            name: byte_name,
        },
        region! {
            begin: format!(r"\\{hashes}\("),
            begin_captures: { 0 => "punctuation.section.interpolation.begin" },
            end: r"\)",
            end_captures: { 0 => "punctuation.section.interpolation.end" },
            content_name: "source.cue.embedded",
            patterns: includes!["#expression", "#invalid_in_parens"],
            name: "meta.interpolation",
        },
        leaf! {
            match: format!(r"\\{hashes}."),
            name: "invalid.illegal",
        },
    ]
}

pub fn string_rule(quote: Quote, hash_count: usize) -> Rule {
    let hashes = "#".repeat(hash_count);
    let delimiter = quote.delimiter();

    region! {
        begin: format!("{hashes}{delimiter}"),
        begin_captures: { 0 => "punctuation.definition.string.begin" },
        end: format!("{delimiter}{hashes}"),
        end_captures: { 0 => "punctuation.definition.string.end" },
        content_name: format!("string.quoted.{}", quote.scope_suffix()),
        patterns: escape_rules(quote, &hashes),
        name: "meta.string",
    }
}

/// All string regions up to `max_hashes`, most hashes first, then backticks.
pub fn string_rules(max_hashes: usize) -> Vec<Rule> {
    let mut rules = Vec::with_capacity((max_hashes + 1) * Quote::ORDER.len() + 1);
    for hash_count in (0..=max_hashes).rev() {
        rules.extend(Quote::ORDER.iter().map(|&quote| string_rule(quote, hash_count)));
    }
    rules.push(Rule::include("#string_backtick"));
    rules
}
