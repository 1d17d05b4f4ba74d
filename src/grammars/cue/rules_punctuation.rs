//! Comments, whitespace, operators, punctuation and error recovery.

use super::fragments::{AFTER_IDENT, BEFORE_IDENT};
use crate::Rule;

pub fn get() -> Vec<(&'static str, Rule)> {
    vec![
        ("comment", group! { patterns: includes!["#comment_line", "#comment_block"] }),
        (
            "comment_block",
            region! {
                begin: r"/\*",
                end: r"\*/",
                captures: { 0 => "punctuation.definition.comment" },
                name: "comment.block",
            },
        ),
        (
            "comment_line",
            leaf! {
                match: r"(//).*$\n?",
                captures: { 1 => "punctuation.definition.comment" },
                name: "comment.line",
            },
        ),
        // Error recovery: everything up to the closing delimiter.
        ("invalid_in_braces", leaf! { match: r"[^\}]+", name: "invalid" }),
        ("invalid_in_brakets", leaf! { match: r"[^\]]+", name: "invalid" }),
        ("invalid_in_parens", leaf! { match: r"[^\)]+", name: "invalid" }),
        ("operator", rule_operator()),
        ("punctuation_arrow", leaf! { match: "<-", name: "punctuation.arrow" }),
        ("punctuation_bind", leaf! { match: "(?<![=!><])=(?![=~])", name: "punctuation.bind" }),
        ("punctuation_colon", leaf! { match: "(?<!:):(?!:)", name: "punctuation.colon" }),
        ("punctuation_comma", leaf! { match: ",", name: "punctuation.separator" }),
        ("punctuation_ellipsis", leaf! { match: r"(?<!\.)\.{3}(?!\.)", name: "punctuation.ellipsis" }),
        ("punctuation_isa", leaf! { match: "(?<!:)::(?!:)", name: "punctuation.isa" }),
        ("punctuation_option", leaf! { match: r"\?", name: "punctuation.option" }),
        ("whitespace", leaf! { match: r"[ \t\r\n]+" }),
    ]
}

fn rule_operator() -> Rule {
    group! {
        patterns: vec![
            // Not only arithmetic: `+` and `-` are also unary.
            leaf! { match: r"[\+\-\*]|/(?![/*])", name: "keyword.operator" },
            leaf! { match: format!("{BEFORE_IDENT}(?:div|mod|quo|rem){AFTER_IDENT}"), name: "keyword.operator.word" },
            // ==, =~, !=, !~, <=, >=, <, >
            leaf! { match: "=[=~]|![=~]|<=|>=|[<](?![-=])|[>](?![=])", name: "keyword.operator.comparison" },
            // &&, ||, !
            leaf! { match: r"&{2}|\|{2}|!(?![=~])", name: "keyword.operator.logical" },
            // & (unification), | (disjunction)
            leaf! { match: r"&(?!&)|\|(?!\|)", name: "keyword.operator.set" },
        ],
    }
}
