//! The CUE grammar (`source.cue`).
//!
//! Rules are written as small, named building blocks that freely include each
//! other; [`crate::simplify`] folds the single-use ones back in before the
//! grammar is written out.

pub mod fragments;
pub mod strings;

mod rules_literals;
mod rules_punctuation;
mod rules_structure;

use crate::{Grammar, Repository, Rule};

pub const NAME: &str = "CUE";
pub const SCOPE_NAME: &str = "source.cue";

/// Top-level patterns, tried in order at every position of a file.
pub fn patterns() -> Vec<Rule> {
    includes![
        "#whitespace",
        "#comment",
        "#package",
        "#import",
        "#punctuation_comma",
        "#declaration",
        "#invalid_in_braces",
    ]
}

/// Every named rule, before compaction.
pub fn repository() -> Repository {
    rules_literals::get()
        .into_iter()
        .chain(rules_punctuation::get())
        .chain(rules_structure::get())
        .map(|(name, rule)| (name.to_string(), rule))
        .collect()
}

pub fn grammar() -> Grammar {
    Grammar::new(NAME, SCOPE_NAME, patterns(), repository())
}
