//! Build TextMate grammars from static rule definitions.
//!
//! A grammar is a top-level pattern list plus a name-keyed repository of rules.
//! Before encoding, [`simplify`] compacts the rule graph: rules referenced
//! exactly once are inlined at their single use site, unused rules are pruned,
//! and shared rules stay in the repository behind `#name` includes.

#[macro_use]
mod macros;
mod api;
pub mod codereview_cfg;
pub mod encode;
mod engine;
mod error;
pub mod grammars;

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

pub use api::{Options, Report, simplify};
pub use engine::{Diagnostic, DiagnosticKind, DiagnosticMask, RefCounts, RunMetrics};
pub use error::{Error, Result};

/// JSON schema advertised by every generated grammar.
pub const TMLANGUAGE_SCHEMA: &str = "https://raw.githubusercontent.com/martinring/tmlanguage/master/tmlanguage.json";

// --- Rule model --------------------------------------------------------------

/// Target of a reference rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Include {
    /// `#name`: an entry of the grammar's own repository.
    Repository(String),
    /// `$self`, `$base` or another grammar's scope. Never resolved here.
    External(String),
}

impl Include {
    /// Parse the TextMate spelling of an include.
    pub fn parse(text: &str) -> Self {
        match text.strip_prefix('#') {
            Some(name) => Include::Repository(name.to_string()),
            None => Include::External(text.to_string()),
        }
    }
}

impl fmt::Display for Include {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Include::Repository(name) => write!(f, "#{name}"),
            Include::External(text) => f.write_str(text),
        }
    }
}

/// Sub-rules applied to one capture group of a match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Capture {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub patterns: Vec<Rule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Capture {
    /// A capture that only assigns a scope name.
    pub fn named(name: impl Into<String>) -> Self {
        Capture { patterns: Vec::new(), name: Some(name.into()) }
    }
}

/// Capture-group index to capture rule. Ordered so traversal and output are stable.
pub type Captures = BTreeMap<u32, Capture>;

/// A single-pattern rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchRule {
    pub pattern: String,
    pub captures: Captures,
    pub name: Option<String>,
}

/// A rule spanning from a `begin` match to an `end` match.
///
/// `captures` applies to both delimiters; `begin_captures` and `end_captures`
/// to one each.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionRule {
    pub begin: String,
    pub begin_captures: Captures,
    pub end: String,
    pub end_captures: Captures,
    pub captures: Captures,
    pub content_name: Option<String>,
    pub patterns: Vec<Rule>,
    pub name: Option<String>,
}

/// A pattern-less rule: an ordered list of alternatives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupRule {
    pub patterns: Vec<Rule>,
    pub name: Option<String>,
}

/// One grammar rule.
///
/// Scope names (`name`, `content_name`) are opaque and never interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Reference { include: Include, name: Option<String> },
    Match(MatchRule),
    Region(RegionRule),
    Group(GroupRule),
}

impl Rule {
    /// A reference rule from its TextMate spelling (`#name`, `$self`, ...).
    pub fn include(text: &str) -> Self {
        Rule::Reference { include: Include::parse(text), name: None }
    }

    /// Repository name this rule refers to, if it is a `#name` include.
    pub fn reference(&self) -> Option<&str> {
        match self {
            Rule::Reference { include: Include::Repository(name), .. } => Some(name),
            _ => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Rule::Reference { name, .. } => name.as_deref(),
            Rule::Match(m) => m.name.as_deref(),
            Rule::Region(r) => r.name.as_deref(),
            Rule::Group(g) => g.name.as_deref(),
        }
    }

    /// Direct child lists: every capture's patterns, then the rule's own patterns.
    ///
    /// Region captures are listed begin, end, then shared captures.
    pub fn child_lists(&self) -> Vec<&Vec<Rule>> {
        match self {
            Rule::Reference { .. } => Vec::new(),
            Rule::Match(m) => m.captures.values().map(|c| &c.patterns).collect(),
            Rule::Region(r) => r
                .begin_captures
                .values()
                .chain(r.end_captures.values())
                .chain(r.captures.values())
                .map(|c| &c.patterns)
                .chain(std::iter::once(&r.patterns))
                .collect(),
            Rule::Group(g) => vec![&g.patterns],
        }
    }

    /// Mutable counterpart of [`Rule::child_lists`], in the same order.
    pub fn child_lists_mut(&mut self) -> Vec<&mut Vec<Rule>> {
        match self {
            Rule::Reference { .. } => Vec::new(),
            Rule::Match(m) => m.captures.values_mut().map(|c| &mut c.patterns).collect(),
            Rule::Region(r) => r
                .begin_captures
                .values_mut()
                .chain(r.end_captures.values_mut())
                .chain(r.captures.values_mut())
                .map(|c| &mut c.patterns)
                .chain(std::iter::once(&mut r.patterns))
                .collect(),
            Rule::Group(g) => vec![&mut g.patterns],
        }
    }

    /// Visit every direct child rule, capture sub-rules included.
    pub fn for_each_child(&self, mut f: impl FnMut(&Rule)) {
        for list in self.child_lists() {
            list.iter().for_each(&mut f);
        }
    }

    /// Visit every direct child rule mutably, capture sub-rules included.
    pub fn for_each_child_mut(&mut self, mut f: impl FnMut(&mut Rule)) {
        for list in self.child_lists_mut() {
            list.iter_mut().for_each(&mut f);
        }
    }
}

// --- Grammar -----------------------------------------------------------------

/// Named rule definitions, sorted by name.
pub type Repository = BTreeMap<String, Rule>;

/// A complete grammar document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Grammar {
    #[serde(rename = "$schema")]
    pub schema: String,
    /// Display name of the language, e.g. `"CUE"`.
    pub name: String,
    /// Root scope, e.g. `"source.cue"`.
    pub scope_name: String,
    pub patterns: Vec<Rule>,
    pub repository: Repository,
}

impl Grammar {
    pub fn new(
        name: impl Into<String>,
        scope_name: impl Into<String>,
        patterns: Vec<Rule>,
        repository: Repository,
    ) -> Self {
        Grammar {
            schema: TMLANGUAGE_SCHEMA.to_string(),
            name: name.into(),
            scope_name: scope_name.into(),
            patterns,
            repository,
        }
    }
}
