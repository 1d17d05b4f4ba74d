//! In-place inlining and pruning.
//!
//! Given the counts from `refcount.rs`, one forward pass rewrites the grammar:
//!
//! - an include of a name counted once is replaced by that entry's body, after
//!   the body itself has been compacted, and the entry leaves the repository;
//! - an include of a shared name (count >= 2) stays an include;
//! - entries counted zero are removed and reported;
//! - entries counted once that survive the pass are reported and kept.
//!
//! Children are compacted before their parent, so an inlined body never
//! carries an include that should itself have been inlined. The top-level list
//! goes first, then every live repository entry once, in name order. There is
//! no fixed-point iteration.
//!
//! ## Cycle guard
//!
//! Names whose bodies are being compacted sit on the `active` stack. An include
//! of an active name is left untouched and the name is pinned: its body goes
//! back into the repository and the entry ends up reported as single-use.
//! Correct counts never trigger this (a rule reachable from its own body is
//! counted at least twice), but the pass cannot recurse without bound.

use super::diagnostics::Diagnostic;
use super::refcount::RefCounts;
use crate::{Error, Repository, Result, Rule};
use std::collections::HashSet;
use tracing::debug;

/// Outcome of a compaction pass, besides the in-place edits.
#[derive(Debug, Clone, Default)]
pub(crate) struct Compaction {
    /// Names whose bodies were inlined, in inlining order.
    pub inlined: Vec<String>,
    /// Names removed because nothing reached them.
    pub pruned: Vec<String>,
    /// Warnings, in repository order.
    pub diagnostics: Vec<Diagnostic>,
}

struct Compactor<'a> {
    repository: &'a mut Repository,
    counts: &'a RefCounts,
    active: Vec<String>,
    pinned: HashSet<String>,
    inlined: Vec<String>,
}

impl Compactor<'_> {
    fn compact_list(&mut self, rules: &mut [Rule]) -> Result<()> {
        for rule in rules {
            self.compact_rule(rule)?;
        }
        Ok(())
    }

    fn compact_rule(&mut self, rule: &mut Rule) -> Result<()> {
        let Some(name) = rule.reference() else {
            for list in rule.child_lists_mut() {
                self.compact_list(list)?;
            }
            return Ok(());
        };

        if self.counts.get(name) != 1 {
            return Ok(());
        }
        if self.active.iter().any(|active| active == name) {
            self.pinned.insert(name.to_string());
            return Ok(());
        }

        let name = name.to_string();
        let body = self.repository.remove(&name).ok_or_else(|| Error::UnresolvedReference(name.clone()))?;
        let body = self.compact_entry(&name, body)?;

        if self.pinned.remove(&name) {
            self.repository.insert(name, body);
            return Ok(());
        }

        debug!(rule = %name, "inlined single-use rule");
        *rule = body;
        self.inlined.push(name);
        Ok(())
    }

    /// Compact the body of `name` while `name` is marked active.
    fn compact_entry(&mut self, name: &str, mut body: Rule) -> Result<Rule> {
        self.active.push(name.to_string());
        let result = self.compact_rule(&mut body);
        self.active.pop();
        result.map(|()| body)
    }
}

/// Inline single-use rules and prune unused ones, in place.
///
/// `counts` must come from [`super::count_references`] over the same
/// `patterns` and `repository`.
pub(crate) fn compact(patterns: &mut [Rule], repository: &mut Repository, counts: &RefCounts) -> Result<Compaction> {
    let names: Vec<String> = repository.keys().filter(|name| counts.get(name) > 0).cloned().collect();

    let mut compactor =
        Compactor { repository, counts, active: Vec::new(), pinned: HashSet::new(), inlined: Vec::new() };

    compactor.compact_list(patterns)?;

    for name in names {
        // Already consumed by an earlier inline.
        let Some(body) = compactor.repository.remove(&name) else {
            continue;
        };
        let body = compactor.compact_entry(&name, body)?;
        compactor.pinned.remove(&name);
        compactor.repository.insert(name, body);
    }

    let Compactor { repository, inlined, .. } = compactor;

    let mut outcome = Compaction { inlined, ..Compaction::default() };
    repository.retain(|name, _| match counts.get(name) {
        0 => {
            outcome.pruned.push(name.clone());
            outcome.diagnostics.push(Diagnostic::unused(name.as_str()));
            false
        }
        1 => {
            outcome.diagnostics.push(Diagnostic::single_use(name.as_str()));
            true
        }
        _ => true,
    });

    debug!(
        inlined = outcome.inlined.len(),
        pruned = outcome.pruned.len(),
        remaining = repository.len(),
        "compaction finished"
    );

    Ok(outcome)
}
