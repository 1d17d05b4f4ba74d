//! Reference counting over a possibly cyclic rule graph.
//!
//! Every `#name` include reachable from the top-level pattern list bumps the
//! count of `name`. The body of a repository entry is walked only the first
//! time its name is met; later occurrences are counted but not descended
//! into. That guard is what makes self- and mutually-recursive rules
//! terminate, and it still counts every syntactic occurrence exactly once
//! because each body is walked exactly once.
//!
//! ```text
//! patterns: [#expr]            repository:
//!                                expr  = [#call, #operand]
//!                                call  = (begin "(" [#expr] end ")")
//!                                operand = [#call]
//!
//! visit #expr     count[expr]=1  first visit -> walk expr
//!   visit #call   count[call]=1  first visit -> walk call
//!     visit #expr count[expr]=2  seen, stop
//!   visit #operand count[operand]=1 -> walk operand
//!     visit #call count[call]=2  seen, stop
//! ```
//!
//! The walk uses an explicit work stack, so deeply nested rules cost heap, not
//! call-stack depth.

use crate::{Error, Include, Repository, Result, Rule};
use std::collections::{BTreeMap, HashSet};
use tracing::trace;

/// Rule name to number of include occurrences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefCounts {
    counts: BTreeMap<String, usize>,
}

impl RefCounts {
    /// Occurrences of `name`; zero for names never referenced.
    pub fn get(&self, name: &str) -> usize {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// Number of distinct names referenced at least once.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(name, count)| (name.as_str(), *count))
    }

    fn bump(&mut self, name: &str) -> usize {
        let count = self.counts.entry(name.to_string()).or_insert(0);
        *count += 1;
        *count
    }
}

impl<S: Into<String>> FromIterator<(S, usize)> for RefCounts {
    fn from_iter<I: IntoIterator<Item = (S, usize)>>(iter: I) -> Self {
        RefCounts { counts: iter.into_iter().filter(|(_, n)| *n > 0).map(|(name, n)| (name.into(), n)).collect() }
    }
}

/// Count include occurrences reachable from `patterns`.
///
/// Fails with [`Error::UnresolvedReference`] on the first include whose name is
/// missing from `repository`. Nothing is mutated.
pub(crate) fn count_references(patterns: &[Rule], repository: &Repository) -> Result<RefCounts> {
    let mut counts = RefCounts::default();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut stack: Vec<&Rule> = patterns.iter().rev().collect();

    while let Some(rule) = stack.pop() {
        match rule {
            Rule::Reference { include: Include::Repository(name), .. } => {
                let count = counts.bump(name);
                trace!(rule = %name, count, "counted include");

                if visited.insert(name.as_str()) {
                    let body = repository.get(name).ok_or_else(|| Error::UnresolvedReference(name.clone()))?;
                    stack.push(body);
                }
            }
            Rule::Reference { include: Include::External(_), .. } => {}
            Rule::Match(_) | Rule::Region(_) | Rule::Group(_) => {
                for list in rule.child_lists().into_iter().rev() {
                    stack.extend(list.iter().rev());
                }
            }
        }
    }

    Ok(counts)
}
