use crate::engine::{self, DiagnosticMask, RefCounts, RunMetrics};
use crate::{Diagnostic, Error, Grammar, Result};
use std::time::Instant;
use tracing::{debug, warn};

/// Options that affect how a run treats its warnings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Diagnostic kinds that turn a successful run into [`Error::Denied`].
    pub deny: DiagnosticMask,
}

impl Options {
    /// Deny every diagnostic kind.
    pub fn strict() -> Self {
        Options { deny: DiagnosticMask::all() }
    }
}

/// Result of [`simplify`], besides the rewritten grammar.
#[derive(Debug, Clone)]
pub struct Report {
    /// Warnings sorted by rule name, then kind.
    pub diagnostics: Vec<Diagnostic>,
    /// Reference counts the compaction was based on.
    pub counts: RefCounts,
    pub metrics: RunMetrics,
}

/// Compact `grammar` in place: inline single-use rules, prune unused ones.
///
/// Fatal errors (unresolved include, invalid rule name, empty root) are
/// raised before anything is mutated. Warnings are logged, returned in the
/// [`Report`], and become [`Error::Denied`] when `options.deny` covers them;
/// the grammar is fully compacted either way.
///
/// # Example
/// ```
/// use syntaxgen::{Grammar, Options, Repository, Rule, includes, leaf, simplify};
///
/// let mut repository = Repository::new();
/// repository.insert("A".to_string(), Rule::include("#B"));
/// repository.insert("B".to_string(), leaf! { match: "x" });
/// let mut grammar = Grammar::new("Demo", "source.demo", includes!["#A"], repository);
///
/// let report = simplify(&mut grammar, &Options::default()).unwrap();
/// assert_eq!(grammar.patterns, vec![leaf! { match: "x" }]);
/// assert!(grammar.repository.is_empty());
/// assert!(report.diagnostics.is_empty());
/// ```
pub fn simplify(grammar: &mut Grammar, options: &Options) -> Result<Report> {
    let start = Instant::now();
    let entries_before = grammar.repository.len();

    engine::validate(grammar)?;

    let counting_start = Instant::now();
    let counts = engine::count_references(&grammar.patterns, &grammar.repository)?;
    let counting = counting_start.elapsed();
    debug!(referenced = counts.len(), entries = entries_before, "counted references");

    let compaction_start = Instant::now();
    let compaction = engine::compact(&mut grammar.patterns, &mut grammar.repository, &counts)?;
    let compaction_time = compaction_start.elapsed();

    let mut diagnostics = compaction.diagnostics;
    engine::sort_diagnostics(&mut diagnostics);
    for diagnostic in &diagnostics {
        warn!(rule = %diagnostic.rule, kind = diagnostic.kind.label(), "{diagnostic}");
    }

    let denied: Vec<Diagnostic> =
        diagnostics.iter().filter(|d| options.deny.contains(d.kind.mask())).cloned().collect();
    if !denied.is_empty() {
        return Err(Error::Denied(denied));
    }

    let shared = grammar.repository.keys().filter(|name| counts.get(name) >= 2).cloned().collect();
    let metrics = RunMetrics {
        total: start.elapsed(),
        counting,
        compaction: compaction_time,
        referenced: counts.len(),
        entries_before,
        entries_after: grammar.repository.len(),
        inlined: compaction.inlined,
        shared,
        pruned: compaction.pruned,
    };

    Ok(Report { diagnostics, counts, metrics })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Repository, Rule};

    fn grammar(patterns: Vec<Rule>, entries: Vec<(&str, Rule)>) -> Grammar {
        let repository: Repository = entries.into_iter().map(|(n, r)| (n.to_string(), r)).collect();
        Grammar::new("Test", "source.test", patterns, repository)
    }

    #[test]
    fn simplify_reports_metrics() {
        let mut g = grammar(
            includes!["#A", "#shared", "#shared"],
            vec![
                ("A", Rule::include("#B")),
                ("B", leaf! { match: "x" }),
                ("shared", leaf! { match: "s" }),
                ("unused", leaf! { match: "u" }),
            ],
        );

        let report = simplify(&mut g, &Options::default()).unwrap();

        assert_eq!(report.diagnostics, vec![Diagnostic::unused("unused")]);
        assert_eq!(report.metrics.entries_before, 4);
        assert_eq!(report.metrics.entries_after, 1);
        assert_eq!(report.metrics.referenced, 3);
        assert_eq!(report.metrics.inlined, vec!["B", "A"]);
        assert_eq!(report.metrics.shared, vec!["shared"]);
        assert_eq!(report.metrics.pruned, vec!["unused"]);
        assert!(report.metrics.counting <= report.metrics.total);
        assert_eq!(g.patterns, vec![leaf! { match: "x" }, Rule::include("#shared"), Rule::include("#shared")]);
    }

    #[test]
    fn unresolved_reference_leaves_grammar_untouched() {
        let mut g = grammar(includes!["#A", "#E"], vec![("A", leaf! { match: "a" }), ("dead", leaf! { match: "d" })]);
        let before = g.clone();

        let err = simplify(&mut g, &Options::default()).unwrap_err();

        assert!(matches!(err, Error::UnresolvedReference(ref name) if name == "E"));
        assert_eq!(g, before);
    }

    #[test]
    fn denied_warnings_fail_after_compacting() {
        let mut g = grammar(includes!["#A"], vec![("A", leaf! { match: "a" }), ("D", leaf! { match: "d" })]);

        let err = simplify(&mut g, &Options::strict()).unwrap_err();

        let diagnostics = match err {
            Error::Denied(diagnostics) => diagnostics,
            other => panic!("expected denied diagnostics, got {other}"),
        };
        assert_eq!(diagnostics, vec![Diagnostic::unused("D")]);
        assert_eq!(g.patterns, vec![leaf! { match: "a" }]);
        assert!(g.repository.is_empty());
    }

    #[test]
    fn deny_mask_only_covers_selected_kinds() {
        let mut g = grammar(includes!["#A"], vec![("A", leaf! { match: "a" }), ("D", leaf! { match: "d" })]);
        let options = Options { deny: DiagnosticMask::SINGLE_USE };

        let report = simplify(&mut g, &options).unwrap();
        assert_eq!(report.diagnostics.len(), 1);
    }

    #[test]
    fn denied_error_message_lists_rules() {
        let err = Error::Denied(vec![Diagnostic::unused("a"), Diagnostic::single_use("b")]);
        assert_eq!(err.to_string(), "2 denied diagnostic(s): unused rule: a; rule used only once: b");
    }
}
