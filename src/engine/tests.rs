use super::*;
use super::compactor::Compaction;
use crate::{Capture, Captures, Error, Repository, Rule};

fn repo(entries: Vec<(&str, Rule)>) -> Repository {
    entries.into_iter().map(|(name, rule)| (name.to_string(), rule)).collect()
}

fn counts_of(counts: &RefCounts) -> Vec<(&str, usize)> {
    counts.iter().collect()
}

/// Every repository include anywhere under `rules`, in traversal order.
fn references(rules: &[Rule]) -> Vec<String> {
    let mut out = Vec::new();
    let mut stack: Vec<&Rule> = rules.iter().rev().collect();
    while let Some(rule) = stack.pop() {
        if let Some(name) = rule.reference() {
            out.push(name.to_string());
        }
        for list in rule.child_lists().into_iter().rev() {
            stack.extend(list.iter().rev());
        }
    }
    out
}

fn run(patterns: &mut Vec<Rule>, repository: &mut Repository) -> (RefCounts, Compaction) {
    let counts = count_references(patterns, repository).unwrap();
    let compaction = compact(patterns, repository, &counts).unwrap();
    (counts, compaction)
}

// --- Reference counting -------------------------------------------------------

#[test]
fn counts_chain_of_single_references() {
    let repository = repo(vec![("A", Rule::include("#B")), ("B", leaf! { match: "x" })]);
    let counts = count_references(&includes!["#A"], &repository).unwrap();

    assert_eq!(counts_of(&counts), vec![("A", 1), ("B", 1)]);
}

#[test]
fn counts_self_reference_without_descending_twice() {
    let repository = repo(vec![("C", region! { begin: r"\(", end: r"\)", patterns: includes!["#C"] })]);
    let counts = count_references(&includes!["#C"], &repository).unwrap();

    assert_eq!(counts.get("C"), 2);
}

#[test]
fn counts_mutual_recursion() {
    let repository = repo(vec![
        ("expression", group! { patterns: includes!["#call", "#operand"] }),
        ("call", region! { begin: r"\(", end: r"\)", patterns: includes!["#expression"] }),
        ("operand", group! { patterns: includes!["#call", "#number"] }),
        ("number", leaf! { match: r"\d+", name: "constant.numeric" }),
    ]);
    let counts = count_references(&includes!["#expression"], &repository).unwrap();

    assert_eq!(counts_of(&counts), vec![("call", 2), ("expression", 2), ("number", 1), ("operand", 1)]);
}

#[test]
fn counts_references_inside_captures() {
    let repository = repo(vec![
        (
            "region",
            Rule::Region(crate::RegionRule {
                begin: "<".into(),
                begin_captures: Captures::from([(1, Capture { patterns: includes!["#tag"], name: None })]),
                end: ">".into(),
                end_captures: Captures::from([(0, Capture { patterns: includes!["#tag"], name: None })]),
                captures: Captures::from([(2, Capture { patterns: includes!["#attr"], name: None })]),
                ..Default::default()
            }),
        ),
        ("tag", leaf! { match: r"\w+" }),
        ("attr", leaf! { match: r"\w+=" }),
        ("escape", leaf! { match: r"\\.", captures: {} }),
    ]);
    let patterns = vec![leaf! { match: "x" }, Rule::include("#region")];
    let counts = count_references(&patterns, &repository).unwrap();

    assert_eq!(counts_of(&counts), vec![("attr", 1), ("region", 1), ("tag", 2)]);
    assert_eq!(counts.get("escape"), 0);
}

#[test]
fn count_equals_literal_occurrences() {
    // (include list, expected counts) for a repository of plain leaves.
    let cases: Vec<(Vec<Rule>, Vec<(&str, usize)>)> = vec![
        (includes!["#a"], vec![("a", 1)]),
        (includes!["#a", "#a", "#b"], vec![("a", 2), ("b", 1)]),
        (vec![group! { patterns: includes!["#a", "#b", "#a"] }, Rule::include("#b")], vec![("a", 2), ("b", 2)]),
        (includes!["$self", "source.other"], vec![]),
    ];

    for (patterns, expected) in cases {
        let repository = repo(vec![("a", leaf! { match: "a" }), ("b", leaf! { match: "b" })]);
        let counts = count_references(&patterns, &repository).unwrap();
        assert_eq!(counts_of(&counts), expected, "patterns: {patterns:?}");
    }
}

#[test]
fn unresolved_reference_is_fatal() {
    let err = count_references(&includes!["#E"], &Repository::new()).unwrap_err();
    assert!(matches!(err, Error::UnresolvedReference(ref name) if name == "E"));
}

#[test]
fn unresolved_reference_deep_inside_body_is_fatal() {
    let repository = repo(vec![("outer", group! { patterns: vec![group! { patterns: includes!["#missing"] }] })]);
    let err = count_references(&includes!["#outer"], &repository).unwrap_err();
    assert!(matches!(err, Error::UnresolvedReference(ref name) if name == "missing"));
}

#[test]
fn counting_handles_deep_nesting() {
    let mut rule = Rule::include("#leaf");
    for _ in 0..50_000 {
        rule = group! { patterns: vec![rule] };
    }
    let repository = repo(vec![("leaf", leaf! { match: "x" })]);
    let counts = count_references(std::slice::from_ref(&rule), &repository).unwrap();

    assert_eq!(counts.get("leaf"), 1);
    // Dropping a 50k-deep tree recursively would overflow the test thread.
    std::mem::forget(rule);
}

// --- Compaction -----------------------------------------------------------------

#[test]
fn inlines_chain_into_top_level() {
    let mut patterns = includes!["#A"];
    let mut repository = repo(vec![("A", Rule::include("#B")), ("B", leaf! { match: "x" })]);

    let (_, compaction) = run(&mut patterns, &mut repository);

    assert_eq!(patterns, vec![leaf! { match: "x" }]);
    assert!(repository.is_empty());
    assert!(compaction.diagnostics.is_empty());
    assert_eq!(compaction.inlined, vec!["B", "A"]);
}

#[test]
fn self_referential_rule_stays_shared() {
    let body = region! { begin: r"\(", end: r"\)", patterns: includes!["#C"] };
    let mut patterns = includes!["#C"];
    let mut repository = repo(vec![("C", body.clone())]);

    let (counts, compaction) = run(&mut patterns, &mut repository);

    assert_eq!(counts.get("C"), 2);
    assert_eq!(patterns, includes!["#C"]);
    assert_eq!(repository.get("C"), Some(&body));
    assert!(compaction.diagnostics.is_empty());
}

#[test]
fn unused_rule_is_pruned_and_reported() {
    let mut patterns = vec![leaf! { match: "z" }];
    let mut repository = repo(vec![("D", leaf! { match: "y" })]);

    let (counts, compaction) = run(&mut patterns, &mut repository);

    assert_eq!(counts.get("D"), 0);
    assert!(repository.is_empty());
    assert_eq!(compaction.pruned, vec!["D"]);
    assert_eq!(compaction.diagnostics, vec![Diagnostic::unused("D")]);
}

#[test]
fn unreachable_rules_are_all_pruned() {
    // U1 only reachable from U2 and vice versa; neither from the root.
    let mut patterns = includes!["#live"];
    let mut repository = repo(vec![
        ("live", leaf! { match: "x" }),
        ("u1", group! { patterns: includes!["#u2"] }),
        ("u2", group! { patterns: includes!["#u1", "#live"] }),
    ]);

    let (_, compaction) = run(&mut patterns, &mut repository);

    assert_eq!(patterns, vec![leaf! { match: "x" }]);
    assert!(repository.is_empty());
    assert_eq!(compaction.diagnostics, vec![Diagnostic::unused("u1"), Diagnostic::unused("u2")]);
}

#[test]
fn shared_rule_is_not_duplicated() {
    let comma = leaf! { match: ",", name: "punctuation.separator" };
    let mut patterns = includes!["#list", "#comma"];
    let mut repository = repo(vec![
        ("list", region! { begin: r"\[", end: r"\]", patterns: includes!["#comma"] }),
        ("comma", comma.clone()),
    ]);

    run(&mut patterns, &mut repository);

    assert_eq!(patterns[0], region! { begin: r"\[", end: r"\]", patterns: includes!["#comma"] });
    assert_eq!(patterns[1], Rule::include("#comma"));
    assert_eq!(repository.len(), 1);
    assert_eq!(repository.get("comma"), Some(&comma));
}

#[test]
fn inlined_body_is_compacted_first() {
    // `outer` is used once and contains `inner`, also used once, inside a capture.
    let mut patterns = includes!["#outer"];
    let mut repository = repo(vec![
        (
            "outer",
            Rule::Match(crate::MatchRule {
                pattern: "(a)".into(),
                captures: Captures::from([(1, Capture { patterns: includes!["#inner"], name: None })]),
                name: Some("meta.outer".into()),
            }),
        ),
        ("inner", leaf! { match: "a", name: "keyword" }),
    ]);

    run(&mut patterns, &mut repository);

    let expected = Rule::Match(crate::MatchRule {
        pattern: "(a)".into(),
        captures: Captures::from([(1, Capture { patterns: vec![leaf! { match: "a", name: "keyword" }], name: None })]),
        name: Some("meta.outer".into()),
    });
    assert_eq!(patterns, vec![expected]);
    assert!(repository.is_empty());
}

#[test]
fn single_use_rule_inside_shared_rule_is_inlined_there() {
    let mut patterns = includes!["#expr", "#expr"];
    let mut repository = repo(vec![
        ("expr", group! { patterns: includes!["#number"] }),
        ("number", leaf! { match: r"\d+" }),
    ]);

    run(&mut patterns, &mut repository);

    assert_eq!(patterns, includes!["#expr", "#expr"]);
    assert_eq!(repository.get("expr"), Some(&group! { patterns: vec![leaf! { match: r"\d+" }] }));
    assert!(!repository.contains_key("number"));
}

#[test]
fn single_use_cycle_member_is_inlined_into_shared_partner() {
    // A is shared (root + inside B); B's only use is inside A.
    let mut patterns = includes!["#A"];
    let mut repository = repo(vec![
        ("A", group! { patterns: includes!["#B"] }),
        ("B", region! { begin: "b", end: "e", patterns: includes!["#A"] }),
    ]);

    let (counts, compaction) = run(&mut patterns, &mut repository);

    assert_eq!(counts_of(&counts), vec![("A", 2), ("B", 1)]);
    assert_eq!(patterns, includes!["#A"]);
    assert_eq!(
        repository.get("A"),
        Some(&group! { patterns: vec![region! { begin: "b", end: "e", patterns: includes!["#A"] }] })
    );
    assert!(compaction.diagnostics.is_empty());
}

#[test]
fn external_includes_are_preserved() {
    let mut patterns = includes!["$self", "#a"];
    let mut repository = repo(vec![("a", group! { patterns: includes!["source.json"] })]);

    run(&mut patterns, &mut repository);

    assert_eq!(patterns, vec![Rule::include("$self"), group! { patterns: includes!["source.json"] }]);
}

#[test]
fn surviving_references_resolve_and_no_single_use_reference_survives() {
    let mut patterns = includes!["#expression", "#comment"];
    let mut repository = repo(vec![
        ("expression", group! { patterns: includes!["#parens", "#number", "#comment"] }),
        ("parens", region! { begin: r"\(", end: r"\)", patterns: includes!["#comment", "#expression"] }),
        ("number", leaf! { match: r"\d+" }),
        ("comment", leaf! { match: "//.*$" }),
        ("dead", leaf! { match: "dead" }),
    ]);

    let (counts, _) = run(&mut patterns, &mut repository);

    let mut surviving = references(&patterns);
    for rule in repository.values() {
        surviving.extend(references(std::slice::from_ref(rule)));
    }
    assert!(!surviving.is_empty());
    for name in &surviving {
        assert!(repository.contains_key(name), "{name} dangles");
        assert!(counts.get(name) >= 2, "{name} should have been inlined");
    }
}

#[test]
fn second_run_is_a_fixed_point() {
    let mut patterns = includes!["#expression", "#comment"];
    let mut repository = repo(vec![
        ("expression", group! { patterns: includes!["#parens", "#number", "#comment"] }),
        ("parens", region! { begin: r"\(", end: r"\)", patterns: includes!["#comment", "#expression"] }),
        ("number", leaf! { match: r"\d+" }),
        ("comment", leaf! { match: "//.*$" }),
        ("dead", leaf! { match: "dead" }),
    ]);

    run(&mut patterns, &mut repository);
    let (first_patterns, first_repository) = (patterns.clone(), repository.clone());

    let (_, second) = run(&mut patterns, &mut repository);

    assert_eq!(patterns, first_patterns);
    assert_eq!(repository, first_repository);
    assert!(second.inlined.is_empty());
    assert!(second.diagnostics.is_empty());
}

#[test]
fn single_use_entry_without_reference_node_is_kept_and_reported() {
    let mut patterns = vec![leaf! { match: "x" }];
    let mut repository = repo(vec![("orphan", leaf! { match: "y" })]);
    let counts: RefCounts = [("orphan", 1)].into_iter().collect();

    let compaction = compact(&mut patterns, &mut repository, &counts).unwrap();

    assert!(repository.contains_key("orphan"));
    assert_eq!(compaction.diagnostics, vec![Diagnostic::single_use("orphan")]);
}

#[test]
fn inconsistent_self_count_terminates() {
    // A self-referential rule with a (wrong) count of one must not recurse forever.
    let body = group! { patterns: includes!["#S"] };
    let mut patterns = includes!["#S"];
    let mut repository = repo(vec![("S", body.clone())]);
    let counts: RefCounts = [("S", 1)].into_iter().collect();

    let compaction = compact(&mut patterns, &mut repository, &counts).unwrap();

    assert_eq!(patterns, includes!["#S"]);
    assert_eq!(repository.get("S"), Some(&body));
    assert_eq!(compaction.diagnostics, vec![Diagnostic::single_use("S")]);
}

#[test]
fn consumed_single_use_entry_is_an_error() {
    // Two occurrences but a count of one: the second finds its entry gone.
    let mut patterns = includes!["#x", "#x"];
    let mut repository = repo(vec![("x", leaf! { match: "x" })]);
    let counts: RefCounts = [("x", 1)].into_iter().collect();

    let err = compact(&mut patterns, &mut repository, &counts).unwrap_err();
    assert!(matches!(err, Error::UnresolvedReference(ref name) if name == "x"));
}
