//! Structural rules: declarations, expressions, calls, attributes, imports and
//! the bracketed regions that nest them.

use super::fragments::*;
use crate::{Capture, Captures, MatchRule, Rule};

pub fn get() -> Vec<(&'static str, Rule)> {
    vec![
        ("attribute", rule_attribute()),
        ("attribute_element", group! { patterns: includes!["#attribute_label", "#attribute_nested", "#attribute_string"] }),
        ("attribute_label", rule_attribute_label()),
        ("attribute_nested", rule_attribute_nested()),
        ("attribute_string", rule_attribute_string()),
        ("binding", rule_binding()),
        ("brackets", rule_brackets()),
        ("call", group! { patterns: includes!["#call_predefined", "#call_qualified"] }),
        ("call_predefined", rule_call_predefined()),
        ("call_qualified", rule_call_qualified()),
        ("clause", rule_clause()),
        (
            "declaration",
            group! { patterns: includes![
                "#attribute",
                "#binding",
                "#punctuation_isa",
                "#punctuation_colon",
                "#punctuation_option",
                "#punctuation_bind",
                "#punctuation_arrow",
                "#expression",
            ] },
        ),
        ("expression", group! { patterns: includes!["#clause", "#operator", "#selector", "#operand"] }),
        ("import", rule_import()),
        (
            "operand",
            group! { patterns: includes![
                "#top",
                "#bottom",
                "#null",
                "#bool",
                "#number",
                "#string",
                "#type",
                "#call",
                "#identifier",
                "#struct",
                "#brackets",
                "#parens",
            ] },
        ),
        ("package", rule_package()),
        ("parens", rule_parens()),
        ("selector", rule_selector()),
        ("struct", rule_struct()),
    ]
}

/// `@name(...)`
fn rule_attribute() -> Rule {
    region! {
        begin: format!(r"(@)({IDENT_ANY})(\()"),
        begin_captures: {
            1 => "punctuation.definition.annotation",
            2 => "variable.annotation",
            3 => "punctuation.attribute-elements.begin",
        },
        end: r"\)",
        end_captures: { 0 => "punctuation.attribute-elements.end" },
        patterns: includes!["#punctuation_comma", "#attribute_element"],
        name: "meta.annotation",
    }
}

/// `key=value` inside an attribute.
fn rule_attribute_label() -> Rule {
    region! {
        begin: format!("({IDENT_ANY})(=)"),
        begin_captures: { 1 => "variable.other", 2 => "punctuation.bind" },
        end: r"(?=[,\)])",
        patterns: includes!["#attribute_string"],
    }
}

/// `key(...)` inside an attribute.
fn rule_attribute_nested() -> Rule {
    region! {
        begin: format!(r"({IDENT_ANY})(\()"),
        begin_captures: { 1 => "variable.other", 2 => "punctuation.attribute-elements.begin" },
        end: r"\)",
        end_captures: { 0 => "punctuation.attribute-elements.end" },
        patterns: includes!["#punctuation_comma", "#attribute_element"],
    }
}

fn rule_attribute_string() -> Rule {
    group! {
        patterns: vec![
            Rule::include("#string"),
            leaf! { match: r#"[^\n,"'#=\(\)]+"#, name: "string.unquoted" },
            leaf! { match: r"[^,\)]+", name: "invalid" },
        ],
    }
}

/// `<Name>` generic binding.
fn rule_binding() -> Rule {
    leaf! {
        match: format!("(<)({IDENT_ANY}|_)(>)"),
        captures: {
            1 => "punctuation.definition.generic.begin",
            2 => "variable.other",
            3 => "punctuation.definition.generic.end",
        },
        name: "meta.generic",
    }
}

/// `[ ... ]` list.
fn rule_brackets() -> Rule {
    region! {
        begin: r"\[",
        begin_captures: { 0 => "punctuation.section.brackets.begin" },
        end: r"\]",
        end_captures: { 0 => "punctuation.section.brackets.end" },
        patterns: includes![
            "#whitespace",
            "#comment",
            "#punctuation_colon",
            "#punctuation_comma",
            "#punctuation_ellipsis",
            "#expression",
            "#invalid_in_brakets",
        ],
        name: "meta.brackets",
    }
}

/// Builtin call: `len(x)`, `close(x)`, `and(x)`, `or(x)`.
fn rule_call_predefined() -> Rule {
    region! {
        begin: format!(r"{BEFORE_IDENT}(len|close|and|or)(\()"),
        begin_captures: { 1 => "support.function", 2 => "punctuation.section.parens.begin" },
        end: r"\)",
        end_captures: { 0 => "punctuation.section.parens.end" },
        patterns: call_arguments(),
        name: "meta.function-call",
    }
}

/// Package call: `strings.ToUpper(x)`.
fn rule_call_qualified() -> Rule {
    region! {
        begin: format!(r"{BEFORE_IDENT}({IDENT_PACKAGE})(\.)({IDENT_EXPORTED})(\()"),
        begin_captures: {
            1 => "support.module",
            2 => "punctuation",
            3 => "support.function",
            4 => "punctuation.section.parens.begin",
        },
        end: r"\)",
        end_captures: { 0 => "punctuation.section.parens.end" },
        patterns: call_arguments(),
        name: "meta.function-call",
    }
}

fn call_arguments() -> Vec<Rule> {
    includes!["#whitespace", "#comment", "#punctuation_comma", "#expression", "#invalid_in_parens"]
}

/// Comprehension clauses: `for k, v in`, `if`, `let x =`.
fn rule_clause() -> Rule {
    group! {
        patterns: vec![
            leaf! {
                match: format!(
                    r"{BEFORE_IDENT}(for)[ \t]+({IDENT_ANY})(?:[ \t]*(,)[ \t]*({IDENT_ANY}))?[ \t]+(in){AFTER_IDENT}"
                ),
                captures: {
                    1 => "keyword.control.for",
                    2 => "variable.other",
                    3 => "punctuation.separator",
                    4 => "variable.other",
                    5 => "keyword.control.in",
                },
            },
            leaf! {
                match: format!("{BEFORE_IDENT}if{AFTER_IDENT}"),
                name: "keyword.control.conditional",
            },
            leaf! {
                match: format!(r"{BEFORE_IDENT}(let)[ \t]+({IDENT_ANY})[ \t]*(=)(?![=])"),
                captures: { 1 => "keyword.control.let", 2 => "variable.other", 3 => "punctuation.bind" },
            },
        ],
    }
}

/// Capture names for the groups of [`IMPORT_SPEC`], numbered from `first`.
fn import_spec_captures(first: u32) -> Captures {
    [
        "entity.name.namespace",
        "punctuation.definition.string.begin",
        "string.quoted.double-import",
        "punctuation.colon",
        "entity.name",
        "punctuation.definition.string.end",
    ]
    .into_iter()
    .zip(first..)
    .map(|(name, idx)| (idx, Capture::named(name)))
    .collect()
}

/// `import "path"` and `import ( ... )`.
fn rule_import() -> Rule {
    let import_spec = Rule::Match(MatchRule {
        pattern: IMPORT_SPEC.to_string(),
        captures: import_spec_captures(1),
        name: Some("meta.import-spec".to_string()),
    });

    let block = region! {
        begin: format!(r"{BEFORE_IDENT}(import)[ \t]+(\()"),
        begin_captures: { 1 => "keyword.other.import", 2 => "punctuation.section.parens.begin" },
        end: r"\)",
        end_captures: { 0 => "punctuation.section.parens.end" },
        patterns: vec![
            Rule::include("#whitespace"),
            Rule::include("#comment"),
            import_spec,
            leaf! { match: ";", name: "punctuation.separator" },
            Rule::include("#invalid_in_parens"),
        ],
        name: "meta.imports",
    };

    let mut captures = import_spec_captures(2);
    captures.insert(1, Capture::named("keyword.other.import"));
    let single = Rule::Match(MatchRule {
        pattern: format!(r"{BEFORE_IDENT}(import)[ \t]+{IMPORT_SPEC}"),
        captures,
        name: Some("meta.import".to_string()),
    });

    group! { patterns: vec![block, single] }
}

/// `package name`
fn rule_package() -> Rule {
    leaf! {
        match: format!(r"{BEFORE_IDENT}(package)[ \t]+({IDENT_PACKAGE}){AFTER_IDENT}"),
        captures: { 1 => "keyword.other.package", 2 => "entity.name.namespace" },
    }
}

/// `( ... )`
fn rule_parens() -> Rule {
    region! {
        begin: r"\(",
        begin_captures: { 0 => "punctuation.section.parens.begin" },
        end: r"\)",
        end_captures: { 0 => "punctuation.section.parens.end" },
        patterns: includes!["#whitespace", "#comment", "#punctuation_comma", "#expression", "#invalid_in_parens"],
        name: "meta.parens",
    }
}

/// `.field`
fn rule_selector() -> Rule {
    leaf! {
        match: format!(r"(?<!\.)(\.)({IDENT_ANY}){AFTER_IDENT}"),
        captures: { 1 => "punctuation.accessor", 2 => "variable.other.member" },
    }
}

/// `{ ... }`
fn rule_struct() -> Rule {
    region! {
        begin: r"\{",
        begin_captures: { 0 => "punctuation.definition.struct.begin" },
        end: r"\}",
        end_captures: { 0 => "punctuation.definition.struct.end" },
        patterns: includes![
            "#whitespace",
            "#comment",
            "#punctuation_comma",
            "#punctuation_ellipsis",
            "#declaration",
            "#invalid_in_braces",
        ],
        name: "meta.struct",
    }
}
