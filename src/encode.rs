//! JSON encoding of a compacted grammar.
//!
//! The output follows the layout TextMate consumers expect:
//!
//! - tab indentation, one trailing newline;
//! - rule keys in the order `include, match, captures, begin, beginCaptures,
//!   end, endCaptures, contentName, patterns, name`;
//! - empty strings, lists and capture maps are omitted;
//! - `<`, `>` and `&` are written as-is.
//!
//! Encoding is a pure function of the grammar. It does not look at reference
//! counts: by the time it runs, shared rules are includes and everything else
//! has been inlined.

use crate::{Captures, Grammar, Result, Rule};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::ser::PrettyFormatter;
use std::io::Write;

/// Encode `grammar` as a tab-indented JSON document.
pub fn to_json(grammar: &Grammar) -> Result<String> {
    let mut buf = Vec::new();
    write_json(grammar, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

/// Write `grammar` as a tab-indented JSON document to `writer`.
pub fn write_json<W: Write>(grammar: &Grammar, mut writer: W) -> Result<()> {
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"\t"));
    grammar.serialize(&mut serializer)?;
    writer.write_all(b"\n")?;
    Ok(())
}

impl Serialize for Rule {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match self {
            Rule::Reference { include, name } => {
                text_entry(&mut map, "include", &include.to_string())?;
                opt_entry(&mut map, "name", name)?;
            }
            Rule::Match(m) => {
                text_entry(&mut map, "match", &m.pattern)?;
                captures_entry(&mut map, "captures", &m.captures)?;
                opt_entry(&mut map, "name", &m.name)?;
            }
            Rule::Region(r) => {
                captures_entry(&mut map, "captures", &r.captures)?;
                text_entry(&mut map, "begin", &r.begin)?;
                captures_entry(&mut map, "beginCaptures", &r.begin_captures)?;
                text_entry(&mut map, "end", &r.end)?;
                captures_entry(&mut map, "endCaptures", &r.end_captures)?;
                opt_entry(&mut map, "contentName", &r.content_name)?;
                patterns_entry(&mut map, &r.patterns)?;
                opt_entry(&mut map, "name", &r.name)?;
            }
            Rule::Group(g) => {
                patterns_entry(&mut map, &g.patterns)?;
                opt_entry(&mut map, "name", &g.name)?;
            }
        }
        map.end()
    }
}

fn text_entry<M: SerializeMap>(map: &mut M, key: &str, value: &str) -> std::result::Result<(), M::Error> {
    if value.is_empty() {
        return Ok(());
    }
    map.serialize_entry(key, value)
}

fn opt_entry<M: SerializeMap>(map: &mut M, key: &str, value: &Option<String>) -> std::result::Result<(), M::Error> {
    match value {
        Some(value) => text_entry(map, key, value),
        None => Ok(()),
    }
}

fn captures_entry<M: SerializeMap>(map: &mut M, key: &str, captures: &Captures) -> std::result::Result<(), M::Error> {
    if captures.is_empty() {
        return Ok(());
    }
    map.serialize_entry(key, captures)
}

fn patterns_entry<M: SerializeMap>(map: &mut M, patterns: &[Rule]) -> std::result::Result<(), M::Error> {
    if patterns.is_empty() {
        return Ok(());
    }
    map.serialize_entry("patterns", patterns)
}
