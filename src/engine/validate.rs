//! Structural checks run before counting.

use crate::{Error, Grammar, Result};

/// Reject grammars the counter cannot meaningfully walk.
///
/// - the top-level pattern list must not be empty;
/// - every repository name must be writable as a `#name` include.
pub(crate) fn validate(grammar: &Grammar) -> Result<()> {
    if grammar.patterns.is_empty() {
        return Err(Error::EmptyGrammar);
    }

    let include_name = regex!(r"^[A-Za-z_][A-Za-z0-9_.\-]*$");
    if let Some(name) = grammar.repository.keys().find(|name| !include_name.is_match(name)) {
        return Err(Error::InvalidRuleName(name.clone()));
    }

    Ok(())
}
