//! Non-fatal findings of a compaction run.
//!
//! Fatal conditions are [`crate::Error`]s and abort the run. Everything here is
//! a warning: the pass still produces a complete grammar, and callers decide
//! through [`DiagnosticMask`] which kinds they refuse to accept.

use std::fmt;

bitflags::bitflags! {
    /// Set of diagnostic kinds, used by `Options::deny`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DiagnosticMask: u8 {
        const UNUSED_RULE = 1 << 0;
        const SINGLE_USE  = 1 << 1;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    /// Repository entry never referenced. The entry is removed.
    UnusedRule,
    /// Repository entry referenced once but not inlined. The entry is kept.
    SingleUseAnomaly,
}

impl DiagnosticKind {
    pub const ALL: [DiagnosticKind; 2] = [DiagnosticKind::UnusedRule, DiagnosticKind::SingleUseAnomaly];

    pub fn mask(self) -> DiagnosticMask {
        match self {
            DiagnosticKind::UnusedRule => DiagnosticMask::UNUSED_RULE,
            DiagnosticKind::SingleUseAnomaly => DiagnosticMask::SINGLE_USE,
        }
    }

    /// Short name used on the command line (`--deny unused`).
    pub fn label(self) -> &'static str {
        match self {
            DiagnosticKind::UnusedRule => "unused",
            DiagnosticKind::SingleUseAnomaly => "single-use",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == label)
    }
}

/// A warning about one repository entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub rule: String,
}

impl Diagnostic {
    pub fn unused(rule: impl Into<String>) -> Self {
        Diagnostic { kind: DiagnosticKind::UnusedRule, rule: rule.into() }
    }

    pub fn single_use(rule: impl Into<String>) -> Self {
        Diagnostic { kind: DiagnosticKind::SingleUseAnomaly, rule: rule.into() }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DiagnosticKind::UnusedRule => write!(f, "unused rule: {}", self.rule),
            DiagnosticKind::SingleUseAnomaly => write!(f, "rule used only once: {}", self.rule),
        }
    }
}

/// Order diagnostics by rule name, then kind.
pub(crate) fn sort(diagnostics: &mut [Diagnostic]) {
    diagnostics.sort_by(|a, b| a.rule.cmp(&b.rule).then(a.kind.cmp(&b.kind)));
}
