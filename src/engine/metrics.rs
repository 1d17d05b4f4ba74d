//! Run metrics.
//!
//! Collected on every run and surfaced through
//! [`crate::Report`] for the verbose CLI report and for tests.
//!
//! ## Design notes
//!
//! - Timings are wall-clock and only meaningful relative to each other.
//! - Name lists are in the order the engine produced them: `inlined` in
//!   inlining order, `shared` and `pruned` in repository (name) order.

use std::time::Duration;

#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    /// Total elapsed time for [`crate::simplify`].
    pub total: Duration,
    /// Time spent in reference counting.
    pub counting: Duration,
    /// Time spent inlining and pruning.
    pub compaction: Duration,
    /// Distinct names referenced at least once.
    pub referenced: usize,
    /// Repository entries before the run.
    pub entries_before: usize,
    /// Repository entries after the run.
    pub entries_after: usize,
    /// Names inlined at their single use site.
    pub inlined: Vec<String>,
    /// Names kept as shared repository entries (count >= 2).
    pub shared: Vec<String>,
    /// Names removed as unused.
    pub pruned: Vec<String>,
}
