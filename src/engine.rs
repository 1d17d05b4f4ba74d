//! Rule-graph compaction engine.
//!
//! A grammar arrives as a top-level pattern list plus a repository of named
//! rules that may refer to each other (and to themselves) through `#name`
//! includes. The engine rewrites that graph into the smallest equivalent form:
//!
//! ```text
//! Grammar ──▶ validate                  (validate.rs)
//!               │  repository names are includable, root is non-empty
//!               v
//!             count_references          (refcount.rs)
//!               │  name -> occurrence count, visiting each body once
//!               │  unresolved include -> fatal, nothing mutated yet
//!               v
//!             compact                   (compactor.rs)
//!               │  count == 1 -> inline compacted body, drop entry
//!               │  count >= 2 -> keep the include
//!               │  count == 0 -> prune entry, warn
//!               v
//!             Vec<Diagnostic> + RunMetrics
//! ```
//!
//! ## Responsibilities by module
//!
//! - `validate.rs`: structural checks that must pass before counting.
//! - `refcount.rs`: the cycle-safe reference counter and its `RefCounts` table.
//! - `compactor.rs`: single forward pass that inlines and prunes in place.
//! - `diagnostics.rs`: warning kinds, the `DiagnosticMask` used to deny them.
//! - `metrics.rs`: timings and per-phase outcomes for reporting.
//!
//! ## Determinism
//!
//! The repository is a `BTreeMap`, so entries are always visited in name order,
//! and diagnostics are sorted before they leave the engine. The same input
//! always yields the same grammar and the same diagnostics.

#[path = "engine/compactor.rs"]
mod compactor;
#[path = "engine/diagnostics.rs"]
mod diagnostics;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/refcount.rs"]
mod refcount;
#[path = "engine/validate.rs"]
mod validate;

#[cfg(test)]
#[path = "engine/tests.rs"]
mod tests;

pub(crate) use compactor::compact;
pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticMask};
pub(crate) use diagnostics::sort as sort_diagnostics;
pub use metrics::RunMetrics;
pub(crate) use refcount::count_references;
pub use refcount::RefCounts;
pub(crate) use validate::validate;
