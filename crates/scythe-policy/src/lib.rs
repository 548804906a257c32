//! Termination decision engine — eligibility, ranking, selection, audit.
//!
//! Given a scale-in event (capacity to remove per availability-zone and
//! purchase-option bucket, plus the live instance inventory), this crate
//! decides which specific instances to terminate. It performs no I/O and
//! holds no state between invocations; the transport layer (`scythed`)
//! adapts the orchestrator's invocation to [`engine::decide`].
//!
//! # Components
//!
//! - **`eligibility`** — protection filter + bucket partitioning
//! - **`ranker`** — per-bucket total-order ranking (unhealthy first, oldest
//!   first, cost tie-break)
//! - **`selector`** — greedy per-bucket capacity consumption
//! - **`report`** — audit trail assembly
//! - **`engine`** — pipeline composition

pub mod eligibility;
pub mod engine;
pub mod ranker;
pub mod report;
pub mod selector;

pub use eligibility::partition;
pub use engine::decide;
pub use ranker::{RankedCandidate, rank_bucket};
pub use report::report;
pub use selector::select;
