//! Domain types for termination decisions.
//!
//! These are the strict internal types the decision pipeline operates on.
//! They are produced by validating the wire event (see [`crate::event`]) and
//! are never mutated after construction; every stage of the pipeline derives
//! new values instead.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a group member instance.
pub type InstanceId = String;

// ── Buckets ────────────────────────────────────────────────────────

/// How an instance's capacity is purchased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PurchaseOption {
    OnDemand,
    Spot,
}

impl fmt::Display for PurchaseOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PurchaseOption::OnDemand => write!(f, "OnDemand"),
            PurchaseOption::Spot => write!(f, "Spot"),
        }
    }
}

/// A (availability zone, purchase option) partition of the request and
/// the inventory. Capacity is requested and fulfilled per bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BucketKey {
    pub availability_zone: String,
    pub purchase_option: PurchaseOption,
}

impl BucketKey {
    pub fn new(zone: impl Into<String>, option: PurchaseOption) -> Self {
        Self {
            availability_zone: zone.into(),
            purchase_option: option,
        }
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.availability_zone, self.purchase_option)
    }
}

// ── Inventory ──────────────────────────────────────────────────────

/// One bucket's worth of capacity the caller wants removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityRequest {
    pub bucket: BucketKey,
    /// Number of instances to terminate in this bucket.
    pub capacity: u32,
}

/// Health of a group member at decision time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Immutable snapshot of one live group member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceRecord {
    pub instance_id: InstanceId,
    pub bucket: BucketKey,
    pub instance_type: String,
    /// Unix timestamp (seconds). `None` when the event did not carry it;
    /// unknown age ranks as newest.
    pub launch_time: Option<u64>,
    pub protected_from_scale_in: bool,
    pub health: HealthStatus,
}

// ── Decision output ────────────────────────────────────────────────

/// Requested vs. fulfilled capacity for one bucket, in request order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketOutcome {
    pub bucket: BucketKey,
    pub requested: u32,
    pub fulfilled: u32,
}

/// The termination set plus per-bucket accounting.
///
/// `fulfilled` may be less than `requested` when a bucket ran out of
/// eligible candidates; the shortfall is reported, never hidden.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminationDecision {
    /// Selected instances, in selection order. Never contains duplicates.
    pub instance_ids: Vec<InstanceId>,
    pub per_bucket: Vec<BucketOutcome>,
}

// ── Audit trail ────────────────────────────────────────────────────

/// Why one selected instance was ranked where it was.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionAudit {
    pub instance_id: InstanceId,
    pub bucket: BucketKey,
    /// Position in the bucket's total order; lower terminates first.
    pub score: f64,
    pub reasons: Vec<String>,
}

/// An instance removed from consideration before ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exclusion {
    pub instance_id: InstanceId,
    pub reason: String,
}

/// A bucket whose request could not be fully satisfied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shortfall {
    pub bucket: BucketKey,
    pub requested: u32,
    pub fulfilled: u32,
    pub reason: String,
}

/// The final decision together with the trail explaining it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditedDecision {
    pub decision: TerminationDecision,
    pub selections: Vec<SelectionAudit>,
    pub exclusions: Vec<Exclusion>,
    pub shortfalls: Vec<Shortfall>,
}
