//! Scale-in event wire model and boundary validation.
//!
//! The field names here are the calling orchestrator's contract and must not
//! change: the request carries `CapacityToTerminate` and `Instances` in
//! PascalCase, and the response is exactly `{"InstanceIDs": [...]}`.
//!
//! Validation converts the loosely-typed wire event into strict internal
//! types immediately (fail fast at the boundary); the ranking and selection
//! stages never see raw event data.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PolicyConfig;
use crate::error::{DecisionError, DecisionResult};
use crate::types::{
    BucketKey, CapacityRequest, Exclusion, HealthStatus, InstanceId, InstanceRecord,
    PurchaseOption, TerminationDecision,
};

// ── Wire types ─────────────────────────────────────────────────────

/// A scale-in event as delivered by the orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScaleInEvent {
    #[serde(rename = "AutoScalingGroupARN")]
    pub auto_scaling_group_arn: String,
    pub auto_scaling_group_name: String,
    pub capacity_to_terminate: Vec<CapacityToTerminate>,
    pub instances: Vec<EventInstance>,
    /// e.g. `"SCALE_IN"`.
    pub cause: String,
}

/// One requested (zone, purchase option) capacity reduction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CapacityToTerminate {
    pub availability_zone: String,
    /// Signed on the wire so a negative value is rejected with a clear
    /// validation error instead of a deserialization failure.
    pub capacity: i64,
    pub instance_market_option: PurchaseOption,
}

/// One live group member as described by the event.
///
/// `LaunchTime`, `ProtectedFromScaleIn` and `HealthStatus` are optional
/// because the orchestrator's minimal event omits them; they default to
/// unknown age, unprotected and healthy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EventInstance {
    pub availability_zone: String,
    pub instance_id: InstanceId,
    pub instance_type: String,
    pub instance_market_option: PurchaseOption,
    /// Unix timestamp, seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch_time: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protected_from_scale_in: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_status: Option<HealthStatus>,
}

/// The response wire shape expected by the orchestrator. Fixed contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionResponse {
    #[serde(rename = "InstanceIDs")]
    pub instance_ids: Vec<InstanceId>,
}

impl From<&TerminationDecision> for DecisionResponse {
    fn from(decision: &TerminationDecision) -> Self {
        Self {
            instance_ids: decision.instance_ids.clone(),
        }
    }
}

// ── Validation ─────────────────────────────────────────────────────

/// The validated inventory a decision runs against.
#[derive(Debug, Clone)]
pub struct Inventory {
    /// Capacity requests in event order. Bucket keys are unique.
    pub requests: Vec<CapacityRequest>,
    /// Instances whose bucket was actually requested.
    pub instances: Vec<InstanceRecord>,
    /// Instances dropped at the boundary (unrequested bucket).
    pub exclusions: Vec<Exclusion>,
}

impl ScaleInEvent {
    /// Deserialize an event from raw JSON.
    pub fn parse(raw: &str) -> DecisionResult<Self> {
        serde_json::from_str(raw).map_err(|e| DecisionError::MalformedEvent(e.to_string()))
    }

    /// Validate the event and build the inventory the pipeline runs on.
    ///
    /// Instances in a (zone, purchase option) bucket that no capacity
    /// request names are excluded from consideration, never terminated.
    pub fn validate(&self, config: &PolicyConfig) -> DecisionResult<Inventory> {
        if self.instances.len() > config.max_instances {
            return Err(DecisionError::OversizedEvent {
                count: self.instances.len(),
                limit: config.max_instances,
            });
        }

        let mut requests = Vec::with_capacity(self.capacity_to_terminate.len());
        let mut requested: HashSet<BucketKey> = HashSet::new();
        for cap in &self.capacity_to_terminate {
            let bucket = BucketKey::new(cap.availability_zone.clone(), cap.instance_market_option);
            if cap.capacity < 0 {
                return Err(DecisionError::MalformedEvent(format!(
                    "negative capacity {} for bucket {bucket}",
                    cap.capacity
                )));
            }
            if !requested.insert(bucket.clone()) {
                return Err(DecisionError::MalformedEvent(format!(
                    "duplicate capacity bucket {bucket}"
                )));
            }
            let capacity = u32::try_from(cap.capacity).map_err(|_| {
                DecisionError::MalformedEvent(format!(
                    "capacity {} out of range for bucket {bucket}",
                    cap.capacity
                ))
            })?;
            requests.push(CapacityRequest { bucket, capacity });
        }

        let mut seen: HashSet<&str> = HashSet::new();
        let mut instances = Vec::with_capacity(self.instances.len());
        let mut exclusions = Vec::new();
        for inst in &self.instances {
            if !seen.insert(inst.instance_id.as_str()) {
                return Err(DecisionError::MalformedEvent(format!(
                    "duplicate instance id {}",
                    inst.instance_id
                )));
            }
            let bucket = BucketKey::new(inst.availability_zone.clone(), inst.instance_market_option);
            if !requested.contains(&bucket) {
                debug!(
                    instance = %inst.instance_id,
                    bucket = %bucket,
                    "instance in unrequested bucket, excluded"
                );
                exclusions.push(Exclusion {
                    instance_id: inst.instance_id.clone(),
                    reason: format!("unrequested bucket {bucket}"),
                });
                continue;
            }
            instances.push(InstanceRecord {
                instance_id: inst.instance_id.clone(),
                bucket,
                instance_type: inst.instance_type.clone(),
                launch_time: inst.launch_time,
                protected_from_scale_in: inst.protected_from_scale_in.unwrap_or(false),
                health: inst.health_status.unwrap_or(HealthStatus::Healthy),
            });
        }

        Ok(Inventory {
            requests,
            instances,
            exclusions,
        })
    }
}
