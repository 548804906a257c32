//! Eligibility filtering and bucket partitioning.
//!
//! Narrows the validated inventory to instances that are actual termination
//! candidates and groups them by (zone, purchase option) bucket. Every
//! rejection is recorded with a reason for the audit trail.

use std::collections::HashMap;

use tracing::debug;

use scythe_core::{BucketKey, Exclusion, InstanceRecord, PolicyConfig};

/// Partition instances into candidate buckets, dropping protected ones.
///
/// Instances flagged `ProtectedFromScaleIn` are excluded unless
/// `config.protected_override` is set. Instances in unrequested buckets
/// never reach this stage (they are excluded during event validation), so
/// every surviving instance lands in a bucket some capacity request names.
pub fn partition(
    instances: &[InstanceRecord],
    config: &PolicyConfig,
) -> (HashMap<BucketKey, Vec<InstanceRecord>>, Vec<Exclusion>) {
    let mut buckets: HashMap<BucketKey, Vec<InstanceRecord>> = HashMap::new();
    let mut exclusions = Vec::new();

    for inst in instances {
        if inst.protected_from_scale_in && !config.protected_override {
            debug!(
                instance = %inst.instance_id,
                bucket = %inst.bucket,
                "protected from scale-in, excluded"
            );
            exclusions.push(Exclusion {
                instance_id: inst.instance_id.clone(),
                reason: "protected from scale-in".to_string(),
            });
            continue;
        }

        buckets
            .entry(inst.bucket.clone())
            .or_default()
            .push(inst.clone());
    }

    (buckets, exclusions)
}
