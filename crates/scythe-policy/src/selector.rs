//! Greedy per-bucket selection.
//!
//! Consumes each bucket's ranked candidates until the requested capacity is
//! satisfied or the bucket runs dry. Buckets are processed in the event's
//! request order; a shortfall in one bucket never blocks or rolls back
//! selections already made in another.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use scythe_core::{BucketKey, BucketOutcome, CapacityRequest, TerminationDecision};

use crate::ranker::RankedCandidate;

/// Produce the termination set for the given capacity requests.
///
/// A claimed-set guard guarantees no instance id appears twice in the
/// output; the first bucket to claim an instance wins.
pub fn select(
    requests: &[CapacityRequest],
    ranked: &HashMap<BucketKey, Vec<RankedCandidate>>,
) -> TerminationDecision {
    let mut claimed: HashSet<&str> = HashSet::new();
    let mut instance_ids = Vec::new();
    let mut per_bucket = Vec::with_capacity(requests.len());

    for request in requests {
        let candidates = ranked
            .get(&request.bucket)
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        let mut fulfilled = 0u32;
        for candidate in candidates {
            if fulfilled == request.capacity {
                break;
            }
            if !claimed.insert(candidate.instance_id.as_str()) {
                continue;
            }
            debug!(
                instance = %candidate.instance_id,
                bucket = %request.bucket,
                "selected for termination"
            );
            instance_ids.push(candidate.instance_id.clone());
            fulfilled += 1;
        }

        if fulfilled < request.capacity {
            warn!(
                bucket = %request.bucket,
                requested = request.capacity,
                fulfilled,
                "bucket ran out of eligible candidates"
            );
        }

        per_bucket.push(BucketOutcome {
            bucket: request.bucket.clone(),
            requested: request.capacity,
            fulfilled,
        });
    }

    TerminationDecision {
        instance_ids,
        per_bucket,
    }
}
