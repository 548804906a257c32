//! Audit trail assembly.
//!
//! Pure formatting over the selector's output: no decision logic lives
//! here. The result is serializable so the transport layer can hand the
//! full trail to external logging.

use std::collections::HashMap;

use scythe_core::{AuditedDecision, BucketKey, Exclusion, SelectionAudit, Shortfall, TerminationDecision};

use crate::ranker::RankedCandidate;

/// Assemble the final decision plus the trail explaining it.
///
/// For every selected instance: the ranking reasons that placed it. For
/// every under-fulfilled bucket: an explicit shortfall line.
pub fn report(
    decision: TerminationDecision,
    ranked: &HashMap<BucketKey, Vec<RankedCandidate>>,
    exclusions: Vec<Exclusion>,
) -> AuditedDecision {
    let mut by_id: HashMap<&str, (&BucketKey, &RankedCandidate)> = HashMap::new();
    for (bucket, candidates) in ranked {
        for candidate in candidates {
            by_id.entry(candidate.instance_id.as_str()).or_insert((bucket, candidate));
        }
    }

    let selections = decision
        .instance_ids
        .iter()
        .filter_map(|id| {
            by_id.get(id.as_str()).map(|(bucket, candidate)| SelectionAudit {
                instance_id: id.clone(),
                bucket: (*bucket).clone(),
                score: candidate.score,
                reasons: candidate.reasons.clone(),
            })
        })
        .collect();

    let shortfalls = decision
        .per_bucket
        .iter()
        .filter(|outcome| outcome.fulfilled < outcome.requested)
        .map(|outcome| Shortfall {
            bucket: outcome.bucket.clone(),
            requested: outcome.requested,
            fulfilled: outcome.fulfilled,
            reason: format!(
                "only {} eligible candidates for {} requested",
                outcome.fulfilled, outcome.requested
            ),
        })
        .collect();

    AuditedDecision {
        decision,
        selections,
        exclusions,
        shortfalls,
    }
}
