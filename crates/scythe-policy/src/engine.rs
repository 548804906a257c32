//! Pipeline composition.
//!
//! `decide` runs validate → partition → rank → select → report over one
//! scale-in event. It is stateless across invocations and safe to call
//! concurrently: every stage is a pure transformation over its arguments,
//! and either a complete decision comes back or an error does — no interim
//! state escapes on failure.

use std::collections::HashMap;

use tracing::info;

use scythe_core::{AuditedDecision, DecisionResult, PolicyConfig, ScaleInEvent};

use crate::{eligibility, ranker, report, selector};

/// Decide which instances to terminate for one scale-in event.
pub fn decide(event: &ScaleInEvent, config: &PolicyConfig) -> DecisionResult<AuditedDecision> {
    let inventory = event.validate(config)?;
    let (buckets, policy_exclusions) = eligibility::partition(&inventory.instances, config);

    let mut ranked = HashMap::new();
    for request in &inventory.requests {
        let candidates = buckets
            .get(&request.bucket)
            .map(|instances| ranker::rank_bucket(instances, config))
            .unwrap_or_default();
        ranked.insert(request.bucket.clone(), candidates);
    }

    let decision = selector::select(&inventory.requests, &ranked);

    let mut exclusions = inventory.exclusions;
    exclusions.extend(policy_exclusions);

    info!(
        group = %event.auto_scaling_group_name,
        cause = %event.cause,
        buckets = inventory.requests.len(),
        selected = decision.instance_ids.len(),
        excluded = exclusions.len(),
        "termination decision"
    );

    Ok(report::report(decision, &ranked, exclusions))
}
