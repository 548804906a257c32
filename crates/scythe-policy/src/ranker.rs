//! Per-bucket candidate ranking.
//!
//! Orders a bucket's eligible instances into the sequence they would be
//! terminated in. The ordering is a total order — every comparison chain
//! ends at the lexicographic instance id, so repeated runs over identical
//! input produce identical output.
//!
//! Precedence, each key applied only when the previous ones tie:
//! 1. `prefer_unhealthy` — unhealthy instances before all healthy ones
//! 2. `prefer_oldest` — launch time ascending; unknown age ranks newest
//! 3. `instance_type_cost_weight` > 0 — hourly cost descending
//! 4. instance id, lexicographic

use std::cmp::Ordering;

use scythe_core::{HealthStatus, InstanceId, InstanceRecord, PolicyConfig};

/// One ranked termination candidate within a bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    pub instance_id: InstanceId,
    /// Position in the bucket's total order; lower terminates first.
    pub score: f64,
    /// Human-readable ranking inputs, for the audit trail.
    pub reasons: Vec<String>,
}

/// Rank one bucket's instances, terminate-first order.
pub fn rank_bucket(instances: &[InstanceRecord], config: &PolicyConfig) -> Vec<RankedCandidate> {
    let mut ordered: Vec<&InstanceRecord> = instances.iter().collect();
    ordered.sort_by(|a, b| compare(a, b, config));

    ordered
        .into_iter()
        .enumerate()
        .map(|(position, inst)| RankedCandidate {
            instance_id: inst.instance_id.clone(),
            score: position as f64,
            reasons: reasons_for(inst, config),
        })
        .collect()
}

fn compare(a: &InstanceRecord, b: &InstanceRecord, config: &PolicyConfig) -> Ordering {
    let mut ord = Ordering::Equal;

    if config.prefer_unhealthy {
        ord = health_rank(a.health).cmp(&health_rank(b.health));
    }
    if ord == Ordering::Equal && config.prefer_oldest {
        ord = age_key(a).cmp(&age_key(b));
    }
    if ord == Ordering::Equal && config.instance_type_cost_weight > 0.0 {
        let cost_a = config.hourly_cost(&a.instance_type);
        let cost_b = config.hourly_cost(&b.instance_type);
        // Costlier first.
        ord = cost_b.partial_cmp(&cost_a).unwrap_or(Ordering::Equal);
    }

    ord.then_with(|| a.instance_id.cmp(&b.instance_id))
}

fn health_rank(health: HealthStatus) -> u8 {
    match health {
        HealthStatus::Unhealthy => 0,
        HealthStatus::Healthy => 1,
    }
}

/// Known launch times sort before unknown, then ascending (oldest first).
fn age_key(inst: &InstanceRecord) -> (bool, u64) {
    match inst.launch_time {
        Some(t) => (false, t),
        None => (true, 0),
    }
}

fn reasons_for(inst: &InstanceRecord, config: &PolicyConfig) -> Vec<String> {
    let mut reasons = Vec::new();
    if config.prefer_unhealthy && inst.health == HealthStatus::Unhealthy {
        reasons.push("unhealthy".to_string());
    }
    if config.prefer_oldest {
        match inst.launch_time {
            Some(t) => reasons.push(format!("launch time {t}")),
            None => reasons.push("launch time unknown".to_string()),
        }
    }
    if config.instance_type_cost_weight > 0.0 {
        reasons.push(format!(
            "{} hourly cost {:.4}",
            inst.instance_type,
            config.hourly_cost(&inst.instance_type)
        ));
    }
    reasons
}

#[cfg(test)]
mod tests {
    use super::*;
    use scythe_core::{BucketKey, PurchaseOption};

    fn make_instance(id: &str, launch_time: Option<u64>, health: HealthStatus) -> InstanceRecord {
        InstanceRecord {
            instance_id: id.to_string(),
            bucket: BucketKey::new("us-east-1c", PurchaseOption::OnDemand),
            instance_type: "t2.nano".to_string(),
            launch_time,
            protected_from_scale_in: false,
            health,
        }
    }

    fn ids(ranked: &[RankedCandidate]) -> Vec<&str> {
        ranked.iter().map(|c| c.instance_id.as_str()).collect()
    }

    #[test]
    fn oldest_first() {
        let instances = vec![
            make_instance("i-new", Some(3000), HealthStatus::Healthy),
            make_instance("i-old", Some(1000), HealthStatus::Healthy),
            make_instance("i-mid", Some(2000), HealthStatus::Healthy),
        ];

        let ranked = rank_bucket(&instances, &PolicyConfig::default());
        assert_eq!(ids(&ranked), ["i-old", "i-mid", "i-new"]);
    }

    #[test]
    fn unhealthy_outranks_age() {
        let instances = vec![
            make_instance("i-old", Some(1000), HealthStatus::Healthy),
            make_instance("i-sick", Some(9000), HealthStatus::Unhealthy),
        ];

        let ranked = rank_bucket(&instances, &PolicyConfig::default());
        assert_eq!(ids(&ranked), ["i-sick", "i-old"]);
        assert!(ranked[0].reasons.contains(&"unhealthy".to_string()));
    }

    #[test]
    fn unknown_age_ranks_newest() {
        let instances = vec![
            make_instance("i-unknown", None, HealthStatus::Healthy),
            make_instance("i-dated", Some(5000), HealthStatus::Healthy),
        ];

        let ranked = rank_bucket(&instances, &PolicyConfig::default());
        assert_eq!(ids(&ranked), ["i-dated", "i-unknown"]);
    }

    #[test]
    fn cost_breaks_launch_time_ties() {
        let mut cheap = make_instance("i-cheap", Some(1000), HealthStatus::Healthy);
        cheap.instance_type = "t2.nano".to_string();
        let mut costly = make_instance("i-costly", Some(1000), HealthStatus::Healthy);
        costly.instance_type = "m5.large".to_string();

        let mut config = PolicyConfig {
            instance_type_cost_weight: 1.0,
            ..PolicyConfig::default()
        };
        config.instance_costs.insert("t2.nano".to_string(), 0.0058);
        config.instance_costs.insert("m5.large".to_string(), 0.096);

        let ranked = rank_bucket(&[cheap, costly], &config);
        assert_eq!(ids(&ranked), ["i-costly", "i-cheap"]);
    }

    #[test]
    fn cost_does_not_override_age() {
        let mut older_cheap = make_instance("i-old", Some(1000), HealthStatus::Healthy);
        older_cheap.instance_type = "t2.nano".to_string();
        let mut newer_costly = make_instance("i-new", Some(2000), HealthStatus::Healthy);
        newer_costly.instance_type = "m5.large".to_string();

        let mut config = PolicyConfig {
            instance_type_cost_weight: 100.0,
            ..PolicyConfig::default()
        };
        config.instance_costs.insert("m5.large".to_string(), 0.096);

        let ranked = rank_bucket(&[older_cheap, newer_costly], &config);
        assert_eq!(ids(&ranked), ["i-old", "i-new"]);
    }

    #[test]
    fn instance_id_is_the_final_tie_break() {
        let instances = vec![
            make_instance("i-bbb", Some(1000), HealthStatus::Healthy),
            make_instance("i-aaa", Some(1000), HealthStatus::Healthy),
        ];

        let ranked = rank_bucket(&instances, &PolicyConfig::default());
        assert_eq!(ids(&ranked), ["i-aaa", "i-bbb"]);
    }

    #[test]
    fn disabled_age_preference_falls_through_to_id() {
        let instances = vec![
            make_instance("i-bbb", Some(1000), HealthStatus::Healthy),
            make_instance("i-aaa", Some(9000), HealthStatus::Healthy),
        ];
        let config = PolicyConfig {
            prefer_oldest: false,
            ..PolicyConfig::default()
        };

        let ranked = rank_bucket(&instances, &config);
        assert_eq!(ids(&ranked), ["i-aaa", "i-bbb"]);
    }

    #[test]
    fn disabled_health_preference_ignores_health() {
        let instances = vec![
            make_instance("i-sick", Some(9000), HealthStatus::Unhealthy),
            make_instance("i-old", Some(1000), HealthStatus::Healthy),
        ];
        let config = PolicyConfig {
            prefer_unhealthy: false,
            ..PolicyConfig::default()
        };

        let ranked = rank_bucket(&instances, &config);
        assert_eq!(ids(&ranked), ["i-old", "i-sick"]);
    }

    #[test]
    fn ranking_is_input_order_independent() {
        let forward = vec![
            make_instance("i-a", Some(2000), HealthStatus::Healthy),
            make_instance("i-b", Some(1000), HealthStatus::Unhealthy),
            make_instance("i-c", Some(1000), HealthStatus::Healthy),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        let config = PolicyConfig::default();
        assert_eq!(rank_bucket(&forward, &config), rank_bucket(&reversed, &config));
    }

    #[test]
    fn scores_are_positions() {
        let instances = vec![
            make_instance("i-new", Some(3000), HealthStatus::Healthy),
            make_instance("i-old", Some(1000), HealthStatus::Healthy),
        ];

        let ranked = rank_bucket(&instances, &PolicyConfig::default());
        assert_eq!(ranked[0].score, 0.0);
        assert_eq!(ranked[1].score, 1.0);
    }
}
