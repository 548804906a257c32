//! Policy configuration.
//!
//! All decision knobs live here; nothing is hard-coded in the pipeline.
//! Loaded from a TOML file, with `SCYTHE_*` environment variables layered
//! on top so a deployment can flip a single knob without shipping a file.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Allow terminating instances flagged `ProtectedFromScaleIn`.
    /// Protection is honored by default.
    pub protected_override: bool,
    /// Rank older instances first (launch time ascending).
    pub prefer_oldest: bool,
    /// Rank unhealthy instances before all healthy ones, regardless of age.
    pub prefer_unhealthy: bool,
    /// When > 0, break launch-time ties by hourly cost descending
    /// (costlier instance types terminated first).
    pub instance_type_cost_weight: f64,
    /// Hard upper bound on instances in a single event.
    pub max_instances: usize,
    /// Estimated hourly cost (USD) by instance type, consulted only by the
    /// cost tie-break. Unknown types cost 0.0.
    pub instance_costs: HashMap<String, f64>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            protected_override: false,
            prefer_oldest: true,
            prefer_unhealthy: true,
            instance_type_cost_weight: 0.0,
            max_instances: 500,
            instance_costs: HashMap::new(),
        }
    }
}

impl PolicyConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: PolicyConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load from an optional file, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Overlay `SCYTHE_*` environment variables onto this config.
    ///
    /// Unparseable values are ignored rather than fatal; the file (or the
    /// default) stays authoritative.
    pub fn apply_env(&mut self) {
        if let Some(v) = env_parse("SCYTHE_PROTECTED_OVERRIDE") {
            self.protected_override = v;
        }
        if let Some(v) = env_parse("SCYTHE_PREFER_OLDEST") {
            self.prefer_oldest = v;
        }
        if let Some(v) = env_parse("SCYTHE_PREFER_UNHEALTHY") {
            self.prefer_unhealthy = v;
        }
        if let Some(v) = env_parse("SCYTHE_INSTANCE_TYPE_COST_WEIGHT") {
            self.instance_type_cost_weight = v;
        }
        if let Some(v) = env_parse("SCYTHE_MAX_INSTANCES") {
            self.max_instances = v;
        }
    }

    /// Hourly cost for an instance type; 0.0 when not in the table.
    pub fn hourly_cost(&self, instance_type: &str) -> f64 {
        self.instance_costs
            .get(instance_type)
            .copied()
            .unwrap_or(0.0)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_honor_protection() {
        let config = PolicyConfig::default();
        assert!(!config.protected_override);
        assert!(config.prefer_oldest);
        assert!(config.prefer_unhealthy);
        assert_eq!(config.instance_type_cost_weight, 0.0);
        assert_eq!(config.max_instances, 500);
        assert!(config.instance_costs.is_empty());
    }

    #[test]
    fn parses_partial_toml() {
        let toml_str = r#"
protected_override = true
max_instances = 50

[instance_costs]
"t2.nano" = 0.0058
"m5.large" = 0.096
"#;
        let config: PolicyConfig = toml::from_str(toml_str).unwrap();
        assert!(config.protected_override);
        assert_eq!(config.max_instances, 50);
        // Unspecified knobs keep their defaults.
        assert!(config.prefer_oldest);
        assert_eq!(config.hourly_cost("m5.large"), 0.096);
    }

    #[test]
    fn unknown_instance_type_costs_nothing() {
        let config = PolicyConfig::default();
        assert_eq!(config.hourly_cost("x2gd.metal"), 0.0);
    }
}
