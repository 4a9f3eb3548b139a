//! Threshold configuration governing all rule decisions

use serde::{Deserialize, Serialize};

/// Tunable thresholds for classification and savings estimates.
///
/// Construction is permissive: inconsistent values are accepted and
/// reported through [`ThresholdConfig::warnings`] instead of being
/// rejected, so interactive callers can probe odd settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// CPU percent below which a resource may be idle
    pub idle_cpu_pct: f64,
    /// CPU percent below which a resource is underutilized
    pub underutil_cpu_pct: f64,
    /// Running hours per month a resource must exceed for the idle rule
    pub min_hours_active: f64,
    /// Monthly cost (USD) a resource must exceed for the idle rule
    pub min_cost_consider: f64,
    /// Fraction of cost saved by rightsizing one tier, in [0, 1]
    pub rightsizing_savings_pct: f64,
    /// Fraction of cost saved by stopping an idle resource, in [0, 1]
    pub idle_stop_savings_pct: f64,
    /// Days since last access after which storage counts as cold
    pub storage_cold_days: f64,
    /// Fraction of cost saved by tiering cold storage, in [0, 1]
    pub storage_savings_pct: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            idle_cpu_pct: 5.0,
            underutil_cpu_pct: 20.0,
            min_hours_active: 100.0,
            min_cost_consider: 5.0,
            rightsizing_savings_pct: 0.35,
            idle_stop_savings_pct: 0.90,
            storage_cold_days: 30.0,
            storage_savings_pct: 0.40,
        }
    }
}

impl ThresholdConfig {
    /// Report inconsistent settings without rejecting them.
    ///
    /// An idle threshold at or above the underutilized threshold leaves
    /// the underutilized band empty or overlapping, which is almost
    /// certainly a configuration mistake.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.idle_cpu_pct >= self.underutil_cpu_pct {
            warnings.push(format!(
                "idle_cpu_pct ({}) is not below underutil_cpu_pct ({}); \
                 the underutilized band is empty",
                self.idle_cpu_pct, self.underutil_cpu_pct
            ));
        }

        for (name, value) in [
            ("rightsizing_savings_pct", self.rightsizing_savings_pct),
            ("idle_stop_savings_pct", self.idle_stop_savings_pct),
            ("storage_savings_pct", self.storage_savings_pct),
        ] {
            if !(0.0..=1.0).contains(&value) {
                warnings.push(format!("{} ({}) is outside [0, 1]", name, value));
            }
        }

        warnings
    }
}
