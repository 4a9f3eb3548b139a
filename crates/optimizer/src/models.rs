//! Core data models for the cost optimizer

use serde::{Deserialize, Serialize};

/// One billing row per resource-month, as produced by the dataset normalizer.
///
/// Numeric fields use `None` for "unknown, not zero": an unknown value must
/// never satisfy a threshold comparison. Records are built once during
/// ingestion and never mutated by the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub provider: String,
    /// Missing service stays distinguishable for the by-service summary
    pub service: Option<String>,
    pub resource_id: String,
    pub region: Option<String>,
    /// Raw tag blob (`key=value;...` or a JSON object), decoded lazily
    pub tags: Option<String>,
    pub month: String,
    pub hours_running: Option<f64>,
    pub cpu_avg: Option<f64>,
    pub mem_avg: Option<f64>,
    pub cost_usd: Option<f64>,
    pub last_access_days: Option<f64>,
    pub storage_gb: Option<f64>,
}

/// Utilization class derived per compute record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UtilizationClass {
    Idle,
    Underutilized,
    Ok,
}

/// A single cost-saving recommendation.
///
/// Field order matches the CSV export column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub provider: String,
    pub service: Option<String>,
    pub resource_id: String,
    pub region: Option<String>,
    pub month: String,
    pub current_cost_usd: f64,
    pub recommendation: String,
    pub rationale: String,
    /// Rounded half-up to cents
    pub estimated_monthly_savings_usd: f64,
}

/// Summed cost for one service group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCost {
    pub service: String,
    pub cost_usd_total: f64,
}

/// Summed cost for one `env` tag value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvCost {
    pub env: String,
    pub cost_usd_total: f64,
}

/// Aggregated cost view over the whole dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSummary {
    /// Total monthly cost, rounded to cents
    pub total_cost: f64,
    /// Cost per service, descending
    pub by_service: Vec<ServiceCost>,
    /// Highest-cost rows, descending, full row detail
    pub top_resources: Vec<UsageRecord>,
    /// Cost per `env` tag value, descending; `None` when the input had no
    /// tags column (distinct from an empty breakdown)
    pub by_env: Option<Vec<EnvCost>>,
}

/// Full engine output: both rule passes plus the cost summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub compute: Vec<Recommendation>,
    pub storage: Vec<Recommendation>,
    pub summary: CostSummary,
}

/// Round a dollar amount half-up to cents
pub fn round_usd(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_usd_half_up() {
        assert_eq!(round_usd(90.005), 90.01);
        assert_eq!(round_usd(17.5), 17.5);
        assert_eq!(round_usd(0.004), 0.0);
        assert_eq!(round_usd(123.456), 123.46);
    }

    #[test]
    fn test_recommendation_serializes_in_export_order() {
        let rec = Recommendation {
            provider: "aws".to_string(),
            service: Some("EC2".to_string()),
            resource_id: "i-123".to_string(),
            region: None,
            month: "2024-01".to_string(),
            current_cost_usd: 100.0,
            recommendation: "Stop/Terminate if safe".to_string(),
            rationale: "Idle".to_string(),
            estimated_monthly_savings_usd: 90.0,
        };

        let json = serde_json::to_string(&rec).unwrap();
        let provider_pos = json.find("provider").unwrap();
        let savings_pos = json.find("estimated_monthly_savings_usd").unwrap();
        assert!(provider_pos < savings_pos);
    }
}
