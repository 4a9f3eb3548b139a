//! Recommendation generation from classified records
//!
//! Each rule pass walks the dataset in order and emits at most one
//! recommendation per record, so the outputs preserve input row order
//! and a record never appears in both passes.

use tracing::debug;

use crate::classify::{classify_compute, is_cold_storage, service_kind, ServiceKind};
use crate::models::{round_usd, Recommendation, UsageRecord, UtilizationClass};
use crate::thresholds::ThresholdConfig;

/// One-step-down instance size suggestions, matched as substrings of the
/// resource id in order. Deliberately small and low-fidelity; ids that
/// match no pattern fall back to generic advice.
pub const INSTANCE_DOWNGRADES: &[(&str, &str)] = &[
    ("m5.large", "m5.medium"),
    ("m5.xlarge", "m5.large"),
    ("t3.large", "t3.medium"),
    ("t3.medium", "t3.small"),
    ("D4s_v5", "D2s_v5"),
    ("n2-standard-4", "n2-standard-2"),
];

const RIGHTSIZE_FALLBACK: &str = "Rightsize down one tier";

/// First downgrade pattern contained in the resource id, table order as
/// the tie-break
fn downgrade_suggestion(resource_id: &str) -> &'static str {
    INSTANCE_DOWNGRADES
        .iter()
        .find(|(pattern, _)| resource_id.contains(pattern))
        .map_or(RIGHTSIZE_FALLBACK, |(_, successor)| successor)
}

fn recommendation_for(
    record: &UsageRecord,
    text: String,
    rationale: String,
    savings: f64,
) -> Recommendation {
    Recommendation {
        provider: record.provider.clone(),
        service: record.service.clone(),
        resource_id: record.resource_id.clone(),
        region: record.region.clone(),
        month: record.month.clone(),
        current_cost_usd: record.cost_usd.unwrap_or(0.0),
        recommendation: text,
        rationale,
        estimated_monthly_savings_usd: round_usd(savings),
    }
}

/// Run the compute rule pass: idle resources get a stop suggestion,
/// underutilized ones a one-tier rightsizing suggestion.
pub fn detect_compute_recommendations(
    records: &[UsageRecord],
    th: &ThresholdConfig,
) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    for record in records {
        if service_kind(record.service.as_deref()) != ServiceKind::Compute {
            continue;
        }

        let cost = record.cost_usd.unwrap_or(0.0);
        match classify_compute(record, th) {
            UtilizationClass::Idle => {
                recs.push(recommendation_for(
                    record,
                    "Stop/Terminate if safe".to_string(),
                    format!(
                        "Idle resource: CPU {}% < {}%, hours {}",
                        record.cpu_avg.unwrap_or(f64::NAN),
                        th.idle_cpu_pct,
                        record.hours_running.unwrap_or(f64::NAN),
                    ),
                    cost * th.idle_stop_savings_pct,
                ));
            }
            UtilizationClass::Underutilized => {
                let target = downgrade_suggestion(&record.resource_id);
                recs.push(recommendation_for(
                    record,
                    format!("Rightsize → {}", target),
                    format!(
                        "Underutilized: CPU {}% < {}%",
                        record.cpu_avg.unwrap_or(f64::NAN),
                        th.underutil_cpu_pct,
                    ),
                    cost * th.rightsizing_savings_pct,
                ));
            }
            UtilizationClass::Ok => {}
        }
    }

    debug!(count = recs.len(), "compute recommendations generated");
    recs
}

/// Run the storage rule pass: cold-eligible records get a tiering
/// suggestion.
pub fn detect_storage_recommendations(
    records: &[UsageRecord],
    th: &ThresholdConfig,
) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    for record in records {
        if service_kind(record.service.as_deref()) != ServiceKind::Storage {
            continue;
        }
        if !is_cold_storage(record, th) {
            continue;
        }

        let cost = record.cost_usd.unwrap_or(0.0);
        recs.push(recommendation_for(
            record,
            "Move to colder storage tier".to_string(),
            format!(
                "Last accessed {} days ago; size ~{} GB",
                record.last_access_days.unwrap_or(0.0) as i64,
                record.storage_gb.unwrap_or(0.0) as i64,
            ),
            cost * th.storage_savings_pct,
        ));
    }

    debug!(count = recs.len(), "storage recommendations generated");
    recs
}
