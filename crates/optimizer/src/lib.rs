//! Cloud cost optimization engine
//!
//! This crate provides the core functionality for:
//! - Threshold configuration governing rule decisions
//! - Tag blob parsing
//! - Utilization classification of compute and storage records
//! - Savings recommendations with rationale text
//! - Cost summaries by service, resource, and tag

pub mod classify;
pub mod models;
pub mod recommend;
pub mod summary;
pub mod tags;
pub mod thresholds;

pub use classify::{classify_compute, is_cold_storage, service_kind, ServiceKind};
pub use models::*;
pub use recommend::{
    detect_compute_recommendations, detect_storage_recommendations, INSTANCE_DOWNGRADES,
};
pub use summary::summarize_costs;
pub use tags::parse_tags;
pub use thresholds::ThresholdConfig;

use tracing::{debug, warn};

/// Run both rule passes and the cost summary over a normalized dataset.
///
/// Pure function of (records, thresholds): performs no I/O and holds no
/// state across invocations. `has_tags` says whether the raw input carried
/// a tags column at all; without it the env breakdown is not applicable.
pub fn analyze(
    records: &[UsageRecord],
    has_tags: bool,
    thresholds: &ThresholdConfig,
) -> AnalysisReport {
    for warning in thresholds.warnings() {
        warn!("{warning}");
    }

    let compute = detect_compute_recommendations(records, thresholds);
    let storage = detect_storage_recommendations(records, thresholds);
    let summary = summarize_costs(records, has_tags);

    debug!(
        records = records.len(),
        compute = compute.len(),
        storage = storage.len(),
        "analysis complete"
    );

    AnalysisReport {
        compute,
        storage,
        summary,
    }
}
