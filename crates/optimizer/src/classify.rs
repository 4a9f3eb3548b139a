//! Threshold classification over normalized usage records
//!
//! Two independent rule passes run over disjoint service families:
//! compute records are binned into utilization classes, storage records
//! get a binary cold-eligibility test. Unknown (missing) numeric fields
//! never satisfy a threshold comparison, so incomplete rows land in the
//! least-alarming outcome.

use crate::models::{UsageRecord, UtilizationClass};
use crate::thresholds::ThresholdConfig;

/// Service-name fragments identifying compute offerings
const COMPUTE_SERVICES: &[&str] = &["ec2", "vm", "compute engine"];

/// Service-name fragments identifying storage offerings
const STORAGE_SERVICES: &[&str] = &["s3", "blob", "cloud storage"];

/// Coarse service family derived from the service name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Compute,
    Storage,
    Other,
}

/// Classify a service name by case-insensitive substring match.
///
/// Records matching neither family pass through the engine unclassified.
pub fn service_kind(service: Option<&str>) -> ServiceKind {
    let Some(service) = service else {
        return ServiceKind::Other;
    };

    let lower = service.to_lowercase();
    if COMPUTE_SERVICES.iter().any(|s| lower.contains(s)) {
        ServiceKind::Compute
    } else if STORAGE_SERVICES.iter().any(|s| lower.contains(s)) {
        ServiceKind::Storage
    } else {
        ServiceKind::Other
    }
}

/// Bin a compute record into a utilization class.
///
/// First match wins: idle, then underutilized, then ok. The idle rule
/// additionally requires meaningful runtime and cost so that cheap or
/// barely-running resources are not flagged.
pub fn classify_compute(record: &UsageRecord, th: &ThresholdConfig) -> UtilizationClass {
    let idle = record.cpu_avg.map_or(false, |cpu| cpu < th.idle_cpu_pct)
        && record
            .hours_running
            .map_or(false, |hours| hours > th.min_hours_active)
        && record
            .cost_usd
            .map_or(false, |cost| cost > th.min_cost_consider);
    if idle {
        return UtilizationClass::Idle;
    }

    let underutilized = record
        .cpu_avg
        .map_or(false, |cpu| cpu >= th.idle_cpu_pct && cpu < th.underutil_cpu_pct);
    if underutilized {
        UtilizationClass::Underutilized
    } else {
        UtilizationClass::Ok
    }
}

/// Binary cold-storage eligibility for a storage record
pub fn is_cold_storage(record: &UsageRecord, th: &ThresholdConfig) -> bool {
    record.storage_gb.map_or(false, |gb| gb > 0.0)
        && record
            .last_access_days
            .map_or(false, |days| days > th.storage_cold_days)
}
