//! Cost aggregation across services, resources, and tag dimensions
//!
//! Summation treats unknown cost as zero, unlike classification where
//! unknown values never satisfy a rule. Each axis is its own reduction
//! so the pieces stay testable in isolation.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::{round_usd, CostSummary, EnvCost, ServiceCost, UsageRecord};
use crate::tags::parse_tags;

/// Number of rows retained in the top-resources view
const TOP_RESOURCE_LIMIT: usize = 20;

/// Bucket label for rows without a service or env value
const NO_VALUE_BUCKET: &str = "(none)";

/// Sum values per key, descending by sum; first-seen key order breaks ties.
fn sum_descending(pairs: impl Iterator<Item = (String, f64)>) -> Vec<(String, f64)> {
    let mut sums: HashMap<String, f64> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for (key, value) in pairs {
        if !sums.contains_key(&key) {
            order.push(key.clone());
        }
        *sums.entry(key).or_insert(0.0) += value;
    }

    let mut grouped: Vec<(String, f64)> = order
        .into_iter()
        .map(|key| {
            let sum = sums[&key];
            (key, sum)
        })
        .collect();
    grouped.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    grouped
}

/// Aggregate raw cost across all records.
///
/// `has_tags` says whether the raw input carried a tags column; without
/// one the env breakdown is reported as not applicable rather than empty.
pub fn summarize_costs(records: &[UsageRecord], has_tags: bool) -> CostSummary {
    let total: f64 = records.iter().filter_map(|r| r.cost_usd).sum();

    let by_service = sum_descending(records.iter().map(|r| {
        (
            r.service
                .clone()
                .unwrap_or_else(|| NO_VALUE_BUCKET.to_string()),
            r.cost_usd.unwrap_or(0.0),
        )
    }))
    .into_iter()
    .map(|(service, cost_usd_total)| ServiceCost {
        service,
        cost_usd_total,
    })
    .collect::<Vec<_>>();

    // stable sort keeps the original row order among equal costs;
    // unknown cost sorts last
    let mut top_resources: Vec<UsageRecord> = records.to_vec();
    top_resources.sort_by(|a, b| {
        let key = |r: &UsageRecord| r.cost_usd.unwrap_or(f64::NEG_INFINITY);
        key(b).partial_cmp(&key(a)).unwrap_or(Ordering::Equal)
    });
    top_resources.truncate(TOP_RESOURCE_LIMIT);

    let by_env = has_tags.then(|| {
        sum_descending(records.iter().map(|r| {
            let tags = parse_tags(r.tags.as_deref());
            (
                tags.get("env")
                    .cloned()
                    .unwrap_or_else(|| NO_VALUE_BUCKET.to_string()),
                r.cost_usd.unwrap_or(0.0),
            )
        }))
        .into_iter()
        .map(|(env, cost_usd_total)| EnvCost {
            env,
            cost_usd_total,
        })
        .collect::<Vec<_>>()
    });

    CostSummary {
        total_cost: round_usd(total),
        by_service,
        top_resources,
        by_env,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(service: Option<&str>, cost: Option<f64>, tags: Option<&str>) -> UsageRecord {
        UsageRecord {
            service: service.map(str::to_string),
            cost_usd: cost,
            tags: tags.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_total_treats_unknown_cost_as_zero() {
        let records = vec![
            record(Some("EC2"), Some(10.5), None),
            record(Some("S3"), None, None),
            record(Some("EC2"), Some(4.5), None),
        ];

        let summary = summarize_costs(&records, false);
        assert_eq!(summary.total_cost, 15.0);
    }

    #[test]
    fn test_by_service_partitions_total() {
        let records = vec![
            record(Some("EC2"), Some(100.0), None),
            record(Some("S3"), Some(30.0), None),
            record(None, Some(20.0), None),
            record(Some("EC2"), Some(50.0), None),
        ];

        let summary = summarize_costs(&records, false);
        let partition_sum: f64 = summary.by_service.iter().map(|s| s.cost_usd_total).sum();
        assert!((partition_sum - summary.total_cost).abs() < 1e-9);

        // descending by summed cost, missing service in its own bucket
        assert_eq!(summary.by_service[0].service, "EC2");
        assert_eq!(summary.by_service[0].cost_usd_total, 150.0);
        assert_eq!(summary.by_service[1].service, "S3");
        assert_eq!(summary.by_service[2].service, "(none)");
    }

    #[test]
    fn test_top_resources_capped_and_sorted() {
        let records: Vec<UsageRecord> = (0..25)
            .map(|i| {
                let mut r = record(Some("EC2"), Some(f64::from(i)), None);
                r.resource_id = format!("i-{}", i);
                r
            })
            .collect();

        let summary = summarize_costs(&records, false);
        assert_eq!(summary.top_resources.len(), 20);
        assert_eq!(summary.top_resources[0].cost_usd, Some(24.0));
        for pair in summary.top_resources.windows(2) {
            assert!(pair[0].cost_usd >= pair[1].cost_usd);
        }
    }

    #[test]
    fn test_top_resources_shorter_than_cap() {
        let records = vec![record(Some("EC2"), Some(1.0), None)];
        let summary = summarize_costs(&records, false);
        assert_eq!(summary.top_resources.len(), 1);
    }

    #[test]
    fn test_top_resources_stable_tie_break() {
        let mut a = record(Some("EC2"), Some(10.0), None);
        a.resource_id = "first".to_string();
        let mut b = record(Some("EC2"), Some(10.0), None);
        b.resource_id = "second".to_string();

        let summary = summarize_costs(&[a, b], false);
        assert_eq!(summary.top_resources[0].resource_id, "first");
        assert_eq!(summary.top_resources[1].resource_id, "second");
    }

    #[test]
    fn test_by_env_breakdown() {
        let records = vec![
            record(Some("EC2"), Some(100.0), Some("env=prod;team=web")),
            record(Some("EC2"), Some(40.0), Some("env=dev")),
            record(Some("S3"), Some(10.0), None),
        ];

        let summary = summarize_costs(&records, true);
        let by_env = summary.by_env.expect("tags column present");
        assert_eq!(by_env[0].env, "prod");
        assert_eq!(by_env[0].cost_usd_total, 100.0);
        assert_eq!(by_env[1].env, "dev");
        assert_eq!(by_env[2].env, "(none)");
        assert_eq!(by_env[2].cost_usd_total, 10.0);
    }

    #[test]
    fn test_by_env_omitted_without_tags_column() {
        let records = vec![record(Some("EC2"), Some(100.0), None)];
        let summary = summarize_costs(&records, false);
        assert!(summary.by_env.is_none());
    }

    #[test]
    fn test_empty_dataset() {
        let summary = summarize_costs(&[], true);
        assert_eq!(summary.total_cost, 0.0);
        assert!(summary.by_service.is_empty());
        assert!(summary.top_resources.is_empty());
        assert_eq!(summary.by_env, Some(Vec::new()));
    }
}
