//! End-to-end tests for the analysis entry point

use cost_optimizer::{analyze, ThresholdConfig, UsageRecord};

fn ec2(id: &str, cpu: f64, hours: f64, cost: f64) -> UsageRecord {
    UsageRecord {
        provider: "aws".to_string(),
        service: Some("EC2".to_string()),
        resource_id: id.to_string(),
        region: Some("us-east-1".to_string()),
        month: "2024-01".to_string(),
        cpu_avg: Some(cpu),
        hours_running: Some(hours),
        cost_usd: Some(cost),
        ..Default::default()
    }
}

#[test]
fn idle_ec2_yields_stop_recommendation() {
    let records = vec![ec2("i-1", 2.0, 200.0, 100.0)];
    let report = analyze(&records, false, &ThresholdConfig::default());

    assert_eq!(report.compute.len(), 1);
    assert!(report.storage.is_empty());

    let rec = &report.compute[0];
    assert_eq!(rec.recommendation, "Stop/Terminate if safe");
    assert_eq!(rec.estimated_monthly_savings_usd, 90.0);
    assert_eq!(rec.current_cost_usd, 100.0);
}

#[test]
fn cold_s3_yields_tiering_recommendation() {
    let records = vec![UsageRecord {
        provider: "aws".to_string(),
        service: Some("S3".to_string()),
        resource_id: "bucket-archive".to_string(),
        month: "2024-01".to_string(),
        storage_gb: Some(500.0),
        last_access_days: Some(60.0),
        cost_usd: Some(50.0),
        ..Default::default()
    }];
    let report = analyze(&records, false, &ThresholdConfig::default());

    assert!(report.compute.is_empty());
    assert_eq!(report.storage.len(), 1);

    let rec = &report.storage[0];
    assert_eq!(rec.recommendation, "Move to colder storage tier");
    assert_eq!(rec.estimated_monthly_savings_usd, 20.0);
}

#[test]
fn rule_passes_are_disjoint_and_ordered() {
    let records = vec![
        ec2("i-idle-1", 1.0, 300.0, 40.0),
        UsageRecord {
            service: Some("Blob Storage".to_string()),
            resource_id: "container-1".to_string(),
            storage_gb: Some(100.0),
            last_access_days: Some(90.0),
            cost_usd: Some(25.0),
            ..Default::default()
        },
        ec2("i-under-m5.xlarge", 12.0, 100.0, 200.0),
        ec2("i-idle-2", 3.0, 150.0, 60.0),
    ];
    let report = analyze(&records, false, &ThresholdConfig::default());

    let compute_ids: Vec<&str> = report
        .compute
        .iter()
        .map(|r| r.resource_id.as_str())
        .collect();
    assert_eq!(compute_ids, ["i-idle-1", "i-under-m5.xlarge", "i-idle-2"]);

    assert_eq!(report.storage.len(), 1);
    assert_eq!(report.storage[0].resource_id, "container-1");

    // no record appears in both passes
    for c in &report.compute {
        assert!(report
            .storage
            .iter()
            .all(|s| s.resource_id != c.resource_id));
    }

    // the rightsizing target comes from the downgrade table
    assert_eq!(report.compute[1].recommendation, "Rightsize → m5.large");
}

#[test]
fn summary_reflects_whole_dataset_regardless_of_rules() {
    let records = vec![
        ec2("i-1", 90.0, 700.0, 120.0),
        UsageRecord {
            service: Some("RDS".to_string()),
            resource_id: "db-1".to_string(),
            cost_usd: Some(80.0),
            tags: Some("env=prod".to_string()),
            ..Default::default()
        },
    ];
    let report = analyze(&records, true, &ThresholdConfig::default());

    assert!(report.compute.is_empty());
    assert_eq!(report.summary.total_cost, 200.0);
    assert_eq!(report.summary.by_service.len(), 2);

    let by_env = report.summary.by_env.expect("tags column present");
    assert_eq!(by_env[0].env, "(none)");
    assert_eq!(by_env[0].cost_usd_total, 120.0);
    assert_eq!(by_env[1].env, "prod");
}

#[test]
fn custom_thresholds_change_classification() {
    let th = ThresholdConfig {
        idle_cpu_pct: 15.0,
        min_hours_active: 50.0,
        ..Default::default()
    };
    let records = vec![ec2("i-1", 12.0, 100.0, 100.0)];
    let report = analyze(&records, false, &th);

    // idle under the widened band, not underutilized
    assert_eq!(report.compute.len(), 1);
    assert_eq!(report.compute[0].recommendation, "Stop/Terminate if safe");
}
