//! Recommendation command

use anyhow::Result;
use colored::Colorize;
use cost_optimizer::{analyze, Recommendation, ThresholdConfig};
use serde_json::json;
use tabled::Tabled;

use crate::loader::Dataset;
use crate::output::{color_savings, format_usd, or_dash, print_heading, print_warning, OutputFormat};
use crate::RecommendationKind;

/// Row for recommendation tables
#[derive(Tabled)]
struct RecommendationRow {
    #[tabled(rename = "Provider")]
    provider: String,
    #[tabled(rename = "Service")]
    service: String,
    #[tabled(rename = "Resource")]
    resource_id: String,
    #[tabled(rename = "Region")]
    region: String,
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Cost")]
    cost: String,
    #[tabled(rename = "Recommendation")]
    recommendation: String,
    #[tabled(rename = "Rationale")]
    rationale: String,
    #[tabled(rename = "Est. Savings")]
    savings: String,
}

impl From<&Recommendation> for RecommendationRow {
    fn from(rec: &Recommendation) -> Self {
        Self {
            provider: rec.provider.clone(),
            service: or_dash(rec.service.as_deref()),
            resource_id: rec.resource_id.clone(),
            region: or_dash(rec.region.as_deref()),
            month: rec.month.clone(),
            cost: format_usd(rec.current_cost_usd),
            recommendation: rec.recommendation.clone(),
            rationale: rec.rationale.clone(),
            savings: color_savings(rec.estimated_monthly_savings_usd),
        }
    }
}

/// Show savings recommendations, optionally restricted to one rule pass
pub fn show_recommendations(
    dataset: &Dataset,
    thresholds: &ThresholdConfig,
    kind: Option<RecommendationKind>,
    format: OutputFormat,
) -> Result<()> {
    let report = analyze(&dataset.records, dataset.has_tags, thresholds);

    let show_compute = kind != Some(RecommendationKind::Storage);
    let show_storage = kind != Some(RecommendationKind::Compute);

    match format {
        OutputFormat::Json => {
            let mut body = serde_json::Map::new();
            if show_compute {
                body.insert("compute".to_string(), json!(report.compute));
            }
            if show_storage {
                body.insert("storage".to_string(), json!(report.storage));
            }
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Table => {
            if show_compute {
                print_section("Compute Recommendations", &report.compute);
            }
            if show_storage {
                print_section("Storage Recommendations", &report.storage);
            }

            let total_savings: f64 = report
                .compute
                .iter()
                .filter(|_| show_compute)
                .chain(report.storage.iter().filter(|_| show_storage))
                .map(|r| r.estimated_monthly_savings_usd)
                .sum();
            println!(
                "{} {}",
                "Total estimated monthly savings:".bold(),
                color_savings(total_savings)
            );
        }
    }

    Ok(())
}

fn print_section(title: &str, recs: &[Recommendation]) {
    print_heading(title);
    if recs.is_empty() {
        print_warning("No recommendations");
        println!();
        return;
    }

    let rows: Vec<RecommendationRow> = recs.iter().map(RecommendationRow::from).collect();
    let table = tabled::Table::new(rows)
        .with(tabled::settings::Style::rounded())
        .to_string();
    println!("{}", table);
    println!("Total: {} recommendations\n", recs.len());
}
