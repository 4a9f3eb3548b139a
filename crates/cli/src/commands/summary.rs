//! Cost summary command

use anyhow::Result;
use colored::Colorize;
use cost_optimizer::{summarize_costs, UsageRecord};
use tabled::Tabled;

use crate::loader::Dataset;
use crate::output::{format_usd, or_dash, print_heading, print_info, OutputFormat};

/// Row for the cost-by-service table
#[derive(Tabled)]
struct ServiceRow {
    #[tabled(rename = "Service")]
    service: String,
    #[tabled(rename = "Total Cost")]
    cost: String,
}

/// Row for the cost-by-env table
#[derive(Tabled)]
struct EnvRow {
    #[tabled(rename = "Env")]
    env: String,
    #[tabled(rename = "Total Cost")]
    cost: String,
}

/// Row for the top-resources table
#[derive(Tabled)]
struct ResourceRow {
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
}

impl From<&UsageRecord> for ResourceRow {
    fn from(rec: &UsageRecord) -> Self {
        Self {
            provider: rec.provider.clone(),
            service: or_dash(rec.service.as_deref()),
            resource_id: rec.resource_id.clone(),
            region: or_dash(rec.region.as_deref()),
            month: rec.month.clone(),
            cost: format_usd(rec.cost_usd.unwrap_or(0.0)),
        }
    }
}

/// Show the aggregated cost view of the dataset
pub fn show_summary(dataset: &Dataset, format: OutputFormat) -> Result<()> {
    let summary = summarize_costs(&dataset.records, dataset.has_tags);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Table => {
            println!("{}", "Cost Summary".bold());
            println!("{}", "=".repeat(50));
            println!(
                "Total Monthly Cost:     {}",
                format_usd(summary.total_cost).green().bold()
            );
            println!("Services:               {}", summary.by_service.len());
            println!("Resources (rows):       {}", dataset.records.len());
            println!();

            print_heading("Cost by Service");
            let rows: Vec<ServiceRow> = summary
                .by_service
                .iter()
                .map(|s| ServiceRow {
                    service: s.service.clone(),
                    cost: format_usd(s.cost_usd_total),
                })
                .collect();
            print_table(rows);

            print_heading("Top Resources");
            let rows: Vec<ResourceRow> = summary.top_resources.iter().map(ResourceRow::from).collect();
            print_table(rows);

            match &summary.by_env {
                Some(by_env) => {
                    print_heading("Cost by env Tag");
                    let rows: Vec<EnvRow> = by_env
                        .iter()
                        .map(|e| EnvRow {
                            env: e.env.clone(),
                            cost: format_usd(e.cost_usd_total),
                        })
                        .collect();
                    print_table(rows);
                }
                None => {
                    print_info("Input has no tags column; skipping env breakdown");
                    println!();
                }
            }

            println!(
                "Generated {}",
                chrono::Local::now()
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
                    .dimmed()
            );
        }
    }

    Ok(())
}

fn print_table<T: Tabled>(rows: Vec<T>) {
    if rows.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let table = tabled::Table::new(rows)
        .with(tabled::settings::Style::rounded())
        .to_string();
    println!("{}\n", table);
}
