//! CSV export of recommendations

use std::path::Path;

use anyhow::{Context, Result};
use cost_optimizer::{analyze, Recommendation, ThresholdConfig};

use crate::loader::Dataset;
use crate::output::print_success;

/// Write compute then storage recommendations as CSV, to a file or stdout.
///
/// Columns follow the `Recommendation` field order: provider, service,
/// resource_id, region, month, current_cost_usd, recommendation,
/// rationale, estimated_monthly_savings_usd.
pub fn export_recommendations(
    dataset: &Dataset,
    thresholds: &ThresholdConfig,
    output: Option<&Path>,
) -> Result<()> {
    let report = analyze(&dataset.records, dataset.has_tags, thresholds);
    let rows: Vec<&Recommendation> = report.compute.iter().chain(report.storage.iter()).collect();

    match output {
        Some(path) => {
            let mut writer = csv::Writer::from_path(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_rows(&mut writer, &rows)?;
            print_success(&format!(
                "Wrote {} recommendations to {}",
                rows.len(),
                path.display()
            ));
        }
        None => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            write_rows(&mut writer, &rows)?;
        }
    }

    Ok(())
}

fn write_rows<W: std::io::Write>(writer: &mut csv::Writer<W>, rows: &[&Recommendation]) -> Result<()> {
    for row in rows {
        writer.serialize(row).context("Failed to write CSV row")?;
    }
    writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}
