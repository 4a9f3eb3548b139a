//! CSV ingestion and column normalization
//!
//! Parses raw billing exports into the canonical `UsageRecord` schema.
//! Headers are matched case-insensitively against the expected columns,
//! absent columns default every row's field to unknown, and numeric
//! cells that fail to parse become unknown rather than zero.

use std::collections::HashMap;
use std::path::Path;

use cost_optimizer::UsageRecord;
use thiserror::Error;
use tracing::debug;

/// Columns the normalizer knows about
const EXPECTED_COLUMNS: &[&str] = &[
    "provider",
    "service",
    "resource_id",
    "region",
    "tags",
    "month",
    "hours_running",
    "cpu_avg",
    "mem_avg",
    "cost_usd",
    "last_access_days",
    "storage_gb",
];

/// Errors reading a billing export
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {path}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV")]
    Csv(#[from] csv::Error),
}

/// A normalized dataset plus the schema fact the summarizer needs
#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<UsageRecord>,
    /// Whether the raw input carried a tags column at all
    pub has_tags: bool,
}

/// Load and normalize a billing CSV from disk
pub fn load_dataset(path: &Path) -> Result<Dataset, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Open {
        path: path.display().to_string(),
        source,
    })?;
    read_dataset(file)
}

/// Parse and normalize CSV from any reader
pub fn read_dataset<R: std::io::Read>(reader: R) -> Result<Dataset, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    // canonical column name -> position, matched case-insensitively;
    // the first matching header wins
    let mut columns: HashMap<&'static str, usize> = HashMap::new();
    for (idx, header) in csv_reader.headers()?.iter().enumerate() {
        let lower = header.to_lowercase();
        for expected in EXPECTED_COLUMNS {
            if lower == *expected && !columns.contains_key(expected) {
                columns.insert(expected, idx);
            }
        }
    }
    let has_tags = columns.contains_key("tags");

    let mut records = Vec::new();
    for row in csv_reader.records() {
        let row = row?;

        let text = |name: &str| -> Option<String> {
            columns
                .get(name)
                .and_then(|&idx| row.get(idx))
                .filter(|cell| !cell.is_empty())
                .map(str::to_string)
        };
        let number = |name: &str| -> Option<f64> { text(name).and_then(|cell| cell.parse().ok()) };

        records.push(UsageRecord {
            provider: text("provider").unwrap_or_default(),
            service: text("service"),
            resource_id: text("resource_id").unwrap_or_default(),
            region: text("region"),
            tags: text("tags"),
            month: text("month").unwrap_or_default(),
            hours_running: number("hours_running"),
            cpu_avg: number("cpu_avg"),
            mem_avg: number("mem_avg"),
            cost_usd: number("cost_usd"),
            last_access_days: number("last_access_days"),
            storage_gb: number("storage_gb"),
        });
    }

    debug!(rows = records.len(), has_tags, "dataset loaded");
    Ok(Dataset { records, has_tags })
}
