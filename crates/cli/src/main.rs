//! Cloud Cost Optimizer CLI
//!
//! Analyzes cloud billing CSVs (AWS/Azure/GCP) and generates cost
//! summaries and savings recommendations against tunable thresholds.

mod commands;
mod config;
mod loader;
mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use cost_optimizer::ThresholdConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{export, recommendations, summary};

/// Cloud Cost Optimizer CLI
#[derive(Parser)]
#[command(name = "cco")]
#[command(author, version, about = "CLI for the Cloud Cost Optimizer", long_about = None)]
pub struct Cli {
    /// Path to the billing CSV to analyze (can also be set via CCO_INPUT)
    #[arg(long, short, env = "CCO_INPUT")]
    pub input: PathBuf,

    /// Output format (defaults to the config file setting, then table)
    #[arg(long, short)]
    pub format: Option<output::OutputFormat>,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,

    /// Idle CPU threshold (percent)
    #[arg(long, value_name = "PCT")]
    pub idle_cpu: Option<f64>,

    /// Underutilized CPU threshold (percent)
    #[arg(long, value_name = "PCT")]
    pub underutil_cpu: Option<f64>,

    /// Minimum active hours per month for the idle rule
    #[arg(long, value_name = "HOURS")]
    pub min_hours: Option<f64>,

    /// Minimum monthly cost (USD) for the idle rule
    #[arg(long, value_name = "USD")]
    pub min_cost: Option<f64>,

    /// Rightsizing savings fraction (0-1)
    #[arg(long, value_name = "FRACTION")]
    pub rightsize_savings: Option<f64>,

    /// Idle stop savings fraction (0-1)
    #[arg(long, value_name = "FRACTION")]
    pub idle_savings: Option<f64>,

    /// Cold storage threshold (days since last access)
    #[arg(long, value_name = "DAYS")]
    pub cold_days: Option<f64>,

    /// Storage tiering savings fraction (0-1)
    #[arg(long, value_name = "FRACTION")]
    pub storage_savings: Option<f64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show cost summary (totals, by service, top resources, by env tag)
    Summary,

    /// Generate savings recommendations
    Recommendations {
        /// Restrict output to one rule pass
        #[arg(long, value_enum)]
        kind: Option<RecommendationKind>,
    },

    /// Export recommendations as CSV
    Export {
        /// Output file path (stdout if omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

/// Which rule pass to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RecommendationKind {
    Compute,
    Storage,
}

impl Cli {
    /// Resolve thresholds: flag > config file > library default
    fn thresholds(&self, base: ThresholdConfig) -> ThresholdConfig {
        let mut th = base;
        if let Some(v) = self.idle_cpu {
            th.idle_cpu_pct = v;
        }
        if let Some(v) = self.underutil_cpu {
            th.underutil_cpu_pct = v;
        }
        if let Some(v) = self.min_hours {
            th.min_hours_active = v;
        }
        if let Some(v) = self.min_cost {
            th.min_cost_consider = v;
        }
        if let Some(v) = self.rightsize_savings {
            th.rightsizing_savings_pct = v;
        }
        if let Some(v) = self.idle_savings {
            th.idle_stop_savings_pct = v;
        }
        if let Some(v) = self.cold_days {
            th.storage_cold_days = v;
        }
        if let Some(v) = self.storage_savings {
            th.storage_savings_pct = v;
        }
        th
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with env filter; --verbose lowers the floor
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(fmt::layer().with_target(false))
        .init();

    let config = config::Config::load()?;

    let format = cli.format.unwrap_or_else(|| {
        config
            .default_format
            .as_deref()
            .and_then(|name| output::OutputFormat::from_str(name, true).ok())
            .unwrap_or_default()
    });
    let thresholds = cli.thresholds(config.thresholds.clone().unwrap_or_default());

    let dataset = loader::load_dataset(&cli.input)
        .with_context(|| format!("Failed to load {}", cli.input.display()))?;

    match cli.command {
        Commands::Summary => summary::show_summary(&dataset, format)?,
        Commands::Recommendations { kind } => {
            recommendations::show_recommendations(&dataset, &thresholds, kind, format)?;
        }
        Commands::Export { output } => {
            export::export_recommendations(&dataset, &thresholds, output.as_deref())?;
        }
    }

    Ok(())
}
