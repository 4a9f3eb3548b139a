//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Print a section heading with a rule underneath
pub fn print_heading(title: &str) {
    println!("{}", title.bold());
    println!("{}", "-".repeat(50));
}

/// Format a dollar amount for display
pub fn format_usd(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Placeholder for missing optional values
pub fn or_dash(value: Option<&str>) -> String {
    value.map_or_else(|| "-".to_string(), str::to_string)
}

/// Color a savings figure by magnitude
pub fn color_savings(amount: f64) -> String {
    let formatted = format_usd(amount);
    if amount >= 100.0 {
        formatted.green().bold().to_string()
    } else if amount > 0.0 {
        formatted.green().to_string()
    } else {
        formatted.to_string()
    }
}
