use anyhow::Result;
use rudb::{FindResults, IndexStats};
use serde_json::Value;

/// Trait defining an output formatter
pub trait Formatter {
    /// Format a key-value item
    fn format_item(&self, key: &str, value: &str) -> Result<String>;

    /// Format a single document
    fn format_document(&self, document: &Value) -> Result<String>;

    /// Format the results of a find
    fn format_results(&self, results: &FindResults) -> Result<String>;

    /// Format index statistics
    fn format_stats(&self, stats: &IndexStats) -> Result<String>;

    /// Format a labelled count
    fn format_count(&self, label: &str, count: usize) -> String;

    /// Format an error message
    fn format_error(&self, error: &str) -> String;

    /// Format an informational message
    fn format_info(&self, info: &str) -> String;

    /// Format a success message
    fn format_success(&self, success: &str) -> String;
}
