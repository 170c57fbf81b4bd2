use anyhow::Result;
use rudb::{FindResults, IndexStats};
use serde_json::{json, Value};

use crate::formatters::Formatter;

/// JSON formatter
pub struct JsonFormatter {
    /// Whether output is indented
    pretty: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        JsonFormatter {
            pretty: true,
        }
    }

    /// Disable indentation
    pub fn without_pretty() -> Self {
        JsonFormatter {
            pretty: false,
        }
    }

    fn render(&self, value: &Value) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }

    fn render_message(&self, kind: &str, message: &str) -> String {
        let json_value = json!({ kind: message });
        self.render(&json_value)
            .unwrap_or_else(|_| format!("{{\"{}\":\"{}\"}}", kind, message))
    }
}

impl Formatter for JsonFormatter {
    fn format_item(&self, key: &str, value: &str) -> Result<String> {
        self.render(&json!({ "key": key, "value": value }))
    }

    fn format_document(&self, document: &Value) -> Result<String> {
        self.render(document)
    }

    fn format_results(&self, results: &FindResults) -> Result<String> {
        self.render(&serde_json::to_value(results)?)
    }

    fn format_stats(&self, stats: &IndexStats) -> Result<String> {
        self.render(&json!({
            "indexed_fields": stats.indexed_fields,
            "total_entries": stats.total_entries,
            "total_adds": stats.total_adds,
            "total_removes": stats.total_removes,
            "index_lookups": stats.index_lookups,
            "full_scans": stats.full_scans,
        }))
    }

    fn format_count(&self, label: &str, count: usize) -> String {
        let json_value = json!({ label: count });
        self.render(&json_value)
            .unwrap_or_else(|_| format!("{{\"{}\":{}}}", label, count))
    }

    fn format_error(&self, error: &str) -> String {
        self.render_message("error", error)
    }

    fn format_info(&self, info: &str) -> String {
        self.render_message("info", info)
    }

    fn format_success(&self, success: &str) -> String {
        self.render_message("success", success)
    }
}
