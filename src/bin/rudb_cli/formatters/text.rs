use anyhow::Result;
use colored::*;
use rudb::{FindResults, IndexStats};
use serde_json::Value;

use crate::formatters::Formatter;

/// Plain text formatter
pub struct TextFormatter {
    /// Whether colors are enabled
    colored: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new() -> Self {
        TextFormatter {
            colored: true,
        }
    }

    /// Disable colors
    pub fn without_colors() -> Self {
        TextFormatter {
            colored: false,
        }
    }
}

impl Formatter for TextFormatter {
    fn format_item(&self, key: &str, value: &str) -> Result<String> {
        if self.colored {
            Ok(format!("{} = {}", key.bold(), value))
        } else {
            Ok(format!("{} = {}", key, value))
        }
    }

    fn format_document(&self, document: &Value) -> Result<String> {
        Ok(serde_json::to_string_pretty(document)?)
    }

    fn format_results(&self, results: &FindResults) -> Result<String> {
        let mut lines = Vec::with_capacity(results.documents.len() + 1);
        for document in &results.documents {
            lines.push(serde_json::to_string(document)?);
        }

        let summary = format!("{} of {} matching documents", results.documents.len(), results.total_count);
        lines.push(if self.colored { summary.dimmed().to_string() } else { summary });

        Ok(lines.join("\n"))
    }

    fn format_stats(&self, stats: &IndexStats) -> Result<String> {
        Ok(stats.to_string())
    }

    fn format_count(&self, label: &str, count: usize) -> String {
        format!("{} {}", count, label)
    }

    fn format_error(&self, error: &str) -> String {
        if self.colored {
            format!("{}", error.red().bold())
        } else {
            format!("Error: {}", error)
        }
    }

    fn format_info(&self, info: &str) -> String {
        if self.colored {
            format!("{}", info.blue())
        } else {
            format!("Info: {}", info)
        }
    }

    fn format_success(&self, success: &str) -> String {
        if self.colored {
            format!("{}", success.green().bold())
        } else {
            format!("Success: {}", success)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_output() {
        let formatter = TextFormatter::without_colors();
        let results = FindResults {
            documents: vec![json!({"id": "a"})],
            total_count: 3,
        };

        assert_eq!(formatter.format_item("k", "v").unwrap(), "k = v");
        assert_eq!(formatter.format_results(&results).unwrap(), "{\"id\":\"a\"}\n1 of 3 matching documents");
        assert_eq!(formatter.format_count("documents", 2), "2 documents");
        assert_eq!(formatter.format_error("boom"), "Error: boom");
    }
}
