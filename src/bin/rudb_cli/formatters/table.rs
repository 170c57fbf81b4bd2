use anyhow::Result;
use colored::*;
use prettytable::{Cell, Row, Table};
use rudb::{FindResults, IndexStats};
use serde_json::Value;

use crate::formatters::Formatter;

const MAX_CELL_WIDTH: usize = 50;

/// Table formatter
pub struct TableFormatter {
    /// Whether colors are enabled
    colored: bool,
}

impl TableFormatter {
    /// Create a new table formatter
    pub fn new() -> Self {
        TableFormatter {
            colored: true,
        }
    }

    /// Disable colors
    pub fn without_colors() -> Self {
        TableFormatter {
            colored: false,
        }
    }

    fn header(&self, labels: &[&str]) -> Row {
        Row::new(labels.iter().map(|label| {
            if self.colored {
                Cell::new(label).style_spec("bFc")
            } else {
                Cell::new(label)
            }
        }).collect())
    }

    /// Columns for a set of documents, in first-seen order
    fn columns(documents: &[Value]) -> Vec<String> {
        let mut columns: Vec<String> = Vec::new();
        for document in documents {
            if let Value::Object(map) = document {
                for key in map.keys() {
                    if !columns.contains(key) {
                        columns.push(key.clone());
                    }
                }
            }
        }
        columns
    }
}

/// Render a single value for a cell, truncating long text
fn cell_text(value: &Value) -> String {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Array(_) => "[array]".to_string(),
        Value::Object(_) => "{object}".to_string(),
        other => other.to_string(),
    };

    if text.chars().count() > MAX_CELL_WIDTH {
        let truncated: String = text.chars().take(MAX_CELL_WIDTH - 3).collect();
        format!("{}...", truncated)
    } else {
        text
    }
}

impl Formatter for TableFormatter {
    fn format_item(&self, key: &str, value: &str) -> Result<String> {
        let mut table = Table::new();
        table.add_row(self.header(&["Key", "Value"]));
        table.add_row(Row::new(vec![Cell::new(key), Cell::new(value)]));
        Ok(table.to_string())
    }

    fn format_document(&self, document: &Value) -> Result<String> {
        let mut table = Table::new();
        table.add_row(self.header(&["Field", "Value"]));

        match document {
            Value::Object(map) => {
                for (key, value) in map {
                    table.add_row(Row::new(vec![Cell::new(key), Cell::new(&cell_text(value))]));
                }
            }
            other => {
                table.add_row(Row::new(vec![Cell::new(""), Cell::new(&cell_text(other))]));
            }
        }

        Ok(table.to_string())
    }

    fn format_results(&self, results: &FindResults) -> Result<String> {
        let columns = Self::columns(&results.documents);
        let mut table = Table::new();

        let labels: Vec<&str> = columns.iter().map(String::as_str).collect();
        table.add_row(self.header(&labels));

        for document in &results.documents {
            let cells = columns.iter()
                .map(|column| {
                    let text = document.get(column).map(cell_text).unwrap_or_default();
                    Cell::new(&text)
                })
                .collect();
            table.add_row(Row::new(cells));
        }

        Ok(format!(
            "{}{} of {} matching documents",
            table,
            results.documents.len(),
            results.total_count
        ))
    }

    fn format_stats(&self, stats: &IndexStats) -> Result<String> {
        let mut table = Table::new();
        table.add_row(self.header(&["Statistic", "Value"]));

        let fields = if stats.indexed_fields.is_empty() {
            "(none)".to_string()
        } else {
            stats.indexed_fields.join(", ")
        };

        let rows = [
            ("Indexed fields", fields),
            ("Entries", stats.total_entries.to_string()),
            ("Adds", stats.total_adds.to_string()),
            ("Removes", stats.total_removes.to_string()),
            ("Index lookups", stats.index_lookups.to_string()),
            ("Full scans", stats.full_scans.to_string()),
        ];
        for (label, value) in rows.iter() {
            table.add_row(Row::new(vec![Cell::new(label), Cell::new(value)]));
        }

        Ok(table.to_string())
    }

    fn format_count(&self, label: &str, count: usize) -> String {
        let mut table = Table::new();
        table.add_row(self.header(&[label]));
        table.add_row(Row::new(vec![Cell::new(&count.to_string())]));
        table.to_string()
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
