// src/bin/rudb_cli/context.rs
use anyhow::Result;
use rudb::{DataStore, StoreConfig};

use crate::formatters::{OutputFormat, Formatter};
use crate::formatters::text::TextFormatter;
use crate::formatters::json::JsonFormatter;
use crate::formatters::table::TableFormatter;

/// CLI execution context
pub struct Context {
    /// The open store
    store: DataStore,

    /// Output format
    format: OutputFormat,

    /// Verbosity level
    verbosity: u8,

    /// Disable colors and indentation
    plain: bool,

    /// Current formatter
    formatter: Box<dyn Formatter>,
}

fn formatter_for(format: OutputFormat, plain: bool) -> Box<dyn Formatter> {
    match (format, plain) {
        (OutputFormat::Text, false) => Box::new(TextFormatter::new()),
        (OutputFormat::Text, true) => Box::new(TextFormatter::without_colors()),
        (OutputFormat::Json, false) => Box::new(JsonFormatter::new()),
        (OutputFormat::Json, true) => Box::new(JsonFormatter::without_pretty()),
        (OutputFormat::Table, false) => Box::new(TableFormatter::new()),
        (OutputFormat::Table, true) => Box::new(TableFormatter::without_colors()),
    }
}

impl Context {
    /// Open the store described by `config`
    pub fn new(config: StoreConfig, verbosity: u8, format: OutputFormat, plain: bool) -> Result<Self> {
        let store = DataStore::with_config(config)?;

        Ok(Context {
            store,
            format,
            verbosity,
            plain,
            formatter: formatter_for(format, plain),
        })
    }

    /// The open store
    pub fn store(&self) -> &DataStore {
        &self.store
    }

    /// Get the current formatter
    pub fn formatter(&self) -> &dyn Formatter {
        self.formatter.as_ref()
    }

    /// Set the output format
    pub fn set_format(&mut self, format: OutputFormat) {
        if format != self.format {
            self.format = format;
            self.formatter = formatter_for(format, self.plain);
        }
    }

    /// Get the verbosity level
    pub fn verbosity(&self) -> u8 {
        self.verbosity
    }
}
