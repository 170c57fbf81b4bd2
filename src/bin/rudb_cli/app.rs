// src/bin/rudb_cli/app.rs
use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use rudb::StoreConfig;

use crate::commands;
use crate::context::Context;
use crate::formatters::OutputFormat;
use crate::repl::Repl;

#[derive(Parser)]
#[command(name = "rudb")]
#[command(about = "CLI for the rudb document and key-value store", long_about = None)]
struct Cli {
    /// Verbosity level (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Output format (text, json, table)
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Disable colors and JSON indentation
    #[arg(long)]
    plain: bool,

    /// Interactive mode (REPL)
    #[arg(short, long)]
    interactive: bool,

    /// Database directory; the store is kept in memory when omitted
    #[arg(short, long)]
    db: Option<PathBuf>,

    /// Field to build an equality index on (repeatable)
    #[arg(long = "index")]
    indexes: Vec<String>,

    /// Do not flush to disk after every write
    #[arg(long)]
    no_flush: bool,

    /// Command to run
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Store a value under a key
    Set {
        key: String,
        value: String,
    },

    /// Print the value stored under a key
    Get {
        key: String,
    },

    /// Remove the value stored under a key
    Remove {
        key: String,
    },

    /// Insert documents (a JSON object or array, or @file)
    Insert {
        documents: String,
    },

    /// Print a document by id
    Doc {
        id: String,
    },

    /// Find documents, e.g. '{"where": {"a": 1}, "sort": "name", "page": 1, "size": 10}'
    Find {
        #[arg(default_value = "{}")]
        query: String,
    },

    /// Delete the documents matching a query's "where" clause
    Delete {
        query: String,
    },

    /// Print the number of documents
    Size,

    /// Remove every document
    Clear,

    /// Build an equality index on a field
    Index {
        field: String,
    },

    /// Print index statistics
    Stats,
}

fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();
}

/// Run the CLI application
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = StoreConfig::default().flush_on_write(!cli.no_flush);
    if let Some(db) = cli.db {
        config = config.persistent(db);
    }
    for field in cli.indexes {
        config = config.with_index(field);
    }

    let mut context = Context::new(config, cli.verbose, cli.format, cli.plain)?;

    match cli.command {
        Some(command) if !cli.interactive => execute(&mut context, command),
        Some(command) => {
            execute(&mut context, command)?;
            Repl::new(context)?.run()
        }
        None => Repl::new(context)?.run(),
    }
}

fn execute(context: &mut Context, command: Commands) -> Result<()> {
    match command {
        Commands::Set { key, value } => commands::items::set(context, &key, &value),
        Commands::Get { key } => commands::items::get(context, &key),
        Commands::Remove { key } => commands::items::remove(context, &key),
        Commands::Insert { documents } => commands::documents::insert(context, &documents),
        Commands::Doc { id } => commands::documents::show(context, &id),
        Commands::Find { query } => commands::documents::find(context, &query),
        Commands::Delete { query } => commands::documents::delete(context, &query),
        Commands::Size => commands::documents::size(context),
        Commands::Clear => commands::documents::clear(context),
        Commands::Index { field } => commands::index::create(context, &field),
        Commands::Stats => commands::index::stats(context),
    }
}
