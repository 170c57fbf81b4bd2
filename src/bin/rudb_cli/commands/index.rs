// src/bin/rudb_cli/commands/index.rs
use anyhow::Result;
use crate::context::Context;

/// Build an equality index on a field
pub fn create(context: &mut Context, field: &str) -> Result<()> {
    context.store().create_index(field)?;

    println!("{}", context.formatter().format_success(&format!("Index on '{}' ready", field)));

    Ok(())
}

/// Print index statistics
pub fn stats(context: &mut Context) -> Result<()> {
    let stats = context.store().index_stats()?;

    println!("{}", context.formatter().format_stats(&stats)?);

    if context.verbosity() > 0 {
        let backend = if context.store().is_persistent()? { "persistent" } else { "in-memory" };
        println!("{}", context.formatter().format_info(&format!("Backend: {}", backend)));
    }

    Ok(())
}
