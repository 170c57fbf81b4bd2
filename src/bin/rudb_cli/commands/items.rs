// src/bin/rudb_cli/commands/items.rs
use anyhow::Result;
use crate::context::Context;

/// Store a value under a key
pub fn set(context: &mut Context, key: &str, value: &str) -> Result<()> {
    context.store().set_item(key, value)?;

    println!("{}", context.formatter().format_success(&format!("Item '{}' set", key)));

    Ok(())
}

/// Print the value stored under a key
pub fn get(context: &mut Context, key: &str) -> Result<()> {
    let value = context.store().get_item(key)?;

    println!("{}", context.formatter().format_item(key, &value)?);

    Ok(())
}

/// Remove the value stored under a key
pub fn remove(context: &mut Context, key: &str) -> Result<()> {
    context.store().remove_item(key)?;

    println!("{}", context.formatter().format_success(&format!("Item '{}' removed", key)));

    Ok(())
}
