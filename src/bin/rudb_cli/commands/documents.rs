// src/bin/rudb_cli/commands/documents.rs
use std::fs;

use anyhow::Result;
use log::debug;
use rudb::Query;
use serde_json::Value;

use crate::context::Context;
use crate::utils::error::CliError;

/// Parse documents from inline JSON or from `@file`
///
/// Accepts a single object, an array of objects, or (for files) one JSON
/// document per line.
pub fn parse_documents(source: &str) -> Result<Vec<Value>, CliError> {
    let text = match source.strip_prefix('@') {
        Some(path) => fs::read_to_string(path)?,
        None => source.to_string(),
    };

    match serde_json::from_str::<Value>(&text) {
        Ok(Value::Array(items)) => Ok(items),
        Ok(value) => Ok(vec![value]),
        Err(whole_err) => {
            let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
            if lines.len() < 2 {
                return Err(CliError::JsonError(whole_err));
            }
            lines
                .into_iter()
                .map(|line| serde_json::from_str(line).map_err(CliError::from))
                .collect()
        }
    }
}

/// Insert documents
pub fn insert(context: &mut Context, source: &str) -> Result<()> {
    let documents = parse_documents(source)?;
    debug!("Inserting {} documents", documents.len());

    let inserted = context.store().insert(documents)?;

    println!("{}", context.formatter().format_success(&format!("{} documents inserted", inserted)));

    Ok(())
}

/// Print one document by id
pub fn show(context: &mut Context, id: &str) -> Result<()> {
    let document = context.store().get_document(id)?;

    println!("{}", context.formatter().format_document(&document)?);

    Ok(())
}

/// Find documents matching a query
pub fn find(context: &mut Context, query: &str) -> Result<()> {
    let query = Query::from_json(query)?;
    let results = context.store().find_documents(&query)?;

    println!("{}", context.formatter().format_results(&results)?);

    Ok(())
}

/// Delete documents matching a query
pub fn delete(context: &mut Context, query: &str) -> Result<()> {
    let query = Query::from_json(query)?;
    if query.where_clause().is_none() {
        return Err(CliError::Usage("delete needs a \"where\" clause, e.g. '{\"where\": {\"a\": 1}}'".to_string()).into());
    }

    let removed = context.store().delete(&query)?;

    println!("{}", context.formatter().format_success(&format!("{} documents deleted", removed)));

    Ok(())
}

/// Print the number of documents
pub fn size(context: &mut Context) -> Result<()> {
    let size = context.store().size()?;

    println!("{}", context.formatter().format_count("documents", size));

    Ok(())
}

/// Remove every document
pub fn clear(context: &mut Context) -> Result<()> {
    context.store().clear()?;

    println!("{}", context.formatter().format_success("All documents removed"));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_parse_inline() {
        assert_eq!(parse_documents(r#"{"id": "a"}"#).unwrap(), vec![json!({"id": "a"})]);
        assert_eq!(parse_documents(r#"[{"id": "a"}, {"id": "b"}]"#).unwrap().len(), 2);
        assert!(matches!(parse_documents("{oops"), Err(CliError::JsonError(_))));
    }

    #[test]
    fn test_parse_json_lines_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"id": "a", "n": 1}}"#).unwrap();
        writeln!(file).unwrap();
        writeln!(file, r#"{{"id": "b", "n": 2}}"#).unwrap();

        let source = format!("@{}", file.path().display());
        let docs = parse_documents(&source).unwrap();
        assert_eq!(docs, vec![json!({"id": "a", "n": 1}), json!({"id": "b", "n": 2})]);
    }

    #[test]
    fn test_parse_missing_file() {
        assert!(matches!(parse_documents("@/nonexistent/rudb.json"), Err(CliError::IoError(_))));
    }
}
