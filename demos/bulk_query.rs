//! Bulk insert followed by a filtered, sorted, paginated find
//!
//! Usage: `cargo run --release --example bulk_query [records]`

use std::time::Instant;

use rudb::bench::synthetic_records;
use rudb::{DataStore, Query};
use serde_json::json;

const BATCH_SIZE: usize = 50_000;

fn run(records: usize) -> rudb::Result<()> {
    let store = DataStore::new();

    let start = Instant::now();
    let mut inserted = 0;
    while inserted < records {
        let n = BATCH_SIZE.min(records - inserted);
        inserted += store.insert(synthetic_records(inserted, n))?;
    }
    println!("Inserted {} records in {:?}", inserted, start.elapsed());

    let query = Query::new()
        .filter(json!({"a": 42}))
        .sort_by("name")
        .page(1)
        .size(1);

    let start = Instant::now();
    let results = store.find_documents(&query)?;
    println!("Query took {:?}", start.elapsed());

    println!("{}", serde_json::to_string_pretty(&results).unwrap_or_default());
    println!("size: {}", store.size()?);

    Ok(())
}

fn main() {
    env_logger::init();

    let records = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(500_000);

    if let Err(e) = run(records) {
        eprintln!("{}", e);
    }
}
