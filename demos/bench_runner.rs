//! Benchmark runner for rudb
//!
//! Runs the insert and query suites against an in-memory store and a
//! persistent store, then prints the results.

use std::fs;

use rudb::bench::Benchmark;
use rudb::{DataStore, StoreConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("rudb Benchmark Suite");
    println!("====================");

    let records = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(100_000);

    println!("\n-- in-memory --");
    let mut benchmark = Benchmark::new(DataStore::new());
    benchmark.run_insert_benchmarks(records, 10_000)?;
    benchmark.run_query_benchmarks(200)?;
    benchmark.print_results();

    let bench_dir = "rudb_benchmark";
    let _ = fs::remove_dir_all(bench_dir);

    println!("\n-- persistent --");
    let store = DataStore::with_config(StoreConfig::default().persistent(bench_dir).flush_on_write(false))?;
    let mut benchmark = Benchmark::new(store);
    benchmark.run_insert_benchmarks(records / 10, 10_000)?;
    benchmark.run_query_benchmarks(50)?;
    benchmark.print_results();

    println!("\nBenchmark completed successfully.");

    let _ = fs::remove_dir_all(bench_dir);

    Ok(())
}
