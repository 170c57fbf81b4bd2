//! Benchmarking system for rudb
//!
//! This module provides tools to measure performance of bulk inserts and
//! queries, and to compare indexed lookups with full scans.

use std::time::{Duration, Instant};
use std::fmt;
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::{json, Value};

use crate::core::errors::Result;
use crate::core::query::Query;
use crate::DataStore;

/// Generate `count` synthetic records with ids starting at `start`
///
/// Each record has an `id`, a small integer `a` (0..100), a `name` and a
/// `data` payload.
pub fn synthetic_records(start: usize, count: usize) -> Vec<Value> {
    (start..start + count)
        .map(|i| json!({
            "id": format!("rec-{:08}", i),
            "a": i % 100,
            "name": format!("name-{:08}", (i * 7919) % 1_000_003),
            "data": format!("payload for record {}", i),
        }))
        .collect()
}

/// A benchmark result for a single operation
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    /// Name of the operation
    pub name: String,
    /// Number of operations performed
    pub operations: usize,
    /// Total time taken
    pub duration: Duration,
    /// Operations per second
    pub ops_per_second: f64,
    /// Time per operation in microseconds
    pub time_per_op_micros: f64,
}

impl fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ops in {:?} ({:.2} ops/sec, {:.2} µs/op)",
            self.name, self.operations, self.duration,
            self.ops_per_second, self.time_per_op_micros)
    }
}

/// A benchmark suite for the store
pub struct Benchmark {
    /// The store to benchmark
    store: Rc<DataStore>,
    /// Results of benchmarks
    results: HashMap<String, BenchmarkResult>,
    /// Names in the order they were run
    order: Vec<String>,
}

impl Benchmark {
    /// Create a new benchmark for the given store
    pub fn new(store: DataStore) -> Self {
        Benchmark {
            store: Rc::new(store),
            results: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Run a benchmark function and record the result
    pub fn run<F>(&mut self, name: &str, operations: usize, mut f: F) -> Result<&BenchmarkResult>
    where
        F: FnMut() -> Result<()>,
    {
        let start = Instant::now();

        for _ in 0..operations {
            f()?;
        }

        Ok(self.record(name, operations, start.elapsed()))
    }

    fn record(&mut self, name: &str, operations: usize, duration: Duration) -> &BenchmarkResult {
        let secs = duration.as_secs_f64().max(f64::EPSILON);
        let ops = operations.max(1) as f64;

        let result = BenchmarkResult {
            name: name.to_string(),
            operations,
            duration,
            ops_per_second: operations as f64 / secs,
            time_per_op_micros: duration.as_micros() as f64 / ops,
        };

        if !self.results.contains_key(name) {
            self.order.push(name.to_string());
        }
        self.results.insert(name.to_string(), result);

        &self.results[name]
    }

    /// Run benchmarks for bulk inserts
    ///
    /// `count` records are inserted in batches of `batch_size`; the whole
    /// insert is timed as one operation per record.
    pub fn run_insert_benchmarks(&mut self, count: usize, batch_size: usize) -> Result<()> {
        println!("Running insert benchmarks with {} records...", count);

        let store = Rc::clone(&self.store);
        store.clear()?;

        let batch_size = batch_size.max(1);
        let start = Instant::now();
        let mut inserted = 0;
        while inserted < count {
            let n = batch_size.min(count - inserted);
            store.insert(synthetic_records(inserted, n))?;
            inserted += n;
        }
        self.record("bulk_insert", count, start.elapsed());

        // One record per call, for comparison
        let single_count = (count / 10).max(1);
        let mut next = count;
        self.run("single_insert", single_count, || {
            store.insert(synthetic_records(next, 1))?;
            next += 1;
            Ok(())
        })?;

        let mut key_counter = 0;
        self.run("set_item", 10_000, || {
            store.set_item(&format!("key-{}", key_counter % 1000), "value")?;
            key_counter += 1;
            Ok(())
        })?;

        println!("Insert benchmarks completed.");

        Ok(())
    }

    /// Run benchmarks for queries, with and without an index on `a`
    pub fn run_query_benchmarks(&mut self, queries: usize) -> Result<()> {
        println!("Running query benchmarks with {} queries...", queries);

        let store = Rc::clone(&self.store);

        let mut counter = 0;
        self.run("find_scan", queries, || {
            let query = Query::new()
                .filter(json!({"a": counter % 100}))
                .sort_by("name")
                .page(1)
                .size(1);
            store.find_documents(&query)?;
            counter += 1;
            Ok(())
        })?;

        store.create_index("a")?;

        let mut counter = 0;
        self.run("find_indexed", queries, || {
            let query = Query::new()
                .filter(json!({"a": counter % 100}))
                .sort_by("name")
                .page(1)
                .size(1);
            store.find_documents(&query)?;
            counter += 1;
            Ok(())
        })?;

        self.run("size", queries, || {
            store.size()?;
            Ok(())
        })?;

        println!("Query benchmarks completed.");

        Ok(())
    }

    /// Print all benchmark results
    pub fn print_results(&self) {
        println!("\nBenchmark Results:");
        println!("==================");

        for name in &self.order {
            println!("{}", self.results[name]);
        }
    }

    /// Get a specific benchmark result
    pub fn get_result(&self, name: &str) -> Option<&BenchmarkResult> {
        self.results.get(name)
    }
}
