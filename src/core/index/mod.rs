// src/core/index/mod.rs
pub mod types;
pub mod value_index;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use log::debug;
use serde_json::Value;

use crate::core::query::Query;
pub use types::IndexStats;
pub use value_index::FieldIndex;

/// How a query will be answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryPlan {
    /// Only the listed documents can match
    IndexLookup {
        field: String,
        keys: BTreeSet<String>,
    },
    /// Every document has to be checked
    FullScan,
}

/// Unified indexing system
///
/// Indexes are kept in memory and updated synchronously with every write.
/// They are rebuilt from the store when it is opened.
#[derive(Debug, Default)]
pub struct IndexSystem {
    /// Field indexes by field name
    indexes: BTreeMap<String, FieldIndex>,
    total_adds: usize,
    total_removes: usize,
    index_lookups: AtomicUsize,
    full_scans: AtomicUsize,
}

impl IndexSystem {
    /// Create an indexing system with no indexes
    pub fn new() -> Self {
        IndexSystem::default()
    }

    /// Check if a field carries an index
    pub fn has_index(&self, field: &str) -> bool {
        self.indexes.contains_key(field)
    }

    /// Indexed field names
    pub fn fields(&self) -> Vec<String> {
        self.indexes.keys().cloned().collect()
    }

    /// Create an index on a field and fill it from existing documents
    ///
    /// Returns false if the field was already indexed.
    pub fn create_index(&mut self, field: &str, documents: &[(String, Value)]) -> bool {
        if self.has_index(field) {
            return false;
        }

        let mut index = FieldIndex::new(field);
        for (key, document) in documents {
            if index.add(key, document) {
                self.total_adds += 1;
            }
        }

        debug!("IndexSystem: built index on '{}' with {} entries", field, index.len());
        self.indexes.insert(field.to_string(), index);
        true
    }

    /// Add documents to every index
    pub fn add_documents(&mut self, documents: &[(String, Value)]) {
        for index in self.indexes.values_mut() {
            for (key, document) in documents {
                if index.add(key, document) {
                    self.total_adds += 1;
                }
            }
        }
    }

    /// Remove documents from every index
    pub fn remove_documents(&mut self, documents: &[(String, Value)]) {
        for index in self.indexes.values_mut() {
            for (key, document) in documents {
                if index.remove(key, document) {
                    self.total_removes += 1;
                }
            }
        }
    }

    /// Empty every index, keeping their definitions
    pub fn clear(&mut self) {
        for index in self.indexes.values_mut() {
            self.total_removes += index.len();
            index.clear();
        }
    }

    /// Rebuild every index from scratch
    pub fn rebuild(&mut self, documents: &[(String, Value)]) {
        debug!("IndexSystem: rebuilding {} indexes from {} documents", self.indexes.len(), documents.len());

        for index in self.indexes.values_mut() {
            index.clear();
        }
        self.add_documents(documents);
    }

    /// Choose how to answer a query
    ///
    /// The first `where` pair on an indexed field with an indexable value
    /// narrows the candidates; every candidate still has to be checked
    /// against the full clause.
    pub fn plan(&self, query: &Query) -> QueryPlan {
        let plan = query
            .conditions()
            .and_then(|conditions| {
                conditions.iter().find_map(|(name, expected)| {
                    let index = self.indexes.get(name)?;
                    let keys = index.find_by_value(expected)?;
                    Some(QueryPlan::IndexLookup {
                        field: name.clone(),
                        keys,
                    })
                })
            })
            .unwrap_or(QueryPlan::FullScan);

        match plan {
            QueryPlan::IndexLookup { .. } => self.index_lookups.fetch_add(1, Ordering::Relaxed),
            QueryPlan::FullScan => self.full_scans.fetch_add(1, Ordering::Relaxed),
        };

        plan
    }

    /// Get indexing statistics
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            indexed_fields: self.fields(),
            total_entries: self.indexes.values().map(FieldIndex::len).sum(),
            total_adds: self.total_adds,
            total_removes: self.total_removes,
            index_lookups: self.index_lookups.load(Ordering::Relaxed),
            full_scans: self.full_scans.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn docs() -> Vec<(String, Value)> {
        vec![
            ("d1".to_string(), json!({"id": "d1", "a": 1, "name": "x"})),
            ("d2".to_string(), json!({"id": "d2", "a": 2, "name": "y"})),
            ("d3".to_string(), json!({"id": "d3", "a": 1, "name": "z"})),
        ]
    }

    #[test]
    fn test_plan_uses_index() {
        let mut system = IndexSystem::new();
        assert!(system.create_index("a", &docs()));
        assert!(!system.create_index("a", &docs()));

        let plan = system.plan(&Query::new().filter(json!({"name": "z", "a": 1})));
        let expected: BTreeSet<String> = ["d1", "d3"].iter().map(|s| s.to_string()).collect();
        assert_eq!(plan, QueryPlan::IndexLookup { field: "a".to_string(), keys: expected });

        assert_eq!(system.plan(&Query::new().filter(json!({"name": "z"}))), QueryPlan::FullScan);
        assert_eq!(system.plan(&Query::new().filter(json!({"a": [1]}))), QueryPlan::FullScan);
        assert_eq!(system.plan(&Query::new()), QueryPlan::FullScan);

        let stats = system.stats();
        assert_eq!(stats.index_lookups, 1);
        assert_eq!(stats.full_scans, 3);
        assert_eq!(stats.total_entries, 3);
    }

    #[test]
    fn test_maintenance() {
        let mut system = IndexSystem::new();
        system.create_index("a", &[]);

        let all = docs();
        system.add_documents(&all);
        system.remove_documents(&all[..1]);

        let stats = system.stats();
        assert_eq!(stats.total_adds, 3);
        assert_eq!(stats.total_removes, 1);
        assert_eq!(stats.total_entries, 2);

        system.clear();
        assert_eq!(system.stats().total_entries, 0);
        assert_eq!(system.fields(), vec!["a".to_string()]);

        system.rebuild(&all);
        assert_eq!(system.stats().total_entries, 3);
    }
}
