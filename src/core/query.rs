//! Document queries
//!
//! A query carries an equality filter (`where`), an optional sort field and
//! 1-based pagination. It deserializes from the same JSON shape callers write
//! by hand: `{"where": {"a": 3}, "sort": "name", "page": 1, "size": 10}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::document::field;
use super::errors::{Result, StoreError};
use super::value::{compare_values, values_equal};

/// A request describing an equality filter, a sort field and pagination
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// Field/value pairs that must all be equal
    #[serde(rename = "where", default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
    /// Field to sort by, ascending
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    /// 1-based page number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size; 0 disables pagination
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

impl Query {
    /// Create a query that matches every document
    pub fn new() -> Self {
        Query::default()
    }

    /// Parse a query from its JSON form
    pub fn from_json(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Query::new());
        }
        serde_json::from_str(text).map_err(|e| StoreError::InvalidQuery(e.to_string()))
    }

    /// Set the `where` clause
    pub fn filter(mut self, filter: Value) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Set the sort field
    pub fn sort_by<S: Into<String>>(mut self, field: S) -> Self {
        self.sort = Some(field.into());
        self
    }

    /// Set the page number (1-based)
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the page size
    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// The `where` clause, with an explicit `null` treated as absent
    pub fn where_clause(&self) -> Option<&Value> {
        self.filter.as_ref().filter(|v| !v.is_null())
    }

    /// Equality pairs of the `where` clause, if it is a non-empty object
    pub fn conditions(&self) -> Option<&serde_json::Map<String, Value>> {
        self.where_clause()
            .and_then(Value::as_object)
            .filter(|map| !map.is_empty())
    }

    /// Check whether a document satisfies the `where` clause
    pub fn matches(&self, document: &Value) -> bool {
        let clause = match self.where_clause() {
            Some(clause) => clause,
            None => return true,
        };

        let conditions = match clause.as_object() {
            Some(map) => map,
            // A non-object clause can never be satisfied
            None => return false,
        };

        conditions.iter().all(|(name, expected)| {
            field(document, name).map_or(false, |actual| values_equal(actual, expected))
        })
    }

    /// Order `(key, document)` pairs by the sort field, ties by key
    pub fn sort_documents(&self, documents: &mut [(String, Value)]) {
        let sort_field = match self.sort.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => return,
        };

        let null = Value::Null;
        documents.sort_by(|(ka, a), (kb, b)| {
            let a_val = field(a, sort_field).unwrap_or(&null);
            let b_val = field(b, sort_field).unwrap_or(&null);
            compare_values(a_val, b_val).then_with(|| ka.cmp(kb))
        });
    }

    /// The `(skip, take)` window selected by `page` and `size`
    pub fn window(&self) -> Option<(usize, usize)> {
        let size = match self.size {
            Some(size) if size > 0 => size as usize,
            _ => return None,
        };
        let page = self.page.unwrap_or(1).max(1) as usize;

        Some(((page - 1).saturating_mul(size), size))
    }
}

/// Result of a find: the selected page plus the number of matches overall
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FindResults {
    pub documents: Vec<Value>,
    pub total_count: usize,
}

impl FindResults {
    /// Build results from matching documents, applying sort and pagination
    pub fn from_matches(query: &Query, mut matches: Vec<(String, Value)>) -> Self {
        let total_count = matches.len();
        query.sort_documents(&mut matches);

        let documents: Vec<Value> = match query.window() {
            Some((skip, take)) => matches
                .into_iter()
                .skip(skip)
                .take(take)
                .map(|(_, doc)| doc)
                .collect(),
            None => matches.into_iter().map(|(_, doc)| doc).collect(),
        };

        FindResults {
            documents,
            total_count,
        }
    }

    /// Check whether no documents were returned
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keyed(docs: Vec<Value>) -> Vec<(String, Value)> {
        docs.into_iter()
            .map(|d| (d["id"].as_str().unwrap().to_string(), d))
            .collect()
    }

    #[test]
    fn test_parse_call_site_shape() {
        let query = Query::from_json(r#"{"where": {"a": 5}, "sort": "name", "page": 1, "size": 1}"#).unwrap();

        assert_eq!(query.filter, Some(json!({"a": 5})));
        assert_eq!(query.sort.as_deref(), Some("name"));
        assert_eq!(query.page, Some(1));
        assert_eq!(query.size, Some(1));

        assert_eq!(Query::from_json("  ").unwrap(), Query::new());
        assert!(matches!(Query::from_json("{\"page\": -1}"), Err(StoreError::InvalidQuery(_))));
    }

    #[test]
    fn test_where_semantics() {
        let doc = json!({"id": "1", "a": 5, "name": "x", "nested": {"k": true}});

        assert!(Query::new().matches(&doc));
        assert!(Query::new().filter(Value::Null).matches(&doc));
        assert!(Query::new().filter(json!({})).matches(&doc));
        assert!(Query::new().filter(json!({"a": 5.0, "name": "x"})).matches(&doc));
        assert!(Query::new().filter(json!({"nested.k": true})).matches(&doc));

        assert!(!Query::new().filter(json!({"a": 6})).matches(&doc));
        assert!(!Query::new().filter(json!({"a": "5"})).matches(&doc));
        assert!(!Query::new().filter(json!("a")).matches(&doc));
        assert!(!Query::new().filter(json!([1])).matches(&doc));
        // A missing field does not equal null
        assert!(!Query::new().filter(json!({"gone": null})).matches(&doc));
    }

    #[test]
    fn test_sort_missing_fields_first_ties_by_key() {
        let query = Query::new().sort_by("name");
        let mut docs = keyed(vec![
            json!({"id": "c", "name": "beta"}),
            json!({"id": "b", "name": "alpha"}),
            json!({"id": "z"}),
            json!({"id": "a", "name": "alpha"}),
        ]);

        query.sort_documents(&mut docs);
        let order: Vec<&str> = docs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(order, vec!["z", "a", "b", "c"]);
    }

    #[test]
    fn test_numeric_sort_is_not_lexicographic() {
        let query = Query::new().sort_by("n");
        let mut docs = keyed(vec![
            json!({"id": "x", "n": 10}),
            json!({"id": "y", "n": 9}),
            json!({"id": "w", "n": 100}),
        ]);

        query.sort_documents(&mut docs);
        let order: Vec<&str> = docs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(order, vec!["y", "x", "w"]);
    }

    #[test]
    fn test_window() {
        assert_eq!(Query::new().window(), None);
        assert_eq!(Query::new().page(3).window(), None);
        assert_eq!(Query::new().size(0).page(2).window(), None);
        assert_eq!(Query::new().size(10).window(), Some((0, 10)));
        assert_eq!(Query::new().page(1).size(1).window(), Some((0, 1)));
        assert_eq!(Query::new().page(0).size(5).window(), Some((0, 5)));
        assert_eq!(Query::new().page(3).size(5).window(), Some((10, 5)));
    }

    #[test]
    fn test_results_keep_total_count() {
        let query = Query::new().sort_by("id").page(2).size(2);
        let docs = keyed((0..5).map(|i| json!({"id": format!("d{}", i)})).collect());

        let results = FindResults::from_matches(&query, docs);
        assert_eq!(results.total_count, 5);
        assert_eq!(results.documents, vec![json!({"id": "d2"}), json!({"id": "d3"})]);

        let past_end = FindResults::from_matches(&query.clone().page(9), Vec::new());
        assert!(past_end.is_empty());
        assert_eq!(past_end.total_count, 0);
    }
}
