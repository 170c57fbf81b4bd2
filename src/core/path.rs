//! Field paths for rudb
//!
//! This module defines the FieldPath structure, which addresses a value
//! nested inside a document (e.g. `profile.city` or `tags[0]`).

use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use serde::{Serialize, Deserialize};
use serde_json::Value;

/// Errors that can occur when working with paths
#[derive(Error, Debug, PartialEq)]
pub enum PathError {
    #[error("Invalid path format: {0}")]
    InvalidFormat(String),
    #[error("Empty path")]
    EmptyPath,
}

/// A segment in a field path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathSegment {
    /// Object member
    Named(String),
    /// Array element (e.g., [0])
    ArrayIndex(usize),
}

impl PathSegment {
    /// Check if this segment is an array index
    pub fn is_array_index(&self) -> bool {
        matches!(self, PathSegment::ArrayIndex(_))
    }

    /// Get the array index if this is an array index segment
    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathSegment::ArrayIndex(idx) => Some(*idx),
            _ => None,
        }
    }

    /// Step from `value` into the child this segment names
    fn step<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        match (self, value) {
            (PathSegment::Named(name), Value::Object(map)) => map.get(name),
            (PathSegment::ArrayIndex(idx), Value::Array(items)) => items.get(*idx),
            _ => None,
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Named(name) => write!(f, "{}", name),
            PathSegment::ArrayIndex(idx) => write!(f, "[{}]", idx),
        }
    }
}

/// A path into a document (e.g., "profile.addresses[0].city")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// Create a path from a vector of segments
    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        FieldPath { segments }
    }

    /// Get the number of segments in the path
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if the path is empty
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Get all segments in the path
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Get a specific segment by index
    pub fn segment(&self, index: usize) -> Option<&PathSegment> {
        self.segments.get(index)
    }

    /// Resolve this path against a document
    pub fn resolve<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(root, |current, segment| segment.step(current))
    }
}

/// Split one dotted component such as `tags[0][1]` into its segments
fn parse_component(component: &str, source: &str, out: &mut Vec<PathSegment>) -> Result<(), PathError> {
    let (name, mut rest) = match component.find('[') {
        Some(pos) => (&component[..pos], &component[pos..]),
        None => (component, ""),
    };

    if !name.is_empty() {
        out.push(PathSegment::Named(name.to_string()));
    } else if rest.is_empty() {
        return Err(PathError::InvalidFormat(format!("empty segment in '{}'", source)));
    }

    while !rest.is_empty() {
        let close = rest
            .find(']')
            .ok_or_else(|| PathError::InvalidFormat(format!("unclosed index in '{}'", source)))?;
        let index = rest[1..close]
            .parse::<usize>()
            .map_err(|_| PathError::InvalidFormat(format!("bad array index in '{}'", source)))?;
        out.push(PathSegment::ArrayIndex(index));

        rest = &rest[close + 1..];
        if !rest.is_empty() && !rest.starts_with('[') {
            return Err(PathError::InvalidFormat(format!("unexpected '{}' in '{}'", rest, source)));
        }
    }

    Ok(())
}

/// Parse a string into a FieldPath
impl FromStr for FieldPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(PathError::EmptyPath);
        }

        let mut segments = Vec::new();
        for component in s.split('.') {
            parse_component(component, s, &mut segments)?;
        }

        Ok(FieldPath { segments })
    }
}

/// Format a FieldPath as a string with dot separators
impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 && !segment.is_array_index() {
                write!(f, ".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_path_parsing() {
        let path = "profile.address.city".parse::<FieldPath>().unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.segment(0), Some(&PathSegment::Named("profile".to_string())));
        assert_eq!(path.segment(2), Some(&PathSegment::Named("city".to_string())));
    }

    #[test]
    fn test_array_index_parsing() {
        let path = "users.tags[0]".parse::<FieldPath>().unwrap();
        assert_eq!(path.len(), 3);

        let segment = path.segment(2).unwrap();
        assert!(segment.is_array_index());
        assert_eq!(segment.as_index(), Some(0));

        let standalone = "matrix.[1][2]".parse::<FieldPath>().unwrap();
        assert_eq!(standalone.len(), 3);
        assert_eq!(standalone.segment(2).and_then(|s| s.as_index()), Some(2));
    }

    #[test]
    fn test_path_formatting() {
        let path: FieldPath = "profile.tags[1].label".parse().unwrap();
        assert_eq!(path.to_string(), "profile.tags[1].label");
    }

    #[test]
    fn test_invalid_paths() {
        assert_eq!("".parse::<FieldPath>(), Err(PathError::EmptyPath));
        assert!(matches!("a..b".parse::<FieldPath>(), Err(PathError::InvalidFormat(_))));
        assert!(matches!("a[x]".parse::<FieldPath>(), Err(PathError::InvalidFormat(_))));
        assert!(matches!("a[1".parse::<FieldPath>(), Err(PathError::InvalidFormat(_))));
        assert!(matches!("a[1]b".parse::<FieldPath>(), Err(PathError::InvalidFormat(_))));
    }

    #[test]
    fn test_resolve() {
        let doc = json!({
            "name": "alice",
            "profile": { "city": "Lyon", "tags": ["a", "b"] }
        });

        let city: FieldPath = "profile.city".parse().unwrap();
        let tag: FieldPath = "profile.tags[1]".parse().unwrap();
        let missing: FieldPath = "profile.zip".parse().unwrap();
        let through_scalar: FieldPath = "name.first".parse().unwrap();

        assert_eq!(city.resolve(&doc), Some(&json!("Lyon")));
        assert_eq!(tag.resolve(&doc), Some(&json!("b")));
        assert_eq!(missing.resolve(&doc), None);
        assert_eq!(through_scalar.resolve(&doc), None);
    }
}
