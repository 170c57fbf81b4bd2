// src/core/index/types.rs
use std::fmt;

/// Statistics of the indexing system
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IndexStats {
    /// Fields that carry an equality index
    pub indexed_fields: Vec<String>,
    /// Document keys held across all indexes
    pub total_entries: usize,
    /// Total number of index additions
    pub total_adds: usize,
    /// Total number of index removals
    pub total_removes: usize,
    /// Queries answered from an index
    pub index_lookups: usize,
    /// Queries answered by scanning every document
    pub full_scans: usize,
}

impl fmt::Display for IndexStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Indexed fields: {}", self.indexed_fields.join(", "))?;
        writeln!(f, "Total entries: {}", self.total_entries)?;
        writeln!(f, "Total adds: {}", self.total_adds)?;
        writeln!(f, "Total removes: {}", self.total_removes)?;
        writeln!(f, "Index lookups: {}", self.index_lookups)?;
        write!(f, "Full scans: {}", self.full_scans)
    }
}
