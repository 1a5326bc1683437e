// src/models/matching.rs - Score, stats, and audit types for the merge pipeline

use serde::Serialize;

use crate::models::core::RestaurantRecord;

/// Additive match score between two records. Name and address contribute
/// independently; see `matching::matcher` for the point values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchScore {
    pub name_points: u32,
    pub address_points: u32,
}

impl MatchScore {
    pub fn total(&self) -> u32 {
        self.name_points + self.address_points
    }
}

/// Counters produced by one list-merge pass.
#[derive(Debug, Default, Clone)]
pub struct MergeStats {
    pub primary_count: usize,
    pub secondary_count: usize,
    pub matched: usize,
    pub standalone: usize,
    /// Secondary records that could not participate in matching at all
    /// because they carry no usable name.
    pub missing_name: usize,
    /// Pool searches where more than one candidate tied at the winning
    /// score. Resolved first-seen; counted for audit only.
    pub ambiguous_matches: usize,
}

/// Audit entry for one collapsed duplicate group. Diagnostic output only,
/// never part of the data contract.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateGroup {
    pub identity_key: String,
    pub count: usize,
    pub names: Vec<String>,
}

/// Result of a deduplication pass: the surviving records plus the audit
/// trail of every group that actually collapsed.
#[derive(Debug, Clone)]
pub struct DedupeOutcome {
    pub merged: Vec<RestaurantRecord>,
    pub duplicate_groups: Vec<DuplicateGroup>,
}
