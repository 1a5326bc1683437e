// src/merging/dedupe.rs - Collapse records that resolve to the same identity

use std::collections::HashMap;

use log::{info, warn};
use uuid::Uuid;

use crate::matching::address::normalize_address;
use crate::matching::name::normalize_name;
use crate::merging::field_merge::merge_field_values;
use crate::models::core::RestaurantRecord;
use crate::models::matching::{DedupeOutcome, DuplicateGroup};

/// Resolve the key under which a record claims identity: the place
/// identifier when known, else the normalized name+address pair, else a
/// synthetic key that is guaranteed not to collide with anything.
pub fn identity_key(record: &RestaurantRecord) -> String {
    if let Some(place_id) = record.place_id.as_deref() {
        if !place_id.trim().is_empty() {
            return place_id.to_string();
        }
    }
    let name = record
        .name
        .as_deref()
        .map(normalize_name)
        .unwrap_or_default();
    let address = record
        .best_address()
        .map(normalize_address)
        .unwrap_or_default();
    if !name.is_empty() && !address.is_empty() {
        return format!("{}::{}", name, address);
    }
    warn!(
        "Dedupe: record '{}' has no resolvable identity; assigning a synthetic key",
        record.display_name()
    );
    format!("unidentified::{}", Uuid::new_v4())
}

/// Group records by identity key (preserving first-seen order) and collapse
/// every group larger than one through the field merger. Returns the
/// surviving records plus an audit entry per collapsed group.
pub fn deduplicate(records: &[RestaurantRecord]) -> DedupeOutcome {
    let mut group_index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<RestaurantRecord>)> = Vec::new();

    for record in records {
        let key = identity_key(record);
        match group_index.get(&key) {
            Some(&i) => groups[i].1.push(record.clone()),
            None => {
                group_index.insert(key.clone(), groups.len());
                groups.push((key, vec![record.clone()]));
            }
        }
    }

    let mut merged = Vec::with_capacity(groups.len());
    let mut duplicate_groups = Vec::new();

    for (key, group) in groups {
        if group.len() > 1 {
            duplicate_groups.push(DuplicateGroup {
                identity_key: key,
                count: group.len(),
                names: group.iter().map(|r| r.display_name().to_string()).collect(),
            });
            merged.push(merge_field_values(&group));
        } else {
            merged.push(group.into_iter().next().expect("group is non-empty"));
        }
    }

    info!(
        "Dedupe: {} records -> {} ({} duplicate groups collapsed)",
        records.len(),
        merged.len(),
        duplicate_groups.len()
    );

    DedupeOutcome {
        merged,
        duplicate_groups,
    }
}
