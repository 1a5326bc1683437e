// src/enrichment/backfill.rs - Copy known place identifiers from a reference catalog

use log::{info, warn};

use crate::matching::name::normalize_name;
use crate::merging::is_blank;
use crate::models::core::{RestaurantRecord, SourceTag};

#[derive(Debug, Default, Clone)]
pub struct BackfillStats {
    pub updated: usize,
    pub still_missing: usize,
}

/// Find the reference record denoting the same entity: an exact
/// normalized-name match first, then a substring match gated by address
/// containment when both sides carry an address.
fn find_reference_match<'a>(
    record: &RestaurantRecord,
    reference: &'a [RestaurantRecord],
) -> Option<&'a RestaurantRecord> {
    let probe = record.name.as_deref().map(normalize_name).unwrap_or_default();
    if probe.is_empty() {
        return None;
    }

    for candidate in reference {
        let candidate_name = candidate
            .name
            .as_deref()
            .map(normalize_name)
            .unwrap_or_default();
        if !candidate_name.is_empty() && candidate_name == probe {
            return Some(candidate);
        }
    }

    for candidate in reference {
        let candidate_name = candidate
            .name
            .as_deref()
            .map(normalize_name)
            .unwrap_or_default();
        if candidate_name.is_empty()
            || !(probe.contains(&candidate_name) || candidate_name.contains(&probe))
        {
            continue;
        }
        match (record.best_address(), candidate.best_address()) {
            (Some(a), Some(b)) => {
                let a = a.to_lowercase();
                let b = b.to_lowercase();
                if a.contains(&b) || b.contains(&a) {
                    return Some(candidate);
                }
            }
            _ => return Some(candidate),
        }
    }

    None
}

/// For every primary-tagged record still lacking a place identifier, adopt
/// the identifier — and any missing enrichment fields — from its match in a
/// previously-enriched reference catalog. Records the provider never
/// resolved stay as they are; this pass only fills holes.
pub fn backfill_place_ids(
    records: &[RestaurantRecord],
    reference: &[RestaurantRecord],
) -> (Vec<RestaurantRecord>, BackfillStats) {
    let mut stats = BackfillStats::default();
    let mut updated_records = Vec::with_capacity(records.len());

    for record in records {
        if record.place_id.is_some() || !record.sources.contains(&SourceTag::Nyt) {
            updated_records.push(record.clone());
            continue;
        }

        let matched = find_reference_match(record, reference)
            .filter(|candidate| candidate.place_id.is_some());

        match matched {
            Some(candidate) => {
                let mut updated = record.clone();
                updated.place_id = candidate.place_id.clone();
                if updated.rating.is_none() && candidate.rating.is_some() {
                    updated.rating = candidate.rating;
                    updated.review_count = candidate.review_count;
                }
                if !updated.has_coordinates() && candidate.has_coordinates() {
                    updated.latitude = candidate.latitude;
                    updated.longitude = candidate.longitude;
                }
                if updated.opening_hours.is_none() && candidate.opening_hours.is_some() {
                    updated.opening_hours = candidate.opening_hours.clone();
                    updated.is_open_now = candidate.is_open_now;
                }
                if is_blank(updated.website.as_deref()) {
                    updated.website = candidate.website.clone();
                }
                if is_blank(updated.phone.as_deref()) {
                    updated.phone = candidate.phone.clone();
                }
                if is_blank(updated.google_maps_url.as_deref()) {
                    updated.google_maps_url = candidate.google_maps_url.clone();
                }
                stats.updated += 1;
                updated_records.push(updated);
            }
            None => {
                warn!(
                    "Backfill: no place identifier found for primary record '{}'",
                    record.display_name()
                );
                stats.still_missing += 1;
                updated_records.push(record.clone());
            }
        }
    }

    info!(
        "Backfill: {} records updated, {} primary records still missing identifiers",
        stats.updated, stats.still_missing
    );
    (updated_records, stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn primary(name: &str) -> RestaurantRecord {
        let mut record = RestaurantRecord {
            name: Some(name.to_string()),
            ..Default::default()
        };
        record.sources.insert(SourceTag::Nyt);
        record
    }

    fn reference(name: &str, place_id: &str) -> RestaurantRecord {
        RestaurantRecord {
            name: Some(name.to_string()),
            place_id: Some(place_id.to_string()),
            rating: Some(4.4),
            review_count: Some(120),
            ..Default::default()
        }
    }

    #[test]
    fn exact_name_match_adopts_the_identifier() {
        let (records, stats) =
            backfill_place_ids(&[primary("Semma")], &[reference("semma", "abc123")]);
        assert_eq!(records[0].place_id.as_deref(), Some("abc123"));
        assert_eq!(records[0].rating, Some(4.4));
        assert_eq!(records[0].review_count, Some(120));
        assert_eq!(stats.updated, 1);
    }

    #[test]
    fn substring_match_requires_address_agreement_when_both_present() {
        let mut record = primary("Semma");
        record.formatted_address = Some("60 Greenwich Ave".to_string());
        let mut wrong = reference("Semma Uptown", "wrong");
        wrong.formatted_address = Some("900 Amsterdam Ave".to_string());

        let (records, stats) = backfill_place_ids(&[record], &[wrong]);
        assert_eq!(records[0].place_id, None);
        assert_eq!(stats.still_missing, 1);
    }

    #[test]
    fn secondary_only_records_are_left_alone() {
        let mut record = RestaurantRecord {
            name: Some("Thai Diner".to_string()),
            ..Default::default()
        };
        record.sources.insert(SourceTag::Nym);

        let (records, stats) =
            backfill_place_ids(&[record.clone()], &[reference("Thai Diner", "abc")]);
        assert_eq!(records[0], record);
        assert_eq!(stats.updated, 0);
    }

    #[test]
    fn existing_identifiers_are_never_overwritten() {
        let mut record = primary("Semma");
        record.place_id = Some("keep-me".to_string());

        let (records, _) = backfill_place_ids(&[record], &[reference("Semma", "other")]);
        assert_eq!(records[0].place_id.as_deref(), Some("keep-me"));
    }
}
