// src/merging/field_merge.rs - Collapse a duplicate group into one record

use crate::merging::is_blank;
use crate::models::core::RestaurantRecord;

fn adopt_scalar(current: &mut Option<String>, candidate: &Option<String>) {
    if is_blank(current.as_deref()) && !is_blank(candidate.as_deref()) {
        *current = candidate.clone();
    }
}

/// Merge the field values of records known to denote the same entity.
///
/// The first record is the base; the rest contribute in order under
/// field-specific precedence: union of sources, per-source minimum rank,
/// first-non-blank scalars, strictly-greater rating with its review count
/// adopted atomically, coordinates and opening hours as pairs, and the
/// greatest `last_updated`. `combined_order` is left untouched; recomputing
/// it is the ordering pass's job.
pub fn merge_field_values(group: &[RestaurantRecord]) -> RestaurantRecord {
    let mut merged = group
        .first()
        .cloned()
        .unwrap_or_default();

    for record in group.iter().skip(1) {
        merged.sources.extend(record.sources.iter().copied());
    }
    merged.nyt_rank = group.iter().filter_map(|r| r.nyt_rank).min();
    merged.nym_rank = group.iter().filter_map(|r| r.nym_rank).min();

    for record in group.iter().skip(1) {
        adopt_scalar(&mut merged.name, &record.name);
        adopt_scalar(&mut merged.description, &record.description);
        adopt_scalar(&mut merged.address, &record.address);
        adopt_scalar(&mut merged.formatted_address, &record.formatted_address);
        adopt_scalar(&mut merged.neighborhood, &record.neighborhood);
        adopt_scalar(&mut merged.website, &record.website);
        adopt_scalar(&mut merged.phone, &record.phone);
        adopt_scalar(&mut merged.google_maps_url, &record.google_maps_url);
        adopt_scalar(&mut merged.cuisine, &record.cuisine);
        adopt_scalar(&mut merged.price_range, &record.price_range);
        adopt_scalar(&mut merged.image_url, &record.image_url);

        // A strictly greater rating wins, and brings its review count with
        // it; the two fields never move independently.
        if let Some(candidate) = record.rating {
            if merged.rating.map_or(true, |current| candidate > current) {
                merged.rating = Some(candidate);
                merged.review_count = record.review_count;
            }
        }

        if merged.latitude.is_none()
            && merged.longitude.is_none()
            && record.latitude.is_some()
            && record.longitude.is_some()
        {
            merged.latitude = record.latitude;
            merged.longitude = record.longitude;
        }

        if merged.opening_hours.is_none() && record.opening_hours.is_some() {
            merged.opening_hours = record.opening_hours.clone();
            merged.is_open_now = record.is_open_now;
        }

        if let Some(candidate) = &record.last_updated {
            if merged
                .last_updated
                .as_ref()
                .map_or(true, |current| candidate > current)
            {
                merged.last_updated = Some(candidate.clone());
            }
        }
    }

    merged
}
