// src/enrichment/mod.rs - Place-lookup collaborator seam and payload application

pub mod backfill;
pub mod fixture;

use anyhow::Result;
use chrono::Local;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::models::core::{OpeningPeriod, RestaurantRecord};

/// Everything a lookup provider can tell us about one place. Optional
/// fields mean "the provider had nothing", never "erase this".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PlaceDetails {
    pub place_id: String,
    pub formatted_address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub opening_hours: Option<Vec<OpeningPeriod>>,
    pub is_open_now: Option<bool>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub google_maps_url: Option<String>,
    pub rating: Option<f64>,
    pub review_count: Option<i64>,
    pub description: Option<String>,
}

/// The collaborator contract: sequential calls, zero-or-one best candidate
/// per query, failures absorbed by the caller. Implementations own their
/// configuration; the engine carries none.
pub trait PlaceLookup {
    /// Best candidate for a name (and optional address hint), or None.
    fn lookup(&self, name: &str, address: Option<&str>) -> Result<Option<PlaceDetails>>;

    /// Fresh details for an already-known place identifier, or None.
    fn details_by_id(&self, place_id: &str) -> Result<Option<PlaceDetails>>;
}

/// Result of one enrichment attempt. `Unavailable` always carries the
/// original record, so unwrapping can never lose data.
#[derive(Debug, Clone)]
pub enum EnrichmentOutcome {
    Enriched(RestaurantRecord),
    Unavailable(RestaurantRecord),
}

impl EnrichmentOutcome {
    pub fn into_record(self) -> RestaurantRecord {
        match self {
            EnrichmentOutcome::Enriched(record) | EnrichmentOutcome::Unavailable(record) => record,
        }
    }

    pub fn is_enriched(&self) -> bool {
        matches!(self, EnrichmentOutcome::Enriched(_))
    }
}

/// Timestamp in the catalog's fixed `%Y-%m-%d %H:%M:%S` format.
pub fn current_stamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Merge a provider payload into a record. Pure: provider values present in
/// the payload overwrite (a verified address supersedes free text),
/// absent values leave the record untouched, coordinates and opening hours
/// land as pairs, and `last_updated` is stamped.
pub fn apply_place_details(
    record: &RestaurantRecord,
    details: &PlaceDetails,
    stamp: &str,
) -> RestaurantRecord {
    let mut updated = record.clone();
    updated.place_id = Some(details.place_id.clone());

    if details.formatted_address.is_some() {
        updated.formatted_address = details.formatted_address.clone();
    }
    if let (Some(lat), Some(lng)) = (details.latitude, details.longitude) {
        updated.latitude = Some(lat);
        updated.longitude = Some(lng);
    }
    if details.opening_hours.is_some() {
        updated.opening_hours = details.opening_hours.clone();
        updated.is_open_now = details.is_open_now;
    }
    if details.website.is_some() {
        updated.website = details.website.clone();
    }
    if details.phone.is_some() {
        updated.phone = details.phone.clone();
    }
    if details.google_maps_url.is_some() {
        updated.google_maps_url = details.google_maps_url.clone();
    }
    if details.rating.is_some() {
        updated.rating = details.rating;
    }
    if details.review_count.is_some() {
        updated.review_count = details.review_count;
    }
    if details.description.is_some() {
        updated.description = details.description.clone();
    }
    updated.last_updated = Some(stamp.to_string());
    updated
}

/// One enrichment attempt against the provider. Lookup errors and empty
/// results both degrade to `Unavailable`; this path never aborts a run.
pub fn enrich_record(
    record: &RestaurantRecord,
    lookup: &dyn PlaceLookup,
    stamp: &str,
) -> EnrichmentOutcome {
    let name = match record.name.as_deref() {
        Some(name) if !name.trim().is_empty() => name,
        _ => return EnrichmentOutcome::Unavailable(record.clone()),
    };
    match lookup.lookup(name, record.best_address()) {
        Ok(Some(details)) => {
            EnrichmentOutcome::Enriched(apply_place_details(record, &details, stamp))
        }
        Ok(None) => EnrichmentOutcome::Unavailable(record.clone()),
        Err(err) => {
            warn!("Enrich: lookup failed for '{}': {:#}", name, err);
            EnrichmentOutcome::Unavailable(record.clone())
        }
    }
}

/// Refresh a record that already carries a place identifier with the
/// provider's current details.
pub fn refresh_record(
    record: &RestaurantRecord,
    lookup: &dyn PlaceLookup,
    stamp: &str,
) -> EnrichmentOutcome {
    let place_id = match record.place_id.as_deref() {
        Some(id) if !id.trim().is_empty() => id,
        _ => return EnrichmentOutcome::Unavailable(record.clone()),
    };
    match lookup.details_by_id(place_id) {
        Ok(Some(details)) => {
            EnrichmentOutcome::Enriched(apply_place_details(record, &details, stamp))
        }
        Ok(None) => EnrichmentOutcome::Unavailable(record.clone()),
        Err(err) => {
            warn!(
                "Enrich: refresh failed for '{}' ({}): {:#}",
                record.display_name(),
                place_id,
                err
            );
            EnrichmentOutcome::Unavailable(record.clone())
        }
    }
}
