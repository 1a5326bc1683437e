// src/enrichment/fixture.rs - Offline lookup adapter backed by a JSON fixture

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;

use crate::enrichment::{PlaceDetails, PlaceLookup};
use crate::matching::name::{name_points, normalize_name};
use crate::models::core::GeoBounds;
use crate::utils::constants::NYC_BOUNDS;

/// One candidate place in the fixture file: a display name plus the details
/// payload the provider would return for it.
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureEntry {
    pub name: String,
    #[serde(flatten)]
    pub details: PlaceDetails,
}

/// Lookup adapter that serves candidates from a local fixture file, with
/// the same candidate discipline a live provider adapter would apply:
/// candidates outside the configured bounds are rejected and the
/// highest-rated survivor wins. Configuration is explicit — a path and a
/// bounding box — never read from module state.
pub struct FixtureLookup {
    entries: Vec<FixtureEntry>,
    bounds: GeoBounds,
}

impl FixtureLookup {
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::from_file_with_bounds(path, NYC_BOUNDS)
    }

    pub fn from_file_with_bounds(path: &Path, bounds: GeoBounds) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read lookup fixture {}", path.display()))?;
        let entries: Vec<FixtureEntry> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse lookup fixture {}", path.display()))?;
        debug!("Fixture: loaded {} place candidates", entries.len());
        Ok(Self { entries, bounds })
    }

    #[cfg(test)]
    pub fn from_entries(entries: Vec<FixtureEntry>, bounds: GeoBounds) -> Self {
        Self { entries, bounds }
    }

    fn in_bounds(&self, entry: &FixtureEntry) -> bool {
        match (entry.details.latitude, entry.details.longitude) {
            (Some(lat), Some(lng)) => self.bounds.contains(lat, lng),
            _ => false,
        }
    }
}

impl PlaceLookup for FixtureLookup {
    fn lookup(&self, name: &str, _address: Option<&str>) -> Result<Option<PlaceDetails>> {
        let probe = normalize_name(name);
        if probe.is_empty() {
            return Ok(None);
        }
        let best = self
            .entries
            .iter()
            .filter(|entry| name_points(&probe, &normalize_name(&entry.name)) > 0)
            .filter(|entry| self.in_bounds(entry))
            .max_by(|a, b| {
                let ra = a.details.rating.unwrap_or(0.0);
                let rb = b.details.rating.unwrap_or(0.0);
                ra.partial_cmp(&rb).unwrap_or(std::cmp::Ordering::Equal)
            });
        Ok(best.map(|entry| entry.details.clone()))
    }

    fn details_by_id(&self, place_id: &str) -> Result<Option<PlaceDetails>> {
        Ok(self
            .entries
            .iter()
            .find(|entry| entry.details.place_id == place_id)
            .map(|entry| entry.details.clone()))
    }
}
