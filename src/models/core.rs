// src/models/core.rs - Canonical record shape shared by every pipeline stage

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Origin list a record (or one of its fields) came from.
///
/// Variant order matters: `BTreeSet<SourceTag>` serializes in declaration
/// order, which is the sorted tag order ("NYM" < "NYT") the output schema
/// promises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SourceTag {
    #[serde(rename = "NYM")]
    Nym,
    #[serde(rename = "NYT")]
    Nyt,
}

impl SourceTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceTag::Nym => "NYM",
            SourceTag::Nyt => "NYT",
        }
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One day/time point inside an opening-hours period, as handed over by the
/// place-lookup provider. Kept loosely typed: providers omit pieces freely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OpeningPoint {
    pub day: Option<i64>,
    pub hour: Option<i64>,
    pub minute: Option<i64>,
}

/// An open/close period pair. A missing `close` means open-ended (the
/// provider emits that for 24h venues).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OpeningPeriod {
    pub open: Option<OpeningPoint>,
    pub close: Option<OpeningPoint>,
}

/// Rectangular lat/lng bounds used by lookup adapters to reject candidates
/// outside the catalog's city.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl GeoBounds {
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        self.south <= latitude
            && latitude <= self.north
            && self.west <= longitude
            && longitude <= self.east
    }
}

/// The one entity of the pipeline. Every field except `name` is optional;
/// absence is an explicit `None`, never a missing key, so each stage works
/// against a fixed shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RestaurantRecord {
    pub name: Option<String>,
    pub sources: BTreeSet<SourceTag>,

    /// Raw rank as handed over by a source parser. ListMerger copies it into
    /// the per-source rank field; kept on the record for compatibility with
    /// parser output files.
    pub rank: Option<i64>,
    pub nyt_rank: Option<i64>,
    pub nym_rank: Option<i64>,
    /// Derived ordering key. Recomputed by the ordering pass whenever ranks
    /// or source membership change; never authoritative input.
    pub combined_order: Option<i64>,

    pub rating: Option<f64>,
    pub review_count: Option<i64>,
    pub price_range: Option<String>,
    pub cuisine: Option<String>,
    pub description: Option<String>,

    /// Free-text address from an editorial parser.
    pub address: Option<String>,
    /// Provider-verified address. Once present it supersedes `address`.
    pub formatted_address: Option<String>,
    pub neighborhood: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    pub opening_hours: Option<Vec<OpeningPeriod>>,
    pub is_open_now: Option<bool>,

    pub website: Option<String>,
    pub phone: Option<String>,
    pub google_maps_url: Option<String>,
    pub image_url: Option<String>,

    /// Stable external identifier; strongest identity key once known.
    pub place_id: Option<String>,
    /// `%Y-%m-%d %H:%M:%S`; lexicographic order is chronological order.
    pub last_updated: Option<String>,
}

impl RestaurantRecord {
    /// Display name or a placeholder for logging. Matching itself never uses
    /// this; nameless records are excluded there.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }

    /// The address the record would present to a matcher or lookup provider:
    /// provider-verified if present, else editorial free text.
    pub fn best_address(&self) -> Option<&str> {
        self.formatted_address
            .as_deref()
            .or(self.address.as_deref())
    }

    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}
