// src/utils/constants.rs

use crate::models::core::GeoBounds;

/// Offset added to secondary-source ranks so secondary-only records always
/// sort after every primary-sourced record. Fixed and documented: primary
/// lists are capped well below this size.
pub const SECONDARY_SOURCE_OFFSET: i64 = 100;

/// Sentinel ordering key for records with no rank in any source.
pub const UNRANKED_ORDER: i64 = 999;

/// Bounding box the lookup adapter uses to reject candidates outside the
/// catalog's city.
pub const NYC_BOUNDS: GeoBounds = GeoBounds {
    north: 40.9176,
    south: 40.4774,
    east: -73.7004,
    west: -74.2591,
};
