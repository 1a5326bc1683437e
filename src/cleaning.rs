// src/cleaning.rs - Presentation cleanup for parsed editorial fields

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::core::RestaurantRecord;

const CUISINE_MAPPINGS: [(&str, &str); 3] = [
    ("Restaurant", "American"),
    ("udon noodles", "Japanese"),
    ("Azerbaijani restaurant", "Azerbaijani"),
];

/// Neighborhoods worth tagging, as they appear in editorial blurbs.
const NEIGHBORHOODS: [&str; 40] = [
    "Manhattan",
    "Brooklyn",
    "Queens",
    "Bronx",
    "Staten Island",
    "West Village",
    "East Village",
    "Greenwich Village",
    "SoHo",
    "NoMad",
    "Midtown",
    "Downtown",
    "Upper West Side",
    "Upper East Side",
    "Chinatown",
    "Little Italy",
    "Koreatown",
    "Harlem",
    "Chelsea",
    "Greenpoint",
    "Williamsburg",
    "Fort Greene",
    "Prospect Heights",
    "Bushwick",
    "Red Hook",
    "Sunset Park",
    "Bensonhurst",
    "Flushing",
    "Jackson Heights",
    "Elmhurst",
    "Astoria",
    "Long Island City",
    "Bedford-Stuyvesant",
    "Crown Heights",
    "Park Slope",
    "Bay Ridge",
    "Sheepshead Bay",
    "JFK",
    "Times Square",
    "Financial District",
];

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Standardize a price-range label for display.
pub fn clean_price_range(price_range: Option<&str>) -> String {
    match price_range {
        Some(raw) if !raw.trim().is_empty() => raw.trim().replace("$$", "$20\u{2013}30"),
        _ => "Price not available".to_string(),
    }
}

/// Canonicalize a cuisine label through the known-variant table.
pub fn clean_cuisine(cuisine: Option<&str>) -> String {
    let cleaned = match cuisine {
        Some(raw) if !raw.trim().is_empty() => raw.trim(),
        _ => return "Restaurant".to_string(),
    };
    CUISINE_MAPPINGS
        .iter()
        .find(|(variant, _)| *variant == cleaned)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or_else(|| cleaned.to_string())
}

/// Collapse whitespace and stray newline escapes; ensure a terminal period.
pub fn clean_description(description: Option<&str>) -> String {
    let raw = match description {
        Some(raw) => raw,
        None => return String::new(),
    };
    let flattened = raw.replace("\\n", " ").replace('\n', " ");
    let mut cleaned = WHITESPACE_RE
        .replace_all(flattened.trim(), " ")
        .into_owned();
    if !cleaned.is_empty() && !cleaned.ends_with('.') {
        cleaned.push('.');
    }
    cleaned
}

/// First known neighborhood mentioned in the description, if any.
pub fn extract_neighborhood(description: &str) -> Option<String> {
    let lower = description.to_lowercase();
    NEIGHBORHOODS
        .iter()
        .find(|n| lower.contains(&n.to_lowercase()))
        .map(|n| n.to_string())
}

/// Clean one record's presentation fields and tag a neighborhood when the
/// description names one and the record has none.
pub fn clean_record(record: &RestaurantRecord) -> RestaurantRecord {
    let mut cleaned = record.clone();
    cleaned.price_range = Some(clean_price_range(record.price_range.as_deref()));
    cleaned.cuisine = Some(clean_cuisine(record.cuisine.as_deref()));
    cleaned.description = Some(clean_description(record.description.as_deref()));

    if cleaned.neighborhood.is_none() {
        if let Some(description) = cleaned.description.as_deref() {
            cleaned.neighborhood = extract_neighborhood(description);
        }
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_range_defaults_and_expands() {
        assert_eq!(clean_price_range(None), "Price not available");
        assert_eq!(clean_price_range(Some("  ")), "Price not available");
        assert_eq!(clean_price_range(Some("$$")), "$20\u{2013}30");
        assert_eq!(clean_price_range(Some("$15 per bowl")), "$15 per bowl");
    }

    #[test]
    fn cuisine_maps_known_variants() {
        assert_eq!(clean_cuisine(None), "Restaurant");
        assert_eq!(clean_cuisine(Some("Restaurant")), "American");
        assert_eq!(clean_cuisine(Some("udon noodles")), "Japanese");
        assert_eq!(clean_cuisine(Some("South Indian")), "South Indian");
    }

    #[test]
    fn description_whitespace_is_collapsed_with_terminal_period() {
        assert_eq!(
            clean_description(Some("A  West Village\\n tasting\n menu")),
            "A West Village tasting menu."
        );
        assert_eq!(clean_description(Some("Already ends.")), "Already ends.");
        assert_eq!(clean_description(None), "");
    }

    #[test]
    fn neighborhood_is_extracted_from_description() {
        let record = RestaurantRecord {
            description: Some("A standout in the West Village".to_string()),
            ..Default::default()
        };
        let cleaned = clean_record(&record);
        assert_eq!(cleaned.neighborhood.as_deref(), Some("West Village"));
    }

    #[test]
    fn existing_neighborhood_is_kept() {
        let record = RestaurantRecord {
            description: Some("A standout in the West Village".to_string()),
            neighborhood: Some("Chelsea".to_string()),
            ..Default::default()
        };
        let cleaned = clean_record(&record);
        assert_eq!(cleaned.neighborhood.as_deref(), Some("Chelsea"));
    }
}
