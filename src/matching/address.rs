// src/matching/address.rs - Address canonicalization and the address half of the match score

use once_cell::sync::Lazy;
use regex::Regex;

/// Points for an address agreement (equal, substring, or same street line).
pub const ADDRESS_MATCH_SCORE: u32 = 10;
/// Extra points when the normalized addresses are exactly equal.
pub const ADDRESS_EXACT_BONUS: u32 = 5;
/// How much of the street-name token must agree in the street-line rule.
pub const STREET_NAME_PREFIX_LEN: usize = 10;

static SUFFIX_REWRITES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"\bstreet\b", "st"),
        (r"\bavenue\b", "ave"),
        (r"\bboulevard\b", "blvd"),
        (r"\bplace\b", "pl"),
        (r"\broad\b", "rd"),
        (r"\bdrive\b", "dr"),
    ]
    .into_iter()
    .map(|(pattern, abbrev)| (Regex::new(pattern).unwrap(), abbrev))
    .collect()
});

static STREET_LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\s+([\w\s]+)").unwrap());

/// Canonicalize an address into a comparison key.
///
/// Lowercases, abbreviates common suffix words on word boundaries, strips
/// punctuation, and collapses whitespace. Idempotent; empty input yields the
/// empty key.
pub fn normalize_address(address: &str) -> String {
    let mut normalized = address.to_lowercase();
    for (pattern, abbrev) in SUFFIX_REWRITES.iter() {
        normalized = pattern.replace_all(&normalized, *abbrev).into_owned();
    }
    let stripped: String = normalized
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Leading street number plus the first `STREET_NAME_PREFIX_LEN` characters
/// of the street-name token, if the key looks like a street line at all.
fn street_line(normalized: &str) -> Option<(String, String)> {
    let captures = STREET_LINE_RE.captures(normalized)?;
    let number = captures.get(1)?.as_str().to_string();
    let street: String = captures
        .get(2)?
        .as_str()
        .trim()
        .chars()
        .take(STREET_NAME_PREFIX_LEN)
        .collect();
    Some((number, street))
}

/// Address contribution to the match score.
///
/// When either side lacks an address the component is vacuously satisfied at
/// `ADDRESS_MATCH_SCORE` with no bonus: a name-only match is still
/// acceptable, but two absent addresses never look "exactly equal".
pub fn address_points(normalized_a: &str, normalized_b: &str) -> u32 {
    if normalized_a.is_empty() || normalized_b.is_empty() {
        return ADDRESS_MATCH_SCORE;
    }
    if normalized_a == normalized_b {
        return ADDRESS_MATCH_SCORE + ADDRESS_EXACT_BONUS;
    }
    if normalized_a.contains(normalized_b) || normalized_b.contains(normalized_a) {
        return ADDRESS_MATCH_SCORE;
    }
    match (street_line(normalized_a), street_line(normalized_b)) {
        (Some(a), Some(b)) if a == b => ADDRESS_MATCH_SCORE,
        _ => 0,
    }
}
