// src/matching/name.rs - Name canonicalization and the name half of the match score

/// Points for an equal-or-substring name agreement.
pub const NAME_MATCH_SCORE: u32 = 10;
/// Extra points when the normalized names are exactly equal.
pub const NAME_EXACT_BONUS: u32 = 5;

/// Canonicalize a display name into a comparison key.
///
/// Lowercases, expands `&` to `and`, strips everything that is not
/// alphanumeric or whitespace (which removes straight and curly apostrophes
/// alike), and collapses runs of whitespace. Idempotent; empty input yields
/// the empty key.
pub fn normalize_name(name: &str) -> String {
    let lower = name.to_lowercase();
    let expanded = lower.replace('&', " and ");
    let stripped: String = expanded
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Name contribution to the match score. Requires both sides to carry a
/// usable name: a record without one cannot claim identity with anything.
pub fn name_points(normalized_a: &str, normalized_b: &str) -> u32 {
    if normalized_a.is_empty() || normalized_b.is_empty() {
        return 0;
    }
    if normalized_a == normalized_b {
        return NAME_MATCH_SCORE + NAME_EXACT_BONUS;
    }
    if normalized_a.contains(normalized_b) || normalized_b.contains(normalized_a) {
        return NAME_MATCH_SCORE;
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_lowercases_and_strips_punctuation() {
        assert_eq!(normalize_name("Joe's Pizza"), "joes pizza");
        assert_eq!(normalize_name("  Semma  "), "semma");
        assert_eq!(normalize_name("Café Mogador!"), "café mogador");
    }

    #[test]
    fn curly_and_straight_apostrophes_normalize_identically() {
        assert_eq!(normalize_name("Joe\u{2019}s Pizza"), normalize_name("Joe's Pizza"));
    }

    #[test]
    fn ampersand_expands_to_and() {
        assert_eq!(normalize_name("Ben & Jerry"), "ben and jerry");
        assert_eq!(normalize_name("Ben&Jerry"), "ben and jerry");
    }

    #[test]
    fn normalization_is_idempotent() {
        for name in [
            "Joe's Pizza",
            "Ben & Jerry's",
            "  The   Modern  ",
            "L'Artusi",
            "",
        ] {
            let once = normalize_name(name);
            assert_eq!(normalize_name(&once), once);
        }
    }

    #[test]
    fn exact_name_scores_fifteen() {
        assert_eq!(name_points("joes pizza", "joes pizza"), 15);
    }

    #[test]
    fn substring_name_scores_ten() {
        assert_eq!(name_points("joes pizza", "joes pizza brooklyn"), 10);
        assert_eq!(name_points("joes pizza brooklyn", "joes pizza"), 10);
    }

    #[test]
    fn empty_names_never_score() {
        // "" is a substring of everything; it must not count as a match.
        assert_eq!(name_points("", "joes pizza"), 0);
        assert_eq!(name_points("joes pizza", ""), 0);
        assert_eq!(name_points("", ""), 0);
    }
}
