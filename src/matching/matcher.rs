// src/matching/matcher.rs - Pairwise scoring and best-candidate selection

use log::debug;

use crate::matching::address::{address_points, normalize_address};
use crate::matching::name::{name_points, normalize_name};
use crate::models::core::RestaurantRecord;
use crate::models::matching::MatchScore;

/// Minimum total score for two records to denote the same entity. A name
/// agreement alone reaches it; an address agreement alone never does.
pub const MATCH_SCORE_THRESHOLD: u32 = 10;

/// Cached comparison keys for one record. Built once per record per pass so
/// pool scans do not re-normalize on every comparison.
#[derive(Debug, Clone)]
pub struct MatchCandidate {
    pub normalized_name: String,
    pub normalized_address: String,
}

impl MatchCandidate {
    pub fn from_record(record: &RestaurantRecord) -> Self {
        Self {
            normalized_name: record.name.as_deref().map(normalize_name).unwrap_or_default(),
            normalized_address: record
                .best_address()
                .map(normalize_address)
                .unwrap_or_default(),
        }
    }

    pub fn has_name(&self) -> bool {
        !self.normalized_name.is_empty()
    }
}

/// Score two candidates. Name and address contribute independently.
pub fn score(a: &MatchCandidate, b: &MatchCandidate) -> MatchScore {
    MatchScore {
        name_points: name_points(&a.normalized_name, &b.normalized_name),
        address_points: address_points(&a.normalized_address, &b.normalized_address),
    }
}

/// A name agreement is mandatory; the total must clear the threshold.
pub fn is_match(score: MatchScore) -> bool {
    score.name_points > 0 && score.total() >= MATCH_SCORE_THRESHOLD
}

/// Winning candidate of a pool search.
#[derive(Debug, Clone, Copy)]
pub struct BestMatch {
    pub index: usize,
    pub score: MatchScore,
    /// Later candidates that tied the winner's score. The winner keeps its
    /// first-seen position; ties are surfaced for audit only.
    pub tied_candidates: usize,
}

/// Scan a candidate pool for the highest-scoring match. Candidates for which
/// `eligible` returns false are skipped, as are candidates with no name
/// agreement at all. Ties break toward the earliest pool position.
pub fn find_best_match(
    probe: &MatchCandidate,
    pool: &[MatchCandidate],
    mut eligible: impl FnMut(usize) -> bool,
) -> Option<BestMatch> {
    if !probe.has_name() {
        return None;
    }
    let mut best: Option<BestMatch> = None;
    for (index, candidate) in pool.iter().enumerate() {
        if !eligible(index) {
            continue;
        }
        let pair_score = score(probe, candidate);
        if pair_score.name_points == 0 {
            continue;
        }
        if let Some(current) = best.as_mut() {
            if pair_score.total() > current.score.total() {
                *current = BestMatch {
                    index,
                    score: pair_score,
                    tied_candidates: 0,
                };
            } else if pair_score.total() == current.score.total() {
                current.tied_candidates += 1;
            }
        } else {
            best = Some(BestMatch {
                index,
                score: pair_score,
                tied_candidates: 0,
            });
        }
    }
    let best = best.filter(|b| is_match(b.score))?;
    if best.tied_candidates > 0 {
        debug!(
            "Matcher: {} candidates tied at score {} for '{}'; keeping first-seen position {}",
            best.tied_candidates + 1,
            best.score.total(),
            probe.normalized_name,
            best.index
        );
    }
    Some(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, address: &str) -> MatchCandidate {
        MatchCandidate {
            normalized_name: normalize_name(name),
            normalized_address: normalize_address(address),
        }
    }

    #[test]
    fn exact_name_with_missing_address_matches() {
        // A primary entry with no address on file still matches its
        // secondary counterpart on name alone.
        let a = candidate("Semma", "");
        let b = candidate("semma", "60 Greenwich Ave");
        let s = score(&a, &b);
        assert_eq!(s.name_points, 15);
        assert_eq!(s.address_points, 10);
        assert!(is_match(s));
    }

    #[test]
    fn case_and_punctuation_variants_score_exact() {
        // Normalized equality earns the exact-name bonus.
        let a = candidate("Joe's Pizza", "");
        let b = candidate("joes pizza", "");
        assert_eq!(score(&a, &b).name_points, 15);
    }

    #[test]
    fn address_alone_never_matches() {
        let a = candidate("Semma", "60 Greenwich Ave");
        let b = candidate("Via Carota", "60 Greenwich Ave");
        let s = score(&a, &b);
        assert_eq!(s.name_points, 0);
        assert!(!is_match(s));
    }

    #[test]
    fn nameless_probe_finds_nothing() {
        let pool = vec![candidate("Semma", "")];
        assert!(find_best_match(&candidate("", ""), &pool, |_| true).is_none());
    }

    #[test]
    fn highest_score_wins_the_pool() {
        let pool = vec![
            candidate("Semma Downtown", "10 Main St"),
            candidate("Semma", "60 Greenwich Ave"),
        ];
        let probe = candidate("Semma", "60 Greenwich Avenue");
        let best = find_best_match(&probe, &pool, |_| true).unwrap();
        assert_eq!(best.index, 1);
        assert_eq!(best.score.total(), 30);
    }

    #[test]
    fn ties_break_toward_earliest_position() {
        // Two chain locations, neither with an address on file.
        let pool = vec![candidate("Joe's Pizza", ""), candidate("Joe's Pizza", "")];
        let probe = candidate("Joe's Pizza", "");
        let best = find_best_match(&probe, &pool, |_| true).unwrap();
        assert_eq!(best.index, 0);
        assert_eq!(best.tied_candidates, 1);
    }

    #[test]
    fn ineligible_candidates_are_skipped() {
        let pool = vec![candidate("Semma", ""), candidate("Semma", "")];
        let probe = candidate("Semma", "");
        let best = find_best_match(&probe, &pool, |i| i != 0).unwrap();
        assert_eq!(best.index, 1);
    }
}
