// src/merging/list_merge.rs - Merge a secondary ranked list into the primary list

use std::collections::HashSet;

use log::{debug, info, warn};

use crate::matching::matcher::{find_best_match, MatchCandidate};
use crate::merging::is_blank;
use crate::models::core::{RestaurantRecord, SourceTag};
use crate::models::matching::MergeStats;

/// Merge the secondary source's ranked list into the primary source's.
///
/// Primary records become base records carrying the primary tag and rank.
/// Each secondary record is matched against the not-yet-matched base records
/// (a base record absorbs at most one secondary entry); matches gain the
/// secondary tag, rank, and address/website backfill, non-matches become
/// standalone secondary-only records. This is the only stage that creates
/// new identities. Output order is unspecified; ordering is a separate pass.
pub fn merge_source_lists(
    primary: &[RestaurantRecord],
    secondary: &[RestaurantRecord],
) -> (Vec<RestaurantRecord>, MergeStats) {
    let mut stats = MergeStats {
        primary_count: primary.len(),
        secondary_count: secondary.len(),
        ..Default::default()
    };

    let mut base: Vec<RestaurantRecord> = primary
        .iter()
        .map(|record| {
            let mut record = record.clone();
            record.sources.insert(SourceTag::Nyt);
            record.nyt_rank = record.rank;
            record
        })
        .collect();

    let candidates: Vec<MatchCandidate> = base.iter().map(MatchCandidate::from_record).collect();
    let mut matched_base: HashSet<usize> = HashSet::new();
    let mut standalone: Vec<RestaurantRecord> = Vec::new();

    for incoming in secondary {
        let probe = MatchCandidate::from_record(incoming);
        if !probe.has_name() {
            warn!(
                "Merge: secondary record without a usable name; kept as standalone ({:?})",
                incoming.best_address()
            );
            stats.missing_name += 1;
            standalone.push(new_standalone(incoming));
            continue;
        }

        match find_best_match(&probe, &candidates, |i| !matched_base.contains(&i)) {
            Some(best) => {
                matched_base.insert(best.index);
                stats.matched += 1;
                if best.tied_candidates > 0 {
                    stats.ambiguous_matches += 1;
                }
                let target = &mut base[best.index];
                target.sources.insert(SourceTag::Nym);
                target.nym_rank = incoming.nym_rank;
                if is_blank(target.formatted_address.as_deref()) && !is_blank(incoming.address.as_deref()) {
                    target.formatted_address = incoming.address.clone();
                }
                if is_blank(target.website.as_deref()) && !is_blank(incoming.website.as_deref()) {
                    target.website = incoming.website.clone();
                }
                debug!(
                    "Merge: '{}' matched '{}' (score {})",
                    incoming.display_name(),
                    target.display_name(),
                    best.score.total()
                );
            }
            None => {
                stats.standalone += 1;
                standalone.push(new_standalone(incoming));
            }
        }
    }

    stats.standalone += stats.missing_name;
    base.extend(standalone);

    info!(
        "Merge: {} primary + {} secondary -> {} records ({} matched, {} standalone, {} without names, {} ambiguous)",
        stats.primary_count,
        stats.secondary_count,
        base.len(),
        stats.matched,
        stats.standalone,
        stats.missing_name,
        stats.ambiguous_matches
    );

    (base, stats)
}

/// A secondary record that matched nothing enters the catalog as its own
/// identity, tagged solely with the secondary source.
fn new_standalone(incoming: &RestaurantRecord) -> RestaurantRecord {
    let mut record = incoming.clone();
    record.sources.clear();
    record.sources.insert(SourceTag::Nym);
    if is_blank(record.formatted_address.as_deref()) && !is_blank(record.address.as_deref()) {
        record.formatted_address = record.address.clone();
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> RestaurantRecord {
        RestaurantRecord {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn matched_secondary_merges_into_base() {
        let primary = vec![RestaurantRecord {
            rank: Some(1),
            ..named("Semma")
        }];
        let secondary = vec![RestaurantRecord {
            address: Some("60 Greenwich Ave".to_string()),
            nym_rank: Some(4),
            ..named("semma")
        }];

        let (merged, stats) = merge_source_lists(&primary, &secondary);
        assert_eq!(merged.len(), 1);
        assert_eq!(stats.matched, 1);
        assert_eq!(stats.standalone, 0);

        let record = &merged[0];
        assert!(record.sources.contains(&SourceTag::Nyt));
        assert!(record.sources.contains(&SourceTag::Nym));
        assert_eq!(record.nyt_rank, Some(1));
        assert_eq!(record.nym_rank, Some(4));
        assert_eq!(record.formatted_address.as_deref(), Some("60 Greenwich Ave"));
    }

    #[test]
    fn unmatched_secondary_becomes_standalone() {
        let primary = vec![RestaurantRecord {
            rank: Some(1),
            ..named("Semma")
        }];
        let secondary = vec![RestaurantRecord {
            nym_rank: Some(2),
            address: Some("186 Mott St".to_string()),
            ..named("Thai Diner")
        }];

        let (merged, stats) = merge_source_lists(&primary, &secondary);
        assert_eq!(merged.len(), 2);
        assert_eq!(stats.matched, 0);
        assert_eq!(stats.standalone, 1);

        let standalone = merged
            .iter()
            .find(|r| r.name.as_deref() == Some("Thai Diner"))
            .unwrap();
        assert_eq!(standalone.sources.len(), 1);
        assert!(standalone.sources.contains(&SourceTag::Nym));
        assert_eq!(standalone.nym_rank, Some(2));
        assert_eq!(standalone.formatted_address.as_deref(), Some("186 Mott St"));
    }

    #[test]
    fn base_record_absorbs_at_most_one_secondary() {
        let primary = vec![named("Joe's Pizza")];
        let secondary = vec![named("Joes Pizza"), named("Joe's Pizza")];

        let (merged, stats) = merge_source_lists(&primary, &secondary);
        // Second occurrence cannot re-match the consumed base record.
        assert_eq!(merged.len(), 2);
        assert_eq!(stats.matched, 1);
        assert_eq!(stats.standalone, 1);
    }

    #[test]
    fn existing_base_fields_are_not_overwritten() {
        let primary = vec![RestaurantRecord {
            formatted_address: Some("60 Greenwich Ave, New York".to_string()),
            website: Some("https://semma.nyc".to_string()),
            ..named("Semma")
        }];
        let secondary = vec![RestaurantRecord {
            address: Some("60 Greenwich Ave".to_string()),
            website: Some("https://other.example".to_string()),
            ..named("Semma")
        }];

        let (merged, _) = merge_source_lists(&primary, &secondary);
        assert_eq!(
            merged[0].formatted_address.as_deref(),
            Some("60 Greenwich Ave, New York")
        );
        assert_eq!(merged[0].website.as_deref(), Some("https://semma.nyc"));
    }

    #[test]
    fn nameless_secondary_is_retained_not_dropped() {
        let primary = vec![named("Semma")];
        let secondary = vec![RestaurantRecord {
            address: Some("1 Nowhere Pl".to_string()),
            ..Default::default()
        }];

        let (merged, stats) = merge_source_lists(&primary, &secondary);
        assert_eq!(merged.len(), 2);
        assert_eq!(stats.missing_name, 1);
        assert_eq!(stats.standalone, 1);
    }
}
