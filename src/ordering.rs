// src/ordering.rs - Combined ordering over the final record set

use crate::models::core::RestaurantRecord;
use crate::utils::constants::{SECONDARY_SOURCE_OFFSET, UNRANKED_ORDER};

/// The single deterministic ordering key: primary rank as-is, secondary rank
/// offset past every possible primary rank, sentinel otherwise. Total — it
/// never fails on a rankless record.
pub fn combined_order(record: &RestaurantRecord) -> i64 {
    if let Some(rank) = record.nyt_rank {
        rank
    } else if let Some(rank) = record.nym_rank {
        SECONDARY_SOURCE_OFFSET + rank
    } else {
        UNRANKED_ORDER
    }
}

/// Recompute every record's `combined_order` and return the catalog stably
/// sorted ascending by it. The stored value is always overwritten; it is
/// derived state, never input.
pub fn order_catalog(records: &[RestaurantRecord]) -> Vec<RestaurantRecord> {
    let mut ordered: Vec<RestaurantRecord> = records
        .iter()
        .map(|record| {
            let mut record = record.clone();
            record.combined_order = Some(combined_order(&record));
            record
        })
        .collect();
    ordered.sort_by_key(|record| record.combined_order.unwrap_or(UNRANKED_ORDER));
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_rank_is_used_directly() {
        let record = RestaurantRecord {
            nyt_rank: Some(7),
            nym_rank: Some(2),
            ..Default::default()
        };
        assert_eq!(combined_order(&record), 7);
    }

    #[test]
    fn secondary_only_rank_is_offset() {
        let record = RestaurantRecord {
            nym_rank: Some(3),
            ..Default::default()
        };
        assert_eq!(combined_order(&record), 103);
    }

    #[test]
    fn rankless_records_get_the_sentinel() {
        assert_eq!(combined_order(&RestaurantRecord::default()), 999);
    }

    #[test]
    fn primary_records_sort_before_secondary_only_records() {
        let records = vec![
            RestaurantRecord {
                nym_rank: Some(1),
                ..Default::default()
            },
            RestaurantRecord {
                nyt_rank: Some(93),
                ..Default::default()
            },
        ];
        let ordered = order_catalog(&records);
        assert_eq!(ordered[0].combined_order, Some(93));
        assert_eq!(ordered[1].combined_order, Some(101));
    }

    #[test]
    fn ordering_is_monotonic_in_primary_rank() {
        let records: Vec<RestaurantRecord> = (1..=5)
            .rev()
            .map(|rank| RestaurantRecord {
                nyt_rank: Some(rank),
                ..Default::default()
            })
            .collect();
        let ordered = order_catalog(&records);
        let orders: Vec<_> = ordered.iter().map(|r| r.combined_order.unwrap()).collect();
        assert_eq!(orders, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn stale_stored_order_is_overwritten() {
        let record = RestaurantRecord {
            nyt_rank: Some(2),
            combined_order: Some(500),
            ..Default::default()
        };
        let ordered = order_catalog(&[record]);
        assert_eq!(ordered[0].combined_order, Some(2));
    }
}
