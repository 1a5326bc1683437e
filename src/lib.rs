// src/lib.rs

pub mod cleaning;
pub mod enrichment;
pub mod io;
pub mod matching;
pub mod merging;
pub mod models;
pub mod ordering;
pub mod utils;

pub use models::core::{RestaurantRecord, SourceTag};
pub use models::matching::{DedupeOutcome, DuplicateGroup, MatchScore, MergeStats};
