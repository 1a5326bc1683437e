use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use reconcile_lib::cleaning::clean_record;
use reconcile_lib::enrichment::backfill::backfill_place_ids;
use reconcile_lib::enrichment::fixture::FixtureLookup;
use reconcile_lib::enrichment::{
    current_stamp, enrich_record, refresh_record, EnrichmentOutcome, PlaceLookup,
};
use reconcile_lib::io::{load_catalog, save_catalog, save_duplicate_report};
use reconcile_lib::merging::dedupe::deduplicate;
use reconcile_lib::merging::list_merge::merge_source_lists;
use reconcile_lib::models::core::{RestaurantRecord, SourceTag};
use reconcile_lib::ordering::order_catalog;
use reconcile_lib::utils::env::load_env;

#[derive(Parser)]
#[command(
    name = "reconcile",
    about = "Reconcile editorial restaurant lists into one deduplicated catalog"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Merge the secondary source list into the primary source list
    Merge {
        #[arg(long)]
        primary: PathBuf,
        #[arg(long)]
        secondary: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
    /// Enrich records with place details from a lookup fixture
    Enrich {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        fixture: PathBuf,
        #[arg(long)]
        output: PathBuf,
        /// Refresh records that already carry a place identifier instead of
        /// looking up records without one
        #[arg(long)]
        refresh: bool,
    },
    /// Copy place identifiers from an already-enriched reference catalog
    BackfillIds {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        reference: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
    /// Clean presentation fields (price range, cuisine, description)
    Clean {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
    /// Collapse records that resolve to the same identity
    Dedupe {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        /// Where to write the duplicate-group audit report
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Run the full pipeline: merge, enrich, backfill, clean, dedupe, order
    Run {
        #[arg(long)]
        primary: PathBuf,
        #[arg(long)]
        secondary: PathBuf,
        #[arg(long)]
        fixture: Option<PathBuf>,
        #[arg(long)]
        reference: Option<PathBuf>,
        #[arg(long)]
        output: PathBuf,
        #[arg(long)]
        report: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    load_env();
    let cli = Cli::parse();

    match cli.command {
        Command::Merge {
            primary,
            secondary,
            output,
        } => {
            let primary = load_catalog(&primary)?;
            let secondary = load_catalog(&secondary)?;
            let (merged, _) = merge_source_lists(&primary, &secondary);
            save_catalog(&output, &order_catalog(&merged))?;
        }
        Command::Enrich {
            input,
            fixture,
            output,
            refresh,
        } => {
            let records = load_catalog(&input)?;
            let lookup = FixtureLookup::from_file(&fixture)?;
            let (enriched, count) = enrich_catalog(&records, &lookup, refresh);
            info!("Enrich: {}/{} records enriched", count, enriched.len());
            save_catalog(&output, &enriched)?;
        }
        Command::BackfillIds {
            input,
            reference,
            output,
        } => {
            let records = load_catalog(&input)?;
            let reference = load_catalog(&reference)?;
            let (updated, _) = backfill_place_ids(&records, &reference);
            save_catalog(&output, &updated)?;
        }
        Command::Clean { input, output } => {
            let records = load_catalog(&input)?;
            let cleaned: Vec<RestaurantRecord> = records.iter().map(clean_record).collect();
            info!("Clean: processed {} records", cleaned.len());
            save_catalog(&output, &cleaned)?;
        }
        Command::Dedupe {
            input,
            output,
            report,
        } => {
            let records = load_catalog(&input)?;
            let outcome = deduplicate(&records);
            log_duplicate_groups(&outcome.duplicate_groups);
            save_catalog(&output, &order_catalog(&outcome.merged))?;
            if let Some(report) = report {
                save_duplicate_report(&report, &outcome.duplicate_groups)?;
            }
        }
        Command::Run {
            primary,
            secondary,
            fixture,
            reference,
            output,
            report,
        } => {
            run_pipeline(
                &primary,
                &secondary,
                fixture.as_deref(),
                reference.as_deref(),
                &output,
                report.as_deref(),
            )?;
        }
    }

    Ok(())
}

/// Sequential enrichment loop over the catalog. Lookup misses and failures
/// leave each record as it was; nothing here can abort the run.
fn enrich_catalog(
    records: &[RestaurantRecord],
    lookup: &dyn PlaceLookup,
    refresh: bool,
) -> (Vec<RestaurantRecord>, usize) {
    let stamp = current_stamp();
    let pb = ProgressBar::new(records.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("█▉▊▋▌▍▎▏  "),
    );

    let mut enriched_count = 0;
    let mut out = Vec::with_capacity(records.len());
    for record in records {
        pb.set_message(record.display_name().to_string());
        let outcome = if refresh {
            refresh_record(record, lookup, &stamp)
        } else if record.place_id.is_some() {
            // Already anchored to a place; nothing to look up.
            EnrichmentOutcome::Unavailable(record.clone())
        } else {
            enrich_record(record, lookup, &stamp)
        };
        if outcome.is_enriched() {
            enriched_count += 1;
        }
        out.push(outcome.into_record());
        pb.inc(1);
    }
    pb.finish_and_clear();
    (out, enriched_count)
}

fn log_duplicate_groups(groups: &[reconcile_lib::DuplicateGroup]) {
    for group in groups {
        info!(
            "Dedupe: {} ({} entries): {}",
            group.identity_key,
            group.count,
            group.names.join(", ")
        );
    }
}

fn run_pipeline(
    primary_path: &Path,
    secondary_path: &Path,
    fixture_path: Option<&Path>,
    reference_path: Option<&Path>,
    output_path: &Path,
    report_path: Option<&Path>,
) -> Result<()> {
    info!("Starting restaurant catalog reconciliation pipeline");
    let pipeline_start = Instant::now();

    // Phase 1: list merge
    let phase1_start = Instant::now();
    let primary = load_catalog(primary_path)?;
    let secondary = load_catalog(secondary_path)?;
    let (mut records, merge_stats) = merge_source_lists(&primary, &secondary);
    let phase1_duration = phase1_start.elapsed();

    // Phase 2: place-detail enrichment (optional)
    let phase2_start = Instant::now();
    let mut enriched_count = 0;
    if let Some(fixture_path) = fixture_path {
        let lookup = FixtureLookup::from_file(fixture_path)?;
        let (enriched, count) = enrich_catalog(&records, &lookup, false);
        records = enriched;
        enriched_count = count;
    }
    let phase2_duration = phase2_start.elapsed();

    // Phase 3: place-identifier backfill (optional)
    let phase3_start = Instant::now();
    if let Some(reference_path) = reference_path {
        let reference = load_catalog(reference_path)?;
        let (updated, _) = backfill_place_ids(&records, &reference);
        records = updated;
    }
    let phase3_duration = phase3_start.elapsed();

    // Phase 4: presentation cleanup
    let phase4_start = Instant::now();
    records = records.iter().map(clean_record).collect();
    let phase4_duration = phase4_start.elapsed();

    // Phase 5: dedupe and final ordering
    let phase5_start = Instant::now();
    let outcome = deduplicate(&records);
    log_duplicate_groups(&outcome.duplicate_groups);
    let catalog = order_catalog(&outcome.merged);
    let phase5_duration = phase5_start.elapsed();

    save_catalog(output_path, &catalog)?;
    if let Some(report_path) = report_path {
        save_duplicate_report(report_path, &outcome.duplicate_groups)?;
    }

    let nyt_only = catalog
        .iter()
        .filter(|r| r.sources.contains(&SourceTag::Nyt) && !r.sources.contains(&SourceTag::Nym))
        .count();
    let nym_only = catalog
        .iter()
        .filter(|r| r.sources.contains(&SourceTag::Nym) && !r.sources.contains(&SourceTag::Nyt))
        .count();
    let both = catalog.iter().filter(|r| r.sources.len() == 2).count();

    info!("=== Pipeline Summary ===");
    info!(
        "Records: {} primary + {} secondary -> {} final",
        merge_stats.primary_count,
        merge_stats.secondary_count,
        catalog.len()
    );
    info!(
        "Provenance: {} primary-only, {} secondary-only, {} both",
        nyt_only, nym_only, both
    );
    info!("Matched during merge: {}", merge_stats.matched);
    info!("Enriched with place details: {}", enriched_count);
    info!("Duplicate groups collapsed: {}", outcome.duplicate_groups.len());
    info!("=== Timing Breakdown ===");
    info!("Phase 1 (List merge): {:.2?}", phase1_duration);
    info!("Phase 2 (Enrichment): {:.2?}", phase2_duration);
    info!("Phase 3 (Backfill): {:.2?}", phase3_duration);
    info!("Phase 4 (Cleanup): {:.2?}", phase4_duration);
    info!("Phase 5 (Dedupe & order): {:.2?}", phase5_duration);
    info!("Total execution time: {:.2?}", pipeline_start.elapsed());
    info!("Pipeline completed successfully!");

    Ok(())
}
