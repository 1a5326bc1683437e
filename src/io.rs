// src/io.rs - Catalog persistence boundary (UTF-8 pretty JSON)

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::models::core::RestaurantRecord;
use crate::models::matching::DuplicateGroup;

pub fn load_catalog(path: &Path) -> Result<Vec<RestaurantRecord>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;
    let records: Vec<RestaurantRecord> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse catalog {}", path.display()))?;
    info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

pub fn save_catalog(path: &Path, records: &[RestaurantRecord]) -> Result<()> {
    write_pretty_json(path, records)?;
    info!("Saved {} records to {}", records.len(), path.display());
    Ok(())
}

pub fn save_duplicate_report(path: &Path, groups: &[DuplicateGroup]) -> Result<()> {
    write_pretty_json(path, groups)?;
    info!(
        "Saved duplicate report ({} groups) to {}",
        groups.len(),
        path.display()
    );
    Ok(())
}

fn write_pretty_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }
    let mut serialized = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;
    serialized.push('\n');
    fs::write(path, serialized).with_context(|| format!("Failed to write {}", path.display()))
}
