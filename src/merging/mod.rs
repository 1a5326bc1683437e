pub mod dedupe;
pub mod field_merge;
pub mod list_merge;

/// Scalar descriptive fields treat None and whitespace-only strings the same
/// way: as absent.
pub(crate) fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}
