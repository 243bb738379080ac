//! Region label to registry entry resolution
//!
//! Exact equality after Unicode lowercasing. No trimming, no locale rules,
//! no partial matches.

use crate::domain::entities::RegionEntry;

/// Find the entry registered for `region_label`.
///
/// Scans in registry (insertion) order and returns the first
/// case-insensitive match, so the oldest entry wins among duplicates.
pub fn resolve<'a>(region_label: &str, entries: &'a [RegionEntry]) -> Option<&'a RegionEntry> {
    entries
        .iter()
        .find(|entry| labels_match(region_label, entry.name()))
}

/// Label equality as used for matching: exact after lowercasing both sides.
pub fn labels_match(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Whether the region has a registered website.
pub fn is_linked(region_label: &str, entries: &[RegionEntry]) -> bool {
    resolve(region_label, entries).is_some()
}
