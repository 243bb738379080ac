//! Intake validation for user-submitted (region, website) pairs
//!
//! Validation is intentionally minimal: both fields present, website starts
//! with a literal `http://` or `https://` prefix. Host and path are not
//! inspected.

use thiserror::Error;

use crate::domain::entities::{RegionEntry, RegionId};

const HTTP_PREFIX: &str = "http://";
const HTTPS_PREFIX: &str = "https://";

/// Rejection of a submitted pair. Rules are checked in declaration order.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("region name and website are both required")]
    MissingField,

    #[error("website must start with http:// or https://")]
    InvalidUrlScheme,
}

impl ValidationError {
    /// Notification text shown to the person filling in the form.
    pub fn notice(&self) -> &'static str {
        match self {
            ValidationError::MissingField => "Mohon isi nama kota/kabupaten dan link website",
            ValidationError::InvalidUrlScheme => {
                "Link website harus dimulai dengan http:// atau https://"
            }
        }
    }
}

/// Check the [`RegionEntry`] invariants without building one.
pub fn check_entry(region_name: &str, website: &str) -> Result<(), ValidationError> {
    if region_name.is_empty() || website.is_empty() {
        return Err(ValidationError::MissingField);
    }
    if !website.starts_with(HTTP_PREFIX) && !website.starts_with(HTTPS_PREFIX) {
        return Err(ValidationError::InvalidUrlScheme);
    }
    Ok(())
}

/// Validate a submitted pair and mint a new entry with a fresh id.
///
/// Inputs are expected to be trimmed by the form already; `name` and
/// `website` are stored exactly as given.
pub fn validate(
    region_name: &str,
    website: &str,
    ids: &mut IdGenerator,
) -> Result<RegionEntry, ValidationError> {
    check_entry(region_name, website)?;
    RegionEntry::new(ids.next_id(), region_name, website)
}

/// Session-unique, time-derived ids.
///
/// Ids are the Unix time in milliseconds; when the clock has not advanced
/// past the last issued (or observed) id, the previous value plus one is
/// used instead, so ids are strictly increasing within a session.
///
/// Once `i64::MAX` has been issued or observed there is no larger number
/// left; further ids become `<i64::MAX>-<n>` with a growing `n`.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: i64,
    spill: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> RegionId {
        self.next_id_at(chrono::Utc::now().timestamp_millis())
    }

    pub fn next_id_at(&mut self, now_millis: i64) -> RegionId {
        if now_millis > self.last {
            self.last = now_millis;
            return RegionId::new(now_millis.to_string());
        }
        match self.last.checked_add(1) {
            Some(value) => {
                self.last = value;
                RegionId::new(value.to_string())
            }
            None => {
                self.spill = self.spill.saturating_add(1);
                RegionId::new(format!("{}-{}", self.last, self.spill))
            }
        }
    }

    /// Account for an id issued elsewhere (e.g. loaded from storage).
    /// Ids of any other shape are ignored.
    pub fn observe(&mut self, id: &RegionId) {
        let raw = id.as_str();
        if let Ok(value) = raw.parse::<i64>() {
            self.last = self.last.max(value);
        } else if let Some((base, n)) = raw.split_once('-') {
            if let (Ok(i64::MAX), Ok(n)) = (base.parse::<i64>(), n.parse::<u64>()) {
                self.last = i64::MAX;
                self.spill = self.spill.max(n);
            }
        }
    }
}
