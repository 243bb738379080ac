//! Domain entities: core data structures

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::validation::{check_entry, ValidationError};

/// Opaque identifier of a registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(String);

impl RegionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A user-contributed association between a region name and its website.
///
/// Immutable once created. The only ways to obtain one are
/// [`RegionEntry::new`], the intake validator, or deserializing a stored
/// registry; all three enforce the same invariants:
/// - `name` is non-empty
/// - `website` starts with `http://` or `https://`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRegionEntry")]
pub struct RegionEntry {
    id: RegionId,
    name: String,
    website: String,
}

impl RegionEntry {
    pub fn new(
        id: RegionId,
        name: impl Into<String>,
        website: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let website = website.into();
        check_entry(&name, &website)?;
        Ok(Self { id, name, website })
    }

    pub fn id(&self) -> &RegionId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn website(&self) -> &str {
        &self.website
    }
}

/// Stored shape of an entry, checked before it becomes a [`RegionEntry`].
#[derive(Debug, Deserialize)]
struct RawRegionEntry {
    id: String,
    name: String,
    website: String,
}

impl TryFrom<RawRegionEntry> for RegionEntry {
    type Error = ValidationError;

    fn try_from(raw: RawRegionEntry) -> Result<Self, Self::Error> {
        RegionEntry::new(RegionId(raw.id), raw.name, raw.website)
    }
}

/// One named polygon of the boundary dataset.
///
/// Read-only: `region_label` is the join key into the registry, the
/// geometry and remaining properties are passed through to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundaryFeature {
    pub region_label: String,
    pub properties: serde_json::Map<String, serde_json::Value>,
    pub geometry: serde_json::Value,
}

impl BoundaryFeature {
    /// Feature with only a label, no geometry.
    pub fn labelled(region_label: impl Into<String>) -> Self {
        Self {
            region_label: region_label.into(),
            properties: serde_json::Map::new(),
            geometry: serde_json::Value::Null,
        }
    }
}
