//! Region presentation derived from registry membership
//!
//! Styling is a pure function of whether the region resolves to an entry.
//! Serialized field names follow the path-style options of the map renderer
//! (`weight`, `opacity`, `color`, `dashArray`, ...).

use serde::{Deserialize, Serialize};

use crate::domain::entities::RegionEntry;
use crate::domain::matcher::is_linked;

pub const LINKED_FILL: &str = "#4CAF50";
pub const UNLINKED_FILL: &str = "#9E9E9E";
pub const STROKE_COLOR: &str = "white";
pub const DASH_PATTERN: &str = "3";
pub const FILL_OPACITY: f32 = 0.7;

pub const EMPHASIS_STROKE_WEIGHT: u32 = 3;
pub const EMPHASIS_STROKE_COLOR: &str = "#666";
pub const EMPHASIS_FILL_OPACITY: f32 = 0.9;

/// Visual presentation of one region polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleDescriptor {
    #[serde(rename = "fillColor")]
    pub fill_color: String,
    #[serde(rename = "weight")]
    pub stroke_weight: u32,
    #[serde(rename = "opacity")]
    pub stroke_opacity: f32,
    #[serde(rename = "color")]
    pub stroke_color: String,
    #[serde(rename = "dashArray")]
    pub dash_pattern: String,
    #[serde(rename = "fillOpacity")]
    pub fill_opacity: f32,
}

impl StyleDescriptor {
    /// Region with a registered website.
    pub fn linked() -> Self {
        Self::base(LINKED_FILL)
    }

    /// Region without a registered website.
    pub fn unlinked() -> Self {
        Self::base(UNLINKED_FILL)
    }

    fn base(fill_color: &str) -> Self {
        Self {
            fill_color: fill_color.to_string(),
            stroke_weight: 1,
            stroke_opacity: 1.0,
            stroke_color: STROKE_COLOR.to_string(),
            dash_pattern: DASH_PATTERN.to_string(),
            fill_opacity: FILL_OPACITY,
        }
    }

    /// Hover override: heavier solid grey outline, denser fill.
    /// Fill color and stroke opacity are carried over unchanged.
    pub fn emphasized(&self) -> Self {
        Self {
            fill_color: self.fill_color.clone(),
            stroke_weight: EMPHASIS_STROKE_WEIGHT,
            stroke_opacity: self.stroke_opacity,
            stroke_color: EMPHASIS_STROKE_COLOR.to_string(),
            dash_pattern: String::new(),
            fill_opacity: EMPHASIS_FILL_OPACITY,
        }
    }

    pub fn is_linked(&self) -> bool {
        self.fill_color == LINKED_FILL
    }
}

/// Style for a region label against the current registry.
pub fn style_for(region_label: &str, entries: &[RegionEntry]) -> StyleDescriptor {
    if is_linked(region_label, entries) {
        StyleDescriptor::linked()
    } else {
        StyleDescriptor::unlinked()
    }
}
