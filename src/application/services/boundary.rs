//! Boundary dataset service
//!
//! Reads a GeoJSON `FeatureCollection` and extracts, per feature, the region
//! label used as the join key into the registry. Geometry is passed through
//! untouched.

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::application::error_ext::DataLoadResultExt;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::BoundaryFeature;
use crate::infrastructure::traits::FileSystem;

/// Parsed boundary dataset.
#[derive(Debug, Clone, Default)]
pub struct BoundaryDataset {
    pub features: Vec<BoundaryFeature>,
    /// Features dropped because they carry no usable label
    pub skipped: usize,
}

#[derive(Debug, Deserialize)]
struct RawCollection {
    #[serde(rename = "type")]
    kind: String,
    features: Vec<RawFeature>,
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    #[serde(default)]
    properties: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    geometry: serde_json::Value,
}

/// Service loading boundary datasets from the filesystem.
pub struct BoundaryService {
    fs: Arc<dyn FileSystem>,
    label_property: String,
}

impl BoundaryService {
    pub fn new(fs: Arc<dyn FileSystem>, label_property: impl Into<String>) -> Self {
        Self {
            fs,
            label_property: label_property.into(),
        }
    }

    /// Read and parse a dataset file.
    pub fn load(&self, path: &Path) -> ApplicationResult<BoundaryDataset> {
        debug!("load: path={}", path.display());
        if !self.fs.is_file(path) {
            return Err(ApplicationError::DataLoad {
                source_name: path.display().to_string(),
                reason: "no such file".into(),
            });
        }
        let content = self.fs.read_to_string(path).or_data_load("read", path)?;
        self.parse(&content).map_err(|e| match e {
            ApplicationError::DataLoad { reason, .. } => ApplicationError::DataLoad {
                source_name: path.display().to_string(),
                reason,
            },
            other => other,
        })
    }

    /// Parse dataset content.
    pub fn parse(&self, content: &str) -> ApplicationResult<BoundaryDataset> {
        let raw: RawCollection = serde_json::from_str(content)
            .or_data_load("parse GeoJSON", Path::new("<inline>"))?;
        if raw.kind != "FeatureCollection" {
            return Err(ApplicationError::DataLoad {
                source_name: "<inline>".into(),
                reason: format!("expected a FeatureCollection, found '{}'", raw.kind),
            });
        }

        let mut dataset = BoundaryDataset::default();
        for (index, feature) in raw.features.into_iter().enumerate() {
            let properties = feature.properties.unwrap_or_default();
            let label = properties
                .get(&self.label_property)
                .and_then(|v| v.as_str())
                .map(str::to_string);

            match label {
                Some(region_label) => dataset.features.push(BoundaryFeature {
                    region_label,
                    properties,
                    geometry: feature.geometry,
                }),
                None => {
                    warn!(
                        "parse: feature #{index} has no string '{}' property, skipped",
                        self.label_property
                    );
                    dataset.skipped += 1;
                }
            }
        }

        debug!(
            "parse: {} features, {} skipped",
            dataset.features.len(),
            dataset.skipped
        );
        Ok(dataset)
    }
}
