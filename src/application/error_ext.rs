//! Error conversion helpers for boundary data I/O
//!
//! Provides extension traits for turning low-level failures into
//! `ApplicationError::DataLoad` with the data source attached.

use std::fmt::Display;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting fallible results into data-load errors.
pub trait DataLoadResultExt<T> {
    /// Attach the data source to a failure.
    ///
    /// # Example
    /// ```ignore
    /// fs.read_to_string(&path)
    ///     .or_data_load("read", &path)?;
    /// ```
    fn or_data_load(self, action: &str, source: &Path) -> ApplicationResult<T>;
}

impl<T, E: Display> DataLoadResultExt<T> for Result<T, E> {
    fn or_data_load(self, action: &str, source: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::DataLoad {
            source_name: source.display().to_string(),
            reason: format!("{action}: {e}"),
        })
    }
}
