//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use tracing::debug;

use crate::application::services::{BoundaryService, MapOverlay, RegistryService};
use crate::config::Settings;
use crate::infrastructure::store::FileKeyValueStore;
use crate::infrastructure::traits::{FileSystem, KeyValueStore, RealFileSystem};
use crate::infrastructure::{InfraError, InfraResult};

/// Container holding the shared dependencies of all services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Registry storage
    pub store: Arc<dyn KeyValueStore>,
}

impl ServiceContainer {
    /// Create a container with real implementations; the data directory
    /// is created if missing.
    pub fn new(settings: Settings) -> InfraResult<Self> {
        let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
        fs.create_dir_all(&settings.data_dir)
            .map_err(|source| InfraError::DataDir {
                path: settings.data_dir.clone(),
                source,
            })?;
        debug!("data directory: {}", settings.data_dir.display());

        let store = Arc::new(FileKeyValueStore::new(fs.clone(), settings.data_dir.clone()));
        Ok(Self::with_deps(settings, fs, store))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            fs,
            store,
        }
    }

    /// Registry rehydrated from the configured slot.
    pub fn registry_service(&self) -> RegistryService {
        RegistryService::open(self.store.clone(), self.settings.storage_key.clone())
    }

    pub fn boundary_service(&self) -> BoundaryService {
        BoundaryService::new(self.fs.clone(), self.settings.label_property.clone())
    }

    /// Fresh overlay session in `Loading` state.
    pub fn map_overlay(&self) -> MapOverlay {
        MapOverlay::new(self.registry_service(), self.settings.tooltip.clone())
    }
}
