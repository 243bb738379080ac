//! Registry service
//!
//! Owns the ordered, append-only sequence of region entries and keeps the
//! store slot in sync with it. Loading never fails: a missing, unreadable or
//! corrupt slot yields an empty registry so the map can still render.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{validate, IdGenerator, RegionEntry, ValidationError};
use crate::infrastructure::traits::KeyValueStore;

/// Service holding the in-memory registry and its persistence side effects.
pub struct RegistryService {
    store: Arc<dyn KeyValueStore>,
    key: String,
    entries: Vec<RegionEntry>,
    ids: IdGenerator,
    persist_error: Option<String>,
}

impl RegistryService {
    /// Create an empty registry bound to a store slot. Nothing is read yet.
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            entries: Vec::new(),
            ids: IdGenerator::new(),
            persist_error: None,
        }
    }

    /// Create a registry and rehydrate it from the store.
    pub fn open(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let mut service = Self::new(store, key);
        service.load();
        service
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn entries(&self) -> &[RegionEntry] {
        &self.entries
    }

    /// Last persist failure since the previous successful write.
    pub fn persist_error(&self) -> Option<&str> {
        self.persist_error.as_deref()
    }

    /// Replace the in-memory registry with the persisted one.
    ///
    /// Fails soft: any read or decode problem results in an empty registry.
    pub fn load(&mut self) -> &[RegionEntry] {
        self.entries = match self.read() {
            Ok(entries) => entries,
            Err(e) => {
                debug!("load: substituting empty registry: {e}");
                Vec::new()
            }
        };
        for entry in &self.entries {
            self.ids.observe(entry.id());
        }
        debug!("load: {} entries from '{}'", self.entries.len(), self.key);
        &self.entries
    }

    /// Read the persisted registry without touching in-memory state.
    pub fn read(&self) -> ApplicationResult<Vec<RegionEntry>> {
        let content = self
            .store
            .get(&self.key)
            .map_err(|source| ApplicationError::Persistence {
                key: self.key.clone(),
                source,
            })?;

        match content {
            None => Ok(Vec::new()),
            Some(content) => decode(&self.key, &content),
        }
    }

    /// Append an entry and write the full registry back to the store.
    ///
    /// A failed write is logged and remembered (see [`Self::persist_error`]);
    /// the in-memory registry stays authoritative for the session.
    pub fn append(&mut self, entry: RegionEntry) -> &[RegionEntry] {
        debug!("append: '{}' -> {}", entry.name(), entry.website());
        self.ids.observe(entry.id());
        self.entries.push(entry);

        match self.persist() {
            Ok(()) => self.persist_error = None,
            Err(e) => {
                warn!("append: registry kept in memory only: {e}");
                self.persist_error = Some(error_chain(&e));
            }
        }
        &self.entries
    }

    /// Validate a submitted pair and append it on success, returning the
    /// new entry.
    pub fn register(
        &mut self,
        region_name: &str,
        website: &str,
    ) -> Result<RegionEntry, ValidationError> {
        let entry = validate(region_name, website, &mut self.ids)?;
        self.append(entry.clone());
        Ok(entry)
    }

    /// Serialize the whole registry into the store slot.
    fn persist(&self) -> ApplicationResult<()> {
        let content = encode(&self.key, &self.entries)?;
        self.store
            .set(&self.key, &content)
            .map_err(|source| ApplicationError::Persistence {
                key: self.key.clone(),
                source,
            })
    }
}

/// Stored form: JSON array of `{id, name, website}` in insertion order.
pub fn encode(key: &str, entries: &[RegionEntry]) -> ApplicationResult<String> {
    serde_json::to_string(entries).map_err(|e| ApplicationError::OperationFailed {
        context: format!("serialize registry '{key}'"),
        source: Box::new(e),
    })
}

/// Parse a stored registry; entries violating invariants corrupt the slot.
pub fn decode(key: &str, content: &str) -> ApplicationResult<Vec<RegionEntry>> {
    serde_json::from_str(content).map_err(|e| ApplicationError::PersistenceCorrupt {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

fn error_chain(e: &ApplicationError) -> String {
    let mut message = e.to_string();
    let mut source = std::error::Error::source(e);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
