//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, KeyValueStore)
//! but are themselves concrete structs, not traits.

mod boundary;
mod overlay;
mod registry;

pub use boundary::{BoundaryDataset, BoundaryService};
pub use overlay::{IntakeForm, MapOverlay, MapStatus, RenderedFeature};
pub use registry::{decode, encode, RegistryService};
