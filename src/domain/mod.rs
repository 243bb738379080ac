//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod interaction;
pub mod matcher;
pub mod style;
pub mod validation;

pub use entities::{BoundaryFeature, RegionEntry, RegionId};
pub use error::DomainError;
pub use interaction::{DetailContent, DetailPayload, FeatureBinding, HoverState, TooltipText};
pub use matcher::{is_linked, labels_match, resolve};
pub use style::{style_for, StyleDescriptor};
pub use validation::{validate, IdGenerator, ValidationError};
