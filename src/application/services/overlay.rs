//! Map overlay state container
//!
//! `MapOverlay` is the single owner of the session state: the registry (and
//! with it every persistence side effect), the intake form, the map status
//! and one [`FeatureBinding`] per rendered boundary feature. The rendering
//! side drives it with discrete events (dataset loaded, pointer enter/leave,
//! form submit) and asks it for the current per-feature output.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::application::services::boundary::BoundaryDataset;
use crate::application::services::registry::RegistryService;
use crate::application::ApplicationResult;
use crate::domain::{
    labels_match, resolve, style_for, FeatureBinding, HoverState, RegionEntry, StyleDescriptor,
    TooltipText, ValidationError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MapStatus {
    /// Boundary dataset not yet delivered
    Loading,
    Ready,
    /// Dataset failed to load; the map renders without regions
    NoData,
}

/// The two-field intake form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntakeForm {
    pub region: String,
    pub website: String,
}

impl IntakeForm {
    pub fn new(region: impl Into<String>, website: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            website: website.into(),
        }
    }

    pub fn clear(&mut self) {
        self.region.clear();
        self.website.clear();
    }
}

/// What the renderer draws for one feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedFeature {
    pub region_label: String,
    pub hover: HoverState,
    pub style: StyleDescriptor,
    pub tooltip: String,
}

/// Session state of the map overlay.
pub struct MapOverlay {
    registry: RegistryService,
    tooltip: TooltipText,
    form: IntakeForm,
    status: MapStatus,
    bindings: Vec<FeatureBinding>,
}

impl MapOverlay {
    /// Start in `Loading`; the registry is used as handed in (already
    /// loaded or still empty, rendering is not gated on it).
    pub fn new(registry: RegistryService, tooltip: TooltipText) -> Self {
        Self {
            registry,
            tooltip,
            form: IntakeForm::default(),
            status: MapStatus::Loading,
            bindings: Vec::new(),
        }
    }

    pub fn status(&self) -> MapStatus {
        self.status
    }

    pub fn entries(&self) -> &[RegionEntry] {
        self.registry.entries()
    }

    pub fn registry(&self) -> &RegistryService {
        &self.registry
    }

    pub fn bindings(&self) -> &[FeatureBinding] {
        &self.bindings
    }

    pub fn form(&self) -> &IntakeForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut IntakeForm {
        &mut self.form
    }

    /// Rehydrate the registry from storage. Bound payloads are not touched.
    pub fn reload_registry(&mut self) -> &[RegionEntry] {
        self.registry.load()
    }

    /// Boundary dataset arrived (or failed). Any previous bindings are
    /// dropped and re-created against the current registry.
    pub fn on_boundary_loaded(&mut self, result: ApplicationResult<BoundaryDataset>) {
        match result {
            Ok(dataset) => {
                let entries = self.registry.entries();
                self.bindings = dataset
                    .features
                    .into_iter()
                    .map(|feature| FeatureBinding::bind(feature, entries))
                    .collect();
                self.status = MapStatus::Ready;
                info!("boundary data ready: {} features", self.bindings.len());
            }
            Err(e) => {
                warn!("boundary data unavailable: {e}");
                self.bindings.clear();
                self.status = MapStatus::NoData;
            }
        }
    }

    /// Pointer entered feature `index`. `None` for an unknown index.
    pub fn pointer_enter(&mut self, index: usize) -> Option<StyleDescriptor> {
        let entries = self.registry.entries();
        self.bindings
            .get_mut(index)
            .map(|binding| binding.pointer_enter(entries))
    }

    /// Pointer left feature `index`. `None` for an unknown index.
    pub fn pointer_leave(&mut self, index: usize) -> Option<StyleDescriptor> {
        let entries = self.registry.entries();
        self.bindings
            .get_mut(index)
            .map(|binding| binding.pointer_leave(entries))
    }

    /// Pointer entered every feature whose label matches `region_label`
    /// (case-insensitive). Returns how many features are now emphasized.
    pub fn pointer_enter_label(&mut self, region_label: &str) -> usize {
        let entries = self.registry.entries();
        let mut count = 0;
        for binding in &mut self.bindings {
            if labels_match(binding.region_label(), region_label) {
                binding.pointer_enter(entries);
                count += 1;
            }
        }
        count
    }

    /// Style for an arbitrary label against the current registry.
    pub fn style_for(&self, region_label: &str) -> StyleDescriptor {
        style_for(region_label, self.registry.entries())
    }

    pub fn resolve(&self, region_label: &str) -> Option<&RegionEntry> {
        resolve(region_label, self.registry.entries())
    }

    /// Submit the form.
    ///
    /// Both fields are trimmed before validation. On success the entry is
    /// appended (and persisted) and the form is cleared; on failure the form
    /// keeps the values as typed.
    pub fn submit(&mut self) -> Result<RegionEntry, ValidationError> {
        let region = self.form.region.trim().to_string();
        let website = self.form.website.trim().to_string();

        let entry = self.registry.register(&region, &website)?;
        debug!("submit: registered '{}' as {}", entry.name(), entry.id());
        self.form.clear();
        Ok(entry)
    }

    /// Current output for every feature, in dataset order.
    pub fn render(&self) -> Vec<RenderedFeature> {
        let entries = self.registry.entries();
        self.bindings
            .iter()
            .map(|binding| RenderedFeature {
                region_label: binding.region_label().to_string(),
                hover: binding.hover(),
                style: binding.current_style(entries),
                tooltip: binding.payload().to_html(&self.tooltip),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationError;
    use crate::domain::BoundaryFeature;
    use crate::infrastructure::MemoryStore;
    use std::sync::Arc;

    fn overlay() -> MapOverlay {
        let registry = RegistryService::new(Arc::new(MemoryStore::new()), "regionData");
        MapOverlay::new(registry, TooltipText::default())
    }

    fn dataset(labels: &[&str]) -> BoundaryDataset {
        BoundaryDataset {
            features: labels.iter().map(|l| BoundaryFeature::labelled(*l)).collect(),
            skipped: 0,
        }
    }

    #[test]
    fn given_new_overlay_when_created_then_loading() {
        assert_eq!(overlay().status(), MapStatus::Loading);
    }

    #[test]
    fn given_failed_dataset_when_loaded_then_no_data_without_features() {
        let mut overlay = overlay();
        overlay.on_boundary_loaded(Ok(dataset(&["Bandung"])));

        overlay.on_boundary_loaded(Err(ApplicationError::DataLoad {
            source_name: "kabkota.json".into(),
            reason: "unreachable".into(),
        }));

        assert_eq!(overlay.status(), MapStatus::NoData);
        assert!(overlay.render().is_empty());
    }

    #[test]
    fn given_invalid_submit_when_submitting_then_form_keeps_values() {
        let mut overlay = overlay();
        *overlay.form_mut() = IntakeForm::new("Bandung", "ftp://x.com");

        let result = overlay.submit();

        assert_eq!(result, Err(ValidationError::InvalidUrlScheme));
        assert_eq!(overlay.form(), &IntakeForm::new("Bandung", "ftp://x.com"));
        assert!(overlay.entries().is_empty());
    }

    #[test]
    fn given_whitespace_only_field_when_submitting_then_missing_field() {
        let mut overlay = overlay();
        *overlay.form_mut() = IntakeForm::new("   ", "https://x.com");

        assert_eq!(overlay.submit(), Err(ValidationError::MissingField));
    }

    #[test]
    fn given_valid_submit_when_submitting_then_form_cleared_and_trimmed_entry_stored() {
        let mut overlay = overlay();
        *overlay.form_mut() = IntakeForm::new(" Tasikmalaya ", "https://tasikgo.com ");

        let entry = overlay.submit().unwrap();

        assert_eq!(entry.name(), "Tasikmalaya");
        assert_eq!(entry.website(), "https://tasikgo.com");
        assert_eq!(overlay.form(), &IntakeForm::default());
        assert!(overlay.resolve("tasikmalaya").is_some());
    }

    #[test]
    fn given_submit_after_bind_when_rendering_then_style_fresh_but_tooltip_stale() {
        let mut overlay = overlay();
        overlay.on_boundary_loaded(Ok(dataset(&["Bandung"])));
        *overlay.form_mut() = IntakeForm::new("bandung", "https://bandung.go.id");
        overlay.submit().unwrap();

        let rendered = overlay.render();

        assert!(rendered[0].style.is_linked());
        assert!(!rendered[0].tooltip.contains("https://bandung.go.id"));
    }

    #[test]
    fn given_new_dataset_when_loaded_then_tooltips_rebound() {
        let mut overlay = overlay();
        overlay.on_boundary_loaded(Ok(dataset(&["Bandung"])));
        *overlay.form_mut() = IntakeForm::new("Bandung", "https://bandung.go.id");
        overlay.submit().unwrap();

        overlay.on_boundary_loaded(Ok(dataset(&["Bandung"])));

        assert!(overlay.render()[0].tooltip.contains("https://bandung.go.id"));
    }

    #[test]
    fn given_hover_when_pointer_enters_and_leaves_then_rendered_style_follows() {
        let mut overlay = overlay();
        overlay.on_boundary_loaded(Ok(dataset(&["Bandung", "Garut"])));

        let entered = overlay.pointer_enter(1).unwrap();
        let rendered = overlay.render();
        assert_eq!(entered.stroke_weight, 3);
        assert_eq!(rendered[1].hover, HoverState::Emphasized);
        assert_eq!(rendered[0].hover, HoverState::Normal);

        let left = overlay.pointer_leave(1).unwrap();
        assert_eq!(left, StyleDescriptor::unlinked());
        assert!(overlay.pointer_enter(5).is_none());
    }

    #[test]
    fn given_lowercase_label_when_hovering_by_label_then_matching_features_emphasized() {
        let mut overlay = overlay();
        overlay.on_boundary_loaded(Ok(dataset(&["Bandung", "Garut", "BANDUNG"])));

        let count = overlay.pointer_enter_label("bandung");

        let rendered = overlay.render();
        assert_eq!(count, 2);
        assert_eq!(rendered[0].hover, HoverState::Emphasized);
        assert_eq!(rendered[1].hover, HoverState::Normal);
        assert_eq!(rendered[2].hover, HoverState::Emphasized);
    }
}
