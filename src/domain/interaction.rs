//! Per-feature interaction: hover state machine and detail payload
//!
//! A [`FeatureBinding`] lives as long as its feature is rendered. The hover
//! state flips between `Normal` and `Emphasized` on pointer enter/leave.
//! Leaving recomputes the style from the registry passed in, it never
//! restores a cached value.
//!
//! The detail payload is resolved once, at bind time, and is not refreshed
//! when the registry changes afterwards. Re-binding (e.g. after a new
//! boundary dataset is loaded) picks up the current registry.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{BoundaryFeature, RegionEntry};
use crate::domain::matcher::resolve;
use crate::domain::style::{style_for, StyleDescriptor};

pub const DEFAULT_LINK_TEXT: &str = "Kunjungi Website";
pub const DEFAULT_UNREGISTERED_MESSAGE: &str = "Belum ada website terdaftar untuk wilayah ini.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HoverState {
    #[default]
    Normal,
    Emphasized,
}

/// What the detail popup says about a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetailContent {
    Website { url: String },
    Unregistered,
}

/// Detail payload attached to a feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailPayload {
    pub region_label: String,
    pub content: DetailContent,
}

/// Fixed texts used when rendering a [`DetailPayload`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipText {
    /// Text of the external website link
    pub link_text: String,
    /// Message for regions without a registered website
    pub unregistered_message: String,
}

impl Default for TooltipText {
    fn default() -> Self {
        Self {
            link_text: DEFAULT_LINK_TEXT.into(),
            unregistered_message: DEFAULT_UNREGISTERED_MESSAGE.into(),
        }
    }
}

impl DetailPayload {
    pub fn bind(region_label: &str, entries: &[RegionEntry]) -> Self {
        let content = match resolve(region_label, entries) {
            Some(entry) => DetailContent::Website {
                url: entry.website().to_string(),
            },
            None => DetailContent::Unregistered,
        };
        Self {
            region_label: region_label.to_string(),
            content,
        }
    }

    /// HTML fragment for the tooltip; the website becomes a link opening
    /// in a new browsing context.
    pub fn to_html(&self, text: &TooltipText) -> String {
        let body = match &self.content {
            DetailContent::Website { url } => format!(
                r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
                escape_html(url),
                escape_html(&text.link_text)
            ),
            DetailContent::Unregistered => {
                format!("<p>{}</p>", escape_html(&text.unregistered_message))
            }
        };
        format!(
            r#"<div class="tooltip-content"><h3>{}</h3>{}</div>"#,
            escape_html(&self.region_label),
            body
        )
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Interaction state of one rendered feature.
#[derive(Debug, Clone)]
pub struct FeatureBinding {
    feature: BoundaryFeature,
    payload: DetailPayload,
    hover: HoverState,
    emphasis: Option<StyleDescriptor>,
}

impl FeatureBinding {
    pub fn bind(feature: BoundaryFeature, entries: &[RegionEntry]) -> Self {
        let payload = DetailPayload::bind(&feature.region_label, entries);
        Self {
            feature,
            payload,
            hover: HoverState::Normal,
            emphasis: None,
        }
    }

    pub fn region_label(&self) -> &str {
        &self.feature.region_label
    }

    pub fn feature(&self) -> &BoundaryFeature {
        &self.feature
    }

    pub fn payload(&self) -> &DetailPayload {
        &self.payload
    }

    pub fn hover(&self) -> HoverState {
        self.hover
    }

    /// Style to draw right now: the hover override while emphasized,
    /// otherwise freshly derived from `entries`.
    pub fn current_style(&self, entries: &[RegionEntry]) -> StyleDescriptor {
        match (&self.hover, &self.emphasis) {
            (HoverState::Emphasized, Some(style)) => style.clone(),
            _ => style_for(self.region_label(), entries),
        }
    }

    /// normal -> emphasized. Repeated enters keep the first override.
    pub fn pointer_enter(&mut self, entries: &[RegionEntry]) -> StyleDescriptor {
        if self.hover == HoverState::Normal {
            let emphasized = style_for(self.region_label(), entries).emphasized();
            self.emphasis = Some(emphasized);
            self.hover = HoverState::Emphasized;
        }
        self.current_style(entries)
    }

    /// emphasized -> normal, restoring the style derived from `entries`.
    pub fn pointer_leave(&mut self, entries: &[RegionEntry]) -> StyleDescriptor {
        self.hover = HoverState::Normal;
        self.emphasis = None;
        style_for(self.region_label(), entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::RegionId;
    use crate::domain::style::{LINKED_FILL, UNLINKED_FILL};

    fn entry(id: &str, name: &str, website: &str) -> RegionEntry {
        RegionEntry::new(RegionId::new(id), name, website).unwrap()
    }

    #[test]
    fn given_new_binding_when_inspected_then_normal_with_fresh_style() {
        let binding = FeatureBinding::bind(BoundaryFeature::labelled("Bandung"), &[]);

        assert_eq!(binding.hover(), HoverState::Normal);
        assert_eq!(binding.current_style(&[]), StyleDescriptor::unlinked());
    }

    #[test]
    fn given_unlinked_feature_when_pointer_enters_then_emphasized() {
        let mut binding = FeatureBinding::bind(BoundaryFeature::labelled("Bandung"), &[]);

        let style = binding.pointer_enter(&[]);

        assert_eq!(binding.hover(), HoverState::Emphasized);
        assert_eq!(style.stroke_weight, 3);
        assert_eq!(style.fill_color, UNLINKED_FILL);
    }

    #[test]
    fn given_emphasized_feature_when_pointer_leaves_then_restores_unlinked() {
        let mut binding = FeatureBinding::bind(BoundaryFeature::labelled("Bandung"), &[]);
        binding.pointer_enter(&[]);

        let style = binding.pointer_leave(&[]);

        assert_eq!(binding.hover(), HoverState::Normal);
        assert_eq!(style, StyleDescriptor::unlinked());
        assert_eq!(style.fill_color, "#9E9E9E");
    }

    #[test]
    fn given_registry_gains_entry_during_hover_when_leaving_then_style_is_recomputed() {
        let mut binding = FeatureBinding::bind(BoundaryFeature::labelled("Bandung"), &[]);
        binding.pointer_enter(&[]);
        let entries = vec![entry("1", "bandung", "https://bandung.go.id")];

        // still emphasized with the override chosen on enter
        assert_eq!(binding.current_style(&entries).fill_color, UNLINKED_FILL);

        let style = binding.pointer_leave(&entries);

        assert_eq!(style.fill_color, LINKED_FILL);
    }

    #[test]
    fn given_repeated_enter_when_hovering_then_override_unchanged() {
        let mut binding = FeatureBinding::bind(BoundaryFeature::labelled("Bandung"), &[]);
        let first = binding.pointer_enter(&[]);
        let entries = vec![entry("1", "Bandung", "https://bandung.go.id")];

        let second = binding.pointer_enter(&entries);

        assert_eq!(first, second);
    }

    #[test]
    fn given_linked_feature_when_bound_then_payload_has_website() {
        let entries = vec![entry("1", "garut", "https://garut.example")];

        let binding = FeatureBinding::bind(BoundaryFeature::labelled("Garut"), &entries);

        assert_eq!(binding.payload().region_label, "Garut");
        assert_eq!(
            binding.payload().content,
            DetailContent::Website {
                url: "https://garut.example".into()
            }
        );
    }

    #[test]
    fn given_bound_payload_when_registry_changes_then_payload_is_not_refreshed() {
        let binding = FeatureBinding::bind(BoundaryFeature::labelled("Garut"), &[]);
        let entries = vec![entry("1", "Garut", "https://garut.example")];

        // style follows the registry, payload keeps its bind-time content
        assert!(binding.current_style(&entries).is_linked());
        assert_eq!(binding.payload().content, DetailContent::Unregistered);
    }

    #[test]
    fn given_website_payload_when_rendering_html_then_contains_link() {
        let payload = DetailPayload {
            region_label: "Tasikmalaya".into(),
            content: DetailContent::Website {
                url: "https://tasikgo.com".into(),
            },
        };

        let html = payload.to_html(&TooltipText::default());

        assert!(html.contains("<h3>Tasikmalaya</h3>"));
        assert!(html.contains(r#"href="https://tasikgo.com""#));
        assert!(html.contains(r#"target="_blank""#));
        assert!(html.contains(DEFAULT_LINK_TEXT));
    }

    #[test]
    fn given_unregistered_payload_when_rendering_html_then_shows_message() {
        let payload = DetailPayload::bind("Ciamis", &[]);

        let html = payload.to_html(&TooltipText::default());

        assert!(html.contains("<h3>Ciamis</h3>"));
        assert!(html.contains(DEFAULT_UNREGISTERED_MESSAGE));
        assert!(!html.contains("<a "));
    }

    #[test]
    fn given_markup_in_values_when_rendering_html_then_escaped() {
        let payload = DetailPayload {
            region_label: "<b>X</b>".into(),
            content: DetailContent::Website {
                url: "https://x.example/?a=1&b=\"2\"".into(),
            },
        };

        let html = payload.to_html(&TooltipText::default());

        assert!(html.contains("&lt;b&gt;X&lt;/b&gt;"));
        assert!(html.contains("a=1&amp;b=&quot;2&quot;"));
    }
}
