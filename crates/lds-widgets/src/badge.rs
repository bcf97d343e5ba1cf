#![forbid(unsafe_code)]

//! Status badge.

use lds_core::dom::{Document, ElementId, Tag};

use crate::Widget;
use crate::shadow;
use crate::validate::{parse_variant, style_variant};

style_variant! {
    /// Colour role of a badge.
    pub enum BadgeVariant("variant") {
        Primary => "primary",
        Secondary => "secondary",
        Success => "success",
        Warning => "warning",
        Error => "error",
    }
    default = Primary;
}

/// A short status label, e.g. "New" or "Failed".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Badge {
    variant: BadgeVariant,
    label: String,
}

impl Badge {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn variant(mut self, variant: BadgeVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the variant from its markup spelling.
    pub fn set_variant_str(&mut self, raw: &str) {
        self.variant = parse_variant(raw);
    }

    #[must_use]
    pub fn current_variant(&self) -> BadgeVariant {
        self.variant
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Widget for Badge {
    fn render(&self, host: ElementId, doc: &mut Document) {
        shadow::teardown(doc, host);
        let span = shadow::render_root(doc, host, Tag::Span);
        doc.set_attr(span, "class", format!("badge {}", self.variant));
        if !self.label.is_empty() {
            doc.set_text(span, self.label.as_str());
        }
        let slot = shadow::slot(doc, span, None);
        shadow::project(doc, host, &[slot]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(doc: &mut Document) -> ElementId {
        doc.append_new(doc.root(), Tag::Custom("lds-badge".into()))
    }

    #[test]
    fn renders_variant_class_and_label() {
        let mut doc = Document::new();
        let host = host(&mut doc);
        Badge::new("Active")
            .variant(BadgeVariant::Success)
            .render(host, &mut doc);

        let span = doc.children(host)[0];
        assert_eq!(doc.attr(span, "class"), Some("badge success"));
        assert_eq!(doc.get(span).and_then(|s| s.text()), Some("Active"));
    }

    #[test]
    fn rerender_replaces_previous_output() {
        let mut doc = Document::new();
        let host = host(&mut doc);
        let mut badge = Badge::new("3");
        badge.render(host, &mut doc);
        badge.set_variant_str("error");
        badge.render(host, &mut doc);
        assert_eq!(doc.children(host).len(), 1);
        let span = doc.children(host)[0];
        assert_eq!(doc.attr(span, "class"), Some("badge error"));
    }

    #[test]
    fn unknown_variant_falls_back_to_primary() {
        let mut badge = Badge::new("x").variant(BadgeVariant::Warning);
        badge.set_variant_str("neon");
        assert_eq!(badge.current_variant(), BadgeVariant::Primary);
    }

    #[test]
    fn host_children_land_in_the_slot() {
        let mut doc = Document::new();
        let host = host(&mut doc);
        let icon = doc.append_new(host, Tag::Span);
        Badge::default().render(host, &mut doc);
        let span = doc.children(host)[0];
        assert!(doc.contains(span, icon));
        assert_ne!(span, icon);
    }
}
