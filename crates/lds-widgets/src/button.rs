#![forbid(unsafe_code)]

//! Push button with variant, size, and loading state.

use lds_core::dom::{Document, ElementId, Tag};

use crate::Widget;
use crate::shadow;
use crate::validate::{parse_variant, style_variant};

style_variant! {
    /// Visual emphasis of a button.
    pub enum ButtonVariant("variant") {
        Primary => "primary",
        Secondary => "secondary",
        Ghost => "ghost",
        Danger => "danger",
    }
    default = Primary;
}

style_variant! {
    pub enum ButtonSize("size") {
        Sm => "sm",
        Md => "md",
        Lg => "lg",
    }
    default = Md;
}

/// Button widget.
///
/// A loading button is rendered disabled and `aria-busy`, with a spinner
/// ahead of its label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Button {
    variant: ButtonVariant,
    size: ButtonSize,
    disabled: bool,
    loading: bool,
    label: String,
}

impl Button {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    #[must_use]
    pub fn size(mut self, size: ButtonSize) -> Self {
        self.size = size;
        self
    }

    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    pub fn set_variant_str(&mut self, raw: &str) {
        self.variant = parse_variant(raw);
    }

    pub fn set_size_str(&mut self, raw: &str) {
        self.size = parse_variant(raw);
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    #[must_use]
    pub fn current_variant(&self) -> ButtonVariant {
        self.variant
    }

    #[must_use]
    pub fn current_size(&self) -> ButtonSize {
        self.size
    }

    /// Whether the rendered control rejects interaction.
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.disabled || self.loading
    }
}

impl Widget for Button {
    fn render(&self, host: ElementId, doc: &mut Document) {
        shadow::teardown(doc, host);
        doc.toggle_attr(host, "disabled", self.disabled);

        let button = shadow::render_root(doc, host, Tag::Button);
        doc.set_attr(button, "class", format!("{} {}", self.variant, self.size));
        doc.toggle_attr(button, "disabled", self.is_inert());
        doc.set_attr(button, "aria-busy", if self.loading { "true" } else { "false" });

        if self.loading {
            let spinner = doc.append_new(button, Tag::Span);
            doc.set_attr(spinner, "class", "spinner");
            doc.set_attr(spinner, "aria-hidden", "true");
            doc.set_text(spinner, "…");
        }
        if !self.label.is_empty() {
            let label = doc.append_new(button, Tag::Span);
            doc.set_text(label, self.label.as_str());
        }
        let slot = shadow::slot(doc, button, None);
        shadow::project(doc, host, &[slot]);
    }
}
