#![forbid(unsafe_code)]

//! Content card with header, body, and footer regions.

use lds_core::dom::{Document, ElementId, Tag};

use crate::Widget;
use crate::shadow;
use crate::validate::{parse_variant, style_variant};

style_variant! {
    /// Shadow depth.
    pub enum CardElevation("elevation") {
        None => "none",
        Sm => "sm",
        Md => "md",
    }
    default = Sm;
}

style_variant! {
    /// Inner spacing.
    pub enum CardPadding("padding") {
        None => "none",
        Sm => "sm",
        Md => "md",
        Lg => "lg",
    }
    default = Md;
}

pub const HEADER_SLOT: &str = "header";
pub const FOOTER_SLOT: &str = "footer";

/// Card widget. An interactive card joins the Tab sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Card {
    elevation: CardElevation,
    padding: CardPadding,
    interactive: bool,
}

impl Card {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn elevation(mut self, elevation: CardElevation) -> Self {
        self.elevation = elevation;
        self
    }

    #[must_use]
    pub fn padding(mut self, padding: CardPadding) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn set_elevation_str(&mut self, raw: &str) {
        self.elevation = parse_variant(raw);
    }

    pub fn set_padding_str(&mut self, raw: &str) {
        self.padding = parse_variant(raw);
    }

    #[must_use]
    pub fn current_elevation(&self) -> CardElevation {
        self.elevation
    }

    #[must_use]
    pub fn current_padding(&self) -> CardPadding {
        self.padding
    }

    fn class_list(&self) -> String {
        let mut classes = format!("card padding-{} elevation-{}", self.padding, self.elevation);
        if self.interactive {
            classes.push_str(" interactive");
        }
        classes
    }
}

impl Widget for Card {
    fn render(&self, host: ElementId, doc: &mut Document) {
        shadow::teardown(doc, host);
        let card = shadow::render_root(doc, host, Tag::Div);
        doc.set_attr(card, "class", self.class_list());
        if self.interactive {
            doc.set_attr(card, "tabindex", "0");
        }
        let header = shadow::slot(doc, card, Some(HEADER_SLOT));
        let body = shadow::slot(doc, card, None);
        let footer = shadow::slot(doc, card, Some(FOOTER_SLOT));
        shadow::project(doc, host, &[header, body, footer]);
    }
}
