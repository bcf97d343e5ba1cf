#![forbid(unsafe_code)]

//! Labelled text input with helper and error text.

use lds_core::dom::{Document, ElementId, Tag};
use lds_core::ids::unique_dom_id;

use crate::Widget;
use crate::shadow;
use crate::validate::{parse_variant, style_variant};

style_variant! {
    /// The native `type` of the control.
    pub enum InputType("type") {
        Text => "text",
        Email => "email",
        Password => "password",
        Number => "number",
        Search => "search",
        Tel => "tel",
        Url => "url",
    }
    default = Text;
}

/// Notification produced by [`Input::handle_input`] and
/// [`Input::handle_change`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// The value changed while editing.
    Input { value: String },
    /// Editing was committed (the control lost focus).
    Change { value: String },
}

impl InputEvent {
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Input { value } | Self::Change { value } => value,
        }
    }
}

/// Text input widget.
///
/// Each instance owns a process-unique id (`lds-input-N`) used to tie the
/// label, helper text, and error text to the control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    id: String,
    label: String,
    name: String,
    input_type: InputType,
    value: String,
    placeholder: String,
    disabled: bool,
    error: Option<String>,
    helper_text: String,
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

impl Input {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: unique_dom_id("lds-input"),
            label: String::new(),
            name: String::new(),
            input_type: InputType::default(),
            value: String::new(),
            placeholder: String::new(),
            disabled: false,
            error: None,
            helper_text: String::new(),
        }
    }

    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn input_type(mut self, input_type: InputType) -> Self {
        self.input_type = input_type;
        self
    }

    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub fn helper_text(mut self, text: impl Into<String>) -> Self {
        self.helper_text = text.into();
        self
    }

    /// Set or clear the error message. An empty message clears it.
    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error.filter(|e| !e.is_empty());
    }

    pub fn set_type_str(&mut self, raw: &str) {
        self.input_type = parse_variant(raw);
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn current_value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn current_type(&self) -> InputType {
        self.input_type
    }

    #[must_use]
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    #[must_use]
    pub fn helper_id(&self) -> Option<String> {
        (!self.helper_text.is_empty()).then(|| format!("{}-helper", self.id))
    }

    #[must_use]
    pub fn error_id(&self) -> Option<String> {
        self.error.as_ref().map(|_| format!("{}-error", self.id))
    }

    /// Space-separated ids describing the control, if any.
    fn described_by(&self) -> Option<String> {
        let ids: Vec<String> = [self.helper_id(), self.error_id()]
            .into_iter()
            .flatten()
            .collect();
        (!ids.is_empty()).then(|| ids.join(" "))
    }

    /// Record an edit and produce the matching notification.
    pub fn handle_input(&mut self, value: impl Into<String>) -> InputEvent {
        self.value = value.into();
        tracing::trace!(message = "input.input", id = self.id.as_str(), len = self.value.len());
        InputEvent::Input {
            value: self.value.clone(),
        }
    }

    /// Record a committed edit and produce the matching notification.
    pub fn handle_change(&mut self, value: impl Into<String>) -> InputEvent {
        self.value = value.into();
        tracing::trace!(message = "input.change", id = self.id.as_str(), len = self.value.len());
        InputEvent::Change {
            value: self.value.clone(),
        }
    }
}

impl Widget for Input {
    fn render(&self, host: ElementId, doc: &mut Document) {
        shadow::teardown(doc, host);
        doc.toggle_attr(host, "disabled", self.disabled);

        let field = shadow::render_root(doc, host, Tag::Div);
        doc.set_attr(field, "class", "field");

        if !self.label.is_empty() {
            let label = doc.append_new(field, Tag::Label);
            doc.set_attr(label, "for", self.id.as_str());
            doc.set_text(label, self.label.as_str());
        }

        let control = doc.append_new(field, Tag::Div);
        doc.set_attr(control, "class", "control");
        let input = doc.append_new(control, Tag::Input);
        doc.set_attr(input, "id", self.id.as_str());
        doc.set_attr(input, "class", if self.has_error() { "error" } else { "" });
        if !self.name.is_empty() {
            doc.set_attr(input, "name", self.name.as_str());
        }
        doc.set_attr(input, "type", self.input_type.to_string());
        doc.set_attr(input, "value", self.value.as_str());
        doc.set_attr(input, "placeholder", self.placeholder.as_str());
        doc.toggle_attr(input, "disabled", self.disabled);
        doc.set_attr(
            input,
            "aria-invalid",
            if self.has_error() { "true" } else { "false" },
        );
        if let Some(described_by) = self.described_by() {
            doc.set_attr(input, "aria-describedby", described_by);
        }

        if let Some(helper_id) = self.helper_id() {
            let helper = doc.append_new(field, Tag::Paragraph);
            doc.set_attr(helper, "id", helper_id);
            doc.set_attr(helper, "class", "helper");
            doc.set_text(helper, self.helper_text.as_str());
        }
        if let (Some(error_id), Some(error)) = (self.error_id(), self.error.as_deref()) {
            let text = doc.append_new(field, Tag::Paragraph);
            doc.set_attr(text, "id", error_id);
            doc.set_attr(text, "class", "error-text");
            doc.set_text(text, error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(input: &Input) -> (Document, ElementId) {
        let mut doc = Document::new();
        let host = doc.append_new(doc.root(), Tag::Custom("lds-input".into()));
        input.render(host, &mut doc);
        let control = doc.element_by_dom_id(input.id()).expect("control");
        (doc, control)
    }

    #[test]
    fn ids_are_unique_and_prefixed() {
        let a = Input::new();
        let b = Input::new();
        assert_ne!(a.id(), b.id());
        assert!(a.id().starts_with("lds-input-"));
    }

    #[test]
    fn label_points_at_control() {
        let input = Input::new().label("Email").input_type(InputType::Email);
        let (doc, control) = render(&input);
        assert_eq!(doc.attr(control, "type"), Some("email"));
        let field = doc.children(doc.children(doc.root())[0])[0];
        let label = doc.children(field)[0];
        assert_eq!(doc.attr(label, "for"), Some(input.id()));
        assert_eq!(doc.get(label).and_then(|l| l.text()), Some("Email"));
    }

    #[test]
    fn describedby_lists_helper_then_error() {
        let mut input = Input::new().helper_text("Pick something memorable");
        let (doc, control) = render(&input);
        assert_eq!(doc.attr(control, "aria-invalid"), Some("false"));
        assert_eq!(
            doc.attr(control, "aria-describedby").map(str::to_owned),
            input.helper_id()
        );

        input.set_error(Some("Required".into()));
        let (doc, control) = render(&input);
        let expected = format!("{}-helper {}-error", input.id(), input.id());
        assert_eq!(doc.attr(control, "aria-describedby"), Some(expected.as_str()));
        assert_eq!(doc.attr(control, "aria-invalid"), Some("true"));
        assert_eq!(doc.attr(control, "class"), Some("error"));
        let error_el = doc
            .element_by_dom_id(&format!("{}-error", input.id()))
            .expect("error text");
        assert_eq!(doc.get(error_el).and_then(|e| e.text()), Some("Required"));
    }

    #[test]
    fn no_description_without_helper_or_error() {
        let mut input = Input::new();
        input.set_error(Some(String::new()));
        let (doc, control) = render(&input);
        assert_eq!(doc.attr(control, "aria-describedby"), None);
        assert!(!input.has_error());
    }

    #[test]
    fn events_carry_the_new_value() {
        let mut input = Input::new().value("a");
        let ev = input.handle_input("ab");
        assert_eq!(ev, InputEvent::Input { value: "ab".into() });
        assert_eq!(input.current_value(), "ab");
        let ev = input.handle_change("abc");
        assert_eq!(ev.value(), "abc");
        assert!(matches!(ev, InputEvent::Change { .. }));
    }

    #[test]
    fn disabled_control_is_not_focusable() {
        let (mut doc, control) = render(&Input::new().disabled(true));
        assert!(!doc.focus(control));
    }

    #[test]
    fn invalid_type_falls_back_to_text() {
        let mut input = Input::new().input_type(InputType::Password);
        input.set_type_str("date");
        assert_eq!(input.current_type(), InputType::Text);
    }
}
