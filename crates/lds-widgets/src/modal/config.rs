#![forbid(unsafe_code)]

//! Overlay configuration.
//!
//! [`OverlayConfig`] seeds a controller's properties and picks where focus
//! lands once the panel is rendered. With the `config` feature enabled it
//! can be loaded from TOML or JSON:
//!
//! ```toml
//! dismiss_on_backdrop = false
//! heading = "Delete project"
//! initial_focus = { selector = "#confirm" }
//! ```
//!
//! # Defaults
//!
//! `OverlayConfig::default()` matches a freshly created overlay: both
//! dismissal paths enabled, no heading, focus on the first focusable
//! element of the panel.

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use lds_core::selector::Selector;

use super::controller::PANEL_CLASS;

/// Where focus goes after the panel is first rendered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "snake_case"))]
pub enum InitialFocus {
    /// First focusable element of the panel, or the panel itself when it
    /// has none.
    #[default]
    FirstFocusable,
    /// The panel element.
    Panel,
    /// First match of a selector inside the panel (panel included), falling
    /// back to [`InitialFocus::FirstFocusable`].
    Selector(String),
}

impl InitialFocus {
    /// Preferred target as a selector, or `None` for first-focusable.
    ///
    /// An unparsable selector is reported and treated as `None`.
    #[must_use]
    pub fn preferred_selector(&self) -> Option<Selector> {
        match self {
            Self::FirstFocusable => None,
            Self::Panel => Selector::parse(&format!(".{PANEL_CLASS}")).ok(),
            Self::Selector(raw) => match Selector::parse(raw) {
                Ok(selector) => Some(selector),
                Err(err) => {
                    tracing::warn!(
                        message = "overlay.initial_focus.invalid",
                        selector = raw.as_str(),
                        error = %err
                    );
                    None
                }
            },
        }
    }
}

/// Construction-time settings for an [`OverlayController`].
///
/// [`OverlayController`]: super::OverlayController
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct OverlayConfig {
    /// Close when the backdrop itself is activated.
    pub dismiss_on_backdrop: bool,
    /// Close on Escape inside the panel.
    pub dismiss_on_escape: bool,
    /// Dialog heading; empty for none.
    pub heading: String,
    /// Initial focus target.
    pub initial_focus: InitialFocus,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            dismiss_on_backdrop: true,
            dismiss_on_escape: true,
            heading: String::new(),
            initial_focus: InitialFocus::default(),
        }
    }
}

impl OverlayConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn dismiss_on_backdrop(mut self, on: bool) -> Self {
        self.dismiss_on_backdrop = on;
        self
    }

    #[must_use]
    pub fn dismiss_on_escape(mut self, on: bool) -> Self {
        self.dismiss_on_escape = on;
        self
    }

    #[must_use]
    pub fn heading(mut self, heading: impl Into<String>) -> Self {
        self.heading = heading.into();
        self
    }

    #[must_use]
    pub fn initial_focus(mut self, target: InitialFocus) -> Self {
        self.initial_focus = target;
        self
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Check the settings for problems.
    ///
    /// Returns a list of human-readable problems; empty means valid. An
    /// invalid config is still usable: a bad selector degrades to
    /// first-focusable and a blank heading is treated as no heading.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.heading.is_empty() && self.heading.trim().is_empty() {
            errors.push("heading must not be blank; leave it empty for no heading".into());
        }

        if let InitialFocus::Selector(raw) = &self.initial_focus
            && let Err(err) = Selector::parse(raw)
        {
            errors.push(format!("initial_focus selector {raw:?} is invalid: {err}"));
        }

        errors
    }
}

/// Errors that can occur when loading an overlay configuration.
#[cfg(feature = "config")]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error reading overlay config: {0}")]
    Io(#[source] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[source] toml::de::Error),
    #[error("JSON parse error: {0}")]
    Json(#[source] serde_json::Error),
}
