#![forbid(unsafe_code)]

//! Compound simple selectors.
//!
//! Supports the subset components need to locate their own parts:
//! an optional tag name followed by any mix of `#id`, `.class`, `[attr]`,
//! `[attr=value]` and `[attr="value"]`. Combinators and selector lists are
//! rejected.

use thiserror::Error;

use crate::dom::{Element, Tag};

/// Errors produced by [`Selector::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("unsupported character {found:?} at byte {at} in selector")]
    Unsupported { found: char, at: usize },
    #[error("missing name after {prefix:?} at byte {at}")]
    MissingName { prefix: char, at: usize },
    #[error("unterminated attribute selector starting at byte {at}")]
    UnterminatedAttribute { at: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrMatch {
    name: String,
    value: Option<String>,
}

/// A parsed compound selector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    tag: Option<Tag>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

impl Selector {
    /// Parse a compound selector such as `button.primary[type=submit]`.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let src = input.trim();
        if src.is_empty() {
            return Err(SelectorError::Empty);
        }

        let mut selector = Self::default();
        let bytes_offset = input.len() - input.trim_start().len();
        let chars: Vec<(usize, char)> = src.char_indices().collect();
        let mut i = 0;

        let take_name = |start: usize| -> (String, usize) {
            let mut end = start;
            while end < chars.len() && is_name_char(chars[end].1) {
                end += 1;
            }
            let name: String = chars[start..end].iter().map(|(_, c)| *c).collect();
            (name, end)
        };

        if chars.first().is_some_and(|(_, c)| is_name_char(*c)) {
            let (name, next) = take_name(0);
            selector.tag = Some(Tag::from_name(&name));
            i = next;
        }

        while i < chars.len() {
            let (at, c) = chars[i];
            let at = at + bytes_offset;
            match c {
                '#' | '.' => {
                    let (name, next) = take_name(i + 1);
                    if name.is_empty() {
                        return Err(SelectorError::MissingName { prefix: c, at });
                    }
                    if c == '#' {
                        selector.id = Some(name);
                    } else {
                        selector.classes.push(name);
                    }
                    i = next;
                }
                '[' => {
                    let close = chars[i..]
                        .iter()
                        .position(|(_, ch)| *ch == ']')
                        .map(|offset| i + offset)
                        .ok_or(SelectorError::UnterminatedAttribute { at })?;
                    let body: String = chars[i + 1..close].iter().map(|(_, ch)| *ch).collect();
                    selector.attrs.push(Self::parse_attr(&body, at)?);
                    i = close + 1;
                }
                other => {
                    return Err(SelectorError::Unsupported { found: other, at });
                }
            }
        }

        Ok(selector)
    }

    fn parse_attr(body: &str, at: usize) -> Result<AttrMatch, SelectorError> {
        let (name, value) = match body.split_once('=') {
            Some((name, value)) => {
                let value = value.trim();
                let value = value
                    .strip_prefix('"')
                    .and_then(|v| v.strip_suffix('"'))
                    .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                    .unwrap_or(value);
                (name.trim(), Some(value.to_owned()))
            }
            None => (body.trim(), None),
        };
        if name.is_empty() || !name.chars().all(is_name_char) {
            return Err(SelectorError::MissingName { prefix: '[', at });
        }
        Ok(AttrMatch {
            name: name.to_owned(),
            value,
        })
    }

    /// Whether `element` satisfies every part of this selector.
    #[must_use]
    pub fn matches(&self, element: &Element) -> bool {
        if let Some(tag) = &self.tag
            && element.tag() != tag
        {
            return false;
        }
        if let Some(id) = &self.id
            && element.dom_id() != Some(id.as_str())
        {
            return false;
        }
        if !self.classes.iter().all(|c| element.has_class(c)) {
            return false;
        }
        self.attrs.iter().all(|a| match &a.value {
            Some(expected) => element.attr(&a.name) == Some(expected.as_str()),
            None => element.has_attr(&a.name),
        })
    }
}

impl std::str::FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
