#![forbid(unsafe_code)]

//! Lenient validation for style properties.
//!
//! Invalid input is never fatal. Each check logs a `warn`-level event that
//! names the property, the offending value, and what was used instead, then
//! hands back a usable value.

/// An enumerated style property with a closed set of allowed values.
pub trait StyleVariant: Copy + Sized + 'static {
    /// Property name used in diagnostics (e.g. `"variant"`).
    const PROPERTY: &'static str;
    /// Every allowed value, in declaration order.
    const ALL: &'static [Self];
    /// Value substituted for invalid input.
    const DEFAULT: Self;

    /// Markup spelling of this value.
    fn as_str(self) -> &'static str;
}

/// Comma-separated list of the allowed spellings for `T`.
#[must_use]
pub fn allowed_values<T: StyleVariant>() -> String {
    T::ALL
        .iter()
        .map(|v| v.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse `raw` as a `T`, falling back to `T::DEFAULT` with a warning.
pub fn parse_variant<T: StyleVariant>(raw: &str) -> T {
    if let Some(found) = T::ALL.iter().copied().find(|v| v.as_str() == raw) {
        return found;
    }
    tracing::warn!(
        message = "validate.invalid_variant",
        property = T::PROPERTY,
        value = raw,
        allowed = %allowed_values::<T>(),
        default = T::DEFAULT.as_str()
    );
    T::DEFAULT
}

/// Warn when `value` is blank. Returns whether it was non-empty.
pub fn validate_non_empty(value: &str, property: &str) -> bool {
    if value.trim().is_empty() {
        tracing::warn!(message = "validate.empty", property);
        return false;
    }
    true
}

/// Clamp `value` into `[min, max]`, warning when clamping was needed.
pub fn validate_range(value: f64, min: f64, max: f64, property: &str) -> f64 {
    if value < min || value > max {
        let clamped = value.clamp(min, max);
        tracing::warn!(
            message = "validate.out_of_range",
            property,
            value,
            min,
            max,
            clamped
        );
        return clamped;
    }
    value
}

/// Declare an enumerated style property.
///
/// Generates the enum plus `StyleVariant`, `Default`, `Display`, and a
/// lenient `From<&str>` that routes through [`parse_variant`].
macro_rules! style_variant {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($prop:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
        default = $default:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::validate::StyleVariant for $name {
            const PROPERTY: &'static str = $prop;
            const ALL: &'static [Self] = &[$(Self::$variant),+];
            const DEFAULT: Self = Self::$default;

            fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::validate::StyleVariant::as_str(*self))
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                $crate::validate::parse_variant(raw)
            }
        }
    };
}

pub(crate) use style_variant;
