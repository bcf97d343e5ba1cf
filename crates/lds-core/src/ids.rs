#![forbid(unsafe_code)]

//! Process-wide unique identifiers for label associations.
//!
//! Components that link elements through `id` attributes (`aria-labelledby`,
//! `aria-describedby`, `<label for>`) draw their ids from a single monotonic
//! counter. The counter starts once per process and is never reset, so two
//! component instances never hand out the same id.

use std::sync::atomic::{AtomicU64, Ordering};

static DOM_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Next raw value of the process-wide counter.
pub fn next_raw_id() -> u64 {
    DOM_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// Generate a unique `id` attribute value of the form `{prefix}-{n}`.
#[must_use]
pub fn unique_dom_id(prefix: &str) -> String {
    format!("{prefix}-{}", next_raw_id())
}
