//! Reading-time estimate and badge.

#[cfg(test)]
#[path = "reading_time_test.rs"]
mod reading_time_test;

use crate::consts::WORDS_PER_MINUTE;
use crate::dom::{Document, create_with_class};

/// Where the badge goes: the nearest enclosing heading or card header.
pub const BADGE_HOST_SELECTOR: &str = ".card-header, h1, h2, h3";

/// Minutes to read `text` at the default reading speed.
///
/// Any text with at least one word takes at least one minute; text with no
/// words takes zero.
#[must_use]
pub fn estimate_reading_time(text: &str) -> u32 {
    estimate_minutes(text, WORDS_PER_MINUTE)
}

/// Minutes to read `text` at `words_per_minute`, rounded up.
#[must_use]
pub fn estimate_minutes(text: &str, words_per_minute: u32) -> u32 {
    let words = u32::try_from(text.split_whitespace().count()).unwrap_or(u32::MAX);
    words.div_ceil(words_per_minute.max(1))
}

/// Append a reading-time badge for `element`. Returns the badge when placed.
pub fn annotate<D: Document>(doc: &D, element: &D::Node, words_per_minute: u32, suffix: &str) -> Option<D::Node> {
    let minutes = estimate_minutes(&doc.text_content(element), words_per_minute);
    if minutes == 0 {
        return None;
    }
    let host = doc.closest(element, BADGE_HOST_SELECTOR)?;

    let badge = create_with_class(doc, "span", "badge bg-secondary ms-2")?;
    let icon = create_with_class(doc, "i", "fas fa-clock me-1")?;
    let label = doc.create_element("span")?;
    doc.set_text(&label, &format!("{minutes} {suffix}"));
    doc.append_child(&badge, &icon);
    doc.append_child(&badge, &label);
    doc.append_child(&host, &badge);
    Some(badge)
}
