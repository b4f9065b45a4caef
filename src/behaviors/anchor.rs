//! Smooth scrolling for in-page anchor links.

#[cfg(test)]
#[path = "anchor_test.rs"]
mod anchor_test;

use crate::dom::{Document, EventResponse};

/// Whether an `href` points inside the current page.
#[must_use]
pub fn is_in_page_link(href: &str) -> bool {
    href.starts_with('#')
}

/// The selector to scroll to, or `None` when the link should navigate normally.
///
/// Bare `#` and `#!` are placeholder links used by scripts and keep their
/// default behavior.
#[must_use]
pub fn scroll_target(href: &str) -> Option<&str> {
    if !is_in_page_link(href) || href == "#" || href == "#!" {
        return None;
    }
    Some(href)
}

/// Handle a click on an in-page anchor.
pub fn on_click<D: Document>(doc: &D, anchor: &D::Node) -> EventResponse {
    let Some(href) = doc.attribute(anchor, "href") else {
        return EventResponse::proceed();
    };
    let Some(selector) = scroll_target(&href) else {
        return EventResponse::proceed();
    };
    match doc.query(selector) {
        Some(target) => doc.scroll_into_view(&target),
        None => log::debug!("anchor target {selector} not found"),
    }
    EventResponse::prevent()
}
