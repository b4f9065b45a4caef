//! Transient notification banners.
//!
//! Toasts stack in a single fixed container at the top-right of the page.
//! The container is reused when the server already rendered one, otherwise
//! it is created on first use. Each toast hides itself after the visible
//! delay and is removed from the document once the fade has finished.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

use std::rc::Rc;

use crate::capability::Scheduler;
use crate::config::EnhanceConfig;
use crate::consts::TOAST_CONTAINER_ID;
use crate::dom::{Document, create_with_class};

const CONTAINER_CLASS: &str = "toast-container position-fixed top-0 end-0 p-3";
const SHOW_CLASS: &str = "show";

/// Notification category; picks the banner color and icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Danger,
}

impl Severity {
    /// Parse a severity name. Unknown names fall back to [`Severity::Info`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "success" => Self::Success,
            "warning" => Self::Warning,
            "danger" => Self::Danger,
            _ => Self::Info,
        }
    }

    /// Bootstrap contextual name, used for the `bg-*` class.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }

    /// Font Awesome icon name.
    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Info => "info-circle",
            Self::Success => "check-circle",
            Self::Warning => "exclamation-triangle",
            Self::Danger => "exclamation-circle",
        }
    }
}

pub struct ToastCenter<D: Document> {
    doc: D,
    scheduler: Rc<dyn Scheduler>,
    container: Option<D::Node>,
    visible_ms: u32,
    fade_ms: u32,
}

impl<D: Document> ToastCenter<D> {
    pub fn new(doc: D, scheduler: Rc<dyn Scheduler>, config: &EnhanceConfig) -> Self {
        Self { doc, scheduler, container: None, visible_ms: config.toast_visible_ms, fade_ms: config.toast_fade_ms }
    }

    /// The container toasts are appended to, once it exists.
    #[must_use]
    pub fn container(&self) -> Option<&D::Node> {
        self.container.as_ref()
    }

    /// Render a toast and schedule its dismissal. Returns the banner node.
    pub fn show(&mut self, message: &str, severity: Severity) -> Option<D::Node> {
        let Some(container) = self.ensure_container() else {
            log::warn!("toast container unavailable; dropping toast: {message}");
            return None;
        };
        let toast = self.render(message, severity)?;
        self.doc.append_child(&container, &toast);
        self.schedule_dismissal(toast.clone());
        Some(toast)
    }

    fn ensure_container(&mut self) -> Option<D::Node> {
        if let Some(existing) = self.doc.element_by_id(TOAST_CONTAINER_ID) {
            self.container = Some(existing.clone());
            return Some(existing);
        }
        let container = create_with_class(&self.doc, "div", CONTAINER_CLASS)?;
        self.doc.set_attribute(&container, "id", TOAST_CONTAINER_ID);
        self.doc.set_style(&container, "z-index", "9999");
        self.doc.append_to_body(&container);
        self.container = Some(container.clone());
        Some(container)
    }

    fn render(&self, message: &str, severity: Severity) -> Option<D::Node> {
        let doc = &self.doc;
        let class = format!("toast align-items-center text-white bg-{} border-0 {SHOW_CLASS}", severity.as_str());
        let toast = create_with_class(doc, "div", &class)?;
        doc.set_attribute(&toast, "role", "alert");

        let row = create_with_class(doc, "div", "d-flex")?;
        let body = create_with_class(doc, "div", "toast-body")?;
        let icon = create_with_class(doc, "i", &format!("fas fa-{} me-2", severity.icon()))?;
        let text = doc.create_element("span")?;
        doc.set_text(&text, message);
        doc.append_child(&body, &icon);
        doc.append_child(&body, &text);

        let close = create_with_class(doc, "button", "btn-close btn-close-white me-2 m-auto")?;
        doc.set_attribute(&close, "type", "button");
        doc.set_attribute(&close, "data-bs-dismiss", "toast");
        doc.set_attribute(&close, "aria-label", "Close");

        doc.append_child(&row, &body);
        doc.append_child(&row, &close);
        doc.append_child(&toast, &row);
        Some(toast)
    }

    fn schedule_dismissal(&self, toast: D::Node) {
        let doc = self.doc.clone();
        let scheduler = Rc::clone(&self.scheduler);
        let fade_ms = self.fade_ms;
        self.scheduler.after(
            self.visible_ms,
            Box::new(move || {
                doc.remove_class(&toast, SHOW_CLASS);
                scheduler.after(fade_ms, Box::new(move || doc.remove(&toast)));
            }),
        );
    }
}
