//! Floating back-to-top button.

use crate::consts::{ANIMATED_CLASS, BACK_TO_TOP_ID, FADE_IN_UP_CLASS};
use crate::dom::{Document, apply_styles, create_with_class};

const BUTTON_STYLES: &[(&str, &str)] = &[
    ("position", "fixed"),
    ("bottom", "2rem"),
    ("right", "2rem"),
    ("z-index", "1000"),
    ("display", "none"),
    ("width", "50px"),
    ("height", "50px"),
    ("border-radius", "50%"),
    ("box-shadow", "0 4px 12px rgba(59, 130, 246, 0.4)"),
];

pub struct BackToTop<N> {
    button: Option<N>,
    show_after: f64,
}

impl<N: Clone> BackToTop<N> {
    /// Not yet created; [`BackToTop::create`] adds the button.
    #[must_use]
    pub fn detached(show_after: f64) -> Self {
        Self { button: None, show_after }
    }

    /// Append the hidden button to the body.
    pub fn create<D: Document<Node = N>>(&mut self, doc: &D) -> Option<N> {
        if let Some(button) = &self.button {
            return Some(button.clone());
        }
        let button = create_with_class(doc, "button", "btn btn-primary btn-floating")?;
        doc.set_attribute(&button, "id", BACK_TO_TOP_ID);
        doc.set_attribute(&button, "type", "button");
        doc.set_attribute(&button, "aria-label", "Back to top");
        let icon = create_with_class(doc, "i", "fas fa-arrow-up")?;
        doc.append_child(&button, &icon);
        apply_styles(doc, &button, BUTTON_STYLES);
        doc.append_to_body(&button);
        self.button = Some(button.clone());
        Some(button)
    }

    #[must_use]
    pub fn button(&self) -> Option<&N> {
        self.button.as_ref()
    }

    /// Show or hide for the current offset. Returns whether it is visible.
    pub fn on_scroll<D: Document<Node = N>>(&self, doc: &D, offset: f64) -> bool {
        let visible = offset > self.show_after;
        if let Some(button) = &self.button {
            if visible {
                doc.set_style(button, "display", "block");
                doc.add_class(button, ANIMATED_CLASS);
                doc.add_class(button, FADE_IN_UP_CLASS);
            } else {
                doc.set_style(button, "display", "none");
            }
        }
        visible
    }
}

/// Click handler for the button.
pub fn on_click<D: Document>(doc: &D) {
    doc.scroll_to_top();
}
