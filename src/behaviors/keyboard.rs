//! Global keyboard shortcuts.
//!
//! `Ctrl+K` / `Cmd+K` jumps to the site search box and `Escape` closes
//! every open modal dialog.

#[cfg(test)]
#[path = "keyboard_test.rs"]
mod keyboard_test;

use std::rc::Rc;

use crate::capability::WidgetToolkit;
use crate::dom::{Document, EventResponse};

/// First match wins when several search boxes exist.
pub const SEARCH_INPUT_SELECTOR: &str = "input[type=\"search\"], input[name=\"q\"]";
pub const OPEN_MODAL_SELECTOR: &str = ".modal.show";

/// Modifier keys held during a key event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    /// Meta / Command key.
    pub meta: bool,
}

impl Modifiers {
    /// The "command" modifier: Ctrl on Windows/Linux, Cmd on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// A key press as reported by the browser (`KeyboardEvent.key`).
#[derive(Debug, Clone)]
pub struct KeyChord {
    pub key: String,
    pub modifiers: Modifiers,
}

impl KeyChord {
    #[must_use]
    pub fn new(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self { key: key.into(), modifiers }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    FocusSearch,
    CloseModals,
}

impl Shortcut {
    #[must_use]
    pub fn from_chord(chord: &KeyChord) -> Option<Self> {
        match chord.key.as_str() {
            "k" if chord.modifiers.command() => Some(Self::FocusSearch),
            "Escape" => Some(Self::CloseModals),
            _ => None,
        }
    }
}

pub fn on_key_down<D: Document>(
    doc: &D,
    toolkit: Option<&Rc<dyn WidgetToolkit<D::Node>>>,
    chord: &KeyChord,
) -> EventResponse {
    match Shortcut::from_chord(chord) {
        Some(Shortcut::FocusSearch) => {
            if let Some(input) = doc.query(SEARCH_INPUT_SELECTOR) {
                doc.focus(&input);
            }
            EventResponse::prevent()
        }
        Some(Shortcut::CloseModals) => {
            close_open_modals(doc, toolkit);
            EventResponse::proceed()
        }
        None => EventResponse::proceed(),
    }
}

/// Hide every open modal that has a controller. Returns how many were hidden.
pub fn close_open_modals<D: Document>(doc: &D, toolkit: Option<&Rc<dyn WidgetToolkit<D::Node>>>) -> usize {
    let Some(toolkit) = toolkit else {
        return 0;
    };
    doc.query_all(OPEN_MODAL_SELECTOR)
        .iter()
        .filter(|modal| toolkit.hide_modal(modal))
        .count()
}
