//! Navbar "scrolled" styling and hide-on-scroll-down.

#[cfg(test)]
#[path = "navbar_test.rs"]
mod navbar_test;

use crate::config::EnhanceConfig;
use crate::consts::NAVBAR_SCROLLED_CLASS;
use crate::dom::Document;

const HIDDEN_TRANSFORM: &str = "translateY(-100%)";
const RESTING_TRANSFORM: &str = "translateY(0)";

/// Visual state derived from one scroll event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavbarView {
    pub scrolled: bool,
    pub hidden: bool,
}

/// Last seen scroll offset, used only to tell scroll direction.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollState {
    last_offset: f64,
}

impl ScrollState {
    #[must_use]
    pub fn last_offset(&self) -> f64 {
        self.last_offset
    }

    /// Fold in a new offset and return the view it implies.
    pub fn update(&mut self, offset: f64, scrolled_after: f64, hide_after: f64) -> NavbarView {
        let view = NavbarView {
            scrolled: offset > scrolled_after,
            hidden: offset > self.last_offset && offset > hide_after,
        };
        self.last_offset = offset;
        view
    }
}

pub struct NavbarController<N> {
    navbar: Option<N>,
    state: ScrollState,
    scrolled_after: f64,
    hide_after: f64,
}

impl<N: Clone> NavbarController<N> {
    /// Bind to the first `.navbar` on the page, if any.
    pub fn attach<D: Document<Node = N>>(doc: &D, config: &EnhanceConfig) -> Self {
        let navbar = doc.query(".navbar");
        if navbar.is_none() {
            log::debug!("no .navbar on page");
        }
        Self {
            navbar,
            state: ScrollState::default(),
            scrolled_after: config.navbar_scrolled_offset,
            hide_after: config.navbar_hide_offset,
        }
    }

    #[must_use]
    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn on_scroll<D: Document<Node = N>>(&mut self, doc: &D, offset: f64) -> NavbarView {
        let view = self.state.update(offset, self.scrolled_after, self.hide_after);
        if let Some(navbar) = &self.navbar {
            if view.scrolled {
                doc.add_class(navbar, NAVBAR_SCROLLED_CLASS);
            } else {
                doc.remove_class(navbar, NAVBAR_SCROLLED_CLASS);
            }
            let transform = if view.hidden { HIDDEN_TRANSFORM } else { RESTING_TRANSFORM };
            doc.set_style(navbar, "transform", transform);
        }
        view
    }
}
