//! Declarative selector → behavior table.
//!
//! [`collect`] runs every selector in [`BINDINGS`] once against the document
//! and groups the matches by behavior. The controller applies the groups in
//! a single pass and turns the interactive ones into [`Listener`]s for the
//! host to attach.

#[cfg(test)]
#[path = "bindings_test.rs"]
mod bindings_test;

use crate::behaviors::anchor;
use crate::dom::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    SmoothAnchor,
    LazyImage,
    ScrollAnimation,
    ValidatedForm,
    CopyToClipboard,
    Tooltip,
    Popover,
    ReadingTime,
    StarRating,
}

#[derive(Debug, Clone, Copy)]
pub struct Binding {
    pub selector: &'static str,
    pub behavior: Behavior,
}

pub const BINDINGS: &[Binding] = &[
    Binding { selector: "a[href]", behavior: Behavior::SmoothAnchor },
    Binding { selector: "img[data-src]", behavior: Behavior::LazyImage },
    Binding { selector: ".animate-on-scroll", behavior: Behavior::ScrollAnimation },
    Binding { selector: "form[data-validate]", behavior: Behavior::ValidatedForm },
    Binding { selector: "[data-copy]", behavior: Behavior::CopyToClipboard },
    Binding { selector: "[data-bs-toggle=\"tooltip\"]", behavior: Behavior::Tooltip },
    Binding { selector: "[data-bs-toggle=\"popover\"]", behavior: Behavior::Popover },
    Binding { selector: "[data-reading-time]", behavior: Behavior::ReadingTime },
    Binding { selector: ".star-rating", behavior: Behavior::StarRating },
];

impl Behavior {
    /// Extra filtering a selector cannot express on its own.
    pub fn accepts<D: Document>(self, doc: &D, node: &D::Node) -> bool {
        match self {
            // Placeholder links (`#`, `#!`) keep their default behavior.
            Self::SmoothAnchor => doc
                .attribute(node, "href")
                .is_some_and(|href| anchor::scroll_target(&href).is_some()),
            _ => true,
        }
    }
}

/// Hand each listener to `attach`. A failure is logged and the remaining
/// listeners are still attached. Returns how many succeeded.
pub fn attach_each<N, E: std::fmt::Display>(
    listeners: Vec<Listener<N>>,
    mut attach: impl FnMut(Listener<N>) -> Result<(), E>,
) -> usize {
    let mut attached = 0;
    for listener in listeners {
        let event = listener.event();
        match attach(listener) {
            Ok(()) => attached += 1,
            Err(err) => log::warn!("{} listener not attached: {err}", event.as_str()),
        }
    }
    attached
}

/// Nodes matched for one behavior, in document order.
#[derive(Debug, Clone)]
pub struct Matched<N> {
    pub behavior: Behavior,
    pub nodes: Vec<N>,
}

pub fn collect<D: Document>(doc: &D) -> Vec<Matched<D::Node>> {
    BINDINGS
        .iter()
        .map(|binding| Matched {
            behavior: binding.behavior,
            nodes: doc
                .query_all(binding.selector)
                .into_iter()
                .filter(|node| binding.behavior.accepts(doc, node))
                .collect(),
        })
        .collect()
}

/// DOM event types a [`Listener`] attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Click,
    Submit,
    MouseEnter,
    MouseLeave,
}

impl EventKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Submit => "submit",
            Self::MouseEnter => "mouseenter",
            Self::MouseLeave => "mouseleave",
        }
    }
}

/// An element event the host must forward to [`crate::controller::Enhancer::handle`].
#[derive(Debug, Clone, PartialEq)]
pub enum Listener<N> {
    AnchorClick(N),
    FormSubmit(N),
    CopyClick(N),
    StarClick { node: N, widget: usize, star: usize },
    StarHover { node: N, widget: usize, star: usize },
    RatingLeave { node: N, widget: usize },
    BackToTopClick(N),
}

impl<N> Listener<N> {
    #[must_use]
    pub fn node(&self) -> &N {
        match self {
            Self::AnchorClick(node)
            | Self::FormSubmit(node)
            | Self::CopyClick(node)
            | Self::BackToTopClick(node)
            | Self::StarClick { node, .. }
            | Self::StarHover { node, .. }
            | Self::RatingLeave { node, .. } => node,
        }
    }

    #[must_use]
    pub fn event(&self) -> EventKind {
        match self {
            Self::AnchorClick(_) | Self::CopyClick(_) | Self::BackToTopClick(_) | Self::StarClick { .. } => {
                EventKind::Click
            }
            Self::FormSubmit(_) => EventKind::Submit,
            Self::StarHover { .. } => EventKind::MouseEnter,
            Self::RatingLeave { .. } => EventKind::MouseLeave,
        }
    }
}
