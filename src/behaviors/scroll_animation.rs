//! One-shot entrance animations for `.animate-on-scroll` elements.

#[cfg(test)]
#[path = "scroll_animation_test.rs"]
mod scroll_animation_test;

use std::rc::Rc;

use crate::capability::VisibilityObserver;
use crate::consts::{ANIMATED_CLASS, FADE_IN_UP_CLASS};
use crate::dom::Document;

/// Watch `elements` and animate each the first time `threshold` of it is visible.
pub fn observe<D: Document>(
    doc: &D,
    elements: Vec<D::Node>,
    threshold: f64,
    observer: Option<&Rc<dyn VisibilityObserver<D::Node>>>,
) -> usize {
    let Some(observer) = observer else {
        if !elements.is_empty() {
            log::warn!("visibility observation unavailable; skipping scroll animations");
        }
        return 0;
    };
    let count = elements.len();
    if count > 0 {
        let doc = doc.clone();
        observer.observe_once(
            elements,
            threshold,
            Rc::new(move |element: &D::Node| {
                doc.add_class(element, ANIMATED_CLASS);
                doc.add_class(element, FADE_IN_UP_CLASS);
            }),
        );
    }
    count
}
