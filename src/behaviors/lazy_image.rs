//! Deferred image loading.
//!
//! Images carry their real URL in `data-src`. When one scrolls into view the
//! URL moves to `src`, the image gets the `loaded` class, and it is no longer
//! observed. Without a visibility observer nothing happens and the
//! placeholders stay as rendered.

#[cfg(test)]
#[path = "lazy_image_test.rs"]
mod lazy_image_test;

use std::rc::Rc;

use crate::capability::VisibilityObserver;
use crate::consts::{LAZY_IMAGE_THRESHOLD, LOADED_CLASS};
use crate::dom::Document;

pub const DEFERRED_SOURCE_ATTR: &str = "data-src";

/// Start watching `images`. Returns how many were handed to the observer.
pub fn observe<D: Document>(
    doc: &D,
    images: Vec<D::Node>,
    observer: Option<&Rc<dyn VisibilityObserver<D::Node>>>,
) -> usize {
    let Some(observer) = observer else {
        if !images.is_empty() {
            log::warn!("visibility observation unavailable; {} lazy images left as placeholders", images.len());
        }
        return 0;
    };
    let count = images.len();
    if count > 0 {
        let doc = doc.clone();
        observer.observe_once(images, LAZY_IMAGE_THRESHOLD, Rc::new(move |image: &D::Node| load(&doc, image)));
    }
    count
}

/// Swap the deferred source into place.
pub fn load<D: Document>(doc: &D, image: &D::Node) {
    let Some(src) = doc.attribute(image, DEFERRED_SOURCE_ATTR) else {
        log::debug!("lazy image lost its {DEFERRED_SOURCE_ATTR} before loading");
        return;
    };
    doc.set_attribute(image, "src", &src);
    doc.add_class(image, LOADED_CLASS);
}
