//! Page behaviors, one module each.
//!
//! Every behavior is written against [`crate::dom::Document`] and the
//! injected [`crate::capability::Capabilities`]. None of them reaches into
//! another, except that clipboard results are reported through the toast
//! center.

pub mod alerts;
pub mod anchor;
pub mod back_to_top;
pub mod clipboard;
pub mod form;
pub mod keyboard;
pub mod lazy_image;
pub mod navbar;
pub mod progress;
pub mod reading_time;
pub mod scroll_animation;
pub mod star_rating;
pub mod toast;
pub mod widgets;
