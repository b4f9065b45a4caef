//! Page enhancement controller for the academy site.
//!
//! This crate is compiled to WebAssembly and loaded once per page. It wires a
//! fixed set of small UI behaviors (smooth anchors, navbar state, lazy images,
//! toasts, star ratings, and so on) onto server-rendered markup. All behavior
//! logic runs against the [`dom::Document`] trait and the injected
//! [`capability::Capabilities`], so it is tested natively against an
//! in-memory document. The `browser` feature adds the `web-sys` host that
//! binds those traits to the real page.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`controller`] | [`controller::Enhancer`], the single owner of all page state |
//! | [`bindings`] | Declarative selector → behavior table and the listeners it yields |
//! | [`behaviors`] | One module per behavior |
//! | [`dom`] | Document abstraction the behaviors are written against |
//! | [`capability`] | Visibility, clipboard, timer, and widget-toolkit providers |
//! | [`config`] | Tunable thresholds, delays, and messages |
//! | [`consts`] | Default values and shared class/selector names |
//! | `browser` | `web-sys` host and wasm exports (feature `browser`) |

pub mod behaviors;
pub mod bindings;
pub mod capability;
pub mod config;
pub mod consts;
pub mod controller;
pub mod dom;

#[cfg(feature = "browser")]
pub mod browser;

#[cfg(test)]
pub(crate) mod testing;

pub use behaviors::reading_time::estimate_reading_time;
pub use behaviors::toast::Severity;
pub use config::EnhanceConfig;
pub use controller::Enhancer;
