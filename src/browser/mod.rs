//! Browser host: binds [`Enhancer`] to the live page.
//!
//! Runs once when the wasm module is instantiated. Installs `console_log`,
//! waits for `DOMContentLoaded` if the document is still loading, then reads
//! the page config, initializes the controller and attaches one DOM listener
//! per [`Listener`] plus window-level scroll and keydown handlers. The
//! controller lives in an `Rc<RefCell<_>>` shared by those closures.

mod capabilities;
mod document;

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Object, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{AddEventListenerOptions, Event, EventTarget, KeyboardEvent, Window};

pub use capabilities::{BootstrapToolkit, IntersectionVisibility, NavigatorClipboard, TimeoutScheduler};
pub use document::WebDocument;

use crate::behaviors::keyboard::{KeyChord, Modifiers};
use crate::behaviors::toast::{Severity, ToastCenter};
use crate::bindings::{self, Listener};
use crate::config::EnhanceConfig;
use crate::controller::{Enhancer, copy_and_report};
use crate::dom::EventResponse;

type Shared = Rc<RefCell<Enhancer<WebDocument>>>;

/// Error raised while starting the host.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("no global `window`")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for HostError {
    fn from(err: JsValue) -> Self {
        Self::Js(describe_js(&err))
    }
}

/// Best-effort message for a thrown JS value.
pub(crate) fn describe_js(err: &JsValue) -> String {
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

// =============================================================
// Entry points
// =============================================================

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    init_logging();

    if let Err(err) = boot() {
        log::error!("page enhancements failed to start: {err}");
    }
}

/// Show a toast using the page config. `severity` defaults to `info`.
#[wasm_bindgen(js_name = showToast)]
pub fn show_toast(message: &str, severity: Option<String>) {
    if let Err(err) = show_standalone_toast(message, parse_severity(severity.as_deref())) {
        log::warn!("showToast failed: {err}");
    }
}

/// Minutes to read `text` at 200 words per minute.
#[wasm_bindgen(js_name = estimateReadingTime)]
pub fn estimate_reading_time(text: &str) -> u32 {
    crate::estimate_reading_time(text)
}

fn parse_severity(name: Option<&str>) -> Severity {
    name.map_or(Severity::Info, Severity::from_name)
}

fn show_standalone_toast(message: &str, severity: Severity) -> Result<(), HostError> {
    let window = web_sys::window().ok_or(HostError::NoWindow)?;
    let doc = WebDocument::new(window)?;
    let config = EnhanceConfig::from_document(&doc);
    let mut toasts = ToastCenter::new(doc, Rc::new(TimeoutScheduler), &config);
    if toasts.show(message, severity).is_none() {
        log::debug!("toast not rendered");
    }
    Ok(())
}

// =============================================================
// Startup
// =============================================================

/// Install the console logger at the default level. The page config may
/// change the level once the document has been parsed.
fn init_logging() {
    if let Err(err) = console_log::init_with_level(log::Level::Trace) {
        web_sys::console::warn_1(&JsValue::from_str(&format!("logger already installed: {err}")));
    }
    log::set_max_level(EnhanceConfig::default().level_filter());
}

fn boot() -> Result<(), HostError> {
    let window = web_sys::window().ok_or(HostError::NoWindow)?;
    let document = window.document().ok_or(HostError::NoDocument)?;
    if document.ready_state() != "loading" {
        return enhance(window);
    }

    let on_ready = Closure::once(move || {
        if let Err(err) = enhance(window) {
            log::error!("page enhancements failed to start: {err}");
        }
    });
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    document.add_event_listener_with_callback_and_add_event_listener_options(
        "DOMContentLoaded",
        on_ready.as_ref().unchecked_ref(),
        &options,
    )?;
    on_ready.forget();
    Ok(())
}

fn enhance(window: Window) -> Result<(), HostError> {
    let doc = WebDocument::new(window.clone())?;
    let config = EnhanceConfig::from_document(&doc);
    log::set_max_level(config.level_filter());
    let caps = capabilities::detect(&window);
    let enhancer: Shared = Rc::new(RefCell::new(Enhancer::new(doc.clone(), config, caps)));

    let (listeners, _) = enhancer.borrow_mut().initialize();
    let attached = bindings::attach_each(listeners, |listener| attach_listener(&enhancer, listener));
    log::debug!("attached {attached} listeners");
    attach_scroll(&window, &enhancer)?;
    attach_keydown(doc.raw(), &enhancer)?;
    install_global(&window, &enhancer)?;
    Ok(())
}

// =============================================================
// Listeners
// =============================================================

fn apply_response(event: &Event, response: EventResponse) {
    if response.prevent_default {
        event.prevent_default();
    }
    if response.stop_propagation {
        event.stop_propagation();
    }
}

fn attach_listener(enhancer: &Shared, listener: Listener<web_sys::Element>) -> Result<(), HostError> {
    let target = listener.node().clone();
    let event_name = listener.event().as_str();
    let shared = Rc::clone(enhancer);
    let callback = Closure::wrap(Box::new(move |event: Event| {
        let reaction = match shared.try_borrow_mut() {
            Ok(mut enhancer) => enhancer.handle(&listener),
            Err(_) => {
                log::debug!("{event_name} ignored: controller busy");
                return;
            }
        };
        apply_response(&event, reaction.response);
        if let Some(request) = reaction.copy {
            spawn_local(copy_and_report(Rc::clone(&shared), request));
        }
    }) as Box<dyn FnMut(Event)>);

    target.add_event_listener_with_callback(event_name, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

fn attach_scroll(window: &Window, enhancer: &Shared) -> Result<(), HostError> {
    let shared = Rc::clone(enhancer);
    let callback = Closure::wrap(Box::new(move || {
        if let Ok(mut enhancer) = shared.try_borrow_mut() {
            enhancer.on_scroll();
        }
    }) as Box<dyn FnMut()>);

    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    window.add_event_listener_with_callback_and_add_event_listener_options(
        "scroll",
        callback.as_ref().unchecked_ref(),
        &options,
    )?;
    callback.forget();
    Ok(())
}

fn attach_keydown(target: &EventTarget, enhancer: &Shared) -> Result<(), HostError> {
    let shared = Rc::clone(enhancer);
    let callback = Closure::wrap(Box::new(move |event: KeyboardEvent| {
        let chord = KeyChord::new(
            event.key(),
            Modifiers {
                shift: event.shift_key(),
                ctrl: event.ctrl_key(),
                alt: event.alt_key(),
                meta: event.meta_key(),
            },
        );
        let response = match shared.try_borrow() {
            Ok(enhancer) => enhancer.on_key_down(&chord),
            Err(_) => return,
        };
        apply_response(&event, response);
    }) as Box<dyn FnMut(KeyboardEvent)>);

    target.add_event_listener_with_callback("keydown", callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

// =============================================================
// window.AcademyUI
// =============================================================

fn install_global(window: &Window, enhancer: &Shared) -> Result<(), HostError> {
    let shared = Rc::clone(enhancer);
    let show_toast = Closure::wrap(Box::new(move |message: String, severity: Option<String>| {
        match shared.try_borrow_mut() {
            Ok(mut enhancer) => {
                enhancer.show_toast(&message, parse_severity(severity.as_deref()));
            }
            Err(_) => log::debug!("showToast ignored: controller busy"),
        }
    }) as Box<dyn FnMut(String, Option<String>)>);

    let shared = Rc::clone(enhancer);
    let estimate = Closure::wrap(Box::new(move |text: String| -> u32 {
        shared
            .try_borrow()
            .map_or_else(|_| crate::estimate_reading_time(&text), |enhancer| enhancer.estimate_reading_time(&text))
    }) as Box<dyn FnMut(String) -> u32>);

    let api = Object::new();
    Reflect::set(&api, &JsValue::from_str("showToast"), show_toast.as_ref())?;
    Reflect::set(&api, &JsValue::from_str("estimateReadingTime"), estimate.as_ref())?;
    Reflect::set(window, &JsValue::from_str("AcademyUI"), &api)?;
    show_toast.forget();
    estimate.forget();
    Ok(())
}
