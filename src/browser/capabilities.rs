//! Runtime providers backed by browser APIs.
//!
//! Each optional provider is feature-detected on the window at startup.
//! Bootstrap is reached through `js_sys::Reflect` because the `bootstrap`
//! global may be missing on pages that do not load it.

use std::rc::Rc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use gloo_timers::callback::Timeout;
use js_sys::{Array, Function, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Window};

use super::{WebDocument, describe_js};
use crate::capability::{
    Capabilities, ClipboardError, ClipboardWriter, Scheduler, Task, VisibilityObserver, VisibleCallback,
    WidgetToolkit,
};

/// Probe the window and collect every provider it supports.
pub fn detect(window: &Window) -> Capabilities<WebDocument> {
    let mut caps = Capabilities::minimal(Rc::new(TimeoutScheduler));
    if has_global(window, "IntersectionObserver") {
        caps.visibility = Some(Rc::new(IntersectionVisibility));
    }
    if let Some(clipboard) = NavigatorClipboard::detect(window) {
        caps.clipboard = Some(Rc::new(clipboard));
    }
    if let Some(toolkit) = BootstrapToolkit::detect(window) {
        caps.toolkit = Some(Rc::new(toolkit));
    }
    caps
}

fn has_global(window: &Window, name: &str) -> bool {
    Reflect::has(window, &JsValue::from_str(name)).unwrap_or(false)
}

fn property(target: &JsValue, name: &str) -> Option<JsValue> {
    match Reflect::get(target, &JsValue::from_str(name)) {
        Ok(value) if !value.is_undefined() && !value.is_null() => Some(value),
        Ok(_) => None,
        Err(err) => {
            log::debug!("reading `{name}` failed: {}", describe_js(&err));
            None
        }
    }
}

// =============================================================
// Timers
// =============================================================

/// `setTimeout` via `gloo-timers`; handles are forgotten so tasks always run.
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    fn after(&self, delay_ms: u32, task: Task) {
        Timeout::new(delay_ms, task).forget();
    }
}

// =============================================================
// Visibility
// =============================================================

pub struct IntersectionVisibility;

impl VisibilityObserver<Element> for IntersectionVisibility {
    fn observe_once(&self, targets: Vec<Element>, threshold: f64, on_visible: VisibleCallback<Element>) {
        let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Some(entry) = entry.dyn_ref::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                observer.unobserve(&target);
                on_visible(&target);
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        let observer = match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => observer,
            Err(err) => {
                log::warn!("IntersectionObserver rejected: {}", describe_js(&err));
                return;
            }
        };
        for target in &targets {
            observer.observe(target);
        }
        callback.forget();
    }
}

// =============================================================
// Clipboard
// =============================================================

pub struct NavigatorClipboard {
    clipboard: web_sys::Clipboard,
}

impl NavigatorClipboard {
    /// `navigator.clipboard` is absent outside secure contexts.
    pub fn detect(window: &Window) -> Option<Self> {
        let clipboard = property(&window.navigator(), "clipboard")?;
        clipboard
            .dyn_ref::<web_sys::Clipboard>()
            .cloned()
            .map(|clipboard| Self { clipboard })
    }
}

impl ClipboardWriter for NavigatorClipboard {
    fn write_text(&self, text: &str) -> LocalBoxFuture<'static, Result<(), ClipboardError>> {
        let promise = self.clipboard.write_text(text);
        async move {
            match JsFuture::from(promise).await {
                Ok(_) => Ok(()),
                Err(err) => Err(ClipboardError::Rejected(describe_js(&err))),
            }
        }
        .boxed_local()
    }
}

// =============================================================
// Bootstrap
// =============================================================

pub struct BootstrapToolkit {
    bootstrap: JsValue,
}

impl BootstrapToolkit {
    pub fn detect(window: &Window) -> Option<Self> {
        property(window, "bootstrap").map(|bootstrap| Self { bootstrap })
    }

    fn component(&self, name: &str) -> Option<Function> {
        let value = property(&self.bootstrap, name)?;
        value.dyn_ref::<Function>().cloned()
    }

    /// `new bootstrap[component](node)`
    fn construct(&self, component: &str, node: &Element) {
        let Some(ctor) = self.component(component) else {
            log::debug!("bootstrap.{component} unavailable");
            return;
        };
        if let Err(err) = Reflect::construct(&ctor, &Array::of1(node)) {
            log::debug!("new bootstrap.{component} failed: {}", describe_js(&err));
        }
    }

    /// `bootstrap[component][method](node)`, `None` when it yields nothing.
    fn call_static(&self, component: &str, method: &str, node: &Element) -> Option<JsValue> {
        let ctor = self.component(component)?;
        let method_fn = property(&ctor, method)?.dyn_ref::<Function>().cloned()?;
        match method_fn.call1(&ctor, node) {
            Ok(value) if !value.is_undefined() && !value.is_null() => Some(value),
            Ok(_) => None,
            Err(err) => {
                log::debug!("bootstrap.{component}.{method} failed: {}", describe_js(&err));
                None
            }
        }
    }

    fn invoke(instance: &JsValue, method: &str) {
        let Some(method_fn) = property(instance, method).and_then(|f| f.dyn_ref::<Function>().cloned()) else {
            return;
        };
        if let Err(err) = method_fn.call0(instance) {
            log::debug!("{method}() failed: {}", describe_js(&err));
        }
    }
}

impl WidgetToolkit<Element> for BootstrapToolkit {
    fn create_tooltip(&self, node: &Element) {
        self.construct("Tooltip", node);
    }

    fn create_popover(&self, node: &Element) {
        self.construct("Popover", node);
    }

    fn hide_modal(&self, node: &Element) -> bool {
        let Some(modal) = self.call_static("Modal", "getInstance", node) else {
            return false;
        };
        Self::invoke(&modal, "hide");
        true
    }

    fn close_alert(&self, node: &Element) {
        if let Some(alert) = self.call_static("Alert", "getOrCreateInstance", node) {
            Self::invoke(&alert, "close");
        }
    }
}
