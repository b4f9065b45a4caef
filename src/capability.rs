//! Injected providers for everything the page gets from the runtime rather
//! than from the document: visibility observation, the system clipboard,
//! deferred timers, and the Bootstrap widget toolkit.
//!
//! A provider that the runtime lacks is represented as `None` in
//! [`Capabilities`]; behaviors that need it skip themselves.

use std::rc::Rc;

use futures::future::LocalBoxFuture;

use crate::dom::Document;

/// Error returned by a [`ClipboardWriter`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClipboardError {
    /// The runtime has no clipboard API.
    #[error("clipboard is not available")]
    Unsupported,
    /// The write was rejected (permission denied, document not focused, ...).
    #[error("clipboard write rejected: {0}")]
    Rejected(String),
}

/// Called once per target the first time it becomes visible.
pub type VisibleCallback<N> = Rc<dyn Fn(&N)>;

/// A one-shot deferred task.
pub type Task = Box<dyn FnOnce()>;

/// Notifies when elements enter the viewport.
pub trait VisibilityObserver<N> {
    /// Watch `targets`; `on_visible` runs for each target the first time at
    /// least `threshold` of it is visible, after which it is no longer watched.
    fn observe_once(&self, targets: Vec<N>, threshold: f64, on_visible: VisibleCallback<N>);
}

/// Writes text to the system clipboard.
pub trait ClipboardWriter {
    fn write_text(&self, text: &str) -> LocalBoxFuture<'static, Result<(), ClipboardError>>;
}

/// Runs tasks after a delay. Scheduled tasks cannot be cancelled.
pub trait Scheduler {
    fn after(&self, delay_ms: u32, task: Task);
}

/// Tooltip, popover, modal, and alert controllers from the UI toolkit.
pub trait WidgetToolkit<N> {
    fn create_tooltip(&self, node: &N);
    fn create_popover(&self, node: &N);
    /// Hide the modal bound to `node`. Returns `false` when no modal
    /// controller is attached to it.
    fn hide_modal(&self, node: &N) -> bool;
    /// Close an alert, creating its controller if needed.
    fn close_alert(&self, node: &N);
}

/// The runtime providers handed to the controller at construction.
pub struct Capabilities<D: Document> {
    pub scheduler: Rc<dyn Scheduler>,
    pub visibility: Option<Rc<dyn VisibilityObserver<D::Node>>>,
    pub clipboard: Option<Rc<dyn ClipboardWriter>>,
    pub toolkit: Option<Rc<dyn WidgetToolkit<D::Node>>>,
}

impl<D: Document> Clone for Capabilities<D> {
    fn clone(&self) -> Self {
        Self {
            scheduler: Rc::clone(&self.scheduler),
            visibility: self.visibility.clone(),
            clipboard: self.clipboard.clone(),
            toolkit: self.toolkit.clone(),
        }
    }
}

impl<D: Document> Capabilities<D> {
    /// Only a scheduler; every optional provider is absent.
    #[must_use]
    pub fn minimal(scheduler: Rc<dyn Scheduler>) -> Self {
        Self { scheduler, visibility: None, clipboard: None, toolkit: None }
    }

    /// Short summary used in the startup log line.
    #[must_use]
    pub fn describe(&self) -> String {
        let flag = |present: bool| if present { "yes" } else { "no" };
        format!(
            "visibility={} clipboard={} toolkit={}",
            flag(self.visibility.is_some()),
            flag(self.clipboard.is_some()),
            flag(self.toolkit.is_some()),
        )
    }
}
