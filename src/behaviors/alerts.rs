//! Delayed dismissal of flash alerts.
//!
//! The alerts are selected when the timer fires, not at initialization, so
//! alerts inserted in the meantime are closed too. Alerts marked
//! `alert-permanent` stay.

use std::rc::Rc;

use crate::capability::{Scheduler, WidgetToolkit};
use crate::consts::PERMANENT_ALERT_CLASS;
use crate::dom::Document;

pub const ALERT_SELECTOR: &str = ".alert";

/// Close every non-permanent alert now. Returns how many were closed.
pub fn dismiss_now<D: Document>(doc: &D, toolkit: &dyn WidgetToolkit<D::Node>) -> usize {
    let mut closed = 0;
    for alert in doc.query_all(ALERT_SELECTOR) {
        if doc.has_class(&alert, PERMANENT_ALERT_CLASS) {
            continue;
        }
        toolkit.close_alert(&alert);
        closed += 1;
    }
    closed
}

/// Schedule [`dismiss_now`] after `delay_ms`. Returns whether it was scheduled.
pub fn schedule<D: Document>(
    doc: &D,
    scheduler: &Rc<dyn Scheduler>,
    toolkit: Option<&Rc<dyn WidgetToolkit<D::Node>>>,
    delay_ms: u32,
) -> bool {
    let Some(toolkit) = toolkit else {
        log::warn!("widget toolkit unavailable; alerts will not auto-dismiss");
        return false;
    };
    let doc = doc.clone();
    let toolkit = Rc::clone(toolkit);
    scheduler.after(
        delay_ms,
        Box::new(move || {
            let closed = dismiss_now(&doc, &*toolkit);
            log::debug!("auto-dismissed {closed} alerts");
        }),
    );
    true
}
