//! Tooltip and popover activation through the widget toolkit.
//!
//! Runs once at initialization; elements added to the page afterwards are
//! not enhanced.

use std::rc::Rc;

use crate::capability::WidgetToolkit;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    Tooltip,
    Popover,
}

/// Bind one widget controller per trigger. Returns how many were created.
pub fn activate<N>(kind: WidgetKind, triggers: &[N], toolkit: Option<&Rc<dyn WidgetToolkit<N>>>) -> usize {
    let Some(toolkit) = toolkit else {
        if !triggers.is_empty() {
            log::warn!("widget toolkit unavailable; {} {kind:?} triggers left inert", triggers.len());
        }
        return 0;
    };
    for trigger in triggers {
        match kind {
            WidgetKind::Tooltip => toolkit.create_tooltip(trigger),
            WidgetKind::Popover => toolkit.create_popover(trigger),
        }
    }
    triggers.len()
}
