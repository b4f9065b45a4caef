//! Scroll progress bar pinned to the top of the viewport.

#[cfg(test)]
#[path = "progress_test.rs"]
mod progress_test;

use crate::consts::PROGRESS_BAR_ID;
use crate::dom::{Document, ScrollMetrics, apply_styles};

const BAR_STYLES: &[(&str, &str)] = &[
    ("position", "fixed"),
    ("top", "0"),
    ("left", "0"),
    ("height", "3px"),
    ("background", "linear-gradient(90deg, #3b82f6, #2563eb)"),
    ("z-index", "9999"),
    ("transition", "width 0.3s"),
    ("width", "0%"),
];

/// Fraction of the page scrolled, as a percentage in `0..=100`.
///
/// A page that cannot scroll reports 0.
#[must_use]
pub fn scroll_percent(metrics: ScrollMetrics) -> f64 {
    let max = metrics.max_offset();
    if max <= 0.0 || !max.is_finite() || !metrics.offset.is_finite() {
        return 0.0;
    }
    (metrics.offset / max * 100.0).clamp(0.0, 100.0)
}

pub struct ProgressBar<N> {
    bar: Option<N>,
}

impl<N: Clone> Default for ProgressBar<N> {
    fn default() -> Self {
        Self { bar: None }
    }
}

impl<N: Clone> ProgressBar<N> {
    pub fn create<D: Document<Node = N>>(&mut self, doc: &D) -> Option<N> {
        if let Some(bar) = &self.bar {
            return Some(bar.clone());
        }
        let bar = doc.create_element("div")?;
        doc.set_attribute(&bar, "id", PROGRESS_BAR_ID);
        apply_styles(doc, &bar, BAR_STYLES);
        doc.append_to_body(&bar);
        self.bar = Some(bar.clone());
        Some(bar)
    }

    /// Update the bar width. Returns the percentage applied.
    pub fn on_scroll<D: Document<Node = N>>(&self, doc: &D, metrics: ScrollMetrics) -> f64 {
        let percent = scroll_percent(metrics);
        if let Some(bar) = &self.bar {
            doc.set_style(bar, "width", &format!("{percent}%"));
        }
        percent
    }
}
