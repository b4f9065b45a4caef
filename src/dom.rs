//! Document abstraction the behaviors are written against.
//!
//! Every behavior reaches the page only through [`Document`]. The browser
//! host implements it over `web_sys::Document`; tests implement it over an
//! in-memory tree. Operations are infallible from the caller's point of view:
//! a missing node or a rejected selector reads as "nothing there", matching
//! how the behaviors treat missing targets.

/// Scroll position and document extent at the time of a scroll event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// Vertical scroll offset of the page, in CSS pixels.
    pub offset: f64,
    /// Full height of the document element.
    pub scroll_height: f64,
    /// Height of the viewport.
    pub client_height: f64,
}

impl ScrollMetrics {
    #[must_use]
    pub fn new(offset: f64, scroll_height: f64, client_height: f64) -> Self {
        Self { offset, scroll_height, client_height }
    }

    /// Largest reachable offset. Zero or negative when the page cannot scroll.
    #[must_use]
    pub fn max_offset(&self) -> f64 {
        self.scroll_height - self.client_height
    }
}

/// What the host should do with the DOM event that triggered a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventResponse {
    pub prevent_default: bool,
    pub stop_propagation: bool,
}

impl EventResponse {
    /// Let the event proceed untouched.
    #[must_use]
    pub fn proceed() -> Self {
        Self::default()
    }

    /// Suppress the browser's default action.
    #[must_use]
    pub fn prevent() -> Self {
        Self { prevent_default: true, stop_propagation: false }
    }

    /// Suppress the default action and stop propagation.
    #[must_use]
    pub fn block() -> Self {
        Self { prevent_default: true, stop_propagation: true }
    }
}

/// Handle to the page document.
///
/// Implementors are cheap to clone; deferred callbacks capture a clone.
pub trait Document: Clone + 'static {
    /// Element handle.
    type Node: Clone + PartialEq + std::fmt::Debug + 'static;

    // --- Queries ---

    fn query(&self, selector: &str) -> Option<Self::Node>;
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;
    /// Descendants of `root` matching `selector`, in document order.
    fn query_within(&self, root: &Self::Node, selector: &str) -> Vec<Self::Node>;
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;
    /// Nearest inclusive ancestor of `node` matching `selector`.
    fn closest(&self, node: &Self::Node, selector: &str) -> Option<Self::Node>;

    // --- Tree mutation ---

    fn create_element(&self, tag: &str) -> Option<Self::Node>;
    fn append_child(&self, parent: &Self::Node, child: &Self::Node);
    fn append_to_body(&self, child: &Self::Node);
    fn remove(&self, node: &Self::Node);

    // --- Attributes, classes, style, text ---

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn add_class(&self, node: &Self::Node, class: &str);
    fn remove_class(&self, node: &Self::Node, class: &str);
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);
    fn text_content(&self, node: &Self::Node) -> String;
    fn set_text(&self, node: &Self::Node, text: &str);

    // --- Forms ---

    /// Current value of an input element, `None` for non-inputs.
    fn value(&self, node: &Self::Node) -> Option<String>;
    fn set_value(&self, node: &Self::Node, value: &str);
    /// Native constraint validation of a form element.
    fn check_validity(&self, form: &Self::Node) -> bool;
    fn focus(&self, node: &Self::Node);

    // --- Scrolling ---

    /// Smoothly scroll `node` into view, aligned to its start edge.
    fn scroll_into_view(&self, node: &Self::Node);
    /// Smoothly scroll the window back to the top.
    fn scroll_to_top(&self);
    fn scroll_metrics(&self) -> ScrollMetrics;
}

/// Create an element and give it a class list in one step.
pub fn create_with_class<D: Document>(doc: &D, tag: &str, class: &str) -> Option<D::Node> {
    let node = doc.create_element(tag)?;
    if !class.is_empty() {
        doc.set_attribute(&node, "class", class);
    }
    Some(node)
}

/// Apply a list of inline style declarations.
pub fn apply_styles<D: Document>(doc: &D, node: &D::Node, styles: &[(&str, &str)]) {
    for (property, value) in styles {
        doc.set_style(node, property, value);
    }
}
