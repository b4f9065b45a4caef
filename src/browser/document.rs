//! [`Document`] over the live `web_sys` DOM.
//!
//! Failed DOM calls (rejected selectors, detached nodes) are logged at
//! `debug` and read as "nothing there".

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Element, HtmlElement, HtmlFormElement, HtmlInputElement, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, ScrollToOptions, Window,
};

use super::HostError;
use crate::dom::{Document, ScrollMetrics};

fn attempt<T>(op: &str, result: Result<T, JsValue>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            log::debug!("{op} failed: {err:?}");
            None
        }
    }
}

fn elements(list: Option<web_sys::NodeList>) -> Vec<Element> {
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_ref::<Element>().cloned())
        .collect()
}

#[derive(Clone)]
pub struct WebDocument {
    window: Window,
    document: web_sys::Document,
}

impl WebDocument {
    pub fn new(window: Window) -> Result<Self, HostError> {
        let document = window.document().ok_or(HostError::NoDocument)?;
        Ok(Self { window, document })
    }

    #[must_use]
    pub fn raw(&self) -> &web_sys::Document {
        &self.document
    }
}

impl Document for WebDocument {
    type Node = Element;

    fn query(&self, selector: &str) -> Option<Element> {
        attempt("querySelector", self.document.query_selector(selector)).flatten()
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        elements(attempt("querySelectorAll", self.document.query_selector_all(selector)))
    }

    fn query_within(&self, root: &Element, selector: &str) -> Vec<Element> {
        elements(attempt("querySelectorAll", root.query_selector_all(selector)))
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn closest(&self, node: &Element, selector: &str) -> Option<Element> {
        attempt("closest", node.closest(selector)).flatten()
    }

    fn create_element(&self, tag: &str) -> Option<Element> {
        attempt("createElement", self.document.create_element(tag))
    }

    fn append_child(&self, parent: &Element, child: &Element) {
        attempt("appendChild", parent.append_child(child));
    }

    fn append_to_body(&self, child: &Element) {
        match self.document.body() {
            Some(body) => {
                attempt("appendChild", body.append_child(child));
            }
            None => log::debug!("document has no body"),
        }
    }

    fn remove(&self, node: &Element) {
        node.remove();
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        attempt("setAttribute", node.set_attribute(name, value));
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&self, node: &Element, class: &str) {
        attempt("classList.add", node.class_list().add_1(class));
    }

    fn remove_class(&self, node: &Element, class: &str) {
        attempt("classList.remove", node.class_list().remove_1(class));
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        if let Some(el) = node.dyn_ref::<HtmlElement>() {
            attempt("style.setProperty", el.style().set_property(property, value));
        }
    }

    fn text_content(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn value(&self, node: &Element) -> Option<String> {
        node.dyn_ref::<HtmlInputElement>().map(HtmlInputElement::value)
    }

    fn set_value(&self, node: &Element, value: &str) {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        }
    }

    fn check_validity(&self, form: &Element) -> bool {
        form.dyn_ref::<HtmlFormElement>()
            .map_or(true, HtmlFormElement::check_validity)
    }

    fn focus(&self, node: &Element) {
        if let Some(el) = node.dyn_ref::<HtmlElement>() {
            attempt("focus", el.focus());
        }
    }

    fn scroll_into_view(&self, node: &Element) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        node.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn scroll_to_top(&self) {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        let offset = attempt("scrollY", self.window.scroll_y()).unwrap_or_default();
        let (scroll_height, client_height) = self
            .document
            .document_element()
            .map_or((0, 0), |root| (root.scroll_height(), root.client_height()));
        ScrollMetrics::new(offset, f64::from(scroll_height), f64::from(client_height))
    }
}
