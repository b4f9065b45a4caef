//! In-memory document and fake capability providers for native tests.
//!
//! `FakeDocument` keeps a small element tree with attributes, inline styles,
//! and text. Its selector support covers what the behaviors use: tag, `#id`,
//! `.class`, `[attr]`, `[attr="value"]`, compound forms of those, and
//! comma-separated lists. Anything else (combinators, pseudo-classes, ids
//! starting with a digit) is treated as an invalid selector and matches
//! nothing, the same outcome the browser host reports for a rejected
//! selector.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;

use crate::capability::{
    Capabilities, ClipboardError, ClipboardWriter, Scheduler, Task, VisibilityObserver, VisibleCallback, WidgetToolkit,
};
use crate::dom::{Document, ScrollMetrics};

// =============================================================
// Document
// =============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Default)]
struct Element {
    tag: String,
    attrs: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    text: String,
    value: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    invalid: bool,
}

#[derive(Debug)]
struct Tree {
    nodes: Vec<Element>,
    root: NodeId,
    body: NodeId,
    focused: Option<NodeId>,
    metrics: ScrollMetrics,
    scrolled_into_view: Vec<NodeId>,
    scroll_to_top_calls: usize,
}

impl Tree {
    fn new() -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            body: NodeId(0),
            focused: None,
            metrics: ScrollMetrics::new(0.0, 1000.0, 1000.0),
            scrolled_into_view: Vec::new(),
            scroll_to_top_calls: 0,
        };
        let root = tree.alloc("html");
        let body = tree.alloc("body");
        tree.attach(root, body);
        tree.root = root;
        tree.body = body;
        tree
    }

    fn alloc(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Element { tag: tag.to_ascii_lowercase(), ..Element::default() });
        id
    }

    fn el(&self, id: NodeId) -> Option<&Element> {
        self.nodes.get(id.0)
    }

    fn el_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(id.0)
    }

    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.el(id).and_then(|el| el.parent) else {
            return;
        };
        if let Some(parent_el) = self.el_mut(parent) {
            parent_el.children.retain(|child| *child != id);
        }
        if let Some(el) = self.el_mut(id) {
            el.parent = None;
        }
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        if let Some(parent_el) = self.el_mut(parent) {
            parent_el.children.push(child);
        }
        if let Some(el) = self.el_mut(child) {
            el.parent = Some(parent);
        }
    }

    fn descendants(&self, root: NodeId, out: &mut Vec<NodeId>) {
        let Some(el) = self.el(root) else {
            return;
        };
        for child in &el.children {
            out.push(*child);
            self.descendants(*child, out);
        }
    }

    fn is_attached(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == self.root {
                return true;
            }
            current = self.el(node).and_then(|el| el.parent);
        }
        false
    }

    fn text_of(&self, id: NodeId) -> String {
        let Some(el) = self.el(id) else {
            return String::new();
        };
        let mut text = el.text.clone();
        for child in &el.children {
            text.push_str(&self.text_of(*child));
        }
        text
    }

    fn classes(&self, id: NodeId) -> Vec<String> {
        self.el(id)
            .and_then(|el| el.attrs.get("class"))
            .map(|class| class.split_whitespace().map(str::to_owned).collect())
            .unwrap_or_default()
    }

    fn matches(&self, id: NodeId, selector: &[Compound]) -> bool {
        let Some(el) = self.el(id) else {
            return false;
        };
        let classes = self.classes(id);
        selector.iter().any(|compound| compound.matches(el, &classes))
    }
}

/// Cheap-to-clone handle to a shared in-memory tree.
#[derive(Debug, Clone)]
pub struct FakeDocument {
    tree: Rc<RefCell<Tree>>,
}

impl Default for FakeDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeDocument {
    pub fn new() -> Self {
        Self { tree: Rc::new(RefCell::new(Tree::new())) }
    }

    pub fn body(&self) -> NodeId {
        self.tree.borrow().body
    }

    /// Append a new element under `parent` with the given attributes.
    pub fn add(&self, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        let mut tree = self.tree.borrow_mut();
        let id = tree.alloc(tag);
        if let Some(el) = tree.el_mut(id) {
            for (name, value) in attrs {
                el.attrs.insert((*name).to_owned(), (*value).to_owned());
            }
            if el.tag == "input" {
                el.value = Some(el.attrs.get("value").cloned().unwrap_or_default());
            }
        }
        tree.attach(parent, id);
        id
    }

    /// Append a new element with text content under `parent`.
    pub fn add_text(&self, parent: NodeId, tag: &str, attrs: &[(&str, &str)], text: &str) -> NodeId {
        let id = self.add(parent, tag, attrs);
        if let Some(el) = self.tree.borrow_mut().el_mut(id) {
            el.text = text.to_owned();
        }
        id
    }

    pub fn set_invalid(&self, form: NodeId) {
        if let Some(el) = self.tree.borrow_mut().el_mut(form) {
            el.invalid = true;
        }
    }

    pub fn set_metrics(&self, metrics: ScrollMetrics) {
        self.tree.borrow_mut().metrics = metrics;
    }

    pub fn set_offset(&self, offset: f64) {
        self.tree.borrow_mut().metrics.offset = offset;
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.tree.borrow().el(node).and_then(|el| el.styles.get(property).cloned())
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.tree.borrow().el(node).map(|el| el.children.clone()).unwrap_or_default()
    }

    pub fn is_attached(&self, node: NodeId) -> bool {
        self.tree.borrow().is_attached(node)
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.tree.borrow().focused
    }

    pub fn scrolled_into_view(&self) -> Vec<NodeId> {
        self.tree.borrow().scrolled_into_view.clone()
    }

    pub fn scroll_to_top_calls(&self) -> usize {
        self.tree.borrow().scroll_to_top_calls
    }

    fn select(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        let Some(parsed) = parse_selector_list(selector) else {
            return Vec::new();
        };
        let tree = self.tree.borrow();
        let mut all = Vec::new();
        tree.descendants(root, &mut all);
        all.into_iter().filter(|id| tree.matches(*id, &parsed)).collect()
    }
}

impl Document for FakeDocument {
    type Node = NodeId;

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.query_all(selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        let root = self.tree.borrow().root;
        self.select(root, selector)
    }

    fn query_within(&self, root: &NodeId, selector: &str) -> Vec<NodeId> {
        self.select(*root, selector)
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let tree = self.tree.borrow();
        let mut all = Vec::new();
        tree.descendants(tree.root, &mut all);
        all.into_iter()
            .find(|node| tree.el(*node).is_some_and(|el| el.attrs.get("id").is_some_and(|v| v == id)))
    }

    fn closest(&self, node: &NodeId, selector: &str) -> Option<NodeId> {
        let parsed = parse_selector_list(selector)?;
        let tree = self.tree.borrow();
        let mut current = Some(*node);
        while let Some(id) = current {
            if tree.matches(id, &parsed) {
                return Some(id);
            }
            current = tree.el(id).and_then(|el| el.parent);
        }
        None
    }

    fn create_element(&self, tag: &str) -> Option<NodeId> {
        let mut tree = self.tree.borrow_mut();
        let id = tree.alloc(tag);
        if tag.eq_ignore_ascii_case("input") {
            if let Some(el) = tree.el_mut(id) {
                el.value = Some(String::new());
            }
        }
        Some(id)
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) {
        self.tree.borrow_mut().attach(*parent, *child);
    }

    fn append_to_body(&self, child: &NodeId) {
        let body = self.body();
        self.tree.borrow_mut().attach(body, *child);
    }

    fn remove(&self, node: &NodeId) {
        self.tree.borrow_mut().detach(*node);
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.tree.borrow().el(*node).and_then(|el| el.attrs.get(name).cloned())
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        if let Some(el) = self.tree.borrow_mut().el_mut(*node) {
            el.attrs.insert(name.to_owned(), value.to_owned());
        }
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.tree.borrow().classes(*node).iter().any(|c| c == class)
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        let mut classes = self.tree.borrow().classes(*node);
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_owned());
        }
        self.set_attribute(node, "class", &classes.join(" "));
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        let classes = self.tree.borrow().classes(*node);
        let kept = classes.into_iter().filter(|c| c != class).collect::<Vec<_>>();
        self.set_attribute(node, "class", &kept.join(" "));
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) {
        if let Some(el) = self.tree.borrow_mut().el_mut(*node) {
            el.styles.insert(property.to_owned(), value.to_owned());
        }
    }

    fn text_content(&self, node: &NodeId) -> String {
        self.tree.borrow().text_of(*node)
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        let children = self.children(*node);
        let mut tree = self.tree.borrow_mut();
        for child in children {
            tree.detach(child);
        }
        if let Some(el) = tree.el_mut(*node) {
            el.text = text.to_owned();
        }
    }

    fn value(&self, node: &NodeId) -> Option<String> {
        self.tree.borrow().el(*node).and_then(|el| el.value.clone())
    }

    fn set_value(&self, node: &NodeId, value: &str) {
        if let Some(el) = self.tree.borrow_mut().el_mut(*node) {
            el.value = Some(value.to_owned());
        }
    }

    fn check_validity(&self, form: &NodeId) -> bool {
        self.tree.borrow().el(*form).is_some_and(|el| !el.invalid)
    }

    fn focus(&self, node: &NodeId) {
        self.tree.borrow_mut().focused = Some(*node);
    }

    fn scroll_into_view(&self, node: &NodeId) {
        self.tree.borrow_mut().scrolled_into_view.push(*node);
    }

    fn scroll_to_top(&self) {
        self.tree.borrow_mut().scroll_to_top_calls += 1;
    }

    fn scroll_metrics(&self) -> ScrollMetrics {
        self.tree.borrow().metrics
    }
}

// =============================================================
// Selectors
// =============================================================

#[derive(Debug, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<(String, Option<String>)>,
}

impl Compound {
    fn matches(&self, el: &Element, classes: &[String]) -> bool {
        if self.tag.as_ref().is_some_and(|tag| !tag.eq_ignore_ascii_case(&el.tag)) {
            return false;
        }
        if self.id.as_ref().is_some_and(|id| el.attrs.get("id") != Some(id)) {
            return false;
        }
        if !self.classes.iter().all(|class| classes.contains(class)) {
            return false;
        }
        self.attrs.iter().all(|(name, expected)| match (el.attrs.get(name), expected) {
            (Some(actual), Some(expected)) => actual == expected,
            (Some(_), None) => true,
            (None, _) => false,
        })
    }
}

fn parse_selector_list(selector: &str) -> Option<Vec<Compound>> {
    selector.split(',').map(|part| parse_compound(part.trim())).collect()
}

fn read_ident(chars: &[char], pos: &mut usize) -> Option<String> {
    let start = *pos;
    while chars
        .get(*pos)
        .is_some_and(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
    {
        *pos += 1;
    }
    let ident = chars.get(start..*pos)?.iter().collect::<String>();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    Some(ident)
}

fn parse_compound(part: &str) -> Option<Compound> {
    let chars = part.chars().collect::<Vec<_>>();
    if chars.is_empty() {
        return None;
    }
    let mut compound = Compound::default();
    let mut pos = 0;
    if chars.first().is_some_and(char::is_ascii_alphabetic) {
        compound.tag = Some(read_ident(&chars, &mut pos)?);
    }
    while let Some(c) = chars.get(pos).copied() {
        pos += 1;
        match c {
            '.' => compound.classes.push(read_ident(&chars, &mut pos)?),
            '#' => compound.id = Some(read_ident(&chars, &mut pos)?),
            '[' => {
                let name = read_ident(&chars, &mut pos)?;
                let value = match chars.get(pos) {
                    Some(']') => None,
                    Some('=') => {
                        pos += 1;
                        Some(read_attr_value(&chars, &mut pos)?)
                    }
                    _ => return None,
                };
                if chars.get(pos) != Some(&']') {
                    return None;
                }
                pos += 1;
                compound.attrs.push((name, value));
            }
            _ => return None,
        }
    }
    Some(compound)
}

fn read_attr_value(chars: &[char], pos: &mut usize) -> Option<String> {
    match chars.get(*pos).copied() {
        Some(quote @ ('"' | '\'')) => {
            let start = *pos + 1;
            let len = chars.get(start..)?.iter().position(|c| *c == quote)?;
            *pos = start + len + 1;
            Some(chars.get(start..start + len)?.iter().collect())
        }
        _ => read_ident(chars, pos),
    }
}

// =============================================================
// Capabilities
// =============================================================

struct Pending {
    due_ms: u64,
    seq: u64,
    task: Task,
}

#[derive(Default)]
struct Clock {
    now_ms: u64,
    seq: u64,
    queue: Vec<Pending>,
}

/// Virtual-time scheduler. Tasks run only when [`FakeScheduler::advance`] is called.
#[derive(Clone, Default)]
pub struct FakeScheduler {
    clock: Rc<RefCell<Clock>>,
}

impl FakeScheduler {
    pub fn now_ms(&self) -> u64 {
        self.clock.borrow().now_ms
    }

    pub fn pending(&self) -> usize {
        self.clock.borrow().queue.len()
    }

    /// Move time forward, running every task that falls due, including tasks
    /// scheduled by other tasks within the window.
    pub fn advance(&self, ms: u64) {
        let target = self.now_ms() + ms;
        loop {
            let next = {
                let mut clock = self.clock.borrow_mut();
                let earliest = clock
                    .queue
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.due_ms <= target)
                    .min_by_key(|(_, p)| (p.due_ms, p.seq))
                    .map(|(idx, _)| idx);
                earliest.map(|idx| {
                    let pending = clock.queue.remove(idx);
                    clock.now_ms = pending.due_ms;
                    pending.task
                })
            };
            match next {
                Some(task) => task(),
                None => break,
            }
        }
        self.clock.borrow_mut().now_ms = target;
    }
}

impl Scheduler for FakeScheduler {
    fn after(&self, delay_ms: u32, task: Task) {
        let mut clock = self.clock.borrow_mut();
        let due_ms = clock.now_ms + u64::from(delay_ms);
        let seq = clock.seq;
        clock.seq += 1;
        clock.queue.push(Pending { due_ms, seq, task });
    }
}

struct Watch {
    node: NodeId,
    threshold: f64,
    on_visible: VisibleCallback<NodeId>,
}

/// Visibility observer driven by [`FakeObserver::reveal`].
#[derive(Clone, Default)]
pub struct FakeObserver {
    watches: Rc<RefCell<Vec<Watch>>>,
}

impl FakeObserver {
    pub fn watched(&self) -> Vec<NodeId> {
        self.watches.borrow().iter().map(|w| w.node).collect()
    }

    pub fn threshold_for(&self, node: NodeId) -> Option<f64> {
        self.watches.borrow().iter().find(|w| w.node == node).map(|w| w.threshold)
    }

    /// Report `node` as visible; fires and drops every watch on it.
    pub fn reveal(&self, node: NodeId) {
        let fired = {
            let mut watches = self.watches.borrow_mut();
            let (fired, kept): (Vec<_>, Vec<_>) = watches.drain(..).partition(|w| w.node == node);
            *watches = kept;
            fired
        };
        for watch in fired {
            (watch.on_visible)(&watch.node);
        }
    }
}

impl VisibilityObserver<NodeId> for FakeObserver {
    fn observe_once(&self, targets: Vec<NodeId>, threshold: f64, on_visible: VisibleCallback<NodeId>) {
        let mut watches = self.watches.borrow_mut();
        for node in targets {
            watches.push(Watch { node, threshold, on_visible: Rc::clone(&on_visible) });
        }
    }
}

/// Clipboard that resolves immediately with a preset outcome.
pub struct FakeClipboard {
    outcome: Result<(), ClipboardError>,
    written: RefCell<Vec<String>>,
}

impl FakeClipboard {
    pub fn accepting() -> Self {
        Self { outcome: Ok(()), written: RefCell::new(Vec::new()) }
    }

    pub fn rejecting() -> Self {
        Self { outcome: Err(ClipboardError::Rejected("NotAllowedError".into())), written: RefCell::new(Vec::new()) }
    }

    pub fn written(&self) -> Vec<String> {
        self.written.borrow().clone()
    }
}

impl ClipboardWriter for FakeClipboard {
    fn write_text(&self, text: &str) -> LocalBoxFuture<'static, Result<(), ClipboardError>> {
        self.written.borrow_mut().push(text.to_owned());
        futures::future::ready(self.outcome.clone()).boxed_local()
    }
}

/// Records every toolkit call.
#[derive(Default)]
pub struct FakeToolkit {
    pub tooltips: RefCell<Vec<NodeId>>,
    pub popovers: RefCell<Vec<NodeId>>,
    pub modal_instances: RefCell<Vec<NodeId>>,
    pub hidden_modals: RefCell<Vec<NodeId>>,
    pub closed_alerts: RefCell<Vec<NodeId>>,
}

impl FakeToolkit {
    pub fn with_modal(&self, node: NodeId) {
        self.modal_instances.borrow_mut().push(node);
    }
}

impl WidgetToolkit<NodeId> for FakeToolkit {
    fn create_tooltip(&self, node: &NodeId) {
        self.tooltips.borrow_mut().push(*node);
    }

    fn create_popover(&self, node: &NodeId) {
        self.popovers.borrow_mut().push(*node);
    }

    fn hide_modal(&self, node: &NodeId) -> bool {
        if !self.modal_instances.borrow().contains(node) {
            return false;
        }
        self.hidden_modals.borrow_mut().push(*node);
        true
    }

    fn close_alert(&self, node: &NodeId) {
        self.closed_alerts.borrow_mut().push(*node);
    }
}

/// All fakes wired together, with typed handles kept for assertions.
pub struct Harness {
    pub doc: FakeDocument,
    pub scheduler: FakeScheduler,
    pub observer: FakeObserver,
    pub clipboard: Rc<FakeClipboard>,
    pub toolkit: Rc<FakeToolkit>,
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

impl Harness {
    pub fn new() -> Self {
        Self::with_clipboard(FakeClipboard::accepting())
    }

    pub fn with_clipboard(clipboard: FakeClipboard) -> Self {
        Self {
            doc: FakeDocument::new(),
            scheduler: FakeScheduler::default(),
            observer: FakeObserver::default(),
            clipboard: Rc::new(clipboard),
            toolkit: Rc::new(FakeToolkit::default()),
        }
    }

    /// Every provider present.
    pub fn capabilities(&self) -> Capabilities<FakeDocument> {
        Capabilities {
            scheduler: Rc::new(self.scheduler.clone()),
            visibility: Some(Rc::new(self.observer.clone())),
            clipboard: Some(Rc::clone(&self.clipboard) as Rc<dyn ClipboardWriter>),
            toolkit: Some(Rc::clone(&self.toolkit) as Rc<dyn WidgetToolkit<NodeId>>),
        }
    }

    /// Only the scheduler; simulates a runtime without optional APIs.
    pub fn bare_capabilities(&self) -> Capabilities<FakeDocument> {
        Capabilities::minimal(Rc::new(self.scheduler.clone()))
    }
}
