//! The page controller.
//!
//! [`Enhancer`] owns every piece of state the behaviors need (last scroll
//! offset, toast container, star widgets, the created button and bar) and
//! exposes one method per incoming event. It never touches the browser
//! directly, so the whole page lifecycle runs in native tests.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::behaviors::back_to_top::{self, BackToTop};
use crate::behaviors::clipboard::{self, CopyRequest};
use crate::behaviors::keyboard::{self, KeyChord};
use crate::behaviors::navbar::NavbarController;
use crate::behaviors::progress::ProgressBar;
use crate::behaviors::star_rating::StarRating;
use crate::behaviors::toast::{Severity, ToastCenter};
use crate::behaviors::widgets::{self, WidgetKind};
use crate::behaviors::{alerts, anchor, form, lazy_image, reading_time, scroll_animation};
use crate::bindings::{self, Behavior, Listener};
use crate::capability::{Capabilities, ClipboardError};
use crate::config::EnhanceConfig;
use crate::dom::{Document, EventResponse};

/// Counts from one initialization pass, for the startup log line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InitSummary {
    pub anchors: usize,
    pub lazy_images: usize,
    pub animations: usize,
    pub forms: usize,
    pub copy_buttons: usize,
    pub tooltips: usize,
    pub popovers: usize,
    pub reading_badges: usize,
    pub star_widgets: usize,
    pub alert_timer: bool,
}

/// Result of a handled element event.
pub struct Reaction {
    pub response: EventResponse,
    /// Clipboard write to await; report its result with [`Enhancer::report_copy`].
    pub copy: Option<CopyRequest>,
}

impl From<EventResponse> for Reaction {
    fn from(response: EventResponse) -> Self {
        Self { response, copy: None }
    }
}

pub struct Enhancer<D: Document> {
    doc: D,
    config: EnhanceConfig,
    caps: Capabilities<D>,
    navbar: Option<NavbarController<D::Node>>,
    toasts: ToastCenter<D>,
    back_to_top: BackToTop<D::Node>,
    progress: ProgressBar<D::Node>,
    ratings: Vec<StarRating<D::Node>>,
    initialized: bool,
}

impl<D: Document> Enhancer<D> {
    pub fn new(doc: D, config: EnhanceConfig, caps: Capabilities<D>) -> Self {
        let toasts = ToastCenter::new(doc.clone(), Rc::clone(&caps.scheduler), &config);
        let back_to_top = BackToTop::detached(config.back_to_top_offset);
        Self {
            doc,
            config,
            caps,
            navbar: None,
            toasts,
            back_to_top,
            progress: ProgressBar::default(),
            ratings: Vec::new(),
            initialized: false,
        }
    }

    #[must_use]
    pub fn config(&self) -> &EnhanceConfig {
        &self.config
    }

    #[must_use]
    pub fn ratings(&self) -> &[StarRating<D::Node>] {
        &self.ratings
    }

    #[must_use]
    pub fn back_to_top_button(&self) -> Option<&D::Node> {
        self.back_to_top.button()
    }

    /// Wire every behavior onto the current document.
    ///
    /// Returns the element listeners the host must attach. Window-level
    /// scroll and keydown events go to [`Enhancer::on_scroll`] and
    /// [`Enhancer::on_key_down`]. A second call does nothing.
    pub fn initialize(&mut self) -> (Vec<Listener<D::Node>>, InitSummary) {
        let mut summary = InitSummary::default();
        if self.initialized {
            log::warn!("page enhancements already initialized");
            return (Vec::new(), summary);
        }
        self.initialized = true;

        let mut listeners = Vec::new();
        for matched in bindings::collect(&self.doc) {
            self.apply(matched.behavior, matched.nodes, &mut listeners, &mut summary);
        }

        self.navbar = Some(NavbarController::attach(&self.doc, &self.config));
        if let Some(button) = self.back_to_top.create(&self.doc) {
            listeners.push(Listener::BackToTopClick(button));
        }
        self.progress.create(&self.doc);
        summary.alert_timer = alerts::schedule(
            &self.doc,
            &self.caps.scheduler,
            self.caps.toolkit.as_ref(),
            self.config.alert_dismiss_ms,
        );

        log::info!("page enhancements loaded: {summary:?} ({})", self.caps.describe());
        (listeners, summary)
    }

    fn apply(
        &mut self,
        behavior: Behavior,
        nodes: Vec<D::Node>,
        listeners: &mut Vec<Listener<D::Node>>,
        summary: &mut InitSummary,
    ) {
        let doc = &self.doc;
        match behavior {
            Behavior::SmoothAnchor => {
                summary.anchors = nodes.len();
                listeners.extend(nodes.into_iter().map(Listener::AnchorClick));
            }
            Behavior::LazyImage => {
                summary.lazy_images = lazy_image::observe(doc, nodes, self.caps.visibility.as_ref());
            }
            Behavior::ScrollAnimation => {
                summary.animations = scroll_animation::observe(
                    doc,
                    nodes,
                    self.config.animate_threshold,
                    self.caps.visibility.as_ref(),
                );
            }
            Behavior::ValidatedForm => {
                summary.forms = nodes.len();
                listeners.extend(nodes.into_iter().map(Listener::FormSubmit));
            }
            Behavior::CopyToClipboard => {
                summary.copy_buttons = nodes.len();
                listeners.extend(nodes.into_iter().map(Listener::CopyClick));
            }
            Behavior::Tooltip => {
                summary.tooltips = widgets::activate(WidgetKind::Tooltip, &nodes, self.caps.toolkit.as_ref());
            }
            Behavior::Popover => {
                summary.popovers = widgets::activate(WidgetKind::Popover, &nodes, self.caps.toolkit.as_ref());
            }
            Behavior::ReadingTime => {
                summary.reading_badges = nodes
                    .iter()
                    .filter_map(|node| {
                        reading_time::annotate(
                            doc,
                            node,
                            self.config.words_per_minute,
                            &self.config.reading_time_suffix,
                        )
                    })
                    .count();
            }
            Behavior::StarRating => {
                for container in nodes {
                    let widget = self.ratings.len();
                    let rating = StarRating::discover(doc, container);
                    for (star, node) in rating.stars().iter().enumerate() {
                        listeners.push(Listener::StarClick { node: node.clone(), widget, star });
                        listeners.push(Listener::StarHover { node: node.clone(), widget, star });
                    }
                    listeners.push(Listener::RatingLeave { node: rating.container().clone(), widget });
                    self.ratings.push(rating);
                }
                summary.star_widgets = self.ratings.len();
            }
        }
    }

    // --- Window events ---

    /// Scroll handler: navbar state, back-to-top visibility, progress width.
    pub fn on_scroll(&mut self) {
        let metrics = self.doc.scroll_metrics();
        if let Some(navbar) = &mut self.navbar {
            navbar.on_scroll(&self.doc, metrics.offset);
        }
        self.back_to_top.on_scroll(&self.doc, metrics.offset);
        self.progress.on_scroll(&self.doc, metrics);
    }

    pub fn on_key_down(&self, chord: &KeyChord) -> EventResponse {
        keyboard::on_key_down(&self.doc, self.caps.toolkit.as_ref(), chord)
    }

    // --- Element events ---

    /// Dispatch an element event produced by [`Enhancer::initialize`].
    pub fn handle(&mut self, listener: &Listener<D::Node>) -> Reaction {
        match listener {
            Listener::AnchorClick(node) => anchor::on_click(&self.doc, node).into(),
            Listener::FormSubmit(node) => form::on_submit(&self.doc, node).into(),
            Listener::CopyClick(node) => Reaction {
                response: EventResponse::proceed(),
                copy: Some(CopyRequest::from_button(&self.doc, node, self.caps.clipboard.clone())),
            },
            Listener::StarClick { widget, star, .. } => {
                if let Some(rating) = self.ratings.get_mut(*widget) {
                    rating.click(&self.doc, *star);
                }
                EventResponse::proceed().into()
            }
            Listener::StarHover { widget, star, .. } => {
                if let Some(rating) = self.ratings.get(*widget) {
                    rating.hover(&self.doc, *star);
                }
                EventResponse::proceed().into()
            }
            Listener::RatingLeave { widget, .. } => {
                if let Some(rating) = self.ratings.get(*widget) {
                    rating.leave(&self.doc);
                }
                EventResponse::proceed().into()
            }
            Listener::BackToTopClick(_) => {
                back_to_top::on_click(&self.doc);
                EventResponse::proceed().into()
            }
        }
    }

    // --- Services ---

    pub fn show_toast(&mut self, message: &str, severity: Severity) -> Option<D::Node> {
        self.toasts.show(message, severity)
    }

    /// Report a finished clipboard write as a single toast.
    pub fn report_copy(&mut self, result: &Result<(), ClipboardError>) -> Option<D::Node> {
        let (message, severity) = clipboard::outcome_toast(result, &self.config);
        self.toasts.show(message, severity)
    }

    #[must_use]
    pub fn estimate_reading_time(&self, text: &str) -> u32 {
        reading_time::estimate_minutes(text, self.config.words_per_minute)
    }
}

/// Await a copy request and report its outcome, without holding a borrow of
/// the controller across the clipboard write.
pub async fn copy_and_report<D: Document>(enhancer: Rc<RefCell<Enhancer<D>>>, request: CopyRequest) {
    let result = request.run().await;
    match enhancer.try_borrow_mut() {
        Ok(mut enhancer) => {
            enhancer.report_copy(&result);
        }
        Err(_) => log::debug!("copy result dropped: controller busy"),
    }
}
