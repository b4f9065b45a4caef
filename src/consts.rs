//! Shared constants: default tunables plus the class and id vocabulary the
//! page markup relies on.

// ── Scroll thresholds ───────────────────────────────────────────

/// Offset past which the navbar gets its "scrolled" styling, in CSS pixels.
pub const NAVBAR_SCROLLED_OFFSET_PX: f64 = 50.0;

/// Offset past which scrolling down hides the navbar, in CSS pixels.
pub const NAVBAR_HIDE_OFFSET_PX: f64 = 500.0;

/// Offset past which the back-to-top button is shown, in CSS pixels.
pub const BACK_TO_TOP_OFFSET_PX: f64 = 300.0;

// ── Delays ──────────────────────────────────────────────────────

/// How long a toast stays visible before fading.
pub const TOAST_VISIBLE_MS: u32 = 5000;

/// Fade transition length; the toast node is removed after it.
pub const TOAST_FADE_MS: u32 = 300;

/// Delay after initialization before non-permanent alerts are closed.
pub const ALERT_DISMISS_MS: u32 = 5000;

// ── Reading / visibility ────────────────────────────────────────

/// Assumed reading speed for the reading-time estimate.
pub const WORDS_PER_MINUTE: u32 = 200;

/// Fraction of an animated element that must be visible to trigger it.
pub const ANIMATE_THRESHOLD: f64 = 0.1;

/// Lazy images load as soon as any pixel is visible.
pub const LAZY_IMAGE_THRESHOLD: f64 = 0.0;

// ── Star rating colors ──────────────────────────────────────────

pub const STAR_ACTIVE_COLOR: &str = "#f59e0b";
pub const STAR_IDLE_COLOR: &str = "#cbd5e1";

// ── Element ids ─────────────────────────────────────────────────

pub const TOAST_CONTAINER_ID: &str = "toast-container";
pub const BACK_TO_TOP_ID: &str = "back-to-top";
pub const PROGRESS_BAR_ID: &str = "page-progress";
pub const CONFIG_SCRIPT_ID: &str = "academy-ui-config";

// ── Classes ─────────────────────────────────────────────────────

pub const ANIMATED_CLASS: &str = "animate__animated";
pub const FADE_IN_UP_CLASS: &str = "animate__fadeInUp";
pub const LOADED_CLASS: &str = "loaded";
pub const NAVBAR_SCROLLED_CLASS: &str = "navbar-scrolled";
pub const VALIDATED_CLASS: &str = "was-validated";
pub const PERMANENT_ALERT_CLASS: &str = "alert-permanent";
pub const STAR_SOLID_CLASS: &str = "fas";
pub const STAR_OUTLINE_CLASS: &str = "far";
