//! Copy-to-clipboard buttons.
//!
//! A click on a `[data-copy]` element produces a [`CopyRequest`]. The host
//! awaits it outside any borrow of the controller and hands the result back,
//! which is reported as exactly one toast.

#[cfg(test)]
#[path = "clipboard_test.rs"]
mod clipboard_test;

use std::rc::Rc;

use crate::capability::{ClipboardError, ClipboardWriter};
use crate::config::EnhanceConfig;
use crate::dom::Document;

use super::toast::Severity;

pub const COPY_ATTR: &str = "data-copy";

/// A pending clipboard write.
pub struct CopyRequest {
    text: String,
    writer: Option<Rc<dyn ClipboardWriter>>,
}

impl CopyRequest {
    /// Capture the text of `button` at click time.
    pub fn from_button<D: Document>(doc: &D, button: &D::Node, writer: Option<Rc<dyn ClipboardWriter>>) -> Self {
        let text = doc.attribute(button, COPY_ATTR).unwrap_or_default();
        Self { text, writer }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub async fn run(self) -> Result<(), ClipboardError> {
        let Some(writer) = self.writer else {
            return Err(ClipboardError::Unsupported);
        };
        writer.write_text(&self.text).await
    }
}

/// The toast that reports a copy result.
#[must_use]
pub fn outcome_toast<'a>(result: &Result<(), ClipboardError>, config: &'a EnhanceConfig) -> (&'a str, Severity) {
    match result {
        Ok(()) => (config.copy_success_message.as_str(), Severity::Success),
        Err(err) => {
            log::warn!("copy to clipboard failed: {err}");
            (config.copy_failure_message.as_str(), Severity::Danger)
        }
    }
}
