//! Native validation for `form[data-validate]`.

use crate::consts::VALIDATED_CLASS;
use crate::dom::{Document, EventResponse};

/// Block an invalid submission and reveal per-field validation state.
pub fn on_submit<D: Document>(doc: &D, form: &D::Node) -> EventResponse {
    let valid = doc.check_validity(form);
    doc.add_class(form, VALIDATED_CLASS);
    if valid { EventResponse::proceed() } else { EventResponse::block() }
}
