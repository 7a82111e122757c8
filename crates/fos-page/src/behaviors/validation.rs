//! Required-field validation

use fos_dom::forms::is_form_control;
use fos_dom::{Event, EventType, NodeId};

use crate::listeners::Handler;
use crate::page::Page;
use crate::scroll::{ScrollIntoViewOptions, ScrollLogicalPosition};

/// Visual flag on an empty required field
pub const INVALID_CLASS: &str = "is-invalid";

/// Forms that opt out of native validation
const FORM_SELECTOR: &str = "form[novalidate]";

/// Fields checked on submit
const SUBMIT_FIELDS: &str = "[required]";

/// Fields checked by `validate_form`
const VALIDATE_FIELDS: &str = "input[required], textarea[required]";

impl Page {
    pub(crate) fn init_forms(&mut self, root: NodeId) -> usize {
        let forms = self
            .document
            .tree()
            .query_selector_all(root, FORM_SELECTOR)
            .unwrap_or_default();

        forms
            .into_iter()
            .filter(|form| self.listeners.add(*form, EventType::Submit, Handler::ValidateOnSubmit))
            .count()
    }

    /// Block the submission and bring the first invalid field into view
    pub(crate) fn on_validated_submit(&mut self, event: &mut Event) {
        let form = event.current_target;
        if self.check_required(form, SUBMIT_FIELDS) {
            return;
        }
        event.prevent_default();

        let first_invalid = self
            .document
            .tree()
            .query_selector(form, &format!(".{INVALID_CLASS}"))
            .ok()
            .flatten();
        if let Some(field) = first_invalid {
            let options = ScrollIntoViewOptions::new(self.scroll_behavior(), ScrollLogicalPosition::Center);
            self.scroll.scroll_into_view(field, options);
        }
    }

    /// Check the required inputs and textareas of `form`
    ///
    /// Empty (after trimming) fields gain `is-invalid`, filled ones lose it.
    /// Nothing is prevented or scrolled.
    pub fn validate_form(&mut self, form: NodeId) -> bool {
        self.check_required(form, VALIDATE_FIELDS)
    }

    fn check_required(&mut self, form: NodeId, selector: &str) -> bool {
        let fields = self
            .document
            .tree()
            .query_selector_all(form, selector)
            .unwrap_or_default();

        let tree = self.document.tree_mut();
        let mut valid = true;
        for field in fields {
            if !tree.tag_name(field).is_some_and(is_form_control) {
                tracing::trace!(field = %field, "required attribute on a non-control");
                continue;
            }
            let filled = !tree.value(field).trim().is_empty();
            if let Err(err) = tree.toggle_class(field, INVALID_CLASS, !filled) {
                tracing::warn!("Could not flag field {}: {}", field, err);
            }
            valid &= filled;
        }
        tracing::trace!(form = %form, valid, "validated form");
        valid
    }
}
