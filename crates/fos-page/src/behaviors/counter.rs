//! Character counter for length-limited textareas
//!
//! Each `textarea[maxlength]` gets a
//! `<div class="form-text text-end"><span class="char-count">k</span>/M</div>`
//! right after it. Length is counted in UTF-16 code units, like `maxlength`.

use fos_dom::{DomResult, EventType, NodeId};

use crate::listeners::Handler;
use crate::page::Page;

pub const CHAR_COUNT_CLASS: &str = "char-count";
pub const WARNING_CLASS: &str = "text-warning";
pub const DANGER_CLASS: &str = "text-danger";

const COUNTER_WRAPPER_CLASS: &str = "form-text text-end";

/// Counter state for a given length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterState {
    /// At most 80% of the limit
    Normal,
    /// Above 80%, up to the limit
    Warning,
    /// Over the limit
    Danger,
}

impl CounterState {
    pub fn classify(length: usize, max_length: usize) -> Self {
        let (length, max_length) = (length as u128, max_length as u128);
        if length > max_length {
            Self::Danger
        } else if 5 * length > 4 * max_length {
            Self::Warning
        } else {
            Self::Normal
        }
    }
}

impl Page {
    pub(crate) fn init_counters(&mut self, root: NodeId) -> usize {
        let textareas = self
            .document
            .tree()
            .query_selector_all(root, "textarea[maxlength]")
            .unwrap_or_default();

        let mut created = 0;
        for textarea in textareas {
            if self.counters.contains_key(&textarea) {
                continue;
            }
            let raw = self.document.tree().get_attr(textarea, "maxlength").unwrap_or_default();
            let Ok(max_length) = raw.trim().parse::<usize>() else {
                tracing::warn!("Ignoring textarea {} with invalid maxlength {:?}", textarea, raw);
                continue;
            };

            let counter = match self.insert_counter(textarea, max_length) {
                Ok(counter) => counter,
                Err(err) => {
                    tracing::warn!("Counter for textarea {} not inserted: {}", textarea, err);
                    continue;
                }
            };
            self.listeners.add(textarea, EventType::Input, Handler::CharCounter { counter, max_length });
            self.counters.insert(textarea, counter);
            self.update_counter(textarea, counter, max_length);
            created += 1;
        }
        created
    }

    /// Build the counter markup after `textarea`; returns the count span
    fn insert_counter(&mut self, textarea: NodeId, max_length: usize) -> DomResult<NodeId> {
        let tree = self.document.tree_mut();
        let wrapper = tree.create_element_with_attrs("div", &[("class", COUNTER_WRAPPER_CLASS)]);
        let count = tree.create_element_with_attrs("span", &[("class", CHAR_COUNT_CLASS)]);
        let limit = tree.create_text(&format!("/{max_length}"));
        tree.append_child(wrapper, count)?;
        tree.append_child(wrapper, limit)?;
        tree.insert_after(textarea, wrapper)?;
        Ok(count)
    }

    pub(crate) fn update_counter(&mut self, textarea: NodeId, counter: NodeId, max_length: usize) {
        let tree = self.document.tree_mut();
        let length = tree.value(textarea).encode_utf16().count();
        let state = CounterState::classify(length, max_length);

        let updated = tree
            .set_text_content(counter, &length.to_string())
            .and_then(|_| tree.toggle_class(counter, WARNING_CLASS, state != CounterState::Normal))
            .and_then(|_| tree.toggle_class(counter, DANGER_CLASS, state == CounterState::Danger));
        match updated {
            Ok(()) => tracing::trace!(textarea = %textarea, length, max_length, ?state, "counter updated"),
            Err(err) => tracing::warn!("Counter {} not updated: {}", counter, err),
        }
    }

    /// Detach every generated counter and forget its textarea
    pub(crate) fn remove_counters(&mut self) {
        let tree = self.document.tree_mut();
        for (_, counter) in self.counters.drain() {
            if let Some(wrapper) = tree.parent(counter) {
                tree.detach(wrapper);
            }
        }
    }

    /// Count span for a textarea
    pub fn counter_for(&self, textarea: NodeId) -> Option<NodeId> {
        self.counters.get(&textarea).copied()
    }

    /// Current state of a textarea's counter
    pub fn counter_state(&self, textarea: NodeId) -> Option<CounterState> {
        let counter = self.counter_for(textarea)?;
        let tree = self.document.tree();
        Some(if tree.has_class(counter, DANGER_CLASS) {
            CounterState::Danger
        } else if tree.has_class(counter, WARNING_CLASS) {
            CounterState::Warning
        } else {
            CounterState::Normal
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_for_100() {
        assert_eq!(CounterState::classify(0, 100), CounterState::Normal);
        assert_eq!(CounterState::classify(80, 100), CounterState::Normal);
        assert_eq!(CounterState::classify(81, 100), CounterState::Warning);
        assert_eq!(CounterState::classify(100, 100), CounterState::Warning);
        assert_eq!(CounterState::classify(101, 100), CounterState::Danger);
    }

    #[test]
    fn test_thresholds_not_multiple_of_five() {
        // 0.8 * 7 = 5.6
        assert_eq!(CounterState::classify(5, 7), CounterState::Normal);
        assert_eq!(CounterState::classify(6, 7), CounterState::Warning);
    }

    #[test]
    fn test_zero_limit() {
        assert_eq!(CounterState::classify(0, 0), CounterState::Normal);
        assert_eq!(CounterState::classify(1, 0), CounterState::Danger);
    }

    #[test]
    fn test_no_overflow() {
        assert_eq!(CounterState::classify(usize::MAX, usize::MAX), CounterState::Warning);
    }
}
