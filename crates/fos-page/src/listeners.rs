//! Event listener registry
//!
//! Listeners are keyed by `(element, event type)` and carry plain data, so
//! registering the same behavior twice on an element is detectable and
//! skipped.

use std::collections::HashMap;

use fos_dom::{EventType, NodeId};

/// What a listener does when its event reaches it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handler {
    /// Click on an in-page anchor
    SmoothScrollAnchor,
    /// Submit on a `form[novalidate]`
    ValidateOnSubmit,
    /// Input on a length-limited textarea
    CharCounter { counter: NodeId, max_length: usize },
}

/// Registered listeners by target element and event type
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    handlers: HashMap<(NodeId, EventType), Vec<Handler>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler; returns `false` if an identical one is already there
    pub fn add(&mut self, target: NodeId, event_type: EventType, handler: Handler) -> bool {
        let handlers = self.handlers.entry((target, event_type)).or_default();
        if handlers.contains(&handler) {
            return false;
        }
        handlers.push(handler);
        true
    }

    /// Handlers for a target, in registration order
    pub fn get(&self, target: NodeId, event_type: EventType) -> &[Handler] {
        self.handlers
            .get(&(target, event_type))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn has_listener(&self, target: NodeId, event_type: EventType) -> bool {
        !self.get(target, event_type).is_empty()
    }

    /// Total number of registered handlers
    pub fn len(&self) -> usize {
        self.handlers.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_skipped() {
        let mut registry = ListenerRegistry::new();
        assert!(registry.add(NodeId::ROOT, EventType::Click, Handler::SmoothScrollAnchor));
        assert!(!registry.add(NodeId::ROOT, EventType::Click, Handler::SmoothScrollAnchor));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_keyed_by_event_type() {
        let mut registry = ListenerRegistry::new();
        registry.add(NodeId::ROOT, EventType::Submit, Handler::ValidateOnSubmit);

        assert!(registry.has_listener(NodeId::ROOT, EventType::Submit));
        assert!(!registry.has_listener(NodeId::ROOT, EventType::Click));
        assert!(registry.get(NodeId::ROOT, EventType::Input).is_empty());
    }

    #[test]
    fn test_clear() {
        let mut registry = ListenerRegistry::new();
        registry.add(NodeId::ROOT, EventType::Input, Handler::CharCounter { counter: NodeId::ROOT, max_length: 10 });

        registry.clear();
        assert!(registry.is_empty());
        assert!(!registry.has_listener(NodeId::ROOT, EventType::Input));
    }
}
