//! DOM Events
//!
//! Event objects dispatched to page listeners: click, input, change,
//! submit and the document-ready notification.

use crate::NodeId;

/// DOM event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Click,
    Input,
    Change,
    Submit,
    DOMContentLoaded,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Input => "input",
            Self::Change => "change",
            Self::Submit => "submit",
            Self::DOMContentLoaded => "DOMContentLoaded",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "click" => Some(Self::Click),
            "input" => Some(Self::Input),
            "change" => Some(Self::Change),
            "submit" => Some(Self::Submit),
            "DOMContentLoaded" => Some(Self::DOMContentLoaded),
            _ => None,
        }
    }

    /// Whether listeners can suppress the default action
    pub fn is_cancelable(&self) -> bool {
        matches!(self, Self::Click | Self::Submit)
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// DOM event
#[derive(Debug, Clone)]
pub struct Event {
    pub event_type: EventType,
    pub target: NodeId,
    /// Node whose listeners are currently running
    pub current_target: NodeId,
    pub bubbles: bool,
    pub cancelable: bool,
    /// Virtual time of dispatch (ms)
    pub timestamp: u64,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl Event {
    /// Create a bubbling event of the given type
    pub fn new(event_type: EventType, target: NodeId, timestamp: u64) -> Self {
        Self {
            event_type,
            target,
            current_target: target,
            bubbles: true,
            cancelable: event_type.is_cancelable(),
            timestamp,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Prevent default action
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Stop propagation
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}
