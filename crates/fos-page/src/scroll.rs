//! Scroll Behavior
//!
//! `scrollIntoView` requests. There is no layout here, so a request is
//! recorded for the host to act on rather than turned into coordinates.

use fos_dom::NodeId;

/// Scroll behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    #[default]
    Auto,
    Smooth,
    Instant,
}

/// Logical scroll position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollLogicalPosition {
    Start,
    Center,
    End,
    #[default]
    Nearest,
}

/// Scroll into view options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollIntoViewOptions {
    pub behavior: ScrollBehavior,
    pub block: ScrollLogicalPosition,
    pub inline: ScrollLogicalPosition,
}

impl Default for ScrollIntoViewOptions {
    fn default() -> Self {
        Self {
            behavior: ScrollBehavior::Auto,
            block: ScrollLogicalPosition::Start,
            inline: ScrollLogicalPosition::Nearest,
        }
    }
}

impl ScrollIntoViewOptions {
    /// Options with the given behavior and block alignment
    pub fn new(behavior: ScrollBehavior, block: ScrollLogicalPosition) -> Self {
        Self { behavior, block, ..Self::default() }
    }
}

/// A recorded `scrollIntoView` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    pub target: NodeId,
    pub options: ScrollIntoViewOptions,
}

/// Scroll manager
#[derive(Debug, Default)]
pub struct ScrollManager {
    requests: Vec<ScrollRequest>,
}

impl ScrollManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scroll an element into view
    pub fn scroll_into_view(&mut self, target: NodeId, options: ScrollIntoViewOptions) {
        tracing::trace!(target = %target, ?options, "scrollIntoView");
        self.requests.push(ScrollRequest { target, options });
    }

    /// Requests not yet taken by the host
    pub fn requests(&self) -> &[ScrollRequest] {
        &self.requests
    }

    /// Drain recorded requests
    pub fn take_requests(&mut self) -> Vec<ScrollRequest> {
        std::mem::take(&mut self.requests)
    }
}
