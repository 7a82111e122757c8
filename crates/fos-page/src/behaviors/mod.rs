//! Page behaviors
//!
//! Each behavior is an `impl Page` block that wires itself onto the
//! elements under a root and reacts to the events or tasks it registered.

mod alerts;
mod anchors;
mod counter;
mod preview;
mod tooltips;
mod validation;

pub use counter::{CHAR_COUNT_CLASS, CounterState, DANGER_CLASS, WARNING_CLASS};
pub use validation::INVALID_CLASS;

use fos_dom::{FileEntry, NodeId};

/// What one initialization pass wired up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InitReport {
    /// Tooltips created
    pub tooltips: usize,
    /// Alerts scheduled for dismissal
    pub alerts_scheduled: usize,
    /// Anchors given a smooth-scroll listener
    pub anchors: usize,
    /// Forms given a validation listener
    pub forms: usize,
    /// Character counters inserted
    pub counters: usize,
}

impl InitReport {
    /// Nothing was wired
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Deferred work on the page's event loop
#[derive(Debug)]
pub(crate) enum Task {
    DismissAlert { alert: NodeId },
    CompleteImageRead { file: FileEntry, preview: NodeId },
}
