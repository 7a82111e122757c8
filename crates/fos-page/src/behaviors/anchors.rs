//! Smooth-scroll anchors

use fos_dom::{Event, EventType, NodeId};

use crate::listeners::Handler;
use crate::page::Page;
use crate::scroll::{ScrollIntoViewOptions, ScrollLogicalPosition};

/// In-page links
const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

impl Page {
    pub(crate) fn init_anchors(&mut self, root: NodeId) -> usize {
        let anchors = self
            .document
            .tree()
            .query_selector_all(root, ANCHOR_SELECTOR)
            .unwrap_or_default();

        anchors
            .into_iter()
            .filter(|anchor| self.listeners.add(*anchor, EventType::Click, Handler::SmoothScrollAnchor))
            .count()
    }

    /// The href is read at click time and used as a document-wide selector
    pub(crate) fn on_anchor_click(&mut self, event: &mut Event) {
        event.prevent_default();

        let anchor = event.current_target;
        let Some(href) = self.document.tree().get_attr(anchor, "href").map(str::to_string) else {
            return;
        };

        match self.document.query_selector(&href) {
            Ok(Some(target)) => {
                let options = ScrollIntoViewOptions::new(self.scroll_behavior(), ScrollLogicalPosition::Start);
                self.scroll.scroll_into_view(target, options);
            }
            Ok(None) => tracing::trace!(href = %href, "anchor target not found"),
            Err(err) => tracing::trace!(href = %href, %err, "anchor href is not a selector"),
        }
    }
}
