//! Tooltip activation

use fos_dom::NodeId;

use crate::page::Page;

impl Page {
    /// Create a tooltip for every trigger under `root` that has none yet
    pub(crate) fn init_tooltips(&mut self, root: NodeId) -> usize {
        let triggers = match self.document.tree().query_selector_all(root, &self.config.tooltip_selector) {
            Ok(triggers) => triggers,
            Err(err) => {
                tracing::warn!("Invalid tooltip selector {:?}: {}", self.config.tooltip_selector, err);
                return 0;
            }
        };

        let mut created = 0;
        for trigger in triggers {
            if self.tooltips.contains_key(&trigger) {
                continue;
            }
            match self.toolkit.create_tooltip(&mut self.document, trigger) {
                Ok(tooltip) => {
                    self.tooltips.insert(trigger, tooltip);
                    created += 1;
                }
                Err(err) => tracing::warn!("Tooltip for {} not created: {}", trigger, err),
            }
        }
        created
    }

    /// Whether `element` has a live tooltip
    pub fn has_tooltip(&self, element: NodeId) -> bool {
        self.tooltips.contains_key(&element)
    }

    pub fn tooltip_count(&self) -> usize {
        self.tooltips.len()
    }
}
