//! Widget toolkit
//!
//! Tooltips and dismissible alerts come from a UI toolkit the page does not
//! own. The page receives one as a [`WidgetToolkit`] and only ever talks to
//! the widgets through [`Tooltip`] and [`DismissibleAlert`].

use fos_dom::{Document, NodeId};

/// Toolkit errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WidgetError {
    #[error("Node {0} is not an element")]
    NotAnElement(NodeId),

    #[error("Node {0} is no longer in the document")]
    Detached(NodeId),

    #[error("Toolkit error: {0}")]
    Toolkit(String),
}

/// Tooltip attached to a trigger element
pub trait Tooltip {
    /// Tear down on page unload
    fn dispose(&mut self, _document: &mut Document) {}
}

/// Alert that can be closed
pub trait DismissibleAlert {
    /// Fade out and remove the alert from the document
    fn close(&mut self, document: &mut Document) -> Result<(), WidgetError>;
}

/// Widget constructors
pub trait WidgetToolkit {
    fn create_tooltip(&mut self, document: &mut Document, trigger: NodeId) -> Result<Box<dyn Tooltip>, WidgetError>;

    fn create_dismissible_alert(
        &mut self,
        document: &Document,
        alert: NodeId,
    ) -> Result<Box<dyn DismissibleAlert>, WidgetError>;
}

/// Built-in toolkit with Bootstrap-compatible markup effects
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicToolkit;

impl BasicToolkit {
    pub fn new() -> Self {
        Self
    }
}

impl WidgetToolkit for BasicToolkit {
    fn create_tooltip(&mut self, document: &mut Document, trigger: NodeId) -> Result<Box<dyn Tooltip>, WidgetError> {
        let tree = document.tree_mut();
        if !tree.is_element(trigger) {
            return Err(WidgetError::NotAnElement(trigger));
        }

        // The native title would show a second tooltip; keep it aside
        let title = tree.get_attr(trigger, "title").map(str::to_string);
        if let Some(title) = &title {
            let moved = tree
                .set_attr(trigger, "data-bs-original-title", title)
                .and_then(|_| tree.remove_attr(trigger, "title"))
                .and_then(|_| tree.set_attr(trigger, "aria-label", title));
            moved.map_err(|err| WidgetError::Toolkit(err.to_string()))?;
        }
        Ok(Box::new(BasicTooltip { trigger, title }))
    }

    fn create_dismissible_alert(
        &mut self,
        document: &Document,
        alert: NodeId,
    ) -> Result<Box<dyn DismissibleAlert>, WidgetError> {
        if !document.tree().is_element(alert) {
            return Err(WidgetError::NotAnElement(alert));
        }
        Ok(Box::new(BasicAlert { element: alert }))
    }
}

#[derive(Debug)]
struct BasicTooltip {
    trigger: NodeId,
    title: Option<String>,
}

impl Tooltip for BasicTooltip {
    fn dispose(&mut self, document: &mut Document) {
        let Some(title) = self.title.take() else {
            return;
        };
        let tree = document.tree_mut();
        let restored = tree
            .set_attr(self.trigger, "title", &title)
            .and_then(|_| tree.remove_attr(self.trigger, "data-bs-original-title"))
            .and_then(|_| tree.remove_attr(self.trigger, "aria-label"));
        if let Err(err) = restored {
            tracing::debug!("Tooltip dispose on {}: {}", self.trigger, err);
        }
    }
}

#[derive(Debug)]
struct BasicAlert {
    element: NodeId,
}

impl DismissibleAlert for BasicAlert {
    fn close(&mut self, document: &mut Document) -> Result<(), WidgetError> {
        let tree = document.tree_mut();
        if !tree.is_connected(self.element) {
            return Err(WidgetError::Detached(self.element));
        }
        tree.remove_class(self.element, "show")
            .map_err(|err| WidgetError::Toolkit(err.to_string()))?;
        tree.detach(self.element);
        Ok(())
    }
}
