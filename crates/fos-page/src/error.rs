//! Errors for the host-facing page API

use fos_dom::{DomError, NodeId};

/// Result type for page actions
pub type PageResult<T> = Result<T, PageError>;

/// Misuse of the simulated-action API
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    #[error("Node {0} is not an element")]
    NotAnElement(NodeId),

    #[error("Node {0} is not a form")]
    NotAForm(NodeId),

    #[error("Node {0} does not accept text input")]
    NotATextControl(NodeId),

    #[error("Node {0} is not a file input")]
    NotAFileInput(NodeId),

    #[error(transparent)]
    Dom(#[from] DomError),
}
