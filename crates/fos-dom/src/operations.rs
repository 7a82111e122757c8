//! DOM Node Operations
//!
//! Errors for tree mutation: appendChild, insertBefore, removeChild.

use crate::NodeId;

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node id does not exist in the arena
    #[error("Node not found: {0}")]
    NotFound(NodeId),

    /// Operation requires an element
    #[error("Node {0} is not an element")]
    NotAnElement(NodeId),

    /// Operation requires an input, textarea or select
    #[error("Node {0} is not a form control")]
    NotAFormControl(NodeId),

    /// Inserting a node into itself or one of its descendants
    #[error("Hierarchy request error: {child} cannot be inserted under {parent}")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    /// Reference node is not a child of the given parent
    #[error("Node {child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },
}
