//! fOS DOM - Document Object Model
//!
//! Arena-backed DOM tree used by the page behaviors: element attributes,
//! class lists, inline style, form-control state and selector queries.

mod node;
mod tree;
mod document;
mod attributes;
mod classlist;
mod style;
mod selector;
mod operations;
mod dom_events;
pub mod forms;

pub use node::{Node, NodeData, ElementData, TextData};
pub use tree::{DomTree, Children, Descendants, Ancestors};
pub use document::Document;
pub use attributes::{Attr, NamedNodeMap};
pub use classlist::DOMTokenList;
pub use style::InlineStyle;
pub use selector::{Selector, SelectorError, CompoundSelector, SimpleSelector, AttrSelector, AttrOperator, Combinator};
pub use operations::{DomError, DomResult};
pub use dom_events::{Event, EventType};
pub use forms::{FileEntry, FileList};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);
    /// Null link
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check that this is not the null link
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_valid() {
            write!(f, "#{}", self.0)
        } else {
            write!(f, "#none")
        }
    }
}
