//! DOM Node
//!
//! Nodes link to each other through `NodeId`s instead of pointers, so the
//! whole tree lives in a single `Vec` and detached nodes stay addressable.

use crate::{NodeId, NamedNodeMap, DOMTokenList, FileList};

/// DOM Node - Core structure
#[derive(Debug, Clone)]
pub struct Node {
    /// Parent node (NONE if root or detached)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a new element node
    pub fn element(name: &str) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(name)))
    }

    /// Create a new text node
    pub fn text(content: impl Into<String>) -> Self {
        Self::with_data(NodeData::Text(TextData { content: content.into() }))
    }

    /// Create a comment node
    pub fn comment(content: impl Into<String>) -> Self {
        Self::with_data(NodeData::Comment(content.into()))
    }

    /// Create a doctype node
    pub fn doctype(name: impl Into<String>, public_id: impl Into<String>, system_id: impl Into<String>) -> Self {
        Self::with_data(NodeData::Doctype {
            name: name.into(),
            public_id: public_id.into(),
            system_id: system_id.into(),
        })
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(&t.content),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Document root
    Document,
    /// DOCTYPE
    Doctype {
        name: String,
        public_id: String,
        system_id: String,
    },
    /// Element
    Element(ElementData),
    /// Text content
    Text(TextData),
    /// Comment
    Comment(String),
}

/// Element-specific data
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Lowercase local tag name
    pub name: String,
    /// Attributes in source order
    pub attrs: NamedNodeMap,
    /// Cached class list, mirrors the `class` attribute
    classes: DOMTokenList,
    /// Live control value once it has been edited
    pub(crate) dirty_value: Option<String>,
    /// Selected files (file inputs only)
    pub files: FileList,
}

impl ElementData {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
            attrs: NamedNodeMap::new(),
            classes: DOMTokenList::new(),
            dirty_value: None,
            files: FileList::new(),
        }
    }

    /// Local tag name
    #[inline]
    pub fn local_name(&self) -> &str {
        &self.name
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get_attribute(name)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.has_attribute(name)
    }

    /// Set an attribute, keeping the class cache in sync
    pub fn set_attr(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        if name == "class" {
            self.classes.set_value(value);
        }
        self.attrs.set_attribute(&name, value);
    }

    /// Remove an attribute, returning whether it existed
    pub fn remove_attr(&mut self, name: &str) -> bool {
        let name = name.to_ascii_lowercase();
        if name == "class" {
            self.classes = DOMTokenList::new();
        }
        self.attrs.remove_named_item(&name).is_some()
    }

    /// Value of the `id` attribute
    pub fn id(&self) -> Option<&str> {
        self.get_attr("id")
    }

    /// Class list (read-only; mutate through `add_class`/`remove_class`)
    pub fn class_list(&self) -> &DOMTokenList {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn add_class(&mut self, class: &str) {
        if self.classes.contains(class) {
            return;
        }
        self.classes.add(&[class]);
        self.sync_class_attr();
    }

    pub fn remove_class(&mut self, class: &str) {
        if !self.classes.contains(class) {
            return;
        }
        self.classes.remove(&[class]);
        self.sync_class_attr();
    }

    fn sync_class_attr(&mut self) {
        let value = self.classes.value();
        self.attrs.set_attribute("class", &value);
    }
}

/// Text node data
#[derive(Debug, Clone)]
pub struct TextData {
    pub content: String,
}
