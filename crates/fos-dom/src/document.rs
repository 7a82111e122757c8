//! Document - High-level document API

use crate::{DomTree, NodeId, SelectorError};

/// HTML Document
#[derive(Debug, Clone)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a document with an empty html/head/body skeleton
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();
        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        let mut document = Self {
            tree,
            url: url.to_string(),
            html_element: html,
            head_element: head,
            body_element: body,
        };
        // Freshly created nodes under the document node cannot violate hierarchy
        let tree = &mut document.tree;
        let _ = tree.append_child(NodeId::ROOT, html);
        let _ = tree.append_child(html, head);
        let _ = tree.append_child(html, body);
        document
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    /// Locate html/head/body after the tree has been built externally
    pub fn finalize(&mut self) {
        let tree = &self.tree;
        let find_child = |parent: NodeId, tag: &str| {
            tree.children(parent)
                .find(|(_, node)| node.as_element().is_some_and(|e| e.local_name() == tag))
                .map(|(id, _)| id)
                .unwrap_or(NodeId::NONE)
        };

        let html = find_child(NodeId::ROOT, "html");
        let (head, body) = if html.is_valid() {
            (find_child(html, "head"), find_child(html, "body"))
        } else {
            (NodeId::NONE, NodeId::NONE)
        };
        self.html_element = html;
        self.head_element = head;
        self.body_element = body;
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Text of the first <title> in <head>
    pub fn title(&self) -> String {
        if !self.head_element.is_valid() {
            return String::new();
        }
        self.tree
            .children(self.head_element)
            .find(|(_, node)| node.as_element().is_some_and(|e| e.local_name() == "title"))
            .map(|(id, _)| self.tree.text_content(id).trim().to_string())
            .unwrap_or_default()
    }

    /// <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// First connected element with the given id
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        self.tree
            .descendants(NodeId::ROOT)
            .find(|node| self.tree.element(*node).is_some_and(|e| e.id() == Some(id)))
    }

    /// document.querySelector
    pub fn query_selector(&self, selector: &str) -> Result<Option<NodeId>, SelectorError> {
        self.tree.query_selector(NodeId::ROOT, selector)
    }

    /// document.querySelectorAll
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        self.tree.query_selector_all(NodeId::ROOT, selector)
    }

    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}
