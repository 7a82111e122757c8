//! DOM Tree (arena-based allocation)
//!
//! Nodes are never freed: removing a node only unlinks it, so handlers that
//! still hold its `NodeId` can keep reading and writing it safely.

use crate::{DomError, DomResult, ElementData, FileList, InlineStyle, Node, NodeData, NodeId};
use crate::forms::{FAKE_PATH_PREFIX, is_form_control};

/// Arena-based DOM tree
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self { nodes: vec![Node::document()] }
    }

    /// Document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the arena, detached ones included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    fn node(&self, id: NodeId) -> DomResult<&Node> {
        self.get(id).ok_or(DomError::NotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> DomResult<&mut Node> {
        self.get_mut(id).ok_or(DomError::NotFound(id))
    }

    // === Creation ===

    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.push(Node::element(name))
    }

    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content))
    }

    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::comment(content))
    }

    pub fn create_doctype(&mut self, name: &str, public_id: &str, system_id: &str) -> NodeId {
        self.push(Node::doctype(name, public_id, system_id))
    }

    /// Create an element with attributes already set
    pub fn create_element_with_attrs(&mut self, name: &str, attrs: &[(&str, &str)]) -> NodeId {
        let mut node = Node::element(name);
        if let Some(elem) = node.as_element_mut() {
            for (attr, value) in attrs {
                elem.set_attr(attr, value);
            }
        }
        self.push(node)
    }

    // === Structure ===

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.parent).filter(|p| p.is_valid())
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.next_sibling).filter(|s| s.is_valid())
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.first_child).filter(|c| c.is_valid())
    }

    /// Direct children of a node
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.get(id).map(|n| n.first_child).unwrap_or(NodeId::NONE),
        }
    }

    /// All descendants in document (pre-)order, excluding `id` itself
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            root: id,
            next: self.get(id).map(|n| n.first_child).unwrap_or(NodeId::NONE),
        }
    }

    /// Ancestors from the parent up to the document, excluding `id` itself
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.get(id).map(|n| n.parent).unwrap_or(NodeId::NONE),
        }
    }

    /// Inclusive containment check
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        node == ancestor || self.ancestors(node).any(|a| a == ancestor)
    }

    /// Whether the node is reachable from the document node
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.get(id).is_some() && self.contains(NodeId::ROOT, id)
    }

    /// Append `child` as last child of `parent`, moving it if already attached
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` before `reference` (or append when `None`)
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) -> DomResult<NodeId> {
        self.node(parent)?;
        self.node(child)?;
        if child == NodeId::ROOT || self.contains(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        if let Some(reference) = reference {
            if self.node(reference)?.parent != parent {
                return Err(DomError::NotAChild { parent, child: reference });
            }
            if reference == child {
                return Ok(child);
            }
        }

        self.detach(child);

        let (prev, next) = match reference {
            Some(reference) => (self.node(reference)?.prev_sibling, reference),
            None => (self.node(parent)?.last_child, NodeId::NONE),
        };

        {
            let node = self.node_mut(child)?;
            node.parent = parent;
            node.prev_sibling = prev;
            node.next_sibling = next;
        }
        if prev.is_valid() {
            self.node_mut(prev)?.next_sibling = child;
        } else {
            self.node_mut(parent)?.first_child = child;
        }
        if next.is_valid() {
            self.node_mut(next)?.prev_sibling = child;
        } else {
            self.node_mut(parent)?.last_child = child;
        }
        Ok(child)
    }

    /// Insert `child` immediately after `reference` under the same parent
    pub fn insert_after(&mut self, reference: NodeId, child: NodeId) -> DomResult<NodeId> {
        let parent = self
            .parent(reference)
            .ok_or(DomError::HierarchyRequest { parent: NodeId::NONE, child })?;
        let next = self.next_sibling(reference);
        self.insert_before(parent, child, next)
    }

    /// Remove `child` from `parent`
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        if self.node(child)?.parent != parent {
            return Err(DomError::NotAChild { parent, child });
        }
        self.detach(child);
        Ok(child)
    }

    /// Unlink a node from its parent; no-op for unattached nodes
    pub fn detach(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else {
            return;
        };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);
        if !parent.is_valid() {
            return;
        }

        if let Some(p) = self.get_mut(prev) {
            p.next_sibling = next;
        } else if let Some(p) = self.get_mut(parent) {
            p.first_child = next;
        }
        if let Some(n) = self.get_mut(next) {
            n.prev_sibling = prev;
        } else if let Some(p) = self.get_mut(parent) {
            p.last_child = prev;
        }

        if let Some(node) = self.get_mut(id) {
            node.parent = NodeId::NONE;
            node.prev_sibling = NodeId::NONE;
            node.next_sibling = NodeId::NONE;
        }
        tracing::trace!(node = %id, parent = %parent, "detached node");
    }

    // === Elements and attributes ===

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| n.as_element())
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(|n| n.as_element_mut())
    }

    fn element_or_err(&mut self, id: NodeId) -> DomResult<&mut ElementData> {
        let node = self.node_mut(id)?;
        node.as_element_mut().ok_or(DomError::NotAnElement(id))
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.element(id).is_some()
    }

    /// Lowercase tag name
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.local_name())
    }

    pub fn get_attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.get_attr(name)
    }

    pub fn has_attr(&self, id: NodeId, name: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_attr(name))
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) -> DomResult<()> {
        self.element_or_err(id)?.set_attr(name, value);
        Ok(())
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> DomResult<bool> {
        Ok(self.element_or_err(id)?.remove_attr(name))
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_class(class))
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) -> DomResult<()> {
        self.element_or_err(id)?.add_class(class);
        Ok(())
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) -> DomResult<()> {
        self.element_or_err(id)?.remove_class(class);
        Ok(())
    }

    /// Add or remove a class depending on `present`
    pub fn toggle_class(&mut self, id: NodeId, class: &str, present: bool) -> DomResult<()> {
        if present {
            self.add_class(id, class)
        } else {
            self.remove_class(id, class)
        }
    }

    // === Text ===

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.get(id).and_then(|n| n.as_text()) {
            return text.to_string();
        }
        self.descendants(id)
            .filter_map(|d| self.get(d).and_then(|n| n.as_text()))
            .collect()
    }

    /// Replace all children with a single text node (none for empty text)
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> DomResult<()> {
        if let NodeData::Text(data) = &mut self.node_mut(id)?.data {
            data.content = text.to_string();
            return Ok(());
        }
        let children: Vec<NodeId> = self.children(id).map(|(c, _)| c).collect();
        for child in children {
            self.detach(child);
        }
        if !text.is_empty() {
            let text_node = self.create_text(text);
            self.append_child(id, text_node)?;
        }
        Ok(())
    }

    // === Form controls ===

    /// Current control value: the edited value if any, else the default
    /// (`value` attribute for inputs, text content for textareas)
    ///
    /// File inputs report `C:\fakepath\<name>` of the first selected file.
    /// Checkboxes and radios without a `value` attribute report `on`.
    pub fn value(&self, id: NodeId) -> String {
        let Some(elem) = self.element(id) else {
            return String::new();
        };
        let input_type = match elem.local_name() {
            "input" => elem.get_attr("type").map(str::to_ascii_lowercase),
            _ => None,
        };
        if input_type.as_deref() == Some("file") {
            return elem
                .files
                .first()
                .map(|file| format!("{FAKE_PATH_PREFIX}{}", file.name))
                .unwrap_or_default();
        }
        if let Some(value) = &elem.dirty_value {
            return value.clone();
        }
        match (elem.local_name(), input_type.as_deref()) {
            ("textarea", _) => self.text_content(id),
            ("select", _) => self.selected_option_value(id),
            ("input", Some("checkbox" | "radio")) => elem.get_attr("value").unwrap_or("on").to_string(),
            _ => elem.get_attr("value").unwrap_or_default().to_string(),
        }
    }

    /// Value of the `selected` option, else the first option
    fn selected_option_value(&self, select: NodeId) -> String {
        let options: Vec<NodeId> = self
            .descendants(select)
            .filter(|d| self.tag_name(*d) == Some("option"))
            .collect();
        let chosen = options
            .iter()
            .find(|o| self.has_attr(**o, "selected"))
            .or(options.first());
        match chosen {
            Some(&option) => match self.get_attr(option, "value") {
                Some(value) => value.to_string(),
                None => self.text_content(option).trim().to_string(),
            },
            None => String::new(),
        }
    }

    /// Set the live value of a form control
    pub fn set_value(&mut self, id: NodeId, value: &str) -> DomResult<()> {
        let elem = self.element_or_err(id)?;
        if !is_form_control(elem.local_name()) {
            return Err(DomError::NotAFormControl(id));
        }
        elem.dirty_value = Some(value.to_string());
        Ok(())
    }

    pub fn files(&self, id: NodeId) -> Option<&FileList> {
        self.element(id).map(|e| &e.files)
    }

    pub fn set_files(&mut self, id: NodeId, files: FileList) -> DomResult<()> {
        self.element_or_err(id)?.files = files;
        Ok(())
    }

    // === Inline style ===

    pub fn style(&self, id: NodeId) -> InlineStyle {
        self.get_attr(id, "style").map(InlineStyle::parse).unwrap_or_default()
    }

    pub fn style_property(&self, id: NodeId, prop: &str) -> Option<String> {
        self.style(id).get_property(prop).map(str::to_string)
    }

    /// Set one inline style property, rewriting the `style` attribute
    pub fn set_style_property(&mut self, id: NodeId, prop: &str, value: &str) -> DomResult<()> {
        let mut style = self.style(id);
        style.set_property(prop, value);
        let elem = self.element_or_err(id)?;
        if style.is_empty() {
            elem.remove_attr("style");
        } else {
            elem.set_attr("style", &style.css_text());
        }
        Ok(())
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over direct children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

/// Pre-order iterator over descendants
pub struct Descendants<'a> {
    tree: &'a DomTree,
    root: NodeId,
    next: NodeId,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next;
        let node = self.tree.get(current)?;

        self.next = if node.first_child.is_valid() {
            node.first_child
        } else {
            // Climb until a next sibling is found, stopping at the subtree root
            let mut cursor = current;
            loop {
                if cursor == self.root {
                    break NodeId::NONE;
                }
                let Some(n) = self.tree.get(cursor) else {
                    break NodeId::NONE;
                };
                if n.next_sibling.is_valid() {
                    break n.next_sibling;
                }
                cursor = n.parent;
                if cursor == self.root || !cursor.is_valid() {
                    break NodeId::NONE;
                }
            }
        };
        Some(current)
    }
}

/// Iterator over ancestors
pub struct Ancestors<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.parent;
        Some(id)
    }
}
