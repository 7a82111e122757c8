//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts it to the arena DOM.

use fos_dom::{Document, DomTree, NodeId};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

/// Elements whose whitespace-only text is significant
const WHITESPACE_PRESERVING: &[&str] = &["textarea", "pre", "listing"];

/// HTML5 parser
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlParser;

impl HtmlParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse HTML string into a Document
    pub fn parse(&self, html: &str) -> Document {
        self.parse_with_url(html, "about:blank")
    }

    /// Parse HTML with a document URL
    pub fn parse_with_url(&self, html: &str, url: &str) -> Document {
        tracing::debug!("Parsing HTML document: {}", url);

        let dom = parse_document(RcDom::default(), Default::default()).one(html);

        let mut document = Document::empty(url);
        self.convert_node(&dom.document, document.tree_mut(), NodeId::ROOT);
        document.finalize();

        tracing::debug!("Parsed {} nodes", document.tree().len());
        document
    }

    /// Convert an RcDom node (and its subtree) into the arena
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree, parent: NodeId) {
        match &handle.data {
            RcNodeData::Document => {
                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, parent);
                }
            }
            RcNodeData::Doctype { name, public_id, system_id } => {
                let id = tree.create_doctype(name, public_id, system_id);
                self.attach(tree, parent, id);
            }
            RcNodeData::Text { contents } => {
                let text = contents.borrow();
                let keep_whitespace = tree
                    .tag_name(parent)
                    .is_some_and(|tag| WHITESPACE_PRESERVING.contains(&tag));
                if keep_whitespace || !text.trim().is_empty() {
                    let id = tree.create_text(&text);
                    self.attach(tree, parent, id);
                }
            }
            RcNodeData::Comment { contents } => {
                let id = tree.create_comment(contents);
                self.attach(tree, parent, id);
            }
            RcNodeData::Element { name, attrs, .. } => {
                let attrs = attrs.borrow();
                let pairs: Vec<(&str, &str)> = attrs
                    .iter()
                    .map(|attr| (&*attr.name.local, &*attr.value))
                    .collect();
                let id = tree.create_element_with_attrs(&name.local, &pairs);
                self.attach(tree, parent, id);

                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, id);
                }
            }
            RcNodeData::ProcessingInstruction { .. } => {}
        }
    }

    fn attach(&self, tree: &mut DomTree, parent: NodeId, child: NodeId) {
        if let Err(err) = tree.append_child(parent, child) {
            tracing::warn!("Dropping node during tree conversion: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let html = "<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
        let doc = HtmlParser::new().parse(html);

        assert_eq!(doc.title(), "Test");
        assert_eq!(doc.tree().tag_name(doc.body()), Some("body"));
    }

    #[test]
    fn test_parse_fragment_gets_skeleton() {
        let doc = HtmlParser::new().parse("<div><span>Text</span></div>");

        // Fragments get wrapped in html/head/body by html5ever
        assert!(doc.head().is_valid());
        let div = doc.tree().first_child(doc.body()).unwrap();
        assert_eq!(doc.tree().tag_name(div), Some("div"));
    }

    #[test]
    fn test_textarea_whitespace_preserved() {
        let doc = HtmlParser::new().parse("<textarea maxlength=\"10\">   </textarea>");
        let textarea = doc.query_selector("textarea").unwrap().unwrap();
        assert_eq!(doc.tree().value(textarea), "   ");
    }
}
