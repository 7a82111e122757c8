//! fOS HTML
//!
//! HTML5 parsing (html5ever) into the fOS arena DOM, and serialization
//! back to markup for `innerHTML`/`outerHTML`.

mod parser;
mod serializer;

pub use fos_dom::Document;
pub use parser::HtmlParser;
pub use serializer::{HtmlSerializer, inner_html, outer_html};

/// Parse an HTML string into a Document
pub fn parse(html: &str) -> Document {
    HtmlParser::new().parse(html)
}
