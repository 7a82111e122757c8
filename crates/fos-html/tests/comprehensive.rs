//! Comprehensive tests for fos-html
//!
//! Parses realistic page markup and checks the resulting arena DOM.

use fos_html::{HtmlParser, inner_html, outer_html};

const PAGE: &str = r##"<!DOCTYPE html>
<html>
    <head>
        <title>Profile</title>
    </head>
    <body>
        <nav><a href="#about">About</a> <a href="/logout">Log out</a></nav>
        <div class="alert alert-success">Saved</div>
        <div class="alert alert-danger alert-permanent">Heads up</div>
        <form id="profile" novalidate>
            <input id="name" name="name" required>
            <textarea id="bio" maxlength="200">Hi there</textarea>
            <input type="file" id="avatar" accept="image/*">
            <img id="avatar-preview" style="display: none">
            <button type="submit">Save</button>
        </form>
        <section id="about"><p>About me</p></section>
    </body>
</html>"##;

#[test]
fn test_parse_page_structure() {
    let doc = HtmlParser::new().parse(PAGE);

    assert_eq!(doc.title(), "Profile");
    assert_eq!(doc.tree().tag_name(doc.document_element()), Some("html"));
    assert!(doc.get_element_by_id("profile").is_some());
    assert!(doc.get_element_by_id("about").is_some());
}

#[test]
fn test_attributes_preserved() {
    let doc = HtmlParser::new().parse(PAGE);
    let tree = doc.tree();

    let form = doc.get_element_by_id("profile").unwrap();
    assert!(tree.has_attr(form, "novalidate"));
    assert_eq!(tree.get_attr(form, "novalidate"), Some(""));

    let bio = doc.get_element_by_id("bio").unwrap();
    assert_eq!(tree.get_attr(bio, "maxlength"), Some("200"));
    assert_eq!(tree.value(bio), "Hi there");

    let preview = doc.get_element_by_id("avatar-preview").unwrap();
    assert_eq!(tree.style_property(preview, "display").as_deref(), Some("none"));
}

#[test]
fn test_selectors_over_parsed_page() {
    let doc = HtmlParser::new().parse(PAGE);

    let anchors = doc.query_selector_all("a[href^=\"#\"]").unwrap();
    assert_eq!(anchors.len(), 1);

    let dismissible = doc.query_selector_all(".alert:not(.alert-permanent)").unwrap();
    assert_eq!(dismissible.len(), 1);
    assert_eq!(doc.tree().text_content(dismissible[0]), "Saved");

    let required = doc.query_selector_all("form[novalidate] [required]").unwrap();
    assert_eq!(required.len(), 1);
}

#[test]
fn test_document_order() {
    let doc = HtmlParser::new().parse(PAGE);
    let alerts = doc.query_selector_all(".alert").unwrap();
    assert_eq!(alerts.len(), 2);
    assert!(doc.tree().has_class(alerts[0], "alert-success"));
    assert!(doc.tree().has_class(alerts[1], "alert-danger"));
}

#[test]
fn test_serialize_parsed_fragment() {
    let doc = HtmlParser::new().parse(r#"<div id="box"><span class="char-count">3</span>/10</div>"#);
    let div = doc.get_element_by_id("box").unwrap();

    assert_eq!(inner_html(doc.tree(), div), r#"<span class="char-count">3</span>/10"#);
    assert_eq!(
        outer_html(doc.tree(), div),
        r#"<div id="box"><span class="char-count">3</span>/10</div>"#
    );
}

#[test]
fn test_parse_with_url() {
    let doc = HtmlParser::new().parse_with_url("<p>x</p>", "https://example.com/profile");
    assert_eq!(doc.url(), "https://example.com/profile");
}

#[test]
fn test_free_parse_function() {
    let doc = fos_html::parse("<textarea maxlength=\"5\"></textarea>");
    let textarea = doc.query_selector("textarea").unwrap().unwrap();
    assert_eq!(doc.tree().value(textarea), "");
}
