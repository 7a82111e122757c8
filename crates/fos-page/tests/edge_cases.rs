//! Edge case tests for fos-page
//!
//! Re-initialization, malformed markup, detached elements and odd inputs.

use fos_page::{
    BasicToolkit, CounterState, FileEntry, FileList, INVALID_CLASS, NodeId, Page, PageConfig, PageError,
    SubmitOutcome, data_url,
};

fn basic_page(html: &str) -> Page {
    let mut page = Page::from_html(html, Box::new(BasicToolkit), PageConfig::default());
    page.dom_content_loaded();
    page
}

fn by_id(page: &Page, id: &str) -> NodeId {
    page.document().get_element_by_id(id).unwrap()
}

fn one_file(file: FileEntry) -> FileList {
    [file].into_iter().collect()
}

// ============================================================================
// RE-INITIALIZATION
// ============================================================================

const EVERYTHING: &str = r##"
    <div class="alert">a</div>
    <a href="#f">jump</a>
    <span data-bs-toggle="tooltip" title="t">t</span>
    <form id="f" novalidate><input required></form>
    <textarea id="t" maxlength="3"></textarea>
"##;

#[test]
fn test_second_init_wires_nothing() {
    let mut page = basic_page(EVERYTHING);
    let report = page.dom_content_loaded();

    assert!(report.is_empty(), "{report:?}");
    assert_eq!(page.pending_tasks(), 1);
    assert_eq!(page.document().query_selector_all(".char-count").unwrap().len(), 1);
}

#[test]
fn test_second_init_no_duplicate_listeners() {
    let mut page = basic_page(EVERYTHING);
    page.dom_content_loaded();

    let form = by_id(&page, "f");
    page.submit(form).unwrap();
    // One validation listener means one scroll request
    assert_eq!(page.take_scroll_requests().len(), 1);
}

#[test]
fn test_init_picks_up_new_markup_only() {
    let mut page = basic_page(EVERYTHING);
    let body = page.document().body();

    let tree = page.document_mut().tree_mut();
    let textarea = tree.create_element_with_attrs("textarea", &[("maxlength", "9")]);
    tree.append_child(body, textarea).unwrap();

    let report = page.init_page_behaviors(body);
    assert_eq!(report.counters, 1);
    assert_eq!(report.alerts_scheduled, 0);
    assert!(page.counter_for(textarea).is_some());
}

#[test]
fn test_counter_rewired_after_unload() {
    let mut page = basic_page(EVERYTHING);
    let textarea = by_id(&page, "t");

    page.unload();
    assert!(page.counter_for(textarea).is_none());
    assert!(page.document().query_selector(".char-count").unwrap().is_none());

    let root = page.document().tree().root();
    assert_eq!(page.init_page_behaviors(root).counters, 1);
    page.type_text(textarea, "abcd").unwrap();

    let counter = page.counter_for(textarea).unwrap();
    assert_eq!(page.document().tree().text_content(counter), "4");
    assert_eq!(page.counter_state(textarea), Some(CounterState::Danger));
    assert_eq!(page.document().query_selector_all(".char-count").unwrap().len(), 1);
}

#[test]
fn test_init_on_subtree() {
    let mut page = Page::from_html(
        r#"<div id="a"><textarea maxlength="5"></textarea></div><div id="b"><textarea maxlength="5"></textarea></div>"#,
        Box::new(BasicToolkit),
        PageConfig::default(),
    );
    let a = by_id(&page, "a");

    let report = page.init_page_behaviors(a);
    assert_eq!(report.counters, 1);
    assert_eq!(page.document().query_selector_all(".char-count").unwrap().len(), 1);
}

#[test]
fn test_init_on_unknown_root() {
    let mut page = Page::from_html("<p></p>", Box::new(BasicToolkit), PageConfig::default());
    assert!(page.init_page_behaviors(NodeId::NONE).is_empty());
}

// ============================================================================
// ANCHORS
// ============================================================================

#[test]
fn test_bare_hash_is_not_an_error() {
    let mut page = basic_page(r##"<a id="top" href="#">Top</a>"##);
    let link = by_id(&page, "top");

    assert_eq!(page.click(link), Ok(false));
    assert!(page.take_scroll_requests().is_empty());
    assert!(page.navigations().is_empty());
}

#[test]
fn test_href_that_is_not_a_selector() {
    let mut page = basic_page(r##"<a id="l" href="#1-intro">x</a><h2 id="1-intro">Intro</h2>"##);
    let link = by_id(&page, "l");

    assert_eq!(page.click(link), Ok(false));
    assert!(page.take_scroll_requests().is_empty());
}

#[test]
fn test_anchor_to_detached_target() {
    let mut page = basic_page(r##"<a id="l" href="#gone">x</a><p id="gone"></p>"##);
    let (link, gone) = (by_id(&page, "l"), by_id(&page, "gone"));
    page.document_mut().tree_mut().detach(gone);

    page.click(link).unwrap();
    assert!(page.take_scroll_requests().is_empty());
}

#[test]
fn test_external_link_not_intercepted() {
    let mut page = basic_page(r#"<a id="l" href="https://example.com/#x">x</a><p id="x"></p>"#);
    let link = by_id(&page, "l");

    assert_eq!(page.click(link), Ok(true));
    assert_eq!(page.navigations(), ["https://example.com/#x".to_string()]);
}

// ============================================================================
// VALIDATION
// ============================================================================

#[test]
fn test_validation_recomputed_each_attempt() {
    let mut page = basic_page(r#"<form id="f" novalidate><input id="i" required></form>"#);
    let (form, input) = (by_id(&page, "f"), by_id(&page, "i"));

    assert_eq!(page.submit(form), Ok(SubmitOutcome::Blocked));
    page.fill(input, "ok").unwrap();
    assert_eq!(page.submit(form), Ok(SubmitOutcome::Accepted));
    page.fill(input, " ").unwrap();
    assert_eq!(page.submit(form), Ok(SubmitOutcome::Blocked));
    assert!(page.document().tree().has_class(input, INVALID_CLASS));
}

#[test]
fn test_prefilled_value_attribute_counts() {
    let mut page = basic_page(r#"<form id="f" novalidate><input required value="Jane"></form>"#);
    let form = by_id(&page, "f");
    assert_eq!(page.submit(form), Ok(SubmitOutcome::Accepted));
}

#[test]
fn test_required_checkbox_without_value_attribute() {
    let mut page = basic_page(r#"<form id="f" novalidate><input id="c" type="checkbox" required checked></form>"#);
    let (form, checkbox) = (by_id(&page, "f"), by_id(&page, "c"));

    assert_eq!(page.document().tree().value(checkbox), "on");
    assert_eq!(page.submit(form), Ok(SubmitOutcome::Accepted));
    assert!(!page.document().tree().has_class(checkbox, INVALID_CLASS));
}

#[test]
fn test_required_file_input_needs_a_file() {
    let mut page = basic_page(r#"<form id="f" novalidate><input id="a" type="file" required></form>"#);
    let (form, input) = (by_id(&page, "f"), by_id(&page, "a"));

    assert_eq!(page.submit(form), Ok(SubmitOutcome::Blocked));
    assert!(page.document().tree().has_class(input, INVALID_CLASS));

    page.set_files(input, one_file(FileEntry::new("me.png", "image/png", vec![1]))).unwrap();
    assert_eq!(page.document().tree().value(input), "C:\\fakepath\\me.png");
    assert_eq!(page.submit(form), Ok(SubmitOutcome::Accepted));
    assert!(!page.document().tree().has_class(input, INVALID_CLASS));
    assert!(page.validate_form(form));

    page.clear_files(input).unwrap();
    assert!(!page.validate_form(form));
}

#[test]
fn test_required_on_non_control_ignored() {
    let mut page = basic_page(r#"<form id="f" novalidate><div id="d" required></div></form>"#);
    let form = by_id(&page, "f");

    assert_eq!(page.submit(form), Ok(SubmitOutcome::Accepted));
    assert!(!page.document().tree().has_class(by_id(&page, "d"), INVALID_CLASS));
}

#[test]
fn test_scrolls_to_first_flagged_element_in_order() {
    let mut page = basic_page(
        r#"<form id="f" novalidate>
             <p id="note" class="is-invalid">server-side error</p>
             <input id="i" required>
           </form>"#,
    );
    let form = by_id(&page, "f");

    page.submit(form).unwrap();
    assert_eq!(page.take_scroll_requests()[0].target, by_id(&page, "note"));
}

#[test]
fn test_validate_form_on_empty_container() {
    let mut page = basic_page(r#"<div id="d"></div>"#);
    assert!(page.validate_form(by_id(&page, "d")));
}

#[test]
fn test_nested_forms_are_flattened_by_parser() {
    // The HTML parser drops the inner <form>; its field belongs to the outer one
    let mut page = basic_page(r#"<form id="outer" novalidate><form id="inner"><input id="i" required></form></form>"#);
    assert!(page.document().get_element_by_id("inner").is_none());

    let outer = by_id(&page, "outer");
    assert_eq!(page.submit(outer), Ok(SubmitOutcome::Blocked));
}

// ============================================================================
// COUNTER
// ============================================================================

#[test]
fn test_invalid_maxlength_skipped() {
    let page = basic_page(
        r#"<textarea id="a" maxlength="lots"></textarea>
           <textarea id="b" maxlength="-1"></textarea>
           <textarea id="c" maxlength=" 12 "></textarea>"#,
    );
    assert!(page.counter_for(by_id(&page, "a")).is_none());
    assert!(page.counter_for(by_id(&page, "b")).is_none());
    assert!(page.counter_for(by_id(&page, "c")).is_some());
}

#[test]
fn test_zero_maxlength() {
    let mut page = basic_page(r#"<textarea id="t" maxlength="0"></textarea>"#);
    let t = by_id(&page, "t");

    assert_eq!(page.counter_state(t), Some(CounterState::Normal));
    page.type_text(t, "x").unwrap();
    assert_eq!(page.counter_state(t), Some(CounterState::Danger));
}

#[test]
fn test_counter_counts_utf16_units() {
    let mut page = basic_page(r#"<textarea id="t" maxlength="10"></textarea>"#);
    let t = by_id(&page, "t");
    let counter = page.counter_for(t).unwrap();

    page.fill(t, "héllo😀").unwrap();
    assert_eq!(page.document().tree().text_content(counter), "7");
}

#[test]
fn test_counter_in_detached_textarea_keeps_updating() {
    let mut page = basic_page(r#"<div id="w"><textarea id="t" maxlength="4"></textarea></div>"#);
    let (wrap, t) = (by_id(&page, "w"), by_id(&page, "t"));
    page.document_mut().tree_mut().detach(wrap);

    page.fill(t, "abcde").unwrap();
    assert_eq!(page.counter_state(t), Some(CounterState::Danger));
}

#[test]
fn test_textarea_without_maxlength_has_no_counter() {
    let page = basic_page(r#"<textarea id="t"></textarea>"#);
    assert!(page.counter_for(by_id(&page, "t")).is_none());
    assert!(page.document().query_selector(".char-count").unwrap().is_none());
}

// ============================================================================
// PREVIEW
// ============================================================================

const AVATAR: &str = r#"<input type="file" id="f"><img id="p">"#;

#[test]
fn test_missing_preview_element_is_noop() {
    let mut page = basic_page(AVATAR);
    let input = by_id(&page, "f");
    page.set_files(input, one_file(FileEntry::new("a.png", "image/png", vec![1]))).unwrap();

    assert!(page.preview_image(input, "nope").is_none());
    assert_eq!(page.pending_tasks(), 0);
}

#[test]
fn test_preview_removed_before_completion() {
    let mut page = basic_page(AVATAR);
    let (input, preview) = (by_id(&page, "f"), by_id(&page, "p"));
    page.set_files(input, one_file(FileEntry::new("a.png", "image/png", vec![1]))).unwrap();
    page.preview_image(input, "p").unwrap();

    page.document_mut().tree_mut().detach(preview);
    assert_eq!(page.run_until_idle(), 1);
    assert!(!page.document().tree().has_attr(preview, "src"));
}

#[test]
fn test_unreadable_file_clears_preview() {
    let mut page = basic_page(r#"<input type="file" id="f"><img id="p" src="old.png" style="display: block">"#);
    let (input, preview) = (by_id(&page, "f"), by_id(&page, "p"));
    page.set_files(input, one_file(FileEntry::unreadable("huge.png", 1 << 30, "image/png"))).unwrap();
    page.preview_image(input, "p").unwrap();

    page.run_until_idle();
    let tree = page.document().tree();
    assert_eq!(tree.get_attr(preview, "src"), Some(""));
    assert_eq!(tree.style_property(preview, "display").as_deref(), Some("none"));
}

#[test]
fn test_only_first_file_previewed() {
    let mut page = basic_page(AVATAR);
    let (input, preview) = (by_id(&page, "f"), by_id(&page, "p"));
    let files: FileList = [
        FileEntry::new("a.gif", "image/gif", b"A".to_vec()),
        FileEntry::new("b.gif", "image/gif", b"B".to_vec()),
    ]
    .into_iter()
    .collect();
    page.set_files(input, files).unwrap();
    page.preview_image(input, "p").unwrap();

    page.run_until_idle();
    let expected = data_url("image/gif", b"A");
    assert_eq!(page.document().tree().get_attr(preview, "src"), Some(expected.as_str()));
}

#[test]
fn test_preview_reads_are_not_cancelled_by_new_selection() {
    let mut page = basic_page(AVATAR);
    let (input, preview) = (by_id(&page, "f"), by_id(&page, "p"));

    page.set_files(input, one_file(FileEntry::new("a.png", "image/png", b"1".to_vec()))).unwrap();
    page.preview_image(input, "p").unwrap();
    page.set_files(input, one_file(FileEntry::new("b.png", "image/png", b"2".to_vec()))).unwrap();
    page.preview_image(input, "p").unwrap();

    // Reads complete in order; the last one wins
    assert_eq!(page.run_until_idle(), 2);
    let expected = data_url("image/png", b"2");
    assert_eq!(page.document().tree().get_attr(preview, "src"), Some(expected.as_str()));
}

#[test]
fn test_file_without_mime_type() {
    let mut page = basic_page(AVATAR);
    let (input, preview) = (by_id(&page, "f"), by_id(&page, "p"));
    page.set_files(input, one_file(FileEntry::new("blob", "", vec![0]))).unwrap();
    page.preview_image(input, "p").unwrap();

    page.run_until_idle();
    assert_eq!(
        page.document().tree().get_attr(preview, "src"),
        Some("data:application/octet-stream;base64,AA==")
    );
}

// ============================================================================
// ACTION ERRORS
// ============================================================================

#[test]
fn test_actions_reject_non_elements() {
    let mut page = basic_page("<p>text</p>");
    let p = page.document().query_selector("p").unwrap().unwrap();
    let text = page.document().tree().first_child(p).unwrap();

    assert_eq!(page.click(text), Err(PageError::NotAnElement(text)));
    assert_eq!(page.submit(text), Err(PageError::NotAnElement(text)));
    assert_eq!(page.click(NodeId::NONE), Err(PageError::NotAnElement(NodeId::NONE)));
}

#[test]
fn test_file_input_type_is_case_insensitive() {
    let mut page = basic_page(r#"<input id="f" type="FILE">"#);
    let input = by_id(&page, "f");
    assert!(page.set_files(input, FileList::new()).is_ok());
}

#[test]
fn test_invalid_config_selector_disables_tooltips() {
    let config = PageConfig { tooltip_selector: "[".into(), ..PageConfig::default() };
    let mut page = Page::from_html(r#"<b data-bs-toggle="tooltip">x</b>"#, Box::new(BasicToolkit), config);
    assert_eq!(page.dom_content_loaded().tooltips, 0);
}
