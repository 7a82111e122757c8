//! Example: wire the page behaviors on a small document

use fos_page::{BasicToolkit, FileEntry, Page, PageConfig};

const HTML: &str = r##"
<!DOCTYPE html>
<html>
<body>
  <div class="alert alert-success" id="flash">Saved</div>
  <a href="#contact" id="jump">Contact</a>
  <span data-bs-toggle="tooltip" title="Opens in a new tab">?</span>
  <form id="contact" novalidate>
    <input name="email" id="email" required>
    <textarea name="message" id="message" maxlength="20"></textarea>
    <input type="file" id="avatar">
    <img id="avatar-preview" style="display: none">
  </form>
</body>
</html>
"##;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = PageConfig::from_json(r#"{"alert_dismiss_delay_ms": 3000}"#)?;
    let mut page = Page::from_html(HTML, Box::new(BasicToolkit), config);
    let report = page.dom_content_loaded();
    println!("Initialized: {report:?}");

    let doc = page.document();
    let find = |id: &str| doc.get_element_by_id(id).ok_or_else(|| anyhow::anyhow!("no #{id}"));
    let (jump, form, message, avatar) = (find("jump")?, find("contact")?, find("message")?, find("avatar")?);

    page.click(jump)?;
    println!("Scroll requests: {:?}", page.take_scroll_requests());

    println!("Empty submit: {:?}", page.submit(form)?);

    page.type_text(message, "Hello from fOS, again")?;
    println!("Counter state: {:?}", page.counter_state(message));

    page.set_files(avatar, [FileEntry::new("a.png", "image/png", vec![0x89, b'P'])].into_iter().collect())?;
    page.preview_image(avatar, "avatar-preview");
    page.run_until_idle();
    println!("Preview src: {:?}", page.document().tree().get_attr(find_preview(&page)?, "src"));

    page.advance_time(3000);
    println!("Alert still connected: {}", page.document().get_element_by_id("flash").is_some());
    Ok(())
}

fn find_preview(page: &Page) -> anyhow::Result<fos_page::NodeId> {
    page.document()
        .get_element_by_id("avatar-preview")
        .ok_or_else(|| anyhow::anyhow!("no preview"))
}
