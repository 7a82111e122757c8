//! Page host
//!
//! Owns the document, the injected widget toolkit and the event loop, and
//! exposes the actions a user (or a test) performs on the page.

use std::collections::HashMap;
use std::fmt;

use fos_dom::forms::is_text_control;
use fos_dom::{Document, Event, EventType, FileList, NodeId};

use crate::behaviors::{InitReport, Task};
use crate::config::PageConfig;
use crate::error::{PageError, PageResult};
use crate::event_loop::{EventLoop, TimerHandle};
use crate::listeners::{Handler, ListenerRegistry};
use crate::scroll::{ScrollBehavior, ScrollManager, ScrollRequest};
use crate::widgets::{Tooltip, WidgetToolkit};

/// Result of a submit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The form would be sent
    Accepted,
    /// A listener prevented submission
    Blocked,
}

/// A loaded page with its behaviors
pub struct Page {
    pub(crate) document: Document,
    pub(crate) toolkit: Box<dyn WidgetToolkit>,
    pub(crate) config: PageConfig,
    pub(crate) event_loop: EventLoop<Task>,
    pub(crate) listeners: ListenerRegistry,
    pub(crate) scroll: ScrollManager,
    /// Tooltip per trigger element
    pub(crate) tooltips: HashMap<NodeId, Box<dyn Tooltip>>,
    /// Pending dismissal per alert
    pub(crate) alert_timers: HashMap<NodeId, TimerHandle>,
    /// Counter span per textarea
    pub(crate) counters: HashMap<NodeId, NodeId>,
    submitted_forms: Vec<NodeId>,
    navigations: Vec<String>,
}

impl Page {
    pub fn new(document: Document, toolkit: Box<dyn WidgetToolkit>, config: PageConfig) -> Self {
        Self {
            document,
            toolkit,
            config,
            event_loop: EventLoop::new(),
            listeners: ListenerRegistry::new(),
            scroll: ScrollManager::new(),
            tooltips: HashMap::new(),
            alert_timers: HashMap::new(),
            counters: HashMap::new(),
            submitted_forms: Vec::new(),
            navigations: Vec::new(),
        }
    }

    /// Parse markup and build a page around it
    pub fn from_html(html: &str, toolkit: Box<dyn WidgetToolkit>, config: PageConfig) -> Self {
        Self::new(fos_html::parse(html), toolkit, config)
    }

    // === Lifecycle ===

    /// Document ready: wire every behavior on the whole document
    pub fn dom_content_loaded(&mut self) -> InitReport {
        let root = self.document.tree().root();
        self.dispatch_event(EventType::DOMContentLoaded, root);
        self.init_page_behaviors(root)
    }

    /// Wire every behavior on the elements under `root`
    ///
    /// Safe to call again: elements that are already wired are skipped, so
    /// a second run only picks up new markup.
    pub fn init_page_behaviors(&mut self, root: NodeId) -> InitReport {
        if self.document.tree().get(root).is_none() {
            tracing::warn!("init_page_behaviors: unknown root {}", root);
            return InitReport::default();
        }

        let report = InitReport {
            tooltips: self.init_tooltips(root),
            alerts_scheduled: self.init_alerts(root),
            anchors: self.init_anchors(root),
            forms: self.init_forms(root),
            counters: self.init_counters(root),
        };
        tracing::debug!(?report, "page behaviors initialized");
        report
    }

    /// Tear down tooltips and counters and drop every pending task
    ///
    /// A later `init_page_behaviors` wires the page again from scratch.
    pub fn unload(&mut self) {
        for (_, mut tooltip) in self.tooltips.drain() {
            tooltip.dispose(&mut self.document);
        }
        self.remove_counters();
        self.event_loop.cancel_all();
        self.alert_timers.clear();
        self.listeners.clear();
        tracing::debug!("page unloaded");
    }

    // === Time ===

    /// Current virtual time (ms)
    pub fn now(&self) -> u64 {
        self.event_loop.now()
    }

    /// Run everything due within the next `delta_ms`; returns the number of tasks run
    pub fn advance_time(&mut self, delta_ms: u64) -> usize {
        let limit = self.event_loop.now().saturating_add(delta_ms);
        let mut ran = 0;
        while let Some(task) = self.event_loop.pop_next_until(limit) {
            self.run_task(task);
            ran += 1;
        }
        self.event_loop.advance_to(limit);
        ran
    }

    /// Run until nothing is scheduled, jumping the clock as needed
    pub fn run_until_idle(&mut self) -> usize {
        let mut ran = 0;
        while let Some(task) = self.event_loop.pop_next_until(u64::MAX) {
            self.run_task(task);
            ran += 1;
        }
        ran
    }

    /// Live scheduled tasks (alert timers and file reads)
    pub fn pending_tasks(&self) -> usize {
        self.event_loop.pending()
    }

    fn run_task(&mut self, task: Task) {
        match task {
            Task::DismissAlert { alert } => self.dismiss_alert(alert),
            Task::CompleteImageRead { file, preview } => self.complete_image_read(file, preview),
        }
    }

    // === User actions ===

    /// Click an element; returns `false` if a listener prevented the default action
    pub fn click(&mut self, target: NodeId) -> PageResult<bool> {
        self.require_element(target)?;
        let event = self.dispatch_event(EventType::Click, target);
        if event.is_default_prevented() {
            return Ok(false);
        }
        self.activate(target)?;
        Ok(true)
    }

    /// Append text to a control as if typed, then fire `input`
    pub fn type_text(&mut self, control: NodeId, text: &str) -> PageResult<()> {
        self.require_text_control(control)?;
        let value = self.document.tree().value(control) + text;
        self.fill(control, &value)
    }

    /// Replace a control's value, then fire `input`
    pub fn fill(&mut self, control: NodeId, value: &str) -> PageResult<()> {
        self.require_text_control(control)?;
        self.document.tree_mut().set_value(control, value)?;
        self.dispatch_event(EventType::Input, control);
        Ok(())
    }

    /// Submit a form; listeners may block it
    pub fn submit(&mut self, form: NodeId) -> PageResult<SubmitOutcome> {
        self.require_element(form)?;
        if self.document.tree().tag_name(form) != Some("form") {
            return Err(PageError::NotAForm(form));
        }

        let event = self.dispatch_event(EventType::Submit, form);
        if event.is_default_prevented() {
            tracing::trace!(form = %form, "submission blocked");
            return Ok(SubmitOutcome::Blocked);
        }
        self.submitted_forms.push(form);
        Ok(SubmitOutcome::Accepted)
    }

    /// Select files on a file input, then fire `change`
    pub fn set_files(&mut self, input: NodeId, files: FileList) -> PageResult<()> {
        self.require_element(input)?;
        let tree = self.document.tree();
        let is_file_input = tree.tag_name(input) == Some("input")
            && tree.get_attr(input, "type").is_some_and(|t| t.eq_ignore_ascii_case("file"));
        if !is_file_input {
            return Err(PageError::NotAFileInput(input));
        }

        self.document.tree_mut().set_files(input, files)?;
        self.dispatch_event(EventType::Change, input);
        Ok(())
    }

    /// Clear a file input's selection
    pub fn clear_files(&mut self, input: NodeId) -> PageResult<()> {
        self.set_files(input, FileList::new())
    }

    // === Observables ===

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Drain the `scrollIntoView` requests made so far
    pub fn take_scroll_requests(&mut self) -> Vec<ScrollRequest> {
        self.scroll.take_requests()
    }

    /// Forms that passed submission, in order
    pub fn submitted_forms(&self) -> &[NodeId] {
        &self.submitted_forms
    }

    /// Hrefs followed by unprevented link clicks
    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }

    // === Events ===

    /// Dispatch an event at `target` and bubble it through the ancestors
    pub fn dispatch_event(&mut self, event_type: EventType, target: NodeId) -> Event {
        let mut event = Event::new(event_type, target, self.event_loop.now());
        let path: Vec<NodeId> = std::iter::once(target)
            .chain(self.document.tree().ancestors(target))
            .collect();
        tracing::trace!(event = %event_type, target = %target, "dispatch");

        for node in path {
            event.current_target = node;
            let handlers = self.listeners.get(node, event_type).to_vec();
            for handler in &handlers {
                self.run_handler(handler, &mut event);
            }
            if !event.bubbles || event.is_propagation_stopped() {
                break;
            }
        }
        event
    }

    fn run_handler(&mut self, handler: &Handler, event: &mut Event) {
        match handler {
            Handler::SmoothScrollAnchor => self.on_anchor_click(event),
            Handler::ValidateOnSubmit => self.on_validated_submit(event),
            Handler::CharCounter { counter, max_length } => {
                self.update_counter(event.current_target, *counter, *max_length)
            }
        }
    }

    /// Default action of an unprevented click
    fn activate(&mut self, target: NodeId) -> PageResult<()> {
        let tree = self.document.tree();
        let mut chain = std::iter::once(target).chain(tree.ancestors(target));
        let Some(activated) = chain.find(|n| {
            matches!(tree.tag_name(*n), Some("a" | "button" | "input"))
        }) else {
            return Ok(());
        };

        if tree.tag_name(activated) == Some("a") {
            if let Some(href) = tree.get_attr(activated, "href") {
                tracing::trace!(href = %href, "navigate");
                self.navigations.push(href.to_string());
            }
            return Ok(());
        }

        if is_submit_button(&self.document, activated) {
            let form = tree.ancestors(activated).find(|a| tree.tag_name(*a) == Some("form"));
            if let Some(form) = form {
                self.submit(form)?;
            }
        }
        Ok(())
    }

    // === Helpers ===

    pub(crate) fn scroll_behavior(&self) -> ScrollBehavior {
        if self.config.smooth_scroll {
            ScrollBehavior::Smooth
        } else {
            ScrollBehavior::Instant
        }
    }

    fn require_element(&self, id: NodeId) -> PageResult<()> {
        if self.document.tree().is_element(id) {
            Ok(())
        } else {
            Err(PageError::NotAnElement(id))
        }
    }

    fn require_text_control(&self, id: NodeId) -> PageResult<()> {
        self.require_element(id)?;
        match self.document.tree().tag_name(id) {
            Some(tag) if is_text_control(tag) => Ok(()),
            _ => Err(PageError::NotATextControl(id)),
        }
    }
}

fn is_submit_button(document: &Document, id: NodeId) -> bool {
    let tree = document.tree();
    let kind = tree.get_attr(id, "type").map(str::to_ascii_lowercase);
    match tree.tag_name(id) {
        Some("button") => kind.as_deref().is_none_or(|k| k == "submit"),
        Some("input") => kind.as_deref() == Some("submit"),
        _ => false,
    }
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("url", &self.document.url())
            .field("config", &self.config)
            .field("now", &self.event_loop.now())
            .field("tooltips", &self.tooltips.len())
            .field("pending_tasks", &self.event_loop.pending())
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
