//! fOS Page Behaviors
//!
//! Small UI conveniences for server-rendered pages, wired once the document
//! is ready:
//!
//! - tooltips on `[data-bs-toggle="tooltip"]` triggers
//! - alerts closed after 5 seconds unless marked `alert-permanent`
//! - smooth scrolling for `a[href^="#"]` links
//! - required-field validation on `form[novalidate]`
//! - a live `k/M` counter after every `textarea[maxlength]`
//!
//! plus two utilities callable from markup handlers:
//! [`Page::preview_image`] and [`Page::validate_form`].
//!
//! ```ignore
//! let mut page = Page::from_html(html, Box::new(BasicToolkit), PageConfig::default());
//! page.dom_content_loaded();
//! page.advance_time(5000); // alerts close
//! ```

mod behaviors;
mod config;
mod error;
mod event_loop;
mod file_reader;
mod listeners;
mod page;
mod scroll;
mod widgets;

pub use behaviors::{CHAR_COUNT_CLASS, CounterState, DANGER_CLASS, INVALID_CLASS, InitReport, WARNING_CLASS};
pub use config::{
    ConfigError, DEFAULT_ALERT_DISMISS_DELAY_MS, DEFAULT_PERMANENT_ALERT_CLASS, DEFAULT_TOOLTIP_SELECTOR, PageConfig,
};
pub use error::{PageError, PageResult};
pub use event_loop::{CancellationToken, EventLoop, TimerHandle};
pub use file_reader::{FALLBACK_MIME_TYPE, FileReadError, data_url, read_as_data_url};
pub use listeners::{Handler, ListenerRegistry};
pub use page::{Page, SubmitOutcome};
pub use scroll::{ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, ScrollManager, ScrollRequest};
pub use widgets::{BasicToolkit, DismissibleAlert, Tooltip, WidgetError, WidgetToolkit};

pub use fos_dom::{Document, FileEntry, FileList, NodeId};
