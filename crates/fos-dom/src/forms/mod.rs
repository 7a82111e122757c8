//! Form control state
//!
//! Selected files for file inputs and helpers for control classification.

mod files;

pub use files::{FileEntry, FileList};

/// Prefix browsers put before a selected file's name in `input.value`
pub const FAKE_PATH_PREFIX: &str = "C:\\fakepath\\";

/// Tags whose live value is user-editable
pub fn is_form_control(tag: &str) -> bool {
    matches!(tag, "input" | "textarea" | "select")
}

/// Tags that accept typed text
pub fn is_text_control(tag: &str) -> bool {
    matches!(tag, "input" | "textarea")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_tags() {
        assert!(is_form_control("select"));
        assert!(!is_text_control("select"));
        assert!(is_text_control("textarea"));
        assert!(!is_form_control("div"));
    }
}
