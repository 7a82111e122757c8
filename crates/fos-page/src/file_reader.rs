//! FileReader
//!
//! Reads a selected file into a `data:` URL. The page queues the read and
//! calls [`read_as_data_url`] when the task completes.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use fos_dom::FileEntry;

/// MIME type reported for files without one
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// FileReader error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileReadError {
    #[error("File not readable: {0}")]
    NotReadable(String),
}

/// Read `file` as a base64 data URL
pub fn read_as_data_url(file: &FileEntry) -> Result<String, FileReadError> {
    match &file.content {
        Some(bytes) => Ok(data_url(&file.mime_type, bytes)),
        None => Err(FileReadError::NotReadable(file.name.clone())),
    }
}

/// Build a `data:<mime>;base64,<payload>` URL
pub fn data_url(mime_type: &str, bytes: &[u8]) -> String {
    let mime_type = if mime_type.is_empty() { FALLBACK_MIME_TYPE } else { mime_type };
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_as_data_url() {
        let file = FileEntry::new("hello.txt", "text/plain", b"Hello".to_vec());
        assert_eq!(read_as_data_url(&file).unwrap(), "data:text/plain;base64,SGVsbG8=");
    }

    #[test]
    fn test_unreadable_file() {
        let file = FileEntry::unreadable("gone.png", 2048, "image/png");
        assert_eq!(read_as_data_url(&file), Err(FileReadError::NotReadable("gone.png".into())));
    }

    #[test]
    fn test_missing_mime_type() {
        assert_eq!(data_url("", &[0xff]), "data:application/octet-stream;base64,/w==");
        assert_eq!(data_url("image/png", &[]), "data:image/png;base64,");
    }
}
