//! File selection for `<input type="file">`

/// File entry from a file input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub last_modified: u64,
    /// File bytes; `None` when the file could not be read
    pub content: Option<Vec<u8>>,
}

impl FileEntry {
    /// Readable file with in-memory contents
    pub fn new(name: &str, mime_type: &str, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size: content.len() as u64,
            mime_type: mime_type.into(),
            last_modified: 0,
            content: Some(content),
        }
    }

    /// File whose bytes are not available (permission revoked, removed from disk)
    pub fn unreadable(name: &str, size: u64, mime_type: &str) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: mime_type.into(),
            last_modified: 0,
            content: None,
        }
    }

    pub fn extension(&self) -> Option<&str> {
        let (_, ext) = self.name.rsplit_once('.')?;
        Some(ext)
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

/// File list from input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileList {
    files: Vec<FileEntry>,
}

impl FileList {
    pub fn new() -> Self { Self::default() }
    pub fn add(&mut self, file: FileEntry) { self.files.push(file); }
    pub fn len(&self) -> usize { self.files.len() }
    pub fn is_empty(&self) -> bool { self.files.is_empty() }
    pub fn get(&self, index: usize) -> Option<&FileEntry> { self.files.get(index) }
    pub fn first(&self) -> Option<&FileEntry> { self.files.first() }
    pub fn total_size(&self) -> u64 { self.files.iter().map(|f| f.size).sum() }
    pub fn iter(&self) -> impl Iterator<Item = &FileEntry> { self.files.iter() }
}

impl FromIterator<FileEntry> for FileList {
    fn from_iter<I: IntoIterator<Item = FileEntry>>(iter: I) -> Self {
        Self { files: iter.into_iter().collect() }
    }
}
