//! Image preview for file inputs

use fos_dom::{DomResult, FileEntry, NodeId};

use crate::behaviors::Task;
use crate::event_loop::TimerHandle;
use crate::file_reader::read_as_data_url;
use crate::page::Page;

impl Page {
    /// Show the input's first file in the `<img>` with id `preview_id`
    ///
    /// With a file, the read is queued and the image is updated when it
    /// completes; the returned handle can cancel it. Without one, the image
    /// is cleared and hidden immediately.
    pub fn preview_image(&mut self, input: NodeId, preview_id: &str) -> Option<TimerHandle> {
        let Some(preview) = self.document.get_element_by_id(preview_id) else {
            tracing::debug!("No preview element #{}", preview_id);
            return None;
        };

        let file = self.document.tree().files(input).and_then(|files| files.first()).cloned();
        match file {
            Some(file) => {
                tracing::trace!(file = %file.name, size = file.size, "queued image read");
                Some(self.event_loop.queue_task(Task::CompleteImageRead { file, preview }))
            }
            None => {
                self.set_preview(preview, "", "none");
                None
            }
        }
    }

    pub(crate) fn complete_image_read(&mut self, file: FileEntry, preview: NodeId) {
        if !self.document.tree().is_connected(preview) {
            tracing::trace!(preview = %preview, "preview removed before read completed");
            return;
        }

        match read_as_data_url(&file) {
            Ok(url) => self.set_preview(preview, &url, "block"),
            Err(err) => {
                tracing::warn!("Image preview of {:?} failed: {}", file.name, err);
                self.set_preview(preview, "", "none");
            }
        }
    }

    fn set_preview(&mut self, preview: NodeId, src: &str, display: &str) {
        let tree = self.document.tree_mut();
        let updated: DomResult<()> = tree
            .set_attr(preview, "src", src)
            .and_then(|_| tree.set_style_property(preview, "display", display));
        if let Err(err) = updated {
            tracing::warn!("Preview {} not updated: {}", preview, err);
        }
    }
}
