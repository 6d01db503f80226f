use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use forum_shared::media::guess_mime;
use forum_shared::{ForumError, MediaId};
use forum_store::KeyValueStore;
use tracing::{info, warn};

use crate::render::render_staging;
use crate::state::{Forum, StagedMedia};

impl<S: KeyValueStore> Forum<S> {
    /// Read a file into the staging area.
    ///
    /// The size is checked before anything is read. `mime` is what the file
    /// picker reported; when absent it is guessed from the extension. The
    /// item is staged once the read has completed, so awaiting this before
    /// [`publish_post`](Forum::publish_post) guarantees the attachment is
    /// included.
    pub async fn stage_file(
        &mut self,
        path: impl AsRef<Path>,
        mime: Option<&str>,
    ) -> Result<MediaId, ForumError> {
        let path = path.as_ref();

        let size = tokio::fs::metadata(path)
            .await
            .map_err(|e| ForumError::MediaRead(e.to_string()))?
            .len();
        self.check_media_size(size)?;

        let data = tokio::fs::read(path)
            .await
            .map_err(|e| ForumError::MediaRead(e.to_string()))?;

        let mime = mime.unwrap_or_else(|| guess_mime(path));
        self.stage_bytes(mime, &data)
    }

    /// Stage already loaded bytes as an attachment of type `mime`.
    pub fn stage_bytes(&mut self, mime: &str, data: &[u8]) -> Result<MediaId, ForumError> {
        self.check_media_size(data.len() as u64)?;

        let item = StagedMedia {
            id: MediaId::new(),
            src: format!("data:{mime};base64,{}", STANDARD.encode(data)),
            mime_type: mime.to_string(),
        };
        let id = item.id;

        self.composer.staged.push(item);
        self.display.staging = render_staging(&self.composer.staged);

        info!(media_id = %id, mime, size = data.len(), "Media staged");
        Ok(id)
    }

    /// Drop one staged item. Returns whether it was there.
    pub fn remove_staged(&mut self, id: MediaId) -> bool {
        let before = self.composer.staged.len();
        self.composer.staged.retain(|item| item.id != id);
        let removed = self.composer.staged.len() != before;

        if removed {
            self.display.staging = render_staging(&self.composer.staged);
            info!(media_id = %id, "Staged media removed");
        }
        removed
    }

    fn check_media_size(&self, size: u64) -> Result<(), ForumError> {
        let max = self.settings.max_media_size;
        if size > max {
            warn!(size, max, "Media rejected: too large");
            return Err(ForumError::MediaTooLarge { size, max });
        }
        Ok(())
    }
}
