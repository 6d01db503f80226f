use forum_shared::ForumError;
use forum_store::{BackupPayload, KeyValueStore};
use tracing::info;

use crate::state::Forum;

impl<S: KeyValueStore> Forum<S> {
    /// Export the whole state as pretty-printed JSON.
    pub fn export_state(&self) -> Result<String, ForumError> {
        let json = BackupPayload::new(self.state.clone())
            .to_json()
            .map_err(|e| ForumError::Store(e.to_string()))?;

        info!(
            posts = self.state.posts.len(),
            messages = self.state.messages.len(),
            "State exported"
        );
        Ok(json)
    }

    /// Replace the whole state with an export (or a raw stored document).
    pub fn import_state(&mut self, json: &str) -> Result<(), ForumError> {
        let BackupPayload { version, state, .. } =
            BackupPayload::from_json(json).map_err(|e| ForumError::InvalidImport(e.to_string()))?;

        let previous = std::mem::replace(&mut self.state, state);
        self.persist_or_revert(move |state| *state = previous)?;
        self.render_all();

        info!(
            %version,
            posts = self.state.posts.len(),
            messages = self.state.messages.len(),
            "State imported"
        );
        Ok(())
    }
}
