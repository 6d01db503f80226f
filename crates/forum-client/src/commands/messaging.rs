use chrono::Utc;
use forum_shared::{ForumError, MessageId};
use forum_store::{KeyValueStore, Message};
use tracing::{debug, info};

use crate::render::render_chat;
use crate::state::Forum;

impl<S: KeyValueStore> Forum<S> {
    /// Append a chat message from the current user.
    pub fn send_message(&mut self, content: &str) -> Result<MessageId, ForumError> {
        let author = self.require_profile()?;

        let content = content.trim();
        if content.is_empty() {
            debug!("Empty message ignored");
            return Err(ForumError::EmptyMessage);
        }

        let message = Message {
            id: MessageId::new(),
            user_id: author.id,
            username: author.username,
            content: content.to_string(),
            timestamp: Utc::now(),
            is_sent: true,
        };
        let id = message.id;

        self.state.messages.push(message);
        self.persist_or_revert(|state| {
            state.messages.pop();
        })?;
        self.display.chat = render_chat(&self.state.messages);

        info!(msg_id = %id, "Message sent");
        Ok(id)
    }
}
