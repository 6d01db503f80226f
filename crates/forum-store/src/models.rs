//! Domain model structs persisted as one JSON document.
//!
//! Field names follow the persisted layout (`camelCase`), so a stored
//! document looks like:
//!
//! ```text
//! { "currentUser": {..} | null, "posts": [..], "messages": [..],
//!   "theme": "light" | "dark", "currentScreen": "feedScreen" }
//! ```

use chrono::{DateTime, Utc};
use forum_shared::{MediaKind, MessageId, PostId, Screen, Theme, UserId};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// The local user profile. There is at most one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    /// Display name, never empty after trimming.
    pub username: String,
    /// URI or data URI of the avatar.
    pub profile_pic: String,
    /// URI or data URI of the cover picture.
    pub cover_pic: String,
}

// ---------------------------------------------------------------------------
// Post
// ---------------------------------------------------------------------------

/// An attachment embedded in a post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Media {
    /// Data URI of the file contents.
    pub src: String,
    /// MIME type as reported when the file was picked.
    #[serde(rename = "type")]
    pub mime_type: String,
}

impl Media {
    pub fn kind(&self) -> MediaKind {
        MediaKind::from_mime(&self.mime_type)
    }
}

/// A comment under a post. Rendered, never created locally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub username: String,
    pub profile_pic: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// A feed post. Author fields are copied from the profile at creation time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub user_id: UserId,
    pub username: String,
    pub profile_pic: String,
    /// Rich-text markup exactly as the editor produced it.
    pub content: String,
    pub media: Vec<Media>,
    pub timestamp: DateTime<Utc>,
    pub likes: u32,
    pub comments: Vec<Comment>,
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// A chat message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub user_id: UserId,
    pub username: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// `true` for messages written locally.
    pub is_sent: bool,
}

// ---------------------------------------------------------------------------
// Whole state
// ---------------------------------------------------------------------------

/// Everything the application persists, stored and loaded as a unit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ForumState {
    pub current_user: Option<User>,
    /// Newest first.
    pub posts: Vec<Post>,
    /// Oldest first.
    pub messages: Vec<Message>,
    pub theme: Theme,
    pub current_screen: Screen,
}
