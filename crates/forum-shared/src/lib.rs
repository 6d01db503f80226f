//! # forum-shared
//!
//! Types shared by the forum store and client: identifiers, the theme and
//! screen enums, media classification, constants and the user-facing error
//! taxonomy.

pub mod constants;
pub mod error;
pub mod media;
pub mod types;

pub use error::ForumError;
pub use media::MediaKind;
pub use types::{MediaId, MessageId, PostId, Screen, Theme, UserId};
