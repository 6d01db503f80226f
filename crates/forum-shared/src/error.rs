use thiserror::Error;

/// Every way a user action can be refused.
///
/// The `Display` text of each variant is the notice shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ForumError {
    #[error("Please create a profile first")]
    NoProfile,

    #[error("Please enter a username")]
    EmptyUsername,

    #[error("Please write some content")]
    EmptyPost,

    #[error("Message is empty")]
    EmptyMessage,

    #[error("File is too large: {size} bytes (max {max})")]
    MediaTooLarge { size: u64, max: u64 },

    #[error("Failed to read media: {0}")]
    MediaRead(String),

    #[error("Invalid import: {0}")]
    InvalidImport(String),

    #[error("Storage error: {0}")]
    Store(String),
}

impl ForumError {
    /// Whether the front-end should surface this error as a notice.
    ///
    /// An empty chat input is dropped without feedback.
    pub fn is_notice(&self) -> bool {
        !matches!(self, ForumError::EmptyMessage)
    }
}

/// Convenience alias for operations that can be refused.
pub type Result<T> = std::result::Result<T, ForumError>;
