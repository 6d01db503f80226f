/// Application name
pub const APP_NAME: &str = "SBI Forum";

/// Key under which the whole application state is persisted
pub const STATE_KEY: &str = "sbiForumState";

/// Maximum media attachment size in bytes (500 MiB)
pub const MAX_MEDIA_SIZE: u64 = 500 * 1024 * 1024;

/// Number of characters shown in a search result preview
pub const SEARCH_PREVIEW_CHARS: usize = 100;

/// Placeholder avatar used until the user picks a profile picture
pub const DEFAULT_PROFILE_PIC: &str = "https://via.placeholder.com/150";

/// Placeholder cover used until the user picks a cover picture
pub const DEFAULT_COVER_PIC: &str = "https://via.placeholder.com/600x200";

/// MIME type assigned to files whose type cannot be determined
pub const FALLBACK_MIME: &str = "application/octet-stream";

/// Date format used by the feed renderer
pub const DATE_FORMAT: &str = "%d/%m/%Y";
