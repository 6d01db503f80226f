//! Client configuration loaded from environment variables.
//!
//! All settings have defaults so the forum starts with zero configuration.

use std::path::PathBuf;

use forum_shared::constants::{DEFAULT_COVER_PIC, DEFAULT_PROFILE_PIC, MAX_MEDIA_SIZE};
use forum_store::{Database, KeyValueStore, MemoryStore, StoreError};

/// Limits and placeholders used by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForumSettings {
    /// Largest accepted attachment, in bytes.
    pub max_media_size: u64,
    /// Avatar used when the profile form has none.
    pub default_profile_pic: String,
    /// Cover used when the profile form has none.
    pub default_cover_pic: String,
}

impl Default for ForumSettings {
    fn default() -> Self {
        Self {
            max_media_size: MAX_MEDIA_SIZE,
            default_profile_pic: DEFAULT_PROFILE_PIC.to_string(),
            default_cover_pic: DEFAULT_COVER_PIC.to_string(),
        }
    }
}

/// Process configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForumConfig {
    /// SQLite file holding the state.
    /// Env: `FORUM_DB_PATH`
    /// Default: `forum.db` in the platform data directory.
    pub db_path: Option<PathBuf>,

    /// Keep state in memory only; nothing survives the process.
    /// Env: `FORUM_EPHEMERAL` (true/false)
    /// Default: `false`
    pub ephemeral: bool,

    /// Env: `FORUM_MAX_MEDIA_BYTES`, `FORUM_DEFAULT_PROFILE_PIC`,
    /// `FORUM_DEFAULT_COVER_PIC`
    pub settings: ForumSettings,
}

impl ForumConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`ForumConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup("FORUM_DB_PATH") {
            if !path.is_empty() {
                config.db_path = Some(PathBuf::from(path));
            }
        }

        if let Some(val) = lookup("FORUM_EPHEMERAL") {
            config.ephemeral = val == "true" || val == "1";
        }

        if let Some(val) = lookup("FORUM_MAX_MEDIA_BYTES") {
            match val.parse::<u64>() {
                Ok(max) if max > 0 => config.settings.max_media_size = max,
                _ => {
                    tracing::warn!(
                        value = %val,
                        "Invalid FORUM_MAX_MEDIA_BYTES, using default"
                    );
                }
            }
        }

        if let Some(pic) = lookup("FORUM_DEFAULT_PROFILE_PIC") {
            config.settings.default_profile_pic = pic;
        }

        if let Some(pic) = lookup("FORUM_DEFAULT_COVER_PIC") {
            config.settings.default_cover_pic = pic;
        }

        config
    }

    /// Open the key-value backend this configuration selects.
    pub fn open_backend(&self) -> Result<Box<dyn KeyValueStore>, StoreError> {
        if self.ephemeral {
            tracing::info!("Using in-memory storage");
            return Ok(Box::new(MemoryStore::new()));
        }

        let db = match &self.db_path {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)?;
                }
                tracing::info!(path = %path.display(), "opening database");
                Database::open_at(path)?
            }
            None => Database::new()?,
        };
        Ok(Box::new(db))
    }
}
