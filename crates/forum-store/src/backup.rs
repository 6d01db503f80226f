use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::models::ForumState;

/// Portable export of the whole forum state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BackupPayload {
    /// When the export was produced
    pub created_at: DateTime<Utc>,
    /// App version that produced the export
    pub version: String,
    pub state: ForumState,
}

impl BackupPayload {
    pub fn new(state: ForumState) -> Self {
        Self {
            created_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            state,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse an export. A bare state document (as found in storage) is
    /// accepted too.
    pub fn from_json(json: &str) -> Result<Self> {
        match serde_json::from_str::<BackupPayload>(json) {
            Ok(payload) => Ok(payload),
            Err(payload_err) => serde_json::from_str::<ForumState>(json)
                .map(Self::new)
                .map_err(|_| StoreError::Corrupt {
                    key: "backup".to_string(),
                    source: payload_err,
                }),
        }
    }
}
