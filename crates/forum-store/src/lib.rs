//! # forum-store
//!
//! Local persistence for the forum.
//!
//! The whole application state is one JSON document stored under a single
//! well-known key. The crate provides the document model ([`ForumState`]),
//! two key-value backends ([`Database`] on SQLite and [`MemoryStore`]) and
//! the [`StateStore`] adapter that loads and saves the document through
//! either of them.

pub mod backup;
pub mod database;
pub mod kv;
pub mod migrations;
pub mod models;
pub mod state_store;

mod error;
mod memory;

pub use backup::BackupPayload;
pub use database::Database;
pub use error::StoreError;
pub use kv::KeyValueStore;
pub use memory::MemoryStore;
pub use models::*;
pub use state_store::StateStore;
