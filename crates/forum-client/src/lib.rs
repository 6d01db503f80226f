//! # forum-client
//!
//! The forum controller, its renderers and the terminal front-end.

pub mod commands;
pub mod config;
pub mod render;
pub mod search;
pub mod state;
pub mod terminal;

use std::io::BufWriter;

use forum_store::StateStore;
use tokio::io::BufReader;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::ForumConfig;
use crate::state::Forum;
use crate::terminal::Terminal;

/// Start an interactive session on stdin/stdout.
pub async fn run() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("forum_client_lib=debug,forum_store=info,warn")
    });

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    tracing::info!(
        "Starting {} v{}",
        forum_shared::constants::APP_NAME,
        env!("CARGO_PKG_VERSION")
    );

    let config = ForumConfig::from_env();
    tracing::info!(?config, "Loaded configuration");

    let backend = config.open_backend()?;
    let mut forum = Forum::open(StateStore::new(backend), config.settings.clone())?;

    let stdout = std::io::stdout();
    let mut terminal = Terminal::new(BufWriter::new(stdout.lock()));
    terminal
        .run(&mut forum, BufReader::new(tokio::io::stdin()))
        .await?;

    tracing::info!("Session ended");
    Ok(())
}
