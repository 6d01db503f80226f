//! The forum controller.
//!
//! [`Forum`] owns the application state, the persistence adapter and the
//! last rendered [`Display`]. State is only changed through the mutator
//! methods in [`crate::commands`]; each of them validates first, then
//! mutates, saves the whole state and re-renders the affected views. A failed
//! save rolls the mutation back before any view is touched.

use forum_shared::{ForumError, MediaId, MediaKind};
use forum_store::{ForumState, KeyValueStore, StateStore, StoreError};

use crate::config::ForumSettings;
use crate::render::Display;

/// An attachment waiting to be published with the next post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedMedia {
    pub id: MediaId,
    /// Data URI of the file contents.
    pub src: String,
    pub mime_type: String,
}

impl StagedMedia {
    pub fn kind(&self) -> MediaKind {
        MediaKind::from_mime(&self.mime_type)
    }
}

/// The post editor: current markup plus the staging area. Not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composer {
    pub(crate) content: String,
    pub(crate) staged: Vec<StagedMedia>,
}

impl Composer {
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn staged(&self) -> &[StagedMedia] {
        &self.staged
    }

    pub(crate) fn clear(&mut self) {
        self.content.clear();
        self.staged.clear();
    }
}

/// Central application controller.
pub struct Forum<S> {
    pub(crate) state: ForumState,
    pub(crate) store: StateStore<S>,
    pub(crate) composer: Composer,
    pub(crate) search_query: String,
    pub(crate) display: Display,
    pub(crate) settings: ForumSettings,
}

impl<S: KeyValueStore> Forum<S> {
    /// Load the persisted state (or start fresh) and render every view.
    ///
    /// A stored document that fails to parse is not fatal: it is logged and
    /// the forum starts from the default state. The bad value stays in
    /// storage until the first save overwrites it.
    pub fn open(store: StateStore<S>, settings: ForumSettings) -> Result<Self, StoreError> {
        let state = match store.load() {
            Ok(Some(state)) => {
                tracing::info!(
                    posts = state.posts.len(),
                    messages = state.messages.len(),
                    has_profile = state.current_user.is_some(),
                    "Restored forum state"
                );
                state
            }
            Ok(None) => {
                tracing::info!("No saved state, starting fresh");
                ForumState::default()
            }
            Err(StoreError::Corrupt { key, source }) => {
                tracing::warn!(%key, error = %source, "Saved state is corrupt, starting fresh");
                ForumState::default()
            }
            Err(e) => return Err(e),
        };

        let mut forum = Self {
            state,
            store,
            composer: Composer::default(),
            search_query: String::new(),
            display: Display::default(),
            settings,
        };
        forum.render_all();
        Ok(forum)
    }

    pub fn state(&self) -> &ForumState {
        &self.state
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    pub fn settings(&self) -> &ForumSettings {
        &self.settings
    }

    pub fn store(&self) -> &StateStore<S> {
        &self.store
    }

    /// Write the whole state through to storage.
    pub(crate) fn persist(&self) -> Result<(), ForumError> {
        self.store.save(&self.state).map_err(|e| {
            tracing::error!(error = %e, "Failed to save state");
            ForumError::Store(e.to_string())
        })
    }

    /// Write the already-mutated state through, or put it back with
    /// `revert` if the write fails. Memory never holds a change that storage
    /// refused.
    pub(crate) fn persist_or_revert<F>(&mut self, revert: F) -> Result<(), ForumError>
    where
        F: FnOnce(&mut ForumState),
    {
        match self.persist() {
            Ok(()) => Ok(()),
            Err(e) => {
                revert(&mut self.state);
                Err(e)
            }
        }
    }

    pub(crate) fn render_all(&mut self) {
        self.display = Display::render(
            &self.state,
            &self.composer,
            &self.search_query,
            &self.settings,
        );
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::io;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    use forum_shared::constants::STATE_KEY;
    use forum_shared::{Screen, Theme};
    use forum_store::MemoryStore;

    use super::*;

    /// Memory backend whose writes can be switched off, like a full disk.
    #[derive(Clone, Default)]
    pub(crate) struct FailingStore {
        inner: MemoryStore,
        refuse_writes: Arc<AtomicBool>,
    }

    impl FailingStore {
        pub(crate) fn refuse_writes(&self, refuse: bool) {
            self.refuse_writes.store(refuse, Ordering::SeqCst);
        }
    }

    impl KeyValueStore for FailingStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            if self.refuse_writes.load(Ordering::SeqCst) {
                return Err(StoreError::Io(io::Error::other("no space left on device")));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<bool, StoreError> {
            self.inner.remove(key)
        }
    }

    /// A forum over a [`FailingStore`] that still accepts writes, plus a
    /// handle to switch them off.
    pub(crate) fn failing_forum() -> (Forum<FailingStore>, FailingStore) {
        let backend = FailingStore::default();
        let forum = Forum::open(StateStore::new(backend.clone()), ForumSettings::default()).unwrap();
        (forum, backend)
    }

    pub(crate) fn fresh_forum() -> Forum<MemoryStore> {
        Forum::open(StateStore::new(MemoryStore::new()), ForumSettings::default()).unwrap()
    }

    pub(crate) fn forum_with_profile(name: &str) -> Forum<MemoryStore> {
        let mut forum = fresh_forum();
        forum.save_profile(name, None, None).unwrap();
        forum
    }

    /// Reopen a forum over the same storage, as after a restart.
    pub(crate) fn reopen(forum: &Forum<MemoryStore>) -> Forum<MemoryStore> {
        Forum::open(
            StateStore::new(forum.store().backend().clone()),
            ForumSettings::default(),
        )
        .unwrap()
    }

    #[test]
    fn fresh_forum_has_default_state() {
        let forum = fresh_forum();
        assert_eq!(forum.state(), &ForumState::default());
        assert_eq!(forum.state().theme, Theme::Light);
        assert_eq!(forum.state().current_screen, Screen::Feed);
        // nothing is written until the first mutation
        assert!(forum.store().load().unwrap().is_none());
    }

    #[test]
    fn corrupt_state_falls_back_to_default() {
        let backend = MemoryStore::new();
        backend.set(STATE_KEY, "{\"posts\": [").unwrap();

        let forum = Forum::open(StateStore::new(backend), ForumSettings::default()).unwrap();
        assert_eq!(forum.state(), &ForumState::default());
        assert!(forum.display().feed.is_empty());
    }

    #[test]
    fn state_survives_restart() {
        let mut forum = forum_with_profile("alice");
        forum.set_draft("first post");
        forum.publish_post().unwrap();
        forum.toggle_theme().unwrap();

        let restored = reopen(&forum);
        assert_eq!(restored.state(), forum.state());
        assert_eq!(restored.display(), forum.display());
    }
}
