use forum_shared::{ForumError, PostId, Screen};
use forum_store::KeyValueStore;
use tracing::debug;

use crate::search::{render_search, SearchView};
use crate::state::Forum;

impl<S: KeyValueStore> Forum<S> {
    /// Run `query` against the feed and show the results.
    ///
    /// Searching does not change the persisted state.
    pub fn search(&mut self, query: &str) -> &SearchView {
        self.search_query = query.to_string();
        self.display.search = render_search(&self.state.posts, query);

        debug!(query, "Search rendered");
        &self.display.search
    }

    /// Follow a search result. This only returns to the feed; it does not
    /// scroll to the post.
    pub fn open_search_result(&mut self, post_id: PostId) -> Result<(), ForumError> {
        debug!(%post_id, "Search result selected");
        self.show_screen(Screen::Feed)
    }
}
