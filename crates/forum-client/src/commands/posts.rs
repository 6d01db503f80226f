use chrono::Utc;
use forum_shared::{ForumError, PostId, Screen};
use forum_store::{KeyValueStore, Media, Post};
use tracing::{info, warn};

use crate::render::{render_feed, render_nav, render_staging};
use crate::search::render_search;
use crate::state::Forum;

impl<S: KeyValueStore> Forum<S> {
    /// Replace the editor content with `markup`, verbatim.
    pub fn set_draft(&mut self, markup: &str) {
        self.composer.content = markup.to_string();
    }

    /// Publish the editor content and every staged attachment as a new post
    /// at the top of the feed.
    ///
    /// Attachments must be staged (and their reads awaited) before calling
    /// this; the post carries exactly what is in the staging area now.
    pub fn publish_post(&mut self) -> Result<PostId, ForumError> {
        let author = self.require_profile()?;

        let content = self.composer.content.trim();
        if content.is_empty() {
            warn!("Post rejected: empty content");
            return Err(ForumError::EmptyPost);
        }

        let post = Post {
            id: PostId::new(),
            user_id: author.id,
            username: author.username,
            profile_pic: author.profile_pic,
            content: content.to_string(),
            media: self
                .composer
                .staged
                .iter()
                .map(|item| Media {
                    src: item.src.clone(),
                    mime_type: item.mime_type.clone(),
                })
                .collect(),
            timestamp: Utc::now(),
            likes: 0,
            comments: Vec::new(),
        };
        let id = post.id;
        let media_count = post.media.len();

        self.state.posts.insert(0, post);
        let previous_screen = std::mem::replace(&mut self.state.current_screen, Screen::Feed);
        self.persist_or_revert(move |state| {
            state.posts.remove(0);
            state.current_screen = previous_screen;
        })?;
        self.display.feed = render_feed(&self.state.posts);
        self.display.search = render_search(&self.state.posts, &self.search_query);
        self.display.nav = render_nav(Screen::Feed);

        // the editor is only cleared once the post is stored
        self.composer.clear();
        self.display.staging = render_staging(&self.composer.staged);

        info!(post_id = %id, media = media_count, "Post published");
        Ok(id)
    }
}
