//! Pure projections of the forum state into view models.
//!
//! Every renderer takes the state (or a slice of it) and rebuilds its view
//! from scratch; there is no incremental update. Rendering an unchanged
//! state twice yields equal views.

use chrono::{DateTime, Local, Utc};
use forum_shared::constants::DATE_FORMAT;
use forum_shared::{MediaId, MediaKind, PostId, Screen, Theme};
use forum_store::{Comment, ForumState, Media, Message, Post, User};
use serde::Serialize;

use crate::config::ForumSettings;
use crate::search::{self, SearchView};
use crate::state::{Composer, StagedMedia};

/// Everything currently on screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Display {
    pub nav: NavView,
    pub theme: ThemeView,
    pub header: HeaderView,
    pub feed: Vec<PostView>,
    pub chat: ChatView,
    pub search: SearchView,
    pub staging: Vec<StagedView>,
}

impl Display {
    pub fn render(
        state: &ForumState,
        composer: &Composer,
        search_query: &str,
        settings: &ForumSettings,
    ) -> Self {
        Self {
            nav: render_nav(state.current_screen),
            theme: render_theme(state.theme),
            header: render_header(state.current_user.as_ref(), settings),
            feed: render_feed(&state.posts),
            chat: render_chat(&state.messages),
            search: search::render_search(&state.posts, search_query),
            staging: render_staging(composer.staged()),
        }
    }
}

// ---------------------------------------------------------------------------
// Navigation, theme, header
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavView {
    /// The only visible screen.
    pub active: Screen,
    /// Footer icon to highlight, if the screen has one.
    pub highlighted: Option<Screen>,
}

pub fn render_nav(screen: Screen) -> NavView {
    NavView {
        active: screen,
        highlighted: screen.has_nav_icon().then_some(screen),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeView {
    pub theme: Theme,
    pub dark_mode: bool,
    /// Icon on the toggle button: the theme it switches to.
    pub toggle_icon: &'static str,
}

pub fn render_theme(theme: Theme) -> ThemeView {
    let dark_mode = theme == Theme::Dark;
    ThemeView {
        theme,
        dark_mode,
        toggle_icon: if dark_mode { "sun" } else { "moon" },
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderView {
    pub avatar: String,
}

pub fn render_header(user: Option<&User>, settings: &ForumSettings) -> HeaderView {
    HeaderView {
        avatar: user
            .map(|u| u.profile_pic.clone())
            .unwrap_or_else(|| settings.default_profile_pic.clone()),
    }
}

// ---------------------------------------------------------------------------
// Feed
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub id: PostId,
    pub author: String,
    pub avatar: String,
    pub date: String,
    /// Markup as stored; the feed shows it unmodified.
    pub content: String,
    pub media: Vec<MediaView>,
    pub likes: u32,
    pub comment_count: usize,
    pub comments: Vec<CommentView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaView {
    pub kind: MediaKind,
    pub src: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub author: String,
    pub avatar: String,
    pub date: String,
    pub content: String,
}

/// One view per post, in list order (newest first).
pub fn render_feed(posts: &[Post]) -> Vec<PostView> {
    posts.iter().map(render_post).collect()
}

fn render_post(post: &Post) -> PostView {
    PostView {
        id: post.id,
        author: post.username.clone(),
        avatar: post.profile_pic.clone(),
        date: format_date(post.timestamp),
        content: post.content.clone(),
        media: post.media.iter().filter_map(render_media).collect(),
        likes: post.likes,
        comment_count: post.comments.len(),
        comments: post.comments.iter().map(render_comment).collect(),
    }
}

// unrecognized types have no tag in the feed
fn render_media(media: &Media) -> Option<MediaView> {
    let kind = media.kind();
    kind.has_preview().then(|| MediaView {
        kind,
        src: media.src.clone(),
    })
}

fn render_comment(comment: &Comment) -> CommentView {
    CommentView {
        author: comment.username.clone(),
        avatar: comment.profile_pic.clone(),
        date: format_date(comment.timestamp),
        content: comment.content.clone(),
    }
}

fn format_date(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format(DATE_FORMAT).to_string()
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Sent,
    Received,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    pub content: String,
    pub direction: Direction,
}

/// The chat panel. Scroll positions are counted in rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatView {
    pub messages: Vec<MessageView>,
    pub scroll_top: usize,
    pub scroll_height: usize,
}

impl ChatView {
    pub fn is_scrolled_to_bottom(&self) -> bool {
        self.scroll_top == self.scroll_height
    }
}

/// One view per message, oldest first, scrolled to the newest.
pub fn render_chat(messages: &[Message]) -> ChatView {
    let messages: Vec<MessageView> = messages
        .iter()
        .map(|m| MessageView {
            content: m.content.clone(),
            direction: if m.is_sent {
                Direction::Sent
            } else {
                Direction::Received
            },
        })
        .collect();

    let scroll_height = messages.len();
    ChatView {
        messages,
        scroll_top: scroll_height,
        scroll_height,
    }
}

// ---------------------------------------------------------------------------
// Staging area
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StagedView {
    pub id: MediaId,
    pub kind: MediaKind,
    pub mime_type: String,
    /// `None` for types without a preview tag.
    pub preview_src: Option<String>,
}

pub fn render_staging(staged: &[StagedMedia]) -> Vec<StagedView> {
    staged
        .iter()
        .map(|item| {
            let kind = item.kind();
            StagedView {
                id: item.id,
                kind,
                mime_type: item.mime_type.clone(),
                preview_src: kind.has_preview().then(|| item.src.clone()),
            }
        })
        .collect()
}
