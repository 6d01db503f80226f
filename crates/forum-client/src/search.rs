//! Linear, case-insensitive text search over the feed.

use forum_shared::constants::SEARCH_PREVIEW_CHARS;
use forum_shared::PostId;
use forum_store::Post;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "state", content = "results")]
pub enum SearchView {
    /// No query yet.
    #[default]
    Prompt,
    NoResults,
    Results(Vec<SearchResultView>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultView {
    pub post_id: PostId,
    /// Author name.
    pub title: String,
    /// Start of the content with markup removed.
    pub preview: String,
}

/// Posts whose content (markup included) or author name contains `query`,
/// ignoring case, in feed order. An empty query matches nothing.
pub fn search_posts<'a>(posts: &'a [Post], query: &str) -> Vec<&'a Post> {
    let needle = normalize_query(query);
    if needle.is_empty() {
        return Vec::new();
    }

    posts
        .iter()
        .filter(|post| {
            post.content.to_lowercase().contains(&needle)
                || post.username.to_lowercase().contains(&needle)
        })
        .collect()
}

pub fn render_search(posts: &[Post], query: &str) -> SearchView {
    if normalize_query(query).is_empty() {
        return SearchView::Prompt;
    }

    let results: Vec<SearchResultView> = search_posts(posts, query)
        .into_iter()
        .map(|post| SearchResultView {
            post_id: post.id,
            title: post.username.clone(),
            preview: preview(&post.content),
        })
        .collect();

    if results.is_empty() {
        SearchView::NoResults
    } else {
        SearchView::Results(results)
    }
}

fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// First [`SEARCH_PREVIEW_CHARS`] characters of `content` once tags are removed.
pub fn preview(content: &str) -> String {
    strip_tags(content)
        .chars()
        .take(SEARCH_PREVIEW_CHARS)
        .collect()
}

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

/// Remove every `<...>` span. A `<` with no closing `>` is kept as text.
pub fn strip_tags(markup: &str) -> String {
    TAG.replace_all(markup, "").into_owned()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use forum_shared::UserId;

    use super::*;

    fn post(author: &str, content: &str) -> Post {
        Post {
            id: PostId::new(),
            user_id: UserId::new(),
            username: author.into(),
            profile_pic: String::new(),
            content: content.into(),
            media: Vec::new(),
            timestamp: Utc::now(),
            likes: 0,
            comments: Vec::new(),
        }
    }

    fn feed() -> Vec<Post> {
        vec![
            post("Bob", "lunch with ALICE today"),
            post("carol", "nothing to see"),
            post("Alice", "my <b>first</b> post"),
            post("dave", "<span class=\"alice\">styled</span>"),
        ]
    }

    #[test]
    fn empty_query_yields_prompt() {
        assert_eq!(render_search(&feed(), ""), SearchView::Prompt);
        assert_eq!(render_search(&feed(), "   "), SearchView::Prompt);
        assert!(search_posts(&feed(), "").is_empty());
    }

    #[test]
    fn unmatched_query_yields_no_results() {
        assert_eq!(render_search(&feed(), "zebra"), SearchView::NoResults);
    }

    #[test]
    fn matches_author_or_content_in_feed_order() {
        let posts = feed();
        let hits = search_posts(&posts, "  aLiCe ");
        let authors: Vec<&str> = hits.iter().map(|p| p.username.as_str()).collect();
        // markup is searched too, so dave's class attribute matches
        assert_eq!(authors, ["Bob", "Alice", "dave"]);
    }

    #[test]
    fn results_carry_stripped_preview() {
        let posts = feed();
        let SearchView::Results(results) = render_search(&posts, "first") else {
            panic!("expected results");
        };
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Alice");
        assert_eq!(results[0].preview, "my first post");
        assert_eq!(results[0].post_id, posts[2].id);
        // stored content is untouched
        assert_eq!(posts[2].content, "my <b>first</b> post");
    }

    #[test]
    fn preview_is_capped() {
        let long = format!("<p>{}</p>", "é".repeat(150));
        let p = preview(&long);
        assert_eq!(p.chars().count(), SEARCH_PREVIEW_CHARS);
        assert!(p.chars().all(|c| c == 'é'));
    }

    #[test]
    fn strip_tags_handles_edges() {
        assert_eq!(strip_tags("a<br>b<br/>c"), "abc");
        assert_eq!(strip_tags("1 < 2"), "1 < 2");
        assert_eq!(strip_tags("<>x"), "x");
        assert_eq!(strip_tags("x <a\nhref=y>link</a>"), "x link");
        assert_eq!(strip_tags("1 < 2 > 3"), "1  3");
        assert_eq!(strip_tags("x<y<z>"), "x");
    }
}
