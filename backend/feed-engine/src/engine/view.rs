/// Read-only projections handed to the presentation layer
use super::state::{FeedState, FeedStatus};
use crate::domain::models::{Post, User};
use serde::Serialize;

pub const ANONYMOUS_USERNAME: &str = "Anonymous";
pub const PLACEHOLDER_AVATAR: &str =
    "https://images.unsplash.com/photo-1535713875002-d1d0cf377fde?w=40&h=40&fit=crop&crop=face";

/// Likers and comment ids previewed under each post
const PREVIEW_LEN: usize = 3;

/// Display identity of a post author
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorView {
    pub user_id: Option<String>,
    pub username: String,
    pub profile_picture: String,
}

impl AuthorView {
    /// Cached user, or the anonymous fallback when the author isn't loaded
    pub fn resolve(user: Option<&User>) -> Self {
        match user {
            Some(user) => Self {
                user_id: Some(user.id.clone()),
                username: user.username.clone(),
                profile_picture: user.profile_picture.clone(),
            },
            None => Self {
                user_id: None,
                username: ANONYMOUS_USERNAME.to_string(),
                profile_picture: PLACEHOLDER_AVATAR.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    #[serde(flatten)]
    pub post: Post,
    pub author: AuthorView,
    pub like_count: usize,
    pub comment_count: usize,
    pub liked_by_viewer: bool,
    pub expanded: bool,
    pub comment_draft: String,
    /// e.g. "Jan 15, 07:30 AM"
    pub display_time: String,
    pub like_preview: Vec<String>,
    pub comment_preview: Vec<String>,
    /// A like or comment is in flight
    pub busy: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedSnapshot {
    pub status: FeedStatus,
    pub posts: Vec<PostView>,
    pub users: Vec<User>,
    /// Sorted for stable output
    pub liked_posts: Vec<String>,
    pub post_draft: String,
}

impl FeedSnapshot {
    pub(crate) fn build(state: &FeedState, viewer_id: &str, is_busy: impl Fn(&str) -> bool) -> Self {
        let posts = state
            .posts
            .iter()
            .map(|post| PostView {
                author: AuthorView::resolve(state.user(&post.user_id)),
                like_count: post.likes.len(),
                comment_count: post.comments.len(),
                liked_by_viewer: state.liked.contains(&post.id),
                expanded: state.is_expanded(&post.id),
                comment_draft: state.comment_draft(&post.id).to_string(),
                display_time: post.created_at.format("%b %-d, %I:%M %p").to_string(),
                like_preview: post.likes.iter().take(PREVIEW_LEN).cloned().collect(),
                comment_preview: post.comments.iter().take(PREVIEW_LEN).cloned().collect(),
                busy: is_busy(&post.id),
                post: post.clone(),
            })
            .collect();

        let mut liked_posts: Vec<String> = state.liked.iter().cloned().collect();
        liked_posts.sort();

        debug_assert!(state
            .posts
            .iter()
            .all(|p| p.is_liked_by(viewer_id) == state.liked.contains(&p.id)));

        Self {
            status: state.status.clone(),
            posts,
            users: state.users.clone(),
            liked_posts,
            post_draft: state.post_draft.clone(),
        }
    }
}
