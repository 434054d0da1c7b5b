use crate::domain::models::{Post, User};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Feed lifecycle
///
/// - Loading → Ready: posts fetched
/// - Loading → Error: posts fetch failed
/// - Ready/Error → Loading: refresh or retry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum FeedStatus {
    #[default]
    Loading,
    Ready,
    Error(String),
}

/// Session view-state owned by the engine
#[derive(Debug, Default)]
pub struct FeedState {
    pub(crate) status: FeedStatus,
    /// Newest first
    pub(crate) posts: Vec<Post>,
    pub(crate) users: Vec<User>,
    /// Posts liked by the viewer; mirrors `viewer ∈ post.likes`
    pub(crate) liked: HashSet<String>,
    pub(crate) expanded: HashMap<String, bool>,
    pub(crate) comment_drafts: HashMap<String, String>,
    pub(crate) post_draft: String,
    /// Store-confirmed records written since the current load started
    confirmed_during_load: HashMap<String, Post>,
}

impl FeedState {
    pub fn post(&self, post_id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == post_id)
    }

    pub fn has_post(&self, post_id: &str) -> bool {
        self.post(post_id).is_some()
    }

    pub fn user(&self, user_id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == user_id)
    }

    /// Author for new posts and comments: the viewer when they are a loaded
    /// user, else the first loaded user, else `fallback`
    pub fn author_for_new_content(&self, viewer_id: &str, fallback: &str) -> String {
        if self.user(viewer_id).is_some() {
            return viewer_id.to_string();
        }
        self.users
            .first()
            .map(|u| u.id.clone())
            .unwrap_or_else(|| fallback.to_string())
    }

    pub fn is_error(&self) -> bool {
        matches!(self.status, FeedStatus::Error(_))
    }

    pub(crate) fn begin_load(&mut self) {
        self.status = FeedStatus::Loading;
        self.confirmed_during_load.clear();
    }

    /// Replace posts wholesale (and users when they were fetched).
    ///
    /// Records confirmed after the load started win over the fetched copy,
    /// which may have been read before those writes landed.
    pub(crate) fn apply_load(&mut self, mut posts: Vec<Post>, users: Option<Vec<User>>, viewer_id: &str) {
        for (id, confirmed) in self.confirmed_during_load.drain() {
            match posts.iter_mut().find(|p| p.id == id) {
                Some(fetched) => *fetched = confirmed,
                None => posts.push(confirmed),
            }
        }
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        self.liked = posts
            .iter()
            .filter(|p| p.is_liked_by(viewer_id))
            .map(|p| p.id.clone())
            .collect();

        let present: HashSet<&str> = posts.iter().map(|p| p.id.as_str()).collect();
        self.expanded.retain(|id, _| present.contains(id.as_str()));
        self.comment_drafts.retain(|id, _| present.contains(id.as_str()));

        self.posts = posts;
        if let Some(users) = users {
            self.users = users;
        }
        self.status = FeedStatus::Ready;
    }

    pub(crate) fn apply_load_failure(&mut self, message: String, users: Option<Vec<User>>) {
        self.confirmed_during_load.clear();
        self.posts.clear();
        self.liked.clear();
        if let Some(users) = users {
            self.users = users;
        }
        self.status = FeedStatus::Error(message);
    }

    /// Put a newly created post at the top. An errored feed stays empty.
    pub(crate) fn prepend_post(&mut self, post: Post) -> bool {
        if self.is_error() {
            return false;
        }
        self.confirmed_during_load.insert(post.id.clone(), post.clone());
        self.posts.insert(0, post);
        true
    }

    /// Swap in a store-confirmed record and resync the liked set.
    /// Returns false if the post left the feed while the call was in flight.
    pub(crate) fn apply_confirmed_post(&mut self, confirmed: Post, viewer_id: &str) -> bool {
        let Some(slot) = self.posts.iter_mut().find(|p| p.id == confirmed.id) else {
            return false;
        };

        if confirmed.is_liked_by(viewer_id) {
            self.liked.insert(confirmed.id.clone());
        } else {
            self.liked.remove(&confirmed.id);
        }
        self.confirmed_during_load
            .insert(confirmed.id.clone(), confirmed.clone());
        *slot = confirmed;
        true
    }

    pub(crate) fn toggle_panel(&mut self, post_id: &str) -> bool {
        let flag = self.expanded.entry(post_id.to_string()).or_insert(false);
        *flag = !*flag;
        *flag
    }

    pub fn is_expanded(&self, post_id: &str) -> bool {
        self.expanded.get(post_id).copied().unwrap_or(false)
    }

    pub fn comment_draft(&self, post_id: &str) -> &str {
        self.comment_drafts
            .get(post_id)
            .map(String::as_str)
            .unwrap_or("")
    }
}
