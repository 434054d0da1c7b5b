//! Feed Interaction Engine
//!
//! Owns the session's post, user and like view-state and mediates every
//! mutation through the data store. Mutations are confirm-then-apply: local
//! state changes only after the store acknowledges the write.
//!
//! Operations that touch the store run as spawned tasks. Dropping the
//! returned future stops the caller from waiting but does not cancel the
//! write; its result still lands in the shared state.
//!
//! Like toggles and comment appends on the same post are serialized through
//! [`PostLocks`]: a second operation queues until the first resolves and then
//! computes its delta from the post as it stands at that point.

mod comments;
mod likes;
mod load;
mod posts;
pub mod state;
pub mod view;

pub use comments::THREAD_PREVIEW_LEN;
pub use state::{FeedState, FeedStatus};
pub use view::{AuthorView, FeedSnapshot, PostView};

use crate::config::EngineConfig;
use crate::domain::models::{Comment, Post, User};
use crate::error::FeedResult;
use crate::repository::FeedStore;
use crate::services::{Notification, Notifier, PostLocks};
use parking_lot::RwLock;
use std::collections::HashSet;
use std::future::Future;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Result of `load_feed`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Ready { posts: usize, users_refreshed: bool },
    /// A newer load started before this one finished; its result was dropped
    Superseded,
}

/// Result of `create_post`
#[derive(Debug, Clone, PartialEq)]
pub enum PostCreation {
    /// Blank input or errored feed, nothing sent
    Skipped,
    Created(Post),
}

/// Result of `toggle_like`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeToggle {
    /// Post not in the feed (or gone from the store)
    Skipped,
    Liked { like_count: usize },
    Unliked { like_count: usize },
}

/// Result of `add_comment`
#[derive(Debug, Clone, PartialEq)]
pub enum CommentAddition {
    /// Blank input or unknown post, nothing sent
    Skipped,
    Added(Comment),
}

/// Cloneable handle to a feed session
#[derive(Clone)]
pub struct FeedEngine {
    inner: Arc<EngineInner>,
}

pub(crate) struct EngineInner {
    store: FeedStore,
    config: EngineConfig,
    state: RwLock<FeedState>,
    locks: PostLocks,
    notifier: Notifier,
    load_generation: AtomicU64,
}

impl FeedEngine {
    pub fn new(store: FeedStore, config: EngineConfig) -> Self {
        let notifier = Notifier::new(config.notification_capacity);
        Self {
            inner: Arc::new(EngineInner {
                store,
                config,
                state: RwLock::new(FeedState::default()),
                locks: PostLocks::new(),
                notifier,
                load_generation: AtomicU64::new(0),
            }),
        }
    }

    /// Run `op` on its own task so that dropping the caller's future
    /// doesn't abandon a write already issued to the store
    async fn run_detached<F, Fut, T>(&self, op: F) -> FeedResult<T>
    where
        F: FnOnce(Arc<EngineInner>) -> Fut,
        Fut: Future<Output = FeedResult<T>> + Send + 'static,
        T: Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(op(inner)).await?
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.inner.notifier.subscribe()
    }

    pub fn status(&self) -> FeedStatus {
        self.inner.state.read().status.clone()
    }

    /// Newest first
    pub fn posts(&self) -> Vec<Post> {
        self.inner.state.read().posts.clone()
    }

    pub fn post(&self, post_id: &str) -> Option<Post> {
        self.inner.state.read().post(post_id).cloned()
    }

    pub fn users(&self) -> Vec<User> {
        self.inner.state.read().users.clone()
    }

    pub fn liked_posts(&self) -> HashSet<String> {
        self.inner.state.read().liked.clone()
    }

    pub fn is_liked(&self, post_id: &str) -> bool {
        self.inner.state.read().liked.contains(post_id)
    }

    pub fn is_expanded(&self, post_id: &str) -> bool {
        self.inner.state.read().is_expanded(post_id)
    }

    pub fn comment_draft(&self, post_id: &str) -> String {
        self.inner.state.read().comment_draft(post_id).to_string()
    }

    pub fn post_draft(&self) -> String {
        self.inner.state.read().post_draft.clone()
    }

    /// Whether a like or comment operation is in flight for the post
    pub fn is_busy(&self, post_id: &str) -> bool {
        self.inner.locks.is_busy(post_id)
    }

    pub fn author_of(&self, user_id: &str) -> AuthorView {
        AuthorView::resolve(self.inner.state.read().user(user_id))
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        let state = self.inner.state.read();
        FeedSnapshot::build(&state, &self.inner.config.viewer_id, |id| {
            self.inner.locks.is_busy(id)
        })
    }
}
