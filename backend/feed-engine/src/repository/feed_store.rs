use crate::config::StoreConfig;
use crate::domain::models::{Comment, NewComment, NewPost, Post, User};
use crate::repository::seed::Seed;
use data_store::{Collection, InMemoryCollection, LatencyProfile, StoreResult};
use std::sync::Arc;
use tracing::debug;

/// Typed access to the Users, Posts and Comments collections
#[derive(Clone)]
pub struct FeedStore {
    users: Arc<dyn Collection<User>>,
    posts: Arc<dyn Collection<Post>>,
    comments: Arc<dyn Collection<Comment>>,
}

impl FeedStore {
    pub fn new(
        users: Arc<dyn Collection<User>>,
        posts: Arc<dyn Collection<Post>>,
        comments: Arc<dyn Collection<Comment>>,
    ) -> Self {
        Self {
            users,
            posts,
            comments,
        }
    }

    pub async fn list_users(&self) -> StoreResult<Vec<User>> {
        self.users.get_all().await
    }

    pub async fn list_posts(&self) -> StoreResult<Vec<Post>> {
        self.posts.get_all().await
    }

    pub async fn create_post(&self, draft: &NewPost) -> StoreResult<Post> {
        debug!(user_id = %draft.user_id, "Creating post");
        self.posts.create(serde_json::to_value(draft)?).await
    }

    /// Whole-record replacement of `post`
    pub async fn replace_post(&self, post: &Post) -> StoreResult<Post> {
        debug!(post_id = %post.id, "Replacing post");
        self.posts.update(&post.id, serde_json::to_value(post)?).await
    }

    pub async fn get_comment(&self, comment_id: &str) -> StoreResult<Comment> {
        self.comments.get_by_id(comment_id).await
    }

    pub async fn create_comment(&self, draft: &NewComment) -> StoreResult<Comment> {
        debug!(post_id = %draft.post_id, "Creating comment");
        self.comments.create(serde_json::to_value(draft)?).await
    }
}

/// In-memory backend with concrete collection handles kept for inspection
/// and fault injection
#[derive(Clone)]
pub struct InMemoryFeedStore {
    pub users: Arc<InMemoryCollection<User>>,
    pub posts: Arc<InMemoryCollection<Post>>,
    pub comments: Arc<InMemoryCollection<Comment>>,
}

impl InMemoryFeedStore {
    pub fn new(seed: Seed, config: &StoreConfig) -> Self {
        Self::with_latency(seed, config.standard_latency(), config.posts_latency())
    }

    /// No artificial delay on any collection
    pub fn instant(seed: Seed) -> Self {
        Self::with_latency(seed, LatencyProfile::instant(), LatencyProfile::instant())
    }

    pub fn with_latency(seed: Seed, standard: LatencyProfile, posts: LatencyProfile) -> Self {
        Self {
            users: Arc::new(InMemoryCollection::with_records("users", standard, seed.users)),
            posts: Arc::new(InMemoryCollection::with_records("posts", posts, seed.posts)),
            comments: Arc::new(InMemoryCollection::with_records(
                "comments",
                standard,
                seed.comments,
            )),
        }
    }

    pub fn feed_store(&self) -> FeedStore {
        FeedStore::new(
            self.users.clone(),
            self.posts.clone(),
            self.comments.clone(),
        )
    }
}
