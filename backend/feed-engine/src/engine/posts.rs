use super::{EngineInner, FeedEngine, PostCreation};
use crate::domain::models::{NewPost, MAX_POST_CHARS};
use crate::error::{FeedError, FeedResult};
use tracing::{debug, info, warn};

impl FeedEngine {
    /// Publish a text post. Blank text, or a feed in `Error`, is skipped
    /// without a store call.
    ///
    /// Confirm-then-insert: the post appears at the top of the feed only once
    /// the store has assigned its id.
    pub async fn create_post(&self, text: &str) -> FeedResult<PostCreation> {
        let text = text.to_string();
        self.run_detached(move |inner| async move { inner.create_post(&text).await })
            .await
    }

    /// Set the composer buffer, capped at the post length limit
    pub fn set_post_draft(&self, text: &str) {
        let draft: String = text.chars().take(MAX_POST_CHARS).collect();
        self.inner.state.write().post_draft = draft;
    }

    /// Publish whatever is in the composer buffer
    pub async fn submit_post_draft(&self) -> FeedResult<PostCreation> {
        let draft = self.post_draft();
        self.create_post(&draft).await
    }
}

impl EngineInner {
    async fn create_post(&self, text: &str) -> FeedResult<PostCreation> {
        let content = text.trim();
        if content.is_empty() {
            debug!("Skipping blank post");
            return Ok(PostCreation::Skipped);
        }
        if content.chars().count() > MAX_POST_CHARS {
            return Err(FeedError::InvalidInput(format!(
                "post exceeds {} characters",
                MAX_POST_CHARS
            )));
        }

        let author = {
            let state = self.state.read();
            if state.is_error() {
                debug!("Skipping post: feed failed to load");
                return Ok(PostCreation::Skipped);
            }
            state.author_for_new_content(&self.config.viewer_id, &self.config.fallback_author_id)
        };
        let draft = NewPost::text(author, content);

        match self.store.create_post(&draft).await {
            Ok(post) => {
                {
                    let mut state = self.state.write();
                    if !state.prepend_post(post.clone()) {
                        debug!(post_id = %post.id, "Feed errored before post confirmed, not shown");
                    }
                    state.post_draft.clear();
                }
                info!(post_id = %post.id, user_id = %post.user_id, "Post created");
                self.notifier.success("Post shared successfully!");
                Ok(PostCreation::Created(post))
            }
            Err(e) => {
                warn!(error = %e, "Failed to create post");
                self.notifier.error("Failed to create post");
                Err(e.into())
            }
        }
    }
}
