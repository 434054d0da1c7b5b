use super::{CommentAddition, EngineInner, FeedEngine};
use crate::domain::models::{Comment, NewComment};
use crate::error::{FeedError, FeedResult};
use futures::future::join_all;
use tracing::{debug, error, info, warn};

/// Comments shown in a freshly expanded panel
pub const THREAD_PREVIEW_LEN: usize = 3;

impl FeedEngine {
    /// Comment on a post as the viewer.
    ///
    /// Two phases: create the comment, then link its id into the post with a
    /// whole-record update. If linking fails the comment is left orphaned in
    /// the store and `FeedError::PartialFailure` is returned; the local post is
    /// not touched.
    pub async fn add_comment(&self, post_id: &str, text: &str) -> FeedResult<CommentAddition> {
        let post_id = post_id.to_string();
        let text = text.to_string();
        self.run_detached(move |inner| async move { inner.add_comment(&post_id, &text).await })
            .await
    }

    pub fn set_comment_draft(&self, post_id: &str, text: &str) {
        self.inner
            .state
            .write()
            .comment_drafts
            .insert(post_id.to_string(), text.to_string());
    }

    /// Submit the post's draft comment
    pub async fn submit_comment_draft(&self, post_id: &str) -> FeedResult<CommentAddition> {
        let draft = self.comment_draft(post_id);
        self.add_comment(post_id, &draft).await
    }

    /// Flip the comment panel for a post, returning the new expanded flag
    pub fn toggle_comments_panel(&self, post_id: &str) -> bool {
        self.inner.state.write().toggle_panel(post_id)
    }

    /// Fetch up to `limit` of the post's comments, in thread order.
    /// Ids that no longer resolve are skipped.
    pub async fn load_comment_thread(&self, post_id: &str, limit: usize) -> FeedResult<Vec<Comment>> {
        let ids: Vec<String> = match self.inner.state.read().post(post_id) {
            Some(post) => post.comments.iter().take(limit).cloned().collect(),
            None => return Ok(Vec::new()),
        };

        let store = &self.inner.store;
        let results = join_all(ids.iter().map(|id| store.get_comment(id))).await;

        let mut comments = Vec::with_capacity(results.len());
        for (id, result) in ids.iter().zip(results) {
            match result {
                Ok(comment) => comments.push(comment),
                Err(e) if e.is_not_found() => {
                    debug!(post_id = %post_id, comment_id = %id, "Skipping missing comment");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(comments)
    }
}

impl EngineInner {
    async fn add_comment(&self, post_id: &str, text: &str) -> FeedResult<CommentAddition> {
        let content = text.trim();
        if content.is_empty() {
            debug!(post_id = %post_id, "Skipping blank comment");
            return Ok(CommentAddition::Skipped);
        }

        let _slot = self.locks.acquire(post_id).await;

        let author = {
            let state = self.state.read();
            if !state.has_post(post_id) {
                debug!(post_id = %post_id, "Comment skipped: post not in feed");
                return Ok(CommentAddition::Skipped);
            }
            state.author_for_new_content(&self.config.viewer_id, &self.config.fallback_author_id)
        };

        let draft = NewComment {
            post_id: post_id.to_string(),
            user_id: author,
            content: content.to_string(),
            likes: Vec::new(),
        };
        let comment = match self.store.create_comment(&draft).await {
            Ok(comment) => comment,
            Err(e) => {
                warn!(post_id = %post_id, error = %e, "Failed to create comment");
                self.notifier.error("Failed to add comment");
                return Err(e.into());
            }
        };

        // Link against the post as it stands now, not as it was before phase 1
        let current = self.state.read().post(post_id).cloned();
        let result = match current {
            Some(mut post) => {
                post.comments.push(comment.id.clone());
                self.store
                    .replace_post(&post)
                    .await
                    .map_err(|e| e.to_string())
            }
            None => Err("post left the feed".to_string()),
        };

        match result {
            Ok(confirmed) => {
                let comment_count = confirmed.comments.len();
                {
                    let mut state = self.state.write();
                    state.apply_confirmed_post(confirmed, &self.config.viewer_id);
                    state.comment_drafts.remove(post_id);
                }
                info!(post_id = %post_id, comment_id = %comment.id, comment_count, "Comment added");
                self.notifier.success("Comment added!");
                Ok(CommentAddition::Added(comment))
            }
            Err(reason) => {
                error!(
                    post_id = %post_id,
                    comment_id = %comment.id,
                    reason = %reason,
                    "Comment created but not linked to post"
                );
                self.notifier
                    .error("Comment saved but could not be attached to the post");
                Err(FeedError::PartialFailure {
                    post_id: post_id.to_string(),
                    comment_id: comment.id,
                    reason,
                })
            }
        }
    }
}
