use super::{EngineInner, FeedEngine, LikeToggle};
use crate::error::FeedResult;
use tracing::{debug, info, warn};

impl FeedEngine {
    /// Like or unlike a post as the viewer.
    ///
    /// Write-then-apply: the whole post, with the viewer added to or removed
    /// from `likes`, is sent to the store and local state follows the
    /// confirmed record. A failed write leaves local state as it was.
    pub async fn toggle_like(&self, post_id: &str) -> FeedResult<LikeToggle> {
        let post_id = post_id.to_string();
        self.run_detached(move |inner| async move { inner.toggle_like(&post_id).await })
            .await
    }
}

impl EngineInner {
    async fn toggle_like(&self, post_id: &str) -> FeedResult<LikeToggle> {
        let _slot = self.locks.acquire(post_id).await;
        let viewer_id = &self.config.viewer_id;

        // Snapshot after acquiring the slot so a queued toggle sees the
        // previous one's result
        let snapshot = {
            let state = self.state.read();
            state
                .post(post_id)
                .map(|post| (post.clone(), state.liked.contains(post_id)))
        };
        let Some((mut post, was_liked)) = snapshot else {
            debug!(post_id = %post_id, "Like skipped: post not in feed");
            return Ok(LikeToggle::Skipped);
        };

        post.likes = post.likes_with(viewer_id, !was_liked);

        match self.store.replace_post(&post).await {
            Ok(confirmed) => {
                let liked = confirmed.is_liked_by(viewer_id);
                let like_count = confirmed.likes.len();
                if !self.state.write().apply_confirmed_post(confirmed, viewer_id) {
                    debug!(post_id = %post_id, "Post left the feed before like confirmed");
                }

                info!(post_id = %post_id, liked, like_count, "Like updated");
                if liked {
                    self.notifier.success("Liked!");
                    Ok(LikeToggle::Liked { like_count })
                } else {
                    Ok(LikeToggle::Unliked { like_count })
                }
            }
            Err(e) if e.is_not_found() => {
                warn!(post_id = %post_id, "Like skipped: post no longer exists");
                Ok(LikeToggle::Skipped)
            }
            Err(e) => {
                warn!(post_id = %post_id, error = %e, "Failed to update like");
                self.notifier.error("Failed to update like");
                Err(e.into())
            }
        }
    }
}
