use super::{EngineInner, FeedEngine, LoadOutcome};
use crate::error::FeedResult;
use std::sync::atomic::Ordering;
use tracing::{debug, error, info, warn};

impl FeedEngine {
    /// Fetch posts and users and replace the feed wholesale.
    ///
    /// A failed posts fetch leaves the feed in `Error` with no posts; calling
    /// again retries. A failed users fetch only logs and keeps the cached users.
    pub async fn load_feed(&self) -> FeedResult<LoadOutcome> {
        self.run_detached(|inner| async move { inner.load_feed().await })
            .await
    }
}

impl EngineInner {
    async fn load_feed(&self) -> FeedResult<LoadOutcome> {
        let generation = {
            let mut state = self.state.write();
            state.begin_load();
            self.load_generation.fetch_add(1, Ordering::SeqCst) + 1
        };
        debug!(generation, "Loading feed");

        let (posts, users) = tokio::join!(self.store.list_posts(), self.store.list_users());

        let users = match users {
            Ok(users) => Some(users),
            Err(e) => {
                warn!(error = %e, "Failed to load users, keeping cached users");
                None
            }
        };
        let users_refreshed = users.is_some();

        let mut state = self.state.write();
        if self.load_generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "Feed load superseded by a newer load");
            return Ok(LoadOutcome::Superseded);
        }

        match posts {
            Ok(posts) => {
                let count = posts.len();
                state.apply_load(posts, users, &self.config.viewer_id);
                info!(posts = count, users_refreshed, "Feed ready");
                Ok(LoadOutcome::Ready {
                    posts: count,
                    users_refreshed,
                })
            }
            Err(e) => {
                error!(error = %e, "Failed to load posts");
                state.apply_load_failure(e.to_string(), users);
                drop(state);
                self.notifier.error("Failed to load posts");
                Err(e.into())
            }
        }
    }
}
