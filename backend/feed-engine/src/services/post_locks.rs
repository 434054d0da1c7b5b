use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

/// One pending-operation slot per post
///
/// Mutating operations on the same post queue behind each other in arrival
/// order; operations on different posts never wait on each other. A slot is
/// dropped from the map once nobody holds or awaits it.
#[derive(Default)]
pub struct PostLocks {
    slots: DashMap<String, Arc<Mutex<()>>>,
}

impl PostLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for the post's slot; released when the guard drops
    pub async fn acquire(&self, post_id: &str) -> PostGuard<'_> {
        let slot = Arc::clone(&self.slots.entry(post_id.to_string()).or_default());

        let guard = match Arc::clone(&slot).try_lock_owned() {
            Ok(guard) => guard,
            Err(_) => {
                debug!(post_id = %post_id, "Queued behind in-flight operation");
                slot.lock_owned().await
            }
        };

        PostGuard {
            locks: self,
            post_id: post_id.to_string(),
            _guard: guard,
        }
    }

    /// Whether an operation currently holds the post's slot
    pub fn is_busy(&self, post_id: &str) -> bool {
        self.slots
            .get(post_id)
            .map(|slot| slot.try_lock().is_err())
            .unwrap_or(false)
    }

    /// Number of live slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

pub struct PostGuard<'a> {
    locks: &'a PostLocks,
    post_id: String,
    _guard: OwnedMutexGuard<()>,
}

impl Drop for PostGuard<'_> {
    fn drop(&mut self) {
        // Map entry + this guard's handle: nobody else is waiting
        self.locks
            .slots
            .remove_if(&self.post_id, |_, slot| Arc::strong_count(slot) == 2);
    }
}
