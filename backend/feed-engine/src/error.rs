/// Error types for feed-engine
use data_store::StoreError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Request failed: {0}")]
    Transient(String),

    /// Comment was persisted but never linked to its post
    #[error("Comment {comment_id} saved but not linked to post {post_id}: {reason}")]
    PartialFailure {
        post_id: String,
        comment_id: String,
        reason: String,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for FeedError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => FeedError::NotFound(err.to_string()),
            other => FeedError::Transient(other.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for FeedError {
    fn from(err: tokio::task::JoinError) -> Self {
        FeedError::Internal(format!("engine task did not complete: {}", err))
    }
}

/// Result type alias for engine operations
pub type FeedResult<T> = Result<T, FeedError>;

#[cfg(test)]
mod tests {
    use super::*;
    use data_store::Operation;

    #[test]
    fn test_store_error_mapping() {
        let not_found: FeedError = StoreError::not_found("Post", "p1").into();
        assert_eq!(not_found, FeedError::NotFound("Post not found".to_string()));

        let unavailable: FeedError = StoreError::Unavailable {
            collection: "posts".to_string(),
            operation: Operation::Update,
        }
        .into();
        assert!(matches!(unavailable, FeedError::Transient(msg) if msg.contains("posts update")));
    }
}
