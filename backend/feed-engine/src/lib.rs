pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod repository;
pub mod services;

pub use engine::{
    CommentAddition, FeedEngine, FeedSnapshot, FeedStatus, LikeToggle, LoadOutcome, PostCreation,
};
pub use error::{FeedError, FeedResult};
