pub mod feed_store;
pub mod seed;

pub use feed_store::{FeedStore, InMemoryFeedStore};
pub use seed::Seed;
