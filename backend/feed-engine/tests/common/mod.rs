//! Shared fixtures for feed-engine integration tests
#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use data_store::LatencyProfile;
use feed_engine::config::EngineConfig;
use feed_engine::domain::{Comment, Post, User};
use feed_engine::repository::{InMemoryFeedStore, Seed};
use feed_engine::FeedEngine;

pub const VIEWER: &str = "current-user";

pub fn user(id: &str, username: &str) -> User {
    User {
        id: id.to_string(),
        username: username.to_string(),
        profile_picture: format!("https://example.test/{}.png", id),
        bio: String::new(),
        followers: Vec::new(),
        following: Vec::new(),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

pub fn post(id: &str, author: &str, day: u32, likes: &[&str], comments: &[&str]) -> Post {
    Post {
        id: id.to_string(),
        user_id: author.to_string(),
        content: format!("content of {}", id),
        media_urls: Vec::new(),
        likes: likes.iter().map(|s| s.to_string()).collect(),
        comments: comments.iter().map(|s| s.to_string()).collect(),
        shares: 0,
        created_at: Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap(),
    }
}

pub fn comment(id: &str, post_id: &str, content: &str) -> Comment {
    Comment {
        id: id.to_string(),
        post_id: post_id.to_string(),
        user_id: "u2".to_string(),
        content: content.to_string(),
        likes: Vec::new(),
        created_at: Utc.with_ymd_and_hms(2024, 1, 20, 12, 0, 0).unwrap(),
    }
}

/// Two users, three posts (p2 newest, liked by the viewer), two comments on p1
pub fn seed() -> Seed {
    Seed {
        users: vec![user("u1", "sarah"), user("u2", "marcus")],
        posts: vec![
            post("p1", "u1", 10, &["u2"], &["c1", "c2"]),
            post("p2", "u2", 12, &["u1", VIEWER], &[]),
            post("p3", "ghost", 11, &[], &[]),
        ],
        comments: vec![comment("c1", "p1", "first!"), comment("c2", "p1", "nice view")],
    }
}

pub fn engine_for(backend: &InMemoryFeedStore) -> FeedEngine {
    FeedEngine::new(backend.feed_store(), EngineConfig::default())
}

/// Zero-latency backend and engine
pub fn instant(seed: Seed) -> (FeedEngine, InMemoryFeedStore) {
    let backend = InMemoryFeedStore::instant(seed);
    (engine_for(&backend), backend)
}

/// Backend with the real latency profile; pair with `start_paused = true`
pub fn realistic(seed: Seed) -> (FeedEngine, InMemoryFeedStore) {
    let backend =
        InMemoryFeedStore::with_latency(seed, LatencyProfile::standard(), LatencyProfile::posts());
    (engine_for(&backend), backend)
}

/// Viewer membership in `likes` agrees with the liked-set projection for every post
pub fn assert_like_projection(engine: &FeedEngine) {
    let liked = engine.liked_posts();
    for post in engine.posts() {
        let occurrences = post.likes.iter().filter(|id| *id == VIEWER).count();
        assert!(occurrences <= 1, "viewer liked {} twice", post.id);
        assert_eq!(
            occurrences == 1,
            liked.contains(&post.id),
            "liked-set out of sync for {}",
            post.id
        );
    }
}
