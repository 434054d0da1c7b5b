/// Integration tests for feed loading and the Loading/Ready/Error lifecycle
mod common;

use common::{assert_like_projection, engine_for, instant, realistic, seed, VIEWER};
use data_store::{Collection, LatencyProfile, Operation};
use feed_engine::repository::InMemoryFeedStore;
use feed_engine::services::NotificationLevel;
use feed_engine::{FeedError, FeedStatus, LikeToggle, LoadOutcome};
use std::time::Duration;

#[tokio::test]
async fn test_initial_status_is_loading() {
    let (engine, _backend) = instant(seed());
    assert_eq!(engine.status(), FeedStatus::Loading);
    assert!(engine.posts().is_empty());
}

#[tokio::test]
async fn test_load_orders_newest_first_and_projects_likes() {
    let (engine, _backend) = instant(seed());

    let outcome = engine.load_feed().await.unwrap();

    assert_eq!(
        outcome,
        LoadOutcome::Ready {
            posts: 3,
            users_refreshed: true
        }
    );
    assert_eq!(engine.status(), FeedStatus::Ready);
    let ids: Vec<String> = engine.posts().into_iter().map(|p| p.id).collect();
    assert_eq!(ids, vec!["p2", "p3", "p1"]);
    assert_eq!(engine.users().len(), 2);
    assert!(engine.is_liked("p2"));
    assert!(!engine.is_liked("p1"));
    assert_like_projection(&engine);
}

#[tokio::test]
async fn test_posts_failure_enters_error_then_retry_recovers() {
    let (engine, backend) = instant(seed());
    let mut notifications = engine.subscribe();
    backend.posts.faults().fail_next(Operation::GetAll, 1);

    let err = engine.load_feed().await.unwrap_err();

    assert!(matches!(err, FeedError::Transient(_)));
    assert!(matches!(engine.status(), FeedStatus::Error(msg) if msg.contains("posts getAll")));
    assert!(engine.posts().is_empty());
    let note = notifications.recv().await.unwrap();
    assert_eq!(note.level, NotificationLevel::Error);
    assert_eq!(note.message, "Failed to load posts");

    // Retry
    let outcome = engine.load_feed().await.unwrap();
    assert!(matches!(outcome, LoadOutcome::Ready { posts: 3, .. }));
    assert_eq!(engine.status(), FeedStatus::Ready);
    assert_eq!(engine.posts().len(), 3);
}

#[tokio::test]
async fn test_retries_are_unlimited() {
    let (engine, backend) = instant(seed());
    backend.posts.faults().fail_always(Operation::GetAll);

    for _ in 0..5 {
        assert!(engine.load_feed().await.is_err());
        assert!(matches!(engine.status(), FeedStatus::Error(_)));
    }

    backend.posts.faults().clear();
    engine.load_feed().await.unwrap();
    assert_eq!(engine.status(), FeedStatus::Ready);
}

#[tokio::test]
async fn test_users_failure_is_not_fatal() {
    let (engine, backend) = instant(seed());
    backend.users.faults().fail_next(Operation::GetAll, 1);

    let outcome = engine.load_feed().await.unwrap();

    assert_eq!(
        outcome,
        LoadOutcome::Ready {
            posts: 3,
            users_refreshed: false
        }
    );
    assert!(engine.users().is_empty());
    assert_eq!(engine.author_of("u1").username, "Anonymous");
}

#[tokio::test]
async fn test_users_failure_keeps_previous_cache() {
    let (engine, backend) = instant(seed());
    engine.load_feed().await.unwrap();

    backend.users.faults().fail_next(Operation::GetAll, 1);
    engine.load_feed().await.unwrap();

    assert_eq!(engine.users().len(), 2);
    assert_eq!(engine.author_of("u1").username, "sarah");
    // Author not among users
    assert_eq!(engine.author_of("ghost").username, "Anonymous");
}

#[tokio::test]
async fn test_reload_prunes_panel_state_of_vanished_posts() {
    let (engine, backend) = instant(seed());
    engine.load_feed().await.unwrap();
    engine.toggle_comments_panel("p3");
    engine.set_comment_draft("p3", "draft");
    engine.toggle_comments_panel("p1");

    backend.posts.delete("p3").await.unwrap();
    engine.load_feed().await.unwrap();

    assert!(!engine.is_expanded("p3"));
    assert_eq!(engine.comment_draft("p3"), "");
    assert!(engine.is_expanded("p1"));
}

#[tokio::test(start_paused = true)]
async fn test_status_is_loading_while_fetch_in_flight() {
    let (engine, _backend) = realistic(seed());
    engine.load_feed().await.unwrap();

    let refresh = tokio::spawn({
        let engine = engine.clone();
        async move { engine.load_feed().await }
    });
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    assert_eq!(engine.status(), FeedStatus::Loading);

    refresh.await.unwrap().unwrap();
    assert_eq!(engine.status(), FeedStatus::Ready);
}

#[tokio::test(start_paused = true)]
async fn test_overlapping_loads_keep_only_the_latest() {
    let (engine, backend) = realistic(seed());
    // First load's posts fetch fails, but a newer load supersedes it
    backend.posts.faults().fail_next(Operation::GetAll, 1);

    let first = tokio::spawn({
        let engine = engine.clone();
        async move { engine.load_feed().await }
    });
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    let second = engine.load_feed().await.unwrap();

    assert!(matches!(second, LoadOutcome::Ready { posts: 3, .. }));
    assert_eq!(first.await.unwrap().unwrap(), LoadOutcome::Superseded);
    assert_eq!(engine.status(), FeedStatus::Ready);
    assert_eq!(engine.posts().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_like_confirmed_mid_load_survives_stale_snapshot() {
    // Posts snapshot is taken long before the slow users fetch lets the load apply
    let slow_users = LatencyProfile {
        get_all: Duration::from_secs(1),
        ..LatencyProfile::standard()
    };
    let fast_posts = LatencyProfile {
        get_all: Duration::from_millis(100),
        ..LatencyProfile::posts()
    };
    let backend = InMemoryFeedStore::with_latency(seed(), slow_users, fast_posts);
    let engine = engine_for(&backend);
    engine.load_feed().await.unwrap();

    let (reload, like) = tokio::join!(engine.load_feed(), engine.toggle_like("p1"));
    assert!(matches!(reload.unwrap(), LoadOutcome::Ready { .. }));
    assert!(matches!(like.unwrap(), LikeToggle::Liked { .. }));

    let stored = backend.posts.peek("p1").unwrap();
    assert!(stored.is_liked_by(VIEWER));
    assert_eq!(engine.post("p1").unwrap(), stored);
    assert!(engine.is_liked("p1"));
    assert_like_projection(&engine);
}
