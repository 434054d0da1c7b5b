use anyhow::{Context, Result};
use feed_engine::config::Config;
use feed_engine::engine::THREAD_PREVIEW_LEN;
use feed_engine::repository::{InMemoryFeedStore, Seed};
use feed_engine::services::NotificationLevel;
use feed_engine::{FeedEngine, FeedError};
use tracing::{info, warn};
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    info!(env = %config.app.env, viewer = %config.engine.viewer_id, "🔧 Starting feed-engine");

    let seed = Seed::fixtures()?;
    let backend = InMemoryFeedStore::new(seed, &config.store);
    let engine = FeedEngine::new(backend.feed_store(), config.engine.clone());

    // Surface notifications the way a UI would show toasts
    let mut notifications = engine.subscribe();
    let toasts = tokio::spawn(async move {
        while let Ok(note) = notifications.recv().await {
            match note.level {
                NotificationLevel::Success => info!(message = %note.message, "✅ notification"),
                NotificationLevel::Error => warn!(message = %note.message, "❌ notification"),
            }
        }
    });

    engine.load_feed().await?;

    engine.set_post_draft("First light on the ridge again this morning.");
    let created = match engine.submit_post_draft().await? {
        feed_engine::PostCreation::Created(post) => post,
        feed_engine::PostCreation::Skipped => anyhow::bail!("demo post was unexpectedly blank"),
    };

    // Like two posts concurrently; they touch different posts so neither waits
    let (own, other) = tokio::join!(engine.toggle_like(&created.id), engine.toggle_like("post1"));
    let (own, other) = (own?, other?);
    info!(new_post = ?own, post1 = ?other, "Likes applied");

    engine.set_comment_draft(&created.id, "Counting down to the weekend hike.");
    match engine.submit_comment_draft(&created.id).await {
        Ok(outcome) => info!(?outcome, "Comment submitted"),
        Err(e @ FeedError::PartialFailure { .. }) => warn!(error = %e, "Comment orphaned"),
        Err(e) => return Err(e.into()),
    }

    if engine.toggle_comments_panel(&created.id) {
        let thread = engine
            .load_comment_thread(&created.id, THREAD_PREVIEW_LEN)
            .await?;
        info!(comments = thread.len(), "Comment panel expanded");
    }

    let snapshot = serde_json::to_string_pretty(&engine.snapshot())?;
    println!("{}", snapshot);

    // Last handle closes the channel; the toast task drains what is queued and exits
    drop(engine);
    toasts.await?;
    Ok(())
}
