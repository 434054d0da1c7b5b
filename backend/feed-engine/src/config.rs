/// Configuration management for the feed engine
///
/// Loads configuration from environment variables (and `.env` when present).
use anyhow::{bail, Context, Result};
use data_store::LatencyProfile;
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// Engine settings
    pub engine: EngineConfig,
    /// Simulated store settings
    pub store: StoreConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (dev, staging, prod)
    pub env: String,
}

/// Engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Identifier recorded in `likes` for the current viewer
    pub viewer_id: String,
    /// Author used for new content when no users are loaded
    #[serde(default = "default_fallback_author_id")]
    pub fallback_author_id: String,
    /// Buffered notifications per subscriber
    #[serde(default = "default_notification_capacity")]
    pub notification_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            viewer_id: default_viewer_id(),
            fallback_author_id: default_fallback_author_id(),
            notification_capacity: default_notification_capacity(),
        }
    }
}

/// Simulated store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Multiplier over the built-in latencies (0 disables delays)
    #[serde(default = "default_latency_multiplier")]
    pub latency_multiplier: f64,
}

impl StoreConfig {
    pub fn posts_latency(&self) -> LatencyProfile {
        LatencyProfile::posts().scaled(self.latency_multiplier)
    }

    pub fn standard_latency(&self) -> LatencyProfile {
        LatencyProfile::standard().scaled(self.latency_multiplier)
    }
}

// Default values
fn default_viewer_id() -> String {
    "current-user".to_string()
}

fn default_fallback_author_id() -> String {
    "user1".to_string()
}

fn default_notification_capacity() -> usize {
    64
}

fn default_latency_multiplier() -> f64 {
    1.0
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let app = AppConfig {
            env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        };

        let engine = EngineConfig {
            viewer_id: std::env::var("FEED_VIEWER_ID").unwrap_or_else(|_| default_viewer_id()),
            fallback_author_id: std::env::var("FEED_FALLBACK_AUTHOR_ID")
                .unwrap_or_else(|_| default_fallback_author_id()),
            notification_capacity: std::env::var("FEED_NOTIFICATION_CAPACITY")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or_else(default_notification_capacity),
        };

        let latency_multiplier = match std::env::var("STORE_LATENCY_MULTIPLIER") {
            Ok(raw) => raw
                .parse::<f64>()
                .with_context(|| format!("STORE_LATENCY_MULTIPLIER is not a number: {}", raw))?,
            Err(_) => default_latency_multiplier(),
        };
        if !latency_multiplier.is_finite() || latency_multiplier < 0.0 {
            bail!(
                "STORE_LATENCY_MULTIPLIER must be a non-negative number, got {}",
                latency_multiplier
            );
        }

        Ok(Config {
            app,
            engine,
            store: StoreConfig { latency_multiplier },
        })
    }
}
