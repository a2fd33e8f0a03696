//! TTL Cache demo
//!
//! Exercises the cache end to end and prints its statistics as JSON.

use std::env;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ttl_cache::{Cache, CacheConfig};

/// Upper bound on how long the demo waits for entries to expire.
const MAX_DEMO_WAIT: Duration = Duration::from_secs(60);

/// Time to wait for the demo entries to expire and a sweep to reclaim them.
///
/// Saturates instead of overflowing, then caps at `MAX_DEMO_WAIT`.
fn settle_time(demo_ttl: Duration, cleanup_interval: Duration) -> Duration {
    demo_ttl
        .saturating_add(cleanup_interval.saturating_mul(2))
        .min(MAX_DEMO_WAIT)
}

/// Main entry point for the demo.
///
/// # Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache, which starts its cleanup task
/// 4. Store expiring and persistent entries, then wait past their TTL
/// 5. Report what survived and stop the cache
fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ttl_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CacheConfig::from_env();
    let demo_ttl = Duration::from_millis(
        env::var("DEMO_TTL_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(200),
    );
    info!(
        "Configuration loaded: cleanup_interval={:?}, demo_ttl={:?}",
        config.cleanup_interval, demo_ttl
    );

    let cache: Cache<String> =
        Cache::from_config(&config).context("failed to start the cache")?;

    for i in 0..5 {
        cache.set(format!("session:{i}"), format!("token-{i}"), demo_ttl);
    }
    cache.set("config:motd", "hello".to_string(), Duration::ZERO);
    info!("Stored {} entries", cache.len());

    if let Some(motd) = cache.get("config:motd") {
        info!("config:motd = {}", motd);
    }

    thread::sleep(settle_time(demo_ttl, config.cleanup_interval));

    info!(
        "After TTL: session:0 present={}, config:motd present={}",
        cache.contains_key("session:0"),
        cache.contains_key("config:motd")
    );

    cache.stop();

    let stats = serde_json::to_string_pretty(&cache.stats())?;
    println!("{stats}");

    info!("Cache stopped");
    Ok(())
}
