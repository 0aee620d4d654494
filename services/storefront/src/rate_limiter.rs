//! Login throttling to slow down password guessing

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::warn;

/// Rate limiter configuration
#[derive(Debug, Clone)]
pub struct RateLimiterConfig {
    /// Attempts admitted inside one window
    pub max_attempts: u32,
    /// Time window in seconds
    pub window_seconds: u64,
    /// Ban duration in seconds
    pub ban_duration_seconds: u64,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            window_seconds: 300,       // 5 minutes
            ban_duration_seconds: 900, // 15 minutes
        }
    }
}

#[derive(Debug)]
struct RateLimiterEntry {
    attempts: u32,
    window_start: Instant,
    ban_expires: Option<Instant>,
}

impl RateLimiterEntry {
    fn is_stale(&self, now: Instant, window: Duration) -> bool {
        match self.ban_expires {
            Some(ban_expires) => now >= ban_expires,
            None => now.duration_since(self.window_start) >= window,
        }
    }
}

/// Counts attempts per key and locks the key out once too many pile up
///
/// An attempt is counted when it is admitted, so concurrent attempts cannot
/// all slip past the limit before any of them fails.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    config: RateLimiterConfig,
    entries: Arc<Mutex<HashMap<String, RateLimiterEntry>>>,
}

impl RateLimiter {
    pub fn new(config: RateLimiterConfig) -> Self {
        Self {
            config,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Admit and count an attempt for `key`
    ///
    /// Returns false while the key is banned, and bans it when an attempt
    /// arrives after `max_attempts` were admitted inside the window.
    pub async fn check(&self, key: &str) -> bool {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();
        let window = Duration::from_secs(self.config.window_seconds);

        entries.retain(|_, entry| !entry.is_stale(now, window));

        let entry = entries.entry(key.to_string()).or_insert(RateLimiterEntry {
            attempts: 0,
            window_start: now,
            ban_expires: None,
        });

        if entry.ban_expires.is_some() {
            return false;
        }

        if entry.attempts >= self.config.max_attempts {
            entry.ban_expires = Some(now + Duration::from_secs(self.config.ban_duration_seconds));
            warn!(
                "Banned key {} for {} seconds after {} attempts",
                key, self.config.ban_duration_seconds, entry.attempts
            );
            return false;
        }

        entry.attempts += 1;
        true
    }

    /// Forget the attempts of `key`
    pub async fn reset(&self, key: &str) {
        self.entries.lock().await.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(max_attempts: u32, ban_duration_seconds: u64) -> RateLimiter {
        RateLimiter::new(RateLimiterConfig {
            max_attempts,
            window_seconds: 300,
            ban_duration_seconds,
        })
    }

    #[tokio::test]
    async fn test_unknown_key_is_allowed() {
        assert!(limiter(3, 60).check("ann@x.com").await);
    }

    #[tokio::test]
    async fn test_key_is_banned_after_max_attempts() {
        let limiter = limiter(3, 60);

        for _ in 0..3 {
            assert!(limiter.check("ann@x.com").await);
        }

        assert!(!limiter.check("ann@x.com").await);
        assert!(!limiter.check("ann@x.com").await);
        assert!(limiter.check("bob@x.com").await);
    }

    #[tokio::test]
    async fn test_reset_clears_attempts() {
        let limiter = limiter(2, 60);
        limiter.check("ann@x.com").await;
        limiter.check("ann@x.com").await;
        limiter.reset("ann@x.com").await;

        assert!(limiter.check("ann@x.com").await);
        assert!(limiter.check("ann@x.com").await);
    }

    #[tokio::test]
    async fn test_ban_expires() {
        let limiter = limiter(1, 0);
        assert!(limiter.check("ann@x.com").await);
        assert!(!limiter.check("ann@x.com").await);

        assert!(limiter.check("ann@x.com").await);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_attempts_share_one_budget() {
        let limiter = limiter(5, 60);
        let mut tasks = tokio::task::JoinSet::new();

        for _ in 0..100 {
            let limiter = limiter.clone();
            tasks.spawn(async move { limiter.check("ann@x.com").await });
        }

        let mut admitted = 0;
        while let Some(result) = tasks.join_next().await {
            if result.unwrap() {
                admitted += 1;
            }
        }
        assert_eq!(admitted, 5);
    }

    #[tokio::test]
    async fn test_expired_entries_are_dropped() {
        let limiter = RateLimiter::new(RateLimiterConfig {
            max_attempts: 5,
            window_seconds: 0,
            ban_duration_seconds: 0,
        });

        for i in 0..1_000 {
            assert!(limiter.check(&format!("user{}@x.com", i)).await);
        }
        limiter.check("last@x.com").await;

        assert_eq!(limiter.entries.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_live_entries_are_kept() {
        let limiter = limiter(5, 60);
        limiter.check("ann@x.com").await;
        limiter.check("bob@x.com").await;

        assert_eq!(limiter.entries.lock().await.len(), 2);
    }
}
