//! Per-domain minimum-interval gate for outbound catalog calls.
//!
//! Shared timing state is explicit and run-scoped: a map from domain key to
//! the earliest instant the next call may proceed, guarded by one tokio
//! mutex. Distinct domains never wait on each other; callers sharing a
//! domain are spaced at least `min_interval` apart in the order they reach
//! the gate.

use std::collections::HashMap;

use tokio::sync::Mutex;
use tokio::time::{sleep, Duration, Instant};
use tracing::debug;

#[derive(Debug, Default)]
pub struct RateLimiter {
    next_allowed: Mutex<HashMap<String, Instant>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suspend the caller until at least `min_interval` has elapsed since the
    /// previous caller for the same `domain` was released. The reservation is
    /// taken under the lock; the sleep happens outside it, so other domains
    /// proceed unimpeded while this caller waits.
    pub async fn wait(&self, domain: &str, min_interval: Duration) {
        let now = Instant::now();
        let release_at = {
            let mut slots = self.next_allowed.lock().await;
            let release_at = match slots.get(domain) {
                Some(&next) if next > now => next,
                _ => now,
            };
            slots.insert(domain.to_string(), release_at + min_interval);
            release_at
        };
        if release_at > now {
            debug!(
                domain,
                wait_ms = (release_at - now).as_millis() as u64,
                "Rate limit gate: waiting for domain slot"
            );
            sleep(release_at - now).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn same_domain_calls_are_spaced() {
        let limiter = RateLimiter::new();
        let interval = Duration::from_millis(50);
        let start = Instant::now();
        limiter.wait("api.github.com", interval).await;
        limiter.wait("api.github.com", interval).await;
        assert!(start.elapsed() >= interval);
    }

    #[tokio::test]
    async fn distinct_domains_do_not_wait_on_each_other() {
        let limiter = RateLimiter::new();
        let interval = Duration::from_millis(200);
        let start = Instant::now();
        limiter.wait("api.github.com", interval).await;
        limiter.wait("huggingface.co", interval).await;
        // Only the first call for each domain, so no sleeping at all.
        assert!(start.elapsed() < interval);
    }

    #[tokio::test]
    async fn third_caller_waits_behind_the_second() {
        let limiter = RateLimiter::new();
        let interval = Duration::from_millis(30);
        let start = Instant::now();
        limiter.wait("arxiv.org", interval).await;
        limiter.wait("arxiv.org", interval).await;
        limiter.wait("arxiv.org", interval).await;
        assert!(start.elapsed() >= interval * 2);
    }
}
