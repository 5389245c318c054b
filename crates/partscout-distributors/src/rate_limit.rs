//! Token-bucket admission gate for outbound distributor requests.
//!
//! Each client owns one [`RateLimiter`]. The bucket holds up to
//! `requests_per_minute` tokens and refills continuously at
//! `requests_per_minute / 60` tokens per second. A fresh limiter starts full,
//! so the first `requests_per_minute` calls are admitted immediately.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

#[derive(Debug)]
struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

/// Per-client token bucket. `acquire` never fails and never drops a request.
#[derive(Debug)]
pub struct RateLimiter {
    requests_per_minute: u32,
    bucket: Mutex<Bucket>,
}

impl RateLimiter {
    /// Creates a full bucket. A rate of `0` is clamped to `1`.
    #[must_use]
    pub fn new(requests_per_minute: u32) -> Self {
        let requests_per_minute = requests_per_minute.max(1);
        Self {
            requests_per_minute,
            bucket: Mutex::new(Bucket {
                tokens: f64::from(requests_per_minute),
                last_refill: Instant::now(),
            }),
        }
    }

    #[must_use]
    pub fn requests_per_minute(&self) -> u32 {
        self.requests_per_minute
    }

    /// Waits until a token is available, then consumes it.
    ///
    /// The bucket lock is held across the wait, so concurrent callers are
    /// admitted one at a time in lock-acquisition order and never observe or
    /// consume the same token.
    pub async fn acquire(&self) {
        let rate = f64::from(self.requests_per_minute);
        let mut bucket = self.bucket.lock().await;

        let now = Instant::now();
        let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
        bucket.tokens = (bucket.tokens + elapsed * rate / 60.0).min(rate);
        bucket.last_refill = now;

        if bucket.tokens < 1.0 {
            let wait_secs = (1.0 - bucket.tokens) * 60.0 / rate;
            tracing::debug!(
                wait_ms = (wait_secs * 1000.0).round(),
                rate_per_minute = self.requests_per_minute,
                "rate limiter exhausted; waiting for next token"
            );
            tokio::time::sleep(Duration::from_secs_f64(wait_secs)).await;
            bucket.tokens = 1.0;
            bucket.last_refill = Instant::now();
        }

        bucket.tokens -= 1.0;
    }
}
