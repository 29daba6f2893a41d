//! Injectable time sources.
//!
//! The submission round trip waits a fixed delay before finishing. Both
//! the delay and the wall clock sit behind traits so tests (and any
//! host without a tokio runtime) can substitute deterministic
//! implementations.

use async_trait::async_trait;
use std::time::Duration;

/// Wall-clock seconds source.
pub trait Clock: Send + Sync {
    /// Current Unix timestamp in seconds.
    fn unix_now(&self) -> i64;
}

/// System wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_now(&self) -> i64 {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0)
    }
}

/// A clock pinned to a fixed timestamp, for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn unix_now(&self) -> i64 {
        self.0
    }
}

/// Asynchronous delay source.
#[async_trait]
pub trait Delay: Send + Sync {
    /// Resolve after roughly `duration` has elapsed.
    async fn wait(&self, duration: Duration);
}

/// Delay backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn wait(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Delay that resolves immediately, so tests run synchronously.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl Delay for NoDelay {
    async fn wait(&self, _duration: Duration) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock(1_754_000_000);
        assert_eq!(clock.unix_now(), 1_754_000_000);
    }

    #[test]
    fn test_system_clock_moves() {
        // anything after 2020 is close enough
        assert!(SystemClock.unix_now() > 1_577_836_800);
    }

    #[tokio::test]
    async fn test_no_delay_resolves() {
        NoDelay.wait(Duration::from_secs(3_600)).await;
    }
}
