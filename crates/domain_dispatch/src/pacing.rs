//! Outbound rate shaping
//!
//! The bulk loop pauses between successful sends to stay inside provider
//! rate limits. The pause is a policy object rather than an inline sleep so
//! it can be swapped (token bucket, adaptive) and stubbed out in tests.

use std::time::Duration;

use async_trait::async_trait;

/// Policy invoked after each successful send in a bulk dispatch
#[async_trait]
pub trait SendPacer: Send + Sync {
    async fn pause_between_sends(&self);
}

/// Fixed-delay pacing backed by the tokio timer
#[derive(Debug, Clone)]
pub struct FixedDelayPacer {
    delay: Duration,
}

impl FixedDelayPacer {
    /// Creates a pacer with the given delay
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl SendPacer for FixedDelayPacer {
    async fn pause_between_sends(&self) {
        tokio::time::sleep(self.delay).await;
    }
}

/// No-op pacer for tests
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacer;

#[async_trait]
impl SendPacer for NoPacer {
    async fn pause_between_sends(&self) {}
}
