//! Simulated latency for store operations.
//!
//! Repository calls wait a fixed delay before resolving so callers observe
//! network-like timing. The wait is injected so tests can skip or record it.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

#[async_trait]
pub trait Latency: Send + Sync {
    /// Suspend the caller for `delay`. Never fails, never cancelled early.
    async fn wait(&self, delay: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioLatency;

#[async_trait]
impl Latency for TokioLatency {
    async fn wait(&self, delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Resolves immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLatency;

#[async_trait]
impl Latency for NoLatency {
    async fn wait(&self, _delay: Duration) {}
}

/// Resolves immediately but remembers each requested delay.
#[derive(Debug, Default)]
pub struct RecordingLatency {
    requested: Mutex<Vec<Duration>>,
}

impl RecordingLatency {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delays requested so far, in call order.
    pub fn requested(&self) -> Vec<Duration> {
        self.requested.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Latency for RecordingLatency {
    async fn wait(&self, delay: Duration) {
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(delay);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn recording_latency_keeps_call_order() {
        let latency = RecordingLatency::new();
        latency.wait(Duration::from_millis(300)).await;
        latency.wait(Duration::from_millis(500)).await;
        assert_eq!(
            latency.requested(),
            vec![Duration::from_millis(300), Duration::from_millis(500)]
        );
    }

    #[tokio::test]
    async fn tokio_latency_waits_at_least_the_delay() {
        let started = std::time::Instant::now();
        TokioLatency.wait(Duration::from_millis(20)).await;
        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}
