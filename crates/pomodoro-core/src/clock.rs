//! Time sources for the timer engine.
//!
//! The engine never reads the system time directly. Everything goes through
//! [`Clock`], so tests can jump the clock forward to simulate throttled or
//! suspended execution.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// A source of absolute time in milliseconds since the Unix epoch.
pub trait Clock: Send + 'static {
    fn now_ms(&self) -> u64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Manually driven clock. Clones share the same underlying instant.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Arc::new(AtomicU64::new(start_ms)),
        }
    }

    pub fn set_ms(&self, ms: u64) {
        self.now.store(ms, Ordering::SeqCst);
    }

    /// Move the clock forward without firing anything, like a suspended tab.
    pub fn advance_ms(&self, delta: u64) {
        self.now.fetch_add(delta, Ordering::SeqCst);
    }

    pub fn advance_secs(&self, secs: u64) {
        self.advance_ms(secs.saturating_mul(1000));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Tokio's monotonic clock, anchored at the wall-clock time of construction.
///
/// Under `tokio::time::pause()` this follows virtual time, which keeps the
/// runtime's tick interval and the engine's notion of "now" in lockstep.
#[derive(Debug, Clone, Copy)]
pub struct TokioClock {
    anchor: tokio::time::Instant,
    anchor_ms: u64,
}

impl TokioClock {
    pub fn new() -> Self {
        Self {
            anchor: tokio::time::Instant::now(),
            anchor_ms: SystemClock.now_ms(),
        }
    }
}

impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TokioClock {
    fn now_ms(&self) -> u64 {
        let elapsed = tokio::time::Instant::now().saturating_duration_since(self.anchor);
        self.anchor_ms.saturating_add(elapsed.as_millis() as u64)
    }
}
