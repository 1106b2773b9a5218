//! In-process cache for rendered pages.
//!
//! Rendered output is memoized as opaque byte blobs keyed by a scope
//! identifier. An entry is reused until its TTL elapses or the whole cache is
//! flushed; writes to the data a page was rendered from never invalidate it.
//! The time source is injected through [`Clock`] so TTL behavior can be
//! driven deterministically in tests.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::debug;

pub mod metrics;

/// Time source used for TTL checks.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Clone)]
struct Slot {
    rendered_at: DateTime<Utc>,
    bytes: Vec<u8>,
}

/// Rendered-page cache keyed by scope identifier.
///
/// Safe for concurrent readers. Two requests racing on a cold slot may both
/// render; the last writer wins the slot. Cached content is derived and
/// idempotent to recompute, so the race is tolerated rather than locked out.
pub struct PageCache {
    slots: DashMap<String, Slot>,
    clock: Arc<dyn Clock>,
}

impl PageCache {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            slots: DashMap::new(),
            clock,
        }
    }

    /// Cache backed by the wall clock.
    pub fn system() -> Self {
        Self::new(Arc::new(SystemClock))
    }

    /// Returns the bytes stored for `key` when they were rendered within
    /// `ttl`; otherwise invokes `render`, stores its output under `key` with
    /// a fresh timestamp, and returns it.
    pub async fn get_or_render<F, Fut, E>(
        &self,
        key: &str,
        ttl: Duration,
        render: F,
    ) -> Result<Vec<u8>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<u8>, E>>,
    {
        let now = self.clock.now();

        if let Some(slot) = self.slots.get(key) {
            let age = now.signed_duration_since(slot.rendered_at);
            // A negative age means the clock moved backwards; treat as expired.
            if age.to_std().map(|age| age < ttl).unwrap_or(false) {
                debug!(key, "page cache hit");
                metrics::PAGE_CACHE_EVENTS.with_label_values(&["hit"]).inc();
                return Ok(slot.bytes.clone());
            }
        }

        debug!(key, "page cache miss");
        metrics::PAGE_CACHE_EVENTS.with_label_values(&["miss"]).inc();

        let bytes = render().await?;
        self.slots.insert(
            key.to_owned(),
            Slot {
                rendered_at: now,
                bytes: bytes.clone(),
            },
        );
        Ok(bytes)
    }

    /// Drops every slot immediately.
    pub fn flush(&self) {
        self.slots.clear();
        metrics::PAGE_CACHE_FLUSH_TOTAL.inc();
        debug!("page cache flushed");
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
