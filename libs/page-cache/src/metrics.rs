use lazy_static::lazy_static;
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

lazy_static! {
    /// Page cache lookups segmented by outcome (hit/miss).
    pub static ref PAGE_CACHE_EVENTS: IntCounterVec = register_int_counter_vec!(
        "page_cache_events_total",
        "Page cache lookups segmented by outcome",
        &["event"]
    )
    .expect("failed to register page_cache_events_total");

    /// Explicit full-cache flushes.
    pub static ref PAGE_CACHE_FLUSH_TOTAL: IntCounter = register_int_counter!(
        "page_cache_flush_total",
        "Explicit page cache flushes"
    )
    .expect("failed to register page_cache_flush_total");
}
