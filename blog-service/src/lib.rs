//! Blogging platform backend service.
//!
//! Users author posts, optionally filed under topical groups; other users
//! follow authors, comment on posts, and browse paginated feeds (global,
//! per-group, per-profile, per-followed-authors). The global feed is served
//! through a TTL page cache that is never invalidated by writes.
//!
//! # Modules
//!
//! - `handlers`: HTTP request handlers and route wiring
//! - `middleware`: request identity extraction
//! - `models`: domain entities and wire payloads
//! - `services`: feed assembly, access control, follow graph, post/comment logic
//! - `store`: in-process content store with per-entity repositories
//! - `error`: error types and HTTP mapping
//! - `config`: configuration management
//! - `metrics`: Prometheus collectors and exposition
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod services;
pub mod store;

use std::sync::Arc;

use page_cache::PageCache;

pub use config::Config;
pub use error::{AppError, Result};
use store::ContentStore;

/// Shared application state handed to every worker.
pub struct AppState {
    pub config: Config,
    pub store: Arc<ContentStore>,
    pub cache: Arc<PageCache>,
}

impl AppState {
    /// State with a wall-clock page cache.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            store: Arc::new(ContentStore::new()),
            cache: Arc::new(PageCache::system()),
        }
    }

    /// State over an externally built cache, used by tests that drive the
    /// cache clock manually.
    pub fn with_cache(config: Config, cache: Arc<PageCache>) -> Self {
        Self {
            config,
            store: Arc::new(ContentStore::new()),
            cache,
        }
    }
}
