//! In-process content store.
//!
//! The store is the only shared mutable resource in the service. Entities
//! live in concurrent maps; every write touches a single map entry, which is
//! the per-entity atomicity the operations rely on. No operation spans
//! entity types atomically. Repository modules group the operations per
//! entity.
pub mod comment_repo;
pub mod follow_repo;
pub mod group_repo;
pub mod post_repo;
pub mod user_repo;

use std::collections::HashSet;
use std::sync::atomic::AtomicU64;

use dashmap::DashMap;
use uuid::Uuid;

use crate::models::{Comment, Group, Post, User};

/// Shared store for content entities and the follow graph.
pub struct ContentStore {
    pub(crate) users: DashMap<Uuid, User>,
    /// username -> user id index; usernames are unique.
    pub(crate) usernames: DashMap<String, Uuid>,
    /// Groups keyed by slug.
    pub(crate) groups: DashMap<String, Group>,
    pub(crate) posts: DashMap<u64, Post>,
    pub(crate) comments: DashMap<u64, Comment>,
    /// Secondary index follower -> set of followed author ids.
    pub(crate) follows: DashMap<Uuid, HashSet<Uuid>>,
    pub(crate) post_seq: AtomicU64,
    pub(crate) comment_seq: AtomicU64,
    /// System-wide follow edge count, kept for informational display.
    pub(crate) follow_edges: AtomicU64,
}

impl ContentStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            usernames: DashMap::new(),
            groups: DashMap::new(),
            posts: DashMap::new(),
            comments: DashMap::new(),
            follows: DashMap::new(),
            post_seq: AtomicU64::new(0),
            comment_seq: AtomicU64::new(0),
            follow_edges: AtomicU64::new(0),
        }
    }
}

impl Default for ContentStore {
    fn default() -> Self {
        Self::new()
    }
}
