use std::collections::HashSet;
use std::sync::atomic::Ordering;

use uuid::Uuid;

use super::ContentStore;

/// Idempotent edge insert; returns true when a new edge was created.
/// Self-follows never create an edge.
pub fn create_follow(store: &ContentStore, follower: Uuid, followee: Uuid) -> bool {
    if follower == followee {
        return false;
    }
    let inserted = store.follows.entry(follower).or_default().insert(followee);
    if inserted {
        store.follow_edges.fetch_add(1, Ordering::Relaxed);
    }
    inserted
}

/// Idempotent edge delete; returns true when an edge was removed.
pub fn delete_follow(store: &ContentStore, follower: Uuid, followee: Uuid) -> bool {
    let removed = store
        .follows
        .get_mut(&follower)
        .map(|mut followed| followed.remove(&followee))
        .unwrap_or(false);
    if removed {
        store.follow_edges.fetch_sub(1, Ordering::Relaxed);
    }
    removed
}

pub fn is_following(store: &ContentStore, follower: Uuid, followee: Uuid) -> bool {
    store
        .follows
        .get(&follower)
        .map(|followed| followed.contains(&followee))
        .unwrap_or(false)
}

/// The set of author ids `follower` follows.
pub fn following_set(store: &ContentStore, follower: Uuid) -> HashSet<Uuid> {
    store
        .follows
        .get(&follower)
        .map(|followed| followed.clone())
        .unwrap_or_default()
}

/// Count of follow edges system-wide.
pub fn count_follows(store: &ContentStore) -> u64 {
    store.follow_edges.load(Ordering::Relaxed)
}
