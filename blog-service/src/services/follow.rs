//! Follow graph manager.
use std::sync::Arc;

use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::store::{follow_repo, user_repo, ContentStore};

pub struct FollowService {
    store: Arc<ContentStore>,
}

impl FollowService {
    pub fn new(store: Arc<ContentStore>) -> Self {
        Self { store }
    }

    /// Idempotent follow; self-follows and existing edges are silent no-ops.
    /// Returns true when a new edge was created.
    pub fn follow(&self, follower: Uuid, target_username: &str) -> Result<bool> {
        let target = self.resolve(target_username)?;
        Ok(follow_repo::create_follow(&self.store, follower, target))
    }

    /// Idempotent unfollow; a missing edge is a silent no-op. Returns true
    /// when an edge was removed.
    pub fn unfollow(&self, follower: Uuid, target_username: &str) -> Result<bool> {
        let target = self.resolve(target_username)?;
        Ok(follow_repo::delete_follow(&self.store, follower, target))
    }

    pub fn is_following(&self, follower: Uuid, followee: Uuid) -> bool {
        follow_repo::is_following(&self.store, follower, followee)
    }

    /// Count of follow edges system-wide, for informational display.
    pub fn follower_count_total(&self) -> u64 {
        follow_repo::count_follows(&self.store)
    }

    fn resolve(&self, username: &str) -> Result<Uuid> {
        user_repo::find_user_by_username(&self.store, username)
            .map(|u| u.id)
            .ok_or_else(|| AppError::NotFound(format!("unknown user: {username}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::user_repo;

    #[test]
    fn follow_unfollow_round_trip() {
        let store = Arc::new(ContentStore::new());
        let a = user_repo::get_or_create_user(&store, "a").id;
        let b = user_repo::get_or_create_user(&store, "b").id;
        let service = FollowService::new(store);

        assert!(service.follow(a, "b").unwrap());
        assert!(!service.follow(a, "b").unwrap());
        assert!(service.is_following(a, b));
        assert_eq!(service.follower_count_total(), 1);

        assert!(service.unfollow(a, "b").unwrap());
        assert!(!service.unfollow(a, "b").unwrap());
        assert!(!service.is_following(a, b));
        assert_eq!(service.follower_count_total(), 0);
    }

    #[test]
    fn self_follow_is_a_no_op() {
        let store = Arc::new(ContentStore::new());
        let a = user_repo::get_or_create_user(&store, "a").id;
        let service = FollowService::new(store);

        assert!(!service.follow(a, "a").unwrap());
        assert_eq!(service.follower_count_total(), 0);
    }

    #[test]
    fn unknown_target_is_not_found() {
        let store = Arc::new(ContentStore::new());
        let a = user_repo::get_or_create_user(&store, "a").id;
        let service = FollowService::new(store);

        assert!(matches!(
            service.follow(a, "ghost"),
            Err(AppError::NotFound(_))
        ));
    }
}
