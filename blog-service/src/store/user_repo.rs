use uuid::Uuid;

use super::ContentStore;
use crate::models::User;

/// Resolve a username to a user record, creating it on first sight.
///
/// Users are owned by the identity layer; this mirror only assigns a stable
/// id for content entities to reference. The entry API keeps concurrent
/// first-sight races from minting two ids for one name.
pub fn get_or_create_user(store: &ContentStore, username: &str) -> User {
    let id = *store
        .usernames
        .entry(username.to_owned())
        .or_insert_with(Uuid::new_v4);

    store
        .users
        .entry(id)
        .or_insert_with(|| User {
            id,
            username: username.to_owned(),
        })
        .clone()
}

pub fn find_user_by_username(store: &ContentStore, username: &str) -> Option<User> {
    let id = *store.usernames.get(username)?;
    store.users.get(&id).map(|u| u.clone())
}

pub fn find_user(store: &ContentStore, id: Uuid) -> Option<User> {
    store.users.get(&id).map(|u| u.clone())
}
