//! Ownership and participation predicates.
//!
//! Pure functions over explicit (entity, requester) arguments; the requester
//! is `None` for anonymous requests.
use uuid::Uuid;

use crate::models::Post;

/// True when `requester` may edit `post`: only the author, ever.
pub fn can_edit(post: &Post, requester: Option<Uuid>) -> bool {
    matches!(requester, Some(id) if id == post.author_id)
}

/// Any authenticated user may comment on any post.
pub fn can_comment(requester: Option<Uuid>) -> bool {
    requester.is_some()
}

/// Viewer-relative visibility flag: true when the post was not authored by
/// the requester. Anonymous requesters are imposters for every post.
pub fn is_imposter(post: &Post, requester: Option<Uuid>) -> bool {
    !can_edit(post, requester)
}
