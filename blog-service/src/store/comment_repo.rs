use std::sync::atomic::Ordering;

use chrono::Utc;
use uuid::Uuid;

use super::ContentStore;
use crate::models::Comment;

/// Insert a new comment on a post. Comments are immutable once created.
pub fn create_comment(
    store: &ContentStore,
    post_id: u64,
    author_id: Uuid,
    text: &str,
) -> Comment {
    let id = store.comment_seq.fetch_add(1, Ordering::Relaxed) + 1;
    let comment = Comment {
        id,
        post_id,
        author_id,
        text: text.to_owned(),
        created_at: Utc::now(),
    };
    store.comments.insert(id, comment.clone());
    comment
}

/// All comments on a post, oldest first.
pub fn comments_by_post(store: &ContentStore, post_id: u64) -> Vec<Comment> {
    let mut comments: Vec<Comment> = store
        .comments
        .iter()
        .filter(|c| c.post_id == post_id)
        .map(|c| c.clone())
        .collect();
    comments.sort_unstable_by_key(|c| c.id);
    comments
}

pub fn comment_count(store: &ContentStore) -> usize {
    store.comments.len()
}
