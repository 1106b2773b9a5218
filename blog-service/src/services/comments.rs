//! Comment creation.
use std::sync::Arc;

use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::Comment;
use crate::store::{comment_repo, post_repo, ContentStore};

pub struct CommentService {
    store: Arc<ContentStore>,
}

impl CommentService {
    pub fn new(store: Arc<ContentStore>) -> Self {
        Self { store }
    }

    /// Attach a comment to a post. Comments are immutable once created.
    pub fn add_comment(&self, post_id: u64, author: Uuid, text: &str) -> Result<Comment> {
        post_repo::find_post_by_id(&self.store, post_id)
            .ok_or_else(|| AppError::NotFound(format!("unknown post: {post_id}")))?;
        let comment = comment_repo::create_comment(&self.store, post_id, author, text);
        tracing::info!(post_id, comment_id = comment.id, "comment added");
        Ok(comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{post_repo, user_repo};

    #[test]
    fn comment_lands_on_its_post() {
        let store = Arc::new(ContentStore::new());
        let author = user_repo::get_or_create_user(&store, "alice").id;
        let post = post_repo::create_post(&store, author, "text", None, None);
        let service = CommentService::new(store.clone());

        let comment = service.add_comment(post.id, author, "nice").unwrap();
        assert_eq!(comment.post_id, post.id);
        assert_eq!(comment_repo::comments_by_post(&store, post.id).len(), 1);
    }

    #[test]
    fn commenting_on_a_missing_post_is_not_found() {
        let store = Arc::new(ContentStore::new());
        let author = user_repo::get_or_create_user(&store, "alice").id;
        let service = CommentService::new(store);

        assert!(matches!(
            service.add_comment(999, author, "nice"),
            Err(AppError::NotFound(_))
        ));
    }
}
