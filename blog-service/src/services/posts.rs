//! Post creation, editing, and detail assembly.
use std::sync::Arc;

use uuid::Uuid;

use super::access;
use crate::error::{AppError, Result};
use crate::models::{Comment, Post, PostForm, User};
use crate::store::{comment_repo, post_repo, user_repo, ContentStore};

/// Detail-view title length; longer texts are cut here with an ellipsis.
const TITLE_LENGTH: usize = 30;

/// Everything the detail view needs for one post.
pub struct PostDetail {
    pub post: Post,
    pub author: User,
    pub short_title: String,
    pub comments: Vec<Comment>,
    pub author_posts_count: usize,
}

/// Outcome of an edit attempt. A non-author is routed back to the detail
/// view rather than being shown an error.
pub enum EditOutcome {
    Updated(Post),
    NotYours,
}

pub struct PostService {
    store: Arc<ContentStore>,
}

impl PostService {
    pub fn new(store: Arc<ContentStore>) -> Self {
        Self { store }
    }

    /// Create a post authored by `author`. The form is assumed validated.
    pub fn create_post(&self, author: Uuid, form: &PostForm) -> Post {
        let post = post_repo::create_post(
            &self.store,
            author,
            &form.text,
            form.image_url.as_deref(),
            form.group.as_deref(),
        );
        tracing::info!(post_id = post.id, %author, "post created");
        post
    }

    /// Apply an edit on behalf of `requester`. Only the author may edit;
    /// anyone else gets `NotYours` and no write happens.
    pub fn edit_post(&self, post_id: u64, requester: Uuid, form: &PostForm) -> Result<EditOutcome> {
        let post = post_repo::find_post_by_id(&self.store, post_id)
            .ok_or_else(|| AppError::NotFound(format!("unknown post: {post_id}")))?;

        if !access::can_edit(&post, Some(requester)) {
            return Ok(EditOutcome::NotYours);
        }

        let updated = post_repo::update_post(
            &self.store,
            post_id,
            &form.text,
            form.image_url.as_deref(),
            form.group.as_deref(),
        )
        .ok_or_else(|| AppError::NotFound(format!("unknown post: {post_id}")))?;
        tracing::info!(post_id, "post edited");
        Ok(EditOutcome::Updated(updated))
    }

    pub fn find_post(&self, post_id: u64) -> Result<Post> {
        post_repo::find_post_by_id(&self.store, post_id)
            .ok_or_else(|| AppError::NotFound(format!("unknown post: {post_id}")))
    }

    /// Assemble the detail view: the post, its author, its comment thread
    /// (oldest first), and the author's overall post count.
    pub fn detail(&self, post_id: u64) -> Result<PostDetail> {
        let post = self.find_post(post_id)?;
        let author = user_repo::find_user(&self.store, post.author_id)
            .ok_or_else(|| AppError::Internal(format!("post {post_id} has no author record")))?;
        let comments = comment_repo::comments_by_post(&self.store, post_id);
        let author_posts_count = post_repo::count_posts_by_author(&self.store, post.author_id);

        Ok(PostDetail {
            short_title: short_title(&post.text),
            post,
            author,
            comments,
            author_posts_count,
        })
    }
}

/// First `TITLE_LENGTH` characters of the text, with `...` appended when
/// anything was cut (or the text fills the window exactly).
pub fn short_title(text: &str) -> String {
    let mut title: String = text.chars().take(TITLE_LENGTH).collect();
    if text.chars().count() >= TITLE_LENGTH {
        title.push_str("...");
    }
    title
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(short_title("hello"), "hello");
    }

    #[test]
    fn long_text_is_cut_with_ellipsis() {
        let text = "a".repeat(45);
        let title = short_title(&text);
        assert_eq!(title, format!("{}...", "a".repeat(30)));
    }

    #[test]
    fn exactly_thirty_chars_still_gets_ellipsis() {
        let text = "b".repeat(30);
        assert_eq!(short_title(&text), format!("{text}..."));
    }

    #[test]
    fn non_author_edit_leaves_the_post_unchanged() {
        let store = Arc::new(ContentStore::new());
        let author = user_repo::get_or_create_user(&store, "alice").id;
        let intruder = user_repo::get_or_create_user(&store, "bob").id;
        let service = PostService::new(store.clone());

        let form = PostForm {
            text: "original".to_string(),
            image_url: None,
            group: None,
        };
        let post = service.create_post(author, &form);

        let edit = PostForm {
            text: "hijacked".to_string(),
            image_url: None,
            group: None,
        };
        match service.edit_post(post.id, intruder, &edit).unwrap() {
            EditOutcome::NotYours => {}
            EditOutcome::Updated(_) => panic!("non-author edit must not update"),
        }
        assert_eq!(service.find_post(post.id).unwrap().text, "original");

        match service.edit_post(post.id, author, &edit).unwrap() {
            EditOutcome::Updated(updated) => assert_eq!(updated.text, "hijacked"),
            EditOutcome::NotYours => panic!("author edit must update"),
        }
    }
}
