use std::collections::HashSet;
use std::sync::atomic::Ordering;

use chrono::Utc;
use uuid::Uuid;

use super::ContentStore;
use crate::models::Post;

/// Insert a new post and return it. The author is fixed at creation.
pub fn create_post(
    store: &ContentStore,
    author_id: Uuid,
    text: &str,
    image_url: Option<&str>,
    group_slug: Option<&str>,
) -> Post {
    let id = store.post_seq.fetch_add(1, Ordering::Relaxed) + 1;
    let post = Post {
        id,
        author_id,
        text: text.to_owned(),
        image_url: image_url.map(str::to_owned),
        group_slug: group_slug.map(str::to_owned),
        created_at: Utc::now(),
    };
    store.posts.insert(id, post.clone());
    post
}

pub fn find_post_by_id(store: &ContentStore, post_id: u64) -> Option<Post> {
    store.posts.get(&post_id).map(|p| p.clone())
}

/// Apply an author edit in place. The update is a single entry mutation, so
/// readers never observe a partially written post. Returns the updated post,
/// or `None` when the post does not exist.
pub fn update_post(
    store: &ContentStore,
    post_id: u64,
    text: &str,
    image_url: Option<&str>,
    group_slug: Option<&str>,
) -> Option<Post> {
    store.posts.get_mut(&post_id).map(|mut post| {
        post.text = text.to_owned();
        post.image_url = image_url.map(str::to_owned);
        post.group_slug = group_slug.map(str::to_owned);
        post.clone()
    })
}

pub fn all_posts(store: &ContentStore) -> Vec<Post> {
    store.posts.iter().map(|p| p.clone()).collect()
}

pub fn posts_by_group(store: &ContentStore, slug: &str) -> Vec<Post> {
    store
        .posts
        .iter()
        .filter(|p| p.group_slug.as_deref() == Some(slug))
        .map(|p| p.clone())
        .collect()
}

pub fn posts_by_author(store: &ContentStore, author_id: Uuid) -> Vec<Post> {
    store
        .posts
        .iter()
        .filter(|p| p.author_id == author_id)
        .map(|p| p.clone())
        .collect()
}

/// Posts whose author is in `authors`. Used by the following feed after the
/// followed set has been resolved from the follow index.
pub fn posts_by_authors(store: &ContentStore, authors: &HashSet<Uuid>) -> Vec<Post> {
    store
        .posts
        .iter()
        .filter(|p| authors.contains(&p.author_id))
        .map(|p| p.clone())
        .collect()
}

pub fn count_posts_by_author(store: &ContentStore, author_id: Uuid) -> usize {
    store
        .posts
        .iter()
        .filter(|p| p.author_id == author_id)
        .count()
}

pub fn post_count(store: &ContentStore) -> usize {
    store.posts.len()
}
