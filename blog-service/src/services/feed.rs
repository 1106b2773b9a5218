//! Feed assembly: scope resolution, ordering, pagination, visibility flags.
use std::sync::Arc;

use uuid::Uuid;

use super::access;
use crate::error::{AppError, Result};
use crate::metrics::FEED_REQUEST_TOTAL;
use crate::models::{FeedItem, FeedPage, Post};
use crate::store::{follow_repo, group_repo, post_repo, user_repo, ContentStore};

/// Post subset selector for a feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedScope {
    /// All posts.
    Global,
    /// Posts filed under the group with this slug.
    Group(String),
    /// Posts authored by this username.
    Author(String),
    /// Posts by authors the viewer follows.
    Following,
}

impl FeedScope {
    fn label(&self) -> &'static str {
        match self {
            FeedScope::Global => "global",
            FeedScope::Group(_) => "group",
            FeedScope::Author(_) => "author",
            FeedScope::Following => "following",
        }
    }
}

pub struct FeedService {
    store: Arc<ContentStore>,
    page_size: usize,
}

impl FeedService {
    pub fn new(store: Arc<ContentStore>, page_size: usize) -> Self {
        Self { store, page_size }
    }

    /// Assemble one page of the feed for `scope` as seen by `viewer`.
    ///
    /// Pure read: pages are 1-indexed, a page at or below zero is treated as
    /// page one, and a page past the end yields an empty item list rather
    /// than an error.
    pub fn get_feed(&self, scope: &FeedScope, viewer: Option<Uuid>, page: i64) -> Result<FeedPage> {
        FEED_REQUEST_TOTAL.with_label_values(&[scope.label()]).inc();

        let mut posts = match scope {
            FeedScope::Global => post_repo::all_posts(&self.store),
            FeedScope::Group(slug) => {
                group_repo::find_group_by_slug(&self.store, slug)
                    .ok_or_else(|| AppError::NotFound(format!("unknown group: {slug}")))?;
                post_repo::posts_by_group(&self.store, slug)
            }
            FeedScope::Author(username) => {
                let author = user_repo::find_user_by_username(&self.store, username)
                    .ok_or_else(|| AppError::NotFound(format!("unknown user: {username}")))?;
                post_repo::posts_by_author(&self.store, author.id)
            }
            FeedScope::Following => {
                let viewer = viewer.ok_or_else(|| AppError::unauthenticated("/follow/"))?;
                let followed = follow_repo::following_set(&self.store, viewer);
                // Two-step query: resolve the followed set from the index,
                // then filter posts by author-in-set.
                post_repo::posts_by_authors(&self.store, &followed)
            }
        };

        // Reverse-chronological, ties broken by descending id so the
        // newest-created post wins deterministically.
        posts.sort_unstable_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let page = page.max(1) as usize;
        let total_count = posts.len();
        let items: Vec<FeedItem> = posts
            .into_iter()
            .skip((page - 1).saturating_mul(self.page_size))
            .take(self.page_size)
            .map(|post| self.item_for(post, viewer))
            .collect();
        let has_next = page.saturating_mul(self.page_size) < total_count;

        Ok(FeedPage {
            items,
            page,
            total_count,
            has_next,
        })
    }

    fn item_for(&self, post: Post, viewer: Option<Uuid>) -> FeedItem {
        let author = user_repo::find_user(&self.store, post.author_id)
            .map(|u| u.username)
            .unwrap_or_default();
        let imposter = access::is_imposter(&post, viewer);
        FeedItem {
            id: post.id,
            author,
            text: post.text,
            image_url: post.image_url,
            group: post.group_slug,
            created_at: post.created_at,
            imposter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store;

    fn service(store: &Arc<ContentStore>) -> FeedService {
        FeedService::new(store.clone(), 10)
    }

    fn seed_user(store: &ContentStore, name: &str) -> Uuid {
        store::user_repo::get_or_create_user(store, name).id
    }

    #[test]
    fn global_feed_paginates_eleven_posts() {
        let store = Arc::new(ContentStore::new());
        let author = seed_user(&store, "alice");
        for i in 0..11 {
            store::post_repo::create_post(&store, author, &format!("post {i}"), None, None);
        }
        let feed = service(&store);

        let page1 = feed.get_feed(&FeedScope::Global, None, 1).unwrap();
        assert_eq!(page1.items.len(), 10);
        assert_eq!(page1.total_count, 11);
        assert!(page1.has_next);

        let page2 = feed.get_feed(&FeedScope::Global, None, 2).unwrap();
        assert_eq!(page2.items.len(), 1);
        assert!(!page2.has_next);

        let page3 = feed.get_feed(&FeedScope::Global, None, 3).unwrap();
        assert!(page3.items.is_empty());
        assert_eq!(page3.total_count, 11);
    }

    #[test]
    fn page_zero_and_negative_mean_page_one() {
        let store = Arc::new(ContentStore::new());
        let author = seed_user(&store, "alice");
        store::post_repo::create_post(&store, author, "only", None, None);
        let feed = service(&store);

        let zero = feed.get_feed(&FeedScope::Global, None, 0).unwrap();
        let negative = feed.get_feed(&FeedScope::Global, None, -3).unwrap();
        assert_eq!(zero.page, 1);
        assert_eq!(negative.page, 1);
        assert_eq!(zero.items.len(), 1);
        assert_eq!(negative.items.len(), 1);
    }

    #[test]
    fn ordering_is_newest_first_with_id_tiebreak() {
        let store = Arc::new(ContentStore::new());
        let author = seed_user(&store, "alice");
        // Created back to back; equal timestamps fall back to descending id.
        for i in 0..5 {
            store::post_repo::create_post(&store, author, &format!("post {i}"), None, None);
        }
        let feed = service(&store);

        let page = feed.get_feed(&FeedScope::Global, None, 1).unwrap();
        let ids: Vec<u64> = page.items.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn unknown_group_and_author_are_not_found() {
        let store = Arc::new(ContentStore::new());
        let feed = service(&store);

        assert!(matches!(
            feed.get_feed(&FeedScope::Group("nope".into()), None, 1),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            feed.get_feed(&FeedScope::Author("nobody".into()), None, 1),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn group_feed_only_contains_that_group() {
        let store = Arc::new(ContentStore::new());
        let author = seed_user(&store, "alice");
        store::group_repo::create_group(&store, "Rust", "rust", "");
        store::post_repo::create_post(&store, author, "in group", None, Some("rust"));
        store::post_repo::create_post(&store, author, "unfiled", None, None);
        let feed = service(&store);

        let page = feed
            .get_feed(&FeedScope::Group("rust".into()), None, 1)
            .unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.items[0].text, "in group");
        assert_eq!(page.items[0].group.as_deref(), Some("rust"));
    }

    #[test]
    fn following_feed_requires_authentication() {
        let store = Arc::new(ContentStore::new());
        let feed = service(&store);

        assert!(matches!(
            feed.get_feed(&FeedScope::Following, None, 1),
            Err(AppError::Unauthenticated { .. })
        ));
    }

    #[test]
    fn following_feed_tracks_the_follow_graph() {
        let store = Arc::new(ContentStore::new());
        let a = seed_user(&store, "a");
        let b = seed_user(&store, "b");
        let c = seed_user(&store, "c");
        let feed = service(&store);

        // A follows nobody: empty, not an error.
        let empty = feed.get_feed(&FeedScope::Following, Some(a), 1).unwrap();
        assert_eq!(empty.total_count, 0);

        store::follow_repo::create_follow(&store, a, b);
        store::post_repo::create_post(&store, b, "from b", None, None);

        let after = feed.get_feed(&FeedScope::Following, Some(a), 1).unwrap();
        assert_eq!(after.total_count, 1);
        assert_eq!(after.items[0].author, "b");

        // C does not follow B and sees nothing.
        let unrelated = feed.get_feed(&FeedScope::Following, Some(c), 1).unwrap();
        assert_eq!(unrelated.total_count, 0);
    }

    #[test]
    fn imposter_flag_is_viewer_relative() {
        let store = Arc::new(ContentStore::new());
        let alice = seed_user(&store, "alice");
        let bob = seed_user(&store, "bob");
        store::post_repo::create_post(&store, alice, "mine", None, None);
        let feed = service(&store);

        let as_alice = feed.get_feed(&FeedScope::Global, Some(alice), 1).unwrap();
        assert!(!as_alice.items[0].imposter);

        let as_bob = feed.get_feed(&FeedScope::Global, Some(bob), 1).unwrap();
        assert!(as_bob.items[0].imposter);

        let anonymous = feed.get_feed(&FeedScope::Global, None, 1).unwrap();
        assert!(anonymous.items[0].imposter);
    }
}
