//! Domain entities and wire payloads.
//!
//! Content entities reference users by id only; user records are owned by
//! the external identity layer and merely mirrored here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Mirrored identity-provider user.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
}

/// A topical group posts can be filed under.
#[derive(Debug, Clone, Serialize)]
pub struct Group {
    pub title: String,
    pub slug: String,
    pub description: String,
}

/// A published post. The author is fixed at creation; text, image, and group
/// are editable by the author only.
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub id: u64,
    pub author_id: Uuid,
    pub text: String,
    pub image_url: Option<String>,
    pub group_slug: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A comment on a post. Immutable once created.
#[derive(Debug, Clone, Serialize)]
pub struct Comment {
    pub id: u64,
    pub post_id: u64,
    pub author_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// One feed entry as seen by the requesting viewer.
#[derive(Debug, Clone, Serialize)]
pub struct FeedItem {
    pub id: u64,
    pub author: String,
    pub text: String,
    pub image_url: Option<String>,
    pub group: Option<String>,
    pub created_at: DateTime<Utc>,
    /// True when the post was not authored by the current viewer. Always
    /// true for anonymous viewers.
    pub imposter: bool,
}

/// A page of feed items.
#[derive(Debug, Clone, Serialize)]
pub struct FeedPage {
    pub items: Vec<FeedItem>,
    pub page: usize,
    pub total_count: usize,
    pub has_next: bool,
}

/// Post creation / edit submission.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PostForm {
    #[validate(length(min = 1, message = "text must not be empty"))]
    pub text: String,
    #[validate(url(message = "image_url must be a valid URL"))]
    #[serde(default)]
    pub image_url: Option<String>,
    /// Group slug, or none for an unfiled post.
    #[serde(default)]
    pub group: Option<String>,
}

/// Comment submission.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CommentForm {
    #[validate(length(min = 1, message = "text must not be empty"))]
    pub text: String,
}

/// Administrative group creation payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GroupForm {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[validate(
        length(min = 1, message = "slug must not be empty"),
        custom(function = validate_slug)
    )]
    pub slug: String,
    #[serde(default)]
    pub description: String,
}

/// Slugs are restricted to URL-safe characters.
fn validate_slug(slug: &str) -> std::result::Result<(), ValidationError> {
    if slug
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        Ok(())
    } else {
        let mut err = ValidationError::new("invalid_slug");
        err.message = Some("slug may only contain letters, digits, '-' and '_'".into());
        Err(err)
    }
}
