//! Business logic layer.
pub mod access;
pub mod comments;
pub mod feed;
pub mod follow;
pub mod posts;

pub use comments::CommentService;
pub use feed::{FeedScope, FeedService};
pub use follow::FollowService;
pub use posts::PostService;
