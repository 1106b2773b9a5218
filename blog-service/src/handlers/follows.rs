//! Follow graph endpoints: the following feed and the follow toggle.
use actix_web::{web, HttpResponse};
use serde::Serialize;

use super::{redirect, PageQuery};
use crate::error::Result;
use crate::middleware::RequireUser;
use crate::models::FeedPage;
use crate::services::{FeedScope, FeedService, FollowService};
use crate::AppState;

#[derive(Debug, Serialize)]
struct FollowFeedResponse {
    feed: FeedPage,
    /// System-wide follow edge count, informational.
    total_follow_count: u64,
}

/// Posts by authors the requester follows.
pub async fn follow_index(
    state: web::Data<AppState>,
    user: RequireUser,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let feed = FeedService::new(state.store.clone(), state.config.feed.page_size).get_feed(
        &FeedScope::Following,
        Some(user.0.id),
        query.number(),
    )?;
    let total_follow_count = FollowService::new(state.store.clone()).follower_count_total();

    Ok(HttpResponse::Ok().json(FollowFeedResponse {
        feed,
        total_follow_count,
    }))
}

/// Follow the author and bounce back to their profile.
pub async fn profile_follow(
    state: web::Data<AppState>,
    user: RequireUser,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let username = path.into_inner();
    FollowService::new(state.store.clone()).follow(user.0.id, &username)?;
    Ok(redirect(&format!("/profile/{username}/")))
}

/// Unfollow the author and bounce back to their profile.
pub async fn profile_unfollow(
    state: web::Data<AppState>,
    user: RequireUser,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let username = path.into_inner();
    FollowService::new(state.store.clone()).unfollow(user.0.id, &username)?;
    Ok(redirect(&format!("/profile/{username}/")))
}
