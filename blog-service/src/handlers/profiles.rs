//! Author profile feed.
use actix_web::{web, HttpResponse};
use serde::Serialize;

use super::PageQuery;
use crate::error::{AppError, Result};
use crate::middleware::CurrentUser;
use crate::models::FeedPage;
use crate::services::{FeedScope, FeedService, FollowService};
use crate::store::user_repo;
use crate::AppState;

#[derive(Debug, Serialize)]
struct ProfileResponse {
    username: String,
    /// Whether the requester follows this author; false for anonymous
    /// requesters and for the author themselves.
    following: bool,
    feed: FeedPage,
}

pub async fn profile(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let username = path.into_inner();
    let feed = FeedService::new(state.store.clone(), state.config.feed.page_size).get_feed(
        &FeedScope::Author(username.clone()),
        user.id(),
        query.number(),
    )?;

    let author = user_repo::find_user_by_username(&state.store, &username)
        .ok_or_else(|| AppError::NotFound(format!("unknown user: {username}")))?;
    let following = user
        .id()
        .map(|me| FollowService::new(state.store.clone()).is_following(me, author.id))
        .unwrap_or(false);

    Ok(HttpResponse::Ok().json(ProfileResponse {
        username: author.username,
        following,
        feed,
    }))
}
