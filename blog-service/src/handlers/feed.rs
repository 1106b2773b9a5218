//! Feed endpoints: the cached global feed and group feeds.
use std::time::Duration;

use actix_web::{web, HttpResponse};

use super::PageQuery;
use crate::error::{AppError, Result};
use crate::middleware::CurrentUser;
use crate::services::{FeedScope, FeedService};
use crate::AppState;

/// Global feed.
///
/// Served through the page cache: the rendered page is reused for up to the
/// configured TTL regardless of writes; only TTL expiry or an explicit flush
/// refreshes it.
pub async fn index(
    state: web::Data<AppState>,
    user: CurrentUser,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let page = query.number().max(1);
    let viewer = user.id();
    let ttl = Duration::from_secs(state.config.cache.index_ttl_secs);
    let key = format!("index:{page}");
    let feed = FeedService::new(state.store.clone(), state.config.feed.page_size);

    let bytes = state
        .cache
        .get_or_render(&key, ttl, || async move {
            let rendered = feed.get_feed(&FeedScope::Global, viewer, page)?;
            Ok::<_, AppError>(serde_json::to_vec(&rendered)?)
        })
        .await?;

    Ok(HttpResponse::Ok()
        .content_type("application/json")
        .body(bytes))
}

/// Group feed; 404 on unknown slug.
pub async fn group_posts(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let slug = path.into_inner();
    let feed = FeedService::new(state.store.clone(), state.config.feed.page_size).get_feed(
        &FeedScope::Group(slug),
        user.id(),
        query.number(),
    )?;

    Ok(HttpResponse::Ok().json(feed))
}
