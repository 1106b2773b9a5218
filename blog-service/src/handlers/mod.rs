//! HTTP handlers and route wiring.
//!
//! Handlers translate requests into service calls and service results into
//! JSON responses or redirects. Route wiring lives here so the binary and
//! the test harness assemble the exact same application.
pub mod admin;
pub mod comments;
pub mod feed;
pub mod follows;
pub mod posts;
pub mod profiles;

use actix_web::{http::header, web, HttpResponse};
use serde::Deserialize;

/// Feed page selector. Anything unparseable means the first page.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    pub fn number(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|page| page.parse().ok())
            .unwrap_or(1)
    }
}

/// 302 to `location`.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location.to_owned()))
        .finish()
}

/// Custom not-found page for unknown routes.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "detail": "page not found",
        "status": 404,
    }))
}

/// Service health summary.
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "service": "blog-service",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Wire every route.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(feed::index))
        .route("/group/{slug}/", web::get().to(feed::group_posts))
        .route("/profile/{username}/", web::get().to(profiles::profile))
        .route(
            "/profile/{username}/follow/",
            web::get().to(follows::profile_follow),
        )
        .route(
            "/profile/{username}/unfollow/",
            web::get().to(follows::profile_unfollow),
        )
        .route("/posts/{id}/", web::get().to(posts::post_detail))
        .service(
            web::resource("/posts/{id}/edit/")
                .route(web::get().to(posts::edit_form))
                .route(web::post().to(posts::edit_post)),
        )
        .route("/posts/{id}/comment/", web::post().to(comments::add_comment))
        .service(
            web::resource("/create/")
                .route(web::get().to(posts::create_form))
                .route(web::post().to(posts::create_post)),
        )
        .route("/follow/", web::get().to(follows::follow_index))
        .route("/healthz", web::get().to(health))
        .route("/metrics", web::get().to(crate::metrics::serve_metrics))
        .route("/internal/cache/flush", web::post().to(admin::flush_cache))
        .route("/internal/groups/", web::post().to(admin::create_group))
        .default_service(web::route().to(not_found));
}
