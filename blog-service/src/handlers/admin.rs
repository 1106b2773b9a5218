//! Internal administrative surface.
use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::error::{AppError, Result};
use crate::models::GroupForm;
use crate::store::group_repo;
use crate::AppState;

/// Drop every cached page immediately. The only way, besides TTL expiry,
/// that a cached page goes away.
pub async fn flush_cache(state: web::Data<AppState>) -> Result<HttpResponse> {
    state.cache.flush();
    tracing::info!("page cache flushed by administrative request");
    Ok(HttpResponse::Ok().json(serde_json::json!({ "flushed": true })))
}

/// Create a topical group.
pub async fn create_group(
    state: web::Data<AppState>,
    form: web::Json<GroupForm>,
) -> Result<HttpResponse> {
    let form = form.into_inner();
    if let Err(errors) = form.validate() {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "error": "validation",
            "fields": errors,
        })));
    }

    let group = group_repo::create_group(&state.store, &form.title, &form.slug, &form.description)
        .ok_or_else(|| AppError::Conflict(format!("slug already taken: {}", form.slug)))?;
    tracing::info!(slug = %group.slug, "group created");

    Ok(HttpResponse::Created().json(group))
}
