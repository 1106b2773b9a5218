//! Comment submission.
use actix_web::{web, HttpResponse};
use validator::Validate;

use super::redirect;
use crate::error::Result;
use crate::middleware::RequireUser;
use crate::models::CommentForm;
use crate::services::{CommentService, PostService};
use crate::AppState;

/// Attach a comment and redirect back to the detail view. An invalid
/// submission redirects without creating anything.
pub async fn add_comment(
    state: web::Data<AppState>,
    user: RequireUser,
    path: web::Path<u64>,
    form: web::Json<CommentForm>,
) -> Result<HttpResponse> {
    let post_id = path.into_inner();
    let form = form.into_inner();

    if form.validate().is_ok() {
        CommentService::new(state.store.clone()).add_comment(post_id, user.0.id, &form.text)?;
    } else {
        // Still 404 on an unknown post before bouncing back.
        PostService::new(state.store.clone()).find_post(post_id)?;
    }

    Ok(redirect(&format!("/posts/{post_id}/")))
}
