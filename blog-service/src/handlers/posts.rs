//! Post endpoints: detail view, creation, and ownership-gated editing.
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::Serialize;
use validator::{Validate, ValidationError, ValidationErrors};

use super::redirect;
use crate::error::Result;
use crate::middleware::{CurrentUser, RequireUser};
use crate::models::{CommentForm, PostForm};
use crate::services::{access, PostService};
use crate::store::{group_repo, user_repo, ContentStore};
use crate::AppState;

#[derive(Debug, Serialize)]
struct PostBody {
    id: u64,
    author: String,
    text: String,
    image_url: Option<String>,
    group: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct CommentView {
    id: u64,
    author: String,
    text: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct PostDetailResponse {
    post: PostBody,
    short_title: String,
    /// True when the viewer is not the author; drives edit affordances.
    imposter: bool,
    comments: Vec<CommentView>,
    /// Blank submission form for the comment box.
    comment_form: CommentForm,
    author_posts_count: usize,
}

/// Single post detail with its comment thread and a comment form slot.
pub async fn post_detail(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<u64>,
) -> Result<HttpResponse> {
    let detail = PostService::new(state.store.clone()).detail(path.into_inner())?;
    let imposter = access::is_imposter(&detail.post, user.id());

    let comments = detail
        .comments
        .into_iter()
        .map(|comment| CommentView {
            id: comment.id,
            author: user_repo::find_user(&state.store, comment.author_id)
                .map(|u| u.username)
                .unwrap_or_default(),
            text: comment.text,
            created_at: comment.created_at,
        })
        .collect();

    Ok(HttpResponse::Ok().json(PostDetailResponse {
        post: PostBody {
            id: detail.post.id,
            author: detail.author.username,
            text: detail.post.text,
            image_url: detail.post.image_url,
            group: detail.post.group_slug,
            created_at: detail.post.created_at,
        },
        short_title: detail.short_title,
        imposter,
        comments,
        comment_form: CommentForm {
            text: String::new(),
        },
        author_posts_count: detail.author_posts_count,
    }))
}

/// Blank creation form.
pub async fn create_form(_user: RequireUser) -> Result<HttpResponse> {
    let form = PostForm {
        text: String::new(),
        image_url: None,
        group: None,
    };
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "form": form,
        "is_edit": false,
    })))
}

/// Create a post and redirect to the author's profile.
pub async fn create_post(
    state: web::Data<AppState>,
    user: RequireUser,
    form: web::Json<PostForm>,
) -> Result<HttpResponse> {
    let form = form.into_inner();
    if let Err(errors) = validate_post_form(&state.store, &form) {
        return Ok(form_rerender(&form, &errors, false));
    }

    PostService::new(state.store.clone()).create_post(user.0.id, &form);
    Ok(redirect(&format!("/profile/{}/", user.0.username)))
}

/// Edit form prefilled with the current post. Non-authors are routed to the
/// read-only detail view instead.
pub async fn edit_form(
    state: web::Data<AppState>,
    user: RequireUser,
    path: web::Path<u64>,
) -> Result<HttpResponse> {
    let post = PostService::new(state.store.clone()).find_post(path.into_inner())?;
    if !access::can_edit(&post, Some(user.0.id)) {
        return Ok(redirect(&format!("/posts/{}/", post.id)));
    }

    let form = PostForm {
        text: post.text,
        image_url: post.image_url,
        group: post.group_slug,
    };
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "form": form,
        "is_edit": true,
    })))
}

/// Apply an edit and redirect to the detail view. Non-authors are routed
/// there without a write; validation failures re-render the form.
pub async fn edit_post(
    state: web::Data<AppState>,
    user: RequireUser,
    path: web::Path<u64>,
    form: web::Json<PostForm>,
) -> Result<HttpResponse> {
    let post_id = path.into_inner();
    let service = PostService::new(state.store.clone());

    // Ownership is checked before validation so a non-author never sees the
    // edit form, valid submission or not.
    let post = service.find_post(post_id)?;
    if !access::can_edit(&post, Some(user.0.id)) {
        return Ok(redirect(&format!("/posts/{post_id}/")));
    }

    let form = form.into_inner();
    if let Err(errors) = validate_post_form(&state.store, &form) {
        return Ok(form_rerender(&form, &errors, true));
    }

    service.edit_post(post_id, user.0.id, &form)?;
    Ok(redirect(&format!("/posts/{post_id}/")))
}

/// Form validation plus referential checks the derive cannot express: the
/// group slug, when present, must name an existing group.
fn validate_post_form(store: &ContentStore, form: &PostForm) -> std::result::Result<(), ValidationErrors> {
    let mut errors = match form.validate() {
        Ok(()) => ValidationErrors::new(),
        Err(errors) => errors,
    };

    if let Some(slug) = form.group.as_deref() {
        if group_repo::find_group_by_slug(store, slug).is_none() {
            let mut error = ValidationError::new("unknown_group");
            error.message = Some("unknown group".into());
            errors.add("group".into(), error);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Re-render the submitted form with field-level errors. Success-range
/// status: a failed validation is a fresh form, not an error response.
fn form_rerender(form: &PostForm, errors: &ValidationErrors, is_edit: bool) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "form": form,
        "errors": errors,
        "is_edit": is_edit,
    }))
}
