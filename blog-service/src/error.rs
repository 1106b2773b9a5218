/// Error types for blog-service
///
/// Errors are converted to HTTP responses for clients. Two mappings are
/// deliberately not plain error statuses: an unauthenticated request to a
/// restricted route becomes a redirect to the login challenge with the
/// original path preserved in `next`, and form-validation failures are
/// re-rendered by the handlers themselves with a success-range status.
use actix_web::{error::ResponseError, http::header, http::StatusCode, HttpResponse};
use once_cell::sync::Lazy;
use thiserror::Error;

/// Login challenge URL of the external identity provider.
static LOGIN_URL: Lazy<String> =
    Lazy::new(|| std::env::var("AUTH_LOGIN_URL").unwrap_or_else(|_| "/auth/login".to_string()));

/// Result type for blog-service operations
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    /// Unknown slug, username, or post id
    #[error("not found: {0}")]
    NotFound(String),

    /// Anonymous access to a restricted route; carries the originally
    /// requested path so the identity provider can return the user after
    /// authentication.
    #[error("authentication required")]
    Unauthenticated { next: String },

    /// Duplicate resource
    #[error("conflict: {0}")]
    Conflict(String),

    /// Internal server error
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn unauthenticated(next: impl Into<String>) -> Self {
        AppError::Unauthenticated { next: next.into() }
    }

    /// Location of the login challenge for this error's `next` path.
    pub fn login_location(next: &str) -> String {
        format!("{}?next={}", LOGIN_URL.as_str(), urlencoding::encode(next))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthenticated { .. } => StatusCode::FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthenticated { next } => HttpResponse::Found()
                .insert_header((header::LOCATION, Self::login_location(next)))
                .finish(),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(serde_json::json!({
                "error": "not_found",
                "detail": msg,
                "status": 404,
            })),
            AppError::Conflict(msg) => HttpResponse::Conflict().json(serde_json::json!({
                "error": "conflict",
                "detail": msg,
                "status": 409,
            })),
            AppError::Internal(msg) => {
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "internal",
                    "detail": msg,
                    "status": 500,
                }))
            }
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_location_encodes_next_path() {
        assert_eq!(
            AppError::login_location("/create/"),
            "/auth/login?next=%2Fcreate%2F"
        );
    }

    #[test]
    fn unauthenticated_maps_to_redirect() {
        let err = AppError::unauthenticated("/follow/");
        assert_eq!(err.status_code(), StatusCode::FOUND);
        let resp = err.error_response();
        let location = resp
            .headers()
            .get(header::LOCATION)
            .and_then(|h| h.to_str().ok())
            .unwrap()
            .to_string();
        assert_eq!(location, "/auth/login?next=%2Ffollow%2F");
    }
}
