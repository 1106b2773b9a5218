//! Request identity extraction.
//!
//! Authentication happens upstream: the identity layer at the edge verifies
//! credentials and injects the authenticated username into the
//! `X-Auth-User` header. The extractors here resolve that header against the
//! mirrored user registry; they never see credentials. A missing or empty
//! header means the request is anonymous.
use std::future::{ready, Ready};

use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use uuid::Uuid;

use crate::error::AppError;
use crate::store::user_repo;
use crate::AppState;

/// Header carrying the authenticated username, set by the identity layer.
pub const AUTH_USER_HEADER: &str = "X-Auth-User";

/// Resolved requester identity.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: Uuid,
    pub username: String,
}

/// The requester, anonymous or identified. Extraction never fails.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<Identity>);

impl CurrentUser {
    pub fn id(&self) -> Option<Uuid> {
        self.0.as_ref().map(|identity| identity.id)
    }
}

impl FromRequest for CurrentUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(resolve(req)))
    }
}

/// Identified requester. Anonymous requests fail extraction with a redirect
/// to the login challenge carrying the originally requested path.
#[derive(Debug, Clone)]
pub struct RequireUser(pub Identity);

impl FromRequest for RequireUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(match resolve(req).0 {
            Some(identity) => Ok(RequireUser(identity)),
            None => Err(AppError::unauthenticated(req.path())),
        })
    }
}

fn resolve(req: &HttpRequest) -> CurrentUser {
    let username = req
        .headers()
        .get(AUTH_USER_HEADER)
        .and_then(|header| header.to_str().ok())
        .map(str::trim)
        .filter(|name| !name.is_empty());

    let identity = username.and_then(|name| {
        let state = req.app_data::<web::Data<AppState>>()?;
        let user = user_repo::get_or_create_user(&state.store, name);
        Some(Identity {
            id: user.id,
            username: user.username,
        })
    });

    CurrentUser(identity)
}
