//! # Request Authentication
//!
//! Bearer-token gate for protected routers. The middleware verifies the
//! token once and stashes the caller's id in request extensions; handlers
//! pick it up through the [`AuthUser`] extractor.

use std::sync::Arc;

use axum::extract::{FromRequest, FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;

use super::state::AppState;

/// Identity of the authenticated caller
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

/// Rejects requests without a valid `Authorization: Bearer <token>` header
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match bearer_token(&request) {
        Some(token) => token,
        None => {
            return ApiError::Unauthorized("Authentication required".to_string()).into_response()
        }
    };

    match state.auth.verify(&token) {
        Ok(user_id) => {
            request.extensions_mut().insert(AuthUser(user_id));
            next.run(request).await
        }
        Err(err) => ApiError::from(err).into_response(),
    }
}

fn bearer_token(request: &Request) -> Option<String> {
    let header = request.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?;
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// JSON request body whose rejection is an envelope, not plain text
#[derive(Debug)]
pub struct JsonBody(pub Value);

#[axum::async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|e| ApiError::violation("body", e.body_text()))?;
        Ok(JsonBody(value))
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .copied()
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))
    }
}
