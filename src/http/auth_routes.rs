//! # Auth Routes
//!
//! Registration, login, logout, and current-user endpoints under
//! `/api/auth`. Register and login carry their own tighter rate limiters;
//! logout and me sit behind the auth gate with the general API limiter.
//! Logout is stateless, the server only acknowledges the client discard.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use crate::error::ApiError;
use crate::portal::User;

use super::extract::{require_auth, AuthUser, JsonBody};
use super::limit::{limit_api, limit_login, limit_register};
use super::response::MessageResponse;
use super::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    let open = Router::new()
        .route(
            "/register",
            post(register).route_layer(from_fn_with_state(state.clone(), limit_register)),
        )
        .route(
            "/login",
            post(login).route_layer(from_fn_with_state(state.clone(), limit_login)),
        );

    let gated = Router::new()
        .route("/logout", post(logout))
        .route("/me", get(me))
        .route_layer(from_fn_with_state(state.clone(), limit_api))
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    open.merge(gated).with_state(state)
}

#[derive(Debug, Serialize)]
struct AuthResponse {
    success: bool,
    token: String,
    user: User,
}

#[derive(Debug, Serialize)]
struct UserResponse {
    success: bool,
    user: User,
}

async fn register(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let (user, token) = state.auth.register(&body)?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            success: true,
            token: token.token,
            user,
        }),
    ))
}

async fn login(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody,
) -> Result<Json<AuthResponse>, ApiError> {
    let (user, token) = state.auth.login(&body)?;
    Ok(Json(AuthResponse {
        success: true,
        token: token.token,
        user,
    }))
}

async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse::ok("Logged out successfully"))
}

async fn me(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.auth.current_user(user_id)?;
    Ok(Json(UserResponse {
        success: true,
        user,
    }))
}
