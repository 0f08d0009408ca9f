//! # Portal Routes
//!
//! Self-service profile endpoints under `/api/student`. Every route is
//! gated on a bearer token and counted against the general API limiter.
//! The picture upload accepts one multipart field named `profilePicture`;
//! the body limit sits slightly above the store's own 5 MB cap so the
//! upload check produces the domain error rather than a bare 413.

use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Serialize;

use crate::error::ApiError;
use crate::portal::User;
use crate::uploads::{PictureStore, UploadError};

use super::extract::{require_auth, AuthUser, JsonBody};
use super::limit::limit_api;
use super::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/profile", get(get_profile))
        .route("/personal", put(update_personal))
        .route("/academic", put(update_academic))
        .route(
            "/profile-picture",
            post(upload_picture).layer(DefaultBodyLimit::max(6 * 1024 * 1024)),
        )
        .route_layer(from_fn_with_state(state.clone(), limit_api))
        .route_layer(from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct ProfileResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    profile: User,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PictureResponse {
    success: bool,
    message: String,
    profile_picture: String,
}

async fn get_profile(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = state.profile.profile(user_id)?;
    Ok(Json(ProfileResponse {
        success: true,
        message: None,
        profile,
    }))
}

async fn update_personal(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    JsonBody(body): JsonBody,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = state.profile.update_personal(user_id, &body)?;
    Ok(Json(ProfileResponse {
        success: true,
        message: Some("Personal information updated successfully".to_string()),
        profile,
    }))
}

async fn update_academic(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    JsonBody(body): JsonBody,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = state.profile.update_academic(user_id, &body)?;
    Ok(Json(ProfileResponse {
        success: true,
        message: Some("Academic information updated successfully".to_string()),
        profile,
    }))
}

async fn upload_picture(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    mut multipart: Multipart,
) -> Result<Json<PictureResponse>, ApiError> {
    let mut stored: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::violation("profilePicture", e.to_string()))?
    {
        if field.name() != Some("profilePicture") {
            continue;
        }

        let original_name = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::violation("profilePicture", e.to_string()))?;

        let file_name = state.pictures.store(user_id, &original_name, &data)?;
        stored = Some(PictureStore::web_path(&file_name));
    }

    let web_path = stored.ok_or(UploadError::MissingFile)?;
    state.profile.attach_picture(user_id, &web_path)?;

    Ok(Json(PictureResponse {
        success: true,
        message: "Profile picture uploaded successfully".to_string(),
        profile_picture: web_path,
    }))
}
