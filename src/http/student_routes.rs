//! # Roster Routes
//!
//! Public CRUD endpoints for the student roster, mounted under
//! `/api/students`. List responses carry a record count alongside the
//! data; mutations echo the affected record with an acknowledgement
//! message.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;
use crate::students::{Student, StudentQuery};

use super::extract::JsonBody;
use super::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(list_students).post(create_student))
        .route(
            "/:id",
            get(get_student).put(update_student).delete(delete_student),
        )
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct StudentListResponse {
    success: bool,
    count: usize,
    data: Vec<Student>,
}

#[derive(Debug, Serialize)]
struct StudentResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    data: Student,
}

#[derive(Debug, Serialize)]
struct DeleteResponse {
    success: bool,
    message: String,
    data: Value,
}

async fn list_students(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StudentQuery>,
) -> Result<Json<StudentListResponse>, ApiError> {
    let students = state.roster.list(&query)?;
    Ok(Json(StudentListResponse {
        success: true,
        count: students.len(),
        data: students,
    }))
}

async fn get_student(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<StudentResponse>, ApiError> {
    let student = state.roster.get(parse_id(&id)?)?;
    Ok(Json(StudentResponse {
        success: true,
        message: None,
        data: student,
    }))
}

async fn create_student(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<StudentResponse>), ApiError> {
    let student = state.roster.create(&body)?;
    Ok((
        StatusCode::CREATED,
        Json(StudentResponse {
            success: true,
            message: Some("Student created successfully".to_string()),
            data: student,
        }),
    ))
}

async fn update_student(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Json<StudentResponse>, ApiError> {
    let student = state.roster.update(parse_id(&id)?, &body)?;
    Ok(Json(StudentResponse {
        success: true,
        message: Some("Student updated successfully".to_string()),
        data: student,
    }))
}

async fn delete_student(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    state.roster.delete(parse_id(&id)?)?;
    Ok(Json(DeleteResponse {
        success: true,
        message: "Student deleted successfully".to_string(),
        data: Value::Object(Default::default()),
    }))
}

// A malformed id can never name a record
fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound("Student".to_string()))
}
