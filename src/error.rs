use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::storage::StorageError;

/// Structural problems found while deriving a hierarchy from flat records
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HierarchyError {
    #[error("more than one root team defined [{}]", .0.join(", "))]
    MultipleRoots(Vec<String>),

    #[error("parent {parent} not found for team {team}")]
    DanglingParent { team: String, parent: String },

    #[error("team {team} not found for employee {employee}")]
    DanglingMember { employee: String, team: String },

    #[error("manager {manager} not found for employee {employee}")]
    MissingManagerNode { employee: String, manager: String },

    #[error("root employee {0} not found")]
    UnknownRootEmployee(String),

    #[error("records not reachable from the root, cycle suspected [{}]", .0.join(", "))]
    CyclicHierarchy(Vec<String>),
}

/// Rejected record store mutations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("team {0} not found")]
    UnknownTeam(String),

    #[error("employee {0} not found")]
    UnknownEmployee(String),

    #[error("team {0} already exists")]
    DuplicateTeam(String),

    #[error("employee {0} already exists")]
    DuplicateEmployee(String),

    #[error("team {team} cannot be moved under {parent}, which is itself or one of its descendants")]
    CyclicParent { team: String, parent: String },

    #[error("employee {employee} cannot report to {manager}, who already reports to them")]
    CyclicManager { employee: String, manager: String },

    #[error("cannot remove root employee {0}")]
    RootEmployee(String),

    #[error("invalid start date {0}, expected YYYY-MM-DD")]
    InvalidStartDate(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Hierarchy error: {0}")]
    Hierarchy(#[from] HierarchyError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    code: u16,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, details) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not Found", Some(msg.clone())),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Bad Request", Some(msg.clone())),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "Conflict", Some(msg.clone())),
            AppError::Hierarchy(err) => {
                tracing::warn!("Cannot render hierarchy: {}", err);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "Cannot render hierarchy",
                    Some(err.to_string()),
                )
            }
            AppError::Storage(err) => {
                tracing::error!("Storage error: {}", err);
                (StatusCode::BAD_GATEWAY, "Storage Error", Some(err.to_string()))
            }
            AppError::Json(err) => {
                (StatusCode::BAD_REQUEST, "Invalid JSON", Some(err.to_string()))
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "Validation Error", Some(msg.clone()))
            }
        };

        let body = ErrorResponse {
            code: status.as_u16(),
            message: message.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UnknownTeam(_) | StoreError::UnknownEmployee(_) => {
                AppError::NotFound(err.to_string())
            }
            StoreError::DuplicateTeam(_)
            | StoreError::DuplicateEmployee(_)
            | StoreError::RootEmployee(_) => AppError::Conflict(err.to_string()),
            StoreError::CyclicParent { .. }
            | StoreError::CyclicManager { .. }
            | StoreError::InvalidStartDate(_) => {
                AppError::Validation(err.to_string())
            }
            StoreError::Json(e) => AppError::Json(e),
        }
    }
}

/// Result type alias for application
pub type AppResult<T> = Result<T, AppError>;
