//! Employee handlers

use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;

use super::IdQuery;
use crate::entity::Employee;
use crate::error::{AppError, AppResult};
use crate::routes::ApiResponse;
use crate::state::AppState;
use crate::store::EmployeeDraft;

/// Update employee request
#[derive(Debug, Deserialize)]
pub struct UpdateEmployeeRequest {
    pub id: String,
    #[serde(flatten)]
    pub draft: EmployeeDraft,
}

/// Team assignment; no team unassigns the employee
#[derive(Debug, Deserialize)]
pub struct AssignRequest {
    pub employee: String,
    pub team: Option<String>,
}

fn check_name(draft: &EmployeeDraft) -> AppResult<()> {
    if draft.name.trim().is_empty() {
        return Err(AppError::Validation("employee name must not be empty".to_string()));
    }
    Ok(())
}

/// POST /api/employee/add
pub async fn add_employee(
    State(state): State<AppState>,
    Json(draft): Json<EmployeeDraft>,
) -> AppResult<Json<ApiResponse<Employee>>> {
    check_name(&draft)?;
    let employee = state.store.write().await.add_employee(draft)?.clone();
    Ok(Json(ApiResponse::success(employee)))
}

/// POST /api/employee/update
pub async fn update_employee(
    State(state): State<AppState>,
    Json(req): Json<UpdateEmployeeRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    check_name(&req.draft)?;
    state.store.write().await.edit_employee(&req.id, req.draft)?;
    Ok(Json(ApiResponse::success_msg("success")))
}

/// POST /api/employee/delete
pub async fn delete_employee(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<ApiResponse<Employee>>> {
    let removed = state.store.write().await.remove_employee(&query.id)?;
    Ok(Json(ApiResponse::success(removed)))
}

/// POST /api/employee/assign
pub async fn assign_employee(
    State(state): State<AppState>,
    Json(req): Json<AssignRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let mut store = state.store.write().await;
    match req.team.as_deref().filter(|t| !t.is_empty()) {
        Some(team) => store.assign_to_team(&req.employee, team)?,
        None => store.remove_from_team(&req.employee)?,
    }
    Ok(Json(ApiResponse::success_msg("success")))
}
