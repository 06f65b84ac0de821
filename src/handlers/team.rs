//! Team handlers
//!
//! Implements team CRUD, parent selection and headcount operations

use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};

use super::IdQuery;
use crate::entity::{Employee, Stream, Team, TeamKind};
use crate::error::{AppError, AppResult};
use crate::hierarchy::{flatten_with_depth, LeadRole};
use crate::routes::ApiResponse;
use crate::state::AppState;

/// Query parameters for parent candidates
#[derive(Debug, Deserialize)]
pub struct CandidatesQuery {
    /// Team being moved; it and its subtree are not offered
    pub exclude: Option<String>,
}

/// Parent candidate, indented by depth in the picker
#[derive(Debug, Serialize)]
pub struct TeamOption {
    pub id: String,
    pub name: String,
    pub depth: usize,
}

/// People and streams offered when choosing a team's leads
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadCandidates {
    /// Members of the team and of every team above it
    pub employees: Vec<Employee>,
    pub headcount_streams: Vec<Stream>,
}

/// Add team request
#[derive(Debug, Deserialize)]
pub struct AddTeamRequest {
    pub name: String,
    pub kind: TeamKind,
    pub parent: Option<String>,
    #[serde(default)]
    pub description: String,
}

/// Update team request
#[derive(Debug, Deserialize)]
pub struct UpdateTeamRequest {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReparentRequest {
    pub id: String,
    pub parent: Option<String>,
}

/// Vacancy or backfill change for one stream
#[derive(Debug, Deserialize)]
pub struct HeadcountRequest {
    pub id: String,
    pub stream: Stream,
    pub count: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct LeadRequest {
    pub id: String,
    pub role: LeadRole,
    pub employee: Option<String>,
}

/// GET /api/team/candidates
pub async fn get_candidates(
    State(state): State<AppState>,
    Query(query): Query<CandidatesQuery>,
) -> AppResult<Json<ApiResponse<Vec<TeamOption>>>> {
    let tree = state.store.read().await.team_hierarchy()?;

    let options = match &tree {
        Some(tree) => flatten_with_depth(tree, query.exclude.as_deref())
            .map(|(depth, team)| TeamOption {
                id: team.id.clone(),
                name: team.name.clone(),
                depth,
            })
            .collect(),
        None => Vec::new(),
    };

    Ok(Json(ApiResponse::success(options)))
}

/// GET /api/team/lead-candidates
pub async fn get_lead_candidates(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<ApiResponse<LeadCandidates>>> {
    let store = state.store.read().await;
    let employees = store
        .upstream_members(&query.id)?
        .into_iter()
        .cloned()
        .collect();
    let headcount_streams = store.headcount_streams(&query.id)?;

    Ok(Json(ApiResponse::success(LeadCandidates {
        employees,
        headcount_streams,
    })))
}

/// POST /api/team/add
pub async fn add_team(
    State(state): State<AppState>,
    Json(req): Json<AddTeamRequest>,
) -> AppResult<Json<ApiResponse<Team>>> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("team name must not be empty".to_string()));
    }

    let mut store = state.store.write().await;
    let team = store
        .add_team(req.name.trim(), req.kind, req.parent.as_deref(), &req.description)?
        .clone();

    Ok(Json(ApiResponse::success(team)))
}

/// POST /api/team/update
pub async fn update_team(
    State(state): State<AppState>,
    Json(req): Json<UpdateTeamRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let mut store = state.store.write().await;

    if let Some(name) = req.name.as_deref() {
        if name.trim().is_empty() {
            return Err(AppError::Validation("team name must not be empty".to_string()));
        }
        store.rename_team(&req.id, name.trim())?;
    }
    if let Some(description) = req.description.as_deref() {
        store.describe_team(&req.id, description)?;
    }

    Ok(Json(ApiResponse::success_msg("success")))
}

/// POST /api/team/reparent
pub async fn reparent_team(
    State(state): State<AppState>,
    Json(req): Json<ReparentRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .store
        .write()
        .await
        .reparent_team(&req.id, req.parent.as_deref())?;
    Ok(Json(ApiResponse::success_msg("success")))
}

/// POST /api/team/delete
pub async fn delete_team(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> AppResult<Json<ApiResponse<Team>>> {
    let removed = state.store.write().await.remove_team(&query.id)?;
    Ok(Json(ApiResponse::success(removed)))
}

/// POST /api/team/vacancies
pub async fn set_vacancies(
    State(state): State<AppState>,
    Json(req): Json<HeadcountRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .store
        .write()
        .await
        .set_vacancies(&req.id, req.stream, req.count)?;
    Ok(Json(ApiResponse::success_msg("success")))
}

/// POST /api/team/backfills
pub async fn set_backfills(
    State(state): State<AppState>,
    Json(req): Json<HeadcountRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    state
        .store
        .write()
        .await
        .set_backfills(&req.id, req.stream, req.count)?;
    Ok(Json(ApiResponse::success_msg("success")))
}

/// POST /api/team/lead
pub async fn set_lead(
    State(state): State<AppState>,
    Json(req): Json<LeadRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let mut store = state.store.write().await;
    let employee = req.employee.as_deref().filter(|id| !id.is_empty());

    match req.role {
        LeadRole::TechLead => store.set_tech_lead(&req.id, employee)?,
        LeadRole::ProductLead => store.set_product_lead(&req.id, employee)?,
    }

    Ok(Json(ApiResponse::success_msg("success")))
}
