//! Data handlers
//!
//! Whole-chart import and export, and synchronisation with the data source

use axum::{extract::State, response::Json};

use crate::error::AppResult;
use crate::routes::ApiResponse;
use crate::state::AppState;
use crate::store::Snapshot;

/// GET /api/data/export
pub async fn export_data(State(state): State<AppState>) -> Json<ApiResponse<Snapshot>> {
    Json(ApiResponse::success(state.store.read().await.snapshot()))
}

/// POST /api/data/import
/// Replaces every record; nothing is written to the data source until save.
/// Snapshots with duplicate employee or team ids are refused.
pub async fn import_data(
    State(state): State<AppState>,
    Json(snapshot): Json<Snapshot>,
) -> AppResult<Json<ApiResponse<()>>> {
    tracing::info!(
        "Importing {} employees and {} teams",
        snapshot.employees.len(),
        snapshot.teams.len()
    );
    state.store.write().await.replace(snapshot)?;
    Ok(Json(ApiResponse::success_msg("success")))
}

/// POST /api/data/reload
pub async fn reload_data(State(state): State<AppState>) -> AppResult<Json<ApiResponse<()>>> {
    state.reload().await?;
    Ok(Json(ApiResponse::success_msg("success")))
}

/// POST /api/data/save
pub async fn save_data(State(state): State<AppState>) -> AppResult<Json<ApiResponse<()>>> {
    state.persist().await?;
    Ok(Json(ApiResponse::success_msg("saved")))
}
