//! Chart handlers
//!
//! Read-only views derived from the current records. Every request rebuilds
//! the tree, so views always reflect the latest mutation.

use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};

use crate::entity::Stream;
use crate::error::{AppError, AppResult};
use crate::hierarchy::{
    Board, DisplayTree, PartitionNode, PartitionOptions, ReportingNode, TeamNode,
};
use crate::routes::ApiResponse;
use crate::state::AppState;
use crate::stats::{self, EmployeeListing, LeaderRow, StreamTotals, TeamBreakdown};

/// Query parameters for the team partition chart
#[derive(Debug, Default, Deserialize)]
pub struct PartitionQuery {
    pub members: Option<bool>,
    pub vacancies: Option<bool>,
    /// Wrap the chart in a board root: "technology" or "product"
    pub board: Option<String>,
}

impl PartitionQuery {
    fn options(&self) -> PartitionOptions {
        let defaults = PartitionOptions::default();
        PartitionOptions {
            show_members: self.members.unwrap_or(defaults.show_members),
            show_vacancies: self.vacancies.unwrap_or(defaults.show_vacancies),
        }
    }

    fn board(&self) -> AppResult<Option<Board>> {
        match self.board.as_deref() {
            None | Some("") => Ok(None),
            Some("technology") => Ok(Some(Board::Technology)),
            Some("product") => Ok(Some(Board::Product)),
            Some(other) => Err(AppError::BadRequest(format!("unknown board {}", other))),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamBreakdown {
    pub stream: Stream,
    pub teams: Vec<TeamBreakdown>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub totals: Vec<StreamTotals>,
    pub breakdown: Vec<StreamBreakdown>,
    pub new_starters: Vec<EmployeeListing>,
    pub non_employees: Vec<EmployeeListing>,
}

/// GET /api/chart/teams
pub async fn get_team_chart(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Option<TeamNode>>>> {
    let tree = state.store.read().await.team_hierarchy()?;
    Ok(Json(ApiResponse::success(tree)))
}

/// GET /api/chart/reporting
pub async fn get_reporting_chart(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ReportingNode>>> {
    let tree = state.store.read().await.reporting_hierarchy()?;
    Ok(Json(ApiResponse::success(tree)))
}

/// GET /api/chart/partition/teams
pub async fn get_team_partition(
    State(state): State<AppState>,
    Query(query): Query<PartitionQuery>,
) -> AppResult<Json<ApiResponse<Option<PartitionNode>>>> {
    let board = query.board()?;
    let tree = state.store.read().await.team_hierarchy()?;

    let chart = tree.map(|tree| {
        let chart = tree.to_partition(query.options());
        match board {
            Some(board) => PartitionNode::board(board, vec![chart]),
            None => chart,
        }
    });

    Ok(Json(ApiResponse::success(chart)))
}

/// GET /api/chart/partition/reporting
pub async fn get_reporting_partition(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<PartitionNode>>> {
    let tree = state.store.read().await.reporting_hierarchy()?;
    Ok(Json(ApiResponse::success(
        tree.to_partition(PartitionOptions::default()),
    )))
}

/// GET /api/chart/leaders
pub async fn get_leaders(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<LeaderRow>>>> {
    let tree = state.store.read().await.team_hierarchy()?;
    let rows = tree.map(|tree| stats::leaders_table(&tree)).unwrap_or_default();
    Ok(Json(ApiResponse::success(rows)))
}

/// GET /api/chart/stats
pub async fn get_stats(State(state): State<AppState>) -> AppResult<Json<ApiResponse<StatsResponse>>> {
    let store = state.store.read().await;
    let tree = store.team_hierarchy()?;

    let (totals, breakdown) = match &tree {
        Some(tree) => (
            stats::stream_totals(tree),
            Stream::ALL
                .iter()
                .map(|stream| StreamBreakdown {
                    stream: *stream,
                    teams: stats::team_breakdown(tree, &[*stream]),
                })
                .collect(),
        ),
        None => (Vec::new(), Vec::new()),
    };

    Ok(Json(ApiResponse::success(StatsResponse {
        totals,
        breakdown,
        new_starters: stats::new_starters(store.employees(), store.teams()),
        non_employees: stats::non_employees(store.employees(), store.teams()),
    })))
}
