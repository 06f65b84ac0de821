use axum::{
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::handlers;
use crate::state::AppState;

pub mod health;

/// API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub code: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: true,
            message: "success".to_string(),
            data: Some(data),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: false,
            message: message.into(),
            data: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn success_msg(message: impl Into<String>) -> Self {
        Self {
            code: true,
            message: message.into(),
            data: None,
        }
    }
}

/// Create the main router
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Derived charts
        .route("/chart/teams", get(handlers::chart::get_team_chart))
        .route("/chart/reporting", get(handlers::chart::get_reporting_chart))
        .route("/chart/partition/teams", get(handlers::chart::get_team_partition))
        .route("/chart/partition/reporting", get(handlers::chart::get_reporting_partition))
        .route("/chart/leaders", get(handlers::chart::get_leaders))
        .route("/chart/stats", get(handlers::chart::get_stats))
        // Team routes
        .route("/team/candidates", get(handlers::team::get_candidates))
        .route("/team/lead-candidates", get(handlers::team::get_lead_candidates))
        .route("/team/add", post(handlers::team::add_team))
        .route("/team/update", post(handlers::team::update_team))
        .route("/team/reparent", post(handlers::team::reparent_team))
        .route("/team/delete", post(handlers::team::delete_team))
        .route("/team/vacancies", post(handlers::team::set_vacancies))
        .route("/team/backfills", post(handlers::team::set_backfills))
        .route("/team/lead", post(handlers::team::set_lead))
        // Employee routes
        .route("/employee/add", post(handlers::employee::add_employee))
        .route("/employee/update", post(handlers::employee::update_employee))
        .route("/employee/delete", post(handlers::employee::delete_employee))
        .route("/employee/assign", post(handlers::employee::assign_employee))
        // Data routes
        .route("/data/export", get(handlers::data::export_data))
        .route("/data/import", post(handlers::data::import_data))
        .route("/data/reload", post(handlers::data::reload_data))
        .route("/data/save", post(handlers::data::save_data))
        .fallback(fallback);

    // Static chart UI, falls back to index.html for client-side routing
    let static_dir = &state.config.static_dir;
    let serve_dir = ServeDir::new(static_dir)
        .not_found_service(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .nest("/api", api_routes)
        .fallback_service(serve_dir)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Fallback handler for 404
pub async fn fallback() -> (StatusCode, Json<ApiResponse<()>>) {
    (StatusCode::NOT_FOUND, Json(ApiResponse::error("Not Found")))
}
