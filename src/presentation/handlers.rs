// HTTP request handlers
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub slug: String,
    pub title: String,
    pub panels: usize,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List rendered dashboards
pub async fn list_dashboards(State(state): State<Arc<AppState>>) -> Json<Vec<DashboardSummary>> {
    let summaries = state
        .catalog
        .iter()
        .map(|d| DashboardSummary {
            slug: d.slug.clone(),
            title: d.title.clone(),
            panels: d.panel_count,
        })
        .collect();

    Json(summaries)
}

/// Serve one dashboard document
pub async fn get_dashboard(Path(slug): Path<String>, State(state): State<Arc<AppState>>) -> Response {
    match state.catalog.get(&slug) {
        Some(dashboard) => Json(dashboard.document.clone()).into_response(),
        None => {
            tracing::debug!("Unknown dashboard requested: {}", slug);
            StatusCode::NOT_FOUND.into_response()
        }
    }
}
