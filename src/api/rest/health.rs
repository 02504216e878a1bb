use std::sync::Arc;

use axum::{extract::Extension, Json};
use serde::Serialize;

use crate::infrastructure::state::AppState;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: &'static str,
    pub dataset: &'static str,
    pub branches: usize,
    pub endpoint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Reports whether the branch dataset loaded, and why not when it is degraded.
/// The query endpoint answers the same either way.
pub async fn healthcheck(Extension(state): Extension<Arc<AppState>>) -> Json<HealthResponse> {
    let dataset = &state.dataset;
    Json(HealthResponse {
        status: "ok",
        dataset: dataset.status().as_str(),
        branches: dataset.len(),
        endpoint: state.config.graphql.endpoint.clone(),
        source: dataset.source().map(|path| path.display().to_string()),
        reason: dataset.status().reason().map(str::to_string),
    })
}
