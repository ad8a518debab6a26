use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::aggregate;
use crate::aggregate::types::{JobProvider, JobQuery, NormalizedJob};

#[derive(Clone)]
pub struct AppState {
    providers: Arc<Vec<Box<dyn JobProvider>>>,
}

impl AppState {
    pub fn new(providers: Vec<Box<dyn JobProvider>>) -> Self {
        Self {
            providers: Arc::new(providers),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/jobs/external", get(external_jobs))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(serde::Deserialize)]
struct ExternalJobsParams {
    #[serde(default)]
    search: String,
    #[serde(default)]
    location: String,
    #[serde(default = "default_page")]
    page: u32,
}

fn default_page() -> u32 {
    1
}

#[derive(serde::Serialize)]
struct ExternalJobsResponse {
    count: usize,
    jobs: Vec<NormalizedJob>,
}

/// Always 200, always a list. Callers cannot distinguish "no jobs found"
/// from "every provider failed"; failures only show up in logs/metrics.
async fn external_jobs(
    State(state): State<AppState>,
    Query(params): Query<ExternalJobsParams>,
) -> Json<ExternalJobsResponse> {
    let query = JobQuery {
        search: params.search,
        location: params.location,
        page: params.page.max(1),
    };
    let jobs = aggregate::fetch_external_jobs(&state.providers, &query).await;
    Json(ExternalJobsResponse {
        count: jobs.len(),
        jobs,
    })
}
