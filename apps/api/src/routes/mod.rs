pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::applications::handlers as applications;
use crate::candidates::handlers as candidates;
use crate::jobs::handlers as jobs;
use crate::matching::handlers as matching;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Jobs (read-only; written by the scraper)
        .route("/api/v1/jobs", get(jobs::handle_list_jobs))
        .route("/api/v1/jobs/:index", get(jobs::handle_get_job))
        .route("/api/v1/refresh-status", get(jobs::handle_refresh_status))
        // Applications
        .route(
            "/api/v1/jobs/:index/applications",
            post(applications::handle_apply),
        )
        .route(
            "/api/v1/applications",
            get(applications::handle_list_applications),
        )
        // Candidates
        .route(
            "/api/v1/candidates",
            get(candidates::handle_list_candidates).post(candidates::handle_register),
        )
        .route("/api/v1/candidates/:id", get(candidates::handle_get_candidate))
        .route(
            "/api/v1/candidates/:id/matches",
            get(candidates::handle_candidate_matches),
        )
        // Matching
        .route("/api/v1/matches", get(matching::handle_list_matches))
        .route("/api/v1/matches/run", post(matching::handle_run_matches))
        .route("/api/v1/job-candidates", get(matching::handle_job_candidates))
        .route("/api/v1/score", get(matching::handle_score_pair))
        .with_state(state)
}
