use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::jobs::{filter_by_role, refresh_status, RefreshStatus};
use crate::models::job::JobPosting;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct JobsQuery {
    pub role: Option<String>,
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobsQuery>,
) -> Result<Json<Vec<JobPosting>>, AppError> {
    let jobs = state.store.load_jobs().await?;
    Ok(Json(filter_by_role(jobs, params.role.as_deref())))
}

/// GET /api/v1/jobs/:index
///
/// Postings have no stable numeric id; the dashboard links by position.
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<JobPosting>, AppError> {
    let mut jobs = state.store.load_jobs().await?;
    if index >= jobs.len() {
        return Err(AppError::NotFound(format!(
            "Job {index} not found ({} jobs loaded)",
            jobs.len()
        )));
    }
    Ok(Json(jobs.swap_remove(index)))
}

/// GET /api/v1/refresh-status
pub async fn handle_refresh_status(
    State(state): State<AppState>,
) -> Result<Json<RefreshStatus>, AppError> {
    let jobs = state.store.load_jobs().await?;
    Ok(Json(refresh_status(&jobs)))
}
