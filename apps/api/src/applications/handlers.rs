use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::info;

use crate::errors::AppError;
use crate::models::application::{ApplicationRequest, JobApplication};
use crate::state::AppState;

/// POST /api/v1/jobs/:index/applications
///
/// The posting is addressed by position, like `GET /api/v1/jobs/:index`.
pub async fn handle_apply(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(request): Json<ApplicationRequest>,
) -> Result<(StatusCode, Json<JobApplication>), AppError> {
    let request = request
        .normalized()
        .map_err(|field| AppError::Validation(format!("{field} is required")))?;

    let jobs = state.store.load_jobs().await?;
    let job = jobs.get(index).ok_or_else(|| {
        AppError::NotFound(format!("Job {index} not found ({} jobs loaded)", jobs.len()))
    })?;

    let application = JobApplication::new(job, request, Utc::now());
    state.store.append_application(&application).await?;

    info!(
        "Application {} from {} for {}",
        application.id, application.applicant_email, application.job_url
    );

    Ok((StatusCode::CREATED, Json(application)))
}

/// GET /api/v1/applications
pub async fn handle_list_applications(
    State(state): State<AppState>,
) -> Result<Json<Vec<JobApplication>>, AppError> {
    Ok(Json(state.store.load_applications().await?))
}
