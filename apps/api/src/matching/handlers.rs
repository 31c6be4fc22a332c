//! Axum route handlers for the Matching API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::matching::discovery::{find_matches, PersistMode};
use crate::matching::queries::{top_candidates_for_job, DEFAULT_TOP_CANDIDATES};
use crate::matching::scoring::ScoreBreakdown;
use crate::models::matching::MatchRecord;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct MatchRunRequest {
    pub candidate_id: Option<String>,
    pub min_score: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct MatchRunResponse {
    pub count: usize,
    pub min_score: f64,
    pub persist_mode: PersistMode,
    pub scorer_backend: String,
    pub matches: Vec<MatchRecord>,
}

#[derive(Debug, Deserialize)]
pub struct JobCandidatesQuery {
    pub url: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct ScoreQuery {
    pub candidate_id: String,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub candidate_id: String,
    pub job_url: String,
    pub breakdown: ScoreBreakdown,
    pub scorer_backend: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/matches/run
///
/// Recomputes matches for every active candidate, or only `candidate_id`.
/// The body is optional; omitted fields fall back to configuration.
pub async fn handle_run_matches(
    State(state): State<AppState>,
    body: Option<Json<MatchRunRequest>>,
) -> Result<Json<MatchRunResponse>, AppError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let min_score = request.min_score.unwrap_or(state.config.min_match_score);

    if !(0.0..=100.0).contains(&min_score) {
        return Err(AppError::Validation(
            "min_score must be between 0 and 100".to_string(),
        ));
    }

    let mode = state.config.match_persist_mode;
    // A blank id means "everyone", same as omitting it
    let scope = request
        .candidate_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty());

    let matches = find_matches(
        state.store.as_ref(),
        state.scorer.as_ref(),
        scope,
        min_score,
        mode,
    )
    .await?;

    Ok(Json(MatchRunResponse {
        count: matches.len(),
        min_score,
        persist_mode: mode,
        scorer_backend: state.scorer.backend().to_string(),
        matches,
    }))
}

/// GET /api/v1/matches
pub async fn handle_list_matches(
    State(state): State<AppState>,
) -> Result<Json<Vec<MatchRecord>>, AppError> {
    Ok(Json(state.store.load_matches().await?))
}

/// GET /api/v1/job-candidates?url=...&limit=5
pub async fn handle_job_candidates(
    State(state): State<AppState>,
    Query(params): Query<JobCandidatesQuery>,
) -> Result<Json<Vec<MatchRecord>>, AppError> {
    let limit = params.limit.unwrap_or(DEFAULT_TOP_CANDIDATES);
    let stored = state.store.load_matches().await?;
    Ok(Json(top_candidates_for_job(stored, &params.url, limit)))
}

/// GET /api/v1/score?candidate_id=...&url=...
///
/// Per-dimension breakdown for one pair, computed live and not persisted.
pub async fn handle_score_pair(
    State(state): State<AppState>,
    Query(params): Query<ScoreQuery>,
) -> Result<Json<ScoreResponse>, AppError> {
    let candidate = state
        .store
        .load_candidates()
        .await?
        .into_iter()
        .find(|c| c.id == params.candidate_id)
        .ok_or_else(|| {
            AppError::NotFound(format!("Candidate {} not found", params.candidate_id))
        })?;

    let job = state
        .store
        .load_jobs()
        .await?
        .into_iter()
        .find(|j| j.url == params.url)
        .ok_or_else(|| AppError::NotFound(format!("Job {} not found", params.url)))?;

    Ok(Json(ScoreResponse {
        breakdown: state.scorer.breakdown(&candidate, &job),
        scorer_backend: state.scorer.backend().to_string(),
        candidate_id: params.candidate_id,
        job_url: params.url,
    }))
}
