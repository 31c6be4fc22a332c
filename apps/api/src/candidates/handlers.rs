use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::matching::discovery::find_matches;
use crate::matching::queries::matches_for_candidate;
use crate::models::candidate::{CandidateProfile, Registration};
use crate::models::matching::MatchRecord;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CandidateWithMatches {
    pub candidate: CandidateProfile,
    pub matches: Vec<MatchRecord>,
}

/// POST /api/v1/candidates
///
/// Registers a profile, then runs matching scoped to it so the response
/// already carries the candidate's matches.
pub async fn handle_register(
    State(state): State<AppState>,
    Json(request): Json<Registration>,
) -> Result<(StatusCode, Json<CandidateWithMatches>), AppError> {
    let registration = request
        .normalized()
        .map_err(|field| AppError::Validation(format!("{field} is required")))?;

    let candidate = state
        .store
        .register_candidate(registration, Utc::now())
        .await?;

    let matches = find_matches(
        state.store.as_ref(),
        state.scorer.as_ref(),
        Some(candidate.id.as_str()),
        state.config.min_match_score,
        state.config.match_persist_mode,
    )
    .await?;

    info!(
        "Candidate {} registered with {} matching positions",
        candidate.id,
        matches.len()
    );

    Ok((
        StatusCode::CREATED,
        Json(CandidateWithMatches { candidate, matches }),
    ))
}

/// GET /api/v1/candidates
pub async fn handle_list_candidates(
    State(state): State<AppState>,
) -> Result<Json<Vec<CandidateProfile>>, AppError> {
    Ok(Json(state.store.load_candidates().await?))
}

/// GET /api/v1/candidates/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CandidateWithMatches>, AppError> {
    let candidate = state
        .store
        .load_candidates()
        .await?
        .into_iter()
        .find(|c| c.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))?;

    let matches = matches_for_candidate(state.store.load_matches().await?, &id);
    Ok(Json(CandidateWithMatches { candidate, matches }))
}

/// GET /api/v1/candidates/:id/matches
///
/// Unknown ids get an empty list, not a 404.
pub async fn handle_candidate_matches(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<MatchRecord>>, AppError> {
    let stored = state.store.load_matches().await?;
    Ok(Json(matches_for_candidate(stored, &id)))
}
