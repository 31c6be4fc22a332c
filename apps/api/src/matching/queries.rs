//! Read-side helpers over the persisted match collection. Nothing here rescores.

use crate::models::matching::MatchRecord;

pub const DEFAULT_TOP_CANDIDATES: usize = 5;

/// Stored matches for one candidate, in stored order.
pub fn matches_for_candidate(matches: Vec<MatchRecord>, candidate_id: &str) -> Vec<MatchRecord> {
    matches
        .into_iter()
        .filter(|m| m.candidate_id == candidate_id)
        .collect()
}

/// Best-scoring stored matches for a posting, keyed by its URL.
pub fn top_candidates_for_job(
    matches: Vec<MatchRecord>,
    job_url: &str,
    limit: usize,
) -> Vec<MatchRecord> {
    let mut job_matches: Vec<MatchRecord> = matches
        .into_iter()
        .filter(|m| m.job_url == job_url)
        .collect();
    job_matches.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
    job_matches.truncate(limit);
    job_matches
}
