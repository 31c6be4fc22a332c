//! Match discovery: score every active (candidate × job) pair, keep the ones at
//! or above the threshold, rank them, and persist the run.
//!
//! `compute_matches` is pure. `find_matches` loads from the store, computes,
//! and persists according to the configured `PersistMode`.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::matching::scoring::MatchScorer;
use crate::models::candidate::CandidateProfile;
use crate::models::job::JobPosting;
use crate::models::matching::MatchRecord;
use crate::store::{Repository, StoreError};

pub const DEFAULT_MIN_SCORE: f64 = 60.0;

/// How a run's results are written back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersistMode {
    /// The run's list becomes the whole collection. A run scoped to one
    /// candidate drops everyone else's stored matches.
    #[default]
    Replace,
    /// Only records of candidates inside the run's scope are swapped out.
    Merge,
}

impl FromStr for PersistMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "replace" => Ok(PersistMode::Replace),
            "merge" => Ok(PersistMode::Merge),
            other => Err(format!("unknown match persist mode '{other}' (expected replace|merge)")),
        }
    }
}

impl fmt::Display for PersistMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistMode::Replace => f.write_str("replace"),
            PersistMode::Merge => f.write_str("merge"),
        }
    }
}

/// Scores all active candidates in scope against all jobs.
///
/// - `scope`: restrict to one candidate id; an unknown id yields no matches.
/// - Pairs with an (unrounded) score below `min_score` are dropped.
/// - Each candidate's list is stable-sorted by score, highest first, then the
///   lists are concatenated in candidate order.
pub fn compute_matches(
    scorer: &dyn MatchScorer,
    jobs: &[JobPosting],
    candidates: &[CandidateProfile],
    scope: Option<&str>,
    min_score: f64,
    now: DateTime<Utc>,
) -> Vec<MatchRecord> {
    let mut matches = Vec::new();

    for candidate in candidates.iter().filter(|c| in_scope(c, scope)) {
        if !candidate.is_active() {
            continue;
        }

        let mut candidate_matches: Vec<MatchRecord> = jobs
            .iter()
            .filter_map(|job| {
                let score = scorer.score(candidate, job);
                (score >= min_score).then(|| MatchRecord::snapshot(candidate, job, score, now))
            })
            .collect();

        candidate_matches.sort_by(|a, b| b.match_score.total_cmp(&a.match_score));
        matches.extend(candidate_matches);
    }

    matches
}

fn in_scope(candidate: &CandidateProfile, scope: Option<&str>) -> bool {
    scope.map_or(true, |id| candidate.id == id)
}

/// Combines the stored collection with a fresh run.
///
/// `scope_ids` are the candidates the run covered, active or not.
pub fn apply_persist_mode(
    mode: PersistMode,
    stored: Vec<MatchRecord>,
    fresh: &[MatchRecord],
    scope_ids: &HashSet<&str>,
) -> Vec<MatchRecord> {
    match mode {
        PersistMode::Replace => fresh.to_vec(),
        PersistMode::Merge => stored
            .into_iter()
            .filter(|m| !scope_ids.contains(m.candidate_id.as_str()))
            .chain(fresh.iter().cloned())
            .collect(),
    }
}

/// Loads jobs and candidates, computes matches, persists them, and returns the
/// freshly computed list (not the merged collection).
pub async fn find_matches(
    repo: &dyn Repository,
    scorer: &dyn MatchScorer,
    scope: Option<&str>,
    min_score: f64,
    mode: PersistMode,
) -> Result<Vec<MatchRecord>, StoreError> {
    let jobs = repo.load_jobs().await?;
    let candidates = repo.load_candidates().await?;

    let matches = compute_matches(scorer, &jobs, &candidates, scope, min_score, Utc::now());

    let to_store = match mode {
        PersistMode::Replace => matches.clone(),
        PersistMode::Merge => {
            let scope_ids: HashSet<&str> = candidates
                .iter()
                .filter(|c| in_scope(c, scope))
                .map(|c| c.id.as_str())
                .collect();
            apply_persist_mode(mode, repo.load_matches().await?, &matches, &scope_ids)
        }
    };
    repo.replace_matches(&to_store).await?;

    info!(
        "Match run ({}, scope: {}, min_score: {min_score}): {} matches from {} jobs, {} stored",
        scorer.backend(),
        scope.unwrap_or("all"),
        matches.len(),
        jobs.len(),
        to_store.len(),
    );

    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::scoring::RuleBasedScorer;
    use crate::models::candidate::CandidateStatus;
    use crate::store::{MatchStore, MemoryStore};

    fn make_candidate(id: &str, roles: &[&str], status: CandidateStatus) -> CandidateProfile {
        CandidateProfile {
            id: id.to_string(),
            name: format!("Name {id}"),
            email: format!("{id}@example.org"),
            years_experience: 8,
            education_level: "Master of Education".to_string(),
            preferred_roles: roles.iter().map(|r| r.to_string()).collect(),
            preferred_locations: vec!["Los Angeles".to_string()],
            skills: vec!["leadership".to_string(), "curriculum".to_string()],
            status,
            ..Default::default()
        }
    }

    fn make_job(n: u32, role: &str, title: &str, location: &str) -> JobPosting {
        JobPosting {
            role: role.to_string(),
            title: title.to_string(),
            location: location.to_string(),
            url: format!("https://jobs.example.org/posting/{n}"),
            ..Default::default()
        }
    }

    fn jobs() -> Vec<JobPosting> {
        vec![
            // director candidate: 40 + 0 + 20 + 8 + 0 = 68
            make_job(1, "Director", "Director of Facilities", "Bakersfield, CA"),
            // 40 + 25 + 20 + 8 + 4 = 97
            make_job(2, "Director", "Director of Curriculum and Leadership", "Los Angeles, CA"),
            // 0 + 25 + 20 + 8 + 0 = 53
            make_job(3, "Principal", "Principal, Lincoln Elementary", "Los Angeles, CA"),
            // 40 + 25 + 20 + 8 + 0 = 93
            make_job(4, "Director", "Director of Special Education", "Los Angeles Unified"),
        ]
    }

    #[test]
    fn test_threshold_filter_and_ranking() {
        let candidates = vec![make_candidate("c1", &["Director"], CandidateStatus::Active)];
        let matches = compute_matches(
            &RuleBasedScorer,
            &jobs(),
            &candidates,
            None,
            DEFAULT_MIN_SCORE,
            Utc::now(),
        );

        let scores: Vec<f64> = matches.iter().map(|m| m.match_score).collect();
        assert_eq!(scores, vec![97.0, 93.0, 68.0]);
        assert!(matches.iter().all(|m| m.match_score >= DEFAULT_MIN_SCORE));
        assert_eq!(matches[0].job_id, "2");
    }

    #[test]
    fn test_min_score_is_inclusive() {
        let candidates = vec![make_candidate("c1", &["Director"], CandidateStatus::Active)];
        let matches =
            compute_matches(&RuleBasedScorer, &jobs(), &candidates, None, 68.0, Utc::now());
        assert_eq!(matches.len(), 3);
        let matches =
            compute_matches(&RuleBasedScorer, &jobs(), &candidates, None, 68.1, Utc::now());
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn test_ties_keep_job_order() {
        let tied = vec![
            make_job(10, "Director", "Director of Transportation", "Los Angeles"),
            make_job(11, "Director", "Director of Nutrition", "Los Angeles"),
            make_job(12, "Director", "Director of Athletics", "Los Angeles"),
        ];
        let candidates = vec![make_candidate("c1", &["Director"], CandidateStatus::Active)];
        let matches =
            compute_matches(&RuleBasedScorer, &tied, &candidates, None, 0.0, Utc::now());
        let ids: Vec<&str> = matches.iter().map(|m| m.job_id.as_str()).collect();
        assert_eq!(ids, vec!["10", "11", "12"]);
    }

    #[test]
    fn test_inactive_candidates_never_match() {
        let candidates = vec![
            make_candidate("c1", &["Director"], CandidateStatus::Inactive),
            make_candidate("c2", &["Director"], CandidateStatus::Active),
        ];
        let matches =
            compute_matches(&RuleBasedScorer, &jobs(), &candidates, None, 0.0, Utc::now());
        assert!(!matches.is_empty());
        assert!(matches.iter().all(|m| m.candidate_id == "c2"));

        let scoped =
            compute_matches(&RuleBasedScorer, &jobs(), &candidates, Some("c1"), 0.0, Utc::now());
        assert!(scoped.is_empty());
    }

    #[test]
    fn test_unknown_scope_yields_nothing() {
        let candidates = vec![make_candidate("c1", &["Director"], CandidateStatus::Active)];
        let matches = compute_matches(
            &RuleBasedScorer,
            &jobs(),
            &candidates,
            Some("candidate_404"),
            0.0,
            Utc::now(),
        );
        assert!(matches.is_empty());
    }

    #[test]
    fn test_candidate_lists_concatenate_in_candidate_order() {
        let candidates = vec![
            make_candidate("c1", &["Principal"], CandidateStatus::Active),
            make_candidate("c2", &["Director"], CandidateStatus::Active),
        ];
        let matches =
            compute_matches(&RuleBasedScorer, &jobs(), &candidates, None, 60.0, Utc::now());
        let owners: Vec<&str> = matches.iter().map(|m| m.candidate_id.as_str()).collect();
        let first_c2 = owners.iter().position(|o| *o == "c2").unwrap();
        assert!(owners[..first_c2].iter().all(|o| *o == "c1"));
        assert!(owners[first_c2..].iter().all(|o| *o == "c2"));
    }

    #[test]
    fn test_empty_inputs_yield_no_matches() {
        let candidates = vec![make_candidate("c1", &["Director"], CandidateStatus::Active)];
        assert!(compute_matches(&RuleBasedScorer, &[], &candidates, None, 0.0, Utc::now()).is_empty());
        assert!(compute_matches(&RuleBasedScorer, &jobs(), &[], None, 0.0, Utc::now()).is_empty());
    }

    #[test]
    fn test_persist_mode_parse() {
        assert_eq!("replace".parse::<PersistMode>().unwrap(), PersistMode::Replace);
        assert_eq!(" MERGE ".parse::<PersistMode>().unwrap(), PersistMode::Merge);
        assert!("append".parse::<PersistMode>().is_err());
        assert_eq!(PersistMode::Merge.to_string(), "merge");
    }

    fn two_candidate_store() -> MemoryStore {
        MemoryStore::new(
            jobs(),
            vec![
                make_candidate("x", &["Director"], CandidateStatus::Active),
                make_candidate("y", &["Director"], CandidateStatus::Active),
            ],
        )
    }

    #[tokio::test]
    async fn test_replace_mode_scoped_runs_lose_earlier_candidates() {
        let store = two_candidate_store();

        let x = find_matches(&store, &RuleBasedScorer, Some("x"), 60.0, PersistMode::Replace)
            .await
            .unwrap();
        assert!(!x.is_empty());
        find_matches(&store, &RuleBasedScorer, Some("y"), 60.0, PersistMode::Replace)
            .await
            .unwrap();

        let stored = store.load_matches().await.unwrap();
        assert!(!stored.is_empty());
        assert!(stored.iter().all(|m| m.candidate_id == "y"));
    }

    #[tokio::test]
    async fn test_merge_mode_keeps_other_candidates() {
        let store = two_candidate_store();

        find_matches(&store, &RuleBasedScorer, Some("x"), 60.0, PersistMode::Merge)
            .await
            .unwrap();
        let y = find_matches(&store, &RuleBasedScorer, Some("y"), 60.0, PersistMode::Merge)
            .await
            .unwrap();

        let stored = store.load_matches().await.unwrap();
        let xs = stored.iter().filter(|m| m.candidate_id == "x").count();
        let ys = stored.iter().filter(|m| m.candidate_id == "y").count();
        assert_eq!(xs, 3);
        assert_eq!(ys, y.len());

        // rerunning x swaps its records without duplicating them
        find_matches(&store, &RuleBasedScorer, Some("x"), 60.0, PersistMode::Merge)
            .await
            .unwrap();
        let stored = store.load_matches().await.unwrap();
        assert_eq!(stored.len(), 6);
        assert_eq!(stored[0].candidate_id, "y");
    }

    #[tokio::test]
    async fn test_find_matches_returns_what_it_stored_in_replace_mode() {
        let store = two_candidate_store();
        let returned = find_matches(&store, &RuleBasedScorer, None, 60.0, PersistMode::Replace)
            .await
            .unwrap();
        assert_eq!(store.load_matches().await.unwrap(), returned);
        assert_eq!(returned.len(), 6);
    }
}
