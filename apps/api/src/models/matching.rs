use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::candidate::CandidateProfile;
use crate::models::de::{lenient_timestamp, null_as_default};
use crate::models::job::JobPosting;

/// A persisted (candidate, job) pair. Candidate and job fields are a snapshot
/// taken at match time and are not refreshed when the sources change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub candidate_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub candidate_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub candidate_email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub job_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub job_title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub job_role: String,
    #[serde(deserialize_with = "null_as_default")]
    pub job_location: String,
    #[serde(deserialize_with = "null_as_default")]
    pub job_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub match_score: f64, // 0 – 100, one decimal
    #[serde(deserialize_with = "lenient_timestamp")]
    pub matched_at: Option<DateTime<Utc>>,
}

impl MatchRecord {
    pub fn snapshot(
        candidate: &CandidateProfile,
        job: &JobPosting,
        score: f64,
        matched_at: DateTime<Utc>,
    ) -> Self {
        MatchRecord {
            candidate_id: candidate.id.clone(),
            candidate_name: candidate.name.clone(),
            candidate_email: candidate.email.clone(),
            job_id: job.job_id().to_string(),
            job_title: job.title.clone(),
            job_role: job.role.clone(),
            job_location: job.location.clone(),
            job_url: job.url.clone(),
            match_score: round_to_tenth(score),
            matched_at: Some(matched_at),
        }
    }
}

pub fn round_to_tenth(score: f64) -> f64 {
    (score * 10.0).round() / 10.0
}
