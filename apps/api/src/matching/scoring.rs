//! Match Scoring: pluggable, trait-based scorer for one candidate against one posting.
//!
//! Default: `RuleBasedScorer` (five capped dimensions, pure and deterministic).
//!
//! `AppState` holds an `Arc<dyn MatchScorer>`; discovery and handlers only see the trait.

use serde::{Deserialize, Serialize};

use crate::models::candidate::CandidateProfile;
use crate::models::job::JobPosting;

pub const ROLE_MAX: f64 = 40.0;
pub const LOCATION_MAX: f64 = 25.0;
pub const EXPERIENCE_MAX: f64 = 20.0;
pub const EDUCATION_MAX: f64 = 10.0;
pub const SKILL_MAX: f64 = 5.0;
pub const SCORE_CEILING: f64 = 100.0;

/// Title keywords that earn skill points when the candidate lists them verbatim.
pub const SKILL_KEYWORDS: [&str; 6] = [
    "curriculum",
    "student",
    "academic",
    "leadership",
    "management",
    "education",
];

// ────────────────────────────────────────────────────────────────────────────
// Output data model
// ────────────────────────────────────────────────────────────────────────────

/// Per-dimension points. `total` is the clamped sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub role: f64,       // 0 – 40
    pub location: f64,   // 0 – 25
    pub experience: f64, // 0 – 20
    pub education: f64,  // 0 – 10
    pub skills: f64,     // 0 – 5
    pub total: f64,      // 0 – 100
}

impl ScoreBreakdown {
    fn from_parts(role: f64, location: f64, experience: f64, education: f64, skills: f64) -> Self {
        let total = (role + location + experience + education + skills).clamp(0.0, SCORE_CEILING);
        ScoreBreakdown {
            role,
            location,
            experience,
            education,
            skills,
            total,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap scoring backends without touching discovery or handlers.
pub trait MatchScorer: Send + Sync {
    fn breakdown(&self, candidate: &CandidateProfile, job: &JobPosting) -> ScoreBreakdown;

    /// Composite 0 – 100 score.
    fn score(&self, candidate: &CandidateProfile, job: &JobPosting) -> f64 {
        self.breakdown(candidate, job).total
    }

    /// Label reported by the API so callers know which backend produced scores.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// RuleBasedScorer (default implementation)
// ────────────────────────────────────────────────────────────────────────────

/// Substring rules over lowercased, trimmed strings. No stemming.
///
/// | dimension  | max | source                                   |
/// |------------|-----|------------------------------------------|
/// | role       | 40  | preferred roles vs job role              |
/// | location   | 25  | preferred locations vs job location      |
/// | experience | 20  | years vs seniority keywords in job title |
/// | education  | 10  | degree keywords in education level       |
/// | skills     | 5   | fixed keywords in both title and skills  |
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedScorer;

impl MatchScorer for RuleBasedScorer {
    fn breakdown(&self, candidate: &CandidateProfile, job: &JobPosting) -> ScoreBreakdown {
        ScoreBreakdown::from_parts(
            role_points(&candidate.preferred_roles, &job.role),
            location_points(&candidate.preferred_locations, &job.location),
            experience_points(candidate.years_experience, &job.title),
            education_points(&candidate.education_level),
            skill_points(&candidate.skills, &job.title),
        )
    }

    fn backend(&self) -> &'static str {
        "rule_based"
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

fn normalize_all(values: &[String]) -> Vec<String> {
    values.iter().map(|v| normalize(v)).collect()
}

/// Exact match beats "preferred inside job role", which beats "job role inside preferred".
fn role_points(preferred_roles: &[String], job_role: &str) -> f64 {
    let preferred = normalize_all(preferred_roles);
    let job_role = normalize(job_role);

    if preferred.iter().any(|r| *r == job_role) {
        ROLE_MAX
    } else if preferred.iter().any(|r| job_role.contains(r.as_str())) {
        30.0
    } else if preferred.iter().any(|r| r.contains(job_role.as_str())) {
        25.0
    } else {
        0.0
    }
}

/// An empty preference list means "anywhere" and earns the 15-point floor.
fn location_points(preferred_locations: &[String], job_location: &str) -> f64 {
    let preferred = normalize_all(preferred_locations);
    let job_location = normalize(job_location);

    if preferred.iter().any(|l| job_location.contains(l.as_str())) {
        LOCATION_MAX
    } else if preferred.iter().any(|l| l.contains(job_location.as_str())) {
        20.0
    } else if preferred.is_empty() {
        15.0
    } else {
        0.0
    }
}

/// Each seniority keyword carries its own threshold. "assistant director" is
/// listed before "director", which it contains, with the lower threshold.
fn experience_points(years: u32, job_title: &str) -> f64 {
    let title = job_title.to_lowercase();

    let seniority_met = (title.contains("assistant director") && years >= 3)
        || (title.contains("director") && years >= 5)
        || (title.contains("dean") && years >= 7)
        || (title.contains("principal") && years >= 5);

    if seniority_met {
        EXPERIENCE_MAX
    } else if years >= 3 {
        15.0
    } else {
        0.0
    }
}

fn education_points(education_level: &str) -> f64 {
    let level = education_level.to_lowercase();

    if level.contains("phd") || level.contains("doctorate") {
        EDUCATION_MAX
    } else if level.contains("master") {
        8.0
    } else if level.contains("bachelor") {
        6.0
    } else {
        0.0
    }
}

fn skill_points(skills: &[String], job_title: &str) -> f64 {
    let skills = normalize_all(skills);
    let title = job_title.to_lowercase();

    let hits = SKILL_KEYWORDS
        .iter()
        .filter(|kw| title.contains(*kw) && skills.iter().any(|s| s == *kw))
        .count();

    (hits as f64 * 2.0).min(SKILL_MAX)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
