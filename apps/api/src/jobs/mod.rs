pub mod handlers;

use serde::Serialize;

use crate::models::job::JobPosting;

/// Snapshot of the job collection's freshness, as reported to the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefreshStatus {
    pub total_positions: usize,
    pub last_update: Option<String>,
    pub status: &'static str,
}

/// `last_update` is the latest non-empty `scraped_at`. Scrapers write ISO-8601,
/// so string order is time order.
pub fn refresh_status(jobs: &[JobPosting]) -> RefreshStatus {
    let last_update = jobs
        .iter()
        .map(|j| j.scraped_at.as_str())
        .filter(|s| !s.is_empty())
        .max()
        .map(str::to_string);

    RefreshStatus {
        total_positions: jobs.len(),
        last_update,
        status: "success",
    }
}

/// Case-insensitive exact role filter. `None` keeps everything.
pub fn filter_by_role(jobs: Vec<JobPosting>, role: Option<&str>) -> Vec<JobPosting> {
    match role {
        Some(role) => {
            let role = role.to_lowercase();
            jobs.into_iter()
                .filter(|j| j.role.to_lowercase() == role)
                .collect()
        }
        None => jobs,
    }
}
