use serde::{Deserialize, Serialize};

use crate::models::de::null_as_default;

/// A scraped job posting. Produced by the external scraper and never mutated here.
///
/// Every field is optional on read; postings from older scrapes routinely
/// omit `district` or `scraped_at`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobPosting {
    #[serde(deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub district: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date_posted: String,
    #[serde(deserialize_with = "null_as_default")]
    pub scraped_at: String,
}

impl JobPosting {
    /// Short identifier derived from the last path segment of the posting URL.
    pub fn job_id(&self) -> &str {
        self.url.rsplit('/').next().unwrap_or_default()
    }
}
