use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::de::{lenient_timestamp, null_as_default};
use crate::models::job::JobPosting;

/// An application to one posting. Job fields are a snapshot taken when the
/// application was submitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobApplication {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub job_title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub job_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub job_role: String,
    #[serde(deserialize_with = "null_as_default")]
    pub applicant_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub applicant_email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub applicant_phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cover_letter: String,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub applied_at: Option<DateTime<Utc>>,
}

impl JobApplication {
    pub fn new(job: &JobPosting, request: ApplicationRequest, now: DateTime<Utc>) -> Self {
        JobApplication {
            id: Uuid::new_v4().to_string(),
            job_title: job.title.clone(),
            job_url: job.url.clone(),
            job_role: job.role.clone(),
            applicant_name: request.name,
            applicant_email: request.email,
            applicant_phone: request.phone,
            cover_letter: request.cover_letter,
            applied_at: Some(now),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApplicationRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cover_letter: String,
}

impl ApplicationRequest {
    /// Trims every field; name and email are required.
    pub fn normalized(mut self) -> Result<Self, &'static str> {
        self.name = self.name.trim().to_string();
        self.email = self.email.trim().to_string();
        self.phone = self.phone.trim().to_string();
        self.cover_letter = self.cover_letter.trim().to_string();

        if self.name.is_empty() {
            return Err("name");
        }
        if self.email.is_empty() {
            return Err("email");
        }
        Ok(self)
    }
}
