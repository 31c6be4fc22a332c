use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::de::{lenient_timestamp, lenient_u32, null_as_default, string_list};

/// Only `Active` profiles take part in matching. Missing or unrecognised
/// values read as `Inactive`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateStatus {
    Active,
    #[default]
    #[serde(other)]
    Inactive,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateProfile {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(deserialize_with = "lenient_u32")]
    pub years_experience: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub education_level: String,
    #[serde(deserialize_with = "string_list")]
    pub preferred_roles: Vec<String>,
    #[serde(deserialize_with = "string_list")]
    pub preferred_locations: Vec<String>,
    #[serde(deserialize_with = "string_list")]
    pub skills: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub status: CandidateStatus,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl CandidateProfile {
    pub fn is_active(&self) -> bool {
        self.status == CandidateStatus::Active
    }

    /// Builds a new active profile. `sequence` is the 1-based position the
    /// profile will take in the candidate collection.
    pub fn from_registration(reg: Registration, sequence: usize, now: DateTime<Utc>) -> Self {
        CandidateProfile {
            id: candidate_id(sequence, now),
            name: reg.name,
            email: reg.email,
            phone: reg.phone,
            years_experience: reg.years_experience,
            education_level: reg.education_level,
            preferred_roles: reg.preferred_roles,
            preferred_locations: reg.preferred_locations,
            skills: reg.skills,
            status: CandidateStatus::Active,
            created_at: Some(now),
        }
    }
}

/// `candidate_<sequence>_<YYYYMMDD_HHMMSS>`
pub fn candidate_id(sequence: usize, now: DateTime<Utc>) -> String {
    format!("candidate_{sequence}_{}", now.format("%Y%m%d_%H%M%S"))
}

/// Validated registration input, ready to become a [`CandidateProfile`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Registration {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(deserialize_with = "lenient_u32")]
    pub years_experience: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub education_level: String,
    #[serde(deserialize_with = "string_list")]
    pub preferred_roles: Vec<String>,
    #[serde(deserialize_with = "string_list")]
    pub preferred_locations: Vec<String>,
    #[serde(deserialize_with = "string_list")]
    pub skills: Vec<String>,
}

impl Registration {
    /// Trims free-text fields and checks the required ones.
    /// Returns the name of the first missing field on failure.
    pub fn normalized(mut self) -> Result<Self, &'static str> {
        self.name = self.name.trim().to_string();
        self.email = self.email.trim().to_string();
        self.phone = self.phone.trim().to_string();
        self.education_level = self.education_level.trim().to_string();

        if self.name.is_empty() {
            return Err("name");
        }
        if self.email.is_empty() {
            return Err("email");
        }
        Ok(self)
    }
}
