//! Storage seam for the flat collections.
//!
//! Matching and the HTTP layer depend only on these traits. `JsonFileStore`
//! backs production; `MemoryStore` backs the unit and router tests.

pub mod json_file;
#[cfg(test)]
pub mod memory;

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::application::JobApplication;
use crate::models::candidate::{CandidateProfile, Registration};
use crate::models::job::JobPosting;
use crate::models::matching::MatchRecord;

pub use json_file::JsonFileStore;
#[cfg(test)]
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed collection {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read-only source of postings. Replaced wholesale by the external scraper.
#[async_trait]
pub trait JobStore: Send + Sync {
    async fn load_jobs(&self) -> Result<Vec<JobPosting>, StoreError>;
}

#[async_trait]
pub trait CandidateStore: Send + Sync {
    async fn load_candidates(&self) -> Result<Vec<CandidateProfile>, StoreError>;

    /// Appends a new active profile and returns it. The id sequence is the
    /// collection length after the append; profiles are never removed, so it
    /// only grows.
    async fn register_candidate(
        &self,
        registration: Registration,
        now: DateTime<Utc>,
    ) -> Result<CandidateProfile, StoreError>;
}

#[async_trait]
pub trait MatchStore: Send + Sync {
    async fn load_matches(&self) -> Result<Vec<MatchRecord>, StoreError>;

    /// Overwrites the whole match collection.
    async fn replace_matches(&self, matches: &[MatchRecord]) -> Result<(), StoreError>;
}

/// Append-only log of job applications.
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    async fn load_applications(&self) -> Result<Vec<JobApplication>, StoreError>;

    async fn append_application(&self, application: &JobApplication) -> Result<(), StoreError>;
}

/// Everything the application needs from storage, as one object-safe trait.
pub trait Repository: JobStore + CandidateStore + MatchStore + ApplicationStore {}

impl<T: JobStore + CandidateStore + MatchStore + ApplicationStore> Repository for T {}
