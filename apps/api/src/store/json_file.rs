use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::models::application::JobApplication;
use crate::models::candidate::{CandidateProfile, Registration};
use crate::models::job::JobPosting;
use crate::models::matching::MatchRecord;
use crate::store::{ApplicationStore, CandidateStore, JobStore, MatchStore, StoreError};

/// Each collection is one JSON array in its own file, rewritten whole on save.
///
/// Writes go to a sibling temp file and are renamed into place, and all
/// read-modify-write cycles in this process share one lock. Other processes
/// writing the same files still race (last writer wins).
#[derive(Debug)]
pub struct JsonFileStore {
    jobs_path: PathBuf,
    candidates_path: PathBuf,
    matches_path: PathBuf,
    applications_path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(
        jobs_path: impl Into<PathBuf>,
        candidates_path: impl Into<PathBuf>,
        matches_path: impl Into<PathBuf>,
        applications_path: impl Into<PathBuf>,
    ) -> Self {
        JsonFileStore {
            jobs_path: jobs_path.into(),
            candidates_path: candidates_path.into(),
            matches_path: matches_path.into(),
            applications_path: applications_path.into(),
            write_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl JobStore for JsonFileStore {
    /// The job file belongs to the scraper; an unreadable one means "no jobs".
    async fn load_jobs(&self) -> Result<Vec<JobPosting>, StoreError> {
        match read_collection(&self.jobs_path).await {
            Err(StoreError::Malformed { path, source }) => {
                warn!("Ignoring malformed job collection {}: {source}", path.display());
                Ok(Vec::new())
            }
            other => other,
        }
    }
}

#[async_trait]
impl CandidateStore for JsonFileStore {
    async fn load_candidates(&self) -> Result<Vec<CandidateProfile>, StoreError> {
        read_collection(&self.candidates_path).await
    }

    async fn register_candidate(
        &self,
        registration: Registration,
        now: DateTime<Utc>,
    ) -> Result<CandidateProfile, StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut candidates: Vec<CandidateProfile> = read_collection(&self.candidates_path).await?;
        let profile = CandidateProfile::from_registration(registration, candidates.len() + 1, now);
        candidates.push(profile.clone());
        write_collection(&self.candidates_path, &candidates).await?;

        info!("Registered candidate {} ({} total)", profile.id, candidates.len());
        Ok(profile)
    }
}

#[async_trait]
impl MatchStore for JsonFileStore {
    async fn load_matches(&self) -> Result<Vec<MatchRecord>, StoreError> {
        read_collection(&self.matches_path).await
    }

    async fn replace_matches(&self, matches: &[MatchRecord]) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        write_collection(&self.matches_path, matches).await
    }
}

#[async_trait]
impl ApplicationStore for JsonFileStore {
    async fn load_applications(&self) -> Result<Vec<JobApplication>, StoreError> {
        read_collection(&self.applications_path).await
    }

    async fn append_application(&self, application: &JobApplication) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut applications: Vec<JobApplication> =
            read_collection(&self.applications_path).await?;
        applications.push(application.clone());
        write_collection(&self.applications_path, &applications).await?;

        info!(
            "Recorded application {} for {} ({} total)",
            application.id,
            application.job_url,
            applications.len()
        );
        Ok(())
    }
}

/// A missing or blank file reads as an empty collection.
async fn read_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("{} not found, treating as empty", path.display());
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    serde_json::from_slice(&bytes).map_err(|source| StoreError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

async fn write_collection<T: Serialize>(path: &Path, items: &[T]) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    let body = serde_json::to_vec_pretty(items).map_err(|source| StoreError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(io_err)?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, &body).await.map_err(io_err)?;
    fs::rename(&tmp, path).await.map_err(io_err)?;

    debug!("Wrote {} records to {}", items.len(), path.display());
    Ok(())
}
