use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::models::application::JobApplication;
use crate::models::candidate::{CandidateProfile, Registration};
use crate::models::job::JobPosting;
use crate::models::matching::MatchRecord;
use crate::store::{ApplicationStore, CandidateStore, JobStore, MatchStore, StoreError};

/// In-process store for tests. Jobs and candidates are seeded up front.
#[derive(Debug, Default)]
pub struct MemoryStore {
    jobs: RwLock<Vec<JobPosting>>,
    candidates: RwLock<Vec<CandidateProfile>>,
    matches: RwLock<Vec<MatchRecord>>,
    applications: RwLock<Vec<JobApplication>>,
}

impl MemoryStore {
    pub fn new(jobs: Vec<JobPosting>, candidates: Vec<CandidateProfile>) -> Self {
        MemoryStore {
            jobs: RwLock::new(jobs),
            candidates: RwLock::new(candidates),
            matches: RwLock::new(Vec::new()),
            applications: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl JobStore for MemoryStore {
    async fn load_jobs(&self) -> Result<Vec<JobPosting>, StoreError> {
        Ok(self.jobs.read().await.clone())
    }
}

#[async_trait]
impl CandidateStore for MemoryStore {
    async fn load_candidates(&self) -> Result<Vec<CandidateProfile>, StoreError> {
        Ok(self.candidates.read().await.clone())
    }

    async fn register_candidate(
        &self,
        registration: Registration,
        now: DateTime<Utc>,
    ) -> Result<CandidateProfile, StoreError> {
        let mut candidates = self.candidates.write().await;
        let profile = CandidateProfile::from_registration(registration, candidates.len() + 1, now);
        candidates.push(profile.clone());
        Ok(profile)
    }
}

#[async_trait]
impl MatchStore for MemoryStore {
    async fn load_matches(&self) -> Result<Vec<MatchRecord>, StoreError> {
        Ok(self.matches.read().await.clone())
    }

    async fn replace_matches(&self, matches: &[MatchRecord]) -> Result<(), StoreError> {
        *self.matches.write().await = matches.to_vec();
        Ok(())
    }
}

#[async_trait]
impl ApplicationStore for MemoryStore {
    async fn load_applications(&self) -> Result<Vec<JobApplication>, StoreError> {
        Ok(self.applications.read().await.clone())
    }

    async fn append_application(&self, application: &JobApplication) -> Result<(), StoreError> {
        self.applications.write().await.push(application.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_register_appends_with_growing_sequence() {
        let store = MemoryStore::default();
        let now = Utc::now();

        let first = store
            .register_candidate(
                Registration {
                    name: "A".to_string(),
                    email: "a@x.org".to_string(),
                    ..Default::default()
                },
                now,
            )
            .await
            .unwrap();
        let second = store
            .register_candidate(
                Registration {
                    name: "B".to_string(),
                    email: "b@x.org".to_string(),
                    ..Default::default()
                },
                now,
            )
            .await
            .unwrap();

        assert!(first.id.starts_with("candidate_1_"));
        assert!(second.id.starts_with("candidate_2_"));
        assert_eq!(store.load_candidates().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_applications_append_in_order() {
        let store = MemoryStore::default();
        for id in ["a1", "a2"] {
            let application = JobApplication {
                id: id.to_string(),
                ..Default::default()
            };
            store.append_application(&application).await.unwrap();
        }
        let ids: Vec<String> = store
            .load_applications()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec!["a1", "a2"]);
    }

    #[tokio::test]
    async fn test_replace_matches_overwrites() {
        let store = MemoryStore::default();
        let a = MatchRecord {
            candidate_id: "a".to_string(),
            ..Default::default()
        };
        let b = MatchRecord {
            candidate_id: "b".to_string(),
            ..Default::default()
        };
        store.replace_matches(&[a]).await.unwrap();
        store.replace_matches(&[b.clone()]).await.unwrap();
        assert_eq!(store.load_matches().await.unwrap(), vec![b]);
    }
}
