use std::sync::Arc;

use crate::config::Config;
use crate::matching::scoring::MatchScorer;
use crate::store::Repository;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Jobs, candidates and matches. JSON files in production, memory in tests.
    pub store: Arc<dyn Repository>,
    /// Pluggable match scorer. Default: RuleBasedScorer.
    pub scorer: Arc<dyn MatchScorer>,
    pub config: Config,
}
