// Match engine: scoring, discovery/ranking, and read-side queries.
// Storage goes through the `store` traits only.

pub mod discovery;
pub mod handlers;
pub mod queries;
pub mod scoring;
