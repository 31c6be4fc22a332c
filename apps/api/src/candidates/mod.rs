// Candidate registration and dashboard endpoints.
// Profiles are append-only here; deactivation happens outside this service.

pub mod handlers;
