// Job applications submitted against a posting.
// Records are append-only; resume uploads are not accepted.

pub mod handlers;
