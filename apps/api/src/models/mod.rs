pub mod application;
pub mod candidate;
pub mod de;
pub mod job;
pub mod matching;
