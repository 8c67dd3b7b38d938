//! Job board service library: postings, candidate profiles, applications, and the
//! candidate/job match scorer used to rank applicants.

pub mod board;
pub mod config;
pub mod error;
pub mod matching;
pub mod telemetry;
