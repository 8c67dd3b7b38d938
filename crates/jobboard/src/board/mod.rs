//! Job board workflow: accounts, candidate résumés, postings, and scored applications.
//!
//! [`JobBoardService`] owns every operation and talks to storage only through
//! [`BoardRepository`]. When a candidate applies, the service snapshots the profile and the
//! posting into scorer inputs and stores the resulting match score on the application.

pub mod domain;
pub mod intake;
pub mod memory;
pub mod repository;
pub mod router;
pub mod service;
pub mod views;

#[cfg(test)]
mod tests;

pub use domain::{
    Account, AccountId, AccountRole, ApplicationId, ApplicationStatus, Availability,
    CandidateProfile, ContractType, Education, EducationId, EducationStatus, Experience,
    ExperienceId, JobApplication, JobId, JobPosting, LanguageLevel, LanguageSkill,
};
pub use intake::{
    AccountDraft, EducationDraft, ExperienceDraft, JobPostingDraft, ProfileDraft, ValidationError,
};
pub use memory::InMemoryBoardRepository;
pub use repository::{BoardRepository, RepositoryError};
pub use router::{board_router, ACTOR_HEADER};
pub use service::{BoardServiceError, JobBoardService};
pub use views::{ApplicantView, ApplicationStatusView, CandidateApplicationView, CandidateOverview};
