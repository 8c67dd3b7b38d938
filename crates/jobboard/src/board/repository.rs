use super::domain::{
    Account, AccountId, ApplicationId, CandidateProfile, Education, EducationId, Experience,
    ExperienceId, JobApplication, JobId, JobPosting,
};

/// Storage abstraction so the service can be exercised against any backend.
///
/// Implementations enforce uniqueness: account e-mail, job code, and one application per
/// (job, candidate) pair. Violations surface as [`RepositoryError::Conflict`].
pub trait BoardRepository: Send + Sync {
    fn insert_account(&self, account: Account) -> Result<Account, RepositoryError>;
    fn fetch_account(&self, id: &AccountId) -> Result<Option<Account>, RepositoryError>;

    fn save_profile(&self, profile: CandidateProfile) -> Result<CandidateProfile, RepositoryError>;
    fn fetch_profile(&self, id: &AccountId) -> Result<Option<CandidateProfile>, RepositoryError>;

    fn insert_experience(&self, experience: Experience) -> Result<Experience, RepositoryError>;
    fn update_experience(&self, experience: Experience) -> Result<(), RepositoryError>;
    fn delete_experience(&self, id: &ExperienceId) -> Result<(), RepositoryError>;
    fn fetch_experience(&self, id: &ExperienceId) -> Result<Option<Experience>, RepositoryError>;
    fn experiences_for(&self, account: &AccountId) -> Result<Vec<Experience>, RepositoryError>;

    fn insert_education(&self, education: Education) -> Result<Education, RepositoryError>;
    fn update_education(&self, education: Education) -> Result<(), RepositoryError>;
    fn delete_education(&self, id: &EducationId) -> Result<(), RepositoryError>;
    fn fetch_education(&self, id: &EducationId) -> Result<Option<Education>, RepositoryError>;
    fn education_for(&self, account: &AccountId) -> Result<Vec<Education>, RepositoryError>;

    fn insert_job(&self, job: JobPosting) -> Result<JobPosting, RepositoryError>;
    fn update_job(&self, job: JobPosting) -> Result<(), RepositoryError>;
    fn fetch_job(&self, id: &JobId) -> Result<Option<JobPosting>, RepositoryError>;
    fn jobs(&self) -> Result<Vec<JobPosting>, RepositoryError>;

    fn insert_application(
        &self,
        application: JobApplication,
    ) -> Result<JobApplication, RepositoryError>;
    fn update_application(&self, application: JobApplication) -> Result<(), RepositoryError>;
    fn fetch_application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<JobApplication>, RepositoryError>;
    fn applications_for_job(&self, job: &JobId) -> Result<Vec<JobApplication>, RepositoryError>;
    fn applications_for_candidate(
        &self,
        candidate: &AccountId,
    ) -> Result<Vec<JobApplication>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
