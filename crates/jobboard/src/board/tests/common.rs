use std::sync::Arc;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::board::domain::{
    Account, AccountId, AccountRole, ApplicationId, Availability, CandidateProfile, ContractType,
    Education, EducationId, EducationStatus, Experience, ExperienceId, JobApplication, JobId,
    JobPosting,
};
use crate::board::intake::{
    AccountDraft, EducationDraft, ExperienceDraft, JobPostingDraft, ProfileDraft,
};
use crate::board::memory::InMemoryBoardRepository;
use crate::board::repository::{BoardRepository, RepositoryError};
use crate::board::service::JobBoardService;
use crate::matching::{Amount, MatchScorer, WorkModel};

pub(super) fn build_service() -> (
    JobBoardService<InMemoryBoardRepository>,
    Arc<InMemoryBoardRepository>,
) {
    let repository = Arc::new(InMemoryBoardRepository::default());
    let service = JobBoardService::new(repository.clone(), MatchScorer::default());
    (service, repository)
}

pub(super) fn amount(units: u64) -> Amount {
    Amount::from_units(units).expect("valid amount")
}

pub(super) fn account_draft(email: &str, role: AccountRole) -> AccountDraft {
    AccountDraft {
        email: email.to_string(),
        display_name: email.split('@').next().unwrap_or(email).to_string(),
        role,
    }
}

pub(super) fn register_company<R: BoardRepository + 'static>(
    service: &JobBoardService<R>,
    email: &str,
) -> Account {
    service
        .register(account_draft(email, AccountRole::Company))
        .expect("company registers")
}

pub(super) fn register_candidate<R: BoardRepository + 'static>(
    service: &JobBoardService<R>,
    email: &str,
) -> Account {
    service
        .register(account_draft(email, AccountRole::Candidate))
        .expect("candidate registers")
}

pub(super) fn job_draft(code: &str) -> JobPostingDraft {
    JobPostingDraft {
        title: "Backend Engineer".to_string(),
        department: "Platform".to_string(),
        code: code.to_string(),
        work_model: WorkModel::Remote,
        location: "São Paulo".to_string(),
        contract_type: ContractType::Clt,
        weekly_hours: "40h".to_string(),
        summary: "Own the payments API".to_string(),
        responsibilities: "Design and run services".to_string(),
        required_qualifications: "Rust, SQL".to_string(),
        preferred_qualifications: String::new(),
        soft_skills: "Clear written communication".to_string(),
        benefits: "Health plan".to_string(),
        salary_min: Some(amount(6000)),
        salary_max: Some(amount(8000)),
        hiring_stages: "Screening, technical interview".to_string(),
        culture_url: Some("https://example.com/culture".to_string()),
    }
}

pub(super) fn profile_draft(work_model: WorkModel, salary: Option<u64>) -> ProfileDraft {
    ProfileDraft {
        headline: "Ana Souza | Backend Developer".to_string(),
        city: "Campinas".to_string(),
        state: "SP".to_string(),
        whatsapp: "+55 19 98888-0000".to_string(),
        linkedin: Some("https://linkedin.com/in/ana".to_string()),
        github: None,
        portfolio: Some(String::new()),
        summary: "Seven years building APIs".to_string(),
        salary_expectation: salary.map(amount),
        availability: Availability::FifteenDays,
        work_model,
        skills: vec!["Rust".to_string(), "PostgreSQL".to_string()],
        languages: Vec::new(),
    }
}

pub(super) fn experience_draft(company: &str) -> ExperienceDraft {
    ExperienceDraft {
        role_title: "Software Engineer".to_string(),
        company: company.to_string(),
        started_on: NaiveDate::from_ymd_opt(2019, 3, 1).expect("valid date"),
        ended_on: Some(NaiveDate::from_ymd_opt(2021, 6, 30).expect("valid date")),
        current: false,
        description: "Built billing services".to_string(),
    }
}

pub(super) fn education_draft(status: EducationStatus) -> EducationDraft {
    EducationDraft {
        degree: "Bachelor".to_string(),
        course: "Computer Science".to_string(),
        institution: "Unicamp".to_string(),
        status,
    }
}

/// Candidate with a remote profile asking 7000, `experiences` jobs, and one completed degree.
pub(super) fn seasoned_candidate<R: BoardRepository + 'static>(
    service: &JobBoardService<R>,
    email: &str,
    experiences: usize,
) -> Account {
    let candidate = register_candidate(service, email);
    service
        .save_profile(&candidate.id, profile_draft(WorkModel::Remote, Some(7000)))
        .expect("profile saves");
    for index in 0..experiences {
        service
            .add_experience(&candidate.id, experience_draft(&format!("Company {index}")))
            .expect("experience saves");
    }
    service
        .add_education(&candidate.id, education_draft(EducationStatus::Completed))
        .expect("education saves");
    candidate
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) struct UnavailableRepository;

fn offline<T>() -> Result<T, RepositoryError> {
    Err(RepositoryError::Unavailable("database offline".to_string()))
}

impl BoardRepository for UnavailableRepository {
    fn insert_account(&self, _account: Account) -> Result<Account, RepositoryError> {
        offline()
    }
    fn fetch_account(&self, _id: &AccountId) -> Result<Option<Account>, RepositoryError> {
        offline()
    }
    fn save_profile(&self, _profile: CandidateProfile) -> Result<CandidateProfile, RepositoryError> {
        offline()
    }
    fn fetch_profile(&self, _id: &AccountId) -> Result<Option<CandidateProfile>, RepositoryError> {
        offline()
    }
    fn insert_experience(&self, _experience: Experience) -> Result<Experience, RepositoryError> {
        offline()
    }
    fn update_experience(&self, _experience: Experience) -> Result<(), RepositoryError> {
        offline()
    }
    fn delete_experience(&self, _id: &ExperienceId) -> Result<(), RepositoryError> {
        offline()
    }
    fn fetch_experience(&self, _id: &ExperienceId) -> Result<Option<Experience>, RepositoryError> {
        offline()
    }
    fn experiences_for(&self, _account: &AccountId) -> Result<Vec<Experience>, RepositoryError> {
        offline()
    }
    fn insert_education(&self, _education: Education) -> Result<Education, RepositoryError> {
        offline()
    }
    fn update_education(&self, _education: Education) -> Result<(), RepositoryError> {
        offline()
    }
    fn delete_education(&self, _id: &EducationId) -> Result<(), RepositoryError> {
        offline()
    }
    fn fetch_education(&self, _id: &EducationId) -> Result<Option<Education>, RepositoryError> {
        offline()
    }
    fn education_for(&self, _account: &AccountId) -> Result<Vec<Education>, RepositoryError> {
        offline()
    }
    fn insert_job(&self, _job: JobPosting) -> Result<JobPosting, RepositoryError> {
        offline()
    }
    fn update_job(&self, _job: JobPosting) -> Result<(), RepositoryError> {
        offline()
    }
    fn fetch_job(&self, _id: &JobId) -> Result<Option<JobPosting>, RepositoryError> {
        offline()
    }
    fn jobs(&self) -> Result<Vec<JobPosting>, RepositoryError> {
        offline()
    }
    fn insert_application(
        &self,
        _application: JobApplication,
    ) -> Result<JobApplication, RepositoryError> {
        offline()
    }
    fn update_application(&self, _application: JobApplication) -> Result<(), RepositoryError> {
        offline()
    }
    fn fetch_application(
        &self,
        _id: &ApplicationId,
    ) -> Result<Option<JobApplication>, RepositoryError> {
        offline()
    }
    fn applications_for_job(&self, _job: &JobId) -> Result<Vec<JobApplication>, RepositoryError> {
        offline()
    }
    fn applications_for_candidate(
        &self,
        _candidate: &AccountId,
    ) -> Result<Vec<JobApplication>, RepositoryError> {
        offline()
    }
}
