use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::http::StatusCode;
use chrono::Utc;
use tracing::{debug, info, warn};

use super::domain::{
    Account, AccountId, AccountRole, ApplicationId, ApplicationStatus, CandidateProfile,
    Education, EducationId, Experience, ExperienceId, JobApplication, JobId, JobPosting,
};
use super::intake::{
    self, AccountDraft, EducationDraft, ExperienceDraft, JobPostingDraft, ProfileDraft,
    ValidationError,
};
use super::repository::{BoardRepository, RepositoryError};
use super::views::{ApplicantView, CandidateApplicationView, CandidateOverview};
use crate::matching::{MatchBreakdown, MatchScorer};

/// Service composing the repository, intake validation, and the match scorer.
pub struct JobBoardService<R> {
    repository: Arc<R>,
    scorer: Arc<MatchScorer>,
    sequences: Arc<Sequences>,
}

#[derive(Default)]
struct Sequences {
    accounts: AtomicU64,
    jobs: AtomicU64,
    applications: AtomicU64,
    experiences: AtomicU64,
    education: AtomicU64,
}

fn next_id(counter: &AtomicU64, prefix: &str) -> String {
    let id = counter.fetch_add(1, Ordering::Relaxed) + 1;
    format!("{prefix}-{id:06}")
}

impl<R> Clone for JobBoardService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
            scorer: self.scorer.clone(),
            sequences: self.sequences.clone(),
        }
    }
}

impl<R> JobBoardService<R>
where
    R: BoardRepository + 'static,
{
    pub fn new(repository: Arc<R>, scorer: MatchScorer) -> Self {
        Self {
            repository,
            scorer: Arc::new(scorer),
            sequences: Arc::new(Sequences::default()),
        }
    }

    pub fn scorer(&self) -> &MatchScorer {
        &self.scorer
    }

    /// Register a candidate or company account.
    pub fn register(&self, draft: AccountDraft) -> Result<Account, BoardServiceError> {
        let id = AccountId(next_id(&self.sequences.accounts, "acct"));
        let account = intake::account(draft, id, Utc::now())?;
        let stored = self.repository.insert_account(account)?;
        info!(account_id = %stored.id, role = stored.role.label(), "account registered");
        Ok(stored)
    }

    pub fn account(&self, id: &AccountId) -> Result<Account, BoardServiceError> {
        self.repository
            .fetch_account(id)?
            .ok_or_else(|| BoardServiceError::Unauthorized(id.clone()))
    }

    /// Candidate résumé: profile header plus experience and education records.
    pub fn profile(&self, actor: &AccountId) -> Result<CandidateOverview, BoardServiceError> {
        let account = self.require_role(actor, AccountRole::Candidate)?;
        Ok(CandidateOverview {
            profile: self.repository.fetch_profile(&account.id)?,
            experiences: self.repository.experiences_for(&account.id)?,
            education: self.repository.education_for(&account.id)?,
            account_id: account.id,
        })
    }

    pub fn save_profile(
        &self,
        actor: &AccountId,
        draft: ProfileDraft,
    ) -> Result<CandidateProfile, BoardServiceError> {
        let account = self.require_role(actor, AccountRole::Candidate)?;
        let profile = intake::profile(draft, account.id)?;
        let stored = self.repository.save_profile(profile)?;
        info!(account_id = %stored.account_id, "candidate profile saved");
        Ok(stored)
    }

    pub fn add_experience(
        &self,
        actor: &AccountId,
        draft: ExperienceDraft,
    ) -> Result<Experience, BoardServiceError> {
        let account = self.require_role(actor, AccountRole::Candidate)?;
        let id = ExperienceId(next_id(&self.sequences.experiences, "exp"));
        let experience = intake::experience(draft, id, account.id)?;
        Ok(self.repository.insert_experience(experience)?)
    }

    pub fn edit_experience(
        &self,
        actor: &AccountId,
        id: &ExperienceId,
        draft: ExperienceDraft,
    ) -> Result<Experience, BoardServiceError> {
        let account = self.account(actor)?;
        let existing = self.owned_experience(&account, id)?;
        let experience = intake::experience(draft, existing.id, account.id)?;
        self.repository.update_experience(experience.clone())?;
        Ok(experience)
    }

    pub fn remove_experience(
        &self,
        actor: &AccountId,
        id: &ExperienceId,
    ) -> Result<(), BoardServiceError> {
        let account = self.account(actor)?;
        let existing = self.owned_experience(&account, id)?;
        self.repository.delete_experience(&existing.id)?;
        Ok(())
    }

    pub fn add_education(
        &self,
        actor: &AccountId,
        draft: EducationDraft,
    ) -> Result<Education, BoardServiceError> {
        let account = self.require_role(actor, AccountRole::Candidate)?;
        let id = EducationId(next_id(&self.sequences.education, "edu"));
        let education = intake::education(draft, id, account.id)?;
        Ok(self.repository.insert_education(education)?)
    }

    pub fn edit_education(
        &self,
        actor: &AccountId,
        id: &EducationId,
        draft: EducationDraft,
    ) -> Result<Education, BoardServiceError> {
        let account = self.account(actor)?;
        let existing = self.owned_education(&account, id)?;
        let education = intake::education(draft, existing.id, account.id)?;
        self.repository.update_education(education.clone())?;
        Ok(education)
    }

    pub fn remove_education(
        &self,
        actor: &AccountId,
        id: &EducationId,
    ) -> Result<(), BoardServiceError> {
        let account = self.account(actor)?;
        let existing = self.owned_education(&account, id)?;
        self.repository.delete_education(&existing.id)?;
        Ok(())
    }

    /// Publish a new posting owned by the acting company.
    pub fn create_job(
        &self,
        actor: &AccountId,
        draft: JobPostingDraft,
    ) -> Result<JobPosting, BoardServiceError> {
        let company = self.require_role(actor, AccountRole::Company)?;
        let id = JobId(next_id(&self.sequences.jobs, "job"));
        let job = intake::job_posting(draft, id, company.id, Utc::now())?;
        let stored = self.repository.insert_job(job)?;
        info!(job_id = %stored.id, code = %stored.code, "job posting published");
        Ok(stored)
    }

    /// Replace the editable fields of a posting. Identity, owner, and dates are kept.
    pub fn edit_job(
        &self,
        actor: &AccountId,
        job_id: &JobId,
        draft: JobPostingDraft,
    ) -> Result<JobPosting, BoardServiceError> {
        let company = self.require_role(actor, AccountRole::Company)?;
        let existing = self.owned_job(&company, job_id)?;

        let mut job = intake::job_posting(
            draft,
            existing.id.clone(),
            company.id,
            existing.created_at,
        )?;
        job.published_on = existing.published_on;

        self.repository.update_job(job.clone())?;
        info!(job_id = %job.id, "job posting updated");
        Ok(job)
    }

    /// All postings, newest first.
    pub fn list_jobs(&self) -> Result<Vec<JobPosting>, BoardServiceError> {
        let mut jobs = self.repository.jobs()?;
        sort_newest_first(&mut jobs);
        Ok(jobs)
    }

    pub fn job(&self, job_id: &JobId) -> Result<JobPosting, BoardServiceError> {
        self.repository
            .fetch_job(job_id)?
            .ok_or(BoardServiceError::NotFound("job posting"))
    }

    /// Postings owned by the acting company, newest first.
    pub fn company_jobs(&self, actor: &AccountId) -> Result<Vec<JobPosting>, BoardServiceError> {
        let company = self.require_role(actor, AccountRole::Company)?;
        let mut jobs: Vec<JobPosting> = self
            .repository
            .jobs()?
            .into_iter()
            .filter(|job| job.company_id == company.id)
            .collect();
        sort_newest_first(&mut jobs);
        Ok(jobs)
    }

    /// Score the acting candidate against a posting without applying.
    pub fn match_candidate(
        &self,
        actor: &AccountId,
        job_id: &JobId,
    ) -> Result<MatchBreakdown, BoardServiceError> {
        let candidate = self.require_role(actor, AccountRole::Candidate)?;
        let job = self.job(job_id)?;
        self.breakdown_for(&candidate, &job)
    }

    /// Submit an application; the match score is computed and stored with it.
    pub fn apply(
        &self,
        actor: &AccountId,
        job_id: &JobId,
        message: String,
    ) -> Result<JobApplication, BoardServiceError> {
        let candidate = self.require_role(actor, AccountRole::Candidate)?;
        let job = self.job(job_id)?;

        if self
            .repository
            .applications_for_candidate(&candidate.id)?
            .iter()
            .any(|application| application.job_id == job.id)
        {
            warn!(candidate_id = %candidate.id, job_id = %job.id, "duplicate application rejected");
            return Err(BoardServiceError::AlreadyApplied(job.id));
        }

        let breakdown = self.breakdown_for(&candidate, &job)?;
        debug!(
            candidate_id = %candidate.id,
            job_id = %job.id,
            score = breakdown.score,
            components = ?breakdown.components,
            "match score computed"
        );

        let application = JobApplication {
            id: ApplicationId(next_id(&self.sequences.applications, "app")),
            job_id: job.id.clone(),
            candidate_id: candidate.id,
            message: message.trim().to_string(),
            status: ApplicationStatus::Submitted,
            score: breakdown.score,
            created_at: Utc::now(),
        };

        let stored = match self.repository.insert_application(application) {
            Ok(stored) => stored,
            Err(RepositoryError::Conflict) => return Err(BoardServiceError::AlreadyApplied(job.id)),
            Err(other) => return Err(other.into()),
        };
        info!(
            application_id = %stored.id,
            job_id = %stored.job_id,
            score = stored.score,
            "application submitted"
        );
        Ok(stored)
    }

    /// Applications submitted by the acting candidate, newest first.
    pub fn candidate_applications(
        &self,
        actor: &AccountId,
    ) -> Result<Vec<CandidateApplicationView>, BoardServiceError> {
        let candidate = self.require_role(actor, AccountRole::Candidate)?;
        let mut applications = self.repository.applications_for_candidate(&candidate.id)?;
        applications.sort_by(|left, right| {
            right
                .created_at
                .cmp(&left.created_at)
                .then_with(|| right.id.cmp(&left.id))
        });

        let mut views = Vec::with_capacity(applications.len());
        for application in applications {
            let Some(job) = self.repository.fetch_job(&application.job_id)? else {
                continue;
            };
            views.push(CandidateApplicationView {
                application_id: application.id,
                job_id: job.id,
                job_title: job.title,
                job_code: job.code,
                status: application.status.label(),
                score: application.score,
                applied_at: application.created_at,
            });
        }
        Ok(views)
    }

    /// Applicants for a posting owned by the acting company, highest score first.
    pub fn ranked_applicants(
        &self,
        actor: &AccountId,
        job_id: &JobId,
    ) -> Result<Vec<ApplicantView>, BoardServiceError> {
        let company = self.require_role(actor, AccountRole::Company)?;
        let job = self.owned_job(&company, job_id)?;

        let mut applications = self.repository.applications_for_job(&job.id)?;
        applications.sort_by(|left, right| {
            right
                .score
                .cmp(&left.score)
                .then_with(|| left.created_at.cmp(&right.created_at))
                .then_with(|| left.id.cmp(&right.id))
        });

        let mut views = Vec::with_capacity(applications.len());
        for application in applications {
            let Some(candidate) = self.repository.fetch_account(&application.candidate_id)? else {
                continue;
            };
            let headline = self
                .repository
                .fetch_profile(&candidate.id)?
                .map(|profile| profile.headline);
            views.push(ApplicantView {
                application_id: application.id,
                candidate_id: candidate.id,
                candidate_name: candidate.display_name,
                candidate_email: candidate.email,
                headline,
                status: application.status.label(),
                score: application.score,
                message: application.message,
                applied_at: application.created_at,
            });
        }
        Ok(views)
    }

    /// Move an application to another review stage. Only the owning company may do so.
    pub fn update_application_status(
        &self,
        actor: &AccountId,
        application_id: &ApplicationId,
        status: &str,
    ) -> Result<JobApplication, BoardServiceError> {
        let company = self.require_role(actor, AccountRole::Company)?;
        let mut application = self
            .repository
            .fetch_application(application_id)?
            .ok_or(BoardServiceError::NotFound("application"))?;
        self.owned_job(&company, &application.job_id)
            .map_err(|_| BoardServiceError::NotFound("application"))?;

        let status = ApplicationStatus::parse(status)
            .ok_or_else(|| BoardServiceError::InvalidStatus(status.to_string()))?;
        application.status = status;
        self.repository.update_application(application.clone())?;

        info!(
            application_id = %application.id,
            status = status.label(),
            "application status updated"
        );
        Ok(application)
    }

    fn breakdown_for(
        &self,
        candidate: &Account,
        job: &JobPosting,
    ) -> Result<MatchBreakdown, BoardServiceError> {
        let profile = self
            .repository
            .fetch_profile(&candidate.id)?
            .ok_or(BoardServiceError::ProfileIncomplete)?;
        let experiences = self.repository.experiences_for(&candidate.id)?;
        let education = self.repository.education_for(&candidate.id)?;

        let signals = profile.signals(&experiences, &education);
        Ok(self.scorer.evaluate(&job.signals(), &signals))
    }

    fn require_role(
        &self,
        actor: &AccountId,
        role: AccountRole,
    ) -> Result<Account, BoardServiceError> {
        let account = self.account(actor)?;
        if account.role != role {
            warn!(account_id = %account.id, required = role.label(), "role check failed");
            return Err(BoardServiceError::Forbidden(format!(
                "only {} accounts may perform this action",
                role.label()
            )));
        }
        Ok(account)
    }

    fn owned_job(&self, company: &Account, job_id: &JobId) -> Result<JobPosting, BoardServiceError> {
        match self.repository.fetch_job(job_id)? {
            Some(job) if job.company_id == company.id => Ok(job),
            _ => Err(BoardServiceError::NotFound("job posting")),
        }
    }

    fn owned_experience(
        &self,
        account: &Account,
        id: &ExperienceId,
    ) -> Result<Experience, BoardServiceError> {
        match self.repository.fetch_experience(id)? {
            Some(experience) if experience.account_id == account.id => Ok(experience),
            _ => Err(BoardServiceError::NotFound("experience")),
        }
    }

    fn owned_education(
        &self,
        account: &Account,
        id: &EducationId,
    ) -> Result<Education, BoardServiceError> {
        match self.repository.fetch_education(id)? {
            Some(education) if education.account_id == account.id => Ok(education),
            _ => Err(BoardServiceError::NotFound("education record")),
        }
    }
}

fn sort_newest_first(jobs: &mut [JobPosting]) {
    jobs.sort_by(|left, right| {
        right
            .created_at
            .cmp(&left.created_at)
            .then_with(|| right.id.cmp(&left.id))
    });
}

/// Error raised by the job board service.
#[derive(Debug, thiserror::Error)]
pub enum BoardServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("missing X-Account-Id header")]
    MissingActor,
    #[error("unknown account {0}")]
    Unauthorized(AccountId),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("already applied to job {0}")]
    AlreadyApplied(JobId),
    #[error("candidate profile must be completed before matching")]
    ProfileIncomplete,
    #[error("unknown application status '{0}'")]
    InvalidStatus(String),
    #[error("{message}")]
    InvalidBody { status: StatusCode, message: String },
}
