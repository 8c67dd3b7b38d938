use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{
    AccountId, ApplicationId, CandidateProfile, Education, Experience, JobApplication, JobId,
};

/// Everything a candidate sees on their own résumé page.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateOverview {
    pub account_id: AccountId,
    pub profile: Option<CandidateProfile>,
    pub experiences: Vec<Experience>,
    pub education: Vec<Education>,
}

/// Applicant row shown to the hiring company, ordered by score.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicantView {
    pub application_id: ApplicationId,
    pub candidate_id: AccountId,
    pub candidate_name: String,
    pub candidate_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    pub status: &'static str,
    pub score: u8,
    pub message: String,
    pub applied_at: DateTime<Utc>,
}

/// Application row shown to the candidate who submitted it.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateApplicationView {
    pub application_id: ApplicationId,
    pub job_id: JobId,
    pub job_title: String,
    pub job_code: String,
    pub status: &'static str,
    pub score: u8,
    pub applied_at: DateTime<Utc>,
}

/// Sanitized status payload returned after submitting or updating an application.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationStatusView {
    pub application_id: ApplicationId,
    pub job_id: JobId,
    pub status: &'static str,
    pub score: u8,
}

impl From<&JobApplication> for ApplicationStatusView {
    fn from(application: &JobApplication) -> Self {
        Self {
            application_id: application.id.clone(),
            job_id: application.job_id.clone(),
            status: application.status.label(),
            score: application.score,
        }
    }
}
