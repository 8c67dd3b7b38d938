use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::matching::{Amount, CandidateSignals, JobSignals, WorkModel};

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

identifier!(
    /// Identifier for registered candidate or company accounts.
    AccountId
);
identifier!(
    /// Identifier for job postings.
    JobId
);
identifier!(
    /// Identifier for a candidate's application to a posting.
    ApplicationId
);
identifier!(ExperienceId);
identifier!(EducationId);

/// Whether an account acts as a job seeker or an employer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    Candidate,
    Company,
}

impl AccountRole {
    pub const fn label(self) -> &'static str {
        match self {
            AccountRole::Candidate => "candidate",
            AccountRole::Company => "company",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub email: String,
    pub display_name: String,
    pub role: AccountRole,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Immediate,
    FifteenDays,
    ThirtyDays,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageLevel {
    Basic,
    Intermediate,
    Advanced,
    Fluent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageSkill {
    pub language: String,
    pub level: LanguageLevel,
}

/// Résumé header maintained by a candidate account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub account_id: AccountId,
    pub headline: String,
    pub city: String,
    pub state: String,
    pub whatsapp: String,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub portfolio: Option<String>,
    pub summary: String,
    pub salary_expectation: Option<Amount>,
    pub availability: Availability,
    pub work_model: WorkModel,
    pub skills: Vec<String>,
    pub languages: Vec<LanguageSkill>,
}

impl CandidateProfile {
    /// Snapshot the scorer inputs from this profile and its résumé records.
    pub fn signals(&self, experiences: &[Experience], education: &[Education]) -> CandidateSignals {
        CandidateSignals {
            work_model_preference: self.work_model,
            salary_expectation: self.salary_expectation,
            experience_count: u32::try_from(experiences.len()).unwrap_or(u32::MAX),
            has_completed_education: education
                .iter()
                .any(|record| record.status == EducationStatus::Completed),
            has_any_education: !education.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub id: ExperienceId,
    pub account_id: AccountId,
    pub role_title: String,
    pub company: String,
    pub started_on: NaiveDate,
    pub ended_on: Option<NaiveDate>,
    pub current: bool,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationStatus {
    Completed,
    InProgress,
    Suspended,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub id: EducationId,
    pub account_id: AccountId,
    pub degree: String,
    pub course: String,
    pub institution: String,
    pub status: EducationStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractType {
    /// Salaried employment under the labor code.
    Clt,
    Contractor,
    Internship,
    Temporary,
}

/// Opening published by a company account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: JobId,
    pub company_id: AccountId,
    pub title: String,
    pub department: String,
    pub code: String,
    pub published_on: NaiveDate,
    pub work_model: WorkModel,
    pub location: String,
    pub contract_type: ContractType,
    pub weekly_hours: String,
    pub summary: String,
    pub responsibilities: String,
    pub required_qualifications: String,
    pub preferred_qualifications: String,
    pub soft_skills: String,
    pub benefits: String,
    pub salary_min: Option<Amount>,
    pub salary_max: Option<Amount>,
    pub hiring_stages: String,
    pub culture_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl JobPosting {
    pub fn signals(&self) -> JobSignals {
        JobSignals {
            work_model: self.work_model,
            salary_ceiling: self.salary_max,
        }
    }
}

/// Review stage of an application as seen by the hiring company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Submitted,
    UnderReview,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Submitted => "submitted",
            ApplicationStatus::UnderReview => "under_review",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "submitted" => Some(Self::Submitted),
            "under_review" => Some(Self::UnderReview),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub candidate_id: AccountId,
    pub message: String,
    pub status: ApplicationStatus,
    /// Match score computed when the application was submitted.
    pub score: u8,
    pub created_at: DateTime<Utc>,
}
