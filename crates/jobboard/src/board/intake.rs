//! Request drafts and the validation that turns them into domain records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use super::domain::{
    Account, AccountId, AccountRole, Availability, CandidateProfile, ContractType, Education,
    EducationId, EducationStatus, Experience, ExperienceId, JobId, JobPosting, LanguageSkill,
};
use crate::matching::{Amount, WorkModel};

/// Field-level validation failures for inbound drafts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Blank { field: &'static str },
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("'{0}' is not a valid e-mail address")]
    InvalidEmail(String),
    #[error("{field} must be an http(s) URL")]
    InvalidUrl { field: &'static str },
    #[error("{field} must be remote, hybrid or onsite")]
    UnsupportedWorkModel { field: &'static str },
    #[error("salary_min {min} exceeds salary_max {max}")]
    SalaryRange { min: Amount, max: Amount },
    #[error("ended_on {ended_on} precedes started_on {started_on}")]
    DateOrder {
        started_on: NaiveDate,
        ended_on: NaiveDate,
    },
    #[error("a current position cannot have an end date")]
    CurrentWithEndDate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountDraft {
    pub email: String,
    pub display_name: String,
    pub role: AccountRole,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobPostingDraft {
    pub title: String,
    pub department: String,
    pub code: String,
    pub work_model: WorkModel,
    pub location: String,
    pub contract_type: ContractType,
    pub weekly_hours: String,
    pub summary: String,
    pub responsibilities: String,
    pub required_qualifications: String,
    #[serde(default)]
    pub preferred_qualifications: String,
    #[serde(default)]
    pub soft_skills: String,
    #[serde(default)]
    pub benefits: String,
    #[serde(default)]
    pub salary_min: Option<Amount>,
    #[serde(default)]
    pub salary_max: Option<Amount>,
    #[serde(default)]
    pub hiring_stages: String,
    #[serde(default)]
    pub culture_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileDraft {
    pub headline: String,
    pub city: String,
    pub state: String,
    pub whatsapp: String,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub portfolio: Option<String>,
    pub summary: String,
    #[serde(default)]
    pub salary_expectation: Option<Amount>,
    pub availability: Availability,
    pub work_model: WorkModel,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub languages: Vec<LanguageSkill>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExperienceDraft {
    pub role_title: String,
    pub company: String,
    pub started_on: NaiveDate,
    #[serde(default)]
    pub ended_on: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EducationDraft {
    pub degree: String,
    pub course: String,
    pub institution: String,
    pub status: EducationStatus,
}

pub(crate) fn account(
    draft: AccountDraft,
    id: AccountId,
    now: DateTime<Utc>,
) -> Result<Account, ValidationError> {
    let email = draft.email.trim().to_ascii_lowercase();
    if !is_plausible_email(&email) {
        return Err(ValidationError::InvalidEmail(draft.email));
    }

    Ok(Account {
        id,
        email,
        display_name: required("display_name", draft.display_name, 150)?,
        role: draft.role,
        created_at: now,
    })
}

pub(crate) fn job_posting(
    draft: JobPostingDraft,
    id: JobId,
    company_id: AccountId,
    now: DateTime<Utc>,
) -> Result<JobPosting, ValidationError> {
    if !draft.work_model.is_recognized() {
        return Err(ValidationError::UnsupportedWorkModel {
            field: "work_model",
        });
    }
    if let (Some(min), Some(max)) = (draft.salary_min, draft.salary_max) {
        if min > max {
            return Err(ValidationError::SalaryRange { min, max });
        }
    }

    Ok(JobPosting {
        id,
        company_id,
        title: required("title", draft.title, 150)?,
        department: required("department", draft.department, 100)?,
        code: required("code", draft.code, 50)?,
        published_on: now.date_naive(),
        work_model: draft.work_model,
        location: required("location", draft.location, 100)?,
        contract_type: draft.contract_type,
        weekly_hours: required("weekly_hours", draft.weekly_hours, 50)?,
        summary: required("summary", draft.summary, usize::MAX)?,
        responsibilities: required("responsibilities", draft.responsibilities, usize::MAX)?,
        required_qualifications: required(
            "required_qualifications",
            draft.required_qualifications,
            usize::MAX,
        )?,
        preferred_qualifications: draft.preferred_qualifications.trim().to_string(),
        soft_skills: draft.soft_skills.trim().to_string(),
        benefits: draft.benefits.trim().to_string(),
        salary_min: draft.salary_min,
        salary_max: draft.salary_max,
        hiring_stages: draft.hiring_stages.trim().to_string(),
        culture_url: url("culture_url", draft.culture_url)?,
        created_at: now,
    })
}

pub(crate) fn profile(
    draft: ProfileDraft,
    account_id: AccountId,
) -> Result<CandidateProfile, ValidationError> {
    if !draft.work_model.is_recognized() {
        return Err(ValidationError::UnsupportedWorkModel {
            field: "work_model",
        });
    }

    let skills = draft
        .skills
        .into_iter()
        .filter(|skill| !skill.trim().is_empty())
        .map(|skill| required("skills", skill, 50))
        .collect::<Result<Vec<_>, _>>()?;
    let languages = draft
        .languages
        .into_iter()
        .map(|entry| {
            Ok(LanguageSkill {
                language: required("languages", entry.language, 50)?,
                level: entry.level,
            })
        })
        .collect::<Result<Vec<_>, ValidationError>>()?;

    Ok(CandidateProfile {
        account_id,
        headline: required("headline", draft.headline, 150)?,
        city: required("city", draft.city, 100)?,
        state: required("state", draft.state, 50)?,
        whatsapp: required("whatsapp", draft.whatsapp, 20)?,
        linkedin: url("linkedin", draft.linkedin)?,
        github: url("github", draft.github)?,
        portfolio: url("portfolio", draft.portfolio)?,
        summary: required("summary", draft.summary, usize::MAX)?,
        salary_expectation: draft.salary_expectation,
        availability: draft.availability,
        work_model: draft.work_model,
        skills,
        languages,
    })
}

pub(crate) fn experience(
    draft: ExperienceDraft,
    id: ExperienceId,
    account_id: AccountId,
) -> Result<Experience, ValidationError> {
    if draft.current && draft.ended_on.is_some() {
        return Err(ValidationError::CurrentWithEndDate);
    }
    if let Some(ended_on) = draft.ended_on {
        if ended_on < draft.started_on {
            return Err(ValidationError::DateOrder {
                started_on: draft.started_on,
                ended_on,
            });
        }
    }

    Ok(Experience {
        id,
        account_id,
        role_title: required("role_title", draft.role_title, 100)?,
        company: required("company", draft.company, 100)?,
        started_on: draft.started_on,
        ended_on: draft.ended_on,
        current: draft.current,
        description: required("description", draft.description, usize::MAX)?,
    })
}

pub(crate) fn education(
    draft: EducationDraft,
    id: EducationId,
    account_id: AccountId,
) -> Result<Education, ValidationError> {
    Ok(Education {
        id,
        account_id,
        degree: required("degree", draft.degree, 50)?,
        course: required("course", draft.course, 100)?,
        institution: required("institution", draft.institution, 100)?,
        status: draft.status,
    })
}

fn required(field: &'static str, value: String, max: usize) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Blank { field });
    }
    if trimmed.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(trimmed.to_string())
}

fn url(field: &'static str, value: Option<String>) -> Result<Option<String>, ValidationError> {
    let Some(value) = value.map(|raw| raw.trim().to_string()) else {
        return Ok(None);
    };
    if value.is_empty() {
        return Ok(None);
    }
    if !(value.starts_with("https://") || value.starts_with("http://")) || value.contains(' ') {
        return Err(ValidationError::InvalidUrl { field });
    }
    Ok(Some(value))
}

fn is_plausible_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.chars().any(char::is_whitespace)
}
