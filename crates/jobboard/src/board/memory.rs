use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use super::domain::{
    Account, AccountId, ApplicationId, CandidateProfile, Education, EducationId, Experience,
    ExperienceId, JobApplication, JobId, JobPosting,
};
use super::repository::{BoardRepository, RepositoryError};

/// Process-local repository used by the API binary, the demo, and tests.
#[derive(Debug, Default)]
pub struct InMemoryBoardRepository {
    tables: Mutex<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    accounts: BTreeMap<AccountId, Account>,
    profiles: BTreeMap<AccountId, CandidateProfile>,
    experiences: BTreeMap<ExperienceId, Experience>,
    education: BTreeMap<EducationId, Education>,
    jobs: BTreeMap<JobId, JobPosting>,
    applications: BTreeMap<ApplicationId, JobApplication>,
}

impl InMemoryBoardRepository {
    fn tables(&self) -> Result<MutexGuard<'_, Tables>, RepositoryError> {
        self.tables
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository lock poisoned".to_string()))
    }
}

impl BoardRepository for InMemoryBoardRepository {
    fn insert_account(&self, account: Account) -> Result<Account, RepositoryError> {
        let mut tables = self.tables()?;
        let duplicate = tables.accounts.contains_key(&account.id)
            || tables
                .accounts
                .values()
                .any(|existing| existing.email == account.email);
        if duplicate {
            return Err(RepositoryError::Conflict);
        }
        tables.accounts.insert(account.id.clone(), account.clone());
        Ok(account)
    }

    fn fetch_account(&self, id: &AccountId) -> Result<Option<Account>, RepositoryError> {
        Ok(self.tables()?.accounts.get(id).cloned())
    }

    fn save_profile(&self, profile: CandidateProfile) -> Result<CandidateProfile, RepositoryError> {
        let mut tables = self.tables()?;
        tables
            .profiles
            .insert(profile.account_id.clone(), profile.clone());
        Ok(profile)
    }

    fn fetch_profile(&self, id: &AccountId) -> Result<Option<CandidateProfile>, RepositoryError> {
        Ok(self.tables()?.profiles.get(id).cloned())
    }

    fn insert_experience(&self, experience: Experience) -> Result<Experience, RepositoryError> {
        let mut tables = self.tables()?;
        if tables.experiences.contains_key(&experience.id) {
            return Err(RepositoryError::Conflict);
        }
        tables
            .experiences
            .insert(experience.id.clone(), experience.clone());
        Ok(experience)
    }

    fn update_experience(&self, experience: Experience) -> Result<(), RepositoryError> {
        let mut tables = self.tables()?;
        match tables.experiences.get_mut(&experience.id) {
            Some(slot) => {
                *slot = experience;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn delete_experience(&self, id: &ExperienceId) -> Result<(), RepositoryError> {
        self.tables()?
            .experiences
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    fn fetch_experience(&self, id: &ExperienceId) -> Result<Option<Experience>, RepositoryError> {
        Ok(self.tables()?.experiences.get(id).cloned())
    }

    fn experiences_for(&self, account: &AccountId) -> Result<Vec<Experience>, RepositoryError> {
        Ok(self
            .tables()?
            .experiences
            .values()
            .filter(|experience| &experience.account_id == account)
            .cloned()
            .collect())
    }

    fn insert_education(&self, education: Education) -> Result<Education, RepositoryError> {
        let mut tables = self.tables()?;
        if tables.education.contains_key(&education.id) {
            return Err(RepositoryError::Conflict);
        }
        tables
            .education
            .insert(education.id.clone(), education.clone());
        Ok(education)
    }

    fn update_education(&self, education: Education) -> Result<(), RepositoryError> {
        let mut tables = self.tables()?;
        match tables.education.get_mut(&education.id) {
            Some(slot) => {
                *slot = education;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn delete_education(&self, id: &EducationId) -> Result<(), RepositoryError> {
        self.tables()?
            .education
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    fn fetch_education(&self, id: &EducationId) -> Result<Option<Education>, RepositoryError> {
        Ok(self.tables()?.education.get(id).cloned())
    }

    fn education_for(&self, account: &AccountId) -> Result<Vec<Education>, RepositoryError> {
        Ok(self
            .tables()?
            .education
            .values()
            .filter(|record| &record.account_id == account)
            .cloned()
            .collect())
    }

    fn insert_job(&self, job: JobPosting) -> Result<JobPosting, RepositoryError> {
        let mut tables = self.tables()?;
        let duplicate = tables.jobs.contains_key(&job.id)
            || tables.jobs.values().any(|existing| existing.code == job.code);
        if duplicate {
            return Err(RepositoryError::Conflict);
        }
        tables.jobs.insert(job.id.clone(), job.clone());
        Ok(job)
    }

    fn update_job(&self, job: JobPosting) -> Result<(), RepositoryError> {
        let mut tables = self.tables()?;
        if !tables.jobs.contains_key(&job.id) {
            return Err(RepositoryError::NotFound);
        }
        if tables
            .jobs
            .values()
            .any(|existing| existing.id != job.id && existing.code == job.code)
        {
            return Err(RepositoryError::Conflict);
        }
        tables.jobs.insert(job.id.clone(), job);
        Ok(())
    }

    fn fetch_job(&self, id: &JobId) -> Result<Option<JobPosting>, RepositoryError> {
        Ok(self.tables()?.jobs.get(id).cloned())
    }

    fn jobs(&self) -> Result<Vec<JobPosting>, RepositoryError> {
        Ok(self.tables()?.jobs.values().cloned().collect())
    }

    fn insert_application(
        &self,
        application: JobApplication,
    ) -> Result<JobApplication, RepositoryError> {
        let mut tables = self.tables()?;
        let duplicate = tables.applications.contains_key(&application.id)
            || tables.applications.values().any(|existing| {
                existing.job_id == application.job_id
                    && existing.candidate_id == application.candidate_id
            });
        if duplicate {
            return Err(RepositoryError::Conflict);
        }
        tables
            .applications
            .insert(application.id.clone(), application.clone());
        Ok(application)
    }

    fn update_application(&self, application: JobApplication) -> Result<(), RepositoryError> {
        let mut tables = self.tables()?;
        match tables.applications.get_mut(&application.id) {
            Some(slot) => {
                *slot = application;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch_application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<JobApplication>, RepositoryError> {
        Ok(self.tables()?.applications.get(id).cloned())
    }

    fn applications_for_job(&self, job: &JobId) -> Result<Vec<JobApplication>, RepositoryError> {
        Ok(self
            .tables()?
            .applications
            .values()
            .filter(|application| &application.job_id == job)
            .cloned()
            .collect())
    }

    fn applications_for_candidate(
        &self,
        candidate: &AccountId,
    ) -> Result<Vec<JobApplication>, RepositoryError> {
        Ok(self
            .tables()?
            .applications
            .values()
            .filter(|application| &application.candidate_id == candidate)
            .cloned()
            .collect())
    }
}
