use serde::{Deserialize, Serialize};

/// Point table applied by the match scorer. Each field is the award for one rule tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchWeights {
    pub work_model: u8,
    pub salary_fit: u8,
    /// Four or more experience records.
    pub experience_senior: u8,
    /// Two or three experience records.
    pub experience_mid: u8,
    /// Exactly one experience record.
    pub experience_junior: u8,
    pub education_completed: u8,
    pub education_in_progress: u8,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            work_model: 20,
            salary_fit: 20,
            experience_senior: 20,
            experience_mid: 12,
            experience_junior: 5,
            education_completed: 15,
            education_in_progress: 8,
        }
    }
}

impl MatchWeights {
    /// Highest raw total reachable with this table, before the ceiling is applied.
    pub fn max_total(&self) -> u32 {
        let experience = self
            .experience_senior
            .max(self.experience_mid)
            .max(self.experience_junior);
        let education = self.education_completed.max(self.education_in_progress);

        [self.work_model, self.salary_fit, experience, education]
            .into_iter()
            .map(u32::from)
            .sum()
    }
}
