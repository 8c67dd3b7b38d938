use std::io::Read;

use serde::{Deserialize, Deserializer, Serialize};

use super::signals::{Amount, CandidateSignals, WorkModel};

/// Candidate entry read from a ranking export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateRow {
    pub candidate: String,
    pub signals: CandidateSignals,
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read candidate csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: unknown education status '{value}'")]
    Education { row: usize, value: String },
    #[error("row {row}: candidate name is empty")]
    MissingCandidate { row: usize },
}

/// Parse `candidate,work_model,salary_expectation,experience_count,education` rows.
///
/// `education` is `completed`, `in_progress`, or empty. Unknown work models are kept
/// as [`WorkModel::Unrecognized`] so the row still ranks, just without that rule.
pub fn parse_candidate_rows<R: Read>(reader: R) -> Result<Vec<CandidateRow>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();

    for (index, record) in csv_reader.deserialize::<RawCandidateRow>().enumerate() {
        let raw = record?;
        let row = index + 1;

        if raw.candidate.is_empty() {
            return Err(ImportError::MissingCandidate { row });
        }

        let (has_completed_education, has_any_education) = match raw.education.as_deref() {
            None | Some("none") => (false, false),
            Some("completed") => (true, true),
            Some("in_progress") | Some("suspended") => (false, true),
            Some(other) => {
                return Err(ImportError::Education {
                    row,
                    value: other.to_string(),
                })
            }
        };

        rows.push(CandidateRow {
            candidate: raw.candidate,
            signals: CandidateSignals {
                work_model_preference: WorkModel::parse(&raw.work_model),
                salary_expectation: raw.salary_expectation,
                experience_count: raw.experience_count.unwrap_or(0),
                has_completed_education,
                has_any_education,
            },
        });
    }

    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct RawCandidateRow {
    candidate: String,
    #[serde(default)]
    work_model: String,
    #[serde(default)]
    salary_expectation: Option<Amount>,
    #[serde(default)]
    experience_count: Option<u32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    education: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt
        .map(|value| value.trim().to_ascii_lowercase())
        .filter(|value| !value.is_empty()))
}
