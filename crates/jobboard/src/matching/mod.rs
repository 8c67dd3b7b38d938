//! Candidate/job match scoring.
//!
//! The scorer is a pure function over [`JobSignals`] and [`CandidateSignals`]: callers
//! materialize both snapshots from whatever storage they use and pass them in. Nothing here
//! touches persistence, so scoring is safe to call from any thread or batch job.

mod import;
mod rules;
mod signals;
mod weights;

pub use import::{parse_candidate_rows, CandidateRow, ImportError};
pub use signals::{Amount, AmountError, CandidateSignals, JobSignals, WorkModel};
pub use weights::MatchWeights;

use serde::{Deserialize, Serialize};

/// Upper bound applied to every score regardless of the configured weights.
pub const MATCH_SCORE_CEILING: u8 = 100;

/// Score a pair with the default point table.
pub fn score(job: &JobSignals, candidate: &CandidateSignals) -> u8 {
    MatchScorer::default().score(job, candidate)
}

/// Stateless scorer applying a [`MatchWeights`] table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchScorer {
    weights: MatchWeights,
}

impl MatchScorer {
    pub fn new(weights: MatchWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &MatchWeights {
        &self.weights
    }

    pub fn score(&self, job: &JobSignals, candidate: &CandidateSignals) -> u8 {
        self.evaluate(job, candidate).score
    }

    pub fn evaluate(&self, job: &JobSignals, candidate: &CandidateSignals) -> MatchBreakdown {
        let (components, raw_total) = rules::score_pair(job, candidate, &self.weights);
        let score = raw_total.min(u32::from(MATCH_SCORE_CEILING)) as u8;

        MatchBreakdown {
            score,
            raw_total,
            components,
        }
    }

    /// Score every candidate against one job, best first. Ties keep their input order.
    pub fn rank<'a, T, I>(&self, job: &JobSignals, candidates: I) -> Vec<RankedCandidate<T>>
    where
        I: IntoIterator<Item = (T, &'a CandidateSignals)>,
    {
        let mut ranked: Vec<RankedCandidate<T>> = candidates
            .into_iter()
            .map(|(candidate, signals)| RankedCandidate {
                candidate,
                breakdown: self.evaluate(job, signals),
            })
            .collect();
        ranked.sort_by(|left, right| right.breakdown.score.cmp(&left.breakdown.score));
        ranked
    }
}

/// Rules contributing to a match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    WorkModel,
    SalaryFit,
    Experience,
    Education,
}

/// Points awarded by a single rule, kept so rankings can be explained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchComponent {
    pub rule: MatchRule,
    pub points: u8,
    pub notes: String,
}

/// Scored result with one component per rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchBreakdown {
    pub score: u8,
    pub raw_total: u32,
    pub components: Vec<MatchComponent>,
}

impl MatchBreakdown {
    pub fn points_for(&self, rule: MatchRule) -> u8 {
        self.components
            .iter()
            .find(|component| component.rule == rule)
            .map(|component| component.points)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedCandidate<T> {
    pub candidate: T,
    pub breakdown: MatchBreakdown,
}
