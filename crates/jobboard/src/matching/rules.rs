use super::signals::{Amount, CandidateSignals, JobSignals};
use super::weights::MatchWeights;
use super::{MatchComponent, MatchRule};

pub(crate) fn score_pair(
    job: &JobSignals,
    candidate: &CandidateSignals,
    weights: &MatchWeights,
) -> (Vec<MatchComponent>, u32) {
    let components = vec![
        work_model(job, candidate, weights),
        salary_fit(job, candidate, weights),
        experience(candidate, weights),
        education(candidate, weights),
    ];
    let raw_total = components
        .iter()
        .map(|component| u32::from(component.points))
        .sum();

    (components, raw_total)
}

fn work_model(
    job: &JobSignals,
    candidate: &CandidateSignals,
    weights: &MatchWeights,
) -> MatchComponent {
    let preference = candidate.work_model_preference;
    if preference.matches(job.work_model) {
        MatchComponent {
            rule: MatchRule::WorkModel,
            points: weights.work_model,
            notes: format!("both sides expect {} work", preference.label()),
        }
    } else {
        MatchComponent {
            rule: MatchRule::WorkModel,
            points: 0,
            notes: format!(
                "candidate prefers {}, job offers {}",
                preference.label(),
                job.work_model.label()
            ),
        }
    }
}

fn salary_fit(
    job: &JobSignals,
    candidate: &CandidateSignals,
    weights: &MatchWeights,
) -> MatchComponent {
    let expectation = candidate.salary_expectation;
    let ceiling = job.salary_ceiling;
    let (points, notes) = match (expectation, ceiling) {
        (Some(Amount::ZERO), _) => (0, "candidate salary expectation is zero".to_string()),
        (_, Some(Amount::ZERO)) => (0, "job salary ceiling is zero".to_string()),
        (Some(expectation), Some(ceiling)) if expectation <= ceiling => (
            weights.salary_fit,
            format!("expectation {expectation} within ceiling {ceiling}"),
        ),
        (Some(expectation), Some(ceiling)) => {
            (0, format!("expectation {expectation} exceeds ceiling {ceiling}"))
        }
        (None, _) => (0, "candidate has no salary expectation".to_string()),
        (_, None) => (0, "job has no salary ceiling".to_string()),
    };

    MatchComponent {
        rule: MatchRule::SalaryFit,
        points,
        notes,
    }
}

fn experience(candidate: &CandidateSignals, weights: &MatchWeights) -> MatchComponent {
    let count = candidate.experience_count;
    let points = match count {
        4.. => weights.experience_senior,
        2..=3 => weights.experience_mid,
        1 => weights.experience_junior,
        0 => 0,
    };

    MatchComponent {
        rule: MatchRule::Experience,
        points,
        notes: format!("{count} professional experience record(s)"),
    }
}

fn education(candidate: &CandidateSignals, weights: &MatchWeights) -> MatchComponent {
    let (points, notes) = if candidate.has_completed_education {
        (weights.education_completed, "completed education on record")
    } else if candidate.has_any_education {
        (weights.education_in_progress, "education on record, none completed")
    } else {
        (0, "no education on record")
    };

    MatchComponent {
        rule: MatchRule::Education,
        points,
        notes: notes.to_string(),
    }
}
