use crate::infra::read_json_file;
use clap::Args;
use jobboard::config::{ConfigError, MatchingConfig};
use jobboard::error::AppError;
use jobboard::matching::{
    parse_candidate_rows, CandidateRow, CandidateSignals, JobSignals, MatchBreakdown,
    MatchScorer, MatchWeights, RankedCandidate,
};
use std::fs::File;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file holding the job signals (`work_model`, `salary_ceiling`)
    #[arg(long)]
    pub(crate) job: PathBuf,
    /// JSON file holding the candidate signals
    #[arg(long)]
    pub(crate) candidate: PathBuf,
    /// Optional JSON point table overriding the default weights
    #[arg(long)]
    pub(crate) weights: Option<PathBuf>,
    /// Print the breakdown as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// JSON file holding the job signals
    #[arg(long)]
    pub(crate) job: PathBuf,
    /// CSV export with candidate,work_model,salary_expectation,experience_count,education
    #[arg(long)]
    pub(crate) candidates: PathBuf,
    /// Only print the top N candidates
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Optional JSON point table overriding the default weights
    #[arg(long)]
    pub(crate) weights: Option<PathBuf>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let scorer = scorer_from(args.weights)?;
    let job: JobSignals = read_json_file(&args.job)?;
    let candidate: CandidateSignals = read_json_file(&args.candidate)?;

    let breakdown = scorer.evaluate(&job, &candidate);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
    } else {
        render_breakdown(&breakdown);
    }
    Ok(())
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let scorer = scorer_from(args.weights)?;
    let job: JobSignals = read_json_file(&args.job)?;
    let rows = parse_candidate_rows(File::open(&args.candidates)?)?;

    let ranked = rank_rows(&scorer, &job, &rows, args.limit);
    println!(
        "Ranking {} candidates for a {} role (salary ceiling {})",
        rows.len(),
        job.work_model.label(),
        job.salary_ceiling
            .map(|amount| amount.to_string())
            .unwrap_or_else(|| "not informed".to_string())
    );
    for (position, entry) in ranked.iter().enumerate() {
        println!(
            "{:>3}. {:<30} {:>3}",
            position + 1,
            entry.candidate,
            entry.breakdown.score
        );
    }
    Ok(())
}

pub(crate) fn rank_rows<'a>(
    scorer: &MatchScorer,
    job: &JobSignals,
    rows: &'a [CandidateRow],
    limit: Option<usize>,
) -> Vec<RankedCandidate<&'a str>> {
    let mut ranked = scorer.rank(
        job,
        rows.iter().map(|row| (row.candidate.as_str(), &row.signals)),
    );
    if let Some(limit) = limit {
        ranked.truncate(limit);
    }
    ranked
}

fn scorer_from(path: Option<PathBuf>) -> Result<MatchScorer, ConfigError> {
    let weights = match path {
        Some(path) => MatchingConfig::from_file(path)?.weights,
        None => MatchWeights::default(),
    };
    Ok(MatchScorer::new(weights))
}

pub(crate) fn render_breakdown(breakdown: &MatchBreakdown) {
    println!("Match score: {}", breakdown.score);
    if u32::from(breakdown.score) != breakdown.raw_total {
        println!("  (raw total {} capped)", breakdown.raw_total);
    }
    for component in &breakdown.components {
        println!(
            "  - {:?}: {} ({})",
            component.rule, component.points, component.notes
        );
    }
}
