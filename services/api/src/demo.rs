use crate::infra::{in_memory_board, BoardService};
use crate::ranking::render_breakdown;
use chrono::Local;
use clap::Args;
use jobboard::board::{
    Account, AccountDraft, AccountRole, Availability, ContractType, EducationDraft,
    EducationStatus, ExperienceDraft, JobPostingDraft, ProfileDraft,
};
use jobboard::config::MatchingConfig;
use jobboard::error::AppError;
use jobboard::matching::{Amount, MatchWeights, WorkModel};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Optional JSON point table overriding the default weights
    #[arg(long)]
    pub(crate) weights: Option<PathBuf>,
    /// Print the per-rule breakdown for every applicant
    #[arg(long)]
    pub(crate) breakdown: bool,
}

struct DemoCandidate {
    email: &'static str,
    name: &'static str,
    headline: &'static str,
    work_model: WorkModel,
    salary_expectation: u64,
    experiences: usize,
    education: Option<EducationStatus>,
}

const CANDIDATES: [DemoCandidate; 3] = [
    DemoCandidate {
        email: "marina@example.com",
        name: "Marina Costa",
        headline: "Senior Backend Engineer",
        work_model: WorkModel::Remote,
        salary_expectation: 7500,
        experiences: 4,
        education: Some(EducationStatus::Completed),
    },
    DemoCandidate {
        email: "joao@example.com",
        name: "João Lima",
        headline: "Backend Developer",
        work_model: WorkModel::Hybrid,
        salary_expectation: 6000,
        experiences: 2,
        education: Some(EducationStatus::InProgress),
    },
    DemoCandidate {
        email: "lia@example.com",
        name: "Lia Rocha",
        headline: "Junior Developer",
        work_model: WorkModel::Onsite,
        salary_expectation: 9500,
        experiences: 1,
        education: None,
    },
];

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let weights = match args.weights {
        Some(path) => MatchingConfig::from_file(path)?.weights,
        None => MatchWeights::default(),
    };
    let board = in_memory_board(weights);

    println!("Job board demo (in-memory, nothing is persisted)");
    let company = board.register(AccountDraft {
        email: "talent@acme.io".to_string(),
        display_name: "Acme Talent".to_string(),
        role: AccountRole::Company,
    })?;
    let job = board.create_job(&company.id, demo_job())?;
    println!(
        "- {} posted {} [{}] ({}, up to {})",
        company.display_name,
        job.title,
        job.code,
        job.work_model.label(),
        job.salary_max
            .map(|amount| amount.to_string())
            .unwrap_or_else(|| "not informed".to_string())
    );

    for seed in &CANDIDATES {
        let candidate = seed_candidate(&board, seed)?;
        let application = board.apply(
            &candidate.id,
            &job.id,
            format!("Hello, I'm {} and I'd love to join Acme.", seed.name),
        )?;
        println!(
            "- {} applied -> {} (score {})",
            candidate.display_name, application.id, application.score
        );
        if args.breakdown {
            render_breakdown(&board.match_candidate(&candidate.id, &job.id)?);
        }
    }

    println!("\nApplicants ranked for {}:", job.code);
    for (position, applicant) in board
        .ranked_applicants(&company.id, &job.id)?
        .iter()
        .enumerate()
    {
        println!(
            "{:>3}. {:<16} {:>3}  {}",
            position + 1,
            applicant.candidate_name,
            applicant.score,
            applicant.headline.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}

fn seed_candidate(board: &BoardService, seed: &DemoCandidate) -> Result<Account, AppError> {
    let candidate = board.register(AccountDraft {
        email: seed.email.to_string(),
        display_name: seed.name.to_string(),
        role: AccountRole::Candidate,
    })?;
    board.save_profile(
        &candidate.id,
        ProfileDraft {
            headline: seed.headline.to_string(),
            city: "Belo Horizonte".to_string(),
            state: "MG".to_string(),
            whatsapp: "+55 31 90000-0000".to_string(),
            linkedin: None,
            github: None,
            portfolio: None,
            summary: format!("{} looking for the next challenge", seed.headline),
            salary_expectation: Some(Amount::from_cents(seed.salary_expectation * 100)),
            availability: Availability::Immediate,
            work_model: seed.work_model,
            skills: vec!["Rust".to_string(), "SQL".to_string()],
            languages: Vec::new(),
        },
    )?;

    let today = Local::now().date_naive();
    for index in 0..seed.experiences {
        let years_back = (seed.experiences - index) as i64 * 2;
        let started_on = today - chrono::Duration::days(365 * years_back);
        board.add_experience(
            &candidate.id,
            ExperienceDraft {
                role_title: "Software Engineer".to_string(),
                company: format!("Studio {}", index + 1),
                started_on,
                ended_on: Some(started_on + chrono::Duration::days(700)),
                current: false,
                description: "Shipped and operated backend services".to_string(),
            },
        )?;
    }

    if let Some(status) = seed.education {
        board.add_education(
            &candidate.id,
            EducationDraft {
                degree: "Bachelor".to_string(),
                course: "Information Systems".to_string(),
                institution: "UFMG".to_string(),
                status,
            },
        )?;
    }

    Ok(candidate)
}

fn demo_job() -> JobPostingDraft {
    JobPostingDraft {
        title: "Backend Engineer".to_string(),
        department: "Payments".to_string(),
        code: "PAY-042".to_string(),
        work_model: WorkModel::Remote,
        location: "Brazil".to_string(),
        contract_type: ContractType::Clt,
        weekly_hours: "40h".to_string(),
        summary: "Build the settlement platform".to_string(),
        responsibilities: "Design, ship and operate APIs".to_string(),
        required_qualifications: "Rust or Go, PostgreSQL".to_string(),
        preferred_qualifications: String::new(),
        soft_skills: String::new(),
        benefits: "Health plan, learning budget".to_string(),
        salary_min: Some(Amount::from_cents(600_000)),
        salary_max: Some(Amount::from_cents(800_000)),
        hiring_stages: "Screening, technical interview, offer".to_string(),
        culture_url: None,
    }
}
