use crate::infra::{current_year, load_registry, InMemoryRecordStore};
use admission_score::config::AppConfig;
use admission_score::error::AppError;
use admission_score::scoring::{
    Achievement, ElectiveSubjectRecord, ProgramKey, ProgramRegistry, RankingSummary,
    SchoolRecord, SchoolRecordImporter, ScoreResult, ScoreService, StudentId, SubjectRecord,
};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// School record CSV export (grade,semester,subject,rank,units,...)
    #[arg(long)]
    pub(crate) record_csv: PathBuf,
    /// University name exactly as registered
    #[arg(long)]
    pub(crate) university: String,
    /// Admission year (defaults to the current year)
    #[arg(long)]
    pub(crate) year: Option<u16>,
    /// Admission track name exactly as registered
    #[arg(long)]
    pub(crate) admission: String,
    /// Department name
    #[arg(long)]
    pub(crate) department: String,
    /// Program registry JSON file (defaults to APP_PROGRAMS_PATH or the built-in catalogue)
    #[arg(long)]
    pub(crate) programs: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// Score to rank
    #[arg(long)]
    pub(crate) score: f64,
    /// Comma separated peer scores
    #[arg(long, value_delimiter = ',')]
    pub(crate) peers: Vec<f64>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ProgramsArgs {
    /// Program registry JSON file (defaults to APP_PROGRAMS_PATH or the built-in catalogue)
    #[arg(long)]
    pub(crate) programs: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Optional school record CSV export replacing the bundled sample record
    #[arg(long)]
    pub(crate) record_csv: Option<PathBuf>,
    /// Skip the cohort ranking portion of the demo
    #[arg(long)]
    pub(crate) skip_ranking: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        record_csv,
        university,
        year,
        admission,
        department,
        programs,
    } = args;

    let config = AppConfig::load()?;
    let registry = load_registry(programs, &config)?;
    let record = SchoolRecordImporter::from_path(&record_csv)?;
    let key = ProgramKey::new(
        university,
        year.unwrap_or_else(current_year),
        admission,
        department,
    );

    let service = ScoreService::new(
        Arc::new(registry),
        Arc::new(InMemoryRecordStore::default()),
    );
    let result = service.compute_score(&record, &key);

    println!("Record: {}", record_csv.display());
    render_score(&key, &result);
    Ok(())
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = ScoreService::new(
        Arc::new(ProgramRegistry::new()),
        Arc::new(InMemoryRecordStore::default()),
    )
    .with_score_epsilon(config.scoring.score_epsilon);

    let summary = service.rank_against_cohort(args.score, &args.peers);
    render_ranking(args.score, &summary);
    Ok(())
}

pub(crate) fn run_programs(args: ProgramsArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let registry = load_registry(args.programs, &config)?;

    if registry.is_empty() {
        println!("No program rules registered");
        return Ok(());
    }

    println!("Registered program rules ({})", registry.len());
    for program in registry.programs() {
        println!(
            "- {} {} {} | departments {:?} | {} | through grade {} semester {} | ratio {:.0}%",
            program.university,
            program.year,
            program.admission,
            program.departments,
            program.formula,
            program.cutoff.grade,
            program.cutoff.semester,
            program.reflection_ratio
        );
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        record_csv,
        skip_ranking,
    } = args;

    let config = AppConfig::load()?;
    let registry = load_registry(None, &config)?;
    let record = match &record_csv {
        Some(path) => SchoolRecordImporter::from_path(path)?,
        None => demo_school_record(),
    };

    println!("Admission score demo");
    match &record_csv {
        Some(path) => println!("Data source: {}", path.display()),
        None => println!("Data source: bundled sample record"),
    }
    println!(
        "{} regular subjects, {} electives",
        record.regular_subjects.len(),
        record.elective_subjects.len()
    );

    let student = StudentId("demo-001".to_string());
    let records = Arc::new(InMemoryRecordStore::default());
    records.insert(student.clone(), record);

    let keys: Vec<ProgramKey> = registry
        .programs()
        .into_iter()
        .map(|program| {
            ProgramKey::new(program.university, program.year, program.admission, "자유전공학부")
        })
        .collect();

    let service = ScoreService::new(Arc::new(registry), records)
        .with_score_epsilon(config.scoring.score_epsilon);

    let mut scores = Vec::new();
    for key in keys {
        let result = match service.score_student(&student, &key) {
            Ok(result) => result,
            Err(err) => {
                println!("  Scoring unavailable: {}", err);
                return Ok(());
            }
        };
        println!();
        render_score(&key, &result);
        if result.success {
            scores.push(result.score);
        }
    }

    if skip_ranking {
        return Ok(());
    }

    if let Some(first) = scores.first().copied() {
        let peers = synthetic_cohort(first);
        let summary = service.rank_against_cohort(first, &peers);
        println!("\nSimulated cohort");
        render_ranking(first, &summary);
    }

    Ok(())
}

/// Peer scores spread around an anchor score so the ranking has ties on both sides.
fn synthetic_cohort(anchor: f64) -> Vec<f64> {
    [-6.5, -3.0, -1.25, 0.0, 0.0, 0.75, 2.5, 4.0]
        .iter()
        .map(|offset| anchor + offset)
        .collect()
}

fn render_score(key: &ProgramKey, result: &ScoreResult) {
    println!("Program: {}", key);
    if result.success {
        println!(
            "- score {:.2} | total {:.2} | {} subjects counted",
            result.score, result.total_score, result.counted_subjects
        );
        if result.counted_subjects == 0 {
            println!("  No subject matched the program's categories");
        }
    } else {
        println!(
            "- not scored: {}",
            result.error.as_deref().unwrap_or("unknown error")
        );
    }
}

fn render_ranking(score: f64, summary: &RankingSummary) {
    println!(
        "Score {:.2} ranks {} of {} ({} peer(s) share the score)",
        score,
        summary.my_rank,
        summary.peer_count + 1,
        summary.same_score_count
    );
    println!(
        "Peers: min {:.2} | avg {:.2} | max {:.2}",
        summary.min, summary.avg, summary.max
    );
}

fn demo_school_record() -> SchoolRecord {
    let regular = |grade, semester, label: &str, rank, units| SubjectRecord {
        grade,
        semester,
        category_code: label.to_string(),
        rank: Some(rank),
        units,
        raw_score: None,
        average: None,
        stddev: None,
    };

    SchoolRecord {
        regular_subjects: vec![
            regular(1, 1, "국어", 2, 4.0),
            regular(1, 1, "수학", 3, 4.0),
            regular(1, 1, "영어", 2, 4.0),
            regular(1, 1, "통합사회", 3, 3.0),
            regular(1, 1, "통합과학", 2, 3.0),
            regular(1, 2, "국어", 1, 4.0),
            regular(1, 2, "수학", 2, 4.0),
            regular(1, 2, "영어", 2, 4.0),
            regular(1, 2, "한국사", 3, 3.0),
            regular(2, 1, "문학", 2, 4.0),
            regular(2, 1, "수학Ⅰ", 3, 4.0),
            regular(2, 1, "영어Ⅰ", 1, 4.0),
            regular(2, 1, "물리학Ⅰ", 4, 3.0),
            regular(2, 2, "독서", 2, 4.0),
            regular(2, 2, "미적분", 2, 4.0),
            regular(2, 2, "영어Ⅱ", 2, 4.0),
            regular(2, 2, "생활과 윤리", 3, 3.0),
            regular(3, 1, "언어와 매체", 1, 3.0),
            regular(3, 1, "확률과 통계", 3, 3.0),
            regular(3, 2, "영어 독해와 작문", 1, 3.0),
        ],
        elective_subjects: vec![
            ElectiveSubjectRecord {
                grade: 1,
                semester: 1,
                category_code: "음악".to_string(),
                achievement: Some(Achievement::A),
                units: 2.0,
            },
            ElectiveSubjectRecord {
                grade: 2,
                semester: 1,
                category_code: "과학탐구실험".to_string(),
                achievement: Some(Achievement::A),
                units: 1.0,
            },
        ],
    }
}
