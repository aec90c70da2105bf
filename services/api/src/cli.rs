use crate::demo::{
    run_demo, run_programs, run_rank, run_score, DemoArgs, ProgramsArgs, RankArgs, ScoreArgs,
};
use crate::server;
use admission_score::error::AppError;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Admission Score Engine",
    about = "Convert school records into admission program scores from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a school record CSV export against one admission program
    Score(ScoreArgs),
    /// Rank a score against a cohort of peer scores
    Rank(RankArgs),
    /// List the registered admission program rules
    Programs(ProgramsArgs),
    /// Run an end-to-end demo covering scoring and cohort ranking
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Program registry JSON file (defaults to APP_PROGRAMS_PATH or the built-in catalogue)
    #[arg(long)]
    pub(crate) programs: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
        Command::Rank(args) => run_rank(args),
        Command::Programs(args) => run_programs(args),
        Command::Demo(args) => run_demo(args),
    }
}
