use crate::report::{run_analyze, run_plan, AnalyzeArgs, PlanArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use rent_navi::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "rent-navi",
    about = "Recommend affordable rental areas in Japan from a salary or a rent budget",
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
    /// Run the quick analysis for a monthly salary
    Analyze(AnalyzeArgs),
    /// Run the multi-step planner for a salary or a student budget
    Plan(PlanArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the directory holding prefectures.json and details/
    #[arg(long)]
    pub(crate) catalog_dir: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Analyze(args) => run_analyze(args).await,
        Command::Plan(args) => run_plan(args).await,
    }
}
