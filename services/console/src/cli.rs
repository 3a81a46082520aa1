use crate::demo::{run_demo, DemoArgs};
use crate::report::{run_replay, run_score, ReplayArgs, ScoreArgs};
use clap::{Parser, Subcommand};
use er_triage::config::AppConfig;
use er_triage::error::AppError;
use er_triage::telemetry;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "ER Triage Console",
    about = "Score vital signs and inspect the emergency department queue from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a set of vital signs and show the priority tier
    Score(ScoreArgs),
    /// Replay a CSV event log and print the resulting queue and census
    Replay(ReplayArgs),
    /// Run a simulated shift through the queue (default command)
    Demo(DemoArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    info!(
        ?config.environment,
        department = %config.triage.department,
        "triage console starting"
    );

    let command = cli
        .command
        .unwrap_or_else(|| Command::Demo(DemoArgs::default()));

    match command {
        Command::Score(args) => run_score(args),
        Command::Replay(args) => run_replay(args, &config.triage.department),
        Command::Demo(args) => run_demo(args, &config.triage.department),
    }
}
