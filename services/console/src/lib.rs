mod cli;
mod demo;
mod infra;
mod report;

use er_triage::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
