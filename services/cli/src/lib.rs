mod cli;
mod commands;
mod demo;
mod infra;

use realty_registration::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
