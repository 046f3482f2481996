use clap::{Parser, Subcommand};
use realty_registration::config::AppConfig;
use realty_registration::error::AppError;
use realty_registration::telemetry;

use crate::commands::{
    run_format, run_generate, run_rules, run_validate, FormatArgs, GenerateArgs, RulesArgs,
    ValidateArgs,
};
use crate::demo::{run_demo, DemoArgs};

#[derive(Parser, Debug)]
#[command(
    name = "Realty Registration",
    about = "Validate and format registration data for the real-estate network",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a registration form (JSON) or a CSV export of forms
    Validate(ValidateArgs),
    /// Print the canonical rendering of a phone number or identifier
    Format(FormatArgs),
    /// Generate checksum-valid CPF or CNPJ fixtures
    Generate(GenerateArgs),
    /// Show the required fields and document kind per profile
    Rules(RulesArgs),
    /// Run a scripted registration session (default command)
    Demo(DemoArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let command = cli
        .command
        .unwrap_or_else(|| Command::Demo(DemoArgs::default()));

    match command {
        Command::Validate(args) => run_validate(args, &config),
        Command::Format(args) => run_format(args),
        Command::Generate(args) => run_generate(args),
        Command::Rules(args) => run_rules(args, &config),
        Command::Demo(args) => run_demo(args, &config),
    }
}
