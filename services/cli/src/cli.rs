use crate::demo::{run_demo, run_intake, DemoArgs, IntakeArgs};
use clap::{Parser, Subcommand};
use pet_shelter::config::AppConfig;
use pet_shelter::error::AppError;
use pet_shelter::telemetry;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "shelter",
    about = "Register pets and customers and run adoptions against the shelter rules",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a scripted shelter day covering every operation (default command)
    Demo(DemoArgs),
    /// Stock the shelter and process a CSV roster of customers and adoption requests
    Intake(IntakeArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    debug!(
        environment = ?config.environment,
        selection = config.shelter.selection.label(),
        "configuration loaded"
    );

    let command = cli
        .command
        .unwrap_or_else(|| Command::Demo(DemoArgs::default()));

    match command {
        Command::Demo(args) => run_demo(args, config.shelter),
        Command::Intake(args) => run_intake(args, config.shelter),
    }
}
