use clap::Parser;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::FmtSubscriber;

use carsons_cli::{Cli, Commands};

mod commands;

fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Primitive { geometry } => commands::primitive::handle(geometry),
        Commands::Phase { geometry, solver } => commands::phase::handle(geometry, *solver),
        Commands::Sequence { geometry, solver } => commands::sequence::handle(geometry, *solver),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install logger: {err}");
    }
    debug!(command = ?cli.command, "starting carsons");

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        }
    }
}
