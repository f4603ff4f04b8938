use carsons_algo::Truncation;
use carsons_core::SolverKind;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum, ValueHint};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Series impedance of overhead lines and cables", long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "warn")]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the primitive impedance matrix of every modeled conductor
    Primitive {
        #[command(flatten)]
        geometry: GeometryArgs,
    },
    /// Print the Kron-reduced phase impedance matrix
    Phase {
        #[command(flatten)]
        geometry: GeometryArgs,
        /// Linear solver used for the reduction
        #[arg(long, default_value = "gauss")]
        solver: SolverKind,
    },
    /// Print the zero/positive/negative sequence impedances
    Sequence {
        #[command(flatten)]
        geometry: GeometryArgs,
        /// Linear solver used for the reduction
        #[arg(long, default_value = "gauss")]
        solver: SolverKind,
    },
}

#[derive(Args, Debug, Clone)]
pub struct GeometryArgs {
    /// Line geometry file (.toml or .json)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub geometry: PathBuf,

    /// Construction of the line
    #[arg(long, value_enum, default_value_t = GeometryKind::Overhead)]
    pub kind: GeometryKind,

    /// Override the frequency stored in the geometry file (Hz)
    #[arg(long)]
    pub frequency: Option<f64>,

    /// Carson series truncation for overhead lines (modified, full)
    #[arg(long)]
    pub truncation: Option<Truncation>,

    /// Units for printed impedances
    #[arg(long, value_enum, default_value_t = Units::Si)]
    pub units: Units,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum GeometryKind {
    Overhead,
    ConcentricNeutral,
    TapeShield,
    MultiConductor,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Units {
    /// Ω/m
    Si,
    /// Ω/mile
    Imperial,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        build_cli_command().debug_assert();
    }

    #[test]
    fn test_parses_phase_command() {
        let cli = Cli::try_parse_from([
            "carsons",
            "phase",
            "--geometry",
            "line.toml",
            "--kind",
            "concentric-neutral",
            "--solver",
            "faer",
            "--units",
            "imperial",
        ])
        .unwrap();

        match cli.command {
            Commands::Phase { geometry, solver } => {
                assert_eq!(geometry.kind, GeometryKind::ConcentricNeutral);
                assert_eq!(geometry.units, Units::Imperial);
                assert_eq!(geometry.format, OutputFormat::Table);
                assert_eq!(solver, SolverKind::Faer);
                assert!(geometry.truncation.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(cli.log_level, tracing::Level::WARN);
    }

    #[test]
    fn test_rejects_unknown_truncation() {
        let result = Cli::try_parse_from([
            "carsons",
            "primitive",
            "--geometry",
            "line.toml",
            "--truncation",
            "partial",
        ]);
        assert!(result.is_err());
    }
}
