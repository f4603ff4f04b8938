pub mod cli;

pub use cli::{build_cli_command, Cli, Commands, GeometryArgs, GeometryKind, OutputFormat, Units};
