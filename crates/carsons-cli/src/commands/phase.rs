use anyhow::{Context, Result};
use carsons_algo::build_primitive;
use carsons_cli::GeometryArgs;
use carsons_core::SolverKind;
use tracing::info;

use super::engine::prepare;
use super::report::MatrixOutput;

pub fn handle(args: &GeometryArgs, solver: SolverKind) -> Result<()> {
    let policy = prepare(args)?;
    let primitive =
        build_primitive(policy.as_ref()).context("building primitive impedance matrix")?;

    let backend = solver.build_solver();
    info!(solver = backend.name(), "reducing {}x{}", primitive.dimension(), primitive.dimension());
    let z = primitive
        .reduce_with(backend.as_ref())
        .context("Kron reduction")?;

    MatrixOutput {
        kind: policy.name(),
        frequency_hz: policy.frequency().value(),
        labels: z
            .layout()
            .phases()
            .iter()
            .map(|phase| phase.to_string())
            .collect(),
        matrix: z.matrix(),
        diagnostics: policy.table().diagnostics(),
    }
    .write(args.units, args.format)
}
