use anyhow::{Context, Result};
use carsons_algo::PrimitiveBuilder;
use carsons_cli::GeometryArgs;

use super::engine::prepare;
use super::report::MatrixOutput;

pub fn handle(args: &GeometryArgs) -> Result<()> {
    let policy = prepare(args)?;
    let builder = PrimitiveBuilder::for_policy(policy.as_ref());
    let primitive = builder
        .build(policy.as_ref())
        .context("building primitive impedance matrix")?;

    MatrixOutput {
        kind: policy.name(),
        frequency_hz: builder.frequency().value(),
        labels: primitive
            .slots()
            .iter()
            .map(|slot| slot.label.to_string())
            .collect(),
        matrix: primitive.matrix(),
        diagnostics: policy.table().diagnostics(),
    }
    .write(args.units, args.format)
}
