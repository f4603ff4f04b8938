use std::io::{self, Write};

use anyhow::{Context, Result};
use carsons_algo::build_primitive;
use carsons_cli::{GeometryArgs, OutputFormat};
use carsons_core::SolverKind;
use serde::Serialize;
use tabwriter::TabWriter;

use super::engine::prepare;
use super::report::{complex_value, format_complex, print_json, unit_label, ComplexValue};

#[derive(Debug, Serialize)]
struct SequenceReport {
    kind: &'static str,
    frequency_hz: f64,
    units: &'static str,
    zero: ComplexValue,
    positive: ComplexValue,
    negative: ComplexValue,
    matrix: Vec<Vec<ComplexValue>>,
}

pub fn handle(args: &GeometryArgs, solver: SolverKind) -> Result<()> {
    let policy = prepare(args)?;
    let z = build_primitive(policy.as_ref())
        .context("building primitive impedance matrix")?
        .reduce_with(solver.build_solver().as_ref())
        .context("Kron reduction")?;
    let seq = z.sequence().context("sequence transform")?;

    let units = args.units;
    match args.format {
        OutputFormat::Json => print_json(&SequenceReport {
            kind: policy.name(),
            frequency_hz: policy.frequency().value(),
            units: unit_label(units),
            zero: complex_value(units, seq.zero()),
            positive: complex_value(units, seq.positive()),
            negative: complex_value(units, seq.negative()),
            matrix: seq
                .matrix()
                .iter()
                .map(|row| row.iter().map(|&v| complex_value(units, v)).collect())
                .collect(),
        }),
        OutputFormat::Table => {
            let mut writer = TabWriter::new(io::stdout());
            writeln!(writer, "SEQUENCE\tIMPEDANCE ({})", unit_label(units))?;
            writeln!(writer, "zero\t{}", format_complex(units, seq.zero()))?;
            writeln!(writer, "positive\t{}", format_complex(units, seq.positive()))?;
            writeln!(writer, "negative\t{}", format_complex(units, seq.negative()))?;
            writer.flush()?;
            Ok(())
        }
    }
}
