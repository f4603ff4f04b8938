//! Table and JSON rendering of impedance results.

use std::io::{self, Write};

use anyhow::{Context, Result};
use carsons_cli::{OutputFormat, Units};
use carsons_core::units::OhmsPerMeter;
use carsons_core::{Complex64, ComplexMatrix, Diagnostics};
use serde::Serialize;
use tabwriter::TabWriter;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ComplexValue {
    pub re: f64,
    pub im: f64,
}

pub fn unit_label(units: Units) -> &'static str {
    match units {
        Units::Si => "ohm/m",
        Units::Imperial => "ohm/mile",
    }
}

pub fn convert(units: Units, z: Complex64) -> Complex64 {
    match units {
        Units::Si => z,
        Units::Imperial => Complex64::new(
            OhmsPerMeter(z.re).to_ohms_per_mile(),
            OhmsPerMeter(z.im).to_ohms_per_mile(),
        ),
    }
}

pub fn format_complex(units: Units, z: Complex64) -> String {
    let z = convert(units, z);
    match units {
        Units::Si => format!("{:.6e}{:+.6e}j", z.re, z.im),
        Units::Imperial => format!("{:.4}{:+.4}j", z.re, z.im),
    }
}

pub fn complex_value(units: Units, z: Complex64) -> ComplexValue {
    let z = convert(units, z);
    ComplexValue { re: z.re, im: z.im }
}

#[derive(Debug, Serialize)]
struct MatrixReport<'a> {
    kind: &'a str,
    frequency_hz: f64,
    units: &'static str,
    labels: &'a [String],
    matrix: Vec<Vec<ComplexValue>>,
    #[serde(skip_serializing_if = "is_clean")]
    diagnostics: &'a Diagnostics,
}

fn is_clean(diagnostics: &&Diagnostics) -> bool {
    !diagnostics.has_warnings()
}

/// A labelled square matrix ready to print.
pub struct MatrixOutput<'a> {
    pub kind: &'a str,
    pub frequency_hz: f64,
    pub labels: Vec<String>,
    pub matrix: &'a ComplexMatrix,
    pub diagnostics: &'a Diagnostics,
}

impl MatrixOutput<'_> {
    pub fn write(&self, units: Units, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Table => self.write_table(units),
            OutputFormat::Json => self.write_json(units),
        }
    }

    fn write_table(&self, units: Units) -> Result<()> {
        let mut writer = TabWriter::new(io::stdout());
        writeln!(
            writer,
            "{} at {} Hz ({})",
            self.kind,
            self.frequency_hz,
            unit_label(units)
        )?;
        writeln!(writer, "\t{}", self.labels.join("\t"))?;
        for (i, label) in self.labels.iter().enumerate() {
            let row: Vec<String> = (0..self.matrix.cols())
                .map(|j| format_complex(units, self.matrix.get(i, j)))
                .collect();
            writeln!(writer, "{}\t{}", label, row.join("\t"))?;
        }
        writer.flush()?;
        Ok(())
    }

    fn write_json(&self, units: Units) -> Result<()> {
        let report = MatrixReport {
            kind: self.kind,
            frequency_hz: self.frequency_hz,
            units: unit_label(units),
            labels: &self.labels,
            matrix: self
                .matrix
                .to_rows()
                .into_iter()
                .map(|row| row.into_iter().map(|z| complex_value(units, z)).collect())
                .collect(),
            diagnostics: self.diagnostics,
        };
        print_json(&report)
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    serde_json::to_writer_pretty(io::stdout(), value).context("serializing report to JSON")?;
    println!();
    Ok(())
}
