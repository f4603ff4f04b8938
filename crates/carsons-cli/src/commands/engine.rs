//! Geometry loading and policy selection shared by every command.

use anyhow::{bail, Context, Result};
use carsons_algo::{
    ConcentricNeutralCable, GeometryPolicy, MultiConductorCable, OverheadLine, TapeShieldedCable,
};
use carsons_cli::{GeometryArgs, GeometryKind};
use carsons_core::{Hertz, LineGeometry};
use tracing::{info, warn};

pub fn load_geometry(args: &GeometryArgs) -> Result<LineGeometry> {
    let path = &args.geometry;
    if !path.exists() {
        bail!("geometry file '{}' does not exist", path.display());
    }
    let mut geometry = LineGeometry::from_path(path)
        .with_context(|| format!("loading line geometry from {}", path.display()))?;

    if let Some(frequency) = args.frequency {
        if !(frequency.is_finite() && frequency > 0.0) {
            bail!("frequency must be positive, got {frequency}");
        }
        geometry.frequency = Hertz(frequency);
    }
    info!(
        conductors = geometry.phases.len(),
        frequency = %geometry.frequency,
        "loaded {}",
        path.display()
    );
    Ok(geometry)
}

pub fn build_policy(args: &GeometryArgs, geometry: &LineGeometry) -> Result<Box<dyn GeometryPolicy>> {
    if args.truncation.is_some() && args.kind != GeometryKind::Overhead {
        warn!(kind = ?args.kind, "--truncation only applies to overhead lines; ignoring");
    }

    let policy: Box<dyn GeometryPolicy> = match args.kind {
        GeometryKind::Overhead => {
            let line = OverheadLine::new(geometry).context("building overhead line")?;
            Box::new(match args.truncation {
                Some(truncation) => line.with_truncation(truncation),
                None => line,
            })
        }
        GeometryKind::ConcentricNeutral => Box::new(
            ConcentricNeutralCable::new(geometry).context("building concentric-neutral cable")?,
        ),
        GeometryKind::TapeShield => Box::new(
            TapeShieldedCable::with_concentric_neutrals(geometry)
                .context("building tape-shielded cable")?,
        ),
        GeometryKind::MultiConductor => Box::new(
            MultiConductorCable::new(geometry).context("building multi-conductor cable")?,
        ),
    };

    let diagnostics = policy.table().diagnostics();
    if diagnostics.has_warnings() {
        warn!(kind = policy.name(), "geometry loaded with {}", diagnostics.summary());
    }
    Ok(policy)
}

/// Load the geometry file and build the policy for `args.kind`.
pub fn prepare(args: &GeometryArgs) -> Result<Box<dyn GeometryPolicy>> {
    let geometry = load_geometry(args)?;
    build_policy(args, &geometry)
}
