//! IEEE 13-node feeder overhead configurations 601, 603 and 605

use carsons_algo::{
    build_primitive, calculate_impedance, calculate_impedance_with, convert_geometric_model,
    OverheadLine, PhaseImpedance,
};
use carsons_core::units::OhmsPerMeter;
use carsons_core::{
    Complex64, ComplexMatrix, ConductorLabel, FaerSolver, Hertz, LineGeometry,
};

const PHASE_R: f64 = 0.000115575;
const PHASE_GMR: f64 = 0.00947938;
const NEUTRAL_R: f64 = 0.000367852;
const NEUTRAL_GMR: f64 = 0.00248107;
const ACSR_R: f64 = 0.000695936;
const ACSR_GMR: f64 = 0.00135941;

/// Configuration 601, phases deliberately listed out of order.
fn config_601(frequency: f64) -> LineGeometry {
    LineGeometry::new()
        .with_conductor("A", PHASE_R, PHASE_GMR, (0.762, 8.5344))
        .with_conductor("C", PHASE_R, PHASE_GMR, (2.1336, 8.5344))
        .with_conductor("B", PHASE_R, PHASE_GMR, (0.0, 8.5344))
        .with_conductor("N", NEUTRAL_R, NEUTRAL_GMR, (1.2192, 7.3152))
        .with_frequency(Hertz(frequency))
}

fn config_603(frequency: f64) -> LineGeometry {
    LineGeometry::new()
        .with_conductor("B", ACSR_R, ACSR_GMR, (2.1336, 8.5344))
        .with_conductor("C", ACSR_R, ACSR_GMR, (0.0, 8.5344))
        .with_conductor("N", ACSR_R, ACSR_GMR, (1.2192, 7.3152))
        .with_frequency(Hertz(frequency))
}

fn config_605(frequency: f64) -> LineGeometry {
    LineGeometry::new()
        .with_conductor("C", ACSR_R, ACSR_GMR, (0.0, 8.8392))
        .with_conductor("N", ACSR_R, ACSR_GMR, (0.1524, 7.3152))
        .with_frequency(Hertz(frequency))
}

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

/// Symmetric 3×3 from its upper triangle, converted with `to_si`.
fn symmetric(upper: [[Complex64; 3]; 3], to_si: fn(f64) -> OhmsPerMeter) -> ComplexMatrix {
    ComplexMatrix::from_fn(3, 3, |i, j| {
        let z = if i <= j { upper[i][j] } else { upper[j][i] };
        c(to_si(z.re).value(), to_si(z.im).value())
    })
}

fn per_mile(upper: [[Complex64; 3]; 3]) -> ComplexMatrix {
    symmetric(upper, OhmsPerMeter::from_ohms_per_mile)
}

fn per_km(upper: [[Complex64; 3]; 3]) -> ComplexMatrix {
    symmetric(upper, OhmsPerMeter::from_ohms_per_kilometer)
}

fn assert_close(actual: &ComplexMatrix, expected: &ComplexMatrix, tol: f64) {
    assert_eq!(actual.rows(), expected.rows());
    assert_eq!(actual.cols(), expected.cols());
    for i in 0..actual.rows() {
        for j in 0..actual.cols() {
            let (a, e) = (actual.get(i, j), expected.get(i, j));
            assert!(
                (a.re - e.re).abs() < tol && (a.im - e.im).abs() < tol,
                "entry ({i}, {j}): got {a}, expected {e}"
            );
        }
    }
}

fn phase_impedance(line: &LineGeometry) -> PhaseImpedance {
    convert_geometric_model(line).expect("phase impedance")
}

const ZERO: Complex64 = Complex64::new(0.0, 0.0);

#[test]
fn config_601_at_60hz() {
    let z = phase_impedance(&config_601(60.0));
    let expected = per_mile([
        [c(0.3465, 1.0179), c(0.1560, 0.5017), c(0.1580, 0.4236)],
        [ZERO, c(0.3375, 1.0478), c(0.1535, 0.3849)],
        [ZERO, ZERO, c(0.3414, 1.0348)],
    ]);
    assert_close(z.matrix(), &expected, 1.5e-6);
    assert!(z.matrix().is_symmetric(1e-15));
}

#[test]
fn config_601_at_50hz() {
    let z = phase_impedance(&config_601(50.0));
    let expected = per_km([
        [c(0.2101, 0.5372), c(0.09171, 0.2691), c(0.09295, 0.2289)],
        [ZERO, c(0.2046, 0.552), c(0.09021, 0.2085)],
        [ZERO, ZERO, c(0.207, 0.5456)],
    ]);
    assert_close(z.matrix(), &expected, 1.5e-6);
}

#[test]
fn config_603_pads_missing_phase_a() {
    let z = phase_impedance(&config_603(60.0));
    let expected = per_mile([
        [ZERO, ZERO, ZERO],
        [ZERO, c(1.3294, 1.3471), c(0.2066, 0.4591)],
        [ZERO, ZERO, c(1.3238, 1.3569)],
    ]);
    assert_close(z.matrix(), &expected, 1.5e-6);
    for k in 0..3 {
        assert_eq!(z.matrix().get(0, k), ZERO);
        assert_eq!(z.matrix().get(k, 0), ZERO);
    }

    let z = phase_impedance(&config_603(50.0));
    let expected = per_km([
        [ZERO, ZERO, ZERO],
        [ZERO, c(0.8128, 0.7144), c(0.1153, 0.2543)],
        [ZERO, ZERO, c(0.8097, 0.7189)],
    ]);
    assert_close(z.matrix(), &expected, 1.5e-6);
}

#[test]
fn config_605_single_phase() {
    let z = phase_impedance(&config_605(60.0));
    let expected = per_mile([
        [ZERO, ZERO, ZERO],
        [ZERO, ZERO, ZERO],
        [ZERO, ZERO, c(1.3292, 1.3475)],
    ]);
    assert_close(z.matrix(), &expected, 1.5e-6);

    let z = phase_impedance(&config_605(50.0));
    let expected = per_km([
        [ZERO, ZERO, ZERO],
        [ZERO, ZERO, ZERO],
        [ZERO, ZERO, c(0.8127, 0.7146)],
    ]);
    assert_close(z.matrix(), &expected, 1.5e-6);
}

#[test]
fn config_601_primitive_matrix() {
    let primitive = build_primitive(&OverheadLine::new(&config_601(60.0)).unwrap()).unwrap();
    assert_eq!(primitive.dimension(), 4);

    let diag = c(1.74792626e-4, 0.00085989);
    let neutral = c(4.27069626e-4, 0.00096095);
    let expected = ComplexMatrix::from_rows(vec![
        vec![diag, c(5.92176264e-5, 0.00052913), c(5.92176264e-5, 0.00048481), c(5.92176264e-5, 0.00048873)],
        vec![c(5.92176264e-5, 0.00052913), diag, c(5.92176264e-5, 0.0004515), c(5.92176264e-5, 0.00046756)],
        vec![c(5.92176264e-5, 0.00048481), c(5.92176264e-5, 0.0004515), diag, c(5.92176264e-5, 0.00047687)],
        vec![c(5.92176264e-5, 0.00048873), c(5.92176264e-5, 0.00046756), c(5.92176264e-5, 0.00047687), neutral],
    ])
    .unwrap();
    assert_close(primitive.matrix(), &expected, 1e-7);

    let n = ConductorLabel::neutral("N").unwrap();
    assert_eq!(primitive.get(&n, &n), Some(primitive.matrix().get(3, 3)));
}

#[test]
fn config_605_primitive_keeps_absent_slots() {
    let primitive = build_primitive(&OverheadLine::new(&config_605(60.0)).unwrap()).unwrap();
    assert_eq!(primitive.dimension(), 4);

    let self_z = c(7.5515e-4, 0.00100631);
    let mutual = c(5.9217e-5, 0.00047649);
    let expected = ComplexMatrix::from_rows(vec![
        vec![ZERO, ZERO, ZERO, ZERO],
        vec![ZERO, ZERO, ZERO, ZERO],
        vec![ZERO, ZERO, self_z, mutual],
        vec![ZERO, ZERO, mutual, self_z],
    ])
    .unwrap();
    assert_close(primitive.matrix(), &expected, 1e-7);
}

#[test]
fn mutual_resistance_scales_with_frequency() {
    let at_60 = build_primitive(&OverheadLine::new(&config_601(60.0)).unwrap()).unwrap();
    let at_50 = build_primitive(&OverheadLine::new(&config_601(50.0)).unwrap()).unwrap();

    for i in 0..4 {
        for j in 0..4 {
            if i == j {
                continue;
            }
            let expected = at_60.matrix().get(i, j).re * 50.0 / 60.0;
            assert!((at_50.matrix().get(i, j).re - expected).abs() < 1e-12);
        }
    }
}

#[test]
fn malformed_neutral_label_is_skipped() {
    let line = LineGeometry::new()
        .with_conductor("A", PHASE_R, PHASE_GMR, (0.762, 8.5344))
        .with_conductor("B", PHASE_R, PHASE_GMR, (2.1336, 8.5344))
        .with_conductor("C", PHASE_R, PHASE_GMR, (0.0, 8.5344))
        .with_conductor("N1", NEUTRAL_R, NEUTRAL_GMR, (0.0, 7.3152))
        .with_conductor("pN2", NEUTRAL_R, NEUTRAL_GMR, (1.2192, 7.3152));

    let policy = OverheadLine::new(&line).unwrap();
    let primitive = build_primitive(&policy).unwrap();
    assert_eq!(primitive.dimension(), 4);
    assert!(carsons_algo::GeometryPolicy::table(&policy)
        .diagnostics()
        .has_warnings());

    let without = LineGeometry::new()
        .with_conductor("A", PHASE_R, PHASE_GMR, (0.762, 8.5344))
        .with_conductor("B", PHASE_R, PHASE_GMR, (2.1336, 8.5344))
        .with_conductor("C", PHASE_R, PHASE_GMR, (0.0, 8.5344))
        .with_conductor("N1", NEUTRAL_R, NEUTRAL_GMR, (0.0, 7.3152));
    let expected = build_primitive(&OverheadLine::new(&without).unwrap()).unwrap();
    assert_eq!(primitive.matrix(), expected.matrix());
}

#[test]
fn dual_neutral_line() {
    let line = LineGeometry::new()
        .with_conductor("A", PHASE_R, PHASE_GMR, (0.762, 8.5344))
        .with_conductor("B", PHASE_R, PHASE_GMR, (2.1336, 8.5344))
        .with_conductor("C", PHASE_R, PHASE_GMR, (0.0, 8.5344))
        .with_conductor("N1", NEUTRAL_R, NEUTRAL_GMR, (0.0, 7.3152))
        .with_conductor("N2", NEUTRAL_R, NEUTRAL_GMR, (1.2192, 7.3152));

    let primitive = build_primitive(&OverheadLine::new(&line).unwrap()).unwrap();
    assert_eq!(primitive.dimension(), 5);

    let z = primitive.reduce().unwrap();
    assert!(z.matrix().is_symmetric(1e-15));
    assert!(z.matrix().is_finite());
}

#[test]
fn balanced_line_has_equal_self_and_mutual_terms() {
    // equilateral triangle with the neutral at its centroid
    let h = 10.0 + 3.0_f64.sqrt() / 2.0;
    let line = LineGeometry::new()
        .with_conductor("A", PHASE_R, PHASE_GMR, (-0.5, 10.0))
        .with_conductor("B", PHASE_R, PHASE_GMR, (0.5, 10.0))
        .with_conductor("C", PHASE_R, PHASE_GMR, (0.0, h))
        .with_conductor("N", PHASE_R, PHASE_GMR, (0.0, (20.0 + h) / 3.0));
    let z = phase_impedance(&line);

    let m = z.matrix();
    let tol = 1e-12;
    assert!((m.get(0, 0) - m.get(1, 1)).norm() < tol);
    assert!((m.get(0, 0) - m.get(2, 2)).norm() < tol);
    assert!((m.get(0, 1) - m.get(0, 2)).norm() < tol);
    assert!((m.get(0, 1) - m.get(1, 2)).norm() < tol);

    let seq = z.sequence().unwrap();
    assert!(seq.matrix()[1][2].norm() < tol);
    assert!(seq.matrix()[0][1].norm() < tol);
}

#[test]
fn config_601_sequence_impedances() {
    let seq = phase_impedance(&config_601(60.0)).sequence().unwrap();

    let to_mile = |z: Complex64| {
        c(
            OhmsPerMeter(z.re).to_ohms_per_mile(),
            OhmsPerMeter(z.im).to_ohms_per_mile(),
        )
    };
    assert!((to_mile(seq.zero()) - c(0.6535, 1.9078)).norm() < 2e-3);
    assert!((to_mile(seq.positive()) - c(0.1861, 0.5976)).norm() < 2e-3);
    assert!((seq.positive() - seq.negative()).norm() < 1e-6);
}

#[test]
fn solvers_agree() {
    let line = config_601(60.0);
    let policy = OverheadLine::new(&line).unwrap();

    let gauss = calculate_impedance(&policy).unwrap();
    let faer = calculate_impedance_with(&policy, &FaerSolver).unwrap();
    assert_close(gauss.matrix(), faer.matrix(), 1e-12);
}
