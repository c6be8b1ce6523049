//! Step sizes of classical methods on model discretizations
//!
//! These tests reproduce the textbook CFL behaviour of explicit methods:
//! the step size follows the grid spacing, damping widens Chebyshev
//! regions, and a growing mode leaves no room at all.

use approx::assert_relative_eq;
use num_complex::Complex64;
use stab_rs::methods::{Method, StabilityFunction};
use stab_rs::operators::{CenteredAdvectionDiffusion, UpwindAdvection};
use stab_rs::output::{CsvConfig, CsvExporter, Exporter};
use stab_rs::solver::SolveStatus;
use std::fs;
use tempfile::NamedTempFile;

mod common;
use common::{relative_error, solve, FixedSpectrum};

#[test]
fn test_rk4_upwind_step_halves_with_grid() {
    // h*·N is fixed by the θ = π mode at -2a/Δx
    let rk4 = Method::classical_rk4();
    let mut previous: Option<f64> = None;

    for points in [20, 40, 80] {
        let operator = UpwindAdvection::new(1.0, 1.0, points).unwrap();
        let result = solve(&rk4, &operator);

        assert_eq!(result.status, SolveStatus::Converged);
        let cfl = result.step_size * points as f64;
        println!("N = {}: h* = {:.6e}, h*·N = {:.6}", points, result.step_size, cfl);
        assert!(relative_error(cfl, 1.39265) < 1e-4);

        if let Some(coarse) = previous {
            assert!(relative_error(coarse / result.step_size, 2.0) < 1e-8);
        }
        previous = Some(result.step_size);
    }
}

#[test]
fn test_rk4_upwind_step_scales_with_velocity() {
    let rk4 = Method::classical_rk4();
    let slow = solve(&rk4, &UpwindAdvection::new(1.0, 1.0, 40).unwrap());
    let fast = solve(&rk4, &UpwindAdvection::new(-4.0, 1.0, 40).unwrap());

    assert_relative_eq!(slow.step_size / fast.step_size, 4.0, epsilon = 1e-8);
}

#[test]
fn test_damping_widens_chebyshev_step() {
    let operator = CenteredAdvectionDiffusion::new(1.0, 0.1, 1.0, 40).unwrap();

    let undamped = solve(&Method::chebyshev(10, 0.0).unwrap(), &operator);
    let light = solve(&Method::chebyshev(10, 0.05).unwrap(), &operator);
    let heavy = solve(&Method::chebyshev(10, 0.5).unwrap(), &operator);

    println!(
        "RKC1 s=10: eps=0 {:.6e}, eps=0.05 {:.6e}, eps=0.5 {:.6e}",
        undamped.step_size, light.step_size, heavy.step_size
    );

    for result in [&undamped, &light, &heavy] {
        assert_eq!(result.status, SolveStatus::Converged);
    }

    // Without damping the advective eigenvalues hit the touching points
    // of the undamped region near the real axis
    assert!(relative_error(undamped.step_size, 0.0076195) < 1e-3);
    assert!(light.step_size / undamped.step_size > 3.0);
    assert!(heavy.step_size / undamped.step_size > 10.0);
}

#[test]
fn test_damping_raises_step_on_growing_advective_spectrum() {
    // Advective modes over [-5i, 5i], all shifted to Re λ = +1e-9
    let eigenvalues: Vec<Complex64> = (0..39)
        .map(|k| Complex64::new(1e-9, -5.0 + 10.0 * k as f64 / 38.0))
        .collect();
    let operator = FixedSpectrum::new("Weakly growing advection", eigenvalues);

    let steps: Vec<f64> = [0.0, 0.05, 0.5]
        .iter()
        .map(|&damping| {
            let result = solve(&Method::chebyshev(10, damping).unwrap(), &operator);
            assert_eq!(result.status, SolveStatus::Converged);
            result.step_size
        })
        .collect();

    println!("RKC1 s=10 on Re λ = 1e-9: {:?}", steps);

    // Undamped: only the amplification tolerance admits any step
    assert!(steps[0] > 0.0);
    assert!(steps[0] < 1e-5);

    assert!(steps[1] > steps[0]);
    assert!(steps[2] > steps[1]);
}

#[test]
fn test_reaction_growth_collapses_step() {
    let base = CenteredAdvectionDiffusion::new(1.0, 0.1, 1.0, 40).unwrap();
    let growing = base.clone().with_reaction(1e-3).unwrap();

    for method in [Method::classical_rk4(), Method::chebyshev(10, 0.0).unwrap()] {
        let stable = solve(&method, &base);
        let collapsed = solve(&method, &growing);

        // The θ = 0 mode sits at +1e-3: only the amplification tolerance
        // keeps any step admissible
        println!(
            "{}: h* without reaction {:e}, with reaction {:e}",
            method.name(),
            stable.step_size,
            collapsed.step_size
        );
        assert!(stable.step_size > 1e-3);
        assert!(collapsed.step_size < 1e-6);
    }
}

#[test]
fn test_export_upwind_spectrum() {
    let rk4 = Method::classical_rk4();
    let operator = UpwindAdvection::new(1.0, 1.0, 40).unwrap();
    let result = solve(&rk4, &operator);

    let file = NamedTempFile::new().unwrap();
    let path = file.path().to_str().unwrap();
    CsvExporter::new(CsvConfig::high_precision().with_header())
        .export_spectrum(&rk4, &result, path)
        .unwrap();

    let content = fs::read_to_string(path).unwrap();
    assert!(content.contains("# Operator: Upwind advection"));

    let rows: Vec<Vec<f64>> = content
        .lines()
        .filter(|l| !l.starts_with('#'))
        .skip(1)
        .map(|l| l.split(',').map(|v| v.parse().unwrap()).collect())
        .collect();

    assert_eq!(rows.len(), 40);
    let largest = rows.iter().map(|row| row[2]).fold(0.0, f64::max);
    assert!(largest <= 1.0 + 1e-9);
    assert!(largest > 1.0 - 1e-6);
}
