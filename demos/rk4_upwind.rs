//! Example: RK4 on Upwind Advection - CFL Scaling
//!
//! Computes the maximal stable step of the classical Runge-Kutta method on
//! the periodic first-order upwind discretization of u_t + a u_x = 0 for a
//! sequence of grids, and compares it with the CFL limit predicted by the
//! real stability interval of RK4:
//!
//! ```text
//! h* = L_RK4 · Δx / (2|a|) ≈ 1.3926 · Δx / |a|
//! ```
//!
//! The analytic spectrum is cross-checked against a Schur decomposition of
//! the assembled matrix.

use stab_rs::prelude::*;
use stab_rs::solver::real_stability_interval;

use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("═══════════════════════════════════════════════════════");
    println!("  RK4 + Upwind Advection - Maximal Stable Step");
    println!("═══════════════════════════════════════════════════════\n");

    // ====== Problem parameters ======

    let velocity = 1.0;     // Advection velocity [m/s]
    let length = 1.0;       // Periodic domain length [m]

    let method = Method::classical_rk4();
    let config = SolverConfiguration::default();

    let interval = real_stability_interval(&method, &config)?;
    println!("Method: {}", method.name());
    println!("  Real stability interval : [-{:.6}, 0]\n", interval.step_size);

    // ====== Grid sweep ======

    println!("{:>6} {:>14} {:>14} {:>10} {:>8}", "N", "h*", "CFL = a·h*/Δx", "evals", "status");

    for points in [20, 40, 80, 160] {
        let operator = UpwindAdvection::new(velocity, length, points)?;
        let result = linearly_stable_step_size(&method, &operator, &config)?;

        let cfl = velocity * result.step_size / operator.spacing();
        println!(
            "{:>6} {:>14.6e} {:>14.6} {:>10} {:>8}",
            points,
            result.step_size,
            cfl,
            result.evaluations,
            result.status.name()
        );
    }

    // ====== Analytic vs computed spectrum ======

    println!("\n═══════════════════════════════════════════════════════");
    println!("  Analytic spectrum vs Schur decomposition (N = 80)");
    println!("═══════════════════════════════════════════════════════\n");

    let operator = UpwindAdvection::new(velocity, length, 80)?;

    let start = Instant::now();
    let analytic = linearly_stable_step_size(&method, &operator, &config)?;
    let analytic_time = start.elapsed();

    let start = Instant::now();
    let assembled = MatrixOperator::named(operator.matrix(), "Upwind advection (assembled)")?;
    let computed = linearly_stable_step_size(&method, &assembled, &config)?;
    let computed_time = start.elapsed();

    println!("  Analytic : h* = {:.10e} ({:?})", analytic.step_size, analytic_time);
    println!("  Schur    : h* = {:.10e} ({:?})", computed.step_size, computed_time);
    println!(
        "  Relative difference: {:.2e}",
        (analytic.step_size - computed.step_size).abs() / analytic.step_size
    );

    Ok(())
}
