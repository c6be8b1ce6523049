//! Example: Stability Region Export
//!
//! Traces the stability region boundaries of several methods and writes
//! them to CSV files for plotting with an external tool, together with the
//! scaled spectrum of an upwind discretization at its maximal stable step.
//!
//! Files are written to the system temporary directory:
//! - `region_<method>.csv`: angle, radius, re, im
//! - `spectrum_rk4_upwind.csv`: re, im, amplification

use stab_rs::prelude::*;
use stab_rs::output::{CsvConfig, CsvExporter, Exporter};
use stab_rs::solver::trace_stability_boundary;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("═══════════════════════════════════════════════════════");
    println!("  Stability Region Export");
    println!("═══════════════════════════════════════════════════════\n");

    let tmp_dir = std::env::temp_dir();
    let config = SolverConfiguration::default();
    let exporter = CsvExporter::new(CsvConfig::default().precision(8).with_header());

    // ====== Boundaries ======

    let methods = vec![
        ("forward_euler", Method::forward_euler()),
        ("ssp_rk3", Method::by_name("ssp_rk3")?),
        ("rk4", Method::classical_rk4()),
        ("rkc1_s5", Method::chebyshev(5, 0.05)?),
    ];

    for (label, method) in &methods {
        let boundary = trace_stability_boundary(method, 720, &config)?;
        let path = tmp_dir.join(format!("region_{}.csv", label));
        let path = path.to_string_lossy();

        exporter.export_boundary(&boundary, &path)?;
        println!(
            "  {:<28} max radius {:>10.4}  → {}",
            boundary.method_name(),
            boundary.max_radius().unwrap_or(f64::NAN),
            path
        );
    }

    // ====== Scaled spectrum ======

    let rk4 = Method::classical_rk4();
    let operator = UpwindAdvection::new(1.0, 1.0, 64)?;
    let result = linearly_stable_step_size(&rk4, &operator, &config)?;

    let path = tmp_dir.join("spectrum_rk4_upwind.csv");
    let path = path.to_string_lossy();
    exporter.export_spectrum(&rk4, &result, &path)?;

    println!("\n  h* = {:.6e} ({})  → {}", result.step_size, result.status, path);

    Ok(())
}
