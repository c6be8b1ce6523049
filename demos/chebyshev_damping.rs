//! Example: Damped Chebyshev Methods on Advection-Diffusion
//!
//! Undamped Runge-Kutta-Chebyshev methods have the longest real stability
//! interval (2s²) but their region pinches to a single point at each
//! interior extremum of T_s. Advective eigenvalues sitting slightly off
//! the real axis then fall outside the region, and the maximal stable step
//! collapses. Damping (ε > 0) widens the region around the real axis at
//! the cost of a shorter interval.
//!
//! **Operator**: periodic centered advection-diffusion
//! - a = 1 (velocity), ν = 0.1 (diffusion), L = 1, N = 40
//!
//! **Methods**: first- and second-order RKC, s = 10 stages

use stab_rs::prelude::*;
use stab_rs::methods::ChebyshevOrder;
use stab_rs::solver::real_stability_interval;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("═══════════════════════════════════════════════════════");
    println!("  Chebyshev Damping Study");
    println!("═══════════════════════════════════════════════════════\n");

    // ====== Operator ======

    let operator = CenteredAdvectionDiffusion::new(1.0, 0.1, 1.0, 40)?;
    let spectrum = operator.spectrum()?;
    println!("Operator: {} (Péclet = {:.3})", operator.name(), operator.peclet());
    println!("  {}\n", spectrum);

    let config = SolverConfiguration::default();
    let stages = 10;

    // ====== Damping sweep ======

    for order in [ChebyshevOrder::First, ChebyshevOrder::Second] {
        println!("{} with s = {}:", order.family(), stages);
        println!("{:>8} {:>12} {:>14} {:>16}", "ε", "L(ε)", "h*", "status");

        for damping in [0.0, 0.01, 0.05, 0.1, 0.5] {
            let method = Method::from(ChebyshevFamily::new(stages, damping, order)?);

            let interval = real_stability_interval(&method, &config)?;
            let result = linearly_stable_step_size(&method, &operator, &config)?;

            println!(
                "{:>8} {:>12.4} {:>14.6e} {:>16}",
                damping,
                interval.step_size,
                result.step_size,
                result.status.name()
            );
        }
        println!();
    }

    Ok(())
}
