use std::time::Instant;

use crate::simulation::forces::NewtonianGravity;
use crate::simulation::integrator::{Euler, Integrator, Verlet};
use crate::simulation::states::Body;
use crate::simulation::universe::Universe;
use crate::simulation::vector::Vector;

/// Time the direct force pass and a full Verlet step for a range of n
/// Paste output directly into a spreadsheet to graph
pub fn bench_gravity() {
    println!("N,forces_ms,verlet_ms");

    for n in [10, 20, 40, 80, 160, 320] {
        let steps = if n <= 80 { 50 } else { 5 };
        let mut universe = make_universe(n);
        let mut verlet = Verlet::new(0.001);

        // Warm up
        universe.step_forces();

        let t0 = Instant::now();
        for _ in 0..steps {
            universe.step_forces();
        }
        let ms_forces = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        let t1 = Instant::now();
        for _ in 0..steps {
            verlet.advance(&mut universe, 1.0);
        }
        let ms_verlet = t1.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6},{:.6}", n, ms_forces, ms_verlet);
    }
}

/// Relative drift of kinetic + potential energy for a circular binary,
/// Verlet against explicit Euler on identical inputs
pub fn bench_energy_drift(steps: usize) -> (f64, f64) {
    let verlet = relative_energy_drift(&mut Verlet::new(0.02), circular_binary(), steps);
    let euler = relative_energy_drift(&mut Euler::new(0.02), circular_binary(), steps);

    println!("integrator,steps,max_relative_drift");
    println!("verlet,{},{:.3e}", steps, verlet);
    println!("euler,{},{:.3e}", steps, euler);

    (verlet, euler)
}

/// Largest |E - E0| / |E0| seen while stepping `universe` `steps` times
pub fn relative_energy_drift(integrator: &mut dyn Integrator, mut universe: Universe, steps: usize) -> f64 {
    universe.step_forces();
    universe.refresh_energy_values();
    let [k0, p0] = universe.total_energy();
    let e0 = k0 + p0;

    let mut worst: f64 = 0.0;
    for _ in 0..steps {
        integrator.advance(&mut universe, 1.0);
        universe.refresh_energy_values();
        let [k, p] = universe.total_energy();
        worst = worst.max(((k + p) - e0).abs() / e0.abs());
    }
    worst
}

/// Two unit masses 2 apart with G = 1 on a circular orbit around the origin
pub fn circular_binary() -> Universe {
    // each body circles at r = 1: v^2 / r = G m / (2r)^2  =>  v = 0.5
    let mut universe = Universe::new(NewtonianGravity::new(1.0), 2048);
    universe.insert(Body::new("left", 1.0, 0.05, Vector::planar(-1.0, 0.0), Vector::planar(0.0, -0.5)));
    universe.insert(Body::new("right", 1.0, 0.05, Vector::planar(1.0, 0.0), Vector::planar(0.0, 0.5)));
    universe
}

/// Helper to build a universe of size `n` on deterministic positions
fn make_universe(n: usize) -> Universe {
    let mut universe = Universe::new(NewtonianGravity::new(0.1), 16);

    for i in 0..n {
        let i_f = i as f64;
        // deterministic positions, no rand needed
        let x = Vector::new(
            (i_f * 0.37).sin() * 5.0,
            (i_f * 0.13).cos() * 5.0,
            (i_f * 0.07).sin() * 5.0,
        );
        universe.insert(Body::new(format!("body-{i}"), 1.0, 0.01, x, Vector::zeros()));
    }
    universe
}
