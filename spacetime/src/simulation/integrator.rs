//! Fixed-step time integrators over a [`Universe`]
//!
//! `Verlet` is the shipped scheme. `Euler` exists only as the baseline whose
//! energy drift Verlet is measured against.

use crate::simulation::universe::Universe;
use crate::simulation::vector::Vector;

/// A stepping strategy over a universe
pub trait Integrator: Send {
    /// Advance every body by one step of `timestep * dt_scale`
    fn advance(&mut self, universe: &mut Universe, dt_scale: f64);

    fn name(&self) -> &'static str;
}

/// Velocity Verlet (kick-drift-kick)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verlet {
    pub timestep: f64,
}

impl Default for Verlet {
    fn default() -> Self {
        Self { timestep: 1.0 }
    }
}

impl Verlet {
    pub fn new(timestep: f64) -> Self {
        Self { timestep }
    }
}

impl Integrator for Verlet {
    fn advance(&mut self, universe: &mut Universe, dt_scale: f64) {
        if universe.is_empty() {
            return;
        }
        let dt = self.timestep * dt_scale;
        let half_dt2 = 0.5 * dt * dt;

        // a_n must match x_n before we drift
        if !universe.forces_primed() {
            universe.step_forces();
        }

        // Keep a_n around, step_forces overwrites it with a_n+1
        let a_old: Vec<Vector> = universe.bodies().iter().map(|b| b.acceleration).collect();

        // Drift: x_n+1 = x_n + v_n dt + 1/2 a_n dt^2
        for b in universe.bodies_mut().iter_mut().filter(|b| !b.is_static) {
            let displacement = b.velocity * dt + b.acceleration * half_dt2;
            b.displace(displacement);
        }

        // a_n+1 from x_n+1 (static bodies still pull)
        universe.step_forces();

        // Kick: v_n+1 = v_n + 1/2 (a_n + a_n+1) dt
        for (b, a) in universe.bodies_mut().iter_mut().zip(a_old) {
            if b.is_static {
                continue;
            }
            let delta = (a + b.acceleration) * (0.5 * dt);
            b.apply_velocity_delta(delta);
            b.last_acceleration = b.acceleration;
        }
    }

    fn name(&self) -> &'static str {
        "verlet"
    }
}

/// Explicit (forward) Euler
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Euler {
    pub timestep: f64,
}

impl Default for Euler {
    fn default() -> Self {
        Self { timestep: 1.0 }
    }
}

impl Euler {
    pub fn new(timestep: f64) -> Self {
        Self { timestep }
    }
}

impl Integrator for Euler {
    fn advance(&mut self, universe: &mut Universe, dt_scale: f64) {
        if universe.is_empty() {
            return;
        }
        let dt = self.timestep * dt_scale;

        // a_n from x_n
        if !universe.forces_primed() {
            universe.step_forces();
        }

        for b in universe.bodies_mut().iter_mut().filter(|b| !b.is_static) {
            // x_n+1 = x_n + v_n dt, then v_n+1 = v_n + a_n dt
            let displacement = b.velocity * dt;
            b.displace(displacement);
            let delta = b.acceleration * dt;
            b.apply_velocity_delta(delta);
            b.last_acceleration = b.acceleration;
        }

        // a_n+1 and the potentials now describe x_n+1
        universe.step_forces();
    }

    fn name(&self) -> &'static str {
        "euler"
    }
}
