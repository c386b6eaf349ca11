//! Pairwise Newtonian gravity for the direct O(n^2) force pass
//!
//! Every unordered pair (i, j) with i < j is visited exactly once. The pair
//! produces equal and opposite forces, so body i gains `+F/m_i` toward j and
//! body j gains `-F/m_j`. The pair potential `-G m_i m_j / r` is split evenly
//! between the two bodies so that the per-body values sum to the total.

use log::debug;

use crate::simulation::states::Body;
use crate::simulation::vector::Vector;

pub const GRAVITATIONAL_CONSTANT: f64 = 6.674e-11; // m^3 kg^-1 s^-2

/// Result of evaluating one pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairInteraction {
    pub accel_a: Vector, // acceleration on the first body, toward the second
    pub accel_b: Vector, // acceleration on the second body, toward the first
    pub potential: f64,  // -G m_a m_b / r for the whole pair
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonianGravity {
    pub g: f64, // gravitational constant
}

impl Default for NewtonianGravity {
    fn default() -> Self {
        Self {
            g: GRAVITATIONAL_CONSTANT,
        }
    }
}

impl NewtonianGravity {
    pub fn new(g: f64) -> Self {
        Self { g }
    }

    /// Evaluate gravity between `a` and `b`
    ///
    /// Coincident bodies have no defined direction; the pair is skipped and
    /// `None` is returned instead of producing an infinite force.
    pub fn interaction(&self, a: &Body, b: &Body) -> Option<PairInteraction> {
        let r2 = (b.position - a.position).magnitude_squared();
        if r2 == 0.0 {
            debug!("skipping coincident pair '{}' / '{}'", a.id(), b.id());
            return None;
        }
        let Some(direction) = a.direction_to(b) else {
            debug!("no direction between '{}' and '{}', pair skipped", a.id(), b.id());
            return None;
        };

        let r = r2.sqrt();
        let force = self.g * a.mass * b.mass / r2;

        Some(PairInteraction {
            accel_a: direction * (force / a.mass),
            accel_b: direction * (-force / b.mass),
            potential: -self.g * a.mass * b.mass / r,
        })
    }

    /// Sum every pair's contribution into `accel` and `potential`
    /// - both buffers are zeroed first and must have one slot per body
    pub fn accumulate(&self, bodies: &[Body], accel: &mut [Vector], potential: &mut [f64]) {
        for a in accel.iter_mut() {
            *a = Vector::zeros();
        }
        for p in potential.iter_mut() {
            *p = 0.0;
        }

        let n = bodies.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let Some(pair) = self.interaction(&bodies[i], &bodies[j]) else {
                    continue;
                };
                accel[i] += pair.accel_a;
                accel[j] += pair.accel_b;

                let half = 0.5 * pair.potential;
                potential[i] += half;
                potential[j] += half;
            }
        }
    }
}
