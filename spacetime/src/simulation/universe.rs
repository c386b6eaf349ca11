//! The body container and everything derived from it
//!
//! `Universe` owns the bodies (unique ids, insertion order kept so energy sums
//! are deterministic), runs the force pass, and derives energies and the
//! center of mass. Derived values are only ever recomputed from body state.

use std::collections::{HashMap, VecDeque};

use log::{info, warn};

use crate::configuration::config::BodyConfig;
use crate::error::EngineError;
use crate::simulation::forces::NewtonianGravity;
use crate::simulation::states::Body;
use crate::simulation::vector::Vector;

pub const DEFAULT_HISTORY_CAPACITY: usize = 1000;

/// Fixed-capacity ring of `[kinetic, potential]` samples, oldest evicted first
#[derive(Debug, Clone)]
pub struct EnergyHistory {
    samples: VecDeque<[f64; 2]>,
    capacity: usize,
}

impl EnergyHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, sample: [f64; 2]) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latest(&self) -> Option<[f64; 2]> {
        self.samples.back().copied()
    }

    /// Oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &[f64; 2]> {
        self.samples.iter()
    }

    /// kinetic + potential per sample, oldest to newest
    pub fn totals(&self) -> Vec<f64> {
        self.samples.iter().map(|[k, p]| k + p).collect()
    }
}

#[derive(Debug, Clone)]
pub struct Universe {
    bodies: Vec<Body>,
    index: HashMap<String, usize>,
    gravity: NewtonianGravity,
    history: EnergyHistory,
    total_energy: [f64; 2], // latest [kinetic, potential]
    forces_primed: bool,    // accelerations match the current positions
}

impl Universe {
    pub fn new(gravity: NewtonianGravity, history_capacity: usize) -> Self {
        Self {
            bodies: Vec::new(),
            index: HashMap::new(),
            gravity,
            history: EnergyHistory::with_capacity(history_capacity),
            total_energy: [0.0, 0.0],
            forces_primed: false,
        }
    }

    /// Build a universe from body definitions, all or nothing
    ///
    /// Every definition is validated before the universe is returned; the
    /// first problem aborts construction. Forces are primed and the initial
    /// energy sample is recorded so the first integration step starts from
    /// consistent accelerations.
    pub fn from_definitions(
        definitions: &[BodyConfig],
        gravity: NewtonianGravity,
        history_capacity: usize,
    ) -> Result<Self, EngineError> {
        let mut universe = Universe::new(gravity, history_capacity);
        for definition in definitions {
            let body = definition.to_body()?;
            if !universe.insert(body) {
                return Err(EngineError::configuration(format!(
                    "duplicate body id '{}'",
                    definition.id
                )));
            }
        }
        universe.step_forces();
        universe.refresh_energy_values();
        Ok(universe)
    }

    /// Add a body under its id; duplicates are rejected, never overwritten
    ///
    /// Bodies without a finite positive mass are rejected too, they would
    /// turn the force pass into 0/0.
    pub fn insert(&mut self, body: Body) -> bool {
        if !(body.mass.is_finite() && body.mass > 0.0) {
            warn!("body '{}' has mass {}, insertion rejected", body.id(), body.mass);
            return false;
        }
        if !(body.position.is_finite() && body.velocity.is_finite()) {
            warn!("body '{}' has a non-finite position or velocity, insertion rejected", body.id());
            return false;
        }
        if self.index.contains_key(body.id()) {
            warn!("body id '{}' already present, insertion rejected", body.id());
            return false;
        }
        info!("inserting body '{}'", body.id());
        self.index.insert(body.id().to_string(), self.bodies.len());
        self.bodies.push(body);
        self.forces_primed = false;
        true
    }

    pub fn get(&self, id: &str) -> Option<&Body> {
        self.index.get(id).map(|&i| &self.bodies[i])
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Mutable access for integrators; the set of bodies itself cannot change
    pub(crate) fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn forces_primed(&self) -> bool {
        self.forces_primed
    }

    /// First body flagged as the display reference
    pub fn reference_body(&self) -> Option<&Body> {
        self.bodies.iter().find(|b| b.is_reference)
    }

    /// Recompute accelerations and potential energies for every body
    pub fn step_forces(&mut self) {
        let n = self.bodies.len();
        let mut accel = vec![Vector::zeros(); n];
        let mut potential = vec![0.0; n];

        self.gravity.accumulate(&self.bodies, &mut accel, &mut potential);

        for ((body, a), p) in self.bodies.iter_mut().zip(accel).zip(potential) {
            body.acceleration = a;
            body.potential_energy = p;
        }
        self.forces_primed = true;
    }

    /// Sum kinetic and potential energy and push the pair onto the history
    pub fn refresh_energy_values(&mut self) {
        let kinetic: f64 = self.bodies.iter().map(Body::kinetic_energy).sum();
        let potential: f64 = self.bodies.iter().map(|b| b.potential_energy).sum();

        self.total_energy = [kinetic, potential];
        self.history.push(self.total_energy);
    }

    /// Latest `[kinetic, potential]`, not recomputed
    pub fn total_energy(&self) -> [f64; 2] {
        self.total_energy
    }

    pub fn energy_history(&self) -> &EnergyHistory {
        &self.history
    }

    pub fn center_of_mass(&self) -> Result<Vector, EngineError> {
        let total_mass: f64 = self.bodies.iter().map(|b| b.mass).sum();
        if total_mass == 0.0 {
            return Err(EngineError::domain("center of mass of a massless universe"));
        }

        let mut weighted = Vector::zeros();
        for body in &self.bodies {
            weighted += body.position * body.mass;
        }
        Ok(weighted * (1.0 / total_mass))
    }
}
