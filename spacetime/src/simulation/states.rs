//! Core state type for a simulated body
//!
//! A `Body` carries its identity, physical properties and kinematic state.
//! Static and reference bodies are plain flags: a static body never moves but
//! still pulls on everything else, the reference body anchors the display.

use std::hash::{Hash, Hasher};

use log::warn;

use crate::simulation::vector::Vector;

#[derive(Debug, Clone)]
pub struct Body {
    id: String,
    pub mass: f64,   // kg
    pub radius: f64, // m, display only
    pub position: Vector,
    pub velocity: Vector,
    pub acceleration: Vector,
    pub last_acceleration: Vector, // acceleration from the previous step
    pub last_position: Option<Vector>, // where the body was before its last move
    pub potential_energy: f64, // share of pair potentials, refreshed every force pass
    pub is_static: bool,
    pub is_reference: bool,
}

impl Body {
    pub fn new(id: impl Into<String>, mass: f64, radius: f64, position: Vector, velocity: Vector) -> Self {
        Self {
            id: id.into(),
            mass,
            radius,
            position,
            velocity,
            acceleration: Vector::zeros(),
            last_acceleration: Vector::zeros(),
            last_position: None,
            potential_energy: 0.0,
            is_static: false,
            is_reference: false,
        }
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_reference(mut self, is_reference: bool) -> Self {
        self.is_reference = is_reference;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// velocity += delta, refused for static bodies
    pub fn apply_velocity_delta(&mut self, delta: Vector) {
        if self.is_static {
            warn!("attempted to change the velocity of static body '{}'", self.id);
            return;
        }
        self.velocity.translate(&delta);
    }

    /// Move by one unit of the current velocity
    pub fn advance_position(&mut self) {
        let velocity = self.velocity;
        self.displace(velocity);
    }

    /// Move by an arbitrary displacement, remembering the previous position
    pub fn displace(&mut self, displacement: Vector) {
        if self.is_static {
            return; // static bodies never move
        }
        self.last_position = Some(self.position);
        self.position.translate(&displacement);
    }

    pub fn kinetic_energy(&self) -> f64 {
        if self.is_static {
            return 0.0;
        }
        0.5 * self.mass * self.velocity.magnitude_squared()
    }

    /// Unit vector pointing from `self` toward `other`
    ///
    /// `None` when `other` is this same body or the two positions coincide.
    pub fn direction_to(&self, other: &Body) -> Option<Vector> {
        if self == other {
            return None;
        }
        (other.position - self.position).unit().ok()
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        self.position.distance_to(&other.position)
    }
}

impl PartialEq for Body {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Body {}

impl Hash for Body {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
