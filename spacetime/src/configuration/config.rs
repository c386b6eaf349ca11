//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – driver options (frame rate, energy cadence, integrator)
//! - [`ParametersConfig`] – physical constant and time step
//! - [`BodyConfig`]       – initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   frame_rate: 60          # frames per second
//!   energy_interval: 10     # publish energies every N iterations
//!   history_capacity: 1000  # energy samples kept
//!   integrator: "verlet"    # or "euler"
//!
//! parameters:
//!   G: 1.0                  # gravitational constant
//!   timestep: 0.01          # time per integration step
//!
//! bodies:
//!   - id: left
//!     mass: 1.0
//!     radius: 0.05
//!     position: [ -1.0, 0.0 ]
//!     velocity: [  0.0, -0.5 ]
//!   - id: right
//!     mass: 1.0
//!     radius: 0.05
//!     position: [  1.0, 0.0 ]
//!     velocity: [  0.0, 0.5 ]
//!     reference: true
//! ```
//!
//! Omitted `engine`/`parameters` fields fall back to their defaults, omitted
//! `static`/`reference` flags are `false`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::EngineError;
use crate::simulation::forces::GRAVITATIONAL_CONSTANT;
use crate::simulation::states::Body;
use crate::simulation::universe::DEFAULT_HISTORY_CAPACITY;
use crate::simulation::vector::Vector;

/// Which integrator advances the universe
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegratorConfig {
    #[serde(rename = "verlet")] // velocity Verlet, symplectic, the default
    #[default]
    Verlet,

    #[serde(rename = "euler")] // explicit Euler, kept as a drift baseline
    Euler,
}

/// Driver settings
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct EngineConfig {
    pub frame_rate: u32,          // target frames per second
    pub energy_interval: u64,     // iterations between energy refreshes
    pub history_capacity: usize,  // energy samples kept in the ring
    pub integrator: IntegratorConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            frame_rate: 60,
            energy_interval: 10,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            integrator: IntegratorConfig::Verlet,
        }
    }
}

/// Physical and numerical parameters
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    #[serde(rename = "G")]
    pub g: f64,        // gravitational constant
    pub timestep: f64, // time covered by one integration step at dt_scale = 1
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            g: GRAVITATIONAL_CONSTANT,
            timestep: 1.0,
        }
    }
}

/// Initial state of a single body
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub id: String,
    pub mass: f64,          // kg
    pub radius: f64,        // m
    pub position: Vec<f64>, // 2 or 3 components
    pub velocity: Vec<f64>, // 2 or 3 components
    #[serde(rename = "static", default)]
    pub is_static: bool,
    #[serde(rename = "reference", default)]
    pub is_reference: bool,
}

impl BodyConfig {
    /// Validate the definition and turn it into a runtime `Body`
    pub fn to_body(&self) -> Result<Body, EngineError> {
        if self.id.trim().is_empty() {
            return Err(EngineError::configuration("body id must not be empty"));
        }
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(EngineError::configuration(format!(
                "body '{}' needs a positive mass, got {}",
                self.id, self.mass
            )));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(EngineError::configuration(format!(
                "body '{}' needs a positive radius, got {}",
                self.id, self.radius
            )));
        }
        let position = Vector::try_from(self.position.as_slice())
            .map_err(|e| EngineError::configuration(format!("body '{}' position: {e}", self.id)))?;
        let velocity = Vector::try_from(self.velocity.as_slice())
            .map_err(|e| EngineError::configuration(format!("body '{}' velocity: {e}", self.id)))?;

        Ok(Body::new(self.id.clone(), self.mass, self.radius, position, velocity)
            .with_static(self.is_static)
            .with_reference(self.is_reference))
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub parameters: ParametersConfig,
    pub bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let cfg: ScenarioConfig = serde_yaml::from_str(yaml).context("invalid scenario YAML")?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_yaml_str(&text)
    }
}
