//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! `Scenario` containing:
//! - driver settings (`Engine`)
//! - physical parameters (`Parameters`)
//! - the populated `Universe` with forces primed and one energy sample
//!
//! Construction is all or nothing: any invalid setting or body definition
//! returns a single `EngineError` and no partially built universe.

use crate::configuration::config::{IntegratorConfig, ScenarioConfig};
use crate::error::EngineError;
use crate::simulation::driver::SimulationDriver;
use crate::simulation::engine::Engine;
use crate::simulation::forces::NewtonianGravity;
use crate::simulation::integrator::{Euler, Integrator, Verlet};
use crate::simulation::params::Parameters;
use crate::simulation::universe::Universe;

#[derive(Debug, Clone)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub universe: Universe,
}

impl Scenario {
    pub fn build_scenario(cfg: &ScenarioConfig) -> Result<Self, EngineError> {
        // Engine (runtime) from EngineConfig
        let engine = Engine::try_from(&cfg.engine)?;

        // Parameters (runtime) from ParametersConfig
        let parameters = Parameters::try_from(&cfg.parameters)?;

        // Bodies: validated definitions -> Universe
        let universe = Universe::from_definitions(
            &cfg.bodies,
            NewtonianGravity::new(parameters.g),
            engine.history_capacity,
        )?;

        Ok(Self {
            engine,
            parameters,
            universe,
        })
    }

    /// The configured stepping strategy, bound to the scenario's time step
    pub fn integrator(&self) -> Box<dyn Integrator> {
        match self.engine.integrator {
            IntegratorConfig::Verlet => Box::new(Verlet::new(self.parameters.timestep)),
            IntegratorConfig::Euler => Box::new(Euler::new(self.parameters.timestep)),
        }
    }

    /// Hand the universe to a new, not yet started driver
    pub fn into_driver(self) -> SimulationDriver {
        let integrator = self.integrator();
        SimulationDriver::new(self.universe, integrator, &self.engine)
    }
}
