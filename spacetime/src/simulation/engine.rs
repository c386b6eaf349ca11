//! High-level runtime driver settings
//!
//! Frame pacing, energy cadence and the integrator choice used when building
//! and running a `Scenario`

use std::time::Duration;

use crate::configuration::config::{EngineConfig, IntegratorConfig};
use crate::error::EngineError;

#[derive(Debug, Clone, PartialEq)]
pub struct Engine {
    pub frame_interval: Duration,    // target wall time per iteration
    pub energy_interval: u64,        // refresh energies every N iterations
    pub history_capacity: usize,     // energy samples kept
    pub integrator: IntegratorConfig, // verlet or euler
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            frame_interval: Engine::interval_for(60),
            energy_interval: 10,
            history_capacity: crate::simulation::universe::DEFAULT_HISTORY_CAPACITY,
            integrator: IntegratorConfig::Verlet,
        }
    }
}

impl Engine {
    /// Frame interval for a target rate, in whole milliseconds
    pub fn interval_for(frame_rate: u32) -> Duration {
        Duration::from_millis(1000 / u64::from(frame_rate.max(1)))
    }
}

impl TryFrom<&EngineConfig> for Engine {
    type Error = EngineError;

    fn try_from(cfg: &EngineConfig) -> Result<Self, Self::Error> {
        if cfg.frame_rate == 0 {
            return Err(EngineError::configuration("frame_rate must be positive"));
        }
        if cfg.energy_interval == 0 {
            return Err(EngineError::configuration("energy_interval must be positive"));
        }
        if cfg.history_capacity == 0 {
            return Err(EngineError::configuration("history_capacity must be positive"));
        }
        Ok(Self {
            frame_interval: Engine::interval_for(cfg.frame_rate),
            energy_interval: cfg.energy_interval,
            history_capacity: cfg.history_capacity,
            integrator: cfg.integrator,
        })
    }
}
