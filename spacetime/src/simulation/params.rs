//! Physical and numerical parameters for the simulation
//!
//! `Parameters` holds the runtime values taken from `ParametersConfig`:
//! - the gravitational constant `g`,
//! - the time covered by one integration step at `dt_scale = 1`

use crate::configuration::config::ParametersConfig;
use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub g: f64,        // gravitational constant
    pub timestep: f64, // step size
}

impl TryFrom<&ParametersConfig> for Parameters {
    type Error = EngineError;

    fn try_from(cfg: &ParametersConfig) -> Result<Self, Self::Error> {
        if !(cfg.g.is_finite() && cfg.g >= 0.0) {
            return Err(EngineError::configuration(format!(
                "G must be finite and non-negative, got {}",
                cfg.g
            )));
        }
        if !(cfg.timestep.is_finite() && cfg.timestep > 0.0) {
            return Err(EngineError::configuration(format!(
                "timestep must be finite and positive, got {}",
                cfg.timestep
            )));
        }
        Ok(Self {
            g: cfg.g,
            timestep: cfg.timestep,
        })
    }
}
