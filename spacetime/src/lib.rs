pub mod error;
pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use error::EngineError;

pub use simulation::vector::{Vector, NVec3};
pub use simulation::states::Body;
pub use simulation::forces::{NewtonianGravity, PairInteraction, GRAVITATIONAL_CONSTANT};
pub use simulation::universe::{Universe, EnergyHistory};
pub use simulation::integrator::{Integrator, Verlet, Euler};
pub use simulation::scenario::Scenario;
pub use simulation::driver::{SimulationDriver, FrameUpdate, RunState, Signal};
pub use simulation::controller::{SimulationController, Command};

pub use configuration::config::{IntegratorConfig, EngineConfig, ParametersConfig, BodyConfig, ScenarioConfig};

pub use benchmark::benchmark::{bench_gravity, bench_energy_drift};
