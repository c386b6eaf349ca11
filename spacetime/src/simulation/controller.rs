//! The four-signal control surface
//!
//! A `SimulationController` holds at most one live driver. NEW replaces the
//! current session with one built from a scenario; PAUSE, RESUME and STOP
//! are forwarded to it. With no session bound those three are rejected with
//! a `Concurrency` error and nothing changes.

use log::{info, warn};

use crate::configuration::config::ScenarioConfig;
use crate::error::EngineError;
use crate::simulation::driver::{FrameUpdate, RunState, Signal, SimulationDriver};
use crate::simulation::scenario::Scenario;

#[derive(Debug, Clone)]
pub enum Command {
    New(ScenarioConfig),
    Pause,
    Resume,
    Stop,
}

#[derive(Default)]
pub struct SimulationController {
    driver: Option<SimulationDriver>,
}

impl SimulationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, command: Command) -> Result<RunState, EngineError> {
        match command {
            Command::New(cfg) => self.new_session(&cfg),
            Command::Pause => self.forward(Signal::Pause),
            Command::Resume => self.forward(Signal::Resume),
            Command::Stop => self.stop_session(),
        }
    }

    pub fn state(&self) -> RunState {
        self.driver.as_ref().map_or(RunState::Stopped, SimulationDriver::state)
    }

    pub fn latest(&self) -> Option<FrameUpdate> {
        self.driver.as_ref().and_then(SimulationDriver::latest)
    }

    pub fn driver(&self) -> Option<&SimulationDriver> {
        self.driver.as_ref()
    }

    fn new_session(&mut self, cfg: &ScenarioConfig) -> Result<RunState, EngineError> {
        // Build first so a bad scenario leaves the current session untouched
        let scenario = Scenario::build_scenario(cfg)?;
        let mut driver = scenario.into_driver();

        if self.driver.is_some() {
            info!("replacing running session");
            self.stop_session()?;
        }

        driver.start()?;
        let state = driver.state();
        self.driver = Some(driver);
        Ok(state)
    }

    fn forward(&mut self, signal: Signal) -> Result<RunState, EngineError> {
        match &self.driver {
            Some(driver) => Ok(driver.signal(signal)),
            None => {
                warn!("{signal:?} received with no simulation bound");
                Err(EngineError::concurrency(format!(
                    "{signal:?} with no simulation bound"
                )))
            }
        }
    }

    fn stop_session(&mut self) -> Result<RunState, EngineError> {
        let Some(mut driver) = self.driver.take() else {
            warn!("Stop received with no simulation bound");
            return Err(EngineError::concurrency("Stop with no simulation bound"));
        };
        driver.stop()?;
        Ok(RunState::Stopped)
    }
}
