//! Real-time driver for a universe
//!
//! One long-lived loop thread owns the `Universe` and `Integrator` while the
//! driver runs. Everything else talks to it through a small control block
//! (`Mutex<Control>` + `Condvar`) and reads only copied `FrameUpdate`s.
//!
//! ```text
//!            start              PAUSE
//! STOPPED ----------> RUNNING ---------> PAUSED
//!    ^                 |   ^               |
//!    |      STOP       |   |    RESUME     |
//!    +-----------------+   +---------------+
//!    ^                                     |
//!    +---------------- STOP ---------------+
//! ```
//!
//! PAUSE lets the in-flight iteration finish and then parks the thread on
//! the condition variable. RESUME wakes the same thread, so the universe
//! continues from exactly where it stopped. STOP ends the thread and the
//! universe is handed back through [`SimulationDriver::stop`]. The pacing
//! sleep is a condvar wait as well, so a signal never waits out a frame.

use std::sync::mpsc::Sender;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, info, trace, warn};

use crate::error::EngineError;
use crate::simulation::engine::Engine;
use crate::simulation::integrator::Integrator;
use crate::simulation::universe::Universe;
use crate::simulation::vector::Vector;

const MIN_SLEEP: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Pause,
    Resume,
    Stop,
}

/// Snapshot published after every iteration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUpdate {
    pub step: u64, // integration steps taken so far by this driver
    pub total_kinetic_energy: f64,
    pub total_potential_energy: f64,
    pub center_of_mass: Option<Vector>, // None for a massless universe
    pub reference_position: Option<Vector>,
}

impl FrameUpdate {
    pub fn capture(step: u64, universe: &Universe) -> Self {
        let [kinetic, potential] = universe.total_energy();
        Self {
            step,
            total_kinetic_energy: kinetic,
            total_potential_energy: potential,
            center_of_mass: universe.center_of_mass().ok(),
            reference_position: universe.reference_body().map(|b| b.position),
        }
    }

    pub fn total_energy(&self) -> f64 {
        self.total_kinetic_energy + self.total_potential_energy
    }
}

#[derive(Debug)]
struct Control {
    state: RunState,
    parked: bool, // loop thread is waiting out a pause
}

struct Shared {
    control: Mutex<Control>,
    wake: Condvar,
    latest: Mutex<Option<FrameUpdate>>,
}

impl Shared {
    // A poisoned lock still holds a valid state, keep going with it
    fn control(&self) -> MutexGuard<'_, Control> {
        self.control.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, update: FrameUpdate) {
        *self.latest.lock().unwrap_or_else(PoisonError::into_inner) = Some(update);
    }

    fn latest(&self) -> Option<FrameUpdate> {
        *self.latest.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

type Session = (Universe, Box<dyn Integrator>);

pub struct SimulationDriver {
    shared: Arc<Shared>,
    session: Option<Session>, // bound but not started
    handle: Option<JoinHandle<Session>>,
    frame_interval: Duration,
    energy_interval: u64,
    updates: Option<Sender<FrameUpdate>>,
}

impl SimulationDriver {
    pub fn new(universe: Universe, integrator: Box<dyn Integrator>, engine: &Engine) -> Self {
        Self {
            shared: Arc::new(Shared {
                control: Mutex::new(Control {
                    state: RunState::Stopped,
                    parked: false,
                }),
                wake: Condvar::new(),
                latest: Mutex::new(None),
            }),
            session: Some((universe, integrator)),
            handle: None,
            frame_interval: engine.frame_interval,
            energy_interval: engine.energy_interval.max(1),
            updates: None,
        }
    }

    /// Also push every `FrameUpdate` into `tx`
    pub fn with_updates(mut self, tx: Sender<FrameUpdate>) -> Self {
        self.updates = Some(tx);
        self
    }

    /// STOPPED -> RUNNING, spawning the loop thread
    pub fn start(&mut self) -> Result<(), EngineError> {
        let Some((universe, integrator)) = self.session.take() else {
            return Err(EngineError::concurrency(
                "driver has no universe bound (already started or stopped)",
            ));
        };

        self.shared.control().state = RunState::Running;

        let shared = Arc::clone(&self.shared);
        let frame_interval = self.frame_interval;
        let energy_interval = self.energy_interval;
        let updates = self.updates.take();

        let spawned = thread::Builder::new()
            .name("spacetime-driver".into())
            .spawn(move || {
                run_loop(&shared, universe, integrator, frame_interval, energy_interval, updates)
            });

        match spawned {
            Ok(handle) => {
                info!("simulation driver started ({} ms per frame)", frame_interval.as_millis());
                self.handle = Some(handle);
                Ok(())
            }
            Err(e) => {
                self.shared.control().state = RunState::Stopped;
                Err(EngineError::concurrency(format!("failed to spawn driver thread: {e}")))
            }
        }
    }

    /// Deliver a control signal; invalid transitions leave the state alone
    ///
    /// Never blocks on the loop thread. Returns the state after the signal.
    pub fn signal(&self, signal: Signal) -> RunState {
        let mut ctl = self.shared.control();
        let next = match (ctl.state, signal) {
            (RunState::Running, Signal::Pause) => RunState::Paused,
            (RunState::Paused, Signal::Resume) => RunState::Running,
            (RunState::Running | RunState::Paused, Signal::Stop) => RunState::Stopped,
            (state, signal) => {
                debug!("ignoring {signal:?} while {state:?}");
                return state;
            }
        };
        info!("driver {:?} -> {:?}", ctl.state, next);
        ctl.state = next;
        self.shared.wake.notify_all();
        next
    }

    pub fn pause(&self) -> RunState {
        self.signal(Signal::Pause)
    }

    pub fn resume(&self) -> RunState {
        self.signal(Signal::Resume)
    }

    pub fn state(&self) -> RunState {
        self.shared.control().state
    }

    /// Most recent published snapshot
    pub fn latest(&self) -> Option<FrameUpdate> {
        self.shared.latest()
    }

    /// Block until the loop thread has parked for a pause, up to `timeout`
    pub fn wait_until_parked(&self, timeout: Duration) -> bool {
        let ctl = self.shared.control();
        let waited = self
            .shared
            .wake
            .wait_timeout_while(ctl, timeout, |c| c.state == RunState::Paused && !c.parked);
        match waited {
            Ok((ctl, _)) => ctl.parked,
            Err(poisoned) => poisoned.into_inner().0.parked,
        }
    }

    /// Signal STOP, join the loop thread and hand the universe back
    ///
    /// A driver that was never started returns its bound universe. Once the
    /// universe has been handed back the driver is spent and every further
    /// `start`/`stop` is a `Concurrency` error.
    pub fn stop(&mut self) -> Result<Universe, EngineError> {
        self.signal(Signal::Stop);

        if let Some(handle) = self.handle.take() {
            let (universe, _integrator) = handle
                .join()
                .map_err(|_| EngineError::concurrency("driver thread panicked"))?;
            info!("simulation driver stopped");
            return Ok(universe);
        }
        match self.session.take() {
            Some((universe, _)) => Ok(universe),
            None => Err(EngineError::concurrency("driver has no universe bound")),
        }
    }
}

impl Drop for SimulationDriver {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.signal(Signal::Stop);
            if handle.join().is_err() {
                warn!("driver thread panicked during shutdown");
            }
        }
    }
}

fn run_loop(
    shared: &Shared,
    mut universe: Universe,
    mut integrator: Box<dyn Integrator>,
    frame_interval: Duration,
    energy_interval: u64,
    mut updates: Option<Sender<FrameUpdate>>,
) -> Session {
    trace!("driver loop running {} over {} bodies", integrator.name(), universe.len());

    let mut iteration: u64 = 0;
    let mut step: u64 = 0;

    loop {
        // Park while paused, leave on stop
        {
            let mut ctl = shared.control();
            while ctl.state == RunState::Paused {
                if !ctl.parked {
                    ctl.parked = true;
                    shared.wake.notify_all();
                    debug!("driver parked at step {step}");
                }
                ctl = shared.wake.wait(ctl).unwrap_or_else(PoisonError::into_inner);
            }
            ctl.parked = false;
            if ctl.state == RunState::Stopped {
                break;
            }
        }

        let start = Instant::now();

        integrator.advance(&mut universe, 1.0);
        step += 1;

        if iteration % energy_interval == 0 {
            universe.refresh_energy_values();
        }
        iteration += 1;

        let update = FrameUpdate::capture(step, &universe);
        shared.publish(update);
        if let Some(tx) = &updates {
            if tx.send(update).is_err() {
                trace!("update receiver gone, no longer sending");
                updates = None;
            }
        }

        // Hold the frame rate; a signal cuts the wait short
        let sleep = frame_interval.saturating_sub(start.elapsed()).max(MIN_SLEEP);
        let ctl = shared.control();
        let _ = shared
            .wake
            .wait_timeout_while(ctl, sleep, |c| c.state == RunState::Running);
    }

    info!("driver loop exited after {step} steps");
    (universe, integrator)
}
