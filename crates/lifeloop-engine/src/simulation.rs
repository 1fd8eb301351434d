//! User-facing [`Simulation`] API and run-state machine.
//!
//! ```text
//! Caller thread(s)                 Tick thread (lifeloop-tick)
//!     |                                 |
//!     |--edit()/toggle()--+             | select! { stop_rx, ticker }
//!     |                   v             | begin_tick()   [lock, epoch]
//!     |            ActiveGrid           | advance()      [no lock]
//!     |            [Mutex<Arc<..>>]     | finish_tick()  [lock, swap]
//!     |--snapshot()-------^             | viewport.publish()
//!     |                                 |
//!     |--pause()/reset()--drop(stop_tx)>| exit loop
//!     |<-------------------join()-------|
//! ```
//!
//! Every method takes `&self`; share a simulation between threads with an
//! `Arc`. Run-state transitions are serialized by a control lock that edits
//! and snapshots never take.

use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::Sender;
use lifeloop_core::{
    CellState, Generation, GenerationId, Grid, GridError, NullViewPort, ViewPort,
};
use thiserror::Error;
use tracing::{debug, error};

use crate::active::ActiveGrid;
use crate::config::{ConfigError, SimConfig};
use crate::metrics::TickMetrics;
use crate::seed::random_soup;
use crate::step::StepEngine;
use crate::tick_thread::{execute_tick, panic_reason, TickOutcome, TickThreadState};

// ── Error types ──────────────────────────────────────────────────

/// Errors from [`Simulation`] operations.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// A grid access or construction failed.
    #[error(transparent)]
    Grid(#[from] GridError),
    /// The configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The OS refused to spawn the tick thread.
    #[error("failed to spawn tick thread")]
    ThreadSpawnFailed(#[source] io::Error),
    /// The tick thread panicked. The simulation is Stopped; the active
    /// generation is intact and `start()` may be called again.
    #[error("tick thread panicked: {reason}")]
    TickThreadPanicked {
        /// The panic message, if it was a string.
        reason: String,
    },
    /// The operation requires the simulation to be Stopped.
    #[error("simulation is running")]
    AlreadyRunning,
}

// ── RunState ─────────────────────────────────────────────────────

/// Whether the tick thread is stepping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunState {
    /// No tick thread. Initial state.
    #[default]
    Stopped,
    /// The tick thread advances one generation per tick period.
    Running,
}

// ── Runner ───────────────────────────────────────────────────────

struct Runner {
    /// Dropping this disconnects the tick thread's stop channel.
    stop_tx: Sender<()>,
    handle: JoinHandle<()>,
}

impl Runner {
    fn is_alive(&self) -> bool {
        !self.handle.is_finished()
    }

    fn stop(self) -> Result<(), SimulationError> {
        let Runner { stop_tx, handle } = self;
        drop(stop_tx);
        join_tick_thread(handle)
    }

    fn join(self) -> Result<(), SimulationError> {
        join_tick_thread(self.handle)
    }
}

fn join_tick_thread(handle: JoinHandle<()>) -> Result<(), SimulationError> {
    handle.join().map_err(|payload| {
        let reason = panic_reason(payload.as_ref());
        error!(%reason, "tick thread panicked");
        SimulationError::TickThreadPanicked { reason }
    })
}

// ── Simulation ───────────────────────────────────────────────────

/// A live Game of Life simulation.
///
/// Owns the active generation and, while Running, a background thread
/// that advances it once per tick period. Edits and snapshots are accepted
/// in either state and only ever take the short active-grid lock, so a slow
/// tick never stalls the caller.
pub struct Simulation {
    active: Arc<ActiveGrid>,
    engine: StepEngine,
    viewport: Arc<dyn ViewPort>,
    tick_period: Duration,
    control: Mutex<Option<Runner>>,
}

impl Simulation {
    /// Create a Stopped simulation with an all-dead `width x height` grid.
    ///
    /// Uses bounded edges, the default history depth, and no viewport.
    pub fn new(width: u32, height: u32, tick_period: Duration) -> Result<Self, SimulationError> {
        Self::with_config(
            SimConfig::new(width, height, tick_period),
            Arc::new(NullViewPort),
        )
    }

    /// Create a Stopped simulation from a full configuration.
    pub fn with_config(
        config: SimConfig,
        viewport: Arc<dyn ViewPort>,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        let grid = Grid::new(config.width, config.height)?;
        Ok(Self {
            active: Arc::new(ActiveGrid::new(grid, config.history_capacity)),
            engine: StepEngine::new(config.edge),
            viewport,
            tick_period: config.tick_period,
            control: Mutex::new(None),
        })
    }

    fn control(&self) -> MutexGuard<'_, Option<Runner>> {
        self.control.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Take the runner out of `control` if its thread has died, joining it
    /// to surface the panic.
    fn reap(control: &mut Option<Runner>) -> Result<(), SimulationError> {
        match control.take() {
            Some(runner) if !runner.is_alive() => runner.join(),
            other => {
                *control = other;
                Ok(())
            }
        }
    }

    /// Begin stepping. A no-op if already Running.
    ///
    /// If a previous tick thread died, its panic is reported here and the
    /// simulation stays Stopped.
    pub fn start(&self) -> Result<(), SimulationError> {
        let mut control = self.control();
        Self::reap(&mut control)?;
        if control.is_some() {
            return Ok(());
        }

        let (stop_tx, stop_rx) = crossbeam_channel::bounded(1);
        let state = TickThreadState::new(
            Arc::clone(&self.active),
            self.engine,
            Arc::clone(&self.viewport),
            stop_rx,
            self.tick_period,
            // Replacements only happen under the control lock, so this
            // epoch is the grid the thread is started for.
            self.active.epoch(),
        );
        let handle = thread::Builder::new()
            .name("lifeloop-tick".into())
            .spawn(move || state.run())
            .map_err(SimulationError::ThreadSpawnFailed)?;
        *control = Some(Runner { stop_tx, handle });
        debug!("simulation running");
        Ok(())
    }

    /// Stop stepping. A tick already computing completes and is published;
    /// no further tick starts. Returns once the tick thread has exited.
    pub fn pause(&self) -> Result<(), SimulationError> {
        let mut control = self.control();
        let Some(runner) = control.take() else {
            return Ok(());
        };
        runner.stop()?;
        debug!("simulation stopped");
        Ok(())
    }

    /// Stop stepping and clear every cell.
    ///
    /// The grid keeps its dimensions and the generation count restarts at
    /// 0. A tick computing at the time is discarded. The blank generation
    /// is published last, after the tick thread has exited.
    pub fn reset(&self) -> Result<(), SimulationError> {
        let mut control = self.control();
        let blank = self.active.snapshot().grid().clone_dimensions();
        let runner = control.take();
        // The replacement bumps the epoch; a tick not yet begun sees it and
        // the thread exits without stepping the blank grid.
        let generation = self.active.replace(blank)?;
        let joined = runner.map_or(Ok(()), Runner::stop);
        debug!("simulation reset");
        self.viewport.publish(&generation);
        joined
    }

    /// Replace the whole grid.
    ///
    /// `grid` must have the simulation's dimensions. The generation count
    /// restarts at 0 and any tick computing at the time is discarded. If
    /// Running, stepping resumes from the loaded grid.
    pub fn load(&self, grid: Grid) -> Result<(), SimulationError> {
        let (width, height) = self.active.dimensions();
        if grid.dimensions() != (width, height) {
            return Err(GridError::DimensionMismatch {
                expected: (width, height),
                actual: grid.dimensions(),
            }
            .into());
        }

        let mut control = self.control();
        Self::reap(&mut control)?;
        let was_running = control.is_some();
        let runner = control.take();
        let generation = self.active.replace(grid)?;
        if let Some(runner) = runner {
            runner.stop()?;
        }
        debug!(alive = generation.alive_count(), "grid loaded");
        self.viewport.publish(&generation);
        drop(control);

        if was_running {
            self.start()?;
        }
        Ok(())
    }

    /// Load a seeded random soup where each cell is alive with probability
    /// `density`.
    pub fn seed_random(&self, density: f64, seed: u64) -> Result<(), SimulationError> {
        let (width, height) = self.active.dimensions();
        self.load(random_soup(width, height, density, seed)?)
    }

    /// Advance exactly one generation on the caller's thread and publish
    /// it. Only permitted while Stopped.
    pub fn step_once(&self) -> Result<Arc<Generation>, SimulationError> {
        let mut control = self.control();
        Self::reap(&mut control)?;
        if control.is_some() {
            return Err(SimulationError::AlreadyRunning);
        }
        // Nothing can replace the grid while the control lock is held, so
        // the tick always publishes.
        let generation = match execute_tick(&self.active, &self.engine, self.active.epoch()) {
            (TickOutcome::Published(generation), _) => generation,
            _ => self.active.snapshot(),
        };
        self.viewport.publish(&generation);
        Ok(generation)
    }

    /// Set the cell at `(x, y)`. Visible to the next tick.
    pub fn edit(&self, x: i32, y: i32, state: CellState) -> Result<(), GridError> {
        self.active.edit(x, y, state)
    }

    /// Flip the cell at `(x, y)` and return its new state.
    pub fn toggle(&self, x: i32, y: i32) -> Result<CellState, GridError> {
        self.active.toggle(x, y)
    }

    /// The most recently published generation, including edits made since.
    pub fn snapshot(&self) -> Arc<Generation> {
        self.active.snapshot()
    }

    /// Current run state. A tick thread that has died reads as Stopped.
    pub fn run_state(&self) -> RunState {
        match &*self.control() {
            Some(runner) if runner.is_alive() => RunState::Running,
            _ => RunState::Stopped,
        }
    }

    /// Shorthand for `run_state() == RunState::Running`.
    pub fn is_running(&self) -> bool {
        self.run_state() == RunState::Running
    }

    /// Report a dead tick thread, if any.
    ///
    /// Returns [`SimulationError::TickThreadPanicked`] once per failure and
    /// leaves the simulation Stopped.
    pub fn check_health(&self) -> Result<(), SimulationError> {
        Self::reap(&mut self.control())
    }

    /// A retained tick output by id. `None` once evicted or cleared by a
    /// reset or load.
    pub fn history(&self, id: GenerationId) -> Option<Arc<Generation>> {
        self.active.history(id)
    }

    /// The most recent retained tick output.
    pub fn latest_history(&self) -> Option<Arc<Generation>> {
        self.active.latest_history()
    }

    /// Metrics from the last completed tick plus running totals.
    pub fn last_metrics(&self) -> TickMetrics {
        self.active.metrics()
    }

    /// `(width, height)` of the grid.
    pub fn dimensions(&self) -> (u32, u32) {
        self.active.dimensions()
    }

    /// Time between generations while Running.
    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }
}

impl Drop for Simulation {
    fn drop(&mut self) {
        let control = self
            .control
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(runner) = control.take() {
            if let Err(e) = runner.stop() {
                error!(error = %e, "tick thread failed during shutdown");
            }
        }
    }
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("dimensions", &self.dimensions())
            .field("tick_period", &self.tick_period)
            .field("edge", &self.engine.edge())
            .field("run_state", &self.run_state())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifeloop_core::EdgeBehavior;
    use lifeloop_test_utils::{alive_set, patterns, wait_until, RecordingViewPort};
    use std::collections::BTreeSet;
    use std::time::Instant;

    const FAST: Duration = Duration::from_millis(5);

    fn recorded(config: SimConfig) -> (Simulation, Arc<RecordingViewPort>) {
        let viewport = Arc::new(RecordingViewPort::new());
        let sim = Simulation::with_config(config, Arc::clone(&viewport) as Arc<dyn ViewPort>)
            .unwrap();
        (sim, viewport)
    }

    #[test]
    fn new_is_stopped_and_blank() {
        let sim = Simulation::new(64, 64, Duration::from_millis(100)).unwrap();
        assert_eq!(sim.run_state(), RunState::Stopped);
        assert_eq!(sim.dimensions(), (64, 64));
        assert_eq!(sim.tick_period(), Duration::from_millis(100));
        let snap = sim.snapshot();
        assert!(snap.grid().is_empty());
        assert_eq!(snap.id(), GenerationId(0));
    }

    #[test]
    fn invalid_construction_rejected() {
        assert!(matches!(
            Simulation::new(0, 4, FAST),
            Err(SimulationError::Config(ConfigError::InvalidDimensions { .. }))
        ));
        assert!(matches!(
            Simulation::new(4, 4, Duration::ZERO),
            Err(SimulationError::Config(ConfigError::InvalidTickPeriod))
        ));
    }

    #[test]
    fn step_once_runs_blinker() {
        let (sim, viewport) = recorded(SimConfig::new(5, 5, FAST));
        for x in 1..=3 {
            sim.edit(x, 2, CellState::Alive).unwrap();
        }
        let next = sim.step_once().unwrap();
        assert_eq!(
            alive_set(next.grid()),
            BTreeSet::from([(2, 1), (2, 2), (2, 3)])
        );
        assert_eq!(next.id(), GenerationId(1));
        assert_eq!(viewport.latest().unwrap().id(), GenerationId(1));
    }

    #[test]
    fn step_once_refused_while_running() {
        let sim = Simulation::new(8, 8, FAST).unwrap();
        sim.start().unwrap();
        assert!(matches!(
            sim.step_once(),
            Err(SimulationError::AlreadyRunning)
        ));
        sim.pause().unwrap();
        assert!(sim.step_once().is_ok());
    }

    #[test]
    fn start_is_idempotent_and_pause_stops() {
        let (sim, viewport) = recorded(SimConfig::new(5, 5, FAST));
        sim.load(patterns::blinker()).unwrap();
        sim.start().unwrap();
        sim.start().unwrap();
        assert!(sim.is_running());
        assert!(wait_until(Duration::from_secs(5), || {
            sim.snapshot().id() >= GenerationId(3)
        }));
        sim.pause().unwrap();
        assert_eq!(sim.run_state(), RunState::Stopped);

        let after = sim.snapshot().id();
        let published = viewport.len();
        std::thread::sleep(FAST * 6);
        assert_eq!(sim.snapshot().id(), after);
        assert_eq!(viewport.len(), published);
    }

    #[test]
    fn pause_when_stopped_is_noop() {
        let sim = Simulation::new(4, 4, FAST).unwrap();
        sim.pause().unwrap();
        sim.pause().unwrap();
        assert!(!sim.is_running());
    }

    #[test]
    fn reset_mid_run_yields_blank_grid() {
        let (sim, viewport) = recorded(SimConfig::new(16, 12, FAST));
        sim.seed_random(0.5, 42).unwrap();
        sim.start().unwrap();
        assert!(wait_until(Duration::from_secs(5), || {
            sim.snapshot().id() >= GenerationId(2)
        }));
        sim.reset().unwrap();

        assert_eq!(sim.run_state(), RunState::Stopped);
        let snap = sim.snapshot();
        assert!(snap.grid().is_empty());
        assert_eq!(snap.grid().dimensions(), (16, 12));
        assert_eq!(snap.id(), GenerationId(0));
        let last = viewport.latest().unwrap();
        assert!(Arc::ptr_eq(&last, &snap));
        assert!(sim.latest_history().is_none());
    }

    #[test]
    fn reset_when_stopped_clears_edits() {
        let sim = Simulation::new(4, 4, FAST).unwrap();
        sim.edit(1, 1, CellState::Alive).unwrap();
        sim.reset().unwrap();
        assert!(sim.snapshot().grid().is_empty());
    }

    #[test]
    fn edits_surface_bounds_errors() {
        let sim = Simulation::new(4, 4, FAST).unwrap();
        assert!(matches!(
            sim.edit(4, 0, CellState::Alive),
            Err(GridError::OutOfBounds { x: 4, y: 0, .. })
        ));
        assert!(sim.toggle(0, -1).is_err());
        assert_eq!(sim.toggle(3, 3), Ok(CellState::Alive));
    }

    #[test]
    fn load_checks_dimensions() {
        let sim = Simulation::new(4, 4, FAST).unwrap();
        let err = sim.load(Grid::new(5, 4).unwrap()).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::Grid(GridError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn load_while_running_keeps_running() {
        let sim = Simulation::new(5, 5, FAST).unwrap();
        sim.start().unwrap();
        sim.load(patterns::blinker()).unwrap();
        assert!(sim.is_running());
        assert!(wait_until(Duration::from_secs(5), || {
            sim.snapshot().id() >= GenerationId(1)
        }));
        sim.pause().unwrap();
        assert_eq!(sim.snapshot().alive_count(), 3);
    }

    #[test]
    fn seed_random_rejects_bad_density() {
        let sim = Simulation::new(4, 4, FAST).unwrap();
        assert!(matches!(
            sim.seed_random(2.0, 1),
            Err(SimulationError::Config(ConfigError::InvalidDensity { .. }))
        ));
    }

    #[test]
    fn panicking_viewport_is_surfaced() {
        let viewport = |_: &Arc<Generation>| panic!("renderer exploded");
        let sim = Simulation::with_config(SimConfig::new(4, 4, FAST), Arc::new(viewport)).unwrap();
        sim.start().unwrap();
        assert!(wait_until(Duration::from_secs(5), || !sim.is_running()));
        match sim.check_health() {
            Err(SimulationError::TickThreadPanicked { reason }) => {
                assert!(reason.contains("renderer exploded"));
            }
            other => panic!("expected TickThreadPanicked, got {other:?}"),
        }
        // Reported once; the simulation can be driven again.
        assert!(sim.check_health().is_ok());
        sim.edit(0, 0, CellState::Alive).unwrap();
    }

    #[test]
    fn torus_is_opt_in() {
        let config = SimConfig {
            edge: EdgeBehavior::Wrap,
            ..SimConfig::new(6, 6, FAST)
        };
        let sim = Simulation::with_config(config, Arc::new(NullViewPort)).unwrap();
        sim.load(patterns::glider(6, 6, 0, 0)).unwrap();
        for _ in 0..24 {
            sim.step_once().unwrap();
        }
        assert_eq!(*sim.snapshot().grid(), patterns::glider(6, 6, 0, 0));
    }

    #[test]
    fn metrics_track_ticks() {
        let sim = Simulation::new(5, 5, FAST).unwrap();
        sim.load(patterns::blinker()).unwrap();
        sim.step_once().unwrap();
        let m = sim.last_metrics();
        assert_eq!(m.generation, GenerationId(1));
        assert_eq!(m.alive, 3);
        assert_eq!(m.births, 2);
        assert_eq!(m.deaths, 2);
        assert_eq!(m.ticks_completed, 1);
    }

    #[test]
    fn drop_stops_a_slow_thread_promptly() {
        let sim = Simulation::new(4, 4, Duration::from_secs(30)).unwrap();
        sim.start().unwrap();
        std::thread::sleep(Duration::from_millis(20));
        let start = Instant::now();
        drop(sim);
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn simulation_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Simulation>();
    }
}
