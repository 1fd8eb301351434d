//! The input-facing control surface.

use lifeloop_core::CellState;

use crate::simulation::{RunState, Simulation, SimulationError};

/// What an input layer drives: pointer edits and the run buttons.
///
/// Implemented by [`Simulation`]; UI code can depend on this trait alone.
pub trait EditPort: Send + Sync {
    /// Flip a cell, returning its new state.
    fn toggle(&self, x: i32, y: i32) -> Result<CellState, SimulationError>;

    /// Set a cell.
    fn edit(&self, x: i32, y: i32, state: CellState) -> Result<(), SimulationError>;

    /// Begin stepping.
    fn start(&self) -> Result<(), SimulationError>;

    /// Stop stepping.
    fn pause(&self) -> Result<(), SimulationError>;

    /// Stop stepping and clear the grid.
    fn reset(&self) -> Result<(), SimulationError>;

    /// Current run state.
    fn run_state(&self) -> RunState;

    /// Start if Stopped, pause if Running. Returns the new state.
    fn toggle_running(&self) -> Result<RunState, SimulationError> {
        match self.run_state() {
            RunState::Running => {
                self.pause()?;
                Ok(RunState::Stopped)
            }
            RunState::Stopped => {
                self.start()?;
                Ok(RunState::Running)
            }
        }
    }
}

impl EditPort for Simulation {
    fn toggle(&self, x: i32, y: i32) -> Result<CellState, SimulationError> {
        Ok(Simulation::toggle(self, x, y)?)
    }

    fn edit(&self, x: i32, y: i32, state: CellState) -> Result<(), SimulationError> {
        Ok(Simulation::edit(self, x, y, state)?)
    }

    fn start(&self) -> Result<(), SimulationError> {
        Simulation::start(self)
    }

    fn pause(&self) -> Result<(), SimulationError> {
        Simulation::pause(self)
    }

    fn reset(&self) -> Result<(), SimulationError> {
        Simulation::reset(self)
    }

    fn run_state(&self) -> RunState {
        Simulation::run_state(self)
    }
}
