//! The background stepping loop.
//!
//! The tick thread waits on a [`crossbeam_channel::tick`] ticker and a stop
//! channel in the same `select!`. Stopping is signalled by dropping the
//! stop sender: the disconnect wakes the loop immediately, and the stop
//! channel is checked again after every ticker wakeup so a stop request
//! that lands alongside a tick wins.

use std::any::Any;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{select, Receiver, TryRecvError};
use lifeloop_core::{Generation, ViewPort};
use tracing::{debug, trace, warn};

use crate::active::ActiveGrid;
use crate::step::StepEngine;

/// What a single tick attempt produced.
pub(crate) enum TickOutcome {
    /// The tick completed and its generation is now active.
    Published(Arc<Generation>),
    /// A replacement landed while the tick was computing.
    Discarded,
    /// The grid was replaced before the tick began; nothing was stepped.
    Superseded,
}

/// Run one tick against `active`, provided the grid is still the one
/// from `epoch`.
///
/// Returns the outcome together with the wall time the tick took.
pub(crate) fn execute_tick(
    active: &ActiveGrid,
    engine: &StepEngine,
    epoch: u64,
) -> (TickOutcome, Duration) {
    let tick_start = Instant::now();
    let Some(input) = active.begin_tick(epoch) else {
        return (TickOutcome::Superseded, tick_start.elapsed());
    };
    let step_start = Instant::now();
    let output = engine.advance(input.generation().grid());
    let step_us = step_start.elapsed().as_micros() as u64;
    let outcome = match active.finish_tick(input, output, step_us) {
        Some(generation) => {
            trace!(
                generation = %generation.id(),
                step_us,
                alive = generation.alive_count(),
                "tick"
            );
            TickOutcome::Published(generation)
        }
        None => TickOutcome::Discarded,
    };
    (outcome, tick_start.elapsed())
}

/// Extract a readable message from a thread's panic payload.
pub(crate) fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// State moved into the tick thread.
pub(crate) struct TickThreadState {
    active: Arc<ActiveGrid>,
    engine: StepEngine,
    viewport: Arc<dyn ViewPort>,
    stop_rx: Receiver<()>,
    tick_period: Duration,
    /// The grid epoch this thread was started for.
    epoch: u64,
}

impl TickThreadState {
    pub fn new(
        active: Arc<ActiveGrid>,
        engine: StepEngine,
        viewport: Arc<dyn ViewPort>,
        stop_rx: Receiver<()>,
        tick_period: Duration,
        epoch: u64,
    ) -> Self {
        Self {
            active,
            engine,
            viewport,
            stop_rx,
            tick_period,
            epoch,
        }
    }

    /// Main tick loop. Runs until the stop channel is signalled or
    /// disconnected, or the grid is replaced under it.
    pub fn run(self) {
        debug!(
            period_ms = self.tick_period.as_millis() as u64,
            edge = ?self.engine.edge(),
            "tick thread started"
        );
        // The ticker's channel holds one pending tick, so a slow tick
        // skips missed deadlines instead of bursting to catch up.
        let ticker = crossbeam_channel::tick(self.tick_period);
        loop {
            select! {
                recv(self.stop_rx) -> _ => break,
                recv(ticker) -> _ => {
                    if self.stop_requested() || !self.run_tick() {
                        break;
                    }
                }
            }
        }
        debug!("tick thread stopped");
    }

    fn stop_requested(&self) -> bool {
        !matches!(self.stop_rx.try_recv(), Err(TryRecvError::Empty))
    }

    /// Returns `false` once the grid has been replaced and the thread
    /// should exit.
    fn run_tick(&self) -> bool {
        let (outcome, elapsed) = execute_tick(&self.active, &self.engine, self.epoch);
        if elapsed > self.tick_period {
            self.active.record_overrun();
            warn!(
                elapsed_us = elapsed.as_micros() as u64,
                period_us = self.tick_period.as_micros() as u64,
                "tick overran its period"
            );
        }
        match outcome {
            TickOutcome::Published(generation) => {
                self.viewport.publish(&generation);
                true
            }
            TickOutcome::Discarded => true,
            TickOutcome::Superseded => {
                debug!(epoch = self.epoch, "grid replaced, tick thread exiting");
                false
            }
        }
    }
}
