//! Per-tick metrics for the stepping loop.
//!
//! [`TickMetrics`] captures the most recent tick's timing and population
//! figures alongside cumulative loop counters.

use lifeloop_core::GenerationId;

/// Metrics for the most recent completed tick plus running totals.
///
/// Durations are in microseconds. Per-tick fields describe the last tick
/// that was swapped in; cumulative fields survive pause/resume and are only
/// cleared by dropping the simulation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickMetrics {
    /// Generation produced by the last completed tick.
    pub generation: GenerationId,
    /// Time spent in the step rule, in microseconds.
    pub step_us: u64,
    /// Alive cells after the tick (including merged edits).
    pub alive: usize,
    /// Dead-to-alive transitions computed by the rule.
    pub births: usize,
    /// Alive-to-dead transitions computed by the rule.
    pub deaths: usize,
    /// Edits made during the tick and re-applied on top of its output.
    pub merged_edits: usize,
    /// Cumulative number of ticks swapped in.
    pub ticks_completed: u64,
    /// Cumulative number of ticks discarded by reset or load.
    pub ticks_discarded: u64,
    /// Cumulative number of ticks that took longer than the tick period.
    pub overruns: u64,
}
