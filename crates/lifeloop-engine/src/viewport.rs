//! Channel-backed [`ViewPort`] for renderers on another thread.

use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender, TrySendError};
use lifeloop_core::{Generation, ViewPort};
use tracing::{trace, warn};

/// Forwards publications over a bounded crossbeam channel.
///
/// Publishing never blocks the tick thread: when the channel is full the
/// generation is dropped and a warning is logged. The renderer can always
/// recover the latest state from
/// [`Simulation::snapshot`](crate::Simulation::snapshot).
#[derive(Clone, Debug)]
pub struct ChannelViewPort {
    tx: Sender<Arc<Generation>>,
}

impl ChannelViewPort {
    /// Create a viewport and the receiver its publications arrive on.
    ///
    /// A capacity of 0 is raised to 1.
    pub fn bounded(capacity: usize) -> (Self, Receiver<Arc<Generation>>) {
        let (tx, rx) = crossbeam_channel::bounded(capacity.max(1));
        (Self { tx }, rx)
    }
}

impl ViewPort for ChannelViewPort {
    fn publish(&self, generation: &Arc<Generation>) {
        match self.tx.try_send(Arc::clone(generation)) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                warn!(generation = %generation.id(), "renderer lagging, publication dropped");
            }
            Err(TrySendError::Disconnected(_)) => {
                trace!(generation = %generation.id(), "renderer gone, publication dropped");
            }
        }
    }
}
