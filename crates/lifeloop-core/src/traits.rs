//! Consumer-facing traits.

use std::sync::Arc;

use crate::generation::Generation;

/// Receives each newly published generation for rendering.
///
/// Called from the tick thread after every successful tick, and from the
/// caller's thread after reset or load. Implementations must return
/// promptly: a slow `publish` delays the next tick.
///
/// Any `Fn(&Arc<Generation>) + Send + Sync` closure is a `ViewPort`.
pub trait ViewPort: Send + Sync {
    /// Hand a fully formed generation to the renderer.
    fn publish(&self, generation: &Arc<Generation>);
}

impl<F> ViewPort for F
where
    F: Fn(&Arc<Generation>) + Send + Sync,
{
    fn publish(&self, generation: &Arc<Generation>) {
        self(generation)
    }
}

/// A viewport that discards every publication.
///
/// Used when the renderer polls `snapshot()` instead of being pushed to.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullViewPort;

impl ViewPort for NullViewPort {
    fn publish(&self, _generation: &Arc<Generation>) {}
}
