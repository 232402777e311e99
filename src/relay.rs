//! Engine callback relay
//!
//! The engine issues callbacks from its own threads. Nothing there may touch
//! bridge or view state directly: callbacks are posted as messages onto the
//! UI run loop and handled by the owning view on the UI thread. The post is
//! fire-and-forget; no callback ever blocks.

use std::sync::Arc;

use crate::engine::{EngineAction, SurfaceId};

/// Message posted from an engine callback onto the UI run loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayEvent {
    /// Pending internal engine work; schedule a tick on the UI thread.
    /// Multiple wakeups before the tick runs coalesce naturally.
    Wakeup,
    /// Engine-originated action for the surface it targets.
    Action {
        target: SurfaceId,
        action: EngineAction,
    },
}

/// A handle to the UI run loop queue.
pub trait Dispatcher: Send + Sync {
    /// Post a message onto the UI run loop. Must not block.
    fn post(&self, event: RelayEvent);
}

/// The callback surface handed to the engine at initialization.
///
/// Cheap to clone; safe to invoke from any engine-owned thread. Each call
/// redispatches and returns immediately.
#[derive(Clone)]
pub struct EngineCallbacks {
    dispatcher: Arc<dyn Dispatcher>,
}

impl EngineCallbacks {
    pub fn new(dispatcher: Arc<dyn Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// The engine has pending internal work.
    pub fn wakeup(&self) {
        self.dispatcher.post(RelayEvent::Wakeup);
    }

    /// The engine raised an action for the given surface.
    pub fn action(&self, target: SurfaceId, action: EngineAction) {
        self.dispatcher.post(RelayEvent::Action { target, action });
    }
}
