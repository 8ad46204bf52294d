use std::time::Duration;

use tokio::runtime::{Handle, TryCurrentError};

use crate::ports::{RoundTimer, TimerCallback};

// ============================================================================
// TokioRoundTimer - Production Round Timer
// ============================================================================

/// Round timer that spawns one sleeping task per armed entry.
///
/// Tasks run on the runtime captured at construction, so `arm` may be
/// called from any thread.
#[derive(Debug, Clone)]
pub struct TokioRoundTimer {
    handle: Handle,
}

impl TokioRoundTimer {
    /// Use the runtime the caller is running on.
    ///
    /// # Errors
    ///
    /// Fails when called outside a Tokio runtime.
    pub fn try_current() -> Result<Self, TryCurrentError> {
        Ok(Self {
            handle: Handle::try_current()?,
        })
    }

    /// Use a specific runtime.
    #[must_use]
    pub fn from_handle(handle: Handle) -> Self {
        Self { handle }
    }
}

impl RoundTimer for TokioRoundTimer {
    fn arm(&self, wait: Duration, on_fire: TimerCallback) {
        self.handle.spawn(async move {
            tokio::time::sleep(wait).await;
            on_fire();
        });
    }
}
