//! Round configuration.

use std::time::Duration;

use crate::domain::RoundConfigError;

/// Size of a complete round and how long each entry waits before its timer
/// forces a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundConfig {
    /// Members needed to close a round without waiting
    pub capacity: usize,
    /// Delay between an entry joining and its timer firing
    pub wait: Duration,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            capacity: 4,
            wait: Duration::from_secs(3),
        }
    }
}

impl RoundConfig {
    /// Create a config with the given capacity and wait.
    pub fn new(capacity: usize, wait: Duration) -> Self {
        Self { capacity, wait }
    }

    /// Reject values that would make rounds impossible to form.
    pub fn validate(&self) -> Result<(), RoundConfigError> {
        if self.capacity == 0 {
            return Err(RoundConfigError::ZeroCapacity);
        }
        if self.wait.is_zero() {
            return Err(RoundConfigError::ZeroWait);
        }
        Ok(())
    }

    /// Testing config with a short wait
    #[cfg(test)]
    pub fn for_testing() -> Self {
        Self {
            capacity: 4,
            wait: Duration::from_millis(50),
        }
    }
}
