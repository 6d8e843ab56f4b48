//! Startup configuration for the counter page.

use core::time::Duration;

use crate::Error;

/// Default time between ticks.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Default id of the document container the page mounts into.
pub const DEFAULT_MOUNT_TARGET: &str = "root";

/// Values fixed at startup and never changed while mounted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CounterConfig {
    /// Added to the count on every tick.
    pub amount: u64,
    pub tick_interval: Duration,
    pub mount_target: String,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            amount: 1,
            tick_interval: DEFAULT_TICK_INTERVAL,
            mount_target: DEFAULT_MOUNT_TARGET.to_string(),
        }
    }
}

impl CounterConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.tick_interval.is_zero() {
            return Err(Error::ZeroTickInterval);
        }
        if self.mount_target.is_empty() {
            return Err(Error::EmptyMountTarget);
        }
        Ok(())
    }
}
