//! Packager configuration and deadline tracking.

use crate::Error;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for [`Packager`](crate::packager::Packager).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PackagerConfig {
    /// Maximum computation time in milliseconds (0 = unlimited).
    pub time_limit_ms: u64,

    /// Only every n-th interrupt check reads the clock.
    pub checkpoints_per_deadline_check: usize,

    /// Maximum number of containers for multi-container packing (0 = unlimited).
    pub max_containers: usize,

    /// Tries candidate containers concurrently.
    pub parallel: bool,
}

impl Default for PackagerConfig {
    fn default() -> Self {
        Self {
            time_limit_ms: 0,
            checkpoints_per_deadline_check: 1,
            max_containers: 0,
            parallel: false,
        }
    }
}

impl PackagerConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the time limit in milliseconds.
    pub fn with_time_limit(mut self, ms: u64) -> Self {
        self.time_limit_ms = ms;
        self
    }

    /// Sets how many interrupt checks share one clock read.
    pub fn with_checkpoints_per_deadline_check(mut self, n: usize) -> Self {
        self.checkpoints_per_deadline_check = n.max(1);
        self
    }

    /// Sets the container limit for multi-container packing.
    pub fn with_max_containers(mut self, n: usize) -> Self {
        self.max_containers = n;
        self
    }

    /// Enables or disables concurrent container evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Interrupt source combining a wall-clock limit and a cancellation flag.
#[derive(Debug)]
pub struct Deadline {
    start: Instant,
    limit: Option<Duration>,
    cancelled: Arc<AtomicBool>,
    stride: usize,
    checks: AtomicUsize,
    expired: AtomicBool,
}

impl Deadline {
    /// Starts the clock now.
    pub fn new(config: &PackagerConfig, cancelled: Arc<AtomicBool>) -> Self {
        Self {
            start: Instant::now(),
            limit: (config.time_limit_ms > 0).then(|| Duration::from_millis(config.time_limit_ms)),
            cancelled,
            stride: config.checkpoints_per_deadline_check.max(1),
            checks: AtomicUsize::new(0),
            expired: AtomicBool::new(false),
        }
    }

    /// A deadline that never fires unless cancelled.
    pub fn unlimited(cancelled: Arc<AtomicBool>) -> Self {
        Self::new(&PackagerConfig::default(), cancelled)
    }

    /// Checks whether work should stop.
    pub fn is_reached(&self) -> bool {
        if self.cancelled.load(Ordering::Relaxed) {
            return true;
        }

        if let Some(limit) = self.limit {
            let n = self.checks.fetch_add(1, Ordering::Relaxed);
            if n % self.stride == 0 && self.start.elapsed() >= limit {
                self.expired.store(true, Ordering::Relaxed);
            }
        }

        self.expired.load(Ordering::Relaxed)
    }

    /// Returns the elapsed time in milliseconds.
    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    /// Returns the error describing why work stopped.
    pub fn error(&self) -> Error {
        if self.cancelled.load(Ordering::Relaxed) {
            Error::Cancelled
        } else {
            Error::Timeout(self.limit.map_or(0, |l| l.as_millis() as u64))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = PackagerConfig::new()
            .with_time_limit(500)
            .with_checkpoints_per_deadline_check(0)
            .with_max_containers(3)
            .with_parallel(true);

        assert_eq!(config.time_limit_ms, 500);
        assert_eq!(config.checkpoints_per_deadline_check, 1);
        assert_eq!(config.max_containers, 3);
        assert!(config.parallel);
    }

    #[test]
    fn test_unlimited_deadline() {
        let deadline = Deadline::unlimited(Arc::new(AtomicBool::new(false)));
        assert!(!deadline.is_reached());
    }

    #[test]
    fn test_cancelled_deadline() {
        let flag = Arc::new(AtomicBool::new(false));
        let deadline = Deadline::unlimited(flag.clone());
        flag.store(true, Ordering::Relaxed);
        assert!(deadline.is_reached());
        assert!(matches!(deadline.error(), Error::Cancelled));
    }

    #[test]
    fn test_expired_deadline() {
        let config = PackagerConfig::new().with_time_limit(1);
        let deadline = Deadline::new(&config, Arc::new(AtomicBool::new(false)));
        std::thread::sleep(Duration::from_millis(5));
        assert!(deadline.is_reached());
        // stays expired
        assert!(deadline.is_reached());
        assert!(matches!(deadline.error(), Error::Timeout(1)));
    }
}
