//! Production Environment implementation using system time.
//!
//! `SystemEnv` uses `std::time::Instant`, which advances naturally, and tokio
//! timers for real wall-clock delays. Behavior is therefore not reproducible;
//! tests use the simulation environment instead.

use std::time::Duration;

use feeda_core::env::Environment;

/// Production environment using system time.
#[derive(Debug, Clone, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Create a new system environment.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    type Instant = std::time::Instant;

    #[allow(clippy::disallowed_methods)]
    fn now(&self) -> Self::Instant {
        std::time::Instant::now()
    }

    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}
