//! Application shell for Feeda.
//!
//! Composes the pure [`feeda_core::LockController`] with platform I/O behind a
//! single trait, so the same orchestration runs on a device, in a console
//! demo, and in deterministic simulation.
//!
//! # Components
//!
//! - [`Driver`]: Trait for platform-specific I/O (lifecycle, biometrics,
//!   storage, haptics, rendering)
//! - [`Runtime`]: Generic orchestration loop using Driver
//! - [`Appearance`]: Idempotent theme application
//! - [`PlatformEvent`]: Inputs polled from the platform

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod appearance;
mod driver;
mod error;
mod event;
mod runtime;

pub use appearance::Appearance;
pub use driver::Driver;
pub use error::RuntimeError;
pub use event::PlatformEvent;
pub use runtime::{DEFAULT_TICK_INTERVAL, Runtime, RuntimeConfig};
