//! Deterministic simulation harness for the Feeda app lock.
//!
//! Virtual-time [`feeda_core::env::Environment`] and a scripted
//! [`feeda_app::Driver`] so the production [`feeda_app::Runtime`] runs
//! without a device.
//!
//! [`InvariantRegistry::standard()`] holds the lock-state rules the scenario
//! and property tests check after every step.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod invariants;
pub mod sim_driver;
pub mod sim_env;

pub use invariants::{
    AttemptsBounded, Invariant, InvariantKind, InvariantRegistry, InvariantResult,
    LockImpliesEnabled, LockSnapshot, LockedOutMatchesDeadline, NoPromptDuringLockout,
    OverlayWhileInBackground, Violation,
};
pub use sim_driver::{SimDriver, SimDriverError};
pub use sim_env::{SimEnv, SimInstant};
