//! Core client logic for Feeda.
//!
//! Sans-IO state machines: callers feed events carrying the current time and
//! execute the returned actions. Nothing here touches the OS, so the same
//! code runs on a device and in deterministic simulation.
//!
//! # Components
//!
//! - [`LockController`]: app-lock / background guard state machine
//! - [`Availability`]: biometric capability resolution and display label
//! - [`settings`]: persisted setting keys and value codecs
//! - [`env::Environment`]: time abstraction for drivers

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod biometric;
mod controller;
pub mod env;
pub mod error;
mod event;
pub mod settings;
mod state;

pub use action::{LockAction, PromptOptions};
pub use biometric::{Availability, BiometricKind, Modality};
pub use controller::{
    DEFAULT_AUTO_PROMPT_DELAY, DEFAULT_LOCKOUT_DURATION, DEFAULT_MAX_ATTEMPTS, DEFAULT_VIBRATION,
    LockConfig, LockController,
};
pub use error::ParseError;
pub use event::{AuthOutcome, LockEvent};
pub use settings::Theme;
pub use state::{AppState, AuthPurpose, LockPhase, LockView, Notice};
