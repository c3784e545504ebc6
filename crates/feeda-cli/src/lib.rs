//! Console front end for Feeda.
//!
//! Runs the production [`feeda_app::Runtime`] against stdin and stdout so the
//! app lock can be exercised without a device, and exposes the chat markup
//! parser on the command line.
//!
//! # Components
//!
//! - [`ConsoleDriver`]: [`feeda_app::Driver`] over line-based console I/O
//! - [`SystemEnv`]: wall-clock environment
//! - [`commands`]: console command syntax
//! - [`preview`]: output formats for the `parse` subcommand

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod commands;
pub mod console;
pub mod preview;
pub mod system_env;

pub use console::{BiometricProfile, ConsoleDriver, ConsoleError};
pub use system_env::SystemEnv;
