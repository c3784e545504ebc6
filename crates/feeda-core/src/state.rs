//! Observable lock state types.
//!
//! [`LockView`] is the render snapshot handed to drivers; it carries only
//! what the overlay and lock screen need to draw.

use std::{fmt, str::FromStr};

use crate::ParseError;

/// OS-reported application lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppState {
    /// In the foreground and receiving input.
    Active,
    /// Transitioning (app switcher, system prompt, incoming call).
    Inactive,
    /// In the background.
    Background,
}

impl AppState {
    /// Platform name of the state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Background => "background",
        }
    }
}

impl fmt::Display for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppState {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "background" => Ok(Self::Background),
            other => Err(ParseError::new("app state", other)),
        }
    }
}

/// Lock state machine phase.
///
/// ```text
///            background/inactive            active, lock on
/// ┌────────┐ ─────────────────> ┌──────────────┐ ───────────> ┌────────┐
/// │ Active │                    │ Backgrounding│              │ Locked │
/// └────────┘ <───────────────── └──────────────┘              └────────┘
///     ^        active, lock off                        3rd fail │  ^ 30 s
///     │                                                         v  │
///     └──────────────── success / fallback ──────────  ┌───────────┐
///                                                      │ LockedOut │
///                                                      └───────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockPhase {
    /// App usable, nothing covering it.
    Active,
    /// Blanking overlay shown, lock decision pending.
    Backgrounding,
    /// Lock screen shown, waiting for authentication.
    Locked,
    /// Lock screen shown, authentication disabled until the lockout expires.
    LockedOut,
}

/// Why an authentication attempt was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPurpose {
    /// Dismiss the lock screen.
    Unlock,
    /// Change the persisted app-lock setting.
    Toggle {
        /// Requested setting value.
        enable: bool,
    },
}

/// User-facing notice raised by the lock flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Authentication rejected; this many attempts remain before lockout.
    AttemptsRemaining(u32),
    /// Too many failures; retry disabled until the lockout expires.
    LockedOut,
    /// No biometric hardware or nothing enrolled.
    AuthUnavailable,
    /// Authentication rejected while changing the app-lock setting.
    AuthFailed,
    /// A platform service failed unexpectedly.
    ServiceError,
}

impl Notice {
    /// Whether the notice must be acknowledged before continuing.
    #[must_use]
    pub const fn is_blocking(self) -> bool {
        matches!(self, Self::LockedOut)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AttemptsRemaining(1) => f.write_str("1 attempt remaining"),
            Self::AttemptsRemaining(n) => write!(f, "{n} attempts remaining"),
            Self::LockedOut => f.write_str("Too many failed attempts. Please try again later."),
            Self::AuthUnavailable => f.write_str("Device authentication not available"),
            Self::AuthFailed => f.write_str("Authentication failed"),
            Self::ServiceError => f.write_str("Something went wrong. Please try again."),
        }
    }
}

/// Render snapshot of the lock controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockView {
    /// Current phase.
    pub phase: LockPhase,
    /// Blanking overlay covers the UI.
    pub overlay_visible: bool,
    /// Lock screen is shown.
    pub lock_visible: bool,
    /// Retry control is enabled. Dimmed when false.
    pub retry_enabled: bool,
    /// Attempts left before lockout.
    pub attempts_remaining: u32,
    /// Label of the unlock method.
    pub label: &'static str,
    /// Most recent notice. `None` if nothing to show.
    pub notice: Option<Notice>,
}
