//! Lock controller input events.
//!
//! Events come from three places: the platform lifecycle listener, the lock
//! screen controls, and the results of authentication attempts the controller
//! asked for. Time-dependent events carry `now` so the controller never reads
//! a clock.

use crate::{AppState, Availability};

/// Result of a platform authentication prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Biometric check passed.
    Success,
    /// User chose the device passcode and it was accepted.
    Fallback,
    /// User dismissed the prompt.
    Cancelled,
    /// Check rejected (wrong face, unknown finger, ...).
    Failed {
        /// Platform reason code.
        reason: String,
    },
}

impl AuthOutcome {
    /// Whether the outcome grants access.
    ///
    /// The device passcode is an accepted equivalent factor.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success | Self::Fallback)
    }
}

/// Events processed by the lock controller.
#[derive(Debug, Clone)]
pub enum LockEvent<I> {
    /// Lock screen mounted at startup.
    Mounted {
        /// Persisted app-lock setting.
        lock_enabled: bool,
        /// Resolved biometric capability.
        availability: Availability,
        /// Current time.
        now: I,
    },

    /// OS lifecycle transition.
    AppStateChanged {
        /// New lifecycle state.
        next: AppState,
        /// Persisted app-lock setting, read while delivering a transition to
        /// [`AppState::Active`]. Ignored for other transitions.
        lock_enabled: bool,
        /// Current time.
        now: I,
    },

    /// User pressed the retry control.
    RetryPressed,

    /// User flipped the app-lock toggle in settings.
    ToggleRequested {
        /// Requested value.
        enable: bool,
    },

    /// Authentication prompt finished.
    AuthFinished {
        /// Prompt result.
        outcome: AuthOutcome,
        /// Current time.
        now: I,
    },

    /// Authentication prompt failed to run (platform error, not a rejection).
    AuthErrored {
        /// Error description.
        message: String,
    },

    /// Periodic tick for deadline processing.
    Tick {
        /// Current time.
        now: I,
    },

    /// Controller torn down. Pending deadlines are dropped.
    Dismissed,
}
