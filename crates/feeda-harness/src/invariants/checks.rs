//! Standard invariant checks.
//!
//! These invariants capture behavioral properties that must always hold.
//! They verify WHAT must be true, not specific test scenarios.

use feeda_core::AppState;

use super::{Invariant, InvariantKind, InvariantResult, LockSnapshot, Violation};

/// Failure counter never exceeds the attempt limit.
pub struct AttemptsBounded;

impl Invariant for AttemptsBounded {
    fn kind(&self) -> InvariantKind {
        InvariantKind::AttemptsBounded
    }

    fn check(&self, state: &LockSnapshot) -> InvariantResult {
        if state.failed_attempts > state.max_attempts {
            return Err(Violation {
                invariant: self.kind(),
                message: format!(
                    "failed_attempts {} exceeds max_attempts {}",
                    state.failed_attempts, state.max_attempts
                ),
            });
        }
        Ok(())
    }
}

/// Lockout flag, deadline and retry control agree.
///
/// Locked out exactly while a deadline is set, the deadline is never further
/// away than one lockout window, the counter sits at the limit, and retry is
/// disabled.
pub struct LockedOutMatchesDeadline;

impl Invariant for LockedOutMatchesDeadline {
    fn kind(&self) -> InvariantKind {
        InvariantKind::LockedOutMatchesDeadline
    }

    fn check(&self, state: &LockSnapshot) -> InvariantResult {
        let violation = |message: String| Err(Violation { invariant: self.kind(), message });

        if state.locked_out != state.lockout_remaining.is_some() {
            return violation(format!(
                "locked_out {} but deadline remaining {:?}",
                state.locked_out, state.lockout_remaining
            ));
        }

        if let Some(remaining) = state.lockout_remaining
            && remaining > state.lockout_duration
        {
            return violation(format!(
                "deadline {remaining:?} away exceeds window {:?}",
                state.lockout_duration
            ));
        }

        if state.locked_out && state.failed_attempts != state.max_attempts {
            return violation(format!(
                "locked out with {} of {} failures",
                state.failed_attempts, state.max_attempts
            ));
        }

        if state.locked_out && state.retry_enabled {
            return violation("retry enabled while locked out".to_owned());
        }

        Ok(())
    }
}

/// No prompt is outstanding while a lockout runs.
///
/// A lockout starts only when an unlock prompt resolves, so a pending prompt
/// during one means some path started authentication past the lockout gate.
pub struct NoPromptDuringLockout;

impl Invariant for NoPromptDuringLockout {
    fn kind(&self) -> InvariantKind {
        InvariantKind::NoPromptDuringLockout
    }

    fn check(&self, state: &LockSnapshot) -> InvariantResult {
        if state.locked_out && state.prompt_pending {
            return Err(Violation {
                invariant: self.kind(),
                message: "authentication prompt outstanding while locked out".to_owned(),
            });
        }
        Ok(())
    }
}

/// Lock screen is only shown while the app-lock setting is on.
pub struct LockImpliesEnabled;

impl Invariant for LockImpliesEnabled {
    fn kind(&self) -> InvariantKind {
        InvariantKind::LockImpliesEnabled
    }

    fn check(&self, state: &LockSnapshot) -> InvariantResult {
        if state.lock_visible && !state.lock_enabled {
            return Err(Violation {
                invariant: self.kind(),
                message: "lock screen visible with app lock disabled".to_owned(),
            });
        }
        Ok(())
    }
}

/// Overlay covers the UI exactly while the app is not in the foreground.
pub struct OverlayWhileInBackground;

impl Invariant for OverlayWhileInBackground {
    fn kind(&self) -> InvariantKind {
        InvariantKind::OverlayWhileInBackground
    }

    fn check(&self, state: &LockSnapshot) -> InvariantResult {
        let away = state.app_state != AppState::Active;
        if state.overlay_visible != away {
            return Err(Violation {
                invariant: self.kind(),
                message: format!(
                    "overlay_visible {} in app state {}",
                    state.overlay_visible, state.app_state
                ),
            });
        }
        Ok(())
    }
}
