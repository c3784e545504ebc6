//! Observable state snapshots for invariant checking.
//!
//! Snapshots capture the observable state of the lock controller at a point
//! in time. Invariants operate on snapshots rather than live state to ensure
//! consistent, atomic checks.

use std::{
    ops::{Add, Sub},
    time::Duration,
};

use feeda_core::{AppState, LockController};

/// Snapshot of the lock controller's observable state.
#[derive(Debug, Clone)]
pub struct LockSnapshot {
    /// Last lifecycle state reported by the platform.
    pub app_state: AppState,
    /// Blanking overlay shown.
    pub overlay_visible: bool,
    /// Lock screen shown.
    pub lock_visible: bool,
    /// Last known persisted setting.
    pub lock_enabled: bool,
    /// Consecutive rejected unlock attempts.
    pub failed_attempts: u32,
    /// Configured attempt limit.
    pub max_attempts: u32,
    /// Retry disabled by lockout.
    pub locked_out: bool,
    /// Time until the lockout deadline. `None` if no deadline is set.
    pub lockout_remaining: Option<Duration>,
    /// Configured lockout window.
    pub lockout_duration: Duration,
    /// Retry control enabled in the rendered view.
    pub retry_enabled: bool,
    /// An authentication prompt is outstanding.
    pub prompt_pending: bool,
}

impl Default for LockSnapshot {
    /// State of a freshly created controller.
    fn default() -> Self {
        Self {
            app_state: AppState::Active,
            overlay_visible: false,
            lock_visible: false,
            lock_enabled: false,
            failed_attempts: 0,
            max_attempts: feeda_core::DEFAULT_MAX_ATTEMPTS,
            locked_out: false,
            lockout_remaining: None,
            lockout_duration: feeda_core::DEFAULT_LOCKOUT_DURATION,
            retry_enabled: false,
            prompt_pending: false,
        }
    }
}

impl LockSnapshot {
    /// Capture the controller state as seen at `now`.
    pub fn capture<I>(lock: &LockController<I>, now: I) -> Self
    where
        I: Copy + Ord + Sub<Output = Duration> + Add<Duration, Output = I>,
    {
        Self {
            app_state: lock.app_state(),
            overlay_visible: lock.is_overlay_visible(),
            lock_visible: lock.is_lock_visible(),
            lock_enabled: lock.lock_enabled(),
            failed_attempts: lock.failed_attempts(),
            max_attempts: lock.config().max_attempts,
            locked_out: lock.is_locked_out(),
            lockout_remaining: lock.lockout_until().map(|until| until - now),
            lockout_duration: lock.config().lockout_duration,
            retry_enabled: lock.view().retry_enabled,
            prompt_pending: lock.pending().is_some(),
        }
    }
}
