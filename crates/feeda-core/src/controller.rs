//! App-lock state machine.
//!
//! Watches lifecycle transitions and decides when to blank the screen and when
//! to demand re-authentication. Uses the action pattern: events carry the
//! current time, methods return actions for the runtime to execute. Timers are
//! deadlines checked on [`LockEvent::Tick`]; cancelling a timer clears its
//! deadline.
//!
//! # Ordering
//!
//! The blanking overlay flag is set inside the same `handle` call that
//! receives the backgrounding transition, before any action is returned. The
//! platform snapshots the screen for the app switcher right after that
//! transition, so the overlay must be the first paint change.
//!
//! # Single flight
//!
//! At most one authentication prompt is outstanding. While one is pending,
//! retries, toggle requests, and the automatic prompt are no-ops.

use std::{
    ops::{Add, Sub},
    time::Duration,
};

use crate::{
    AppState, AuthOutcome, AuthPurpose, Availability, LockAction, LockEvent, LockPhase, LockView,
    Notice, PromptOptions,
};

/// Consecutive failures that trigger a lockout.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Length of the lockout window.
pub const DEFAULT_LOCKOUT_DURATION: Duration = Duration::from_secs(30);

/// Delay between showing the lock screen and the automatic prompt, so the
/// prompt does not race the screen transition.
pub const DEFAULT_AUTO_PROMPT_DELAY: Duration = Duration::from_millis(500);

/// Haptic pulse length on a rejected attempt.
pub const DEFAULT_VIBRATION: Duration = Duration::from_millis(400);

/// Lock controller configuration.
#[derive(Debug, Clone)]
pub struct LockConfig {
    /// Consecutive failures before lockout (must be > 0).
    pub max_attempts: u32,
    /// Lockout window length.
    pub lockout_duration: Duration,
    /// Debounce before the automatic prompt.
    pub auto_prompt_delay: Duration,
    /// Haptic pulse on failure.
    pub vibration: Duration,
    /// Platform prompt configuration.
    pub prompt: PromptOptions,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            lockout_duration: DEFAULT_LOCKOUT_DURATION,
            auto_prompt_delay: DEFAULT_AUTO_PROMPT_DELAY,
            vibration: DEFAULT_VIBRATION,
            prompt: PromptOptions::default(),
        }
    }
}

/// App-lock state machine.
///
/// Pure: no I/O and no clock. Generic over the instant type so simulation can
/// drive it with virtual time.
#[derive(Debug, Clone)]
pub struct LockController<I>
where
    I: Copy + Ord + Sub<Output = Duration> + Add<Duration, Output = I>,
{
    config: LockConfig,
    /// Last lifecycle state reported by the platform.
    app_state: AppState,
    overlay_visible: bool,
    lock_visible: bool,
    /// Consecutive rejected unlock attempts, in `[0, max_attempts]`.
    failed_attempts: u32,
    /// Lockout deadline. `Some` exactly while locked out.
    lockout_until: Option<I>,
    /// Debounced automatic prompt deadline.
    auto_prompt_at: Option<I>,
    /// Automatic prompt already fired for the current lock screen.
    auto_prompted: bool,
    /// Purpose of the outstanding prompt. `None` if no prompt is showing.
    pending: Option<AuthPurpose>,
    /// Last known persisted setting.
    lock_enabled: bool,
    availability: Availability,
    notice: Option<Notice>,
    /// Torn down; all further events are ignored.
    dismissed: bool,
}

impl<I> LockController<I>
where
    I: Copy + Ord + Sub<Output = Duration> + Add<Duration, Output = I>,
{
    /// Create a controller for an app in the foreground with the lock hidden.
    pub fn new(config: LockConfig) -> Self {
        debug_assert!(config.max_attempts > 0);

        Self {
            config,
            app_state: AppState::Active,
            overlay_visible: false,
            lock_visible: false,
            failed_attempts: 0,
            lockout_until: None,
            auto_prompt_at: None,
            auto_prompted: false,
            pending: None,
            lock_enabled: false,
            availability: Availability::Unavailable,
            notice: None,
            dismissed: false,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: LockEvent<I>) -> Vec<LockAction> {
        if self.dismissed {
            tracing::debug!("event after dismissal ignored");
            return vec![];
        }

        match event {
            LockEvent::Mounted { lock_enabled, availability, now } => {
                self.on_mounted(lock_enabled, availability, now)
            },
            LockEvent::AppStateChanged { next, lock_enabled, now } => {
                self.on_app_state(next, lock_enabled, now)
            },
            LockEvent::RetryPressed => self.on_retry(),
            LockEvent::ToggleRequested { enable } => self.on_toggle(enable),
            LockEvent::AuthFinished { outcome, now } => self.on_auth_finished(outcome, now),
            LockEvent::AuthErrored { message } => self.on_auth_errored(&message),
            LockEvent::Tick { now } => self.on_tick(now),
            LockEvent::Dismissed => self.on_dismissed(),
        }
    }

    fn on_mounted(
        &mut self,
        lock_enabled: bool,
        availability: Availability,
        now: I,
    ) -> Vec<LockAction> {
        self.availability = availability;
        self.lock_enabled = lock_enabled;

        let mut actions = Vec::new();
        if !availability.is_available() {
            self.notice = Some(Notice::AuthUnavailable);
            actions.push(LockAction::Notify(Notice::AuthUnavailable));
        }

        if lock_enabled {
            tracing::info!("app lock engaged at startup");
            self.show_lock(now);
        }

        actions.push(LockAction::Render);
        actions
    }

    fn on_app_state(&mut self, next: AppState, lock_enabled: bool, now: I) -> Vec<LockAction> {
        let previous = self.app_state;
        self.app_state = next;

        match (previous, next) {
            (AppState::Active, AppState::Inactive | AppState::Background) => {
                self.overlay_visible = true;
                self.auto_prompt_at = None;
                vec![LockAction::Render]
            },
            (AppState::Inactive | AppState::Background, AppState::Active) => {
                self.lock_enabled = lock_enabled;
                self.overlay_visible = false;

                if lock_enabled {
                    if !self.lock_visible {
                        tracing::info!("app lock engaged");
                    }
                    self.show_lock(now);
                } else {
                    self.lock_visible = false;
                    self.auto_prompt_at = None;
                }
                vec![LockAction::Render]
            },
            _ => vec![],
        }
    }

    fn on_retry(&mut self) -> Vec<LockAction> {
        if !self.lock_visible {
            tracing::debug!("retry ignored: lock screen not shown");
            return vec![];
        }
        if self.lockout_until.is_some() {
            tracing::debug!("retry ignored: locked out");
            return vec![];
        }
        if self.pending.is_some() {
            tracing::debug!("retry ignored: prompt already showing");
            return vec![];
        }

        self.auto_prompt_at = None;
        self.begin_auth(AuthPurpose::Unlock)
    }

    fn on_toggle(&mut self, enable: bool) -> Vec<LockAction> {
        if enable == self.lock_enabled {
            tracing::debug!(enable, "toggle ignored: setting unchanged");
            return vec![];
        }
        if self.lock_visible || self.pending.is_some() {
            tracing::debug!(enable, "toggle ignored: lock flow busy");
            return vec![];
        }
        if self.lockout_until.is_some() {
            tracing::debug!(enable, "toggle ignored: locked out");
            return vec![];
        }

        self.begin_auth(AuthPurpose::Toggle { enable })
    }

    fn on_auth_finished(&mut self, outcome: AuthOutcome, now: I) -> Vec<LockAction> {
        let Some(purpose) = self.pending.take() else {
            tracing::warn!(?outcome, "authentication result without pending prompt");
            return vec![];
        };

        match purpose {
            AuthPurpose::Unlock => self.finish_unlock(outcome, now),
            AuthPurpose::Toggle { enable } => self.finish_toggle(enable, outcome),
        }
    }

    /// Apply an unlock result. A result arriving after the lock screen was
    /// hidden counts for nothing.
    fn finish_unlock(&mut self, outcome: AuthOutcome, now: I) -> Vec<LockAction> {
        if !self.lock_visible {
            tracing::debug!(?outcome, "unlock result ignored: lock screen not shown");
            return vec![LockAction::Render];
        }

        match outcome {
            AuthOutcome::Success | AuthOutcome::Fallback => {
                tracing::info!(?outcome, "app unlocked");
                self.lock_visible = false;
                self.failed_attempts = 0;
                self.auto_prompt_at = None;
                self.notice = None;
                vec![LockAction::Render]
            },
            AuthOutcome::Cancelled => {
                tracing::debug!("unlock prompt cancelled");
                vec![LockAction::Render]
            },
            AuthOutcome::Failed { reason } => {
                self.failed_attempts = (self.failed_attempts + 1).min(self.config.max_attempts);
                tracing::info!(%reason, failed_attempts = self.failed_attempts, "unlock rejected");

                let notice = if self.failed_attempts >= self.config.max_attempts {
                    tracing::info!(duration = ?self.config.lockout_duration, "locked out");
                    self.lockout_until = Some(now + self.config.lockout_duration);
                    Notice::LockedOut
                } else {
                    Notice::AttemptsRemaining(self.config.max_attempts - self.failed_attempts)
                };
                self.notice = Some(notice);

                vec![
                    LockAction::Vibrate { duration: self.config.vibration },
                    LockAction::Notify(notice),
                    LockAction::Render,
                ]
            },
        }
    }

    /// Apply a toggle result. A successful disable also hides a lock screen
    /// raised while the prompt was up.
    fn finish_toggle(&mut self, enable: bool, outcome: AuthOutcome) -> Vec<LockAction> {
        match outcome {
            AuthOutcome::Success | AuthOutcome::Fallback => {
                tracing::info!(enable, "app lock setting changed");
                self.lock_enabled = enable;
                if !enable {
                    self.lock_visible = false;
                    self.auto_prompt_at = None;
                }
                vec![LockAction::PersistLockSetting { enabled: enable }, LockAction::Render]
            },
            AuthOutcome::Cancelled => vec![LockAction::Render],
            AuthOutcome::Failed { reason } => {
                tracing::info!(%reason, enable, "app lock toggle rejected");
                self.notice = Some(Notice::AuthFailed);
                vec![LockAction::Notify(Notice::AuthFailed), LockAction::Render]
            },
        }
    }

    fn on_auth_errored(&mut self, message: &str) -> Vec<LockAction> {
        let purpose = self.pending.take();
        tracing::warn!(%message, ?purpose, "authentication service failed");

        self.notice = Some(Notice::ServiceError);
        vec![LockAction::Notify(Notice::ServiceError), LockAction::Render]
    }

    fn on_tick(&mut self, now: I) -> Vec<LockAction> {
        let mut actions = Vec::new();

        if let Some(until) = self.lockout_until
            && now >= until
        {
            tracing::info!("lockout expired");
            self.lockout_until = None;
            self.failed_attempts = 0;
            self.notice = None;
            actions.push(LockAction::Render);
        }

        if let Some(at) = self.auto_prompt_at
            && now >= at
        {
            self.auto_prompt_at = None;
            if self.can_prompt() && self.app_state == AppState::Active {
                self.auto_prompted = true;
                actions.extend(self.begin_auth(AuthPurpose::Unlock));
            }
        }

        actions
    }

    fn on_dismissed(&mut self) -> Vec<LockAction> {
        tracing::debug!("lock controller dismissed");
        self.dismissed = true;
        self.lockout_until = None;
        self.auto_prompt_at = None;
        self.pending = None;
        vec![]
    }

    /// Show the lock screen and arm the automatic prompt if it has not fired
    /// for this lock screen yet.
    fn show_lock(&mut self, now: I) {
        if !self.lock_visible {
            self.lock_visible = true;
            self.auto_prompted = false;
        }

        if !self.auto_prompted && self.can_prompt() {
            self.auto_prompt_at = Some(now + self.config.auto_prompt_delay);
        }
    }

    fn can_prompt(&self) -> bool {
        self.lock_visible && self.pending.is_none() && self.lockout_until.is_none()
    }

    fn begin_auth(&mut self, purpose: AuthPurpose) -> Vec<LockAction> {
        debug_assert!(self.pending.is_none());

        self.pending = Some(purpose);
        vec![LockAction::Render, LockAction::Authenticate(self.config.prompt.clone())]
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> LockPhase {
        if self.lock_visible {
            if self.lockout_until.is_some() { LockPhase::LockedOut } else { LockPhase::Locked }
        } else if self.overlay_visible {
            LockPhase::Backgrounding
        } else {
            LockPhase::Active
        }
    }

    /// Render snapshot.
    #[must_use]
    pub fn view(&self) -> LockView {
        LockView {
            phase: self.phase(),
            overlay_visible: self.overlay_visible,
            lock_visible: self.lock_visible,
            retry_enabled: self.can_prompt(),
            attempts_remaining: self.attempts_remaining(),
            label: self.availability.label(),
            notice: self.notice,
        }
    }

    /// Last lifecycle state reported by the platform.
    #[must_use]
    pub fn app_state(&self) -> AppState {
        self.app_state
    }

    /// Blanking overlay covers the UI.
    #[must_use]
    pub fn is_overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    /// Lock screen is shown.
    #[must_use]
    pub fn is_lock_visible(&self) -> bool {
        self.lock_visible
    }

    /// Consecutive rejected unlock attempts.
    #[must_use]
    pub fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }

    /// Attempts left before lockout.
    #[must_use]
    pub fn attempts_remaining(&self) -> u32 {
        self.config.max_attempts - self.failed_attempts
    }

    /// Lockout window is running.
    #[must_use]
    pub fn is_locked_out(&self) -> bool {
        self.lockout_until.is_some()
    }

    /// When the lockout ends. `None` if not locked out.
    #[must_use]
    pub fn lockout_until(&self) -> Option<I> {
        self.lockout_until
    }

    /// When the automatic prompt fires. `None` if not armed.
    #[must_use]
    pub fn auto_prompt_at(&self) -> Option<I> {
        self.auto_prompt_at
    }

    /// Purpose of the outstanding prompt. `None` if no prompt is showing.
    #[must_use]
    pub fn pending(&self) -> Option<AuthPurpose> {
        self.pending
    }

    /// Last known persisted app-lock setting.
    #[must_use]
    pub fn lock_enabled(&self) -> bool {
        self.lock_enabled
    }

    /// Cached biometric capability.
    #[must_use]
    pub fn availability(&self) -> Availability {
        self.availability
    }

    /// Most recent notice. `None` if nothing to show.
    #[must_use]
    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &LockConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::BiometricKind;

    const FACE: Availability = Availability::Available(BiometricKind::Facial);

    fn locked_controller(t0: Instant) -> LockController<Instant> {
        let mut lock = LockController::new(LockConfig::default());
        let _ = lock.handle(LockEvent::Mounted { lock_enabled: true, availability: FACE, now: t0 });
        lock
    }

    fn fail(lock: &mut LockController<Instant>, now: Instant) -> Vec<LockAction> {
        let actions = lock.handle(LockEvent::RetryPressed);
        assert!(actions.iter().any(|a| matches!(a, LockAction::Authenticate(_))));
        lock.handle(LockEvent::AuthFinished {
            outcome: AuthOutcome::Failed { reason: "not_recognized".into() },
            now,
        })
    }

    #[test]
    fn background_sets_overlay_first() {
        let t0 = Instant::now();
        let mut lock: LockController<Instant> = LockController::new(LockConfig::default());

        let actions = lock.handle(LockEvent::AppStateChanged {
            next: AppState::Background,
            lock_enabled: false,
            now: t0,
        });

        assert_eq!(actions, vec![LockAction::Render]);
        assert!(lock.is_overlay_visible());
        assert_eq!(lock.phase(), LockPhase::Backgrounding);
    }

    #[test]
    fn foreground_with_lock_enabled_shows_lock() {
        let t0 = Instant::now();
        let mut lock: LockController<Instant> = LockController::new(LockConfig::default());
        let _ = lock.handle(LockEvent::AppStateChanged {
            next: AppState::Inactive,
            lock_enabled: false,
            now: t0,
        });

        let _ = lock.handle(LockEvent::AppStateChanged {
            next: AppState::Active,
            lock_enabled: true,
            now: t0,
        });

        assert!(lock.is_lock_visible());
        assert!(!lock.is_overlay_visible());
        assert_eq!(lock.phase(), LockPhase::Locked);
        assert_eq!(lock.auto_prompt_at(), Some(t0 + DEFAULT_AUTO_PROMPT_DELAY));
    }

    #[test]
    fn foreground_with_lock_disabled_clears_everything() {
        let t0 = Instant::now();
        let mut lock: LockController<Instant> = LockController::new(LockConfig::default());
        let _ = lock.handle(LockEvent::AppStateChanged {
            next: AppState::Background,
            lock_enabled: false,
            now: t0,
        });
        let _ = lock.handle(LockEvent::AppStateChanged {
            next: AppState::Active,
            lock_enabled: false,
            now: t0,
        });

        assert!(!lock.is_lock_visible());
        assert!(!lock.is_overlay_visible());
        assert_eq!(lock.phase(), LockPhase::Active);
    }

    #[test]
    fn inactive_to_background_is_not_a_transition() {
        let t0 = Instant::now();
        let mut lock: LockController<Instant> = LockController::new(LockConfig::default());
        let _ = lock.handle(LockEvent::AppStateChanged {
            next: AppState::Inactive,
            lock_enabled: false,
            now: t0,
        });

        let actions = lock.handle(LockEvent::AppStateChanged {
            next: AppState::Background,
            lock_enabled: false,
            now: t0,
        });

        assert!(actions.is_empty());
        assert!(lock.is_overlay_visible());
    }

    #[test]
    fn auto_prompt_fires_after_debounce_once() {
        let t0 = Instant::now();
        let mut lock = locked_controller(t0);

        assert!(lock.handle(LockEvent::Tick { now: t0 }).is_empty());

        let actions = lock.handle(LockEvent::Tick { now: t0 + DEFAULT_AUTO_PROMPT_DELAY });
        assert!(matches!(actions.as_slice(), [LockAction::Render, LockAction::Authenticate(_)]));
        assert_eq!(lock.pending(), Some(AuthPurpose::Unlock));

        let _ = lock.handle(LockEvent::AuthFinished {
            outcome: AuthOutcome::Cancelled,
            now: t0 + Duration::from_secs(1),
        });
        assert!(lock.handle(LockEvent::Tick { now: t0 + Duration::from_secs(5) }).is_empty());
        assert_eq!(lock.phase(), LockPhase::Locked);
    }

    #[test]
    fn success_unlocks_and_resets_attempts() {
        let t0 = Instant::now();
        let mut lock = locked_controller(t0);
        let _ = fail(&mut lock, t0);
        assert_eq!(lock.failed_attempts(), 1);

        let _ = lock.handle(LockEvent::RetryPressed);
        let actions =
            lock.handle(LockEvent::AuthFinished { outcome: AuthOutcome::Success, now: t0 });

        assert_eq!(actions, vec![LockAction::Render]);
        assert_eq!(lock.failed_attempts(), 0);
        assert_eq!(lock.phase(), LockPhase::Active);
        assert_eq!(lock.auto_prompt_at(), None);
    }

    #[test]
    fn passcode_fallback_counts_as_success() {
        let t0 = Instant::now();
        let mut lock = locked_controller(t0);
        let _ = lock.handle(LockEvent::RetryPressed);
        let _ = lock.handle(LockEvent::AuthFinished { outcome: AuthOutcome::Fallback, now: t0 });

        assert!(!lock.is_lock_visible());
    }

    #[test]
    fn failure_vibrates_and_reports_remaining() {
        let t0 = Instant::now();
        let mut lock = locked_controller(t0);

        let actions = fail(&mut lock, t0);

        assert_eq!(actions, vec![
            LockAction::Vibrate { duration: DEFAULT_VIBRATION },
            LockAction::Notify(Notice::AttemptsRemaining(2)),
            LockAction::Render,
        ]);
        assert_eq!(lock.phase(), LockPhase::Locked);
    }

    #[test]
    fn cancel_is_not_counted() {
        let t0 = Instant::now();
        let mut lock = locked_controller(t0);
        let _ = lock.handle(LockEvent::RetryPressed);

        let actions =
            lock.handle(LockEvent::AuthFinished { outcome: AuthOutcome::Cancelled, now: t0 });

        assert_eq!(actions, vec![LockAction::Render]);
        assert_eq!(lock.failed_attempts(), 0);
        assert_eq!(lock.notice(), None);
    }

    #[test]
    fn third_failure_locks_out_and_blocks_retry() {
        let t0 = Instant::now();
        let mut lock = locked_controller(t0);
        let _ = fail(&mut lock, t0);
        let _ = fail(&mut lock, t0);
        let actions = fail(&mut lock, t0);

        assert!(actions.contains(&LockAction::Notify(Notice::LockedOut)));
        assert_eq!(lock.phase(), LockPhase::LockedOut);
        assert_eq!(lock.failed_attempts(), 3);
        assert!(!lock.view().retry_enabled);

        assert!(lock.handle(LockEvent::RetryPressed).is_empty());
        assert_eq!(lock.pending(), None);
    }

    #[test]
    fn lockout_expires_after_exact_duration_without_prompting() {
        let t0 = Instant::now();
        let mut lock = locked_controller(t0);
        for _ in 0..3 {
            let _ = fail(&mut lock, t0);
        }

        let almost = t0 + DEFAULT_LOCKOUT_DURATION - Duration::from_millis(1);
        assert!(lock.handle(LockEvent::Tick { now: almost }).is_empty());
        assert!(lock.is_locked_out());

        let actions = lock.handle(LockEvent::Tick { now: t0 + DEFAULT_LOCKOUT_DURATION });
        assert_eq!(actions, vec![LockAction::Render]);
        assert_eq!(lock.phase(), LockPhase::Locked);
        assert_eq!(lock.failed_attempts(), 0);
        assert!(lock.view().retry_enabled);
        assert_eq!(lock.pending(), None);
    }

    #[test]
    fn service_error_is_not_counted() {
        let t0 = Instant::now();
        let mut lock = locked_controller(t0);
        let _ = lock.handle(LockEvent::RetryPressed);

        let actions = lock.handle(LockEvent::AuthErrored { message: "sensor busy".into() });

        assert_eq!(actions, vec![LockAction::Notify(Notice::ServiceError), LockAction::Render]);
        assert_eq!(lock.failed_attempts(), 0);
        assert_eq!(lock.phase(), LockPhase::Locked);
        assert_eq!(lock.pending(), None);
    }

    #[test]
    fn retry_is_single_flight() {
        let t0 = Instant::now();
        let mut lock = locked_controller(t0);

        assert!(!lock.handle(LockEvent::RetryPressed).is_empty());
        assert!(lock.handle(LockEvent::RetryPressed).is_empty());
    }

    #[test]
    fn retry_cancels_auto_prompt() {
        let t0 = Instant::now();
        let mut lock = locked_controller(t0);
        let _ = lock.handle(LockEvent::RetryPressed);
        let _ = lock.handle(LockEvent::AuthFinished { outcome: AuthOutcome::Cancelled, now: t0 });

        assert!(lock.handle(LockEvent::Tick { now: t0 + Duration::from_secs(1) }).is_empty());
    }

    #[test]
    fn background_cancels_armed_auto_prompt_and_foreground_rearms() {
        let t0 = Instant::now();
        let mut lock = locked_controller(t0);

        let _ = lock.handle(LockEvent::AppStateChanged {
            next: AppState::Background,
            lock_enabled: true,
            now: t0,
        });
        assert_eq!(lock.auto_prompt_at(), None);
        assert!(lock.is_lock_visible());

        let t1 = t0 + Duration::from_secs(10);
        let _ = lock.handle(LockEvent::AppStateChanged {
            next: AppState::Active,
            lock_enabled: true,
            now: t1,
        });
        assert_eq!(lock.auto_prompt_at(), Some(t1 + DEFAULT_AUTO_PROMPT_DELAY));
    }

    #[test]
    fn prompt_induced_inactive_does_not_reprompt() {
        let t0 = Instant::now();
        let mut lock = locked_controller(t0);
        let _ = lock.handle(LockEvent::Tick { now: t0 + DEFAULT_AUTO_PROMPT_DELAY });
        assert!(lock.pending().is_some());

        let _ = lock.handle(LockEvent::AppStateChanged {
            next: AppState::Inactive,
            lock_enabled: true,
            now: t0,
        });
        let _ = lock.handle(LockEvent::AppStateChanged {
            next: AppState::Active,
            lock_enabled: true,
            now: t0,
        });

        assert_eq!(lock.auto_prompt_at(), None);
    }

    #[test]
    fn toggle_requires_authentication() {
        let t0 = Instant::now();
        let mut lock: LockController<Instant> = LockController::new(LockConfig::default());
        let _ = lock.handle(LockEvent::Mounted { lock_enabled: false, availability: FACE, now: t0 });

        let actions = lock.handle(LockEvent::ToggleRequested { enable: true });
        assert!(matches!(actions.as_slice(), [LockAction::Render, LockAction::Authenticate(_)]));
        assert!(!lock.lock_enabled());

        let actions =
            lock.handle(LockEvent::AuthFinished { outcome: AuthOutcome::Success, now: t0 });
        assert_eq!(actions, vec![
            LockAction::PersistLockSetting { enabled: true },
            LockAction::Render
        ]);
        assert!(lock.lock_enabled());
        assert!(!lock.is_lock_visible());
    }

    #[test]
    fn disabling_toggle_clears_lock_raised_during_prompt() {
        let t0 = Instant::now();
        let mut lock: LockController<Instant> = LockController::new(LockConfig::default());
        let _ = lock.handle(LockEvent::Mounted { lock_enabled: true, availability: FACE, now: t0 });
        let _ = lock.handle(LockEvent::RetryPressed);
        let _ = lock.handle(LockEvent::AuthFinished { outcome: AuthOutcome::Success, now: t0 });

        let _ = lock.handle(LockEvent::ToggleRequested { enable: false });
        let _ = lock.handle(LockEvent::AppStateChanged {
            next: AppState::Background,
            lock_enabled: true,
            now: t0,
        });
        let _ = lock.handle(LockEvent::AppStateChanged {
            next: AppState::Active,
            lock_enabled: true,
            now: t0,
        });
        assert!(lock.is_lock_visible());
        assert_eq!(lock.auto_prompt_at(), None);

        let _ = lock.handle(LockEvent::AuthFinished { outcome: AuthOutcome::Success, now: t0 });

        assert!(!lock.lock_enabled());
        assert!(!lock.is_lock_visible());
        assert_eq!(lock.phase(), LockPhase::Active);
    }

    #[test]
    fn rejected_toggle_keeps_setting_and_counts_nothing() {
        let t0 = Instant::now();
        let mut lock: LockController<Instant> = LockController::new(LockConfig::default());
        let _ = lock.handle(LockEvent::ToggleRequested { enable: true });

        let actions = lock.handle(LockEvent::AuthFinished {
            outcome: AuthOutcome::Failed { reason: "lockout".into() },
            now: t0,
        });

        assert_eq!(actions, vec![LockAction::Notify(Notice::AuthFailed), LockAction::Render]);
        assert!(!lock.lock_enabled());
        assert_eq!(lock.failed_attempts(), 0);
    }

    #[test]
    fn unchanged_toggle_is_ignored() {
        let mut lock: LockController<Instant> = LockController::new(LockConfig::default());
        assert!(lock.handle(LockEvent::ToggleRequested { enable: false }).is_empty());
    }

    #[test]
    fn toggle_ignored_while_locked_out_behind_hidden_lock() {
        let t0 = Instant::now();
        let mut lock = locked_controller(t0);
        for _ in 0..3 {
            let _ = fail(&mut lock, t0);
        }
        let _ = lock.handle(LockEvent::AppStateChanged {
            next: AppState::Background,
            lock_enabled: true,
            now: t0,
        });
        let _ = lock.handle(LockEvent::AppStateChanged {
            next: AppState::Active,
            lock_enabled: false,
            now: t0,
        });
        assert!(!lock.is_lock_visible());
        assert!(lock.is_locked_out());

        assert!(lock.handle(LockEvent::ToggleRequested { enable: true }).is_empty());
        assert_eq!(lock.pending(), None);

        let _ = lock.handle(LockEvent::Tick { now: t0 + DEFAULT_LOCKOUT_DURATION });
        let actions = lock.handle(LockEvent::ToggleRequested { enable: true });
        assert!(matches!(actions.as_slice(), [LockAction::Render, LockAction::Authenticate(_)]));
    }

    #[test]
    fn unlock_result_after_lock_hidden_is_not_counted() {
        let t0 = Instant::now();
        let mut lock = locked_controller(t0);
        let _ = lock.handle(LockEvent::RetryPressed);
        let _ = lock.handle(LockEvent::AppStateChanged {
            next: AppState::Inactive,
            lock_enabled: true,
            now: t0,
        });
        let _ = lock.handle(LockEvent::AppStateChanged {
            next: AppState::Active,
            lock_enabled: false,
            now: t0,
        });

        let actions = lock.handle(LockEvent::AuthFinished {
            outcome: AuthOutcome::Failed { reason: "not_recognized".into() },
            now: t0,
        });

        assert_eq!(actions, vec![LockAction::Render]);
        assert_eq!(lock.failed_attempts(), 0);
        assert_eq!(lock.notice(), None);
        assert_eq!(lock.pending(), None);
        assert!(!lock.is_locked_out());
    }

    #[test]
    fn unavailable_biometrics_notifies_at_mount() {
        let t0 = Instant::now();
        let mut lock: LockController<Instant> = LockController::new(LockConfig::default());

        let actions = lock.handle(LockEvent::Mounted {
            lock_enabled: true,
            availability: Availability::Unavailable,
            now: t0,
        });

        assert_eq!(actions, vec![LockAction::Notify(Notice::AuthUnavailable), LockAction::Render]);
        assert_eq!(lock.view().label, "Device Passcode");
        assert!(lock.is_lock_visible());
    }

    #[test]
    fn dismissed_controller_ignores_deadlines() {
        let t0 = Instant::now();
        let mut lock = locked_controller(t0);
        for _ in 0..3 {
            let _ = fail(&mut lock, t0);
        }

        let _ = lock.handle(LockEvent::Dismissed);

        assert!(!lock.is_locked_out());
        assert!(lock.handle(LockEvent::Tick { now: t0 + Duration::from_secs(60) }).is_empty());
        assert!(lock.handle(LockEvent::RetryPressed).is_empty());
    }

    #[test]
    fn stray_auth_result_is_ignored() {
        let t0 = Instant::now();
        let mut lock = locked_controller(t0);

        let actions =
            lock.handle(LockEvent::AuthFinished { outcome: AuthOutcome::Success, now: t0 });

        assert!(actions.is_empty());
        assert!(lock.is_lock_visible());
    }
}
