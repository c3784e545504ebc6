//! Fuzz target for the lock controller state machine
//!
//! # Strategy
//!
//! - Arbitrary interleavings of lifecycle changes, retries, toggles, prompt
//!   results, service errors and elapsed time
//! - Prompt results arrive whether or not a prompt is outstanding
//!
//! # Invariants
//!
//! - Failure counter never exceeds the attempt limit
//! - Locked out exactly while a deadline is set, never further than one window
//! - At most one prompt outstanding
//! - No prompt starts or stays outstanding during a lockout
//! - Lock screen only while the setting is on
//! - Overlay shown exactly while not in the foreground

#![no_main]

use std::time::{Duration, Instant};

use arbitrary::Arbitrary;
use feeda_core::{
    AppState, AuthOutcome, Availability, BiometricKind, LockAction, LockConfig, LockController,
    LockEvent,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Clone, Arbitrary)]
enum Op {
    Lifecycle { state: u8, lock_enabled: bool },
    Retry,
    Toggle(bool),
    Outcome(u8),
    ServiceError,
    AdvanceMillis(u16),
}

fn app_state(n: u8) -> AppState {
    match n % 3 {
        0 => AppState::Active,
        1 => AppState::Inactive,
        _ => AppState::Background,
    }
}

fn outcome(n: u8) -> AuthOutcome {
    match n % 4 {
        0 => AuthOutcome::Success,
        1 => AuthOutcome::Fallback,
        2 => AuthOutcome::Cancelled,
        _ => AuthOutcome::Failed { reason: "fuzz".into() },
    }
}

fuzz_target!(|input: (bool, Vec<Op>)| {
    let (lock_enabled, ops) = input;
    let config = LockConfig::default();
    let mut now = Instant::now();
    let mut lock = LockController::new(config.clone());
    let mut outstanding = 0usize;

    let availability = Availability::Available(BiometricKind::Fingerprint);
    let _ = lock.handle(LockEvent::Mounted { lock_enabled, availability, now });

    for op in ops {
        let event = match op {
            Op::Lifecycle { state, lock_enabled } => {
                LockEvent::AppStateChanged { next: app_state(state), lock_enabled, now }
            },
            Op::Retry => LockEvent::RetryPressed,
            Op::Toggle(enable) => LockEvent::ToggleRequested { enable },
            Op::Outcome(n) => LockEvent::AuthFinished { outcome: outcome(n), now },
            Op::ServiceError => LockEvent::AuthErrored { message: "fuzz".into() },
            Op::AdvanceMillis(ms) => {
                now += Duration::from_millis(u64::from(ms));
                LockEvent::Tick { now }
            },
        };
        let settles = matches!(event, LockEvent::AuthFinished { .. } | LockEvent::AuthErrored { .. });

        let locked_out_before = lock.is_locked_out();
        let actions = lock.handle(event);
        if settles {
            outstanding = 0;
        }
        let started = actions.iter().filter(|a| matches!(a, LockAction::Authenticate(_))).count();
        outstanding += started;

        assert!(!(locked_out_before && started > 0), "prompt started during lockout");
        assert!(!(lock.is_locked_out() && lock.pending().is_some()));

        assert!(outstanding <= 1, "more than one prompt outstanding");
        assert_eq!(outstanding == 1, lock.pending().is_some());
        assert!(lock.failed_attempts() <= config.max_attempts);
        assert_eq!(lock.is_locked_out(), lock.lockout_until().is_some());
        if let Some(until) = lock.lockout_until() {
            assert!(until - now <= config.lockout_duration);
            assert_eq!(lock.failed_attempts(), config.max_attempts);
        }
        if lock.is_lock_visible() {
            assert!(lock.lock_enabled());
        }
        assert_eq!(lock.is_overlay_visible(), lock.app_state() != AppState::Active);
    }
});
