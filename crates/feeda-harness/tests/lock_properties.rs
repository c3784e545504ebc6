//! Property tests for the lock flow.
//!
//! Random interleavings of lifecycle changes, user input, prompt outcomes and
//! elapsed time, with the standard invariants checked after every step.

use std::time::Duration;

use feeda_app::{PlatformEvent, Runtime, RuntimeConfig};
use feeda_core::{
    AppState, AuthOutcome, Availability, BiometricKind, LockAction, LockConfig, LockController,
    LockEvent,
    env::Environment,
    settings::APP_LOCK_KEY,
};
use feeda_harness::{InvariantRegistry, LockSnapshot, SimDriver, SimEnv, SimInstant};
use proptest::prelude::*;

/// Generated controller inputs.
#[derive(Debug, Clone)]
enum Op {
    Lifecycle(AppState, bool),
    Retry,
    Toggle(bool),
    Outcome(AuthOutcome),
    ServiceError,
    Advance(u64),
}

fn app_state() -> impl Strategy<Value = AppState> {
    prop_oneof![Just(AppState::Active), Just(AppState::Inactive), Just(AppState::Background)]
}

fn outcome() -> impl Strategy<Value = AuthOutcome> {
    prop_oneof![
        Just(AuthOutcome::Success),
        Just(AuthOutcome::Fallback),
        Just(AuthOutcome::Cancelled),
        "[a-z_]{1,12}".prop_map(|reason| AuthOutcome::Failed { reason }),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (app_state(), any::<bool>()).prop_map(|(s, e)| Op::Lifecycle(s, e)),
        2 => Just(Op::Retry),
        1 => any::<bool>().prop_map(Op::Toggle),
        3 => outcome().prop_map(Op::Outcome),
        1 => Just(Op::ServiceError),
        2 => (0u64..40_000).prop_map(Op::Advance),
    ]
}

proptest! {
    #[test]
    fn prop_controller_invariants_hold(
        lock_enabled in any::<bool>(),
        ops in prop::collection::vec(op(), 0..80),
    ) {
        let registry = InvariantRegistry::standard();
        let mut now = SimInstant::default();
        let mut lock = LockController::new(LockConfig::default());
        let _ = lock.handle(LockEvent::Mounted {
            lock_enabled,
            availability: Availability::Available(BiometricKind::Facial),
            now,
        });
        registry.assert_all(&LockSnapshot::capture(&lock, now), "after mount");

        for op in ops {
            let event = match op {
                Op::Lifecycle(next, lock_enabled) => {
                    LockEvent::AppStateChanged { next, lock_enabled, now }
                },
                Op::Retry => LockEvent::RetryPressed,
                Op::Toggle(enable) => LockEvent::ToggleRequested { enable },
                Op::Outcome(outcome) => LockEvent::AuthFinished { outcome, now },
                Op::ServiceError => LockEvent::AuthErrored { message: "offline".into() },
                Op::Advance(millis) => {
                    now = now + Duration::from_millis(millis);
                    LockEvent::Tick { now }
                },
            };
            let locked_out_before = lock.is_locked_out();
            let actions = lock.handle(event);
            let prompted = actions.iter().any(|a| matches!(a, LockAction::Authenticate(_)));
            prop_assert!(!(locked_out_before && prompted), "prompt started during lockout: {actions:?}");

            let snapshot = LockSnapshot::capture(&lock, now);
            prop_assert!(registry.check_all(&snapshot).is_ok(), "{:?}", registry.check_all(&snapshot));
        }
    }

    #[test]
    fn prop_runtime_invariants_hold(
        lock_enabled in any::<bool>(),
        outcomes in prop::collection::vec(outcome(), 0..20),
        events in prop::collection::vec(
            prop_oneof![
                3 => app_state().prop_map(PlatformEvent::Lifecycle),
                2 => Just(PlatformEvent::RetryPressed),
                1 => any::<bool>().prop_map(PlatformEvent::ToggleAppLock),
            ],
            0..40,
        ),
    ) {
        let driver = SimDriver::new();
        let env = SimEnv::new();
        if lock_enabled {
            driver.store(APP_LOCK_KEY, "true");
        }
        for outcome in outcomes {
            driver.script_auth(outcome);
        }
        for event in events {
            driver.inject_event(event);
        }

        let registry = InvariantRegistry::standard();
        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let mut runtime = Runtime::new(driver.clone(), env.clone(), RuntimeConfig::default());

        rt.block_on(runtime.mount()).unwrap();
        registry.assert_all(&LockSnapshot::capture(runtime.lock(), env.now()), "after mount");

        while driver.pending_event_count() > 0 {
            rt.block_on(runtime.step()).unwrap();
            let snapshot = LockSnapshot::capture(runtime.lock(), env.now());
            prop_assert!(registry.check_all(&snapshot).is_ok(), "{:?}", registry.check_all(&snapshot));

            // The stored setting is what the controller believes after a
            // successful toggle
            let stored = driver.stored(APP_LOCK_KEY).is_some();
            prop_assert!(!runtime.lock().is_lock_visible() || stored);
        }
    }
}
