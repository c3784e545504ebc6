//! Lock-state invariants.
//!
//! Each check reads a [`LockSnapshot`] taken from the controller after an
//! event and reports a [`Violation`] naming the broken rule: the failure
//! counter stays under the limit, a lockout always has a deadline and no
//! prompt, the lock screen only shows while the setting is on, and the
//! overlay covers the UI whenever the app leaves the foreground.
//!
//! Scenario and property tests run [`InvariantRegistry::standard`] after every
//! step; `assert_all` panics with the step label and every failed rule.
//!
//! ```ignore
//! let registry = InvariantRegistry::standard();
//! registry.assert_all(&LockSnapshot::capture(&lock, now), "after retry");
//! ```

mod checks;
mod snapshot;

use std::fmt;

pub use checks::{
    AttemptsBounded, LockImpliesEnabled, LockedOutMatchesDeadline, NoPromptDuringLockout,
    OverlayWhileInBackground,
};
pub use snapshot::LockSnapshot;

/// Invariant check result.
pub type InvariantResult = Result<(), Violation>;

/// Identifies an invariant in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvariantKind {
    /// Failure counter stays within the attempt limit.
    AttemptsBounded,
    /// Lockout flag, deadline and retry control agree.
    LockedOutMatchesDeadline,
    /// No authentication prompt outstanding during a lockout.
    NoPromptDuringLockout,
    /// Lock screen only while the setting is on.
    LockImpliesEnabled,
    /// Overlay covers the UI exactly while not in the foreground.
    OverlayWhileInBackground,
}

impl fmt::Display for InvariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AttemptsBounded => "attempts_bounded",
            Self::LockedOutMatchesDeadline => "locked_out_matches_deadline",
            Self::NoPromptDuringLockout => "no_prompt_during_lockout",
            Self::LockImpliesEnabled => "lock_implies_enabled",
            Self::OverlayWhileInBackground => "overlay_while_in_background",
        };
        f.write_str(name)
    }
}

/// A broken rule and what was observed.
#[derive(Debug, Clone)]
pub struct Violation {
    /// The violated invariant.
    pub invariant: InvariantKind,
    /// Description of what went wrong.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.invariant, self.message)
    }
}

impl std::error::Error for Violation {}

/// A rule over [`LockSnapshot`]s.
pub trait Invariant: Send + Sync {
    /// Which invariant this is, for error reporting.
    fn kind(&self) -> InvariantKind;

    /// Check the invariant against the current state.
    ///
    /// Returns `Ok(())` if the invariant holds, or a [`Violation`]
    /// describing what went wrong.
    fn check(&self, state: &LockSnapshot) -> InvariantResult;
}

/// Set of lock rules checked together.
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl Default for InvariantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InvariantRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { invariants: Vec::new() }
    }

    /// Create a registry with the lock controller invariants.
    ///
    /// Includes:
    /// - [`AttemptsBounded`]: `failed_attempts <= max_attempts`
    /// - [`LockedOutMatchesDeadline`]: lockout state is consistent
    /// - [`NoPromptDuringLockout`]: no authentication while locked out
    /// - [`LockImpliesEnabled`]: lock screen only while enabled
    /// - [`OverlayWhileInBackground`]: overlay tracks the lifecycle
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add(AttemptsBounded);
        registry.add(LockedOutMatchesDeadline);
        registry.add(NoPromptDuringLockout);
        registry.add(LockImpliesEnabled);
        registry.add(OverlayWhileInBackground);
        registry
    }

    /// Add an invariant to the registry.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.invariants.push(Box::new(invariant));
    }

    /// Run every rule; `Err` carries all violations, not just the first.
    pub fn check_all(&self, state: &LockSnapshot) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> =
            self.invariants.iter().filter_map(|inv| inv.check(state).err()).collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Check all invariants, panicking with every violation and `context`.
    #[allow(clippy::panic)]
    pub fn assert_all(&self, state: &LockSnapshot, context: &str) {
        if let Err(violations) = self.check_all(state) {
            let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
            panic!("lock invariant broken {context}:\n  {}", messages.join("\n  "));
        }
    }

    /// Number of registered invariants.
    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_has_invariants() {
        let registry = InvariantRegistry::standard();
        assert_eq!(registry.len(), 5);
        assert!(!registry.is_empty());
    }

    #[test]
    fn fresh_snapshot_passes() {
        let registry = InvariantRegistry::standard();
        assert!(registry.check_all(&LockSnapshot::default()).is_ok());
    }

    #[test]
    fn all_violations_reported() {
        let registry = InvariantRegistry::standard();
        let state = LockSnapshot {
            failed_attempts: 9,
            max_attempts: 3,
            lock_visible: true,
            lock_enabled: false,
            ..LockSnapshot::default()
        };

        let violations = registry.check_all(&state).unwrap_err();
        let kinds: Vec<_> = violations.iter().map(|v| v.invariant).collect();

        assert!(kinds.contains(&InvariantKind::AttemptsBounded));
        assert!(kinds.contains(&InvariantKind::LockImpliesEnabled));
    }
}
