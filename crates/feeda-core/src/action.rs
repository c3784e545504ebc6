//! Lock controller side-effects.
//!
//! The [`LockAction`] list returned from each event is executed in order by
//! the runtime.

use std::time::Duration;

use crate::Notice;

/// Configuration of the platform authentication prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptOptions {
    /// Prompt title.
    pub title: String,
    /// Label of the passcode fallback button.
    pub fallback_label: String,
    /// Allow the device passcode instead of biometrics.
    pub allow_device_fallback: bool,
}

impl Default for PromptOptions {
    fn default() -> Self {
        Self {
            title: "Unlock Feeda".to_owned(),
            fallback_label: "Use Passcode".to_owned(),
            allow_device_fallback: true,
        }
    }
}

/// Actions produced by the lock controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockAction {
    /// Redraw overlay and lock screen from the current view.
    Render,

    /// Show the platform authentication prompt and report the result back as
    /// [`crate::LockEvent::AuthFinished`] or [`crate::LockEvent::AuthErrored`].
    Authenticate(PromptOptions),

    /// Single haptic pulse.
    Vibrate {
        /// Pulse length.
        duration: Duration,
    },

    /// Show a notice to the user.
    Notify(Notice),

    /// Write the app-lock setting.
    PersistLockSetting {
        /// New value.
        enabled: bool,
    },
}
