//! Platform input events.
//!
//! Events originate from the OS lifecycle listener and from user controls on
//! the lock and settings screens.

use feeda_core::{AppState, Theme};

/// Events polled from the platform by the [`crate::Runtime`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformEvent {
    /// OS lifecycle transition.
    Lifecycle(AppState),

    /// Retry control on the lock screen pressed.
    RetryPressed,

    /// App-lock toggle in settings flipped.
    ToggleAppLock(bool),

    /// Theme chosen in settings.
    SetTheme(Theme),

    /// Shut down the runtime.
    Quit,
}
