//! Driver trait for abstracting platform I/O.
//!
//! The [`Driver`] trait decouples the runtime from a specific platform. Each
//! frontend implements it, while the generic [`crate::Runtime`] handles all
//! orchestration.

use std::{future::Future, time::Duration};

use feeda_core::{AuthOutcome, LockView, Modality, Notice, PromptOptions, Theme};

use crate::PlatformEvent;

/// Abstracts platform operations for the application runtime.
///
/// # Implementations
///
/// - **Console**: stdin commands, simulated biometrics, in-memory storage
/// - **Simulation**: scripted events and outcomes with recorded effects
///
/// # Errors
///
/// Errors from biometric, storage and theme calls are absorbed by the runtime
/// and shown as notices. Errors from [`Driver::poll_event`] and
/// [`Driver::render`] stop the runtime.
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Poll for the next input event.
    ///
    /// Returns `None` if no event is ready.
    fn poll_event(
        &mut self,
    ) -> impl Future<Output = Result<Option<PlatformEvent>, Self::Error>> + Send;

    /// Whether biometric hardware is present.
    fn has_hardware(&mut self) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// Whether biometrics are enrolled.
    fn is_enrolled(&mut self) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// Supported biometric modalities.
    fn supported_modalities(
        &mut self,
    ) -> impl Future<Output = Result<Vec<Modality>, Self::Error>> + Send;

    /// Show the platform authentication prompt.
    ///
    /// A rejected check is `Ok(AuthOutcome::Failed)`; `Err` means the prompt
    /// could not run at all.
    fn authenticate(
        &mut self,
        prompt: &PromptOptions,
    ) -> impl Future<Output = Result<AuthOutcome, Self::Error>> + Send;

    /// Read a persisted value. `None` if absent.
    fn get_item(
        &mut self,
        key: &str,
    ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send;

    /// Write a persisted value.
    fn set_item(
        &mut self,
        key: &str,
        value: &str,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Delete a persisted value.
    fn remove_item(&mut self, key: &str) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Fire a haptic pulse. Fire-and-forget.
    fn vibrate(&mut self, duration: Duration);

    /// Show a non-blocking notice (or a blocking one if
    /// [`Notice::is_blocking`]).
    fn notify(&mut self, notice: Notice);

    /// Apply a theme to platform chrome (navigation bar, status bar).
    ///
    /// # Errors
    ///
    /// Returns an error if the platform rejects the change.
    fn apply_theme(&mut self, theme: Theme) -> Result<(), Self::Error>;

    /// Render the overlay and lock screen.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, view: &LockView, theme: Theme) -> Result<(), Self::Error>;

    /// Release platform resources.
    fn stop(&mut self);
}
