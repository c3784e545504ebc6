//! Runtime errors.

use thiserror::Error;

/// Errors that stop the [`crate::Runtime`].
///
/// Only failures of the event source and of rendering are fatal. Every other
/// driver error is logged and shown to the user as a notice.
#[derive(Debug, Error)]
pub enum RuntimeError<E>
where
    E: std::error::Error + 'static,
{
    /// Polling for platform events failed.
    #[error("event source failed: {0}")]
    Poll(#[source] E),

    /// Rendering the lock surfaces failed.
    #[error("render failed: {0}")]
    Render(#[source] E),
}
