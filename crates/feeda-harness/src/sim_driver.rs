//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` provides the same interface as the console driver but for
//! deterministic testing. It implements [`Driver`] so the same
//! [`feeda_app::Runtime`] orchestration code runs in both production and
//! simulation.
//!
//! Every collaborator is a fake: lifecycle and UI input come from a scripted
//! queue, authentication outcomes are queued in advance, storage is an
//! in-memory map, and every side effect is recorded for assertions.

use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use feeda_app::{Driver, PlatformEvent};
use feeda_core::{AuthOutcome, LockView, Modality, Notice, PromptOptions, Theme};

/// Error type for simulation driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimDriverError(pub String);

impl std::fmt::Display for SimDriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SimDriverError: {}", self.0)
    }
}

impl std::error::Error for SimDriverError {}

/// Shared state for event injection and effect recording.
///
/// This allows injection and inspection from outside async contexts.
#[derive(Debug)]
struct SharedState {
    pending_events: VecDeque<PlatformEvent>,
    auth_script: VecDeque<Result<AuthOutcome, String>>,
    storage: HashMap<String, String>,

    has_hardware: bool,
    enrolled: bool,
    modalities: Vec<Modality>,

    capability_failure: bool,
    storage_failure: bool,
    render_failure: bool,

    prompts: Vec<PromptOptions>,
    vibrations: Vec<Duration>,
    notices: Vec<Notice>,
    renders: Vec<(LockView, Theme)>,
    themes: Vec<Theme>,
    stopped: bool,
}

impl Default for SharedState {
    fn default() -> Self {
        Self {
            pending_events: VecDeque::new(),
            auth_script: VecDeque::new(),
            storage: HashMap::new(),
            has_hardware: true,
            enrolled: true,
            modalities: vec![Modality::Fingerprint],
            capability_failure: false,
            storage_failure: false,
            render_failure: false,
            prompts: Vec::new(),
            vibrations: Vec::new(),
            notices: Vec::new(),
            renders: Vec::new(),
            themes: Vec::new(),
            stopped: false,
        }
    }
}

/// Simulation driver for deterministic testing.
///
/// Clones share state: hand one to the runtime and keep another to script
/// input and inspect effects.
///
/// Defaults to enrolled fingerprint hardware and empty storage. A prompt with
/// nothing scripted is cancelled.
#[derive(Debug, Clone, Default)]
pub struct SimDriver {
    state: Arc<Mutex<SharedState>>,
}

impl SimDriver {
    /// Create a new simulation driver.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut SharedState) -> R) -> R {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    /// Queue a platform event for the runtime to poll.
    pub fn inject_event(&self, event: PlatformEvent) {
        self.with_state(|s| s.pending_events.push_back(event));
    }

    /// Queue the outcome of the next authentication prompt.
    pub fn script_auth(&self, outcome: AuthOutcome) {
        self.with_state(|s| s.auth_script.push_back(Ok(outcome)));
    }

    /// Make the next authentication prompt fail with a service error.
    pub fn script_auth_error(&self, message: impl Into<String>) {
        let message = message.into();
        self.with_state(|s| s.auth_script.push_back(Err(message)));
    }

    /// Configure the biometric hardware.
    pub fn set_biometrics(&self, has_hardware: bool, enrolled: bool, modalities: &[Modality]) {
        let modalities = modalities.to_vec();
        self.with_state(|s| {
            s.has_hardware = has_hardware;
            s.enrolled = enrolled;
            s.modalities = modalities;
        });
    }

    /// Make capability queries fail.
    pub fn fail_capabilities(&self, fail: bool) {
        self.with_state(|s| s.capability_failure = fail);
    }

    /// Make storage reads and writes fail.
    pub fn fail_storage(&self, fail: bool) {
        self.with_state(|s| s.storage_failure = fail);
    }

    /// Make rendering fail.
    pub fn fail_render(&self, fail: bool) {
        self.with_state(|s| s.render_failure = fail);
    }

    /// Write a stored value directly, bypassing failure injection.
    pub fn store(&self, key: &str, value: &str) {
        let (key, value) = (key.to_owned(), value.to_owned());
        self.with_state(|s| s.storage.insert(key, value));
    }

    /// Read a stored value directly, bypassing failure injection.
    pub fn stored(&self, key: &str) -> Option<String> {
        self.with_state(|s| s.storage.get(key).cloned())
    }

    /// Prompts shown so far.
    pub fn prompts(&self) -> Vec<PromptOptions> {
        self.with_state(|s| s.prompts.clone())
    }

    /// Number of prompts shown so far.
    pub fn prompt_count(&self) -> usize {
        self.with_state(|s| s.prompts.len())
    }

    /// Haptic pulses fired so far.
    pub fn vibrations(&self) -> Vec<Duration> {
        self.with_state(|s| s.vibrations.clone())
    }

    /// Notices shown so far.
    pub fn notices(&self) -> Vec<Notice> {
        self.with_state(|s| s.notices.clone())
    }

    /// Number of renders so far.
    pub fn render_count(&self) -> usize {
        self.with_state(|s| s.renders.len())
    }

    /// Most recent render. `None` if nothing was rendered.
    pub fn last_render(&self) -> Option<(LockView, Theme)> {
        self.with_state(|s| s.renders.last().cloned())
    }

    /// Themes applied to platform chrome, in order.
    pub fn themes(&self) -> Vec<Theme> {
        self.with_state(|s| s.themes.clone())
    }

    /// Whether the runtime released the driver.
    pub fn is_stopped(&self) -> bool {
        self.with_state(|s| s.stopped)
    }

    /// Number of events not yet polled.
    pub fn pending_event_count(&self) -> usize {
        self.with_state(|s| s.pending_events.len())
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;

    async fn poll_event(&mut self) -> Result<Option<PlatformEvent>, Self::Error> {
        Ok(self.with_state(|s| s.pending_events.pop_front()))
    }

    async fn has_hardware(&mut self) -> Result<bool, Self::Error> {
        self.with_state(|s| {
            if s.capability_failure {
                return Err(SimDriverError("capability query failed".into()));
            }
            Ok(s.has_hardware)
        })
    }

    async fn is_enrolled(&mut self) -> Result<bool, Self::Error> {
        self.with_state(|s| {
            if s.capability_failure {
                return Err(SimDriverError("capability query failed".into()));
            }
            Ok(s.enrolled)
        })
    }

    async fn supported_modalities(&mut self) -> Result<Vec<Modality>, Self::Error> {
        self.with_state(|s| {
            if s.capability_failure {
                return Err(SimDriverError("capability query failed".into()));
            }
            Ok(s.modalities.clone())
        })
    }

    async fn authenticate(&mut self, prompt: &PromptOptions) -> Result<AuthOutcome, Self::Error> {
        let prompt = prompt.clone();
        self.with_state(|s| {
            s.prompts.push(prompt);
            match s.auth_script.pop_front() {
                Some(Ok(outcome)) => Ok(outcome),
                Some(Err(message)) => Err(SimDriverError(message)),
                None => {
                    tracing::debug!("no scripted outcome, cancelling prompt");
                    Ok(AuthOutcome::Cancelled)
                },
            }
        })
    }

    async fn get_item(&mut self, key: &str) -> Result<Option<String>, Self::Error> {
        self.with_state(|s| {
            if s.storage_failure {
                return Err(SimDriverError(format!("read {key} failed")));
            }
            Ok(s.storage.get(key).cloned())
        })
    }

    async fn set_item(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.with_state(|s| {
            if s.storage_failure {
                return Err(SimDriverError(format!("write {key} failed")));
            }
            s.storage.insert(key.to_owned(), value.to_owned());
            Ok(())
        })
    }

    async fn remove_item(&mut self, key: &str) -> Result<(), Self::Error> {
        self.with_state(|s| {
            if s.storage_failure {
                return Err(SimDriverError(format!("remove {key} failed")));
            }
            s.storage.remove(key);
            Ok(())
        })
    }

    fn vibrate(&mut self, duration: Duration) {
        self.with_state(|s| s.vibrations.push(duration));
    }

    fn notify(&mut self, notice: Notice) {
        self.with_state(|s| s.notices.push(notice));
    }

    fn apply_theme(&mut self, theme: Theme) -> Result<(), Self::Error> {
        self.with_state(|s| s.themes.push(theme));
        Ok(())
    }

    fn render(&mut self, view: &LockView, theme: Theme) -> Result<(), Self::Error> {
        let view = view.clone();
        self.with_state(|s| {
            if s.render_failure {
                return Err(SimDriverError("render failed".into()));
            }
            s.renders.push((view, theme));
            Ok(())
        })
    }

    fn stop(&mut self) {
        self.with_state(|s| s.stopped = true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let driver = SimDriver::new();
        let handle = driver.clone();

        driver.inject_event(PlatformEvent::RetryPressed);
        handle.store("k", "v");

        assert_eq!(handle.pending_event_count(), 1);
        assert_eq!(driver.stored("k").as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn unscripted_prompt_is_cancelled() {
        let mut driver = SimDriver::new();

        let outcome = driver.authenticate(&PromptOptions::default()).await;

        assert_eq!(outcome, Ok(AuthOutcome::Cancelled));
        assert_eq!(driver.prompt_count(), 1);
    }

    #[tokio::test]
    async fn storage_failure_injected() {
        let mut driver = SimDriver::new();
        driver.fail_storage(true);

        assert!(driver.get_item("theme").await.is_err());
        assert!(driver.set_item("theme", "dark").await.is_err());
        assert_eq!(driver.stored("theme"), None);
    }
}
