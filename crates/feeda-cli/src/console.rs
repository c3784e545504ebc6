//! Console driver.
//!
//! Implements the [`Driver`] trait over line-based console I/O: commands and
//! prompt answers are read from an async line reader, renders and notices are
//! written as one line each. Biometrics are simulated from a
//! [`BiometricProfile`] and the prompt is answered by typing at the console.
//! Storage lives in memory for the lifetime of the session.

use std::{
    collections::HashMap,
    io::{self, Write},
    time::Duration,
};

use feeda_app::{Driver, PlatformEvent};
use feeda_core::{AuthOutcome, LockPhase, LockView, Modality, Notice, PromptOptions, Theme};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::commands::{self, Command};

/// How long a poll waits for input before reporting no event.
const POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Console driver errors.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// I/O error reading commands or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Simulated biometric hardware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BiometricProfile {
    /// Hardware present.
    pub has_hardware: bool,
    /// Something enrolled.
    pub enrolled: bool,
    /// Supported modalities.
    pub modalities: Vec<Modality>,
}

impl Default for BiometricProfile {
    fn default() -> Self {
        Self { has_hardware: true, enrolled: true, modalities: vec![Modality::Fingerprint] }
    }
}

/// Console driver implementing the [`Driver`] trait.
///
/// Generic over its input and output so sessions can be scripted in tests.
pub struct ConsoleDriver<R, W> {
    lines: Lines<R>,
    out: W,
    biometrics: BiometricProfile,
    storage: HashMap<String, String>,
    /// Last line rendered, to skip identical redraws.
    last_frame: Option<String>,
    /// Input closed; the next poll quits.
    closed: bool,
}

impl<R, W> ConsoleDriver<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    /// Create a driver reading from `input` and writing to `out`.
    pub fn new(input: R, out: W, biometrics: BiometricProfile) -> Self {
        Self {
            lines: input.lines(),
            out,
            biometrics,
            storage: HashMap::new(),
            last_frame: None,
            closed: false,
        }
    }

    /// Seed a stored value before the session starts.
    #[must_use]
    pub fn with_item(mut self, key: &str, value: &str) -> Self {
        self.storage.insert(key.to_owned(), value.to_owned());
        self
    }

    /// Read a stored value.
    pub fn item(&self, key: &str) -> Option<&str> {
        self.storage.get(key).map(String::as_str)
    }

    /// Consume the driver, returning its output.
    pub fn into_output(self) -> W {
        self.out
    }

    fn say(&mut self, line: &str) -> Result<(), ConsoleError> {
        writeln!(self.out, "{line}")?;
        self.out.flush()?;
        Ok(())
    }

    /// Fire-and-forget output: failures are logged, never propagated.
    fn say_or_log(&mut self, line: &str) {
        if let Err(e) = self.say(line) {
            tracing::warn!(error = %e, "console write failed");
        }
    }

    async fn read_line(&mut self) -> Result<Option<String>, ConsoleError> {
        let line = self.lines.next_line().await?;
        if line.is_none() {
            self.closed = true;
        }
        Ok(line)
    }
}

impl<R, W> Driver for ConsoleDriver<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    type Error = ConsoleError;

    async fn poll_event(&mut self) -> Result<Option<PlatformEvent>, Self::Error> {
        if self.closed {
            return Ok(Some(PlatformEvent::Quit));
        }

        let line = tokio::select! {
            biased;

            line = self.lines.next_line() => line?,
            () = tokio::time::sleep(POLL_TIMEOUT) => return Ok(None),
        };

        let Some(line) = line else {
            self.closed = true;
            return Ok(Some(PlatformEvent::Quit));
        };

        match commands::parse(&line) {
            Some(Command::Event(event)) => Ok(Some(event)),
            Some(Command::Help) => {
                self.say(commands::USAGE)?;
                Ok(None)
            },
            Some(Command::Invalid(hint)) => {
                self.say(&hint)?;
                Ok(None)
            },
            None => Ok(None),
        }
    }

    async fn has_hardware(&mut self) -> Result<bool, Self::Error> {
        Ok(self.biometrics.has_hardware)
    }

    async fn is_enrolled(&mut self) -> Result<bool, Self::Error> {
        Ok(self.biometrics.enrolled)
    }

    async fn supported_modalities(&mut self) -> Result<Vec<Modality>, Self::Error> {
        Ok(self.biometrics.modalities.clone())
    }

    async fn authenticate(&mut self, prompt: &PromptOptions) -> Result<AuthOutcome, Self::Error> {
        let fallback = if prompt.allow_device_fallback {
            format!(" / [p] {}", prompt.fallback_label)
        } else {
            String::new()
        };
        self.say(&format!("{}? [y] accept / [n] reject{fallback} / [c] cancel", prompt.title))?;

        loop {
            let Some(line) = self.read_line().await? else {
                return Ok(AuthOutcome::Cancelled);
            };
            match commands::parse_auth_answer(&line) {
                Some(AuthOutcome::Fallback) if !prompt.allow_device_fallback => {
                    self.say("passcode fallback is disabled")?;
                },
                Some(outcome) => return Ok(outcome),
                None => self.say("answer y, n, p or c")?,
            }
        }
    }

    async fn get_item(&mut self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.storage.get(key).cloned())
    }

    async fn set_item(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.storage.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn remove_item(&mut self, key: &str) -> Result<(), Self::Error> {
        self.storage.remove(key);
        Ok(())
    }

    fn vibrate(&mut self, duration: Duration) {
        self.say_or_log(&format!("*bzz* ({}ms)", duration.as_millis()));
    }

    fn notify(&mut self, notice: Notice) {
        let line = if notice.is_blocking() { format!("!! {notice}") } else { format!("-- {notice}") };
        self.say_or_log(&line);
    }

    fn apply_theme(&mut self, theme: Theme) -> Result<(), Self::Error> {
        self.say(&format!("theme: {theme}"))
    }

    fn render(&mut self, view: &LockView, theme: Theme) -> Result<(), Self::Error> {
        let frame = describe(view, theme);
        if self.last_frame.as_deref() == Some(frame.as_str()) {
            return Ok(());
        }
        self.say(&frame)?;
        self.last_frame = Some(frame);
        Ok(())
    }

    fn stop(&mut self) {
        self.say_or_log("bye");
    }
}

/// One-line rendering of the lock surfaces.
pub fn describe(view: &LockView, theme: Theme) -> String {
    let phase = match view.phase {
        LockPhase::Active => "unlocked",
        LockPhase::Backgrounding => "overlay",
        LockPhase::Locked => "locked",
        LockPhase::LockedOut => "locked out",
    };

    let mut line = format!("[{theme}] {phase}");
    if view.lock_visible {
        let retry = if view.retry_enabled { "retry" } else { "retry disabled" };
        line.push_str(&format!(
            " | {} | {retry} | {} left",
            view.label, view.attempts_remaining
        ));
    }
    line
}
