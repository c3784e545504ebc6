//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`LockController`]: app-lock state machine
//! - [`Appearance`]: applied theme
//! - [`Driver`]: Platform-specific I/O

use std::{collections::VecDeque, time::Duration};

use feeda_core::{
    AppState, Availability, LockAction, LockConfig, LockController, LockEvent, Notice, Theme,
    env::Environment,
    settings::{self, APP_LOCK_KEY, THEME_KEY},
};

use crate::{Appearance, Driver, PlatformEvent, RuntimeError};

/// Sleep between cycles when the driver has no event.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Sleep between idle cycles. Also the resolution of lock timers.
    pub tick_interval: Duration,
    /// Lock controller configuration.
    pub lock: LockConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self { tick_interval: DEFAULT_TICK_INTERVAL, lock: LockConfig::default() }
    }
}

/// Generic runtime that orchestrates the lock controller and the driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
/// - `E`: Environment providing time
pub struct Runtime<D, E>
where
    D: Driver,
    E: Environment,
{
    driver: D,
    env: E,
    lock: LockController<E::Instant>,
    appearance: Appearance,
    tick_interval: Duration,
    mounted: bool,
}

impl<D, E> Runtime<D, E>
where
    D: Driver,
    E: Environment,
{
    /// Create a new runtime with the given driver and environment.
    pub fn new(driver: D, env: E, config: RuntimeConfig) -> Self {
        Self {
            driver,
            env,
            lock: LockController::new(config.lock),
            appearance: Appearance::new(),
            tick_interval: config.tick_interval,
            mounted: false,
        }
    }

    /// Run the main event loop until [`PlatformEvent::Quit`].
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails to poll events or to render.
    pub async fn run(mut self) -> Result<(), RuntimeError<D::Error>> {
        self.mount().await?;

        loop {
            let should_quit = self.step().await?;
            if should_quit {
                break;
            }
        }

        self.shutdown();
        Ok(())
    }

    /// Load persisted settings and probe biometrics, then start the lock
    /// flow. Called once; later calls do nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial render fails.
    pub async fn mount(&mut self) -> Result<(), RuntimeError<D::Error>> {
        if self.mounted {
            return Ok(());
        }
        self.mounted = true;

        let theme = match self.driver.get_item(THEME_KEY).await {
            Ok(value) => Theme::from_stored(value.as_deref()),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read theme, using default");
                Theme::default()
            },
        };
        self.apply_theme(theme);

        let availability = self.probe_biometrics().await;
        let lock_enabled = self.read_lock_setting().await;
        tracing::info!(lock_enabled, label = availability.label(), "mounted");

        let now = self.env.now();
        let actions = self.lock.handle(LockEvent::Mounted { lock_enabled, availability, now });
        self.process_actions(actions).await
    }

    /// Process one cycle of the event loop: at most one platform event, then
    /// a tick.
    ///
    /// Returns `true` if the application should quit.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails to poll events or to render.
    pub async fn step(&mut self) -> Result<bool, RuntimeError<D::Error>> {
        match self.driver.poll_event().await.map_err(RuntimeError::Poll)? {
            Some(PlatformEvent::Quit) => return Ok(true),
            Some(event) => self.dispatch(event).await?,
            None => self.env.sleep(self.tick_interval).await,
        }

        let now = self.env.now();
        let actions = self.lock.handle(LockEvent::Tick { now });
        self.process_actions(actions).await?;

        Ok(false)
    }

    /// Tear down the lock flow and release the driver.
    pub fn shutdown(&mut self) {
        let _ = self.lock.handle(LockEvent::Dismissed);
        self.driver.stop();
    }

    async fn dispatch(&mut self, event: PlatformEvent) -> Result<(), RuntimeError<D::Error>> {
        let actions = match event {
            PlatformEvent::Lifecycle(next) => {
                // Only a return to the foreground consults storage, so the
                // overlay goes up without any await in between.
                let lock_enabled = if next == AppState::Active {
                    self.read_lock_setting().await
                } else {
                    self.lock.lock_enabled()
                };
                let now = self.env.now();
                self.lock.handle(LockEvent::AppStateChanged { next, lock_enabled, now })
            },
            PlatformEvent::RetryPressed => self.lock.handle(LockEvent::RetryPressed),
            PlatformEvent::ToggleAppLock(enable) => {
                self.lock.handle(LockEvent::ToggleRequested { enable })
            },
            PlatformEvent::SetTheme(theme) => {
                if self.apply_theme(theme) {
                    if let Err(e) = self.driver.set_item(THEME_KEY, theme.as_str()).await {
                        tracing::warn!(error = %e, "failed to persist theme");
                        self.driver.notify(Notice::ServiceError);
                    }
                    vec![LockAction::Render]
                } else {
                    Vec::new()
                }
            },
            PlatformEvent::Quit => Vec::new(),
        };

        self.process_actions(actions).await
    }

    /// Execute actions in order. Prompt results are fed straight back to the
    /// controller and their actions run before the remaining ones.
    async fn process_actions(
        &mut self,
        initial_actions: Vec<LockAction>,
    ) -> Result<(), RuntimeError<D::Error>> {
        let mut queue: VecDeque<LockAction> = initial_actions.into();

        while let Some(action) = queue.pop_front() {
            match action {
                LockAction::Render => {
                    let view = self.lock.view();
                    self.driver
                        .render(&view, self.appearance.theme())
                        .map_err(RuntimeError::Render)?;
                },
                LockAction::Authenticate(prompt) => {
                    let event = match self.driver.authenticate(&prompt).await {
                        Ok(outcome) => LockEvent::AuthFinished { outcome, now: self.env.now() },
                        Err(e) => LockEvent::AuthErrored { message: e.to_string() },
                    };
                    let follow_up = self.lock.handle(event);
                    for action in follow_up.into_iter().rev() {
                        queue.push_front(action);
                    }
                },
                LockAction::Vibrate { duration } => self.driver.vibrate(duration),
                LockAction::Notify(notice) => self.driver.notify(notice),
                LockAction::PersistLockSetting { enabled } => {
                    let result = match settings::lock_enabled_to_stored(enabled) {
                        Some(value) => self.driver.set_item(APP_LOCK_KEY, value).await,
                        None => self.driver.remove_item(APP_LOCK_KEY).await,
                    };
                    if let Err(e) = result {
                        tracing::warn!(error = %e, enabled, "failed to persist app-lock setting");
                        self.driver.notify(Notice::ServiceError);
                    }
                },
            }
        }

        Ok(())
    }

    /// Returns `true` if the platform theme changed.
    fn apply_theme(&mut self, theme: Theme) -> bool {
        if !self.appearance.apply(theme) {
            return false;
        }
        if let Err(e) = self.driver.apply_theme(theme) {
            tracing::warn!(error = %e, %theme, "failed to apply theme to platform chrome");
        }
        true
    }

    /// Unreadable setting counts as disabled.
    async fn read_lock_setting(&mut self) -> bool {
        match self.driver.get_item(APP_LOCK_KEY).await {
            Ok(value) => settings::lock_enabled_from_stored(value.as_deref()),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read app-lock setting, treating as disabled");
                false
            },
        }
    }

    /// Failed capability queries count as unavailable.
    async fn probe_biometrics(&mut self) -> Availability {
        let probe = async {
            let has_hardware = self.driver.has_hardware().await?;
            let is_enrolled = self.driver.is_enrolled().await?;
            let modalities = self.driver.supported_modalities().await?;
            Ok::<_, D::Error>(Availability::resolve(has_hardware, is_enrolled, &modalities))
        };

        match probe.await {
            Ok(availability) => availability,
            Err(e) => {
                tracing::warn!(error = %e, "biometric capability query failed");
                Availability::Unavailable
            },
        }
    }

    /// Get a reference to the lock controller.
    pub fn lock(&self) -> &LockController<E::Instant> {
        &self.lock
    }

    /// Theme in effect.
    pub fn theme(&self) -> Theme {
        self.appearance.theme()
    }

    /// Get a reference to the driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Get a mutable reference to the driver.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}
