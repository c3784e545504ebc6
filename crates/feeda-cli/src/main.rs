//! Feeda console entry point.
//!
//! # Usage
//!
//! ```bash
//! # Parse a chat message
//! feeda parse $'[img]https://x/a.jpg[/img]\n[faint]Sunset (Orig)[/faint]\nComment: wow'
//!
//! # Run the app lock against the console, starting locked
//! feeda simulate --lock-enabled
//! ```

use std::io::{self, Read, Write};

use clap::{Parser, Subcommand, ValueEnum};
use feeda_app::{Runtime, RuntimeConfig};
use feeda_cli::{
    BiometricProfile, ConsoleDriver, SystemEnv, commands,
    preview::{self, Format},
};
use feeda_core::{
    LockConfig, Modality, Theme,
    settings::{APP_LOCK_KEY, THEME_KEY},
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Feeda client tools
#[derive(Parser, Debug)]
#[command(name = "feeda")]
#[command(about = "Feeda chat markup parser and app-lock simulator")]
#[command(version)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Parse a chat message for an embedded shared post
    Parse {
        /// Message text. Read from stdin if omitted.
        text: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },

    /// Run the app lock interactively on the console
    Simulate {
        /// Start with the app lock enabled
        #[arg(long)]
        lock_enabled: bool,

        /// Stored theme
        #[arg(long, default_value = "light")]
        theme: Theme,

        /// Simulate a device without biometric hardware
        #[arg(long)]
        no_hardware: bool,

        /// Simulate hardware with nothing enrolled
        #[arg(long)]
        not_enrolled: bool,

        /// Supported modality (repeatable)
        #[arg(long = "modality", value_enum, default_values_t = [ModalityArg::Fingerprint])]
        modalities: Vec<ModalityArg>,

        /// Failed attempts before lockout
        #[arg(long, default_value_t = feeda_core::DEFAULT_MAX_ATTEMPTS)]
        max_attempts: u32,

        /// Lockout length in seconds
        #[arg(long, default_value_t = feeda_core::DEFAULT_LOCKOUT_DURATION.as_secs())]
        lockout_secs: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModalityArg {
    Face,
    Fingerprint,
    Iris,
}

impl From<ModalityArg> for Modality {
    fn from(arg: ModalityArg) -> Self {
        match arg {
            ModalityArg::Face => Self::Facial,
            ModalityArg::Fingerprint => Self::Fingerprint,
            ModalityArg::Iris => Self::Iris,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)).with(filter).init();

    match args.command {
        Cmd::Parse { text, format } => {
            let text = match text {
                Some(text) => text,
                None => {
                    let mut buf = String::new();
                    io::stdin().read_to_string(&mut buf)?;
                    buf
                },
            };

            tracing::debug!(kind = preview::summary(&feeda_proto::markup::parse(&text)), "parsed");
            let output = preview::render(&text, format)?;
            writeln!(io::stdout(), "{output}")?;
        },
        Cmd::Simulate {
            lock_enabled,
            theme,
            no_hardware,
            not_enrolled,
            modalities,
            max_attempts,
            lockout_secs,
        } => {
            if max_attempts == 0 {
                return Err("--max-attempts must be at least 1".into());
            }

            let biometrics = BiometricProfile {
                has_hardware: !no_hardware,
                enrolled: !not_enrolled,
                modalities: modalities.into_iter().map(Modality::from).collect(),
            };
            let mut driver = ConsoleDriver::new(
                tokio::io::BufReader::new(tokio::io::stdin()),
                io::stdout(),
                biometrics,
            )
            .with_item(THEME_KEY, theme.as_str());
            if lock_enabled {
                driver = driver.with_item(APP_LOCK_KEY, "true");
            }

            let config = RuntimeConfig {
                lock: LockConfig {
                    max_attempts,
                    lockout_duration: std::time::Duration::from_secs(lockout_secs),
                    ..LockConfig::default()
                },
                ..RuntimeConfig::default()
            };

            writeln!(io::stdout(), "{}", commands::USAGE)?;
            tracing::info!(lock_enabled, %theme, "simulation starting");

            Runtime::new(driver, SystemEnv::new(), config).run().await?;
        },
    }

    Ok(())
}
