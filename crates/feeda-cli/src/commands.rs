//! Console command syntax.
//!
//! One command per line. Lifecycle changes and settings screen controls map
//! onto [`PlatformEvent`]s; answers to an authentication prompt are parsed
//! separately by [`parse_auth_answer`].

use feeda_app::PlatformEvent;
use feeda_core::{AppState, AuthOutcome, Theme};

/// Usage text shown for `help` and invalid input.
pub const USAGE: &str = "\
commands:
  bg | inactive | fg     move the app to the background, inactive or foreground
  retry                  press the retry control on the lock screen
  lock on | lock off     flip the app-lock setting (asks to authenticate)
  theme light | dark     choose the theme
  help                   show this text
  quit                   exit";

/// Reason reported for a rejected prompt answered at the console.
pub const REJECTED_REASON: &str = "authentication_failed";

/// Parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Forward to the runtime.
    Event(PlatformEvent),
    /// Print [`USAGE`].
    Help,
    /// Unrecognized input, with a hint.
    Invalid(String),
}

/// Parse one console line. `None` for blank lines.
pub fn parse(line: &str) -> Option<Command> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let command = parts.first().copied()?;

    let parsed = match command {
        "bg" | "background" => Command::Event(PlatformEvent::Lifecycle(AppState::Background)),
        "inactive" => Command::Event(PlatformEvent::Lifecycle(AppState::Inactive)),
        "fg" | "active" => Command::Event(PlatformEvent::Lifecycle(AppState::Active)),
        "retry" | "r" => Command::Event(PlatformEvent::RetryPressed),
        "lock" => match parts.get(1).copied() {
            Some("on") => Command::Event(PlatformEvent::ToggleAppLock(true)),
            Some("off") => Command::Event(PlatformEvent::ToggleAppLock(false)),
            _ => Command::Invalid("usage: lock on | lock off".into()),
        },
        "theme" => match parts.get(1).map(|value| value.parse::<Theme>()) {
            Some(Ok(theme)) => Command::Event(PlatformEvent::SetTheme(theme)),
            Some(Err(e)) => Command::Invalid(e.to_string()),
            None => Command::Invalid("usage: theme light | theme dark".into()),
        },
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Event(PlatformEvent::Quit),
        other => Command::Invalid(format!("unknown command {other:?}, try help")),
    };

    Some(parsed)
}

/// Parse an answer to the authentication prompt.
///
/// `y` accepts, `p` uses the passcode fallback, `n` rejects, and `c` or an
/// empty line cancels. `None` for anything else.
pub fn parse_auth_answer(line: &str) -> Option<AuthOutcome> {
    match line.trim() {
        "y" | "yes" => Some(AuthOutcome::Success),
        "p" | "passcode" => Some(AuthOutcome::Fallback),
        "n" | "no" => Some(AuthOutcome::Failed { reason: REJECTED_REASON.into() }),
        "" | "c" | "cancel" => Some(AuthOutcome::Cancelled),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_commands() {
        assert_eq!(
            parse("bg"),
            Some(Command::Event(PlatformEvent::Lifecycle(AppState::Background)))
        );
        assert_eq!(
            parse("  fg  "),
            Some(Command::Event(PlatformEvent::Lifecycle(AppState::Active)))
        );
    }

    #[test]
    fn blank_line_is_nothing() {
        assert_eq!(parse("   "), None);
    }

    #[test]
    fn lock_requires_on_or_off() {
        assert_eq!(parse("lock on"), Some(Command::Event(PlatformEvent::ToggleAppLock(true))));
        assert!(matches!(parse("lock maybe"), Some(Command::Invalid(_))));
    }

    #[test]
    fn theme_parses_value() {
        assert_eq!(parse("theme dark"), Some(Command::Event(PlatformEvent::SetTheme(Theme::Dark))));
        assert!(matches!(parse("theme sepia"), Some(Command::Invalid(_))));
    }

    #[test]
    fn unknown_command_is_invalid() {
        assert!(matches!(parse("dance"), Some(Command::Invalid(_))));
    }

    #[test]
    fn auth_answers() {
        assert_eq!(parse_auth_answer("y"), Some(AuthOutcome::Success));
        assert_eq!(parse_auth_answer("p"), Some(AuthOutcome::Fallback));
        assert_eq!(parse_auth_answer(""), Some(AuthOutcome::Cancelled));
        assert!(matches!(parse_auth_answer("n"), Some(AuthOutcome::Failed { .. })));
        assert_eq!(parse_auth_answer("what"), None);
    }
}
