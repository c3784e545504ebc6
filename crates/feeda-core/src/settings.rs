//! Persisted settings.
//!
//! Settings live in the platform key-value store as strings. Values written by
//! older app versions must keep decoding, so readers are lenient: anything
//! unrecognised falls back to the default instead of failing.

use std::{fmt, str::FromStr};

use crate::ParseError;

/// Storage key of the app-lock flag.
pub const APP_LOCK_KEY: &str = "appLockEnabled";

/// Storage key of the theme preference.
pub const THEME_KEY: &str = "theme";

/// Stored value of an enabled app-lock flag. Disabling removes the key.
const APP_LOCK_ENABLED: &str = "true";

/// Decode the app-lock flag. Only the exact string `"true"` enables it.
#[must_use]
pub fn lock_enabled_from_stored(value: Option<&str>) -> bool {
    value == Some(APP_LOCK_ENABLED)
}

/// Encode the app-lock flag. `None` means the key should be removed.
#[must_use]
pub fn lock_enabled_to_stored(enabled: bool) -> Option<&'static str> {
    enabled.then_some(APP_LOCK_ENABLED)
}

/// Colour theme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    /// Light theme (default).
    #[default]
    Light,
    /// Dark theme.
    Dark,
}

impl Theme {
    /// Stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Decode a stored preference, falling back to [`Theme::Light`].
    #[must_use]
    pub fn from_stored(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(ParseError::new("theme", other)),
        }
    }
}
