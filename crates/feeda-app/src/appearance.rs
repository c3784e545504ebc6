//! Appearance controller.
//!
//! Owns the currently applied theme for the lifetime of the process. Screens
//! read the theme from here instead of a module-level global.

use feeda_core::Theme;

/// Tracks the applied theme.
#[derive(Debug, Clone, Default)]
pub struct Appearance {
    /// `None` until the first theme is applied.
    applied: Option<Theme>,
}

impl Appearance {
    /// Create a controller with no theme applied yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `theme` as applied.
    ///
    /// Returns `true` if the platform must be updated, `false` if `theme` is
    /// already in effect.
    pub fn apply(&mut self, theme: Theme) -> bool {
        if self.applied == Some(theme) {
            return false;
        }
        self.applied = Some(theme);
        true
    }

    /// Theme in effect. Light until something is applied.
    pub fn theme(&self) -> Theme {
        self.applied.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_is_idempotent() {
        let mut appearance = Appearance::new();

        assert!(appearance.apply(Theme::Dark));
        assert!(!appearance.apply(Theme::Dark));
        assert!(appearance.apply(Theme::Light));
        assert_eq!(appearance.theme(), Theme::Light);
    }

    #[test]
    fn first_apply_of_default_still_updates() {
        let mut appearance = Appearance::new();
        assert_eq!(appearance.theme(), Theme::Light);
        assert!(appearance.apply(Theme::Light));
    }
}
