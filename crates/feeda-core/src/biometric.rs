//! Biometric capability resolution.
//!
//! Resolved once when the lock screen mounts and cached for the session. The
//! result only drives the label shown to the user and whether the degraded
//! "not available" notice is raised; authentication is attempted either way
//! because the platform prompt can still fall back to the device passcode.

/// A biometric method reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Modality {
    /// Face recognition.
    Facial,
    /// Fingerprint sensor.
    Fingerprint,
    /// Iris scanner.
    Iris,
}

/// Biometric method presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiometricKind {
    /// Face recognition.
    Facial,
    /// Fingerprint sensor.
    Fingerprint,
    /// Iris scanner.
    Iris,
    /// Hardware present but modality unknown.
    Generic,
}

impl BiometricKind {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Facial => "Facial Recognition",
            Self::Fingerprint => "Fingerprint",
            Self::Iris => "Iris",
            Self::Generic => "Biometric",
        }
    }
}

/// Device authentication capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Availability {
    /// Biometrics usable with the given method.
    Available(BiometricKind),
    /// No hardware or nothing enrolled.
    #[default]
    Unavailable,
}

impl Availability {
    /// Resolve capability from platform queries.
    ///
    /// When several modalities are supported the label follows the precedence
    /// Facial > Fingerprint > Iris, and falls back to a generic label when
    /// none is reported.
    #[must_use]
    pub fn resolve(has_hardware: bool, is_enrolled: bool, modalities: &[Modality]) -> Self {
        if !has_hardware || !is_enrolled {
            return Self::Unavailable;
        }

        let kind = [
            (Modality::Facial, BiometricKind::Facial),
            (Modality::Fingerprint, BiometricKind::Fingerprint),
            (Modality::Iris, BiometricKind::Iris),
        ]
        .into_iter()
        .find(|(modality, _)| modalities.contains(modality))
        .map_or(BiometricKind::Generic, |(_, kind)| kind);

        Self::Available(kind)
    }

    /// Whether biometrics can be used.
    #[must_use]
    pub fn is_available(self) -> bool {
        matches!(self, Self::Available(_))
    }

    /// Display label for the unlock control.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Available(kind) => kind.label(),
            Self::Unavailable => "Device Passcode",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facial_wins_over_everything() {
        let all = [Modality::Iris, Modality::Fingerprint, Modality::Facial];
        assert_eq!(
            Availability::resolve(true, true, &all),
            Availability::Available(BiometricKind::Facial)
        );
    }

    #[test]
    fn fingerprint_wins_over_iris() {
        let modalities = [Modality::Iris, Modality::Fingerprint];
        assert_eq!(Availability::resolve(true, true, &modalities).label(), "Fingerprint");
    }

    #[test]
    fn no_modalities_is_generic() {
        assert_eq!(Availability::resolve(true, true, &[]).label(), "Biometric");
    }

    #[test]
    fn missing_hardware_or_enrollment_is_unavailable() {
        assert_eq!(Availability::resolve(false, true, &[Modality::Facial]), Availability::Unavailable);
        assert_eq!(Availability::resolve(true, false, &[Modality::Facial]), Availability::Unavailable);
        assert!(!Availability::Unavailable.is_available());
    }
}
