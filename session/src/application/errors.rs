use thiserror::Error;

pub const DEFAULT_GENERATION_ERROR: &str = "Failed to generate";

/// Camera acquisition failure
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("camera access denied: {0}")]
    PermissionDenied(String),
    #[error("no camera available: {0}")]
    Unavailable(String),
}

/// Track generation failure
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerationError {
    /// The endpoint answered with a non-success status
    #[error("{0}")]
    Rejected(String),
    /// The request never produced a usable response
    #[error("Generation failed. {0}")]
    Transport(String),
}

impl GenerationError {
    /// Builds a rejection from the endpoint's error message, if it sent one.
    pub fn rejected(message: Option<String>) -> Self {
        match message {
            Some(m) if !m.trim().is_empty() => Self::Rejected(m),
            _ => Self::Rejected(DEFAULT_GENERATION_ERROR.to_string()),
        }
    }
}

/// Playback start was refused by the audio output
#[derive(Debug, Error)]
#[error("playback rejected: {0}")]
pub struct PlaybackError(pub String);

#[derive(Debug, Error)]
#[error("local storage failure: {0}")]
pub struct StorageError(pub String);

/// Every failure that can reach the user-visible error slot.
///
/// `Display` is the message shown to the user.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Could not access camera. Check device permissions.")]
    Camera(#[from] DeviceError),
    #[error("{0}")]
    Generation(#[from] GenerationError),
    #[error("Autoplay blocked. Tap play again to start music.")]
    Playback(#[from] PlaybackError),
    #[error("Could not save your profile. Try again.")]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_falls_back_to_default_message() {
        assert_eq!(GenerationError::rejected(None).to_string(), "Failed to generate");
        assert_eq!(GenerationError::rejected(Some("  ".into())).to_string(), "Failed to generate");
        assert_eq!(
            GenerationError::rejected(Some("model busy".into())).to_string(),
            "model busy"
        );
    }

    #[test]
    fn test_user_messages() {
        let camera: SessionError = DeviceError::PermissionDenied("NotAllowed".into()).into();
        assert_eq!(camera.to_string(), "Could not access camera. Check device permissions.");

        let playback: SessionError = PlaybackError("policy".into()).into();
        assert_eq!(playback.to_string(), "Autoplay blocked. Tap play again to start music.");

        let generation: SessionError = GenerationError::rejected(Some("quota".into())).into();
        assert_eq!(generation.to_string(), "quota");
    }
}
