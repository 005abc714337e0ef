// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types for note resolution and playback.

use thiserror::Error;

use crate::audio::ToneError;

/// Errors raised while resolving tokens or driving the tone output
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MusicError {
    /// A note token could not be parsed
    #[error("note '{token}' format is incorrect: {reason}")]
    InvalidToken { token: String, reason: String },

    /// Ticks per beat or beats per minute was below 1
    #[error("invalid tempo: ticks={ticks}, bpm={bpm} (both must be at least 1)")]
    InvalidTempo { ticks: u32, bpm: u32 },

    /// The tone output device failed
    #[error(transparent)]
    Device(#[from] ToneError),
}

impl MusicError {
    pub(crate) fn invalid_token(token: &str, reason: impl Into<String>) -> Self {
        MusicError::InvalidToken {
            token: token.to_string(),
            reason: reason.into(),
        }
    }

    /// Check whether this is a token error
    pub fn is_invalid_token(&self) -> bool {
        matches!(self, MusicError::InvalidToken { .. })
    }

    /// Check whether this is a tempo error
    pub fn is_invalid_tempo(&self) -> bool {
        matches!(self, MusicError::InvalidTempo { .. })
    }
}

/// Result alias for library operations
pub type Result<T> = std::result::Result<T, MusicError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_token_message() {
        let err = MusicError::invalid_token("h4", "unknown note letter 'h'");
        assert!(err.is_invalid_token());
        assert_eq!(
            err.to_string(),
            "note 'h4' format is incorrect: unknown note letter 'h'"
        );
    }

    #[test]
    fn test_device_error_is_transparent() {
        let err: MusicError = ToneError::NoDevice.into();
        assert_eq!(err.to_string(), ToneError::NoDevice.to_string());
        assert!(!err.is_invalid_tempo());
    }
}
