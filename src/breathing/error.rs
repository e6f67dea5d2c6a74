//! Breathing session error types.
//!
//! Configuration errors are raised before any terminal output happens.
//! Device errors are raised when the interactive mode cannot take over
//! the terminal; both carry a suggestion for the user.

use std::io;

use thiserror::Error;

use crate::types::PhaseKind;

/// Errors that can occur while preparing or running a breathing session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A phase was configured with a zero duration.
    #[error("{0} duration must be at least 1 tick")]
    InvalidDuration(PhaseKind),

    /// The session was configured with zero cycles.
    #[error("a session needs at least 1 cycle")]
    ZeroCycles,

    /// Standard input is not an interactive terminal.
    #[error("this terminal does not support interactive mode (stdin is not a terminal)")]
    NotATerminal,

    /// The terminal refused to switch into raw mode.
    #[error("failed to switch the terminal into raw mode")]
    RawMode(#[source] io::Error),

    /// The key reader thread could not be started.
    #[error("failed to start the key reader")]
    KeyReader(#[source] io::Error),
}

impl SessionError {
    /// Returns true if this error comes from session configuration.
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(self, Self::InvalidDuration(_) | Self::ZeroCycles)
    }

    /// Returns true if the terminal cannot run the interactive mode.
    #[must_use]
    pub fn is_device_capability(&self) -> bool {
        matches!(self, Self::NotATerminal | Self::RawMode(_))
    }

    /// Returns a user-facing hint for recovering from this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::InvalidDuration(_) | Self::ZeroCycles => {
                "Use positive values for cycles and phase durations"
            }
            Self::NotATerminal | Self::RawMode(_) | Self::KeyReader(_) => {
                "The 'zenta now' command is a great alternative"
            }
        }
    }
}

/// Result type for breathing session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_duration_names_phase() {
        let err = SessionError::InvalidDuration(PhaseKind::Exhale);
        assert_eq!(err.to_string(), "exhale duration must be at least 1 tick");
        assert!(err.is_config());
        assert!(!err.is_device_capability());
    }

    #[test]
    fn test_zero_cycles() {
        let err = SessionError::ZeroCycles;
        assert!(err.to_string().contains("at least 1 cycle"));
        assert!(err.is_config());
    }

    #[test]
    fn test_not_a_terminal_suggests_fixed_mode() {
        let err = SessionError::NotATerminal;
        assert!(err.is_device_capability());
        assert!(err.suggestion().contains("zenta now"));
    }

    #[test]
    fn test_raw_mode_keeps_source() {
        let err = SessionError::RawMode(io::Error::new(io::ErrorKind::Other, "ioctl failed"));
        assert!(err.is_device_capability());
        assert!(!err.to_string().contains("ioctl failed"));
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("ioctl failed"));
    }

    #[test]
    fn test_key_reader_is_not_capability() {
        let err = SessionError::KeyReader(io::Error::new(io::ErrorKind::Other, "spawn"));
        assert!(!err.is_device_capability());
        assert!(!err.is_config());
    }

    #[test]
    fn test_error_chain_names_io_error_once() {
        let err = anyhow::Error::from(SessionError::KeyReader(io::Error::new(
            io::ErrorKind::Other,
            "spawn",
        )));
        assert_eq!(format!("{err:#}"), "failed to start the key reader: spawn");
    }
}
