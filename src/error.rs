//! Error types for the Spice front end.
//!
//! The editor core never fails; these errors come from configuration
//! loading, terminal setup and argument handling.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised outside the headless editor core.
#[derive(Debug, Error)]
pub enum SpiceError {
    /// Underlying I/O failure (terminal, files).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid TOML for [`crate::SpiceConfig`].
    #[error("Invalid configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// An explicitly requested configuration file does not exist.
    #[error("Configuration file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// Bad command line usage.
    #[error("Usage: {0}")]
    Usage(String),

    /// Terminal could not be prepared or restored.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Convenience alias used across the front end.
pub type Result<T> = std::result::Result<T, SpiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SpiceError::Usage("spice [--config PATH] FILE".to_string());
        assert_eq!(err.to_string(), "Usage: spice [--config PATH] FILE");

        let err = SpiceError::ConfigNotFound(PathBuf::from("missing.toml"));
        assert_eq!(err.to_string(), "Configuration file not found: missing.toml");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: SpiceError = io.into();
        assert!(matches!(err, SpiceError::Io(_)));
    }
}
