//! Error handling for the sensorcast telemetry crate.

/// A specialized `Result` type for sensorcast operations.
pub type Result<T> = std::result::Result<T, TelemetryError>;

/// The main error type for sensorcast operations.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Selection spec is malformed or could not be parsed
    #[error("Invalid selection spec: {0}")]
    Spec(String),

    /// Sensor source failed to initialize or refresh
    #[error("Sensor source error: {0}")]
    Source(String),

    /// Transport setup failed (bad destination, bind failure)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TelemetryError {
    /// Create a new selection spec error
    pub fn spec_error(msg: impl Into<String>) -> Self {
        Self::Spec(msg.into())
    }

    /// Create a new sensor source error
    pub fn source_error(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }

    /// Create a new transport error
    pub fn transport_error(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a new configuration error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
