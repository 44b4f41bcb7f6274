use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("invalid log format {0:?} (expected: text|json|journald)")]
    InvalidFormat(String),
    #[error("journald output requires linux and the `journald` feature")]
    JournaldUnavailable,
    #[error("global logger already installed")]
    AlreadyInitialized,
    #[error("logger setup failed: {0}")]
    Setup(String),
    #[error("invalid log level {level:?}: {reason}")]
    InvalidLevel { level: String, reason: String },
}
