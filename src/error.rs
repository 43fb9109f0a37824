use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Observer errors
// =============================================================================

/// Failure raised by an observer while handling `update()`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ObserverError {
    #[error("subject was dropped before the observer could read its state")]
    SubjectDropped,

    #[error("observer is not bound to any subject")]
    Unbound,

    #[error("{0}")]
    Failed(String),
}

impl ObserverError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// Returned by `notify_observers` when running under `FailurePolicy::FailFast`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NotifyError {
    #[error("observer '{observer}' failed after {delivered} successful update(s): {source}")]
    ObserverFailed {
        observer: String,
        delivered: usize,
        #[source]
        source: ObserverError,
    },
}

// =============================================================================
// Configuration errors
// =============================================================================

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for field '{field}': {reason}")]
    Invalid { field: String, reason: String },
}

impl ConfigError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Top-level error used by the demo binaries
// =============================================================================

#[derive(Error, Debug)]
pub enum PatternError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Notify(#[from] NotifyError),

    #[error(transparent)]
    Observer(#[from] ObserverError),

    #[error("ticker task ended abnormally: {0}")]
    Ticker(#[from] tokio::task::JoinError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_error_names_observer() {
        let err = NotifyError::ObserverFailed {
            observer: "display".to_string(),
            delivered: 2,
            source: ObserverError::failed("screen offline"),
        };
        let message = err.to_string();
        assert!(message.contains("display"));
        assert!(message.contains("2 successful"));
        assert!(message.contains("screen offline"));
    }

    #[test]
    fn test_config_error_converts_to_pattern_error() {
        let err: PatternError = ConfigError::invalid("ticks", "must be positive").into();
        assert_eq!(
            err.to_string(),
            "Invalid value for field 'ticks': must be positive"
        );
    }
}
