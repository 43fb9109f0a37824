use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use crate::factory::DEFAULT_OBSTACLE_COUNT;
use crate::observer::FailurePolicy;

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ObserverConfig {
    pub initial_temperature: i64,
    pub tick_interval_ms: u64,
    /// How many ticks the demo waits for before stopping the ticker.
    pub ticks: u64,
    pub failure_policy: FailurePolicy,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 20,
            tick_interval_ms: 2000,
            ticks: 3,
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl ObserverConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FactoryConfig {
    pub level: u32,
    pub obstacle_count: usize,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            level: 90,
            obstacle_count: DEFAULT_OBSTACLE_COUNT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MediatorConfig {
    pub participants: Vec<String>,
    pub sender: String,
    pub message: String,
}

impl Default for MediatorConfig {
    fn default() -> Self {
        Self {
            participants: vec!["Akshay".to_string(), "Rohan".to_string(), "Raj".to_string()],
            sender: "Akshay".to_string(),
            message: "Hi".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

// =============================================================================
// Root
// =============================================================================

/// Settings for the demo binaries. Every field has a default, so an empty
/// file is a valid config.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    pub observer: ObserverConfig,
    pub factory: FactoryConfig,
    pub mediator: MediatorConfig,
    pub logging: LoggingConfig,
}

impl DemoConfig {
    /// Loads and validates a TOML file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: DemoConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Config path is the first positional argument, if any.
    pub fn from_args() -> Result<Self, ConfigError> {
        let path = std::env::args().nth(1).map(PathBuf::from);
        Self::load(path.as_deref())
    }

    /// Uses `path` when given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.observer.tick_interval_ms == 0 {
            return Err(ConfigError::invalid(
                "observer.tick_interval_ms",
                "must be greater than zero",
            ));
        }

        if self.factory.obstacle_count == 0 {
            return Err(ConfigError::invalid(
                "factory.obstacle_count",
                "must be greater than zero",
            ));
        }

        if self.mediator.participants.is_empty() {
            return Err(ConfigError::invalid(
                "mediator.participants",
                "at least one participant is required",
            ));
        }

        if !self.mediator.participants.contains(&self.mediator.sender) {
            return Err(ConfigError::invalid(
                "mediator.sender",
                format!("'{}' is not a participant", self.mediator.sender),
            ));
        }

        Ok(())
    }
}
