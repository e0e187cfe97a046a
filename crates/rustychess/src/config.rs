//! Configuration loaded from `rustychess.toml`.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use rustychess_core::{ChessRules, Promotion};
use rustychess_engine::SearchConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// File read when no `--config` path is given, if it exists.
pub const DEFAULT_CONFIG_FILE: &str = "rustychess.toml";

/// What the session does after the engine fails to produce a usable move.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EngineFailurePolicy {
    /// Stop the session permanently.
    #[default]
    Halt,
    /// Keep the human half and wait for an explicit engine retry.
    Retry,
}

/// Session tunables.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct SessionConfig {
    /// Bound on one engine reply in milliseconds; 0 disables the bound.
    engine_timeout_ms: u64,

    /// Behaviour after an engine failure or timeout.
    failure_policy: EngineFailurePolicy,

    /// Piece used when the UI moves a pawn to the last rank.
    default_promotion: Promotion,

    /// Starting position as FEN; the standard array when absent.
    #[setters(strip_option)]
    start_position: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            engine_timeout_ms: 30_000,
            failure_policy: EngineFailurePolicy::Halt,
            default_promotion: Promotion::Queen,
            start_position: None,
        }
    }
}

impl SessionConfig {
    /// Engine reply bound, `None` when disabled.
    pub fn engine_timeout(&self) -> Option<Duration> {
        (self.engine_timeout_ms > 0).then(|| Duration::from_millis(self.engine_timeout_ms))
    }

    /// Builds the rules authority for the configured start position.
    #[instrument(skip(self))]
    pub fn rules(&self) -> Result<ChessRules, ConfigError> {
        match &self.start_position {
            Some(fen) => ChessRules::from_fen(fen)
                .map_err(|e| ConfigError::new(format!("Invalid start_position: {}", e))),
            None => Ok(ChessRules::new()),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct AppConfig {
    /// Search engine settings.
    engine: SearchConfig,

    /// Session settings.
    session: SessionConfig,
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        info!(depth = config.engine.search_depth(), "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if given, else [`DEFAULT_CONFIG_FILE`] if present, else defaults.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Checks values that deserialize fine but cannot be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine
            .validate()
            .map_err(|e| ConfigError::new(e.to_string()))?;
        self.session.rules()?;
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
