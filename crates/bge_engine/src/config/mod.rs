//! # Configuration System
//!
//! Serializable configuration for the engine subsystems. Every section has
//! defaults so a config file only needs to name the values it changes.
//!
//! ```ron
//! (
//!     main_loop: (min_frames: 30, limit_frames: true),
//!     logging: (level: "debug", tags: {"bge_engine::actors": "trace"}),
//!     actors: (resource_root: "assets"),
//! )
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from a `.ron` or `.toml` file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Some("ron") => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Save configuration to a `.ron` or `.toml` file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?,
            Some("ron") => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value is outside its allowed range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// # Main Loop Configuration
///
/// Controls the pacing of the headless main loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MainLoopConfig {
    /// Lowest update rate the simulation is stepped at; a frame delta never
    /// exceeds `1000 / min_frames` milliseconds. Zero is treated as one.
    pub min_frames: u32,
    /// Sleep briefly when no time has passed since the last step
    pub limit_frames: bool,
    /// Stop after this many updates (useful for tools and tests)
    pub max_frames: Option<u64>,
}

impl MainLoopConfig {
    /// Largest delta handed to update callbacks, in milliseconds
    pub fn max_step_millis(&self) -> u64 {
        1000 / u64::from(self.min_frames.max(1))
    }
}

impl Default for MainLoopConfig {
    fn default() -> Self {
        Self {
            min_frames: 6,
            limit_frames: false,
            max_frames: None,
        }
    }
}

/// # Logging Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Global log level (`off`, `error`, `warn`, `info`, `debug`, `trace`)
    pub level: String,
    /// Per-tag (log target prefix) levels
    pub tags: BTreeMap<String, String>,
    /// Write log records to standard error
    pub console_output: bool,
    /// Append log records to a file
    pub file_output: bool,
    /// Log file path; a timestamped name is used when unset
    pub file_path: Option<String>,
    /// Longest message in characters, 0 for no limit
    pub max_message_length: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            tags: BTreeMap::new(),
            console_output: true,
            file_output: false,
            file_path: None,
            max_message_length: 0,
        }
    }
}

/// # Actor Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorConfig {
    /// Directory actor resource paths are resolved against
    pub resource_root: String,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            resource_root: "resources".to_string(),
        }
    }
}

/// # Engine Configuration
///
/// Top-level configuration that encompasses all engine subsystems.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Main loop pacing
    pub main_loop: MainLoopConfig,
    /// Logging setup
    pub logging: LoggingConfig,
    /// Actor resources
    pub actors: ActorConfig,
}

impl EngineConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        crate::foundation::logging::parse_level(&self.logging.level)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        for level in self.logging.tags.values() {
            crate::foundation::logging::parse_level(level)
                .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        }
        if self.actors.resource_root.trim().is_empty() {
            return Err(ConfigError::Invalid("Actor resource root cannot be empty".to_string()));
        }
        if self.main_loop.max_frames == Some(0) {
            return Err(ConfigError::Invalid("max_frames must be at least 1 when set".to_string()));
        }
        Ok(())
    }

    /// Builder pattern: Set the actor resource root
    pub fn with_resource_root(mut self, root: impl Into<String>) -> Self {
        self.actors.resource_root = root.into();
        self
    }

    /// Builder pattern: Stop the main loop after a number of frames
    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.main_loop.max_frames = Some(frames);
        self
    }
}

impl Config for EngineConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.main_loop.min_frames, 6);
        assert_eq!(config.main_loop.max_step_millis(), 166);
        assert_eq!(config.actors.resource_root, "resources");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_min_frames_does_not_divide_by_zero() {
        let config = MainLoopConfig { min_frames: 0, ..Default::default() };
        assert_eq!(config.max_step_millis(), 1000);
    }

    #[test]
    fn test_partial_ron_uses_defaults() {
        let config: EngineConfig =
            ron::from_str("(main_loop: (min_frames: 30), logging: (level: \"debug\"))").unwrap();

        assert_eq!(config.main_loop.min_frames, 30);
        assert!(!config.main_loop.limit_frames);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.actors, ActorConfig::default());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = EngineConfig::default();
        config.logging.level = "verbose".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = EngineConfig::default().with_resource_root("  ");
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = EngineConfig::default();
        config.main_loop.max_frames = Some(0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_file_roundtrip_ron_and_toml() {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig::default()
            .with_resource_root("assets")
            .with_max_frames(10);

        for name in ["engine.ron", "engine.toml"] {
            let path = dir.path().join(name);
            config.save_to_file(&path).unwrap();
            let loaded = EngineConfig::load_from_file(&path).unwrap();
            assert_eq!(loaded, config, "{}", name);
        }
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.xml");
        std::fs::write(&path, "<Engine/>").unwrap();

        assert!(matches!(
            EngineConfig::load_from_file(&path),
            Err(ConfigError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            EngineConfig::default().save_to_file(&path),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }
}
