//! Configuration system for the capfill CLI.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// capfill configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Scan configuration
    #[serde(default)]
    pub scan: ScanConfig,
    /// Selection configuration
    #[serde(default)]
    pub selection: SelectionConfig,
    /// Transfer configuration
    #[serde(default)]
    pub transfer: TransferConfig,
    /// Display configuration
    #[serde(default)]
    pub ui: UiConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Scan configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Extensions to match, without dots
    #[serde(default = "default_patterns")]
    pub patterns: Vec<String>,
    /// Exclude files/directories named like live recordings
    #[serde(default)]
    pub skip_live: bool,
    /// Drop files smaller than this many bytes
    #[serde(default)]
    pub min_file_size: u64,
}

/// Selection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Consecutive misses tolerated before the selection scan aborts
    #[serde(default = "default_miss_limit")]
    pub miss_limit: u32,
}

/// Transfer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferConfig {
    /// Verify source/destination hashes after each copy
    #[serde(default = "default_true")]
    pub verify: bool,
    /// Progress-event channel depth
    #[serde(default = "default_event_queue_depth")]
    pub event_queue_depth: usize,
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Number of recently transferred files kept in the display window
    #[serde(default = "default_history_lines")]
    pub history_lines: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level for headless mode
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default values

fn default_patterns() -> Vec<String> {
    vec!["mp3".to_string()]
}

fn default_miss_limit() -> u32 {
    capfill_core::DEFAULT_MISS_LIMIT
}

fn default_true() -> bool {
    true
}

fn default_event_queue_depth() -> usize {
    capfill_core::EVENT_QUEUE_DEPTH
}

fn default_history_lines() -> usize {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            patterns: default_patterns(),
            skip_live: false,
            min_file_size: 0,
        }
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            miss_limit: default_miss_limit(),
        }
    }
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            verify: true,
            event_queue_depth: default_event_queue_depth(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            history_lines: default_history_lines(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, contents)?;
        Ok(())
    }

    /// Get default config path
    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join("capfill/config.toml")
    }

    /// Load config from the default path, or fall back to defaults without
    /// touching the filesystem if no file exists there.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing config file cannot be read or parsed.
    pub fn load_or_default() -> anyhow::Result<Self> {
        let path = Self::default_path();

        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid.
    pub fn validate(&self) -> anyhow::Result<()> {
        for pattern in &self.scan.patterns {
            if pattern.trim().trim_start_matches('.').is_empty() {
                anyhow::bail!("Empty extension pattern in scan.patterns");
            }
        }

        if self.transfer.event_queue_depth == 0 || self.transfer.event_queue_depth > 1024 {
            anyhow::bail!("Event queue depth must be between 1 and 1024");
        }

        if self.ui.history_lines == 0 || self.ui.history_lines > 64 {
            anyhow::bail!("History lines must be between 1 and 64");
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            anyhow::bail!(
                "Invalid log level: {}. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.scan.patterns, vec!["mp3"]);
        assert_eq!(config.selection.miss_limit, 10);
        assert!(config.transfer.verify);
        assert_eq!(config.transfer.event_queue_depth, 10);
        assert_eq!(config.ui.history_lines, 5);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.transfer.event_queue_depth = 0;
        assert!(config.validate().is_err());

        config.transfer.event_queue_depth = 10;
        config.logging.level = "shout".to_string();
        assert!(config.validate().is_err());

        config.logging.level = "debug".to_string();
        config.scan.patterns = vec![".".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.scan.patterns, deserialized.scan.patterns);
        assert_eq!(
            config.transfer.event_queue_depth,
            deserialized.transfer.event_queue_depth
        );
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[scan]\npatterns = [\"flac\"]\n").unwrap();
        assert_eq!(config.scan.patterns, vec!["flac"]);
        assert_eq!(config.selection.miss_limit, 10);
        assert!(config.transfer.verify);
    }
}
