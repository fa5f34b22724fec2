//! Configuration management for the Course Assistant MCP Server.
//!
//! This module handles loading and validating configuration from environment variables.
//! A `.env` file is honoured through `dotenvy`, which never writes to stdout
//! (MCP uses stdout for communication).

use crate::error::{ConfigError, ConfigResult};
use crate::search::SearchOptions;
use std::env;
use std::path::PathBuf;

/// Configuration for the Course Assistant MCP Server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Course content location: a JSON week map or a directory of week files
    pub content_path: PathBuf,

    /// Index entries scanned between cooperative yields (default: 10)
    pub search_batch_size: usize,

    /// Maximum number of resources returned by a search (default: 3)
    pub max_search_results: usize,

    /// Let activity and bellringer matches boost resources of the same day (default: false)
    pub include_day_context: bool,

    /// Build the index at startup instead of on the first search (default: false)
    pub eager_index: bool,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `COURSE_CONTENT_PATH`: JSON file or directory holding the course content
    ///
    /// Optional environment variables:
    /// - `SEARCH_BATCH_SIZE`: Entries per cooperative yield (default: 10)
    /// - `MAX_SEARCH_RESULTS`: Max resources per search (default: 3)
    /// - `SEARCH_INCLUDE_DAY_CONTEXT`: Day-context boosting (default: false)
    /// - `EAGER_INDEX`: Build the index at startup (default: false)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // Missing .env is fine
        let _ = dotenvy::dotenv();

        let content_path = env::var("COURSE_CONTENT_PATH")
            .map_err(|_| ConfigError::MissingVar("COURSE_CONTENT_PATH".to_string()))?;

        if content_path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "COURSE_CONTENT_PATH".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let search_batch_size = Self::parse_env_usize("SEARCH_BATCH_SIZE", 10)?;
        let max_search_results = Self::parse_env_usize("MAX_SEARCH_RESULTS", 3)?;

        if search_batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                var: "SEARCH_BATCH_SIZE".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }
        if max_search_results == 0 {
            return Err(ConfigError::InvalidValue {
                var: "MAX_SEARCH_RESULTS".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        let include_day_context = Self::parse_env_bool("SEARCH_INCLUDE_DAY_CONTEXT", false)?;
        let eager_index = Self::parse_env_bool("EAGER_INDEX", false)?;

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            content_path: PathBuf::from(content_path),
            search_batch_size,
            max_search_results,
            include_day_context,
            eager_index,
            log_level,
        })
    }

    /// Search engine options derived from this configuration.
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            batch_size: self.search_batch_size,
            max_results: self.max_search_results,
            include_day_context: self.include_day_context,
        }
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as a boolean flag with a default value.
    ///
    /// Accepts `true/false`, `1/0`, `yes/no` and `on/off`, case-insensitively.
    fn parse_env_bool(var_name: &str, default: bool) -> ConfigResult<bool> {
        match env::var(var_name) {
            Ok(val) => match val.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(true),
                "false" | "0" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::InvalidValue {
                    var: var_name.to_string(),
                    reason: format!("Must be true or false, got: {}", val),
                }),
            },
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let options = SearchOptions::default();
        Config {
            content_path: PathBuf::new(),
            search_batch_size: options.batch_size,
            max_search_results: options.max_results,
            include_day_context: options.include_day_context,
            eager_index: false,
            log_level: "error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    // Helper to set and unset env vars for testing
    struct EnvGuard {
        vars: Vec<String>,
    }

    impl EnvGuard {
        fn new() -> Self {
            EnvGuard { vars: Vec::new() }
        }

        fn set(&mut self, key: &str, value: &str) {
            env::set_var(key, value);
            self.vars.push(key.to_string());
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for var in &self.vars {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.search_batch_size, 10);
        assert_eq!(config.max_search_results, 3);
        assert!(!config.include_day_context);
        assert!(!config.eager_index);
    }

    #[test]
    #[serial]
    fn test_config_from_env_valid() {
        let mut guard = EnvGuard::new();
        guard.set("COURSE_CONTENT_PATH", "data/course_content.json");
        guard.set("SEARCH_BATCH_SIZE", "25");
        guard.set("MAX_SEARCH_RESULTS", "5");
        guard.set("SEARCH_INCLUDE_DAY_CONTEXT", "yes");

        let config = Config::from_env().expect("config should load");
        assert_eq!(
            config.content_path,
            PathBuf::from("data/course_content.json")
        );
        assert_eq!(config.search_batch_size, 25);
        assert_eq!(config.max_search_results, 5);
        assert!(config.include_day_context);

        let options = config.search_options();
        assert_eq!(options.batch_size, 25);
        assert_eq!(options.max_results, 5);
        assert!(options.include_day_context);
    }

    #[test]
    #[serial]
    fn test_config_empty_content_path() {
        let mut guard = EnvGuard::new();
        guard.set("COURSE_CONTENT_PATH", "  ");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => {
                assert_eq!(var, "COURSE_CONTENT_PATH");
            }
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_zero_batch_size() {
        let mut guard = EnvGuard::new();
        guard.set("COURSE_CONTENT_PATH", "content.json");
        guard.set("SEARCH_BATCH_SIZE", "0");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => {
                assert_eq!(var, "SEARCH_BATCH_SIZE");
            }
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_zero_max_results() {
        let mut guard = EnvGuard::new();
        guard.set("COURSE_CONTENT_PATH", "content.json");
        guard.set("MAX_SEARCH_RESULTS", "0");

        let result = Config::from_env();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { ref var, .. }) if var == "MAX_SEARCH_RESULTS"
        ));
    }

    #[test]
    #[serial]
    fn test_parse_env_usize() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_USIZE", "42");

        assert_eq!(Config::parse_env_usize("TEST_USIZE", 10).unwrap(), 42);
        assert_eq!(Config::parse_env_usize("NONEXISTENT_USIZE", 10).unwrap(), 10);
    }

    #[test]
    #[serial]
    fn test_parse_env_usize_invalid() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_USIZE_INVALID", "not-a-number");

        assert!(Config::parse_env_usize("TEST_USIZE_INVALID", 10).is_err());
    }

    #[test]
    #[serial]
    fn test_parse_env_bool() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_BOOL_ON", "ON");
        guard.set("TEST_BOOL_OFF", "0");
        guard.set("TEST_BOOL_BAD", "maybe");

        assert!(Config::parse_env_bool("TEST_BOOL_ON", false).unwrap());
        assert!(!Config::parse_env_bool("TEST_BOOL_OFF", true).unwrap());
        assert!(Config::parse_env_bool("TEST_BOOL_BAD", false).is_err());
        assert!(Config::parse_env_bool("NONEXISTENT_BOOL", true).unwrap());
    }
}
