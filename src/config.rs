//! Pulseline configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main Pulseline configuration
///
/// Loaded once at startup and immutable afterwards. There is no runtime
/// merging: defaults apply field-by-field via serde, and whatever the file
/// says wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Chat-completion endpoint configuration
    pub llm: LlmConfig,

    /// Agent loop configuration
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Checks that required environment variables and loop bounds are set
    /// correctly. Call this early in startup to fail fast with clear error
    /// messages.
    pub fn validate(&self) -> Result<()> {
        if std::env::var(&self.llm.api_key_env).is_err() {
            return Err(eyre::eyre!(
                "API key not found. Set the {} environment variable.",
                self.llm.api_key_env
            ));
        }

        if self.pipeline.max_iterations < 1 {
            return Err(eyre::eyre!("pipeline.max-iterations must be at least 1"));
        }

        if self.pipeline.heartbeat_field.is_empty() {
            return Err(eyre::eyre!("pipeline.heartbeat-field must not be empty"));
        }

        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .pulseline.yml
        let local_config = PathBuf::from(".pulseline.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/pulseline/pulseline.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("pulseline").join("pulseline.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Chat-completion endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Default model identifier (used when the caller passes none)
    pub model: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    ///
    /// Bounds a single completion round-trip, not the whole loop; the loop
    /// itself is bounded by `pipeline.max-iterations`.
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,
}

impl LlmConfig {
    /// Read the API key from the configured environment variable
    pub fn get_api_key(&self) -> Result<String> {
        std::env::var(&self.api_key_env).context(format!("environment variable {} not set", self.api_key_env))
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4.1-nano".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout_ms: 90_000,
        }
    }
}

/// Agent loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Hard safety limit for the agent loop (completion round-trips)
    #[serde(rename = "max-iterations")]
    pub max_iterations: u32,

    /// Name of the boolean flag inside the assistant JSON that decides
    /// whether to continue
    #[serde(rename = "heartbeat-field")]
    pub heartbeat_field: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_iterations: 5,
            heartbeat_field: "heartbeat".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.llm.model, "gpt-4.1-nano");
        assert_eq!(config.llm.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.llm.base_url, "https://api.openai.com/v1");
        assert_eq!(config.llm.timeout_ms, 90_000);
        assert_eq!(config.pipeline.max_iterations, 5);
        assert_eq!(config.pipeline.heartbeat_field, "heartbeat");
    }

    #[test]
    fn test_load_from_file_partial_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "llm:\n  model: gpt-4o\n  timeout-ms: 30000\npipeline:\n  max-iterations: 3"
        )
        .unwrap();

        let config = Config::load(Some(&file.path().to_path_buf())).unwrap();

        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.llm.timeout_ms, 30_000);
        assert_eq!(config.pipeline.max_iterations, 3);
        // Untouched fields keep their defaults
        assert_eq!(config.llm.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.pipeline.heartbeat_field, "heartbeat");
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let result = Config::load(Some(&PathBuf::from("/nonexistent/pulseline.yml")));
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_validation_missing_api_key() {
        let mut config = Config::default();
        config.llm.api_key_env = "NONEXISTENT_TEST_API_KEY_12345".to_string();

        let result = config.validate();

        assert!(result.is_err(), "Should fail without API key");
        let err = result.unwrap_err().to_string();
        assert!(
            err.contains("NONEXISTENT_TEST_API_KEY_12345"),
            "Error should mention the env var"
        );
    }

    #[test]
    #[serial]
    fn test_validation_with_api_key() {
        // SAFETY: serialized test, no concurrent env access
        unsafe {
            std::env::set_var("PULSELINE_TEST_API_KEY", "test-key");
        }

        let mut config = Config::default();
        config.llm.api_key_env = "PULSELINE_TEST_API_KEY".to_string();
        let result = config.validate();

        // SAFETY: serialized test, no concurrent env access
        unsafe {
            std::env::remove_var("PULSELINE_TEST_API_KEY");
        }

        assert!(result.is_ok(), "Should pass with API key set");
    }

    #[test]
    #[serial]
    fn test_validation_zero_iterations() {
        // SAFETY: serialized test, no concurrent env access
        unsafe {
            std::env::set_var("PULSELINE_TEST_API_KEY", "test-key");
        }

        let mut config = Config::default();
        config.llm.api_key_env = "PULSELINE_TEST_API_KEY".to_string();
        config.pipeline.max_iterations = 0;
        let result = config.validate();

        // SAFETY: serialized test, no concurrent env access
        unsafe {
            std::env::remove_var("PULSELINE_TEST_API_KEY");
        }

        assert!(result.is_err(), "Should reject max-iterations of 0");
    }

    #[test]
    #[serial]
    fn test_validation_empty_heartbeat_field() {
        // SAFETY: serialized test, no concurrent env access
        unsafe {
            std::env::set_var("PULSELINE_TEST_API_KEY", "test-key");
        }

        let mut config = Config::default();
        config.llm.api_key_env = "PULSELINE_TEST_API_KEY".to_string();
        config.pipeline.heartbeat_field = String::new();
        let result = config.validate();

        // SAFETY: serialized test, no concurrent env access
        unsafe {
            std::env::remove_var("PULSELINE_TEST_API_KEY");
        }

        assert!(result.is_err(), "Should reject empty heartbeat field");
    }
}
